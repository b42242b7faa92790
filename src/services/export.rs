use crate::models::Appointment;

const HEADER: [&str; 4] = ["Name", "Date", "Time", "Purpose"];

pub fn appointments_to_csv(appointments: &[Appointment]) -> String {
    let mut out = String::new();
    push_record(&mut out, &HEADER);
    for a in appointments {
        push_record(&mut out, &[&a.name, &a.date, &a.time, &a.purpose]);
    }
    out
}

fn push_record(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push_str("\r\n");
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}
