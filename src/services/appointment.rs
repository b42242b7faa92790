use chrono::NaiveDateTime;

use crate::models::AppointmentDraft;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error("no ':' separating the command from the booking details")]
    MissingSeparator,

    #[error("expected '<timestamp>, <name>, <purpose>'")]
    InsufficientSegments,

    #[error("timestamp is not in YYYY-MM-DD HH:MM form")]
    BadTimestamp,
}

/// Parses `<anything>: <YYYY-MM-DD HH:MM>, <name>, <purpose...>` into a draft.
///
/// Everything after the name is the purpose, so commas inside the purpose
/// survive the round trip.
pub fn extract(message: &str) -> Result<AppointmentDraft, ExtractionError> {
    let (_, rest) = message
        .split_once(':')
        .ok_or(ExtractionError::MissingSeparator)?;

    let segments: Vec<&str> = rest.trim().split(',').map(str::trim).collect();
    if segments.len() < 3 {
        return Err(ExtractionError::InsufficientSegments);
    }

    let timestamp = parse_timestamp(segments[0])?;

    Ok(AppointmentDraft {
        name: segments[1].to_string(),
        date: timestamp.date().format("%Y-%m-%d").to_string(),
        time: timestamp.format("%H:%M").to_string(),
        purpose: segments[2..].join(", "),
        raw_message: message.to_string(),
    })
}

fn parse_timestamp(token: &str) -> Result<NaiveDateTime, ExtractionError> {
    // chrono accepts unpadded fields, so check the shape first
    if !has_timestamp_shape(token) {
        return Err(ExtractionError::BadTimestamp);
    }
    NaiveDateTime::parse_from_str(token, TIMESTAMP_FORMAT).map_err(|_| ExtractionError::BadTimestamp)
}

fn has_timestamp_shape(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() == 16
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            10 => *b == b' ',
            13 => *b == b':',
            _ => b.is_ascii_digit(),
        })
}
