use super::AppointmentDraft;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationResult {
    Greeting,
    Thanks,
    Booked(AppointmentDraft),
    FaqAnswer(String),
    Fallback,
}

impl ClassificationResult {
    pub fn kind(&self) -> &'static str {
        match self {
            ClassificationResult::Greeting => "greeting",
            ClassificationResult::Thanks => "thanks",
            ClassificationResult::Booked(_) => "booked",
            ClassificationResult::FaqAnswer(_) => "faq_answer",
            ClassificationResult::Fallback => "fallback",
        }
    }
}
