//! Deterministic intent classification for the chat widget.
//!
//! Checks run in a fixed order and the first hit wins. All matching is
//! unanchored substring matching on the lower-cased message, so short
//! keywords also fire inside longer words.

use crate::models::{ClassificationResult, FaqRule};
use crate::services::appointment;
use crate::services::faq::match_faq;

pub const GREETING_KEYWORDS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
];

pub const THANKS_KEYWORDS: &[&str] = &["thanks", "thank you", "thx"];

pub const BOOKING_TRIGGER: &str = "book appointment";

pub fn classify(message: &str, faqs: &[FaqRule]) -> ClassificationResult {
    let lower = message.to_lowercase();

    if contains_any(&lower, GREETING_KEYWORDS) {
        return ClassificationResult::Greeting;
    }

    if contains_any(&lower, THANKS_KEYWORDS) {
        return ClassificationResult::Thanks;
    }

    if lower.contains(BOOKING_TRIGGER) {
        match appointment::extract(message) {
            Ok(draft) => return ClassificationResult::Booked(draft),
            Err(e) => {
                // A malformed booking is treated like any other message
                tracing::debug!(error = %e, "booking request not recognized");
            }
        }
    }

    match match_faq(message, faqs) {
        Some(answer) => ClassificationResult::FaqAnswer(answer.to_string()),
        None => ClassificationResult::Fallback,
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentDraft, TenantScope};

    fn faqs() -> Vec<FaqRule> {
        vec![
            FaqRule::new("When are you open", "We are open 9am to 5pm.", "timings, hours", TenantScope::Global),
            FaqRule::new("Do you take appointments", "Yes, book via chat.", "appointment", TenantScope::Tenant(1)),
        ]
    }

    #[test]
    fn test_greeting() {
        assert_eq!(classify("hello there", &[]), ClassificationResult::Greeting);
        assert_eq!(classify("GOOD MORNING", &[]), ClassificationResult::Greeting);
    }

    #[test]
    fn test_greeting_substring_is_accepted() {
        assert_eq!(classify("shine", &[]), ClassificationResult::Greeting);
    }

    #[test]
    fn test_thanks() {
        assert_eq!(classify("thanks a lot", &[]), ClassificationResult::Thanks);
        assert_eq!(classify("Thank You!", &[]), ClassificationResult::Thanks);
        assert_eq!(classify("thx", &[]), ClassificationResult::Thanks);
    }

    #[test]
    fn test_greeting_beats_thanks() {
        assert_eq!(classify("hey, thanks", &[]), ClassificationResult::Greeting);
    }

    #[test]
    fn test_booking() {
        let result = classify("book appointment: 2025-12-03 16:00, Tarun, demo meeting", &faqs());
        assert_eq!(
            result,
            ClassificationResult::Booked(AppointmentDraft {
                name: "Tarun".to_string(),
                date: "2025-12-03".to_string(),
                time: "16:00".to_string(),
                purpose: "demo meeting".to_string(),
                raw_message: "book appointment: 2025-12-03 16:00, Tarun, demo meeting".to_string(),
            })
        );
    }

    #[test]
    fn test_booking_trigger_is_case_insensitive() {
        let result = classify("BOOK APPOINTMENT: 2025-12-03 16:00, Tarun, demo", &[]);
        assert!(matches!(result, ClassificationResult::Booked(_)));
    }

    #[test]
    fn test_failed_booking_falls_through_to_faq() {
        let result = classify("book appointment: not-a-date, Name, purpose", &faqs());
        assert_eq!(
            result,
            ClassificationResult::FaqAnswer("Yes, book via chat.".to_string())
        );
    }

    #[test]
    fn test_failed_booking_without_faq_is_fallback() {
        let result = classify("book appointment: not-a-date, Name, purpose", &[]);
        assert_eq!(result, ClassificationResult::Fallback);
    }

    #[test]
    fn test_faq_answer() {
        assert_eq!(
            classify("what are your timings?", &faqs()),
            ClassificationResult::FaqAnswer("We are open 9am to 5pm.".to_string())
        );
    }

    #[test]
    fn test_fallback() {
        assert_eq!(classify("xyz 123", &faqs()), ClassificationResult::Fallback);
        assert_eq!(classify("do you sell gift cards", &faqs()), ClassificationResult::Fallback);
    }
}
