use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::models::FaqRule;

/// Returns the answer of the first rule whose keyword or question text
/// appears in `message`.
pub fn match_faq<'a>(message: &str, rules: &'a [FaqRule]) -> Option<&'a str> {
    let lower = message.to_lowercase();

    rules
        .iter()
        .find(|rule| rule_matches(&lower, rule))
        .map(|rule| rule.answer.as_str())
}

fn rule_matches(lower_message: &str, rule: &FaqRule) -> bool {
    let keyword_hit = rule
        .keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .any(|k| lower_message.contains(&k));
    if keyword_hit {
        return true;
    }

    let question = rule.question.trim().to_lowercase();
    !question.is_empty() && lower_message.contains(&question)
}

/// One entry of the FAQ seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct FaqSeed {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub keywords: String,
}

/// Reads a JSON array of FAQ entries. An unreadable or malformed file
/// yields no entries.
pub fn load_seed_file(path: &Path) -> Vec<FaqSeed> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read FAQ seed file");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<FaqSeed>>(&raw) {
        Ok(seeds) => seeds,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "malformed FAQ seed file, ignoring");
            Vec::new()
        }
    }
}
