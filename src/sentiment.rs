use serde::Serialize;

use crate::models::JournalEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

const NEGATIVE_KEYWORDS: [&str; 6] = ["sad", "depressed", "overwhelmed", "worried", "stress", "anxious"];
const POSITIVE_KEYWORDS: [&str; 4] = ["good", "better", "happy", "grateful"];

/// Mood tags treated as stress signals.
pub const STRESS_MOODS: [&str; 2] = ["anxious", "frustrated"];

pub fn is_stress_mood(mood: &str) -> bool {
    let mood = mood.trim().to_lowercase();
    STRESS_MOODS.contains(&mood.as_str())
}

/// Returns `None` for tags outside the mood vocabulary.
pub fn from_mood(mood: &str) -> Option<Sentiment> {
    match mood.trim().to_lowercase().as_str() {
        "happy" | "calm" | "hopeful" | "grateful" => Some(Sentiment::Positive),
        "anxious" | "sad" | "frustrated" => Some(Sentiment::Negative),
        "tired" => Some(Sentiment::Neutral),
        _ => None,
    }
}

pub fn from_text(text: &str) -> Sentiment {
    let lower = text.to_lowercase();
    let negative = NEGATIVE_KEYWORDS
        .iter()
        .filter(|keyword| lower.contains(*keyword))
        .count();
    let positive = POSITIVE_KEYWORDS
        .iter()
        .filter(|keyword| lower.contains(*keyword))
        .count();

    match negative.cmp(&positive) {
        std::cmp::Ordering::Greater => Sentiment::Negative,
        std::cmp::Ordering::Less => Sentiment::Positive,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

/// A decisive mood tag wins; otherwise the text decides.
pub fn of_entry(entry: &JournalEntry) -> Sentiment {
    match entry.mood.as_deref().and_then(from_mood) {
        Some(Sentiment::Neutral) | None => from_text(&entry.content),
        Some(sentiment) => sentiment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(content: &str, mood: Option<&str>) -> JournalEntry {
        JournalEntry {
            content: content.to_string(),
            mood: mood.map(str::to_string),
            created_at: None,
        }
    }

    #[test]
    fn mood_tags_map_to_sentiment() {
        assert_eq!(from_mood("Happy"), Some(Sentiment::Positive));
        assert_eq!(from_mood("frustrated"), Some(Sentiment::Negative));
        assert_eq!(from_mood("tired"), Some(Sentiment::Neutral));
        assert_eq!(from_mood("meh"), None);
    }

    #[test]
    fn text_sentiment_counts_keywords() {
        assert_eq!(from_text("Feeling overwhelmed today..."), Sentiment::Negative);
        assert_eq!(from_text("Had a good day with friends"), Sentiment::Positive);
        assert_eq!(from_text("Went to the store"), Sentiment::Neutral);
        assert_eq!(from_text("worried but feeling better"), Sentiment::Neutral);
    }

    #[test]
    fn entry_prefers_decisive_mood_tag() {
        assert_eq!(of_entry(&entry("Had a good day", Some("sad"))), Sentiment::Negative);
        assert_eq!(of_entry(&entry("So much stress", Some("tired"))), Sentiment::Negative);
        assert_eq!(of_entry(&entry("So much stress", None)), Sentiment::Negative);
    }

    #[test]
    fn stress_moods_are_case_insensitive() {
        assert!(is_stress_mood("Anxious"));
        assert!(!is_stress_mood("sad"));
    }
}
