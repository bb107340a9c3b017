use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::EngineError;
use crate::sentiment::Sentiment;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub sentiment: Sentiment,
    pub suggestions: Vec<String>,
    pub timestamp: String,
}

struct Topic {
    keywords: &'static [&'static str],
    response: &'static str,
    sentiment: Sentiment,
    suggestions: [&'static str; 4],
}

const TOPICS: [Topic; 4] = [
    Topic {
        keywords: &["pcos", "symptom"],
        response: "I'm here to help you understand your PCOS journey. Would you like to track your symptoms or learn about management strategies?",
        sentiment: Sentiment::Neutral,
        suggestions: [
            "Track my symptoms",
            "Learn about PCOS types",
            "Get lifestyle tips",
            "Connect with community",
        ],
    },
    Topic {
        keywords: &["sad", "depressed", "overwhelmed"],
        response: "I hear that you're going through a difficult time. Your feelings are valid, and you're not alone in this journey. Would you like to try some journaling or breathing exercises?",
        sentiment: Sentiment::Negative,
        suggestions: [
            "Start journaling",
            "Try breathing exercises",
            "Connect with support",
            "Learn coping strategies",
        ],
    },
    Topic {
        keywords: &["good", "better", "happy"],
        response: "I'm so glad to hear you're feeling positive! It's wonderful to celebrate these moments. How can we build on this positive energy?",
        sentiment: Sentiment::Positive,
        suggestions: [
            "Track this mood",
            "Share with community",
            "Set new goals",
            "Plan self-care",
        ],
    },
    Topic {
        keywords: &["period", "cycle", "menstrual"],
        response: "Tracking your cycle is so important for understanding your body's patterns. Would you like help logging your cycle data or understanding your patterns?",
        sentiment: Sentiment::Neutral,
        suggestions: [
            "Log cycle data",
            "View cycle insights",
            "Learn about phases",
            "Track symptoms",
        ],
    },
];

const FALLBACK_RESPONSE: &str = "I understand you're reaching out. How can I support you today?";

/// Canned reply from the first topic whose keyword appears in the message.
pub fn respond(message: &str, now: DateTime<Utc>) -> Result<ChatReply, EngineError> {
    if message.trim().is_empty() {
        return Err(EngineError::InputValidation(
            "message is required and must be a non-empty string".to_string(),
        ));
    }

    let lower = message.to_lowercase();
    let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);

    let reply = match TOPICS
        .iter()
        .find(|topic| topic.keywords.iter().any(|keyword| lower.contains(keyword)))
    {
        Some(topic) => ChatReply {
            response: topic.response.to_string(),
            sentiment: topic.sentiment,
            suggestions: topic.suggestions.iter().map(|s| s.to_string()).collect(),
            timestamp,
        },
        None => ChatReply {
            response: FALLBACK_RESPONSE.to_string(),
            sentiment: Sentiment::Neutral,
            suggestions: Vec::new(),
            timestamp,
        },
    };

    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn blank_message_is_rejected() {
        assert!(matches!(respond("   ", now()), Err(EngineError::InputValidation(_))));
    }

    #[test]
    fn pcos_questions_win_over_mood_words() {
        let reply = respond("My PCOS makes me sad", now()).unwrap();
        assert_eq!(reply.sentiment, Sentiment::Neutral);
        assert_eq!(reply.suggestions[1], "Learn about PCOS types");
    }

    #[test]
    fn distress_is_negative() {
        let reply = respond("I feel so overwhelmed", now()).unwrap();
        assert_eq!(reply.sentiment, Sentiment::Negative);
        assert_eq!(reply.suggestions.len(), 4);
    }

    #[test]
    fn cycle_questions_get_tracking_help() {
        let reply = respond("When will my period start?", now()).unwrap();
        assert_eq!(reply.suggestions[0], "Log cycle data");
    }

    #[test]
    fn unknown_topics_fall_back() {
        let reply = respond("hello there", now()).unwrap();
        assert_eq!(reply.response, FALLBACK_RESPONSE);
        assert!(reply.suggestions.is_empty());
        assert_eq!(reply.timestamp, "2026-03-01T10:00:00.000Z");
    }
}
