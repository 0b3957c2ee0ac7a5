//! Keyword-count sentiment heuristic.
//!
//! Joins every user answer, lower-cases it, and checks which of a fixed set
//! of positive and negative terms appear anywhere in the text. Terms are
//! matched as substrings and each term counts at most once, so "stressed"
//! scores both "stress" and "stressed".

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Message;

const POSITIVE_TERMS: [&str; 10] = [
    "good", "great", "happy", "well", "fine", "better", "okay", "excited", "nice", "love",
];

const NEGATIVE_TERMS: [&str; 10] = [
    "sad",
    "stress",
    "stressed",
    "tired",
    "bad",
    "worried",
    "anxious",
    "hard",
    "difficult",
    "struggle",
];

/// Overall mood of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
}

impl SentimentLabel {
    /// Text shown to the user alongside the label.
    pub fn closing_message(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "You seem to have a positive outlook overall!",
            SentimentLabel::Negative => {
                "Thank you for sharing. Remember it's okay to ask for support."
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many positive and negative terms were found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SentimentScore {
    pub positive: usize,
    pub negative: usize,
}

impl SentimentScore {
    /// Applies the decision rule. Ties, including no matches at all,
    /// resolve to `Positive`.
    pub fn label(&self) -> SentimentLabel {
        if self.negative > self.positive {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Positive
        }
    }
}

/// Stateless classifier over a transcript.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentClassifier;

impl SentimentClassifier {
    /// Counts term hits across all user messages.
    pub fn score(transcript: &[Message]) -> SentimentScore {
        let user_text = transcript
            .iter()
            .filter(|m| m.is_user())
            .map(|m| m.text().to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");

        SentimentScore {
            positive: count_present(&user_text, &POSITIVE_TERMS),
            negative: count_present(&user_text, &NEGATIVE_TERMS),
        }
    }

    /// Labels a transcript.
    pub fn classify(transcript: &[Message]) -> SentimentLabel {
        Self::score(transcript).label()
    }
}

fn count_present(text: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|term| text.contains(*term)).count()
}
