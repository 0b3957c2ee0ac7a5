//! The fixed, ordered list of scripted wellbeing questions.

const QUESTIONS: [&str; 10] = [
    "How have you been feeling lately?",
    "How has your sleep been?",
    "On a scale of 1-10, how would you rate your stress levels?",
    "What's been bringing you joy recently?",
    "How are your energy levels throughout the day?",
    "Have you been able to relax and take time for yourself?",
    "How are things going with friends and family?",
    "What's one positive thing that happened this week?",
    "How do you usually cope when you feel stressed?",
    "Is there anything you'd like to share about your overall wellbeing?",
];

/// Read-only lookup over the scripted questions.
///
/// Running past the end is expected: `get` returns `None` once every
/// question has been asked.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionBank;

impl QuestionBank {
    /// Returns the question at `index`, or `None` when exhausted.
    pub fn get(index: usize) -> Option<&'static str> {
        QUESTIONS.get(index).copied()
    }

    /// Number of scripted questions.
    pub const fn len() -> usize {
        QUESTIONS.len()
    }

    /// True when `cursor` points past the last question.
    pub fn is_exhausted(cursor: usize) -> bool {
        cursor >= Self::len()
    }

    /// All questions in asking order.
    pub fn all() -> &'static [&'static str] {
        &QUESTIONS
    }
}
