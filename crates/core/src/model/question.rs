use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of answer options every question carries.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Seconds allotted for one quiz run. Shared by the session countdown and the
/// results summary so both always agree on elapsed time.
pub const ALLOTTED_SECONDS: u32 = 60;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("correct option index {0} is out of range")]
    CorrectOptionOutOfRange(usize),
}

/// A single multiple-choice question: prompt text, four options, and the
/// index of the correct one. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: u32,
    text: String,
    options: [String; OPTIONS_PER_QUESTION],
    correct_option: u8,
}

impl Question {
    /// Builds a question, validating the correct-option index.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::CorrectOptionOutOfRange` if `correct_option`
    /// does not index into `options`.
    pub fn new(
        id: u32,
        text: impl Into<String>,
        options: [String; OPTIONS_PER_QUESTION],
        correct_option: u8,
    ) -> Result<Self, QuestionError> {
        if usize::from(correct_option) >= OPTIONS_PER_QUESTION {
            return Err(QuestionError::CorrectOptionOutOfRange(correct_option.into()));
        }
        Ok(Self {
            id,
            text: text.into(),
            options,
            correct_option,
        })
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTIONS_PER_QUESTION] {
        &self.options
    }

    #[must_use]
    pub fn correct_option(&self) -> u8 {
        self.correct_option
    }

    /// Whether the given selection (if any) is the correct option.
    /// An unanswered slot is never correct.
    #[must_use]
    pub fn is_correct(&self, selection: Option<u8>) -> bool {
        selection == Some(self.correct_option)
    }
}

fn opts(a: &str, b: &str, c: &str, d: &str) -> [String; OPTIONS_PER_QUESTION] {
    [a.to_owned(), b.to_owned(), c.to_owned(), d.to_owned()]
}

/// The fixed question set, defined once at process start and never mutated.
///
/// # Panics
///
/// Panics only if a correct-option index in the static data is out of range,
/// which the in-module test rules out.
#[must_use]
pub fn question_bank() -> Vec<Question> {
    let raw: [(&str, [String; OPTIONS_PER_QUESTION], u8); 10] = [
        (
            "What percentage of people use AI daily without realizing it, according to the presentation?",
            opts("65%", "72%", "84%", "91%"),
            2,
        ),
        (
            "Which of the following is NOT a subset of AI mentioned in the presentation?",
            opts(
                "Natural Language Processing (NLP)",
                "Neural Networks",
                "Blockchain",
                "Computer Vision",
            ),
            2,
        ),
        (
            "What is one key advantage of AI in healthcare, as highlighted in the presentation?",
            opts(
                "Reducing hospital staff",
                "Enabling faster and more accurate diagnoses",
                "Eliminating all manual tasks",
                "Replacing doctors entirely",
            ),
            1,
        ),
        (
            "Which of these is a real-world application of AI mentioned in the presentation?",
            opts(
                "Self-driving cars using computer vision",
                "AI-powered time travel",
                "Instant food delivery via drones",
                "Teleportation technology",
            ),
            0,
        ),
        (
            "What is a major disadvantage of AI discussed in the presentation?",
            opts(
                "It requires no electricity",
                "It inherits prejudices from training data",
                "It only works in cold climates",
                "It cannot process large datasets",
            ),
            1,
        ),
        (
            "Which tool is associated with Generative AI in the presentation?",
            opts("ChatGPT", "Google Maps", "Excel", "Photoshop"),
            0,
        ),
        (
            "What is the primary purpose of digital marketing campaigns, as emphasized in the presentation?",
            opts(
                "To replace all traditional advertising methods",
                "To increase engagement and conversion rates through targeted strategies",
                "To reduce the need for customer interaction",
                "To focus solely on viral content creation",
            ),
            1,
        ),
        (
            "Which principle is NOT listed as a core foundation of digital marketing in the presentation?",
            opts(
                "Customer-centricity",
                "Data-driven decision-making",
                "Multi-channel integration",
                "Exclusive reliance on print media",
            ),
            3,
        ),
        (
            "Which tool is explicitly mentioned as essential for digital marketers in the presentation?",
            opts("Canva", "Photoshop", "AutoCAD", "QuickBooks"),
            0,
        ),
        (
            "What key behavior does the presentation advise marketers to adopt for long-term success?",
            opts(
                "Strictly follow outdated trends",
                "Avoid analytics platforms",
                "Stay adaptable and keep learning",
                "Limit campaigns to one social platform",
            ),
            2,
        ),
    ];

    raw.into_iter()
        .enumerate()
        .map(|(index, (text, options, correct))| {
            let id = u32::try_from(index).unwrap_or(u32::MAX) + 1;
            Question::new(id, text, options, correct)
                .expect("static question data should be valid")
        })
        .collect()
}
