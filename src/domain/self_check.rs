//! Self-check questionnaire: question bank, answer session, and scorer.
//!
//! The self-check path is independent from the lab and onboarding scorers.
//! Its score is the plain sum of the selected option indices; no question
//! carries a weight of its own.
//!
//! # Question-bank precondition
//!
//! Because the option index is the score unit, every question must list its
//! options in increasing-risk order (index 0 = healthiest answer). The scorer
//! cannot detect a question authored the other way round; `QuestionBank`
//! only checks structure.

use serde::{Deserialize, Serialize};

use super::risk::RiskLevel;

/// Totals below this are low risk.
pub const LOW_RISK_CUTOFF: u32 = 20;

/// Totals below this (and at least `LOW_RISK_CUTOFF`) are medium risk.
pub const MEDIUM_RISK_CUTOFF: u32 = 35;

/// Errors from the self-check flow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelfCheckError {
    #[error("Question bank is empty")]
    EmptyBank,

    #[error("Question {question} has {options} option(s); at least 2 required")]
    TooFewOptions { question: usize, options: usize },

    #[error("Option {option} out of range for question {question} ({options} options)")]
    OptionOutOfRange {
        question: usize,
        option: usize,
        options: usize,
    },

    #[error("Question {question} has not been answered")]
    Unanswered { question: usize },

    #[error("Expected {expected} answers, got {actual}")]
    AnswerCountMismatch { expected: usize, actual: usize },

    #[error("Already at the first question")]
    AtFirstQuestion,

    #[error("Self-check already completed")]
    AlreadyCompleted,
}

/// Outcome of a completed self-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfCheckResult {
    pub score: u32,
    pub level: RiskLevel,
}

impl SelfCheckResult {
    /// Classify a total score.
    #[must_use]
    pub fn from_score(score: u32) -> Self {
        let level = if score < LOW_RISK_CUTOFF {
            RiskLevel::Low
        } else if score < MEDIUM_RISK_CUTOFF {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        };
        Self { score, level }
    }
}

/// Score a flat list of selected option indices.
///
/// Performs no bank-specific checks; use `QuestionBank::score` when the bank
/// is known.
#[must_use]
pub fn score_self_check(answers: &[usize]) -> SelfCheckResult {
    let score = answers
        .iter()
        .fold(0u32, |acc, &option| acc.saturating_add(u32::try_from(option).unwrap_or(u32::MAX)));
    SelfCheckResult::from_score(score)
}

/// A single-select question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    /// Options in increasing-risk order
    pub options: Vec<String>,
}

impl Question {
    #[must_use]
    pub fn new(prompt: impl Into<String>, options: &[&str]) -> Self {
        Self {
            prompt: prompt.into(),
            options: options.iter().map(|o| (*o).to_string()).collect(),
        }
    }
}

/// Ordered, validated list of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

const FREQUENCY: [&str; 4] = ["Tidak pernah", "Jarang", "Kadang-kadang", "Sering"];

const STANDARD_QUESTIONS: [(&str, [&str; 4]); 15] = [
    (
        "Seberapa sering Anda berolahraga minimal 30 menit?",
        ["Setiap hari", "3-4 kali seminggu", "1-2 kali seminggu", "Hampir tidak pernah"],
    ),
    ("Seberapa sering Anda mengonsumsi minuman manis?", FREQUENCY),
    ("Seberapa sering Anda makan makanan berlemak atau gorengan?", FREQUENCY),
    (
        "Berapa porsi sayur dan buah yang Anda makan per hari?",
        ["5 porsi atau lebih", "3-4 porsi", "1-2 porsi", "Hampir tidak ada"],
    ),
    (
        "Berapa jam rata-rata Anda tidur setiap malam?",
        ["7-8 jam", "6-7 jam atau 8-9 jam", "5-6 jam atau 9-10 jam", "Kurang dari 5 jam atau lebih dari 10 jam"],
    ),
    ("Seberapa sering Anda merasa stres atau cemas?", FREQUENCY),
    (
        "Bagaimana status merokok Anda?",
        ["Tidak pernah merokok", "Mantan perokok", "Perokok ringan", "Perokok berat"],
    ),
    ("Seberapa sering Anda mengonsumsi alkohol?", FREQUENCY),
    ("Seberapa sering Anda merasa sangat haus?", FREQUENCY),
    ("Seberapa sering Anda buang air kecil di malam hari?", FREQUENCY),
    ("Seberapa sering Anda merasa mudah lelah?", FREQUENCY),
    (
        "Apakah berat badan Anda berubah tanpa sebab dalam 6 bulan terakhir?",
        ["Tidak berubah", "Berubah sedikit", "Berubah cukup banyak", "Berubah drastis"],
    ),
    ("Seberapa sering Anda merasakan nyeri dada atau sesak napas?", FREQUENCY),
    (
        "Berapa anggota keluarga inti yang memiliki diabetes, kolesterol tinggi, atau penyakit jantung?",
        ["Tidak ada", "1 orang", "2 orang", "3 orang atau lebih"],
    ),
    (
        "Kapan terakhir kali Anda memeriksakan gula darah dan kolesterol?",
        ["Kurang dari 6 bulan lalu", "6-12 bulan lalu", "Lebih dari 1 tahun lalu", "Belum pernah"],
    ),
];

impl QuestionBank {
    /// Build a bank from questions.
    ///
    /// # Errors
    /// Returns `EmptyBank` for no questions, `TooFewOptions` for a question
    /// with fewer than two options.
    pub fn new(questions: Vec<Question>) -> Result<Self, SelfCheckError> {
        if questions.is_empty() {
            return Err(SelfCheckError::EmptyBank);
        }
        if let Some((question, q)) = questions.iter().enumerate().find(|(_, q)| q.options.len() < 2) {
            return Err(SelfCheckError::TooFewOptions {
                question,
                options: q.options.len(),
            });
        }
        Ok(Self { questions })
    }

    /// The shipped 15-question instrument, four options per question.
    #[must_use]
    pub fn standard() -> Self {
        let questions = STANDARD_QUESTIONS
            .iter()
            .map(|(prompt, options)| Question::new(*prompt, options))
            .collect();
        Self { questions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Highest reachable total.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.questions
            .iter()
            .map(|q| q.options.len().saturating_sub(1) as u32)
            .sum()
    }

    fn check_option(&self, question: usize, option: usize) -> Result<(), SelfCheckError> {
        let options = self.questions.get(question).map_or(0, |q| q.options.len());
        if option >= options {
            return Err(SelfCheckError::OptionOutOfRange {
                question,
                option,
                options,
            });
        }
        Ok(())
    }

    /// Score a complete answer list against this bank.
    ///
    /// # Errors
    /// Returns `AnswerCountMismatch` or `OptionOutOfRange`.
    pub fn score(&self, answers: &[usize]) -> Result<SelfCheckResult, SelfCheckError> {
        if answers.len() != self.len() {
            return Err(SelfCheckError::AnswerCountMismatch {
                expected: self.len(),
                actual: answers.len(),
            });
        }
        for (question, &option) in answers.iter().enumerate() {
            self.check_option(question, option)?;
        }
        Ok(score_self_check(answers))
    }
}

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    InProgress { current: usize },
    Completed(SelfCheckResult),
}

/// What `SelfCheckSession::next` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the question at this index
    Question(usize),
    /// The last question was answered and the session is scored
    Completed(SelfCheckResult),
}

/// Answer-by-answer walk through a question bank.
///
/// Answers are kept by question index, so going back and re-selecting
/// replaces the earlier answer.
#[derive(Debug, Clone)]
pub struct SelfCheckSession {
    bank: QuestionBank,
    answers: Vec<Option<usize>>,
    state: SessionState,
}

impl SelfCheckSession {
    #[must_use]
    pub fn new(bank: QuestionBank) -> Self {
        let answers = vec![None; bank.len()];
        Self {
            bank,
            answers,
            state: SessionState::InProgress { current: 0 },
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Index of the question being answered, `None` once completed.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            SessionState::InProgress { current } => Some(current),
            SessionState::Completed(_) => None,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().and_then(|i| self.bank.get(i))
    }

    /// Answer currently stored for the current question.
    #[must_use]
    pub fn current_answer(&self) -> Option<usize> {
        self.current_index().and_then(|i| self.answers[i])
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    /// Number of answered questions.
    #[must_use]
    pub fn answered(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    #[must_use]
    pub fn result(&self) -> Option<SelfCheckResult> {
        match self.state {
            SessionState::Completed(result) => Some(result),
            SessionState::InProgress { .. } => None,
        }
    }

    fn in_progress(&self) -> Result<usize, SelfCheckError> {
        self.current_index().ok_or(SelfCheckError::AlreadyCompleted)
    }

    /// Select an option for the current question.
    ///
    /// # Errors
    /// Returns `OptionOutOfRange` or `AlreadyCompleted`.
    pub fn select(&mut self, option: usize) -> Result<(), SelfCheckError> {
        let current = self.in_progress()?;
        self.bank.check_option(current, option)?;
        self.answers[current] = Some(option);
        Ok(())
    }

    /// Advance past the current question; completes the session on the last one.
    ///
    /// # Errors
    /// Returns `Unanswered` if the current question has no answer, or
    /// `AlreadyCompleted`.
    pub fn next(&mut self) -> Result<Advance, SelfCheckError> {
        let current = self.in_progress()?;
        if self.answers[current].is_none() {
            return Err(SelfCheckError::Unanswered { question: current });
        }

        if current + 1 < self.bank.len() {
            self.state = SessionState::InProgress { current: current + 1 };
            return Ok(Advance::Question(current + 1));
        }

        // Every earlier question was answered to get here.
        let answers: Vec<usize> = self.answers.iter().flatten().copied().collect();
        let result = score_self_check(&answers);
        self.state = SessionState::Completed(result);
        Ok(Advance::Completed(result))
    }

    /// Step back one question, keeping stored answers.
    ///
    /// # Errors
    /// Returns `AtFirstQuestion` or `AlreadyCompleted`.
    pub fn previous(&mut self) -> Result<usize, SelfCheckError> {
        let current = self.in_progress()?;
        if current == 0 {
            return Err(SelfCheckError::AtFirstQuestion);
        }
        self.state = SessionState::InProgress { current: current - 1 };
        Ok(current - 1)
    }
}
