//! Per-module quiz evaluation.
//!
//! [`AnswerState`] holds the learner's answer for the active module only. The
//! first answer is final: once evaluated, the selection is frozen until the
//! navigator moves to another module and resets it.
//!
//! Display state for each option is a pure projection of the answer state and
//! the question, computed by [`AnswerState::option_display`].

use serde::{Deserialize, Serialize};

use crate::path::Question;

/// Feedback shown after a correct answer.
pub const CORRECT_FEEDBACK: &str = "Mastery verified.";

/// Feedback shown after an incorrect answer.
pub const INCORRECT_FEEDBACK: &str = "Review the module content and try the next one.";

/// Placeholder shown when a module has no usable question.
pub const NO_QUIZ_MESSAGE: &str = "No quiz available for this module.";

// ============================================================================
// OptionDisplay
// ============================================================================

/// How a single answer option should be rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionDisplay {
    /// No feedback.
    #[default]
    Neutral,
    /// The learner picked this option and it is right.
    SelectedCorrect,
    /// The learner picked this option and it is wrong.
    SelectedIncorrect,
    /// The right answer, revealed after a wrong pick.
    RevealedCorrect,
}

impl OptionDisplay {
    /// Short marker drawn next to the option.
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::Neutral => " ",
            Self::SelectedCorrect => "✓",
            Self::SelectedIncorrect => "✗",
            Self::RevealedCorrect => "→",
        }
    }
}

// ============================================================================
// SelectOutcome
// ============================================================================

/// Result of trying to answer the active module's question.
///
/// Everything except `Evaluated` is a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The answer was recorded and evaluated.
    Evaluated {
        /// Whether the chosen option is the correct one.
        correct: bool,
    },
    /// The question was already answered; nothing changed.
    AlreadyAnswered,
    /// The module has no usable question; nothing changed.
    NoQuiz,
    /// The index names no option; nothing changed.
    UnknownOption,
}

// ============================================================================
// QuizStatus
// ============================================================================

/// Overall state of the active module's quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum QuizStatus {
    /// The module has no usable question.
    Unavailable,
    /// Waiting for the learner's answer.
    Awaiting,
    /// The learner answered.
    Answered {
        /// Whether the answer was right.
        correct: bool,
    },
}

impl QuizStatus {
    /// Feedback line for the learner, once there is something to say.
    #[must_use]
    pub const fn feedback(&self) -> Option<&'static str> {
        match self {
            Self::Answered { correct: true } => Some(CORRECT_FEEDBACK),
            Self::Answered { correct: false } => Some(INCORRECT_FEEDBACK),
            Self::Unavailable | Self::Awaiting => None,
        }
    }
}

// ============================================================================
// AnswerState
// ============================================================================

/// The learner's answer for the active module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerState {
    selected: Option<usize>,
    evaluated: Option<bool>,
}

impl AnswerState {
    /// Creates an empty answer state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selected: None,
            evaluated: None,
        }
    }

    /// Clears the selection and evaluation.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The selected option index, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Whether the selection was correct, once evaluated.
    #[must_use]
    pub const fn evaluated(&self) -> Option<bool> {
        self.evaluated
    }

    /// Returns `true` if nothing has been selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.selected.is_none() && self.evaluated.is_none()
    }

    /// Returns `true` if the answer was evaluated as correct.
    #[must_use]
    pub const fn is_correct(&self) -> bool {
        matches!(self.evaluated, Some(true))
    }

    /// Records and evaluates the learner's choice.
    ///
    /// Only the first valid call on a given module has any effect.
    pub fn select(&mut self, question: Option<&Question>, index: usize) -> SelectOutcome {
        if self.evaluated.is_some() {
            return SelectOutcome::AlreadyAnswered;
        }
        let Some(question) = question else {
            return SelectOutcome::NoQuiz;
        };
        if !question.has_option(index) {
            return SelectOutcome::UnknownOption;
        }

        let correct = index == question.correct_index;
        self.selected = Some(index);
        self.evaluated = Some(correct);
        SelectOutcome::Evaluated { correct }
    }

    /// Display state of option `index` for `question`.
    ///
    /// Before evaluation every option is neutral. After a correct answer only
    /// the selected option is marked. After a wrong answer the selected option
    /// is marked wrong and the correct one is revealed.
    #[must_use]
    pub fn option_display(&self, question: &Question, index: usize) -> OptionDisplay {
        match (self.evaluated, self.selected) {
            (Some(true), Some(selected)) if selected == index => OptionDisplay::SelectedCorrect,
            (Some(false), Some(selected)) if selected == index => {
                OptionDisplay::SelectedIncorrect
            }
            (Some(false), _) if index == question.correct_index => OptionDisplay::RevealedCorrect,
            _ => OptionDisplay::Neutral,
        }
    }

    /// Display state of every option of `question`, in order.
    #[must_use]
    pub fn option_displays(&self, question: &Question) -> Vec<OptionDisplay> {
        (0..question.options.len())
            .map(|index| self.option_display(question, index))
            .collect()
    }

    /// Overall quiz status for `question`.
    #[must_use]
    pub const fn status(&self, question: Option<&Question>) -> QuizStatus {
        match (question, self.evaluated) {
            (None, _) => QuizStatus::Unavailable,
            (Some(_), None) => QuizStatus::Awaiting,
            (Some(_), Some(correct)) => QuizStatus::Answered { correct },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
