//! Cursor over an installed learning path.
//!
//! The [`Navigator`] owns the path, the active module index and the answer
//! state for the active module. Every index change resets the answer state as
//! part of the same call, so there is never a moment where the new module is
//! active with the old module's answer still attached.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ViewerError};
use crate::path::{LearningPath, Module};
use crate::quiz::{AnswerState, OptionDisplay, QuizStatus, SelectOutcome};

/// Emitted whenever the active module is (re)selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleChange {
    /// Index before the change.
    pub from: usize,
    /// Index after the change.
    pub to: usize,
}

/// Position of the learner within the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// 1-based position of the active module.
    pub phase: usize,
    /// Number of modules.
    pub total: usize,
    /// `phase / total` as a rounded percentage.
    pub percent: usize,
}

impl Progress {
    /// Computes progress for a 0-based `index` into `total` modules.
    #[must_use]
    pub const fn at(index: usize, total: usize) -> Self {
        let phase = index + 1;
        let percent = if total == 0 {
            0
        } else {
            (phase * 100 + total / 2) / total
        };
        Self {
            phase,
            total,
            percent,
        }
    }
}

/// Navigation and quiz state over one learning path.
#[derive(Debug, Clone)]
pub struct Navigator {
    path: LearningPath,
    active_index: usize,
    answer: AnswerState,
}

impl Navigator {
    /// Installs `path` with the first module active and no answer.
    ///
    /// # Errors
    ///
    /// Returns `ViewerError::EmptyPath` if the path has no modules.
    pub fn new(path: LearningPath) -> Result<Self> {
        if path.is_empty() {
            return Err(ViewerError::empty_path(path.topic));
        }
        Ok(Self {
            path,
            active_index: 0,
            answer: AnswerState::new(),
        })
    }

    /// The installed path.
    #[must_use]
    pub const fn path(&self) -> &LearningPath {
        &self.path
    }

    /// 0-based index of the active module.
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active_index
    }

    /// Index of the final module.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.path.len() - 1
    }

    /// Returns `true` if the final module is active.
    #[must_use]
    pub fn is_at_last(&self) -> bool {
        self.active_index == self.last_index()
    }

    /// Returns `true` if [`advance`](Self::advance) would move forward.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        !self.is_at_last()
    }

    /// The active module.
    #[must_use]
    pub fn active_module(&self) -> &Module {
        // active_index < len is upheld by every mutation
        &self.path.modules[self.active_index]
    }

    /// Answer state for the active module.
    #[must_use]
    pub const fn answer(&self) -> &AnswerState {
        &self.answer
    }

    /// Makes module `index` active and clears the answer state.
    ///
    /// Jumping to the already active module still clears the answer. An
    /// out-of-range index is ignored.
    pub fn jump_to(&mut self, index: usize) -> Option<ModuleChange> {
        if index >= self.path.len() {
            debug!(index, len = self.path.len(), "Ignoring jump outside the path");
            return None;
        }
        Some(self.move_to(index))
    }

    /// Moves to the next module, unless the last one is already active.
    pub fn advance(&mut self) -> Option<ModuleChange> {
        if !self.can_advance() {
            debug!(index = self.active_index, "Ignoring advance past the last module");
            return None;
        }
        Some(self.move_to(self.active_index + 1))
    }

    fn move_to(&mut self, index: usize) -> ModuleChange {
        let change = ModuleChange {
            from: self.active_index,
            to: index,
        };
        self.active_index = index;
        self.answer.reset();
        debug!(from = change.from, to = change.to, "Active module changed");
        change
    }

    /// Answers the active module's question with option `index`.
    pub fn select_option(&mut self, index: usize) -> SelectOutcome {
        let question = self.path.modules[self.active_index].question();
        let outcome = self.answer.select(question, index);
        debug!(module = self.active_index, option = index, ?outcome, "Option selected");
        outcome
    }

    /// Display state of each option of the active module's question.
    ///
    /// Empty when the module has no usable question.
    #[must_use]
    pub fn option_displays(&self) -> Vec<OptionDisplay> {
        self.active_module()
            .question()
            .map_or_else(Vec::new, |q| self.answer.option_displays(q))
    }

    /// Quiz status of the active module.
    #[must_use]
    pub fn quiz_status(&self) -> QuizStatus {
        self.answer.status(self.active_module().question())
    }

    /// Returns `true` once the last module's question is answered correctly.
    #[must_use]
    pub fn is_mastered(&self) -> bool {
        self.is_at_last() && self.answer.is_correct()
    }

    /// Position of the active module.
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress::at(self.active_index, self.path.len())
    }
}
