//! LearnLens Viewer
//!
//! Client-side state for browsing a generated learning path: the request
//! lifecycle, module navigation, and the per-module quiz. All state changes go
//! through [`Session::dispatch`]; [`Viewer`] adds the async fetch.

pub mod config;
pub mod embed;
pub mod error;
pub mod navigator;
pub mod path;
pub mod quiz;
pub mod request;
pub mod session;
pub mod source;
pub mod view;
pub mod viewer;

pub use config::{Config, CONFIG_FILE_NAME};
pub use embed::EmbedConfig;
pub use error::{Result, TransportCause, ViewerError, LINK_INTERRUPTED_MESSAGE};
pub use navigator::{ModuleChange, Navigator, Progress};
pub use path::{GenerateRequest, LearningPath, Module, ParseLevelError, ProficiencyLevel, Question};
pub use quiz::{
    AnswerState, OptionDisplay, QuizStatus, SelectOutcome, CORRECT_FEEDBACK, INCORRECT_FEEDBACK,
    NO_QUIZ_MESSAGE,
};
pub use request::{RequestState, RequestStatus, Ticket};
pub use session::{Event, Session, Transition};
pub use source::{FilePathSource, HttpPathSource, PathSource};
pub use view::{
    LoadingView, ModuleView, OptionView, OutlineEntry, QuizView, SessionView, TopicEntryView,
};
pub use viewer::Viewer;
