//! LearnLens Render
//!
//! Turns a [`SessionView`] into something a person or a program can read:
//!
//! - [`MarkdownRenderer`] produces the screen shown in the terminal
//! - [`json::JsonRenderer`] produces the same snapshot as JSON
//!
//! # Example
//!
//! ```rust
//! use learnlens_render::MarkdownRenderer;
//! use learnlens_viewer::{Config, Session, SessionView};
//!
//! let view = SessionView::project(&Session::new(), &Config::default());
//! let markdown = MarkdownRenderer::new(&view).generate();
//! assert!(markdown.contains("# LearnLens"));
//! ```

pub mod json;
mod markdown;

pub use markdown::{option_label, MarkdownRenderer};

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Failed to serialize the view to JSON.
    #[error("failed to serialize view: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failed to write rendered output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
