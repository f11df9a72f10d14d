//! JSON rendering of viewer state.
//!
//! [`JsonRenderer`] serializes a [`SessionView`] either compactly, for piping
//! into other tools, or pretty-printed, for exports meant to be read.
//!
//! # Example
//!
//! ```rust
//! use learnlens_render::json::JsonRenderer;
//! use learnlens_viewer::{Config, Session, SessionView};
//!
//! let view = SessionView::project(&Session::new(), &Config::default());
//! let json = JsonRenderer::new(&view).generate().unwrap();
//! assert!(json.contains(r#""screen":"topic_entry""#));
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;

use learnlens_viewer::SessionView;

use crate::{RenderError, Result};

/// JSON renderer for a [`SessionView`].
pub struct JsonRenderer<'a> {
    view: &'a SessionView,
}

impl<'a> JsonRenderer<'a> {
    /// Creates a renderer for `view`.
    #[must_use]
    pub const fn new(view: &'a SessionView) -> Self {
        Self { view }
    }

    /// Single-line JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Serialization`] if serialization fails.
    pub fn generate(&self) -> Result<String> {
        serde_json::to_string(self.view).map_err(RenderError::from)
    }

    /// Indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Serialization`] if serialization fails.
    pub fn generate_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self.view).map_err(RenderError::from)
    }

    /// Writes the view to `path`, creating or truncating it.
    ///
    /// Parent directories must exist.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Serialization`] if serialization fails and
    /// [`RenderError::Io`] if the file cannot be written.
    pub fn write_to_file(&self, path: &Path, pretty: bool) -> Result<()> {
        let json = if pretty {
            self.generate_pretty()?
        } else {
            self.generate()?
        };

        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;

        Ok(())
    }
}
