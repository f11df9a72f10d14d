//! Async driver tying a [`Session`] to a [`PathSource`].

use tracing::{info, instrument};

use crate::config::Config;
use crate::error::Result;
use crate::path::ProficiencyLevel;
use crate::session::{Event, Session, Transition};
use crate::source::{HttpPathSource, PathSource};
use crate::view::SessionView;

/// A session plus the source that feeds it.
pub struct Viewer {
    session: Session,
    source: Box<dyn PathSource>,
    config: Config,
}

impl std::fmt::Debug for Viewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewer")
            .field("session", &self.session)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Viewer {
    /// Creates a viewer that fetches from `source`.
    #[must_use]
    pub fn new(config: Config, source: Box<dyn PathSource>) -> Self {
        Self {
            session: Session::new(),
            source,
            config,
        }
    }

    /// Creates a viewer that talks to the backend named in `config`.
    #[must_use]
    pub fn with_http(config: Config) -> Self {
        let source = HttpPathSource::from_config(&config);
        Self::new(config, Box::new(source))
    }

    /// The underlying session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The viewer settings.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Applies `event` to the session.
    ///
    /// A [`Transition::Fetch`] is returned as is; use [`generate`](Self::generate)
    /// to submit and wait for the result in one call.
    ///
    /// # Errors
    ///
    /// See [`Session::dispatch`].
    pub fn dispatch(&mut self, event: Event) -> Result<Transition> {
        self.session.dispatch(event)
    }

    /// Submits `topic` and waits for the learning path.
    ///
    /// Returns [`Transition::PathInstalled`] or [`Transition::RequestFailed`];
    /// the failure message is then available from the session.
    ///
    /// # Errors
    ///
    /// Returns `ViewerError::EmptyTopic` or `ViewerError::RequestInFlight` if
    /// the submission itself is rejected.
    #[instrument(skip(self))]
    pub async fn generate(&mut self, topic: &str, level: ProficiencyLevel) -> Result<Transition> {
        let transition = self.submit(topic, level)?;
        Ok(self.resolve(transition).await)
    }

    /// Submits `topic` without fetching; the session is `Pending` afterwards.
    ///
    /// Pass the returned transition to [`resolve`](Self::resolve).
    ///
    /// # Errors
    ///
    /// Same as [`generate`](Self::generate).
    pub fn submit(&mut self, topic: &str, level: ProficiencyLevel) -> Result<Transition> {
        self.session.dispatch(Event::Submit {
            topic: topic.to_string(),
            level,
        })
    }

    /// Performs a [`Transition::Fetch`] and applies its completion.
    ///
    /// Any other transition is returned unchanged.
    pub async fn resolve(&mut self, transition: Transition) -> Transition {
        let Transition::Fetch { ticket, request } = transition else {
            return transition;
        };

        let outcome = self.source.fetch(&request).await;
        let transition = self.infallible(Event::Completed { ticket, outcome });

        let state = self.session.request();
        if state.status().is_settled() {
            if let Some(elapsed) = state.elapsed() {
                info!(
                    %ticket,
                    status = %state.status(),
                    elapsed_ms = elapsed.num_milliseconds(),
                    "Learning path request settled"
                );
            }
        }
        transition
    }

    /// Selects module `index`.
    pub fn jump_to(&mut self, index: usize) -> Transition {
        self.infallible(Event::JumpTo(index))
    }

    /// Moves to the next module.
    pub fn advance(&mut self) -> Transition {
        self.infallible(Event::Advance)
    }

    /// Answers the active module's question.
    pub fn select_option(&mut self, index: usize) -> Transition {
        self.infallible(Event::SelectOption(index))
    }

    /// Returns to topic entry.
    pub fn restart(&mut self) -> Transition {
        self.infallible(Event::Restart)
    }

    fn infallible(&mut self, event: Event) -> Transition {
        // only Submit can be rejected
        self.session.dispatch(event).unwrap_or(Transition::Ignored)
    }

    /// Projects the current screen.
    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView::project(&self.session, &self.config)
    }
}
