//! The viewer session state machine.
//!
//! All user actions and request completions go through one reducer,
//! [`Session::dispatch`]. The session owns the request lifecycle and, once a
//! path is installed, the [`Navigator`]. Nothing here performs I/O: a
//! submission returns [`Transition::Fetch`] and the caller feeds the result
//! back in as [`Event::Completed`].

use tracing::{debug, info, warn};

use crate::error::{Result, ViewerError, LINK_INTERRUPTED_MESSAGE};
use crate::navigator::{ModuleChange, Navigator};
use crate::path::{GenerateRequest, LearningPath, ProficiencyLevel};
use crate::quiz::SelectOutcome;
use crate::request::{RequestState, RequestStatus, Ticket};

/// Something that happened to the session.
#[derive(Debug)]
pub enum Event {
    /// The learner submitted the topic form.
    Submit {
        /// Requested topic.
        topic: String,
        /// Requested proficiency tier.
        level: ProficiencyLevel,
    },
    /// A learning path request finished.
    Completed {
        /// Ticket of the request that finished.
        ticket: Ticket,
        /// The path, or why there is none.
        outcome: Result<LearningPath>,
    },
    /// The learner picked a module from the list.
    JumpTo(usize),
    /// The learner asked for the next module.
    Advance,
    /// The learner picked an answer option.
    SelectOption(usize),
    /// The learner discarded the path to start over.
    ///
    /// Ignored while a request is pending, like every other interaction.
    Restart,
}

/// What a dispatched event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The event had no effect.
    Ignored,
    /// A request was started; the caller must fetch it and report back.
    Fetch {
        /// Ticket to report the completion under.
        ticket: Ticket,
        /// What to fetch.
        request: GenerateRequest,
    },
    /// A new path was installed at the first module.
    PathInstalled,
    /// The request failed; the message is in the request state.
    RequestFailed,
    /// The active module was (re)selected and the quiz reset.
    ModuleChanged(ModuleChange),
    /// The active module's question was answered.
    Answered {
        /// Whether the answer was right.
        correct: bool,
    },
    /// The session went back to topic entry.
    Restarted,
}

/// Complete state of one viewing session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    request: RequestState,
    navigator: Option<Navigator>,
}

impl Session {
    /// Creates a session at topic entry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The request lifecycle.
    #[must_use]
    pub const fn request(&self) -> &RequestState {
        &self.request
    }

    /// Shorthand for the request status.
    #[must_use]
    pub const fn status(&self) -> RequestStatus {
        self.request.status()
    }

    /// The navigator, once a path is installed.
    #[must_use]
    pub const fn navigator(&self) -> Option<&Navigator> {
        self.navigator.as_ref()
    }

    /// Returns `true` once the last module is answered correctly.
    #[must_use]
    pub fn is_mastered(&self) -> bool {
        self.navigator.as_ref().is_some_and(Navigator::is_mastered)
    }

    /// Applies `event` and reports what changed.
    ///
    /// # Errors
    ///
    /// Only submissions can fail: `ViewerError::EmptyTopic` for a blank topic
    /// and `ViewerError::RequestInFlight` while a request is pending. In both
    /// cases the session is unchanged.
    pub fn dispatch(&mut self, event: Event) -> Result<Transition> {
        match event {
            Event::Submit { topic, level } => self.submit(&topic, level),
            Event::Completed { ticket, outcome } => Ok(self.complete(ticket, outcome)),
            Event::JumpTo(index) => Ok(self.navigate(|nav| nav.jump_to(index))),
            Event::Advance => Ok(self.navigate(Navigator::advance)),
            Event::SelectOption(index) => Ok(self.select(index)),
            Event::Restart => Ok(self.restart()),
        }
    }

    fn submit(&mut self, topic: &str, level: ProficiencyLevel) -> Result<Transition> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ViewerError::EmptyTopic);
        }

        let request = GenerateRequest::new(topic, level);
        let ticket = self.request.begin(request.clone())?;
        // Prior results disappear as soon as a new request starts.
        self.navigator = None;
        Ok(Transition::Fetch { ticket, request })
    }

    fn complete(&mut self, ticket: Ticket, outcome: Result<LearningPath>) -> Transition {
        if !self.request.accepts(ticket) {
            warn!(%ticket, status = %self.request.status(), "Ignoring completion for a stale request");
            return Transition::Ignored;
        }

        let installed = outcome.and_then(|path| {
            for index in path.malformed_questions() {
                warn!(module = index, "Module question is malformed; treating it as no quiz");
            }
            Navigator::new(path)
        });

        match installed {
            Ok(navigator) => {
                info!(
                    topic = %navigator.path().topic,
                    modules = navigator.path().len(),
                    "Learning path installed"
                );
                self.navigator = Some(navigator);
                self.request.resolve(ticket);
                Transition::PathInstalled
            }
            Err(err) => {
                if let ViewerError::LinkInterrupted { cause } = &err {
                    warn!(%ticket, %cause, "Learning path link interrupted");
                }
                let message = if err.is_request_failure() {
                    err.to_string()
                } else {
                    warn!(%ticket, error = %err, "Path source failed outside the request");
                    LINK_INTERRUPTED_MESSAGE.to_string()
                };
                self.request.fail(ticket, message);
                Transition::RequestFailed
            }
        }
    }

    fn navigate(&mut self, step: impl FnOnce(&mut Navigator) -> Option<ModuleChange>) -> Transition {
        let Some(navigator) = self.interactive_navigator() else {
            return Transition::Ignored;
        };
        step(navigator).map_or(Transition::Ignored, Transition::ModuleChanged)
    }

    fn select(&mut self, index: usize) -> Transition {
        let Some(navigator) = self.interactive_navigator() else {
            return Transition::Ignored;
        };
        match navigator.select_option(index) {
            SelectOutcome::Evaluated { correct } => Transition::Answered { correct },
            SelectOutcome::AlreadyAnswered
            | SelectOutcome::NoQuiz
            | SelectOutcome::UnknownOption => Transition::Ignored,
        }
    }

    fn interactive_navigator(&mut self) -> Option<&mut Navigator> {
        if self.request.is_pending() {
            debug!("Ignoring interaction while a request is pending");
            return None;
        }
        self.navigator.as_mut()
    }

    fn restart(&mut self) -> Transition {
        if self.request.is_pending() {
            debug!("Ignoring restart while a request is pending");
            return Transition::Ignored;
        }
        info!(status = %self.request.status(), "Restarting session");
        self.request.reset();
        self.navigator = None;
        Transition::Restarted
    }
}
