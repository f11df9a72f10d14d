//! Render-ready snapshots of a [`Session`].
//!
//! A [`SessionView`] is computed from the session on demand and never stored.
//! Renderers (terminal, Markdown, JSON) only ever see these types.

use serde::Serialize;

use crate::config::Config;
use crate::navigator::{Navigator, Progress};
use crate::path::ProficiencyLevel;
use crate::quiz::{OptionDisplay, QuizStatus, NO_QUIZ_MESSAGE};
use crate::request::RequestStatus;
use crate::session::Session;

/// Which screen the learner is on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum SessionView {
    /// The topic form, optionally with the last failure.
    TopicEntry(TopicEntryView),
    /// Waiting for a learning path.
    Loading(LoadingView),
    /// A learning path is installed.
    Module(ModuleView),
}

impl SessionView {
    /// Projects `session` using the viewer settings in `config`.
    #[must_use]
    pub fn project(session: &Session, config: &Config) -> Self {
        let request = session.request();
        match (request.status(), session.navigator()) {
            (RequestStatus::Pending, _) => {
                let (topic, level) = request.request().map_or_else(
                    || (String::new(), config.default_level),
                    |r| (r.topic.clone(), r.level),
                );
                Self::Loading(LoadingView { topic, level })
            }
            (RequestStatus::Resolved, Some(navigator)) => {
                Self::Module(ModuleView::project(navigator, config))
            }
            _ => Self::TopicEntry(TopicEntryView {
                default_level: request.request().map_or(config.default_level, |r| r.level),
                last_topic: request.request().map(|r| r.topic.clone()),
                error: request.error_message().map(str::to_string),
            }),
        }
    }

    /// Returns the module view, if a path is installed.
    #[must_use]
    pub const fn as_module(&self) -> Option<&ModuleView> {
        match self {
            Self::Module(view) => Some(view),
            Self::TopicEntry(_) | Self::Loading(_) => None,
        }
    }
}

/// The topic form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicEntryView {
    /// Level preselected on the form.
    pub default_level: ProficiencyLevel,
    /// Topic of the last submission, for prefilling after a failure.
    pub last_topic: Option<String>,
    /// Failure message of the last request.
    pub error: Option<String>,
}

/// The loading screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadingView {
    /// Topic being generated.
    pub topic: String,
    /// Level being generated.
    pub level: ProficiencyLevel,
}

/// One row of the module list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    /// 0-based module index.
    pub index: usize,
    /// Phase label, e.g. `Phase 01`.
    pub label: String,
    /// Curriculum step name.
    pub step_name: String,
    /// Whether this is the active module.
    pub active: bool,
}

impl OutlineEntry {
    /// Phase label for a 0-based module index.
    #[must_use]
    pub fn phase_label(index: usize) -> String {
        format!("Phase {:02}", index + 1)
    }
}

/// One answer option with its feedback state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    /// 0-based option index.
    pub index: usize,
    /// Option text.
    pub text: String,
    /// Feedback state.
    pub display: OptionDisplay,
    /// Marker drawn beside the option.
    pub marker: &'static str,
}

/// The active module's quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizView {
    /// Overall status.
    pub status: QuizStatus,
    /// Question text; absent when unavailable.
    pub prompt: Option<String>,
    /// Options with feedback; empty when unavailable.
    pub options: Vec<OptionView>,
    /// Feedback or placeholder line.
    pub message: Option<&'static str>,
}

/// The module screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleView {
    /// Topic of the path.
    pub topic: String,
    /// Module list.
    pub outline: Vec<OutlineEntry>,
    /// Position in the path.
    pub progress: Progress,
    /// Video identifier.
    pub id: String,
    /// Video title.
    pub title: String,
    /// Publishing channel.
    pub channel: String,
    /// Video summary.
    pub summary: String,
    /// Curriculum step name.
    pub step_name: String,
    /// Learning outcome.
    pub goal: String,
    /// Generator quality rating.
    pub quality_score: f64,
    /// Prerequisites.
    pub checklist: Vec<String>,
    /// Framing analogy.
    pub mental_model: String,
    /// Player URL for the video.
    pub embed_url: String,
    /// Quiz for this module.
    pub quiz: QuizView,
    /// Whether a "next module" action is offered.
    pub can_advance: bool,
    /// Whether the completion banner is shown.
    pub mastered: bool,
}

impl ModuleView {
    fn project(navigator: &Navigator, config: &Config) -> Self {
        let path = navigator.path();
        let module = navigator.active_module();
        let active = navigator.active_index();

        let outline = path
            .modules
            .iter()
            .enumerate()
            .map(|(index, m)| OutlineEntry {
                index,
                label: OutlineEntry::phase_label(index),
                step_name: m.step_name.clone(),
                active: index == active,
            })
            .collect();

        let status = navigator.quiz_status();
        let quiz = module.question().map_or(
            QuizView {
                status,
                prompt: None,
                options: Vec::new(),
                message: Some(NO_QUIZ_MESSAGE),
            },
            |question| QuizView {
                status,
                prompt: Some(question.prompt.clone()),
                options: question
                    .options
                    .iter()
                    .zip(navigator.option_displays())
                    .enumerate()
                    .map(|(index, (text, display))| {
                        OptionView {
                            index,
                            text: text.clone(),
                            display,
                            marker: display.marker(),
                        }
                    })
                    .collect(),
                message: status.feedback(),
            },
        );

        Self {
            topic: path.topic.clone(),
            outline,
            progress: navigator.progress(),
            id: module.id.clone(),
            title: module.title.clone(),
            channel: module.channel.clone(),
            summary: module.summary.clone(),
            step_name: module.step_name.clone(),
            goal: module.goal.clone(),
            quality_score: module.quality_score,
            checklist: module.checklist.clone(),
            mental_model: module.mental_model.clone(),
            embed_url: config.embed.url_for(&module.id),
            quiz,
            can_advance: navigator.can_advance(),
            mastered: navigator.is_mastered(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{TransportCause, ViewerError};
    use crate::path::tests::three_module_path;
    use crate::quiz::{CORRECT_FEEDBACK, INCORRECT_FEEDBACK};
    use crate::session::{Event, Transition};

    fn submit(session: &mut Session) -> crate::request::Ticket {
        match session
            .dispatch(Event::Submit {
                topic: "Docker".to_string(),
                level: ProficiencyLevel::High,
            })
            .unwrap()
        {
            Transition::Fetch { ticket, .. } => ticket,
            other => unreachable!("expected fetch, got {other:?}"),
        }
    }

    fn loaded() -> Session {
        let mut session = Session::new();
        let ticket = submit(&mut session);
        session
            .dispatch(Event::Completed {
                ticket,
                outcome: Ok(three_module_path()),
            })
            .unwrap();
        session
    }

    fn module_view(session: &Session) -> ModuleView {
        SessionView::project(session, &Config::default())
            .as_module()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_idle_projects_topic_entry() {
        let view = SessionView::project(&Session::new(), &Config::default());
        assert_eq!(
            view,
            SessionView::TopicEntry(TopicEntryView {
                default_level: ProficiencyLevel::Low,
                last_topic: None,
                error: None,
            })
        );
    }

    #[test]
    fn test_pending_projects_loading() {
        let mut session = Session::new();
        submit(&mut session);
        let view = SessionView::project(&session, &Config::default());
        assert_eq!(
            view,
            SessionView::Loading(LoadingView {
                topic: "Docker".to_string(),
                level: ProficiencyLevel::High,
            })
        );
    }

    #[test]
    fn test_failure_projects_topic_entry_with_error() {
        let mut session = Session::new();
        let ticket = submit(&mut session);
        session
            .dispatch(Event::Completed {
                ticket,
                outcome: Err(ViewerError::link_interrupted(TransportCause::Status(500))),
            })
            .unwrap();

        match SessionView::project(&session, &Config::default()) {
            SessionView::TopicEntry(entry) => {
                assert_eq!(entry.last_topic.as_deref(), Some("Docker"));
                assert_eq!(entry.default_level, ProficiencyLevel::High);
                assert!(!entry.error.unwrap().is_empty());
            }
            other => unreachable!("expected topic entry, got {other:?}"),
        }
    }

    #[test]
    fn test_module_view_first_module() {
        let view = module_view(&loaded());

        assert_eq!(view.topic, "Docker");
        assert_eq!(view.id, "vid0");
        assert_eq!(view.progress.phase, 1);
        assert!(view.can_advance);
        assert!(!view.mastered);
        assert_eq!(
            view.embed_url,
            "https://www.youtube.com/embed/vid0?autoplay=1&rel=0&modestbranding=1"
        );
        assert_eq!(view.quiz.status, QuizStatus::Unavailable);
        assert_eq!(view.quiz.message, Some(NO_QUIZ_MESSAGE));
        assert!(view.quiz.options.is_empty());
    }

    #[test]
    fn test_outline_labels_and_active_flag() {
        let mut session = loaded();
        session.dispatch(Event::JumpTo(1)).unwrap();
        let view = module_view(&session);

        let labels: Vec<_> = view.outline.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["Phase 01", "Phase 02", "Phase 03"]);
        let active: Vec<_> = view.outline.iter().map(|e| e.active).collect();
        assert_eq!(active, [false, true, false]);
    }

    #[test]
    fn test_wrong_answer_reveals_correct_option() {
        let mut session = loaded();
        session.dispatch(Event::JumpTo(2)).unwrap();
        session.dispatch(Event::SelectOption(0)).unwrap();
        let view = module_view(&session);

        let displays: Vec<_> = view.quiz.options.iter().map(|o| o.display).collect();
        assert_eq!(
            displays,
            [
                OptionDisplay::SelectedIncorrect,
                OptionDisplay::RevealedCorrect,
                OptionDisplay::Neutral
            ]
        );
        assert_eq!(view.quiz.message, Some(INCORRECT_FEEDBACK));
        assert!(!view.mastered);
        assert!(!view.can_advance);
    }

    #[test]
    fn test_correct_answer_on_last_module_is_mastered() {
        let mut session = loaded();
        session.dispatch(Event::JumpTo(2)).unwrap();
        session.dispatch(Event::SelectOption(1)).unwrap();
        let view = module_view(&session);

        assert_eq!(view.quiz.options[1].marker, "✓");
        assert_eq!(view.quiz.message, Some(CORRECT_FEEDBACK));
        assert!(view.mastered);
    }

    #[test]
    fn test_serialized_view_is_tagged() {
        let json = serde_json::to_value(SessionView::project(&loaded(), &Config::default())).unwrap();
        assert_eq!(json["screen"], "module");
        assert_eq!(json["progress"]["percent"], 33);
        assert_eq!(json["quiz"]["status"]["state"], "unavailable");
    }
}
