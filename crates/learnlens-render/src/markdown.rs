//! Markdown rendering of viewer state.
//!
//! [`MarkdownRenderer`] draws one screen per [`SessionView`] variant. The
//! module screen contains, in order:
//!
//! - Title and progress line
//! - Module outline with the active phase marked
//! - Module details, video link and study material
//! - Quiz with per-option feedback markers
//! - Completion banner, once mastered

use std::fmt::Write;

use learnlens_viewer::{
    LoadingView, ModuleView, OptionDisplay, QuizView, SessionView, TopicEntryView,
};

/// Renders a [`SessionView`] as Markdown.
pub struct MarkdownRenderer<'a> {
    view: &'a SessionView,
}

impl<'a> MarkdownRenderer<'a> {
    /// Creates a renderer for `view`.
    #[must_use]
    pub const fn new(view: &'a SessionView) -> Self {
        Self { view }
    }

    /// Renders the whole screen.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();

        match self.view {
            SessionView::TopicEntry(entry) => Self::write_topic_entry(&mut output, entry),
            SessionView::Loading(loading) => Self::write_loading(&mut output, loading),
            SessionView::Module(module) => {
                Self::write_header(&mut output, module);
                Self::write_outline(&mut output, module);
                Self::write_module(&mut output, module);
                Self::write_quiz(&mut output, &module.quiz);
                Self::write_completion(&mut output, module);
            }
        }

        output
    }

    fn write_topic_entry(output: &mut String, entry: &TopicEntryView) {
        let _ = writeln!(output, "# LearnLens\n");
        let _ = writeln!(output, "Enter a topic to generate a learning path.\n");
        let _ = writeln!(output, "**Level**: {}", entry.default_level);
        if let Some(topic) = &entry.last_topic {
            let _ = writeln!(output, "**Last topic**: {}", escape_markdown(topic));
        }
        if let Some(error) = &entry.error {
            let _ = writeln!(output, "\n> **Error**: {}", escape_markdown(error));
        }
    }

    fn write_loading(output: &mut String, loading: &LoadingView) {
        let _ = writeln!(output, "# LearnLens\n");
        let _ = writeln!(
            output,
            "Generating a **{}** learning path for *{}*...",
            loading.level,
            escape_markdown(&loading.topic)
        );
    }

    fn write_header(output: &mut String, module: &ModuleView) {
        let progress = module.progress;
        let _ = writeln!(output, "# {}\n", escape_markdown(&module.topic));
        let _ = writeln!(
            output,
            "**Phase {:02} of {:02}** | {}% complete\n",
            progress.phase, progress.total, progress.percent
        );
    }

    fn write_outline(output: &mut String, module: &ModuleView) {
        let _ = writeln!(output, "## Outline\n");
        for entry in &module.outline {
            let step = escape_markdown(&entry.step_name);
            if entry.active {
                let _ = writeln!(output, "- **{}: {step}** (current)", entry.label);
            } else {
                let _ = writeln!(output, "- {}: {step}", entry.label);
            }
        }
        let _ = writeln!(output);
    }

    fn write_module(output: &mut String, module: &ModuleView) {
        let _ = writeln!(output, "## {}\n", escape_markdown(&module.title));

        let _ = writeln!(output, "| Field | Value |");
        let _ = writeln!(output, "|-------|-------|");
        let _ = writeln!(output, "| Step | {} |", escape_markdown(&module.step_name));
        if !module.channel.is_empty() {
            let _ = writeln!(output, "| Channel | {} |", escape_markdown(&module.channel));
        }
        let _ = writeln!(output, "| Quality | {:.1} |", module.quality_score);
        if !module.goal.is_empty() {
            let _ = writeln!(output, "| Goal | {} |", escape_markdown(&module.goal));
        }
        let _ = writeln!(output);

        let _ = writeln!(output, "**Watch**: <{}>\n", module.embed_url);

        if !module.summary.is_empty() {
            let _ = writeln!(output, "{}\n", escape_markdown(&module.summary));
        }

        if !module.mental_model.is_empty() {
            let _ = writeln!(output, "### Mental Model\n");
            let _ = writeln!(output, "> {}\n", escape_markdown(&module.mental_model));
        }

        if !module.checklist.is_empty() {
            let _ = writeln!(output, "### Checklist\n");
            for item in &module.checklist {
                let _ = writeln!(output, "- [ ] {}", escape_markdown(item));
            }
            let _ = writeln!(output);
        }
    }

    fn write_quiz(output: &mut String, quiz: &QuizView) {
        let _ = writeln!(output, "### Quiz\n");

        let Some(prompt) = &quiz.prompt else {
            if let Some(message) = quiz.message {
                let _ = writeln!(output, "*{message}*\n");
            }
            return;
        };

        let _ = writeln!(output, "**{}**\n", escape_markdown(prompt));
        for option in &quiz.options {
            let text = escape_markdown(&option.text);
            let label = option_label(option.index);
            match option.display {
                OptionDisplay::Neutral => {
                    let _ = writeln!(output, "- {} {label}. {text}", option.marker);
                }
                OptionDisplay::SelectedCorrect
                | OptionDisplay::SelectedIncorrect
                | OptionDisplay::RevealedCorrect => {
                    let _ = writeln!(output, "- {} **{label}. {text}**", option.marker);
                }
            }
        }
        let _ = writeln!(output);

        if let Some(message) = quiz.message {
            let _ = writeln!(output, "*{message}*\n");
        }
    }

    fn write_completion(output: &mut String, module: &ModuleView) {
        if !module.mastered {
            return;
        }
        let _ = writeln!(output, "---\n");
        let _ = writeln!(output, "## Domain mastered\n");
        let _ = writeln!(
            output,
            "Final phase of *{}* verified.",
            escape_markdown(&module.topic)
        );
    }
}

/// Letter shown beside answer option `index`: `A`, `B`, ... then numbers.
#[must_use]
pub fn option_label(index: usize) -> String {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map_or_else(|| (index + 1).to_string(), |i| char::from(b'A' + i).to_string())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Escapes Markdown special characters in backend-supplied text.
///
/// Newlines become `<br>` so multi-line text stays inside table cells.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for ch in text.chars() {
        match ch {
            '*' | '_' | '`' | '#' | '[' | ']' | '(' | ')' | '!' | '\\' | '<' | '>' | '|' => {
                result.push('\\');
                result.push(ch);
            }
            '\n' => result.push_str("<br>"),
            _ => result.push(ch),
        }
    }

    result
}

// ============================================================================
// Tests
// ============================================================================
