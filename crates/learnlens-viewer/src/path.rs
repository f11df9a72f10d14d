//! Learning path data model.
//!
//! These types mirror the generation backend's wire contract. A
//! [`LearningPath`] arrives whole from one successful request and is never
//! mutated afterwards; a new generation replaces it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// ProficiencyLevel
// ============================================================================

/// Proficiency tier passed opaquely to the path generator.
///
/// On the wire the tiers are `"Low"`, `"Medium"` and `"High"`. Learners see
/// them as Beginner, Intermediate and Expert. Parsing accepts either spelling,
/// case-insensitively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProficiencyLevel {
    /// Beginner (default).
    #[default]
    Low,
    /// Intermediate.
    Medium,
    /// Expert.
    High,
}

impl ProficiencyLevel {
    /// Parses a string into a `ProficiencyLevel`, case-insensitively.
    fn from_str_case_insensitive(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" | "beginner" => Some(Self::Low),
            "medium" | "intermediate" => Some(Self::Medium),
            "high" | "expert" => Some(Self::High),
            _ => None,
        }
    }

    /// The internal encoding sent to the backend.
    #[must_use]
    pub const fn wire_name(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// The learner-facing label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Low => "Beginner",
            Self::Medium => "Intermediate",
            Self::High => "Expert",
        }
    }
}

impl std::fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string names no proficiency level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid proficiency level '{0}': expected one of 'low', 'medium', 'high' (or 'beginner', 'intermediate', 'expert')")]
pub struct ParseLevelError(pub String);

impl FromStr for ProficiencyLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_case_insensitive(s).ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for ProficiencyLevel {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for ProficiencyLevel {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.wire_name())
    }
}

// ============================================================================
// Question
// ============================================================================

/// A single multiple-choice comprehension check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// The question text.
    #[serde(rename = "question")]
    pub prompt: String,

    /// Answer options in display order.
    pub options: Vec<String>,

    /// Index into `options` of the correct answer.
    pub correct_index: usize,
}

impl Question {
    /// Returns `true` if the question can be evaluated safely.
    ///
    /// A well-formed question has at least two options and a `correct_index`
    /// that names one of them.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.options.len() >= 2 && self.correct_index < self.options.len()
    }

    /// Returns `true` if `index` names one of the options.
    #[must_use]
    pub fn has_option(&self, index: usize) -> bool {
        index < self.options.len()
    }
}

// ============================================================================
// Module
// ============================================================================

/// One curriculum unit: a video plus its study material and quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Opaque video identifier, passed verbatim to the embed URL.
    pub id: String,

    /// Video title.
    pub title: String,

    /// Short summary of the video.
    #[serde(default)]
    pub summary: String,

    /// Publishing channel.
    #[serde(default)]
    pub channel: String,

    /// Name of the curriculum step this module covers.
    pub step_name: String,

    /// Learning outcome for the step.
    #[serde(default)]
    pub goal: String,

    /// Quality rating assigned by the generator.
    #[serde(rename = "lqs", default)]
    pub quality_score: f64,

    /// Things to have in place before watching.
    #[serde(default)]
    pub checklist: Vec<String>,

    /// An analogy that frames the topic.
    #[serde(default)]
    pub mental_model: String,

    /// Comprehension questions. Only the first one is used.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Module {
    /// Returns the module's quiz question, if it has a usable one.
    ///
    /// Only the first question counts. A malformed first question is treated
    /// the same as no question at all.
    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        self.questions.first().filter(|q| q.is_well_formed())
    }
}

// ============================================================================
// LearningPath
// ============================================================================

/// The ordered set of modules generated for one topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPath {
    /// The topic the path was generated for.
    pub topic: String,

    /// Modules in curriculum order.
    #[serde(rename = "path")]
    pub modules: Vec<Module>,
}

impl LearningPath {
    /// Parses a learning path from the backend's JSON response shape.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Number of modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` if the path has no modules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Returns the module at `index`, if any.
    #[must_use]
    pub fn module(&self, index: usize) -> Option<&Module> {
        self.modules.get(index)
    }

    /// Indices of modules whose first question is present but unusable.
    pub fn malformed_questions(&self) -> impl Iterator<Item = usize> + '_ {
        self.modules
            .iter()
            .enumerate()
            .filter(|(_, m)| m.questions.first().is_some_and(|q| !q.is_well_formed()))
            .map(|(i, _)| i)
    }
}

// ============================================================================
// GenerateRequest
// ============================================================================

/// Body of `POST /api/create-path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Subject to build a path for.
    pub topic: String,

    /// Requested proficiency tier.
    pub level: ProficiencyLevel,
}

impl GenerateRequest {
    /// Creates a request for the given topic and level.
    #[must_use]
    pub fn new(topic: impl Into<String>, level: ProficiencyLevel) -> Self {
        Self {
            topic: topic.into(),
            level,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
