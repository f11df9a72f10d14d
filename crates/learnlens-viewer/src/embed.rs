//! Video embed URL construction.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://www.youtube.com/embed".to_string()
}

const fn default_true() -> bool {
    true
}

/// Parameters of the third-party video embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedConfig {
    /// Embed endpoint; the module id is appended as a path segment.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Start playback as soon as the module opens.
    #[serde(default = "default_true")]
    pub autoplay: bool,

    /// Ask the player for minimal branding.
    #[serde(default = "default_true")]
    pub modest_branding: bool,

    /// Let the player suggest related videos at the end.
    #[serde(default)]
    pub show_related: bool,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            autoplay: default_true(),
            modest_branding: default_true(),
            show_related: false,
        }
    }
}

impl EmbedConfig {
    /// Builds the embed URL for `video_id`.
    ///
    /// The id is inserted verbatim; a bad id yields a broken embed, not an error.
    #[must_use]
    pub fn url_for(&self, video_id: &str) -> String {
        format!(
            "{}/{video_id}?autoplay={}&rel={}&modestbranding={}",
            self.base_url.trim_end_matches('/'),
            u8::from(self.autoplay),
            u8::from(self.show_related),
            u8::from(self.modest_branding),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url() {
        let embed = EmbedConfig::default();
        assert_eq!(
            embed.url_for("dQw4w9WgXcQ"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&rel=0&modestbranding=1"
        );
    }

    #[test]
    fn test_flags_and_trailing_slash() {
        let embed = EmbedConfig {
            base_url: "https://player.example/embed/".to_string(),
            autoplay: false,
            modest_branding: false,
            show_related: true,
        };
        assert_eq!(
            embed.url_for("abc"),
            "https://player.example/embed/abc?autoplay=0&rel=1&modestbranding=0"
        );
    }

    #[test]
    fn test_id_is_verbatim() {
        let url = EmbedConfig::default().url_for("not a real id");
        assert!(url.contains("/embed/not a real id?"));
    }

    #[test]
    fn test_deserialization_with_defaults() {
        let embed: EmbedConfig = serde_json::from_str(r#"{"autoplay": false}"#).unwrap();
        assert!(!embed.autoplay);
        assert!(embed.modest_branding);
        assert_eq!(embed.base_url, "https://www.youtube.com/embed");
    }
}
