//! Integration tests for the offline path source and on-disk configuration.
//!
//! These run the same lifecycle as the HTTP tests but read the learning path
//! from the fixture file, the way `learnlens --path-file` does.

use std::path::PathBuf;

use learnlens_render::json::JsonRenderer;
use learnlens_render::MarkdownRenderer;
use learnlens_viewer::{
    Config, FilePathSource, ProficiencyLevel, RequestStatus, SessionView, Transition, Viewer,
    LINK_INTERRUPTED_MESSAGE,
};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

fn offline_viewer(config: Config, file: &str) -> Viewer {
    Viewer::new(config, Box::new(FilePathSource::new(fixture_path(file))))
}

#[test]
fn test_fixture_config_loads() {
    let config = Config::load_from_file(&fixture_path("learnlens.json")).expect("config loads");

    assert_eq!(config.api_url, "http://127.0.0.1:8000");
    assert_eq!(config.default_level, ProficiencyLevel::Medium);
    assert!(!config.embed.autoplay);
    assert!(config.embed.modest_branding);
}

#[test]
fn test_config_dir_lookup() {
    let config = Config::load_from_dir(&fixture_path("")).expect("config loads");
    assert_eq!(config.default_level, ProficiencyLevel::Medium);
}

#[tokio::test]
async fn test_offline_path_uses_configured_embed() {
    let config = Config::load_from_file(&fixture_path("learnlens.json")).expect("config loads");
    let mut viewer = offline_viewer(config, "docker-path.json");

    let transition = viewer
        .generate("Docker", ProficiencyLevel::Medium)
        .await
        .expect("submission accepted");
    assert_eq!(transition, Transition::PathInstalled);

    let view = viewer.view();
    let module = view.as_module().expect("module screen");
    assert_eq!(module.title, "Docker Tutorial for Beginners");
    assert_eq!(
        module.embed_url,
        "https://www.youtube.com/embed/pTFZFxd4hOI?autoplay=0&rel=0&modestbranding=1"
    );
    assert_eq!(module.checklist.len(), 2);
    assert!((module.quality_score - 8.7).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_offline_missing_file_fails_request() {
    let mut viewer = offline_viewer(Config::default(), "does-not-exist.json");

    let transition = viewer
        .generate("Docker", ProficiencyLevel::Low)
        .await
        .expect("submission accepted");

    assert_eq!(transition, Transition::RequestFailed);
    assert_eq!(viewer.session().status(), RequestStatus::Failed);
    assert_eq!(
        viewer.session().request().error_message(),
        Some(LINK_INTERRUPTED_MESSAGE)
    );
}

#[tokio::test]
async fn test_rendered_screens_follow_the_session() {
    let mut viewer = offline_viewer(Config::default(), "docker-path.json");

    let view = viewer.view();
    assert!(MarkdownRenderer::new(&view).generate().contains("**Level**: Beginner"));

    viewer
        .generate("Docker", ProficiencyLevel::Low)
        .await
        .expect("submission accepted");
    viewer.jump_to(2);
    viewer.select_option(3);

    let view = viewer.view();
    let markdown = MarkdownRenderer::new(&view).generate();
    assert!(markdown.contains("- **Phase 03: Compose** (current)"));
    assert!(markdown.contains("- ✗ **D. .env**"));
    assert!(markdown.contains("- → **B. compose.yaml**"));
    assert!(!markdown.contains("Domain mastered"));

    let json: serde_json::Value =
        serde_json::from_str(&JsonRenderer::new(&view).generate().expect("serializes"))
            .expect("valid JSON");
    assert_eq!(json["screen"], "module");
    assert_eq!(json["quiz"]["status"], serde_json::json!({ "state": "answered", "correct": false }));
    assert_eq!(json["quiz"]["options"][3]["marker"], "✗");
}

#[tokio::test]
async fn test_restart_returns_to_topic_entry() {
    let mut viewer = offline_viewer(Config::default(), "docker-path.json");
    viewer
        .generate("Docker", ProficiencyLevel::Low)
        .await
        .expect("submission accepted");

    assert_eq!(viewer.restart(), Transition::Restarted);
    assert!(matches!(viewer.view(), SessionView::TopicEntry(ref entry) if entry.error.is_none()));
}
