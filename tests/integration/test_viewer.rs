//! Integration tests for the viewer against a stub generation backend.
//!
//! The backend is a small axum app bound to an ephemeral port. The topic in
//! the request body selects its behavior:
//!
//! - `fail` answers 500
//! - `empty` answers a path with no modules
//! - `garbage` answers 200 with a body that is not JSON
//! - anything else answers the Docker fixture, retitled to the topic
//!
//! A second backend answers 500 to every request.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use learnlens_render::MarkdownRenderer;
use learnlens_viewer::{
    Config, Event, HttpPathSource, OptionDisplay, PathSource, ProficiencyLevel, QuizStatus,
    RequestStatus, Session, SessionView, Transition, Viewer, LINK_INTERRUPTED_MESSAGE,
};
use serde_json::{json, Value};
use tokio::sync::Mutex;

const FIXTURE: &str = include_str!("fixtures/docker-path.json");

#[derive(Clone, Default)]
struct Backend {
    requests: Arc<Mutex<Vec<Value>>>,
}

async fn create_path(State(backend): State<Backend>, Json(body): Json<Value>) -> Response {
    backend.requests.lock().await.push(body.clone());

    let topic = body["topic"].as_str().unwrap_or_default().to_string();
    match topic.as_str() {
        "fail" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "empty" => Json(json!({ "topic": topic, "path": [] })).into_response(),
        "garbage" => (StatusCode::OK, "<html>not a learning path</html>").into_response(),
        _ => {
            let mut path: Value = serde_json::from_str(FIXTURE).expect("fixture is valid JSON");
            path["topic"] = Value::String(topic);
            Json(path).into_response()
        }
    }
}

/// Serves `router` on an ephemeral port and returns its address.
async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server failed");
    });

    addr
}

/// Spawns the stub backend and returns its address.
async fn spawn_backend() -> (SocketAddr, Backend) {
    let backend = Backend::default();
    let router = Router::new()
        .route("/api/create-path", post(create_path))
        .with_state(backend.clone());

    (serve(router).await, backend)
}

/// Spawns a backend whose every answer is a 500.
async fn spawn_failing_backend() -> SocketAddr {
    let router = Router::new().route(
        "/api/create-path",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    serve(router).await
}

fn config_for(addr: SocketAddr) -> Config {
    Config {
        api_url: format!("http://{addr}"),
        ..Config::default()
    }
}

async fn viewer() -> (Viewer, Backend) {
    let (addr, backend) = spawn_backend().await;
    (Viewer::with_http(config_for(addr)), backend)
}

#[tokio::test]
async fn test_generate_posts_wire_request() {
    let (mut viewer, backend) = viewer().await;

    let transition = viewer
        .generate("Docker", ProficiencyLevel::High)
        .await
        .expect("submission accepted");
    assert_eq!(transition, Transition::PathInstalled);

    let requests = backend.requests.lock().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0], json!({ "topic": "Docker", "level": "High" }));
}

#[tokio::test]
async fn test_full_walkthrough() {
    let (mut viewer, _) = viewer().await;
    viewer
        .generate("Docker", ProficiencyLevel::Low)
        .await
        .expect("submission accepted");

    let nav = viewer.session().navigator().expect("path installed");
    assert_eq!(nav.path().len(), 3);
    assert_eq!(nav.active_index(), 0);
    assert!(nav.answer().is_empty());

    // Module 2 carries a one-option question, which counts as no quiz.
    assert!(matches!(viewer.advance(), Transition::ModuleChanged(_)));
    assert_eq!(
        viewer.session().navigator().expect("path installed").quiz_status(),
        QuizStatus::Unavailable
    );
    assert_eq!(viewer.select_option(0), Transition::Ignored);

    // Wrong answer on the last module reveals the right one.
    viewer.advance();
    assert_eq!(viewer.select_option(0), Transition::Answered { correct: false });
    let nav = viewer.session().navigator().expect("path installed");
    let displays = nav.option_displays();
    assert_eq!(displays[0], OptionDisplay::SelectedIncorrect);
    assert_eq!(displays[1], OptionDisplay::RevealedCorrect);
    assert!(!viewer.session().is_mastered());

    // Re-opening the module clears the answer; a right answer now masters it.
    viewer.jump_to(2);
    assert_eq!(viewer.select_option(1), Transition::Answered { correct: true });
    assert!(viewer.session().is_mastered());

    let view = viewer.view();
    let markdown = MarkdownRenderer::new(&view).generate();
    assert!(markdown.contains("**Phase 03 of 03** | 100% complete"));
    assert!(markdown.contains("https://www.youtube.com/embed/Gjnup-PuquQ?autoplay=1"));
    assert!(markdown.contains("## Domain mastered"));
}

#[tokio::test]
async fn test_server_error_fails_request() {
    let addr = spawn_failing_backend().await;
    let mut viewer = Viewer::with_http(config_for(addr));

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
    assert!(viewer.session().navigator().is_none());

    match viewer.view() {
        SessionView::TopicEntry(entry) => {
            assert_eq!(entry.error.as_deref(), Some(LINK_INTERRUPTED_MESSAGE));
            assert_eq!(entry.last_topic.as_deref(), Some("Docker"));
        }
        other => panic!("Expected topic entry, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_retry_after_failure() {
    let (mut viewer, backend) = viewer().await;

    viewer
        .generate("fail", ProficiencyLevel::Low)
        .await
        .expect("submission accepted");
    let transition = viewer
        .generate("Docker", ProficiencyLevel::Low)
        .await
        .expect("submission accepted");

    assert_eq!(transition, Transition::PathInstalled);
    assert!(viewer.session().request().error_message().is_none());
    assert_eq!(backend.requests.lock().await.len(), 2);
}

#[tokio::test]
async fn test_empty_path_fails_request() {
    let (mut viewer, _) = viewer().await;

    let transition = viewer
        .generate("empty", ProficiencyLevel::Low)
        .await
        .expect("submission accepted");

    assert_eq!(transition, Transition::RequestFailed);
    assert!(viewer.session().navigator().is_none());
    assert!(viewer
        .session()
        .request()
        .error_message()
        .is_some_and(|m| m.contains("no modules")));
}

#[tokio::test]
async fn test_undecodable_response_fails_request() {
    let (mut viewer, _) = viewer().await;

    let transition = viewer
        .generate("garbage", ProficiencyLevel::Low)
        .await
        .expect("submission accepted");

    assert_eq!(transition, Transition::RequestFailed);
    assert_eq!(
        viewer.session().request().error_message(),
        Some(LINK_INTERRUPTED_MESSAGE)
    );
}

#[tokio::test]
async fn test_unreachable_backend_fails_request() {
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        listener.local_addr().expect("Failed to get local addr")
    };
    let mut viewer = Viewer::with_http(config_for(addr));

    let transition = viewer
        .generate("Docker", ProficiencyLevel::Low)
        .await
        .expect("submission accepted");

    assert_eq!(transition, Transition::RequestFailed);
    assert_eq!(viewer.session().status(), RequestStatus::Failed);
}

#[tokio::test]
async fn test_stale_completion_is_discarded() {
    let (addr, _) = spawn_backend().await;
    let source = HttpPathSource::from_config(&config_for(addr));
    let mut session = Session::new();

    let Transition::Fetch {
        ticket: first,
        request: first_request,
    } = session
        .dispatch(Event::Submit {
            topic: "Docker".to_string(),
            level: ProficiencyLevel::Low,
        })
        .expect("submission accepted")
    else {
        panic!("Expected fetch");
    };

    // While pending, neither a second submission nor a restart gets through.
    assert!(session
        .dispatch(Event::Submit {
            topic: "Kubernetes".to_string(),
            level: ProficiencyLevel::Low,
        })
        .is_err());
    assert_eq!(
        session.dispatch(Event::Restart).expect("restart"),
        Transition::Ignored
    );

    let first_outcome = source.fetch(&first_request).await;
    let duplicate_outcome = source.fetch(&first_request).await;
    assert_eq!(
        session
            .dispatch(Event::Completed {
                ticket: first,
                outcome: first_outcome,
            })
            .expect("completion"),
        Transition::PathInstalled
    );

    let Transition::Fetch {
        ticket: second,
        request: second_request,
    } = session
        .dispatch(Event::Submit {
            topic: "Kubernetes".to_string(),
            level: ProficiencyLevel::Medium,
        })
        .expect("submission accepted")
    else {
        panic!("Expected fetch");
    };
    assert!(second > first);

    // A duplicate answer for the first ticket must not overwrite anything.
    let late = session
        .dispatch(Event::Completed {
            ticket: first,
            outcome: duplicate_outcome,
        })
        .expect("completion");
    assert_eq!(late, Transition::Ignored);
    assert_eq!(session.status(), RequestStatus::Pending);
    assert!(session.navigator().is_none());

    let second_outcome = source.fetch(&second_request).await;
    let transition = session
        .dispatch(Event::Completed {
            ticket: second,
            outcome: second_outcome,
        })
        .expect("completion");

    assert_eq!(transition, Transition::PathInstalled);
    assert_eq!(
        session.navigator().expect("path installed").path().topic,
        "Kubernetes"
    );
}
