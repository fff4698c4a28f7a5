//! HTTP API for the vocabulary tracker
//!
//! Every route except `/api/health` requires `Authorization: Bearer <token>`.
//! Successful mutations answer `{success: true, message}`, errors answer
//! `{success: false, message}` with a 400/401/404/500 status.

pub mod auth;
pub mod error;
pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::AppState;

pub use auth::{generate_token, RequestContext};
pub use error::{ApiError, ApiMessage};

/// Running server handle
pub struct ServerHandle {
    /// Address actually bound (useful when port 0 was requested)
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ServerHandle {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the server gracefully.
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }

    /// Stop and wait for in-flight requests to finish
    pub async fn shutdown(mut self) {
        self.stop();
        if let Err(e) = self.task.await {
            log::error!("Server task failed: {}", e);
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/words", get(handlers::list_words).post(handlers::create_word))
        .route(
            "/words/{id}",
            get(handlers::get_word)
                .put(handlers::update_word)
                .delete(handlers::delete_word),
        )
        .route("/categories", get(handlers::list_categories))
        .route("/reviews", post(handlers::record_review))
        .route("/reviews/due", get(handlers::due_words))
        .route("/reviews/stats", get(handlers::review_stats))
        .route("/practice", get(handlers::practice))
        .route("/scores", get(handlers::list_scores).post(handlers::add_score))
        .route("/scores/summary", get(handlers::score_summary))
        .route("/scores/{id}", delete(handlers::delete_score))
        .route(
            "/samples/{skill}",
            get(handlers::list_samples).post(handlers::submit_sample),
        )
        .route("/samples/{skill}/{id}", delete(handlers::delete_sample))
        .route("/frequencies/{skill}", get(handlers::word_frequencies));

    Router::new().nest("/api", api).with_state(state)
}

/// Bind `addr` and serve in a background task.
pub async fn start_server(
    state: Arc<AppState>,
    addr: SocketAddr,
) -> Result<ServerHandle, Box<dyn std::error::Error + Send + Sync>> {
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;
    log::info!("Vocabulary server listening on http://{}", addr);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                log::info!("Vocabulary server shutting down");
            })
            .await;
        if let Err(e) = result {
            log::error!("Server error: {}", e);
        }
    });

    Ok(ServerHandle {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::srs::{local_day, DueQueue};
    use crate::vocabulary::VocabularyWord;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use chrono::{Days, Utc};
    use serde::de::DeserializeOwned;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const TOKEN: &str = "test-token";

    fn test_state(dir: &tempfile::TempDir) -> Arc<AppState> {
        let config = AppConfig::default();
        Arc::new(AppState::new(dir.path().to_path_buf(), &config, TOKEN.to_string()).unwrap())
    }

    fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN));
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(state: &Arc<AppState>, req: Request<Body>) -> (StatusCode, Value) {
        let response = router(Arc::clone(state)).oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn parse<T: DeserializeOwned>(value: Value) -> T {
        serde_json::from_value(value).unwrap()
    }

    async fn add_word(state: &Arc<AppState>, english: &str) -> VocabularyWord {
        let (status, body) = send(
            state,
            request(
                Method::POST,
                "/api/words",
                Some(json!({"english": english, "vietnamese": "nghĩa", "category": ["education"]})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        parse(body)
    }

    #[tokio::test]
    async fn test_health_needs_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let req = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
        let (status, body) = send(&state, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_missing_or_wrong_token_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let req = Request::builder().uri("/api/words").body(Body::empty()).unwrap();
        let (status, body) = send(&state, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);

        let req = Request::builder()
            .uri("/api/words")
            .header(header::AUTHORIZATION, "Bearer wrong")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&state, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_word_crud() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let word = add_word(&state, "mitigate").await;
        assert_eq!(word.srs_level, 0);
        assert!(word.next_review.is_none());

        let (status, body) = send(
            &state,
            request(Method::PUT, &format!("/api/words/{}", word.id), Some(json!({"ielts_band": 7}))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let edited: VocabularyWord = parse(body);
        assert_eq!(edited.ielts_band, 7);

        let (status, body) = send(&state, request(Method::GET, "/api/words?query=miti", None)).await;
        assert_eq!(status, StatusCode::OK);
        let words: Vec<VocabularyWord> = parse(body);
        assert_eq!(words.len(), 1);

        let (status, _) = send(&state, request(Method::DELETE, &format!("/api/words/{}", word.id), None)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&state, request(Method::GET, &format!("/api/words/{}", word.id), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_create_word_validation() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let (status, body) = send(
            &state,
            request(Method::POST, "/api/words", Some(json!({"english": "  ", "vietnamese": "x"}))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, _) = send(&state, request(Method::POST, "/api/words", Some(json!({"english": 3})))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_review_then_due_and_stats() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let word = add_word(&state, "substantial").await;

        let (status, body) = send(
            &state,
            request(
                Method::POST,
                "/api/reviews",
                Some(json!({"word_id": word.id, "result": "correct", "mode": "flashcard"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let stored = state.store.get(&word.id).unwrap();
        assert_eq!(stored.srs_level, 1);
        let today = local_day(Utc::now());
        assert_eq!(stored.next_review, today.checked_add_days(Days::new(2)));
        assert_eq!(stored.review_history.len(), 1);

        // Scheduled two days out, so nothing is due today
        let (status, body) = send(&state, request(Method::GET, "/api/reviews/due", None)).await;
        assert_eq!(status, StatusCode::OK);
        let due: DueQueue = parse(body);
        assert_eq!(due.count, 0);

        let (status, body) = send(&state, request(Method::GET, "/api/reviews/stats", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_words"], 1);
        assert_eq!(body["reviews_today"], 1);
        assert_eq!(body["correct_today"], 1);
    }

    #[tokio::test]
    async fn test_review_rejects_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let word = add_word(&state, "allocate").await;

        let (status, body) = send(
            &state,
            request(
                Method::POST,
                "/api/reviews",
                Some(json!({"word_id": word.id, "result": "maybe", "mode": "flashcard"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(state.store.get(&word.id).unwrap().review_history.is_empty());

        let not_json = Request::builder()
            .method(Method::POST)
            .uri("/api/reviews")
            .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("not json"))
            .unwrap();
        let rejected = [
            not_json,
            request(
                Method::POST,
                "/api/reviews",
                Some(json!({"word_id": word.id, "result": "correct"})),
            ),
            request(
                Method::POST,
                "/api/reviews",
                Some(json!({"word_id": word.id, "result": "correct", "mode": "typo"})),
            ),
        ];
        for req in rejected {
            let (status, body) = send(&state, req).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["success"], false);
            assert!(body["message"].is_string());
            assert!(state.store.get(&word.id).unwrap().review_history.is_empty());
        }

        let (status, _) = send(
            &state,
            request(
                Method::POST,
                "/api/reviews",
                Some(json!({"word_id": "missing", "result": "correct", "mode": "quiz"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&state, request(Method::GET, "/api/reviews/due?limit=0", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_reviews_are_all_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let word = add_word(&state, "cultivate").await;

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let state = Arc::clone(&state);
                let body = json!({"word_id": word.id, "result": "correct", "mode": "quiz"});
                tokio::spawn(async move {
                    send(&state, request(Method::POST, "/api/reviews", Some(body))).await.0
                })
            })
            .collect();
        for task in tasks {
            assert_eq!(task.await.unwrap(), StatusCode::OK);
        }

        let stored = state.store.get(&word.id).unwrap();
        assert_eq!(stored.review_history.len(), 8);
        assert_eq!(stored.srs_level, 5);
    }

    #[tokio::test]
    async fn test_new_words_are_due() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        add_word(&state, "first").await;
        add_word(&state, "second").await;

        let (status, body) = send(&state, request(Method::GET, "/api/reviews/due?limit=1", None)).await;
        assert_eq!(status, StatusCode::OK);
        let due: DueQueue = parse(body);
        assert_eq!(due.count, 2);
        assert_eq!(due.words.len(), 1);
        assert_eq!(due.words[0].english, "first");
    }

    #[tokio::test]
    async fn test_practice_session() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        for english in ["one", "two", "three", "four", "five"] {
            add_word(&state, english).await;
        }

        let (status, body) = send(&state, request(Method::GET, "/api/practice?mode=quiz&size=3", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "quiz");
        assert_eq!(body["questions"].as_array().unwrap().len(), 3);

        let (status, _) = send(&state, request(Method::GET, "/api/practice?mode=essay", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_scores_routes() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let (status, body) = send(
            &state,
            request(
                Method::POST,
                "/api/scores",
                Some(json!({
                    "test_date": "2026-03-14",
                    "listening": 7.5, "reading": 7.0, "writing": 6.0, "speaking": 6.5
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["overall"], 7.0);
        let id = body["id"].as_str().unwrap().to_string();

        let (status, body) = send(&state, request(Method::GET, "/api/scores/summary", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);

        let (status, _) = send(&state, request(Method::DELETE, "/api/scores/not-a-uuid", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&state, request(Method::DELETE, &format!("/api/scores/{}", id), None)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_samples_and_frequencies() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let (status, _) = send(
            &state,
            request(
                Method::POST,
                "/api/samples/writing",
                Some(json!({"title": "Task 2", "text": "Urban growth drives urban pollution."})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&state, request(Method::GET, "/api/frequencies/writing?limit=1", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"word": "urban", "count": 2}]));

        let (status, body) = send(&state, request(Method::GET, "/api/samples/listening", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_start_and_stop_server() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let mut handle = start_server(state, "127.0.0.1:0".parse().unwrap()).await.unwrap();
        assert_ne!(handle.addr.port(), 0);
        assert!(handle.base_url().starts_with("http://127.0.0.1:"));
        handle.stop();
        handle.stop();
        handle.shutdown().await;
    }
}
