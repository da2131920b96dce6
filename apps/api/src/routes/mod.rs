pub mod health;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};

use crate::simulation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Pages
        .route("/", get(pages::index_page))
        .route("/setup", get(pages::setup_page))
        .route("/results", get(pages::results_page))
        // Simulation API
        .route(
            "/api/start_simulation",
            post(handlers::handle_start_simulation),
        )
        .route("/api/progress", get(handlers::handle_progress))
        .route(
            "/api/cancel_simulation",
            post(handlers::handle_cancel_simulation),
        )
        .route("/api/download/:format", get(handlers::handle_download))
        .route(
            "/api/test_connection",
            post(handlers::handle_test_connection),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::testing::{Reply, ScriptedModel};
    use crate::llm_client::ChatModel;
    use crate::simulation::job::JobTracker;

    struct TestApp {
        state: AppState,
        _reports: tempfile::TempDir,
    }

    impl TestApp {
        fn new(model: Arc<dyn ChatModel>) -> Self {
            let reports = tempfile::tempdir().unwrap();
            let reports_dir = reports.path().to_string_lossy().to_string();
            let config = Config::from_lookup(|key| match key {
                "REPORTS_DIR" => Some(reports_dir.clone()),
                _ => None,
            })
            .unwrap();
            Self {
                state: AppState {
                    jobs: JobTracker::new(),
                    llm: model,
                    config,
                },
                _reports: reports,
            }
        }

        async fn send(&self, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
            let body = match body {
                Some(json) => Body::from(serde_json::to_string(&json).unwrap()),
                None => Body::empty(),
            };
            let req = Request::builder()
                .method(method)
                .uri(path)
                .header("content-type", "application/json")
                .body(body)
                .unwrap();
            let resp = build_router(self.state.clone()).oneshot(req).await.unwrap();
            let status = resp.status();
            let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
                .await
                .unwrap();
            (status, bytes.to_vec())
        }

        async fn json(&self, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
            let (status, bytes) = self.send(method, path, body).await;
            (status, serde_json::from_slice(&bytes).unwrap_or(json!({})))
        }

        async fn wait_for_terminal_state(&self) -> Value {
            for _ in 0..500 {
                let (_, progress) = self.json(Method::GET, "/api/progress", None).await;
                if progress["status"] != "running" {
                    return progress;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            panic!("simulation did not finish");
        }
    }

    fn submission() -> Value {
        json!({
            "api_key": "k",
            "interview_data": {
                "job_details": {
                    "position": "Engineer",
                    "company": "Acme",
                    "department": "Eng",
                    "tech_stack": "Go"
                },
                "candidate_info": {"name": "Jane Doe"},
                "hr_responses": "...",
                "tech_responses": "..."
            }
        })
    }

    fn scripted() -> Arc<dyn ChatModel> {
        Arc::new(ScriptedModel::texts(&["hr", "tech", "Hire with confidence."]))
    }

    #[tokio::test]
    async fn test_progress_is_idle_before_any_submission() {
        let app = TestApp::new(scripted());
        let (status, body) = app.json(Method::GET, "/api/progress", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"status": "idle", "step": "", "progress": 0, "result": null})
        );
    }

    #[tokio::test]
    async fn test_download_before_completion_is_not_found() {
        let app = TestApp::new(scripted());
        let (status, body) = app.json(Method::GET, "/api/download/json", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_download_with_unknown_format_is_bad_request() {
        let app = TestApp::new(scripted());
        let (status, body) = app.json(Method::GET, "/api/download/xml", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_FORMAT");
    }

    #[tokio::test]
    async fn test_start_without_api_key_is_rejected_and_state_untouched() {
        let model = Arc::new(ScriptedModel::texts(&[]));
        let app = TestApp::new(model.clone());
        let mut payload = submission();
        payload.as_object_mut().unwrap().remove("api_key");

        let (status, body) = app
            .json(Method::POST, "/api/start_simulation", Some(payload))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "API key is required");
        let (_, progress) = app.json(Method::GET, "/api/progress", None).await;
        assert_eq!(progress["status"], "idle");
        assert!(progress["result"].is_null());
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_start_without_interview_data_is_rejected() {
        let app = TestApp::new(scripted());
        let (status, _) = app
            .json(Method::POST, "/api/start_simulation", Some(json!({"api_key": "k"})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_keyless_submission_with_malformed_data_reports_missing_key() {
        let app = TestApp::new(scripted());
        let payload = json!({
            "interview_data": {
                "job_details": {"position": "Engineer"},
                "candidate_info": {}
            }
        });

        let (status, body) = app
            .json(Method::POST, "/api/start_simulation", Some(payload))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "API key is required");
    }

    #[tokio::test]
    async fn test_missing_and_blank_position_are_both_validation_errors() {
        let model = Arc::new(ScriptedModel::texts(&[]));
        let app = TestApp::new(model.clone());

        let mut missing = submission();
        missing["interview_data"]["job_details"]
            .as_object_mut()
            .unwrap()
            .remove("position");
        let mut blank = submission();
        blank["interview_data"]["job_details"]["position"] = json!("  ");
        let mut no_name = submission();
        no_name["interview_data"]["candidate_info"] = json!({});

        for payload in [missing, blank, no_name] {
            let (status, body) = app
                .json(Method::POST, "/api/start_simulation", Some(payload))
                .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        }

        let (_, progress) = app.json(Method::GET, "/api/progress", None).await;
        assert_eq!(progress["status"], "idle");
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_progress_after_submit_is_running_without_result() {
        let app = TestApp::new(Arc::new(ScriptedModel::always(Reply::Hang)));
        let (status, body) = app
            .json(Method::POST, "/api/start_simulation", Some(submission()))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Simulation started successfully");

        let (_, progress) = app.json(Method::GET, "/api/progress", None).await;
        assert_eq!(progress["status"], "running");
        assert!(progress["result"].is_null());
        let percent = progress["progress"].as_u64().unwrap();
        assert!((10..=80).contains(&percent), "unexpected progress {percent}");
    }

    #[tokio::test]
    async fn test_second_submission_while_running_conflicts() {
        let app = TestApp::new(Arc::new(ScriptedModel::always(Reply::Hang)));
        let (first, _) = app
            .json(Method::POST, "/api/start_simulation", Some(submission()))
            .await;
        assert_eq!(first, StatusCode::OK);

        let (second, body) = app
            .json(Method::POST, "/api/start_simulation", Some(submission()))
            .await;
        assert_eq!(second, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");

        let (cancelled, _) = app.json(Method::POST, "/api/cancel_simulation", None).await;
        assert_eq!(cancelled, StatusCode::OK);
        let (_, progress) = app.json(Method::GET, "/api/progress", None).await;
        assert_eq!(progress["status"], "error");
        assert_eq!(progress["step"], "Error: Simulation cancelled");
    }

    #[tokio::test]
    async fn test_cancel_without_running_job_conflicts() {
        let app = TestApp::new(scripted());
        let (status, _) = app.json(Method::POST, "/api/cancel_simulation", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_full_run_then_download_json() {
        let app = TestApp::new(scripted());
        app.json(Method::POST, "/api/start_simulation", Some(submission()))
            .await;

        let progress = app.wait_for_terminal_state().await;
        assert_eq!(progress["status"], "completed");
        assert_eq!(progress["progress"], 100);
        assert_eq!(progress["result"]["assessment"], "Hire with confidence.");

        let (status, bytes) = app.send(Method::GET, "/api/download/json", None).await;
        assert_eq!(status, StatusCode::OK);
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"name\": \"Jane Doe\""));
        assert!(text.contains("\"position\": \"Engineer\""));

        let downloaded: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(downloaded, progress["result"]);
    }

    #[tokio::test]
    async fn test_full_run_then_download_markdown_with_attachment_headers() {
        let app = TestApp::new(scripted());
        app.json(Method::POST, "/api/start_simulation", Some(submission()))
            .await;
        let progress = app.wait_for_terminal_state().await;
        let filename = progress["result"]["filename"].as_str().unwrap().to_string();

        let req = Request::builder()
            .uri("/api/download/markdown")
            .body(Body::empty())
            .unwrap();
        let resp = build_router(app.state.clone()).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            &format!("attachment; filename=\"{filename}.md\"")
        );
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("**Candidate:** Jane Doe"));
        assert!(text.contains("**Position:** Engineer"));

        let on_disk = app.state.config.reports_dir.join(format!("{filename}.md"));
        assert!(on_disk.exists());
    }

    #[tokio::test]
    async fn test_pdf_download_is_not_implemented() {
        let app = TestApp::new(scripted());
        app.json(Method::POST, "/api/start_simulation", Some(submission()))
            .await;
        app.wait_for_terminal_state().await;

        let (status, body) = app.json(Method::GET, "/api/download/pdf", None).await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
        assert_eq!(body["error"]["code"], "NOT_IMPLEMENTED");
    }

    #[tokio::test]
    async fn test_failed_run_reports_error_step() {
        let app = TestApp::new(Arc::new(ScriptedModel::always(Reply::Fail {
            status: 500,
            message: "upstream exploded".to_string(),
        })));
        app.json(Method::POST, "/api/start_simulation", Some(submission()))
            .await;

        let progress = app.wait_for_terminal_state().await;
        assert_eq!(progress["status"], "error");
        assert_eq!(progress["progress"], 0);
        assert!(progress["result"].is_null());
        assert!(progress["step"]
            .as_str()
            .unwrap()
            .contains("upstream exploded"));
    }

    #[tokio::test]
    async fn test_connection_success_and_failure() {
        let model = Arc::new(ScriptedModel::new(vec![
            Reply::Text("Connection successful!".to_string()),
            Reply::Fail {
                status: 401,
                message: "Incorrect API key provided".to_string(),
            },
        ]));
        let app = TestApp::new(model.clone());

        let (status, body) = app
            .json(Method::POST, "/api/test_connection", Some(json!({"api_key": "k"})))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Connection successful!");
        assert_eq!(body["test_response"], "Connection successful!");

        let (status, body) = app
            .json(Method::POST, "/api/test_connection", Some(json!({"api_key": "bad"})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Connection failed:"));

        let calls = model.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls
            .iter()
            .all(|c| c.profile == crate::llm_client::ModelProfile::ConnectionTest));

        let (status, _) = app
            .json(Method::POST, "/api/test_connection", Some(json!({})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_pages_and_health_are_served() {
        let app = TestApp::new(scripted());
        for path in ["/", "/setup", "/results"] {
            let (status, bytes) = app.send(Method::GET, path, None).await;
            assert_eq!(status, StatusCode::OK, "{path}");
            assert!(String::from_utf8(bytes).unwrap().contains("<html"));
        }
        let (status, body) = app.json(Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
