use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use analysis_client::{
    AnalysisController, AnalysisError, AnalysisService, HttpAnalysisService, Tier, UiState,
};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use protocol::config::ClientConfig;
use serde_json::{json, Value};
use tokio::net::TcpListener;

type Captured = Arc<Mutex<Vec<Value>>>;

fn scenario_body() -> Value {
    json!({
        "verdict_level": "HIGH RISK",
        "verdict_message": "Strong indicators of potential misinformation or vague content detected",
        "risk_score": 82,
        "credibility_score": 15,
        "ai_prediction": {"available": true, "prediction": "Likely Fake", "confidence": 91},
        "risk_indicators": {"Excessive Punctuation": {"score": 70, "message": "..."}},
        "linguistic_features": {
            "word_count": 5, "sentence_count": 1, "avg_sentence_length": 5,
            "caps_ratio": 0.1, "exclamation_count": 0, "question_count": 0
        }
    })
}

async fn spawn_server(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    addr
}

fn config_for(addr: SocketAddr) -> ClientConfig {
    ClientConfig {
        base_url: format!("http://{addr}"),
        request_timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(1),
        ..ClientConfig::default()
    }
}

async fn capture_and_reply(
    State(captured): State<Captured>,
    Json(body): Json<Value>,
) -> Json<Value> {
    captured.lock().unwrap().push(body);
    Json(scenario_body())
}

#[tokio::test]
async fn posts_json_and_renders_result() {
    let captured: Captured = Arc::default();
    let router = Router::new()
        .route("/analyze", post(capture_and_reply))
        .with_state(Arc::clone(&captured));
    let addr = spawn_server(router).await;
    let service = HttpAnalysisService::new(config_for(addr)).expect("service");

    let mut controller = AnalysisController::default();
    let view = controller
        .submit(
            &service,
            "  Breaking: scientists discover...  ",
            " https://example.com/story ",
        )
        .await
        .expect("submit")
        .expect("view")
        .clone();

    assert_eq!(view.risk.width, 82.0);
    assert_eq!(view.credibility.width, 15.0);
    assert_eq!(view.indicators[0].tier, Tier::High);
    assert_eq!(controller.state(), &UiState::Idle);

    let bodies = captured.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(
        bodies[0],
        json!({"text": "Breaking: scientists discover...", "url": "https://example.com/story"})
    );
}

#[tokio::test]
async fn server_error_message_is_surfaced_verbatim() {
    let router = Router::new().route(
        "/analyze",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "model unavailable"})),
            )
        }),
    );
    let addr = spawn_server(router).await;
    let service = HttpAnalysisService::new(config_for(addr)).expect("service");

    let mut controller = AnalysisController::default();
    let err = controller
        .submit(&service, "Breaking: scientists discover...", "")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AnalysisError::Service {
            status: 500,
            message: "model unavailable".to_string()
        }
    );
    assert_eq!(controller.error_message(), Some("model unavailable"));
    assert!(controller.trigger_enabled());
}

#[tokio::test]
async fn error_without_body_uses_fallback() {
    let router = Router::new().route("/analyze", post(|| async { StatusCode::BAD_GATEWAY }));
    let addr = spawn_server(router).await;
    let service = HttpAnalysisService::new(config_for(addr)).expect("service");

    let err = service
        .analyze(&protocol::AnalysisRequest::from_input("Breaking: scientists", ""))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Analysis failed (HTTP 502)");
}

#[tokio::test]
async fn out_of_range_scores_are_malformed() {
    let router = Router::new().route(
        "/analyze",
        post(|| async {
            let mut body = scenario_body();
            body["risk_score"] = json!(182);
            Json(body)
        }),
    );
    let addr = spawn_server(router).await;
    let service = HttpAnalysisService::new(config_for(addr)).expect("service");

    let mut controller = AnalysisController::default();
    let err = controller
        .submit(&service, "Breaking: scientists discover...", "")
        .await
        .unwrap_err();
    match err {
        AnalysisError::MalformedResponse(detail) => assert!(detail.contains("risk_score")),
        other => panic!("unexpected error {other:?}"),
    }
    assert!(controller.trigger_enabled());
    assert!(controller.view().is_none());
}

#[tokio::test]
async fn slow_service_times_out_as_network_error() {
    let router = Router::new().route(
        "/analyze",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(scenario_body())
        }),
    );
    let addr = spawn_server(router).await;
    let config = ClientConfig {
        request_timeout: Duration::from_millis(200),
        ..config_for(addr)
    };
    let service = HttpAnalysisService::new(config).expect("service");

    let mut controller = AnalysisController::default();
    let err = controller
        .submit(&service, "Breaking: scientists discover...", "")
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Network { timed_out: true, .. }));
    assert!(controller
        .error_message()
        .expect("error surfaced")
        .contains("check your connection"));
    assert!(controller.trigger_enabled());
}

#[tokio::test]
async fn refused_connection_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let service = HttpAnalysisService::new(config_for(addr)).expect("service");

    let mut controller = AnalysisController::default();
    let err = controller
        .submit(&service, "Breaking: scientists discover...", "")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "network");
    assert!(controller
        .error_message()
        .expect("message")
        .contains("check your connection"));
}

#[tokio::test]
async fn predict_endpoint_is_mapped_to_canonical_result() {
    let captured: Captured = Arc::default();
    let router = Router::new()
        .route(
            "/predict",
            post(|State(captured): State<Captured>, Json(body): Json<Value>| async move {
                captured.lock().unwrap().push(body);
                Json(json!({
                    "prediction": "Fake News",
                    "real_probability": 30.0,
                    "fake_probability": 70.0,
                    "confidence": 70.0
                }))
            }),
        )
        .with_state(Arc::clone(&captured));
    let addr = spawn_server(router).await;
    let config = ClientConfig {
        base_url: format!("http://{addr}"),
        ..ClientConfig::predict_preset()
    };
    let service = HttpAnalysisService::new(config).expect("service");

    let mut controller = AnalysisController::default();
    let view = controller
        .submit(&service, "Shocking secret exposed!", "https://ignored.example")
        .await
        .expect("submit")
        .expect("view")
        .clone();
    assert_eq!(view.verdict.tier, Tier::High);
    assert_eq!(view.risk.percent_text, "70%");
    let ai = view.ai_panel.as_ref().expect("ai panel");
    assert_eq!(ai.confidence_text, "70.0%");
    assert_eq!(ai.confidence_tier, Tier::Medium);
    assert!(view.statistics.is_empty());
    assert_eq!(
        captured.lock().unwrap()[0],
        json!({"text": "Shocking secret exposed!"})
    );
}

#[tokio::test]
async fn health_reports_model_availability() {
    let router = Router::new().route(
        "/health",
        get(|| async { Json(json!({"status": "healthy", "ai_model_available": false})) }),
    );
    let addr = spawn_server(router).await;
    let service = HttpAnalysisService::new(config_for(addr)).expect("service");

    let health = service.health().await.expect("health");
    assert_eq!(health.status, "healthy");
    assert!(!health.ai_model_available);
}
