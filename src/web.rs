use crate::models::{ConsultationOutcome, ConsultationRequest, PersonaInfo};
use crate::page::{Page, PageError};
use crate::persona::Persona;
use crate::service::ConsultationService;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use axum_macros::debug_handler;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ConsultationService>,
    pub page: Arc<Page>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_index).post(handle_submit))
        .route("/api/consult", axum::routing::post(handle_api_consult))
        .route("/api/personas", get(handle_personas))
        .route("/health", get(|| async { "ok" }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        error!("{}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

#[debug_handler]
async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    state.page.render(Persona::default(), "", None).map(Html)
}

#[debug_handler]
async fn handle_submit(
    State(state): State<AppState>,
    Form(request): Form<ConsultationRequest>,
) -> Result<Html<String>, PageError> {
    let outcome = state.service.consult(&request).await;
    state
        .page
        .render(request.persona, &request.input, Some(&outcome))
        .map(Html)
}

#[debug_handler]
async fn handle_api_consult(
    State(state): State<AppState>,
    Json(request): Json<ConsultationRequest>,
) -> Json<ConsultationOutcome> {
    Json(state.service.consult(&request).await)
}

#[debug_handler]
async fn handle_personas() -> Json<Vec<PersonaInfo>> {
    Json(
        Persona::ALL
            .iter()
            .map(|p| PersonaInfo {
                label: p.label(),
                system_message: p.system_message(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{ERROR_NOTICE, SUCCESS_NOTICE};
    use crate::persona::{FINANCIAL_PLANNER_SYSTEM_MESSAGE, TRAINER_LABEL};
    use crate::service::tests::FakeBackend;
    use crate::service::EMPTY_INPUT_WARNING;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn app_with(backend: Arc<FakeBackend>) -> Router {
        router(AppState {
            service: Arc::new(ConsultationService::new(backend)),
            page: Arc::new(Page::new().unwrap()),
        })
    }

    fn form_body(persona: &str, input: &str) -> String {
        serde_urlencoded::to_string([("persona", persona), ("input", input)]).unwrap()
    }

    async fn post_form(app: Router, body: String) -> String {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let app = app_with(FakeBackend::answering("unused"));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("<form method=\"post\""));
        assert!(html.contains(&format!("value=\"{}\" checked", TRAINER_LABEL)));
    }

    #[tokio::test]
    async fn test_submit_scenario_renders_answer() {
        let backend = FakeBackend::answering("頑張りましょう！");
        let html = post_form(
            app_with(backend.clone()),
            form_body(TRAINER_LABEL, "最近太り気味です"),
        )
        .await;

        assert!(html.contains(SUCCESS_NOTICE));
        assert!(html.contains(&format!(
            "<strong>{}からのアドバイス：</strong>",
            TRAINER_LABEL
        )));
        assert!(html.contains("<div class=\"answer\">頑張りましょう！</div>"));
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_submit_blank_shows_warning() {
        let backend = FakeBackend::answering("unused");
        let html = post_form(app_with(backend.clone()), form_body(TRAINER_LABEL, "   ")).await;

        assert!(html.contains(EMPTY_INPUT_WARNING));
        assert!(!html.contains(SUCCESS_NOTICE));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_failure_shows_error() {
        let backend = FakeBackend::failing("quota exceeded");
        let html = post_form(
            app_with(backend),
            form_body("💰 ファイナンシャルプランナー", "貯金したい"),
        )
        .await;

        assert!(html.contains(ERROR_NOTICE));
        assert!(html.contains("quota exceeded"));
        assert!(!html.contains(SUCCESS_NOTICE));
    }

    #[tokio::test]
    async fn test_api_consult_returns_outcome() {
        let backend = FakeBackend::answering("積立から始めましょう。");
        let app = app_with(backend.clone());
        let body = serde_json::json!({
            "persona": "💰 ファイナンシャルプランナー",
            "input": "投資を始めたい"
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/consult")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "answer");
        assert_eq!(json["persona"], "💰 ファイナンシャルプランナー");
        assert_eq!(json["text"], "積立から始めましょう。");

        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls[0][0].content, FINANCIAL_PLANNER_SYSTEM_MESSAGE);
    }

    #[tokio::test]
    async fn test_personas_endpoint() {
        let app = app_with(FakeBackend::answering("unused"));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/personas")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[0]["label"], TRAINER_LABEL);
    }

    #[test]
    fn test_form_body_decodes_to_request() {
        let body = form_body(TRAINER_LABEL, "腹筋 & 背筋=大事?");
        let request: ConsultationRequest = serde_urlencoded::from_str(&body).unwrap();
        assert_eq!(request.persona, Persona::Trainer);
        assert_eq!(request.input, "腹筋 & 背筋=大事?");
    }
}
