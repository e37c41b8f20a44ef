use actix_web::{Error, HttpResponse, web};
use dashlens_shared::HealthCheckResult;
use log::debug;

use crate::analysis::handler::ScreenshotHandler;

const SCREENSHOT_PATH: &str = "screenshot";

pub fn configure_routes(cfg: &mut web::ServiceConfig, plugin_id: &str) {
    cfg.service(
        web::scope(&format!("/api/plugins/{}", plugin_id))
            .service(web::resource("/health").route(web::get().to(check_health)))
            .service(web::resource("/resources/{path:.*}").to(call_resource)),
    );
}

async fn check_health() -> HttpResponse {
    HttpResponse::Ok().json(HealthCheckResult::ok())
}

async fn call_resource(
    handler: web::Data<ScreenshotHandler>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, Error> {
    match path.as_str() {
        SCREENSHOT_PATH => {
            let response = handler
                .handle(&body)
                .await
                .map_err(actix_web::error::ErrorInternalServerError)?;
            Ok(response.into())
        }
        other => {
            debug!("No resource registered for path: {}", other);
            Ok(HttpResponse::NotFound().finish())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::prompt::{AnalysisPrompt, DEFAULT_ANALYSIS_PROMPT};
    use crate::gemini::InferenceCapability;
    use crate::gemini::client::GeminiError;
    use crate::gemini::models::{Candidate, Content, ContentPart, GenerateContentResponse};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use async_trait::async_trait;
    use std::sync::Arc;

    const PLUGIN_ID: &str = "test-panel";

    struct EchoPrompt;

    #[async_trait]
    impl InferenceCapability for EchoPrompt {
        async fn generate_content(
            &self,
            prompt: &AnalysisPrompt,
        ) -> Result<GenerateContentResponse, GeminiError> {
            Ok(GenerateContentResponse {
                candidates: vec![Candidate {
                    content: Some(Content {
                        parts: vec![ContentPart::Text(format!(
                            "{} bytes: {}",
                            prompt.image.len(),
                            prompt.instruction
                        ))],
                    }),
                    finish_reason: None,
                }],
            })
        }
    }

    fn handler(client: Option<Arc<dyn InferenceCapability>>) -> web::Data<ScreenshotHandler> {
        web::Data::new(ScreenshotHandler::new(client, DEFAULT_ANALYSIS_PROMPT))
    }

    #[actix_web::test]
    async fn screenshot_path_runs_the_analysis() {
        let app = test::init_service(
            App::new()
                .app_data(handler(Some(Arc::new(EchoPrompt))))
                .configure(|cfg| configure_routes(cfg, PLUGIN_ID)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/plugins/test-panel/resources/screenshot")
            .set_payload(r#"{"imageData":"data:image/png;base64,AQID"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(
            body["analysis"],
            format!("3 bytes: {}", DEFAULT_ANALYSIS_PROMPT)
        );
    }

    #[actix_web::test]
    async fn unknown_resource_path_is_not_found_with_empty_body() {
        let app = test::init_service(
            App::new()
                .app_data(handler(Some(Arc::new(EchoPrompt))))
                .configure(|cfg| configure_routes(cfg, PLUGIN_ID)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/plugins/test-panel/resources/annotations")
            .set_payload(r#"{"imageData":"data:image/png;base64,AQID"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(test::read_body(resp).await.is_empty());
    }

    #[actix_web::test]
    async fn screenshot_without_client_is_a_server_error() {
        let app = test::init_service(
            App::new()
                .app_data(handler(None))
                .configure(|cfg| configure_routes(cfg, PLUGIN_ID)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/plugins/test-panel/resources/screenshot")
            .set_payload("{}")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            test::read_body(resp).await,
            "Gemini client not initialized. Please configure the API key."
        );
    }

    #[actix_web::test]
    async fn bad_payload_is_a_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(handler(Some(Arc::new(EchoPrompt))))
                .configure(|cfg| configure_routes(cfg, PLUGIN_ID)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/plugins/test-panel/resources/screenshot")
            .set_payload(r#"{"imageData":"no-comma-here"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(test::read_body(resp).await, "Invalid image data format");
    }

    #[actix_web::test]
    async fn health_reports_ok() {
        let app = test::init_service(
            App::new()
                .app_data(handler(None))
                .configure(|cfg| configure_routes(cfg, PLUGIN_ID)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/plugins/test-panel/health")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            test::read_body(resp).await,
            r#"{"status":"ok","message":"ok"}"#
        );
    }
}
