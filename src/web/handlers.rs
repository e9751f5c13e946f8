use actix_multipart::form::MultipartForm;
use actix_web::{web, Either, HttpResponse, Responder};
use log::{error, info};
use uuid::Uuid;

use crate::error::TutorError;
use crate::tutor::{build_messages, parse_history, ImagePayload};
use crate::web::models::{
    ChatForm, ChatMultipartForm, ChatResponse, HealthStatus, ServiceInfo, SolveForm,
    SolveMetadata, SolveResponse,
};
use crate::AppState;

const FEATURES: [&str; 6] = [
    "Adaptive teaching (5 language levels)",
    "Bilingual (Math ↔ Real World)",
    "Multiple teaching modes",
    "Creative explanations",
    "Emotional intelligence",
    "Syrian curriculum aligned",
];

// Liveness / service info
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(ServiceInfo {
        status: "online",
        service: "Syrian Math Tutor API",
        version: "3.0",
        features: FEATURES.to_vec(),
    })
}

// Readiness probe
pub async fn health_check(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthStatus {
        status: "healthy",
        api_key_configured: data.config.api_key_configured(),
        endpoint: data.config.api_url.clone(),
    })
}

// Solve a problem given as text, as an image, or both
pub async fn solve(
    data: web::Data<AppState>,
    MultipartForm(form): MultipartForm<SolveForm>,
) -> Result<HttpResponse, TutorError> {
    let request_id = Uuid::new_v4();

    let problem_text = form
        .problem_text
        .map(|t| t.into_inner())
        .filter(|t| !t.trim().is_empty());

    // An empty file input with no filename means "no image selected"
    let image = match form.image {
        Some(upload)
            if upload.data.is_empty()
                && upload.file_name.as_deref().map_or(true, str::is_empty) =>
        {
            None
        }
        Some(upload) => {
            let mime = upload.content_type.as_ref().map(|m| m.to_string());
            Some(ImagePayload::new(upload.data, mime.as_deref())?)
        }
        None => None,
    };

    info!(
        "[{}] Solve request (text: {}, image: {})",
        request_id,
        problem_text.is_some(),
        image.as_ref().map_or("none", |i| i.mime_type())
    );

    let messages = build_messages(problem_text.as_deref(), image.as_ref(), Vec::new())?;

    let completion = data.model.solve(&messages).await.map_err(|e| {
        error!("[{}] Solve failed: {}", request_id, e);
        e
    })?;

    info!("[{}] Solved with {}", request_id, completion.model);

    Ok(HttpResponse::Ok().json(SolveResponse {
        success: true,
        solution: completion.text,
        model: completion.model,
        usage: completion.usage,
        metadata: SolveMetadata {
            has_image: image.is_some(),
            has_text: problem_text.is_some(),
            teaching_mode: "adaptive",
        },
    }))
}

// Continue a conversation; accepts urlencoded or multipart forms
pub async fn chat(
    data: web::Data<AppState>,
    form: Either<web::Form<ChatForm>, MultipartForm<ChatMultipartForm>>,
) -> Result<HttpResponse, TutorError> {
    let request_id = Uuid::new_v4();

    let form = match form {
        Either::Left(form) => form.into_inner(),
        Either::Right(MultipartForm(form)) => ChatForm::from(form),
    };

    let message = form
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| TutorError::invalid_input("message is required"))?;

    let history = parse_history(form.conversation_history.as_deref());
    info!(
        "[{}] Chat request with {} prior turns",
        request_id,
        history.len()
    );

    let messages = build_messages(Some(&message), None, history)?;

    let completion = data.model.solve(&messages).await.map_err(|e| {
        error!("[{}] Chat failed: {}", request_id, e);
        e
    })?;

    Ok(HttpResponse::Ok().json(ChatResponse {
        success: true,
        response: completion.text,
        model: completion.model,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::model::TutorModel;
    use crate::tutor::prompt::{ARABIC_IMAGE_INSTRUCTION, MASTER_TUTOR_PROMPT};
    use crate::web::routes;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use mockito::{Matcher, Mock, ServerGuard};
    use serde_json::{json, Value};
    use std::time::Duration;

    const BOUNDARY: &str = "tutor-test-boundary";

    fn state(api_url: String) -> web::Data<AppState> {
        let config = Config {
            api_key: "gsk_test".into(),
            api_url,
            model: "llama-3.3-70b-versatile".into(),
            host: "127.0.0.1".into(),
            port: 0,
            timeout: Duration::from_secs(5),
            max_upload_bytes: 1024 * 1024,
        };
        let model = TutorModel::new(&config).unwrap();
        web::Data::new(AppState { config, model })
    }

    async fn provider_replying(body: &str, expected: Matcher) -> (ServerGuard, Mock) {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("authorization", "Bearer gsk_test")
            .match_body(expected)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;
        (server, mock)
    }

    fn ok_body(text: &str) -> String {
        json!({
            "model": "llama-3.3-70b-versatile",
            "choices": [{ "message": { "role": "assistant", "content": text } }],
            "usage": { "total_tokens": 42 }
        })
        .to_string()
    }

    // (name, filename and content type for file parts, value)
    fn multipart(parts: &[(&str, Option<(&str, &str)>, &str)]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, file, value) in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match file {
                Some((filename, content_type)) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, filename, content_type
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                ),
            }
            body.extend_from_slice(value.as_bytes());
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn multipart_request(uri: &str, body: Vec<u8>) -> test::TestRequest {
        test::TestRequest::post()
            .uri(uri)
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(body)
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .configure(|cfg| routes::configure(cfg, 1024 * 1024)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn index_reports_service_info() {
        let app = app!(state("http://127.0.0.1:9/".into()));
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "online");
        assert_eq!(body["service"], "Syrian Math Tutor API");
        assert_eq!(body["version"], "3.0");
        assert_eq!(body["features"].as_array().unwrap().len(), 6);
    }

    #[actix_web::test]
    async fn health_reports_key_and_endpoint() {
        let app = app!(state("https://api.example.test/v1/chat/completions".into()));
        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({
                "status": "healthy",
                "api_key_configured": true,
                "endpoint": "https://api.example.test/v1/chat/completions"
            })
        );
    }

    #[actix_web::test]
    async fn chat_without_history_sends_directive_and_returns_text() {
        let (server, mock) = provider_replying(
            &ok_body("x = 4"),
            Matcher::PartialJson(json!({
                "messages": [
                    { "role": "system", "content": MASTER_TUTOR_PROMPT },
                    {
                        "role": "user",
                        "content": "2x+5=13\n\nProvide adaptive teaching based on the problem difficulty."
                    }
                ],
                "temperature": 0.7,
                "max_tokens": 2000
            })),
        )
        .await;
        let app = app!(state(server.url()));

        let req = test::TestRequest::post()
            .uri("/chat")
            .set_form([("message", "2x+5=13")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        mock.assert_async().await;
        assert_eq!(
            body,
            json!({ "success": true, "response": "x = 4", "model": "llama-3.3-70b-versatile" })
        );
    }

    #[actix_web::test]
    async fn chat_with_malformed_history_proceeds_without_it() {
        // The new turn sits right after the system prompt: nothing was spliced in
        let (server, mock) = provider_replying(
            &ok_body("ok"),
            Matcher::PartialJson(json!({
                "messages": [
                    { "role": "system", "content": MASTER_TUTOR_PROMPT },
                    {
                        "role": "user",
                        "content": "and 3+3?\n\nProvide adaptive teaching based on the problem difficulty."
                    }
                ]
            })),
        )
        .await;
        let app = app!(state(server.url()));

        let req = test::TestRequest::post()
            .uri("/chat")
            .set_form([("message", "and 3+3?"), ("conversation_history", "[{oops")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        mock.assert_async().await;
    }

    #[actix_web::test]
    async fn chat_accepts_long_urlencoded_history_verbatim() {
        // Three long tutor answers push the form well past actix's 16 KiB default
        let answer = "Balance both sides. ".repeat(300);
        let history = json!([
            { "role": "user", "name": "sami", "content": "2x+5=13" },
            { "role": "assistant", "content": answer },
            { "role": "user", "content": [
                { "type": "image_url", "image_url": { "url": "data:image/png;base64,AAAA", "detail": "high" } }
            ] },
            { "role": "assistant", "content": answer },
            { "role": "assistant", "content": answer }
        ]);
        let history_raw = history.to_string();
        assert!(history_raw.len() > 16 * 1024);

        let mut expected = vec![json!({ "role": "system", "content": MASTER_TUTOR_PROMPT })];
        expected.extend(history.as_array().unwrap().iter().cloned());
        expected.push(json!({
            "role": "user",
            "content": "and 3+3?\n\nProvide adaptive teaching based on the problem difficulty."
        }));
        let (server, mock) = provider_replying(
            &ok_body("6"),
            Matcher::PartialJson(json!({ "messages": expected })),
        )
        .await;
        let app = app!(state(server.url()));

        let req = test::TestRequest::post()
            .uri("/chat")
            .set_form([
                ("message", "and 3+3?"),
                ("conversation_history", history_raw.as_str()),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        mock.assert_async().await;
    }

    #[actix_web::test]
    async fn chat_splices_history_from_multipart_form() {
        let (server, mock) = provider_replying(
            &ok_body("6"),
            Matcher::PartialJson(json!({
                "messages": [
                    { "role": "system", "content": MASTER_TUTOR_PROMPT },
                    { "role": "user", "content": "2+2?" },
                    { "role": "assistant", "content": "4" },
                    {
                        "role": "user",
                        "content": "and 3+3?\n\nProvide adaptive teaching based on the problem difficulty."
                    }
                ]
            })),
        )
        .await;
        let app = app!(state(server.url()));

        let history = r#"[{"role":"user","content":"2+2?"},{"role":"assistant","content":"4"}]"#;
        let body = multipart(&[
            ("message", None, "and 3+3?"),
            ("conversation_history", None, history),
        ]);
        let resp = test::call_service(&app, multipart_request("/chat", body).to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
        mock.assert_async().await;
    }

    #[actix_web::test]
    async fn chat_without_message_is_invalid_input() {
        let app = app!(state("http://127.0.0.1:9/".into()));
        let req = test::TestRequest::post()
            .uri("/chat")
            .set_form([("conversation_history", "[]")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "invalid_input");
    }

    #[actix_web::test]
    async fn solve_without_text_or_image_is_invalid_input() {
        let app = app!(state("http://127.0.0.1:9/".into()));
        let body = multipart(&[("problem_text", None, "")]);
        let resp = test::call_service(&app, multipart_request("/solve", body).to_request()).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "invalid_input");
        assert_eq!(body["detail"], "Either problem_text or image must be provided");
    }

    #[actix_web::test]
    async fn solve_text_returns_solution_and_metadata() {
        let (server, mock) = provider_replying(&ok_body("x = 4"), Matcher::Any).await;
        let app = app!(state(server.url()));

        let body = multipart(&[("problem_text", None, "2x+5=13")]);
        let resp = test::call_service(&app, multipart_request("/solve", body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        mock.assert_async().await;
        assert_eq!(body["success"], true);
        assert_eq!(body["solution"], "x = 4");
        assert_eq!(body["model"], "llama-3.3-70b-versatile");
        assert_eq!(body["usage"], json!({ "total_tokens": 42 }));
        assert_eq!(
            body["metadata"],
            json!({ "has_image": false, "has_text": true, "teaching_mode": "adaptive" })
        );
    }

    #[actix_web::test]
    async fn solve_image_with_arabic_text_embeds_fixed_instruction() {
        let (server, mock) = provider_replying(
            &ok_body("تمام!"),
            Matcher::PartialJson(json!({
                "messages": [
                    { "role": "system", "content": MASTER_TUTOR_PROMPT },
                    {
                        "role": "user",
                        "content": [
                            { "type": "image_url", "image_url": { "url": "data:image/png;base64,ZmFrZXBuZw==" } },
                            { "type": "text", "text": ARABIC_IMAGE_INSTRUCTION }
                        ]
                    }
                ]
            })),
        )
        .await;
        let app = app!(state(server.url()));

        let body = multipart(&[
            ("problem_text", None, "حل المسألة يا أستاذ"),
            ("image", Some(("problem.png", "image/png")), "fakepng"),
        ]);
        let resp = test::call_service(&app, multipart_request("/solve", body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        mock.assert_async().await;
        assert_eq!(body["metadata"]["has_image"], true);
        assert_eq!(body["metadata"]["has_text"], true);
    }

    #[actix_web::test]
    async fn solve_rejects_non_image_upload() {
        let app = app!(state("http://127.0.0.1:9/".into()));
        let body = multipart(&[("image", Some(("notes.pdf", "application/pdf")), "%PDF-1.7")]);
        let resp = test::call_service(&app, multipart_request("/solve", body).to_request()).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "image_processing_error");
    }

    #[actix_web::test]
    async fn empty_choices_is_upstream_protocol_error() {
        let (server, _mock) =
            provider_replying(r#"{"choices":[],"model":"m"}"#, Matcher::Any).await;
        let app = app!(state(server.url()));

        let req = test::TestRequest::post()
            .uri("/chat")
            .set_form([("message", "2x+5=13")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "upstream_protocol_error");
        assert_eq!(body["detail"], "Invalid response from AI service: no choices returned");
    }

    #[actix_web::test]
    async fn provider_failure_is_transport_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(503)
            .with_body("upstream down")
            .create_async()
            .await;
        let app = app!(state(server.url()));

        let body = multipart(&[("problem_text", None, "2x+5=13")]);
        let resp = test::call_service(&app, multipart_request("/solve", body).to_request()).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "transport_error");
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .starts_with("Error calling AI service:"));
    }
}
