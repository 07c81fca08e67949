use actix_http::Request;
use actix_web::{
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test, web, App, Error,
};
use pixelgate::{
    server::{app_config, AppState},
    GatewayConfig,
};
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

async fn setup_test_environment() -> (
    impl Service<Request, Response = ServiceResponse, Error = Error>,
    MockServer,
) {
    setup_with_config(|config| config).await
}

async fn setup_with_config(
    tweak: impl FnOnce(GatewayConfig) -> GatewayConfig,
) -> (
    impl Service<Request, Response = ServiceResponse, Error = Error>,
    MockServer,
) {
    let mock_server = MockServer::start().await;

    let config = tweak(
        GatewayConfig::new()
            .with_endpoint(format!("{}/chat/completions", mock_server.uri()))
            .with_credentials("test-key", "cus_test"),
    );
    let state = AppState::from_config(&config).unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(app_config(config.max_body_bytes)),
    )
    .await;
    (app, mock_server)
}

async fn post_generate(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    body: Value,
) -> (StatusCode, Value) {
    let req = test::TestRequest::post()
        .uri("/api/generate")
        .set_json(body)
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

#[actix_web::test]
async fn test_generate_relays_image_url() {
    let (app, mock_server) = setup_test_environment().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("customerid", "cus_test"))
        .and(body_json(json!({
            "model": "replicate/black-forest-labs/flux-1.1-pro",
            "messages": [{
                "role": "user",
                "content": "a red fox, high quality, detailed, square composition, balanced framing"
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "https://x.com/a.png" } }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, body) = post_generate(&app, json!({ "prompt": "a red fox" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["imageUrl"], "https://x.com/a.png");
    assert_eq!(body["originalPrompt"], "a red fox");
    assert_eq!(
        body["settings"],
        json!({
            "style": "",
            "aspectRatio": "square",
            "quality": "standard",
            "model": "replicate/black-forest-labs/flux-1.1-pro"
        })
    );
    assert!(body["timestamp"].as_i64().unwrap() > 0);
}

#[actix_web::test]
async fn test_url_field_response_shape() {
    let (app, mock_server) = setup_test_environment().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "url": "https://x.com/b.jpg" })))
        .mount(&mock_server)
        .await;

    let (status, body) = post_generate(
        &app,
        json!({ "prompt": "neon alley", "style": "cyberpunk", "aspectRatio": "widescreen", "quality": "high" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imageUrl"], "https://x.com/b.jpg");
    assert_eq!(
        body["prompt"],
        "neon alley, cyberpunk, neon, futuristic, sci-fi, ultra high quality, 8k resolution, masterpiece, cinematic wide shot, panoramic view"
    );
}

#[actix_web::test]
async fn test_blank_prompt_is_rejected() {
    let (app, mock_server) = setup_test_environment().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    for body in [json!({}), json!({ "prompt": "   ", "style": "fantasy" })] {
        let (status, body) = post_generate(&app, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Prompt is required" }));
    }
}

#[actix_web::test]
async fn test_upstream_server_error_is_retryable() {
    let (app, mock_server) = setup_test_environment().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&mock_server)
        .await;

    let (status, body) = post_generate(&app, json!({ "prompt": "fox" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate image");
    assert_eq!(body["details"], "API returned 503: overloaded");
    assert_eq!(body["retryable"], true);
}

#[actix_web::test]
async fn test_upstream_not_found_is_not_retryable() {
    let (app, mock_server) = setup_test_environment().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such model"))
        .mount(&mock_server)
        .await;

    let (status, body) = post_generate(&app, json!({ "prompt": "fox", "model": "ghost" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["retryable"], false);
}

#[actix_web::test]
async fn test_upstream_rejection_keeps_raw_body() {
    let (app, mock_server) = setup_test_environment().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"bad key"}"#))
        .mount(&mock_server)
        .await;

    let (status, body) = post_generate(&app, json!({ "prompt": "fox" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Failed to generate image");
    assert_eq!(body["details"], r#"API returned 401: {"error":"bad key"}"#);
    assert_eq!(body["retryable"], false);
}

#[actix_web::test]
async fn test_upstream_bad_gateway_keeps_raw_body() {
    let (app, mock_server) = setup_test_environment().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<h1>Bad Gateway</h1>"))
        .mount(&mock_server)
        .await;

    let (status, body) = post_generate(&app, json!({ "prompt": "fox" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["details"], "API returned 502: <h1>Bad Gateway</h1>");
    assert_eq!(body["retryable"], true);
}

#[actix_web::test]
async fn test_rate_limited_upstream_is_retryable() {
    let (app, mock_server) = setup_test_environment().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&mock_server)
        .await;

    let (status, body) = post_generate(&app, json!({ "prompt": "fox" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "API returned 429: slow down");
    assert_eq!(body["retryable"], true);
}

#[actix_web::test]
async fn test_non_json_success_body_is_internal_error() {
    let (app, mock_server) = setup_test_environment().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let (status, body) = post_generate(&app, json!({ "prompt": "fox" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert_eq!(body["retryable"], true);
}

#[actix_web::test]
async fn test_missing_url_returns_raw_payload() {
    let (app, mock_server) = setup_test_environment().await;

    let upstream = json!({ "choices": [{ "message": { "content": "I refuse." } }] });
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream.clone()))
        .mount(&mock_server)
        .await;

    let (status, body) = post_generate(&app, json!({ "prompt": "fox" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "No image URL in response");
    assert_eq!(body["responseData"], upstream);
}

#[actix_web::test]
async fn test_malformed_request_body_is_internal_error() {
    let (app, _mock_server) = setup_test_environment().await;

    let req = test::TestRequest::post()
        .uri("/api/generate")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"prompt\":")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Internal server error");
    assert_eq!(body["retryable"], true);
}

#[actix_web::test]
async fn test_blank_prompt_with_odd_typed_option_is_rejected() {
    let (app, mock_server) = setup_test_environment().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    for body in [
        json!({ "prompt": "  ", "style": 5 }),
        json!({ "prompt": 42 }),
        json!({ "prompt": "", "aspectRatio": { "w": 16, "h": 9 } }),
    ] {
        let (status, body) = post_generate(&app, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Prompt is required" }));
    }
}

#[actix_web::test]
async fn test_odd_typed_option_is_echoed() {
    let (app, mock_server) = setup_test_environment().await;

    Mock::given(method("POST"))
        .and(body_json(json!({
            "model": "replicate/black-forest-labs/flux-1.1-pro",
            "messages": [{
                "role": "user",
                "content": "fox, high quality, detailed, square composition, balanced framing"
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "url": "https://x.com/fox.png" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, body) = post_generate(&app, json!({ "prompt": "fox", "style": 5 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imageUrl"], "https://x.com/fox.png");
    assert_eq!(body["settings"]["style"], 5);
}

#[actix_web::test]
async fn test_long_prompt_fits_default_body_limit() {
    let (app, mock_server) = setup_test_environment().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "url": "https://x.com/long.png" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let prompt = "a".repeat(300_000);
    let (status, body) = post_generate(&app, json!({ "prompt": prompt })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imageUrl"], "https://x.com/long.png");
    assert_eq!(body["originalPrompt"].as_str().unwrap().len(), 300_000);
}

#[actix_web::test]
async fn test_oversize_body_is_json_413() {
    let (app, mock_server) = setup_with_config(|config| config.with_max_body_bytes(1024)).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (status, body) = post_generate(&app, json!({ "prompt": "b".repeat(4096) })).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "Request body too large");
    assert_eq!(body["details"], "Request body exceeds the 1024 byte limit");
    assert_eq!(body["retryable"], false);
}

#[actix_web::test]
async fn test_preflight_headers() {
    let (app, _mock_server) = setup_test_environment().await;

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/generate")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let headers = resp.headers();
    assert_eq!(headers.get("Access-Control-Allow-Origin").unwrap(), "*");
    assert_eq!(headers.get("Access-Control-Allow-Methods").unwrap(), "POST, OPTIONS");
    assert_eq!(headers.get("Access-Control-Allow-Headers").unwrap(), "Content-Type");
}

#[actix_web::test]
async fn test_models_catalog() {
    let (app, _mock_server) = setup_test_environment().await;

    let req = test::TestRequest::get().uri("/api/models").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let categories = body.as_array().unwrap();
    assert_eq!(categories.len(), 4);
    assert_eq!(categories[0]["provider"], "Replicate");
    assert_eq!(categories[0]["models"][0]["id"], "replicate/black-forest-labs/flux-1.1-pro");
    assert_eq!(categories[0]["models"][0]["available"], true);
    assert_eq!(categories[1]["models"][0]["badgeColor"], "from-green-500 to-emerald-500");
}
