use actix_web::{http::StatusCode, web, App, HttpResponse, HttpServer, Responder};

use crate::{catalog, config::GatewayConfig, error::Result, gateway::Gateway, GatewayError};

pub struct AppState {
    pub gateway: Gateway,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        Ok(Self {
            gateway: Gateway::from_config(config)?,
            max_body_bytes: config.max_body_bytes,
        })
    }
}

pub fn app_config(max_body_bytes: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(
            web::scope("/api")
                .app_data(web::PayloadConfig::new(max_body_bytes))
                .route("/generate", web::post().to(generate))
                .route(
                    "/generate",
                    web::method(actix_web::http::Method::OPTIONS).to(preflight),
                )
                .route("/models", web::get().to(models)),
        );
    }
}

async fn generate(
    state: web::Data<AppState>,
    body: std::result::Result<web::Bytes, actix_web::Error>,
) -> std::result::Result<HttpResponse, GatewayError> {
    let body = body.map_err(|e| {
        log::warn!("Could not read request body: {}", e);
        if e.as_response_error().status_code() == StatusCode::PAYLOAD_TOO_LARGE {
            GatewayError::PayloadTooLarge {
                limit: state.max_body_bytes,
            }
        } else {
            GatewayError::Internal(format!("Failed to read request body: {}", e))
        }
    })?;

    let response = state.gateway.generate_from_json(&body).await?;
    Ok(HttpResponse::Ok().json(response))
}

async fn preflight() -> impl Responder {
    HttpResponse::Ok()
        .insert_header(("Access-Control-Allow-Origin", "*"))
        .insert_header(("Access-Control-Allow-Methods", "POST, OPTIONS"))
        .insert_header(("Access-Control-Allow-Headers", "Content-Type"))
        .finish()
}

async fn models() -> impl Responder {
    HttpResponse::Ok().json(catalog::categories())
}

pub async fn run(config: GatewayConfig) -> Result<()> {
    let state = web::Data::new(AppState::from_config(&config)?);
    let max_body_bytes = config.max_body_bytes;
    let address = config.bind_address();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(app_config(max_body_bytes))
    })
    .bind(&address)
    .map_err(|e| GatewayError::Config(format!("Failed to bind {}: {}", address, e)))?
    .run();

    log::info!("✅ Listening on http://{}", address);

    server.await.map_err(|e| {
        log::error!("Web server error: {}", e);
        GatewayError::Internal(format!("Web server error: {}", e))
    })
}
