//! Demo HTTP server.
//!
//! Mounts a health check and a `whoami` route that requires an API key, so
//! the extractor can be exercised end to end. Keys are not checked against
//! anything; any well-formed key is accepted.

use actix_web::middleware::Condition;
use actix_web::{web, App, HttpResponse, HttpServer};
use tracing::{error, info, warn};
use tracing_actix_web::TracingLogger;

use crate::auth::{ApiKey, API_KEY_SCHEME};
use crate::config::Config;
use crate::error::{AuthError, Result};

/// HTTP server wrapping the API key routes
pub struct AuthServer {
    /// Server configuration
    config: Config,
}

impl AuthServer {
    /// Create a new server with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get server configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Serve until the process receives a shutdown signal
    pub async fn run(self) -> Result<()> {
        let bind_addr = self.config.server.bind_addr();
        let request_logging = self.config.logging.enable_request_logging;

        info!(
            "Starting {} on http://{}",
            self.config.server.name, bind_addr
        );

        let mut server = HttpServer::new(move || {
            App::new()
                .wrap(Condition::new(request_logging, TracingLogger::default()))
                .configure(configure)
        });

        if let Some(workers) = self.config.server.workers {
            server = server.workers(workers);
        }

        let server = server.bind(&bind_addr).map_err(|e| {
            error!("Failed to bind to {}: {}", bind_addr, e);
            e
        })?;

        server.run().await?;

        info!("HTTP server stopped");
        Ok(())
    }
}

/// Register the server routes on an actix-web app
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/healthz", web::get().to(health))
        .route("/v1/whoami", web::get().to(whoami));
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": crate::SERVER_VERSION
    }))
}

/// Echo the (redacted) key of an authenticated request
async fn whoami(
    key: std::result::Result<ApiKey, AuthError>,
) -> std::result::Result<HttpResponse, AuthError> {
    let key = key.map_err(|err| {
        warn!(kind = err.kind(), "Rejected request: {}", err);
        err
    })?;

    info!(api_key = %key.redacted(), "Authenticated request");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "api_key": key.redacted(),
        "scheme": API_KEY_SCHEME
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{header, StatusCode};
    use actix_web::test;

    #[actix_web::test]
    async fn test_health() {
        let app = test::init_service(App::new().configure(configure)).await;

        let req = test::TestRequest::get().uri("/healthz").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], crate::SERVER_VERSION);
    }

    #[actix_web::test]
    async fn test_whoami_with_key() {
        let app = test::init_service(App::new().configure(configure)).await;

        let req = test::TestRequest::get()
            .uri("/v1/whoami")
            .insert_header(("Authorization", "ApiKey test-api-key"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["api_key"], "test****");
        assert_eq!(body["scheme"], "ApiKey");
    }

    #[actix_web::test]
    async fn test_whoami_rejections() {
        let app = test::init_service(App::new().configure(configure)).await;

        for value in [None, Some(""), Some("ApiKey"), Some("Bearer test-api-key")] {
            let mut req = test::TestRequest::get().uri("/v1/whoami");
            if let Some(value) = value {
                req = req.insert_header(("Authorization", value));
            }

            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{:?}", value);
            assert_eq!(
                resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
                "ApiKey"
            );

            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "unauthorized");
        }
    }

    #[::core::prelude::v1::test]
    fn test_new_validates_config() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(AuthServer::new(config).is_err());

        let server = AuthServer::new(Config::default()).unwrap();
        assert_eq!(server.config().server.port, 8080);
    }
}
