//! API server — builds the router and starts the HTTP and metrics
//! listeners.

use crate::rest::AppState;
use crate::swagger::ApiDoc;
use crate::{campaign_rest, contact_rest, draft_rest, followup_rest, rest, template_rest};
use axum::routing::{get, post};
use axum::Router;
use outreach_channels::IdentityVerifier;
use outreach_core::AppConfig;
use outreach_engine::OutreachEngine;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Main API server for the outreach REST surface.
pub struct ApiServer {
    config: AppConfig,
    state: AppState,
}

impl ApiServer {
    pub fn new(
        config: AppConfig,
        engine: Arc<OutreachEngine>,
        verifier: Arc<dyn IdentityVerifier>,
    ) -> Self {
        let state = AppState {
            engine,
            verifier,
            node_id: config.node_id.clone(),
            start_time: Instant::now(),
        };
        Self { config, state }
    }

    /// Build the full application router. Exposed separately so tests can
    /// drive it without binding a socket.
    pub fn router(&self) -> Router {
        Router::new()
            // Operational endpoints
            .route("/health", get(rest::health_check))
            .route("/ready", get(rest::readiness))
            .route("/live", get(rest::liveness))
            // Templates
            .route(
                "/v1/templates",
                get(template_rest::list_templates).post(template_rest::save_template),
            )
            .route(
                "/v1/templates/:id",
                get(template_rest::get_template).delete(template_rest::delete_template),
            )
            // Contacts
            .route(
                "/v1/contacts",
                get(contact_rest::list_contacts).post(contact_rest::create_contact),
            )
            .route("/v1/contacts/:id", get(contact_rest::get_contact))
            .route(
                "/v1/contacts/:id/activities",
                get(contact_rest::contact_activities),
            )
            .route("/v1/contacts/:id/notes", post(contact_rest::add_note))
            .route(
                "/v1/contacts/:id/notes/:note_id",
                axum::routing::put(contact_rest::edit_note).delete(contact_rest::delete_note),
            )
            .route("/v1/contacts/:id/enrich", post(contact_rest::enrich_contact))
            // Drafts
            .route("/v1/drafts/batch", post(draft_rest::generate_batch))
            // Campaigns & outcomes
            .route(
                "/v1/campaigns",
                get(campaign_rest::list_campaigns).post(campaign_rest::create_campaign),
            )
            .route("/v1/campaigns/:id", get(campaign_rest::get_campaign))
            .route(
                "/v1/campaigns/:id/entries/:index/outcome",
                post(campaign_rest::set_outcome),
            )
            // Follow-ups
            .route("/v1/followups/draft", post(followup_rest::draft_follow_up))
            .route("/v1/followups/send", post(followup_rest::send_follow_up))
            // OpenAPI docs
            .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
            // Middleware
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Start the HTTP server. Blocks until shutdown.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let app = self.router();
        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the Prometheus metrics exporter on its own port.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
        let handle = builder
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install_recorder()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");

        // Keep the handle alive
        std::mem::forget(handle);
        Ok(())
    }
}
