mod handlers;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::app::App;

pub fn create_router(app: App) -> Router {
    let api = Router::new()
        // Spreads (home screen)
        .route("/spreads", get(handlers::list_spreads))
        .route("/spread", get(handlers::get_selected_spread))
        .route("/spread", put(handlers::select_spread))
        // Card selection
        .route("/session", post(handlers::start_session))
        .route("/session", get(handlers::get_session))
        .route("/session/select", post(handlers::select_card))
        .route("/session/complete", post(handlers::complete_reading))
        // Readings
        .route("/reading", get(handlers::get_reading))
        .route("/reading/share", get(handlers::share_reading))
        // History
        .route("/history", get(handlers::list_history))
        .route("/history", delete(handlers::clear_history))
        .route("/history/stats", get(handlers::history_stats))
        .route("/history/{id}/view", post(handlers::view_history_reading))
        // Catalog
        .route("/cards/{name}", get(handlers::get_card))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(app)
}
