use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::AppConfig;
use crate::routes::{item_routes, system_routes};
use crate::state::item::ItemStore;

/// Build the complete Axum application:
/// - /create, /read, /update, /delete   (item operations)
/// - /system                            (alive + version)
///
/// The same `store` backs every route.
pub fn build_app(store: ItemStore, cfg: AppConfig) -> Router {
    Router::new()
        .nest("/system", system_routes::routes(&cfg, store.clone()))
        .merge(item_routes::routes(store))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
