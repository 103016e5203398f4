use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{self, admin, auth, events, items, payments};
use crate::state::AppState;

const UPLOAD_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

pub fn create_routes(state: AppState) -> Router {
    let api = Router::new()
        .route("/items", post(items::create_item).get(items::list_items))
        .route(
            "/items/:id",
            put(items::update_item).delete(items::delete_item),
        )
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/user", get(auth::get_user))
        .route("/rsvps", get(auth::list_rsvps))
        .route("/admin/register", post(admin::register))
        .route("/admin/login", post(admin::login))
        .route(
            "/admin/upload-event",
            post(admin::upload_event).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT_BYTES)),
        )
        .route("/events", get(events::list_events))
        .route("/events/:event_id", delete(events::delete_event))
        .route("/events/:event_id/rsvp", post(events::rsvp))
        .route("/events/:event_id/qrcode", get(events::event_qrcode))
        .route("/pay", post(payments::pay));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer())
        .layer(create_cors_layer())
        .with_state(state)
}
