pub mod markup;
pub mod templates;
pub mod widget;

use axum::{
    Router,
    routing::get,
};
use crate::api::state::AppState;

pub fn create_web_routes() -> Router<AppState> {
    Router::new()
        // Embeddable fragment and a standalone page around it
        .route("/announcements/:audience", get(widget::announcements_fragment))
        .route("/announcements/:audience/page", get(widget::announcements_page))
}
