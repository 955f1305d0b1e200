use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    api::state::AppState,
    error::AppError,
    service::DisplayRequest,
    web::{
        markup::show_announcements_with,
        templates::{AnnouncementsPageTemplate, HtmlTemplate, UnavailableTemplate},
    },
};

#[derive(Debug, Default, Deserialize)]
pub struct WidgetQuery {
    pub expand: Option<i64>,
}

impl WidgetQuery {
    fn display_request(&self) -> DisplayRequest {
        DisplayRequest {
            expanded: self.expand,
            ..Default::default()
        }
    }
}

// GET /announcements/:audience
pub async fn announcements_fragment(
    State(state): State<AppState>,
    Path(audience): Path<String>,
    Query(query): Query<WidgetQuery>,
) -> Response {
    match show_announcements_with(&state.announcement_service, &audience, query.display_request()).await {
        Ok(html) => Html(html).into_response(),
        Err(err) => unavailable(err),
    }
}

// GET /announcements/:audience/page
pub async fn announcements_page(
    State(state): State<AppState>,
    Path(audience): Path<String>,
    Query(query): Query<WidgetQuery>,
) -> Response {
    match show_announcements_with(&state.announcement_service, &audience, query.display_request()).await {
        Ok(announcements) => HtmlTemplate(AnnouncementsPageTemplate {
            audience,
            announcements,
        })
        .into_response(),
        Err(err) => unavailable(err),
    }
}

/// Nothing partial is shown when the store cannot be read.
fn unavailable(err: AppError) -> Response {
    let status = match err {
        AppError::StoreConnection(ref msg) => {
            tracing::error!("Store connection error: {}", msg);
            StatusCode::SERVICE_UNAVAILABLE
        }
        ref other => {
            tracing::error!("Failed to load announcements: {}", other);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, HtmlTemplate(UnavailableTemplate)).into_response()
}
