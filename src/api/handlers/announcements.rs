use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    api::state::AppState,
    domain::{resolve_audience, AnnouncementOrder},
    error::Result,
    service::{AnnouncementView, DisplayRequest},
};

#[derive(Debug, Default, Deserialize)]
pub struct ListAnnouncementsQuery {
    /// "submission" (default) or "deadline".
    pub order: Option<String>,
    pub future: Option<bool>,
    pub expand: Option<i64>,
}

impl ListAnnouncementsQuery {
    pub fn display_request(&self) -> DisplayRequest {
        DisplayRequest {
            order: self
                .order
                .as_deref()
                .map(AnnouncementOrder::from_keyword)
                .unwrap_or_default(),
            include_future: self.future.unwrap_or(false),
            expanded: self.expand,
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    Path(audience): Path<String>,
    Query(params): Query<ListAnnouncementsQuery>,
) -> Result<Json<Vec<AnnouncementView>>> {
    let views = state
        .announcement_service
        .announcement_views(&audience, params.display_request())
        .await?;

    Ok(Json(views))
}

pub async fn categories(Path(audience): Path<String>) -> Json<Vec<String>> {
    Json(resolve_audience(&audience))
}
