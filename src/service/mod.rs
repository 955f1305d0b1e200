pub mod announcement_renderer;

use std::sync::Arc;
use crate::domain::{resolve_audience, Announcement, AnnouncementOrder};
use crate::error::Result;
use crate::repository::AnnouncementRepository;

pub use announcement_renderer::{AnnouncementRenderer, AnnouncementView, MessageBody, RenderOptions, brief_message};

/// Options for a single widget request beyond the audience label.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayRequest {
    pub order: AnnouncementOrder,
    pub include_future: bool,
    /// Announcement whose full message should be shown.
    pub expanded: Option<i64>,
}

pub struct AnnouncementService {
    pub announcement_repo: Arc<dyn AnnouncementRepository>,
    pub renderer: AnnouncementRenderer,
}

impl AnnouncementService {
    pub fn new(announcement_repo: Arc<dyn AnnouncementRepository>, renderer: AnnouncementRenderer) -> Self {
        Self {
            announcement_repo,
            renderer,
        }
    }

    /// View data for every open announcement addressed to `audience`, in the
    /// requested order.
    pub async fn announcement_views(&self, audience: &str, request: DisplayRequest) -> Result<Vec<AnnouncementView>> {
        let records = self.fetch_for(audience, request).await?;
        Ok(self.renderer.prepare(&records, request.expanded))
    }

    async fn fetch_for(&self, audience: &str, request: DisplayRequest) -> Result<Vec<Announcement>> {
        let categories = resolve_audience(audience);
        tracing::debug!("Audience {} resolved to {:?}", audience, categories);

        self.announcement_repo
            .fetch(&categories, request.order, request.include_future)
            .await
    }
}
