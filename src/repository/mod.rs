use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::domain::*;
use crate::error::Result;

pub mod announcement_repository;
pub mod fixtures;

pub use announcement_repository::{escape_like, MegaphoneAnnouncementRepository};

/// Read access to published announcements.
#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    /// Look up a category id by exact, case-insensitive name.
    async fn find_category_id(&self, name: &str) -> Result<Option<i64>>;

    /// Eligible announcements in any of `categories`, evaluated against `now`.
    async fn fetch_at(
        &self,
        categories: &[String],
        order: AnnouncementOrder,
        include_future: bool,
        now: DateTime<Utc>,
    ) -> Result<Vec<Announcement>>;

    async fn fetch(
        &self,
        categories: &[String],
        order: AnnouncementOrder,
        include_future: bool,
    ) -> Result<Vec<Announcement>> {
        self.fetch_at(categories, order, include_future, Utc::now()).await
    }
}
