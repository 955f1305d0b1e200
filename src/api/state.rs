use std::sync::Arc;
use crate::service::AnnouncementService;

#[derive(Clone)]
pub struct AppState {
    pub announcement_service: Arc<AnnouncementService>,
}

impl AppState {
    pub fn new(announcement_service: Arc<AnnouncementService>) -> Self {
        Self {
            announcement_service,
        }
    }
}
