pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
pub mod service;
pub mod web;

use std::sync::Arc;

use crate::{
    api::state::AppState,
    config::Settings,
    error::Result,
    repository::AnnouncementRepository,
    service::{AnnouncementRenderer, AnnouncementService, RenderOptions},
};

/// Assemble the full router (API plus widget pages) around a repository.
pub fn build_app(
    announcement_repo: Arc<dyn AnnouncementRepository>,
    settings: &Settings,
) -> Result<axum::Router> {
    let renderer = AnnouncementRenderer::new(RenderOptions {
        truncate_at: settings.display.truncate_at,
        date_format: settings.display.date_format.clone(),
    })?;

    let service = Arc::new(AnnouncementService::new(announcement_repo, renderer));
    let state = AppState::new(service);

    Ok(api::create_app(state))
}
