use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One announcement as published by the Megaphone admin tool.
///
/// Only eligible records ever reach this type: the repository filters on
/// visibility, send status and the open/close window, so those attributes
/// are not carried here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: i64,
    pub subject: String,
    /// Already escaped for markup by Megaphone. May contain line breaks.
    pub message: String,
    pub author_name: String,
    pub author_email: String,
    pub sent_at: DateTime<Utc>,
    pub open_at: Option<DateTime<Utc>>,
    /// `None` means the announcement never closes.
    pub close_at: Option<DateTime<Utc>>,
    pub link: Option<String>,
    pub show_link_inline: bool,
    pub show_close_date: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementOrder {
    /// Most recently sent first.
    #[default]
    BySentDesc,
    /// Soonest deadline first. Announcements without a closing date go last.
    ByCloseAsc,
}

impl AnnouncementOrder {
    /// Parse the ordering keywords accepted by the widget. Anything that is
    /// not `"deadline"` falls back to send order.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.trim().to_lowercase().as_str() {
            "deadline" => AnnouncementOrder::ByCloseAsc,
            _ => AnnouncementOrder::BySentDesc,
        }
    }

    pub fn as_keyword(&self) -> &'static str {
        match self {
            AnnouncementOrder::BySentDesc => "submission",
            AnnouncementOrder::ByCloseAsc => "deadline",
        }
    }
}
