use chrono::{format::{Item, StrftimeItems}, DateTime, Datelike, Utc};
use serde::Serialize;

use crate::{
    domain::Announcement,
    error::{AppError, Result},
};

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Messages longer than this many characters get a brief/full pair.
    pub truncate_at: usize,
    /// `chrono` strftime format used for every displayed date, plus `%o` for
    /// the day's ordinal suffix ("st", "nd", "rd", "th").
    pub date_format: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            truncate_at: 300,
            date_format: "%-d%o %B %Y".to_string(),
        }
    }
}

/// Everything the presentation layer needs to draw one announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnouncementView {
    pub id: i64,
    pub subject: String,
    pub link: Option<LinkView>,
    pub sent: String,
    pub author_name: String,
    pub author_email: String,
    pub body: MessageBody,
    pub closing_date: Option<String>,
    /// Whether the full message is the one on show.
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkView {
    pub url: String,
    pub placement: LinkPlacement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkPlacement {
    /// Small "(link)" next to the subject.
    Inline,
    /// The URL itself on its own line under the subject.
    Line,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageBody {
    Full { text: String },
    Truncated { brief: String, full: String },
}

impl MessageBody {
    pub fn is_truncated(&self) -> bool {
        matches!(self, MessageBody::Truncated { .. })
    }
}

/// Turns fetched announcements into view data.
#[derive(Debug, Clone)]
pub struct AnnouncementRenderer {
    options: RenderOptions,
}

impl AnnouncementRenderer {
    pub fn new(options: RenderOptions) -> Result<Self> {
        let format = expand_ordinal(&options.date_format, "th");
        if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
            return Err(AppError::Config(format!(
                "Invalid date format: {}",
                options.date_format
            )));
        }

        Ok(Self { options })
    }

    /// Build view data for each record, keeping the repository's order.
    /// Only the announcement whose id matches `expanded` starts expanded.
    pub fn prepare(&self, records: &[Announcement], expanded: Option<i64>) -> Vec<AnnouncementView> {
        records
            .iter()
            .map(|record| self.prepare_one(record, expanded == Some(record.id)))
            .collect()
    }

    fn prepare_one(&self, record: &Announcement, expanded: bool) -> AnnouncementView {
        let link = record.link.as_ref().map(|url| LinkView {
            url: url.clone(),
            placement: if record.show_link_inline {
                LinkPlacement::Line
            } else {
                LinkPlacement::Inline
            },
        });

        let body = match brief_message(&record.message, self.options.truncate_at) {
            Some(brief) => MessageBody::Truncated {
                brief,
                full: record.message.clone(),
            },
            None => MessageBody::Full {
                text: record.message.clone(),
            },
        };

        let closing_date = record
            .close_at
            .filter(|_| record.show_close_date)
            .map(|close_at| self.format_date(close_at));

        AnnouncementView {
            id: record.id,
            subject: record.subject.clone(),
            link,
            sent: self.format_date(record.sent_at),
            author_name: record.author_name.clone(),
            author_email: record.author_email.clone(),
            expanded: expanded && body.is_truncated(),
            body,
            closing_date,
        }
    }

    fn format_date(&self, at: DateTime<Utc>) -> String {
        at.format(&expand_ordinal(&self.options.date_format, ordinal(at.day())))
            .to_string()
    }
}

/// English ordinal suffix for a day of the month.
pub fn ordinal(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Substitute `%o` in a strftime format, leaving every other directive
/// (including `%%`) for chrono.
fn expand_ordinal(format: &str, suffix: &str) -> String {
    let mut expanded = String::with_capacity(format.len());
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            expanded.push(c);
            continue;
        }
        match chars.next() {
            Some('o') => expanded.push_str(suffix),
            Some(next) => {
                expanded.push('%');
                expanded.push(next);
            }
            None => expanded.push('%'),
        }
    }
    expanded
}

/// The shortened form of `message`, or `None` when it fits in `truncate_at`
/// characters.
///
/// The message is cut at `truncate_at` characters and then trimmed back to
/// the last whitespace before the cut, so no word is ever split. A prefix
/// with no whitespace at all yields an empty brief.
pub fn brief_message(message: &str, truncate_at: usize) -> Option<String> {
    if message.chars().count() <= truncate_at {
        return None;
    }

    let cut: String = message.chars().take(truncate_at).collect();
    let brief = match cut.rfind(char::is_whitespace) {
        Some(boundary) => cut[..boundary].to_string(),
        None => String::new(),
    };

    Some(brief)
}
