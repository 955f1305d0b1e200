//! Writes Megaphone rows into a local database.
//!
//! Production data is owned by the Megaphone admin tool; this is only for
//! seeding development databases and test stores.

use chrono::{DateTime, Utc};
use sqlx::AnyPool;

use crate::error::{AppError, Result};

#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub id: i64,
    pub author_id: i64,
    pub subject: String,
    pub message: String,
    pub sent_at: DateTime<Utc>,
    pub visible: bool,
    pub status: String,
    pub open_at: Option<DateTime<Utc>>,
    pub close_at: Option<DateTime<Utc>>,
    pub link: Option<String>,
    pub show_link: bool,
    pub show_close: bool,
    pub category_ids: Vec<i64>,
}

impl NewAnnouncement {
    /// A visible, sent announcement with no window, link or categories.
    pub fn sent(id: i64, author_id: i64, subject: &str, message: &str, sent_at: DateTime<Utc>) -> Self {
        Self {
            id,
            author_id,
            subject: subject.to_string(),
            message: message.to_string(),
            sent_at,
            visible: true,
            status: "sent".to_string(),
            open_at: None,
            close_at: None,
            link: None,
            show_link: false,
            show_close: false,
            category_ids: Vec::new(),
        }
    }

    pub fn in_categories(mut self, category_ids: &[i64]) -> Self {
        self.category_ids = category_ids.to_vec();
        self
    }
}

pub struct Seeder {
    pool: AnyPool,
}

impl Seeder {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }

    pub async fn user(&self, user_id: i64, realname: &str, email: &str) -> Result<()> {
        sqlx::query("INSERT INTO mp_users (user_id, realname, email) VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(realname.to_string())
            .bind(email.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    pub async fn category(&self, id: i64, name: &str) -> Result<()> {
        sqlx::query("INSERT INTO mp_announce_categories (id, category) VALUES (?, ?)")
            .bind(id)
            .bind(name.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    pub async fn announcement(&self, announcement: &NewAnnouncement) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO mp_messages (id, user_id, subject, message, sent, visible, status)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(announcement.id)
        .bind(announcement.author_id)
        .bind(announcement.subject.clone())
        .bind(announcement.message.clone())
        .bind(announcement.sent_at.timestamp())
        .bind(if announcement.visible { 1i64 } else { 0i64 })
        .bind(announcement.status.clone())
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO mp_messages_announcedata (
                message_id, open_date, close_date, announce_link, show_link, show_close
            ) VALUES (?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(announcement.id)
        .bind(announcement.open_at.map(|dt| dt.timestamp()))
        .bind(announcement.close_at.map(|dt| dt.timestamp()))
        .bind(announcement.link.clone())
        .bind(if announcement.show_link { 1i64 } else { 0i64 })
        .bind(if announcement.show_close { 1i64 } else { 0i64 })
        .execute(&mut *tx)
        .await?;

        for cat_id in &announcement.category_ids {
            sqlx::query("INSERT INTO mp_messages_announcecats (message_id, cat_id) VALUES (?, ?)")
                .bind(announcement.id)
                .bind(*cat_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
