use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    any::{AnyPoolOptions, AnyRow},
    Any, AnyConnection, AnyPool, Decode, FromRow, Row, Type, ValueRef,
};

use crate::{
    config::DatabaseConfig,
    domain::{dedup_categories, Announcement, AnnouncementOrder},
    error::{AppError, Result},
    repository::AnnouncementRepository,
};

const LIKE_ESCAPE: char = '!';

struct AnnouncementRow {
    id: i64,
    subject: String,
    message: String,
    realname: String,
    email: String,
    sent: i64,
    open_date: Option<i64>,
    close_date: Option<i64>,
    announce_link: Option<String>,
    show_link: i64,
    show_close: i64,
}

// The `Any` driver refuses to decode SQL NULL into `Option<T>`, so nullable
// columns are checked by hand before decoding.
impl<'r> FromRow<'r, AnyRow> for AnnouncementRow {
    fn from_row(row: &'r AnyRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            subject: row.try_get("subject")?,
            message: row.try_get("message")?,
            realname: row.try_get("realname")?,
            email: row.try_get("email")?,
            sent: row.try_get("sent")?,
            open_date: nullable(row, "open_date")?,
            close_date: nullable(row, "close_date")?,
            announce_link: nullable(row, "announce_link")?,
            show_link: row.try_get("show_link")?,
            show_close: row.try_get("show_close")?,
        })
    }
}

fn nullable<'r, T>(row: &'r AnyRow, column: &str) -> sqlx::Result<Option<T>>
where
    T: Decode<'r, Any> + Type<Any>,
{
    if row.try_get_raw(column)?.is_null() {
        return Ok(None);
    }
    row.try_get(column).map(Some)
}

/// Reads announcements straight out of a Megaphone database.
pub struct MegaphoneAnnouncementRepository {
    pool: AnyPool,
}

impl MegaphoneAnnouncementRepository {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }

    /// Build a repository from connection settings. The pool is lazy, so an
    /// unreachable store only surfaces when a request acquires a connection.
    pub fn connect(config: &DatabaseConfig) -> Result<Self> {
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect_lazy(&config.connection_url())
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self::new(pool))
    }

    fn row_to_announcement(row: AnnouncementRow) -> Result<Announcement> {
        Ok(Announcement {
            id: row.id,
            subject: row.subject,
            message: row.message,
            author_name: row.realname,
            author_email: row.email,
            sent_at: Self::timestamp(row.sent)?,
            open_at: row.open_date.map(Self::timestamp).transpose()?,
            close_at: row.close_date.map(Self::timestamp).transpose()?,
            link: row.announce_link.filter(|link| !link.trim().is_empty()),
            show_link_inline: row.show_link != 0,
            show_close_date: row.show_close != 0,
        })
    }

    fn timestamp(secs: i64) -> Result<DateTime<Utc>> {
        DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| AppError::Database(format!("Invalid timestamp: {}", secs)))
    }

    async fn acquire(&self) -> Result<sqlx::pool::PoolConnection<sqlx::Any>> {
        self.pool
            .acquire()
            .await
            .map_err(|e| AppError::StoreConnection(e.to_string()))
    }

    async fn lookup_category_id(conn: &mut AnyConnection, name: &str) -> Result<Option<i64>> {
        let pattern = escape_like(name);

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id
            FROM mp_announce_categories
            WHERE LOWER(category) LIKE LOWER(?) ESCAPE '!'
            ORDER BY id
            LIMIT 1
            "#
        )
        .bind(pattern)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(id)
    }

    fn announcement_query(id_count: usize, order: AnnouncementOrder, include_future: bool) -> String {
        let placeholders = vec!["?"; id_count].join(", ");

        let mut sql = format!(
            r#"
            SELECT m.id AS id, m.subject AS subject, m.message AS message,
                   u.realname AS realname, u.email AS email, m.sent AS sent,
                   md.open_date AS open_date, md.close_date AS close_date,
                   md.announce_link AS announce_link,
                   md.show_link AS show_link, md.show_close AS show_close
            FROM mp_messages AS m
            INNER JOIN mp_messages_announcedata AS md ON md.message_id = m.id
            INNER JOIN mp_users AS u ON u.user_id = m.user_id
            WHERE EXISTS (
                SELECT 1 FROM mp_messages_announcecats AS mc
                WHERE mc.message_id = m.id AND mc.cat_id IN ({})
            )
            AND m.visible = 1
            AND m.status = 'sent'
            AND (md.close_date IS NULL OR md.close_date > ?)
            "#,
            placeholders
        );

        if !include_future {
            sql.push_str(" AND (md.open_date IS NULL OR md.open_date <= ?)");
        }

        match order {
            AnnouncementOrder::BySentDesc => sql.push_str(" ORDER BY m.sent DESC, m.id DESC"),
            AnnouncementOrder::ByCloseAsc => sql.push_str(
                " ORDER BY CASE WHEN md.close_date IS NULL THEN 1 ELSE 0 END, md.close_date ASC, m.id ASC",
            ),
        }

        sql
    }
}

/// Escape `LIKE` wildcards so a category name only ever matches itself.
pub fn escape_like(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for c in name.chars() {
        if c == LIKE_ESCAPE || c == '_' || c == '%' {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl AnnouncementRepository for MegaphoneAnnouncementRepository {
    async fn find_category_id(&self, name: &str) -> Result<Option<i64>> {
        let mut conn = self.acquire().await?;
        Self::lookup_category_id(&mut *conn, name).await
    }

    async fn fetch_at(
        &self,
        categories: &[String],
        order: AnnouncementOrder,
        include_future: bool,
        now: DateTime<Utc>,
    ) -> Result<Vec<Announcement>> {
        if categories.is_empty() {
            return Ok(Vec::new());
        }

        // Held until the end of this call, error paths included.
        let mut conn = self.acquire().await?;

        let mut category_ids: Vec<i64> = Vec::new();
        for name in dedup_categories(categories) {
            match Self::lookup_category_id(&mut *conn, &name).await? {
                Some(id) if !category_ids.contains(&id) => category_ids.push(id),
                Some(_) => {}
                None => tracing::debug!("Skipping unknown announcement category: {}", name),
            }
        }

        if category_ids.is_empty() {
            tracing::debug!("No known categories among {:?}", categories);
            return Ok(Vec::new());
        }

        let sql = Self::announcement_query(category_ids.len(), order, include_future);
        let now_ts = now.timestamp();

        let mut query = sqlx::query_as::<_, AnnouncementRow>(&sql);
        for id in &category_ids {
            query = query.bind(*id);
        }
        query = query.bind(now_ts);
        if !include_future {
            query = query.bind(now_ts);
        }

        let rows = query
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut seen = HashSet::new();
        let announcements = rows
            .into_iter()
            .filter(|row| seen.insert(row.id))
            .map(Self::row_to_announcement)
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            "Fetched {} announcements for categories {:?} ({})",
            announcements.len(),
            categories,
            order.as_keyword()
        );

        Ok(announcements)
    }
}
