mod common;

use chrono::Duration;
use common::{names, now, setup_store, AUTHOR, PGR, PGT, STAFF, UGT};
use megaphone_announcements::{
    domain::{resolve_audience, AnnouncementOrder},
    error::AppError,
    repository::{fixtures::NewAnnouncement, AnnouncementRepository, MegaphoneAnnouncementRepository},
};

fn announcement(id: i64, subject: &str, hours_ago: i64, categories: &[i64]) -> NewAnnouncement {
    NewAnnouncement::sent(id, AUTHOR, subject, "Body text", now() - Duration::hours(hours_ago))
        .in_categories(categories)
}

#[tokio::test]
async fn test_fetch_joins_all_fields() -> anyhow::Result<()> {
    let (pool, seeder) = setup_store().await?;

    let mut record = announcement(10, "Exam timetable", 2, &[UGT]);
    record.message = "Line one\nLine two".to_string();
    record.link = Some("https://example.ac.uk/exams".to_string());
    record.show_link = true;
    record.close_at = Some(now() + Duration::days(3));
    record.show_close = true;
    seeder.announcement(&record).await?;

    let repo = MegaphoneAnnouncementRepository::new(pool);
    let fetched = repo
        .fetch_at(&names(&["UGT"]), AnnouncementOrder::BySentDesc, false, now())
        .await?;

    assert_eq!(fetched.len(), 1);
    let a = &fetched[0];
    assert_eq!(a.id, 10);
    assert_eq!(a.subject, "Exam timetable");
    assert_eq!(a.message, "Line one\nLine two");
    assert_eq!(a.author_name, "Jo Bloggs");
    assert_eq!(a.author_email, "jo@example.ac.uk");
    assert_eq!(a.sent_at, now() - Duration::hours(2));
    assert_eq!(a.open_at, None);
    assert_eq!(a.close_at, Some(now() + Duration::days(3)));
    assert_eq!(a.link.as_deref(), Some("https://example.ac.uk/exams"));
    assert!(a.show_link_inline);
    assert!(a.show_close_date);

    Ok(())
}

#[tokio::test]
async fn test_empty_categories_issue_no_query() -> anyhow::Result<()> {
    let (pool, _seeder) = setup_store().await?;
    let repo = MegaphoneAnnouncementRepository::new(pool.clone());

    // A closed pool fails any acquire, so an empty result proves nothing ran.
    pool.close().await;

    let fetched = repo
        .fetch_at(&[], AnnouncementOrder::BySentDesc, false, now())
        .await?;
    assert!(fetched.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_unreachable_store_is_connection_error() -> anyhow::Result<()> {
    let (pool, _seeder) = setup_store().await?;
    let repo = MegaphoneAnnouncementRepository::new(pool.clone());
    pool.close().await;

    let result = repo
        .fetch_at(&names(&["UGT"]), AnnouncementOrder::BySentDesc, false, now())
        .await;
    assert!(matches!(result, Err(AppError::StoreConnection(_))));

    Ok(())
}

#[tokio::test]
async fn test_closed_announcements_are_excluded() -> anyhow::Result<()> {
    let (pool, seeder) = setup_store().await?;

    let mut closed = announcement(1, "Closed", 48, &[UGT]);
    closed.close_at = Some(now() - Duration::hours(1));
    seeder.announcement(&closed).await?;

    let mut closing_now = announcement(2, "Closing exactly now", 48, &[UGT]);
    closing_now.close_at = Some(now());
    seeder.announcement(&closing_now).await?;

    let mut open = announcement(3, "Still open", 48, &[UGT]);
    open.close_at = Some(now() + Duration::hours(1));
    seeder.announcement(&open).await?;

    seeder.announcement(&announcement(4, "Never closes", 48, &[UGT])).await?;

    let repo = MegaphoneAnnouncementRepository::new(pool);
    for include_future in [false, true] {
        let fetched = repo
            .fetch_at(&names(&["UGT"]), AnnouncementOrder::BySentDesc, include_future, now())
            .await?;
        let mut ids: Vec<i64> = fetched.iter().map(|a| a.id).collect();
        ids.sort();
        assert_eq!(ids, vec![3, 4], "include_future = {}", include_future);
    }

    Ok(())
}

#[tokio::test]
async fn test_future_announcements_need_include_future() -> anyhow::Result<()> {
    let (pool, seeder) = setup_store().await?;

    let mut future = announcement(1, "Opens tomorrow", 1, &[PGT]);
    future.open_at = Some(now() + Duration::days(1));
    seeder.announcement(&future).await?;

    let mut opened = announcement(2, "Opened this morning", 5, &[PGT]);
    opened.open_at = Some(now() - Duration::hours(3));
    seeder.announcement(&opened).await?;

    let mut opening_now = announcement(3, "Opens exactly now", 3, &[PGT]);
    opening_now.open_at = Some(now());
    seeder.announcement(&opening_now).await?;

    let repo = MegaphoneAnnouncementRepository::new(pool);

    let current = repo
        .fetch_at(&names(&["PGT"]), AnnouncementOrder::BySentDesc, false, now())
        .await?;
    assert_eq!(current.iter().map(|a| a.id).collect::<Vec<_>>(), vec![3, 2]);

    let with_future = repo
        .fetch_at(&names(&["PGT"]), AnnouncementOrder::BySentDesc, true, now())
        .await?;
    assert_eq!(with_future.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 3, 2]);

    Ok(())
}

#[tokio::test]
async fn test_invisible_and_unsent_are_excluded() -> anyhow::Result<()> {
    let (pool, seeder) = setup_store().await?;

    let mut hidden = announcement(1, "Hidden", 1, &[STAFF]);
    hidden.visible = false;
    seeder.announcement(&hidden).await?;

    let mut draft = announcement(2, "Draft", 1, &[STAFF]);
    draft.status = "incomplete".to_string();
    seeder.announcement(&draft).await?;

    seeder.announcement(&announcement(3, "Sent", 1, &[STAFF])).await?;

    let repo = MegaphoneAnnouncementRepository::new(pool);
    let fetched = repo
        .fetch_at(&names(&["Staff"]), AnnouncementOrder::BySentDesc, true, now())
        .await?;
    assert_eq!(fetched.iter().map(|a| a.id).collect::<Vec<_>>(), vec![3]);

    Ok(())
}

#[tokio::test]
async fn test_multi_category_announcements_are_deduplicated() -> anyhow::Result<()> {
    let (pool, seeder) = setup_store().await?;

    seeder.announcement(&announcement(1, "Everyone", 1, &[UGT, PGT, PGR, STAFF])).await?;
    seeder.announcement(&announcement(2, "Taught only", 2, &[UGT, PGT])).await?;

    let repo = MegaphoneAnnouncementRepository::new(pool);
    let fetched = repo
        .fetch_at(&resolve_audience("All"), AnnouncementOrder::BySentDesc, false, now())
        .await?;
    assert_eq!(fetched.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2]);

    Ok(())
}

#[tokio::test]
async fn test_students_all_excludes_staff_only() -> anyhow::Result<()> {
    let (pool, seeder) = setup_store().await?;

    seeder.announcement(&announcement(1, "Staff meeting", 1, &[STAFF])).await?;
    seeder.announcement(&announcement(2, "PGT induction", 2, &[PGT])).await?;

    let repo = MegaphoneAnnouncementRepository::new(pool);
    let fetched = repo
        .fetch_at(&resolve_audience("Students_all"), AnnouncementOrder::BySentDesc, false, now())
        .await?;
    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].subject, "PGT induction");

    Ok(())
}

#[tokio::test]
async fn test_unknown_categories_are_skipped() -> anyhow::Result<()> {
    let (pool, seeder) = setup_store().await?;
    seeder.announcement(&announcement(1, "For UGT", 1, &[UGT])).await?;

    let repo = MegaphoneAnnouncementRepository::new(pool);

    let fetched = repo
        .fetch_at(&names(&["Alumni", "UGT"]), AnnouncementOrder::BySentDesc, false, now())
        .await?;
    assert_eq!(fetched.len(), 1);

    let fetched = repo
        .fetch_at(&names(&["Alumni", "Visitors"]), AnnouncementOrder::BySentDesc, false, now())
        .await?;
    assert!(fetched.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_category_lookup_is_exact_and_case_insensitive() -> anyhow::Result<()> {
    let (pool, seeder) = setup_store().await?;
    seeder.category(5, "Year_1").await?;

    let repo = MegaphoneAnnouncementRepository::new(pool);

    assert_eq!(repo.find_category_id("UGT").await?, Some(UGT));
    assert_eq!(repo.find_category_id("ugt").await?, Some(UGT));
    assert_eq!(repo.find_category_id("staff").await?, Some(STAFF));
    assert_eq!(repo.find_category_id("Year_1").await?, Some(5));

    // Wildcards in the requested name match only themselves.
    assert_eq!(repo.find_category_id("U_T").await?, None);
    assert_eq!(repo.find_category_id("%").await?, None);
    assert_eq!(repo.find_category_id("Year%").await?, None);
    assert_eq!(repo.find_category_id("UG").await?, None);

    Ok(())
}

#[tokio::test]
async fn test_ordering() -> anyhow::Result<()> {
    let (pool, seeder) = setup_store().await?;

    let mut a = announcement(1, "Oldest, closes last", 30, &[PGR]);
    a.close_at = Some(now() + Duration::days(10));
    seeder.announcement(&a).await?;

    let mut b = announcement(2, "Newest, closes first", 1, &[PGR]);
    b.close_at = Some(now() + Duration::days(1));
    seeder.announcement(&b).await?;

    seeder.announcement(&announcement(3, "Middle, never closes", 10, &[PGR])).await?;

    let repo = MegaphoneAnnouncementRepository::new(pool);

    let by_sent = repo
        .fetch_at(&names(&["PGR"]), AnnouncementOrder::BySentDesc, false, now())
        .await?;
    assert_eq!(by_sent.iter().map(|a| a.id).collect::<Vec<_>>(), vec![2, 3, 1]);

    let by_close = repo
        .fetch_at(&names(&["PGR"]), AnnouncementOrder::ByCloseAsc, false, now())
        .await?;
    assert_eq!(by_close.iter().map(|a| a.id).collect::<Vec<_>>(), vec![2, 1, 3]);

    Ok(())
}

#[tokio::test]
async fn test_missing_window_and_link_are_absent() -> anyhow::Result<()> {
    let (pool, seeder) = setup_store().await?;
    seeder.announcement(&announcement(1, "No window, no link", 1, &[UGT])).await?;

    let repo = MegaphoneAnnouncementRepository::new(pool);
    let fetched = repo
        .fetch_at(&names(&["UGT"]), AnnouncementOrder::BySentDesc, false, now())
        .await?;

    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].open_at, None);
    assert_eq!(fetched[0].close_at, None);
    assert_eq!(fetched[0].link, None);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_metadata_rows_yield_one_record() -> anyhow::Result<()> {
    let (pool, seeder) = setup_store().await?;
    seeder.announcement(&announcement(1, "Edited twice", 1, &[PGR])).await?;

    // Nothing in the schema stops a second metadata row for the same message.
    sqlx::query("INSERT INTO mp_messages_announcedata (message_id, show_link, show_close) VALUES (?, 0, 0)")
        .bind(1i64)
        .execute(&pool)
        .await?;

    let repo = MegaphoneAnnouncementRepository::new(pool);
    let fetched = repo
        .fetch_at(&names(&["PGR"]), AnnouncementOrder::BySentDesc, false, now())
        .await?;
    assert_eq!(fetched.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1]);

    Ok(())
}
