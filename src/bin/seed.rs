use megaphone_announcements::repository::fixtures::{NewAnnouncement, Seeder};
use chrono::{Duration, Utc};
use sqlx::any::AnyPoolOptions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("🌱 Starting database seeding...");

    // Initialize database connection
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://megaphone.db?mode=rwc".to_string());

    sqlx::any::install_default_drivers();
    let db_pool = AnyPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;

    // Run migrations first
    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await?;

    let seeder = Seeder::new(db_pool.clone());

    println!("🏷️  Creating categories...");
    for (id, name) in [(1, "UGT"), (2, "PGT"), (3, "PGR"), (4, "Staff")] {
        seeder.category(id, name).await?;
    }

    println!("👥 Creating authors...");
    seeder.user(1, "Teaching Office", "teaching-office@example.ac.uk").await?;
    seeder.user(2, "Research Office", "research-office@example.ac.uk").await?;

    println!("📢 Creating announcements...");
    let now = Utc::now();

    let mut timetable = NewAnnouncement::sent(
        1,
        1,
        "Exam timetable published",
        "The provisional exam timetable for this semester is now available.\nPlease check it carefully and report any clashes to the Teaching Office.",
        now - Duration::days(1),
    )
    .in_categories(&[1, 2]);
    timetable.link = Some("https://example.ac.uk/exams".to_string());
    seeder.announcement(&timetable).await?;

    let mut seminar = NewAnnouncement::sent(
        2,
        2,
        "Research seminar series",
        &"This term's research seminars cover topics from programming languages to machine learning. ".repeat(6),
        now - Duration::days(3),
    )
    .in_categories(&[3, 4]);
    seminar.close_at = Some(now + Duration::days(14));
    seminar.show_close = true;
    seminar.link = Some("https://example.ac.uk/seminars".to_string());
    seminar.show_link = true;
    seeder.announcement(&seminar).await?;

    let mut future = NewAnnouncement::sent(
        3,
        1,
        "Module registration opens",
        "Module registration for next year opens soon.",
        now,
    )
    .in_categories(&[1]);
    future.open_at = Some(now + Duration::days(7));
    seeder.announcement(&future).await?;

    let mut expired = NewAnnouncement::sent(
        4,
        1,
        "Library closure",
        "The library was closed for maintenance.",
        now - Duration::days(30),
    )
    .in_categories(&[1, 2, 3, 4]);
    expired.close_at = Some(now - Duration::days(20));
    seeder.announcement(&expired).await?;

    println!("  ✅ Created 4 announcements (1 not yet open, 1 closed)");

    println!("\n✨ Database seeding complete!");
    println!("\n📝 Try:");
    println!("  /announcements/Students_all/page");
    println!("  /api/announcements/All?order=deadline&future=true");

    Ok(())
}
