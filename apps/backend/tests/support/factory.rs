use backend_test_support::unique_helpers::{unique_email, unique_str};
use portal_backend::auth::password::{hash_password, PasswordCost};
use portal_backend::auth::Identity;
use portal_backend::repos::events::{self, Event, EventCreate};
use portal_backend::repos::exchange_rates::{self, ExchangeRate, RateUpsert};
use portal_backend::repos::knowledge::{self, EntryCreate, KnowledgeEntry};
use portal_backend::repos::users::{self, UserCreate};
use sea_orm::DatabaseConnection;
use time::{Duration, OffsetDateTime};

pub async fn seed_user(db: &DatabaseConnection, id: &str, email: &str, password: &str) -> Identity {
    let user = users::create(
        db,
        UserCreate {
            id: id.to_string(),
            email: email.to_string(),
            name: format!("User {id}"),
            password_hash: hash_password(password, PasswordCost::Low).expect("hash"),
        },
    )
    .await
    .expect("seed user");
    Identity {
        id: user.id,
        email: user.email,
        name: user.name,
    }
}

/// A user with a fresh id and email; the password is `holder-pass`.
pub async fn seed_holder(db: &DatabaseConnection, prefix: &str) -> Identity {
    seed_user(db, &unique_str(prefix), &unique_email(prefix), "holder-pass").await
}

pub async fn seed_event(
    db: &DatabaseConnection,
    title: &str,
    days_from_now: i64,
    capacity: Option<i32>,
) -> Event {
    events::create(
        db,
        EventCreate {
            title: title.to_string(),
            description: format!("{title} description"),
            location: Some("Addis Ababa".to_string()),
            starts_at: OffsetDateTime::now_utc() + Duration::days(days_from_now),
            capacity,
        },
    )
    .await
    .expect("seed event")
}

pub async fn seed_rate(db: &DatabaseConnection, code: &str, buying: f64) -> ExchangeRate {
    exchange_rates::upsert(
        db,
        RateUpsert {
            currency_code: code.to_string(),
            currency_name: format!("{code} currency"),
            buying_rate: buying,
            selling_rate: buying * 1.02,
        },
    )
    .await
    .expect("seed rate")
}

pub async fn seed_entry(
    db: &DatabaseConnection,
    topic: &str,
    content: &str,
    keywords: &str,
    category: Option<&str>,
) -> KnowledgeEntry {
    knowledge::create(
        db,
        EntryCreate {
            topic: topic.to_string(),
            content: content.to_string(),
            keywords: keywords.to_string(),
            category: category.map(str::to_string),
        },
    )
    .await
    .expect("seed entry")
}
