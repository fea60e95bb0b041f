#![allow(dead_code)]

use chrono::NaiveDate;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use employee_grid::db;
use employee_grid::model::employee::NewEmployee;

/// In-memory SQLite pool with the employees schema. Pinned to a single
/// connection that never expires: every pooled connection gets its own
/// private in-memory database, so a second connection would see no
/// tables at all.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    db::ensure_schema(&pool).await.unwrap();

    pool
}

pub async fn count_employees(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM employees")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn john_william() -> NewEmployee {
    NewEmployee {
        payroll_number: Some("COOP08".to_string()),
        first_name: "John".to_string(),
        last_name: "William".to_string(),
        birthday: NaiveDate::from_ymd_opt(1955, 1, 26).unwrap(),
        telephone: "12345678".to_string(),
        mobile: "987654231".to_string(),
        address: "12 Foreman road".to_string(),
        address_2: "London".to_string(),
        postcode: "GU12 6JW".to_string(),
        email_home: "nomadic20@hotmail.co.uk".to_string(),
        start_date: NaiveDate::from_ymd_opt(2013, 4, 18).unwrap(),
    }
}

pub fn jerry_jackson() -> NewEmployee {
    NewEmployee {
        payroll_number: Some("JACK13".to_string()),
        first_name: "Jerry".to_string(),
        last_name: "Jackson".to_string(),
        birthday: NaiveDate::from_ymd_opt(1974, 5, 11).unwrap(),
        telephone: "2050508".to_string(),
        mobile: "6987457".to_string(),
        address: "115 Spinney Road".to_string(),
        address_2: "Luton".to_string(),
        postcode: "LU33DF".to_string(),
        email_home: "gerry.jackson@bt.com".to_string(),
        start_date: NaiveDate::from_ymd_opt(2013, 4, 18).unwrap(),
    }
}

/// John's record with a different payroll number (or none)
pub fn with_payroll(payroll_number: Option<&str>) -> NewEmployee {
    NewEmployee {
        payroll_number: payroll_number.map(str::to_string),
        ..john_william()
    }
}
