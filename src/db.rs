use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

pub async fn init_db(database_url: &str) -> SqlitePool {
    let options = SqliteConnectOptions::from_str(database_url)
        .expect("DATABASE_URL is not a valid sqlite url")
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options)
        .await
        .expect("Failed to connect to database");

    ensure_schema(&pool)
        .await
        .expect("Failed to prepare database schema");

    pool
}

/// Create the employees table and its unique index when absent.
/// Dates are stored as ISO-8601 TEXT. The index is partial so NULL
/// payroll numbers are exempt from the uniqueness constraint.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            payroll_number TEXT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            birthday TEXT NOT NULL,
            telephone TEXT NOT NULL,
            mobile TEXT NOT NULL,
            address TEXT NOT NULL,
            address_2 TEXT NOT NULL,
            postcode TEXT NOT NULL,
            email_home TEXT NOT NULL,
            start_date TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_employees_payroll_number
        ON employees (payroll_number)
        WHERE payroll_number IS NOT NULL
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
