use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::employee::{Employee, FieldKind, FieldValue, NewEmployee};
use crate::model::field_registry::{self, FieldDescriptor};

/// Error type for single-record operations (lookup and field edits).
#[derive(Debug, Error)]
pub enum EditError {
    #[error("employee with id={id} doesn't exist")]
    NotFound { id: i64 },

    #[error("employee record doesn't have a '{name}' field")]
    UnknownField { name: String },

    #[error("field '{field}' holds a {expected} value, not a {actual} value")]
    TypeMismatch {
        field: &'static str,
        expected: FieldKind,
        actual: FieldKind,
    },

    #[error("couldn't update employee with id={id}: the new value conflicts with another record")]
    Conflict { id: i64 },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persist imported candidates one at a time, in input order.
///
/// Best-effort by contract: a candidate whose insert fails (most often a
/// duplicate payroll number) is logged and dropped, and processing moves
/// on to the next one. The returned records carry their assigned ids and
/// preserve input order; callers derive the rejected count as
/// `requested - accepted`. Inserts are deliberately not wrapped in one
/// batch transaction, so one bad row cannot take the rest down with it.
pub async fn create_employees(pool: &SqlitePool, candidates: Vec<NewEmployee>) -> Vec<Employee> {
    let mut accepted = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        match insert_employee(pool, &candidate).await {
            Ok(id) => accepted.push(candidate.into_employee(id)),
            Err(e) => {
                warn!(
                    error = %e,
                    payroll_number = ?candidate.payroll_number,
                    "Skipping employee candidate"
                );
            }
        }
    }

    accepted
}

async fn insert_employee(pool: &SqlitePool, candidate: &NewEmployee) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO employees
        (payroll_number, first_name, last_name, birthday, telephone, mobile,
         address, address_2, postcode, email_home, start_date)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&candidate.payroll_number)
    .bind(&candidate.first_name)
    .bind(&candidate.last_name)
    .bind(candidate.birthday)
    .bind(&candidate.telephone)
    .bind(&candidate.mobile)
    .bind(&candidate.address)
    .bind(&candidate.address_2)
    .bind(&candidate.postcode)
    .bind(&candidate.email_home)
    .bind(candidate.start_date)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Edit one field of one employee record by external field name.
///
/// Resolution order: record lookup (`NotFound`), registry lookup
/// (`UnknownField`), then value kind check (`TypeMismatch`); each
/// failure leaves the store untouched. The mutation is applied to an
/// in-memory copy and committed with a single UPDATE. If the commit trips the
/// payroll-number uniqueness constraint the store keeps the old row,
/// the mutated copy is dropped and the caller gets `Conflict`; a
/// follow-up read observes the pre-edit value.
///
/// Returns the updated record together with the resolved descriptor so
/// the caller can render the new value without a second lookup.
pub async fn edit_employee(
    pool: &SqlitePool,
    id: i64,
    field_name: &str,
    new_value: FieldValue,
) -> Result<(Employee, &'static FieldDescriptor), EditError> {
    let mut employee = fetch_employee(pool, id)
        .await?
        .ok_or(EditError::NotFound { id })?;

    let descriptor =
        field_registry::lookup(field_name).ok_or_else(|| EditError::UnknownField {
            name: field_name.to_string(),
        })?;

    if new_value.kind() != descriptor.kind {
        return Err(EditError::TypeMismatch {
            field: descriptor.name,
            expected: descriptor.kind,
            actual: new_value.kind(),
        });
    }

    (descriptor.set)(&mut employee, new_value);

    // NULLIF keeps a cleared payroll number out of the unique index
    let sql = if descriptor.nullable {
        format!(
            "UPDATE employees SET {} = NULLIF(?, '') WHERE id = ?",
            descriptor.column
        )
    } else {
        format!("UPDATE employees SET {} = ? WHERE id = ?", descriptor.column)
    };
    debug!(sql = %sql, id, field = descriptor.name, "Updating employee field");

    let query = sqlx::query(&sql);
    let query = match (descriptor.get)(&employee) {
        FieldValue::Text(s) => query.bind(s),
        FieldValue::Date(d) => query.bind(d),
    };

    match query.bind(id).execute(pool).await {
        // row vanished between the fetch and the update
        Ok(done) if done.rows_affected() == 0 => Err(EditError::NotFound { id }),
        Ok(_) => Ok((employee, descriptor)),
        Err(e) if is_unique_violation(&e) => {
            warn!(id, field = descriptor.name, "Edit rejected by uniqueness constraint");
            Err(EditError::Conflict { id })
        }
        Err(e) => Err(EditError::Database(e)),
    }
}

/// Fetch one employee record by id. `NotFound` when absent; pure read.
pub async fn get_employee(pool: &SqlitePool, id: i64) -> Result<Employee, EditError> {
    fetch_employee(pool, id)
        .await?
        .ok_or(EditError::NotFound { id })
}

async fn fetch_employee(pool: &SqlitePool, id: i64) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation)
        }
        _ => false,
    }
}
