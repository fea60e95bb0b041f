use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::ToSchema;

use crate::model::employee::{Employee, FieldValue};
use crate::model::field_registry::{self, FieldDescriptor};
use crate::service::employee_service::{self, EditError};
use crate::utils::import_cache;

#[derive(Deserialize, ToSchema)]
pub struct EditTextField {
    #[schema(example = "first_name")]
    pub field_name: String,
    #[schema(example = "Jerry")]
    pub new_value: String,
}

#[derive(Deserialize, ToSchema)]
pub struct EditDateField {
    #[schema(example = "start_date")]
    pub field_name: String,
    #[schema(example = "2013-04-18", format = "date", value_type = String)]
    pub new_value: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EditQuery {
    /// Import session whose cached batch should pick up the edit
    pub session: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct EditResponse {
    pub employee: Employee,
    #[schema(example = "first_name")]
    pub field_name: &'static str,
    /// New value as the grid should display it (dates as YYYY-MM-DD)
    #[schema(example = "Jerry", value_type = String)]
    pub new_value: FieldValue,
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employee/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    match employee_service::get_employee(pool.get_ref(), id).await {
        Ok(employee) => Ok(HttpResponse::Ok().json(employee)),
        Err(EditError::NotFound { .. }) => Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        }))),
        Err(e) => {
            error!(error = %e, id, "Failed to fetch employee");
            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            })))
        }
    }
}

/// Edit a Text Field
#[utoipa::path(
    patch,
    path = "/api/employee/{id}/text",
    params(
        ("id", Path, description = "Employee ID"),
        ("session", Query, description = "Import session to refresh (optional)")
    ),
    request_body = EditTextField,
    responses(
        (status = 200, description = "Field updated", body = EditResponse),
        (status = 400, description = "Unknown field name (the body lists the editable names), or the field does not hold text"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "New value conflicts with another record; body carries the persisted record", body = Object, example = json!({
            "message": "couldn't update employee with id=1: the new value conflicts with another record",
            "employee": {}
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn edit_text_field(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    query: web::Query<EditQuery>,
    body: web::Json<EditTextField>,
) -> impl Responder {
    let id = path.into_inner();
    let body = body.into_inner();

    let result = employee_service::edit_employee(
        pool.get_ref(),
        id,
        &body.field_name,
        FieldValue::Text(body.new_value),
    )
    .await;

    respond_edit(pool.get_ref(), id, query.session.as_deref(), result).await
}

/// Edit a Date Field
#[utoipa::path(
    patch,
    path = "/api/employee/{id}/date",
    params(
        ("id", Path, description = "Employee ID"),
        ("session", Query, description = "Import session to refresh (optional)")
    ),
    request_body = EditDateField,
    responses(
        (status = 200, description = "Field updated", body = EditResponse),
        (status = 400, description = "Unknown field name (the body lists the editable names), or the field does not hold a date"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "New value conflicts with another record; body carries the persisted record"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn edit_date_field(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    query: web::Query<EditQuery>,
    body: web::Json<EditDateField>,
) -> impl Responder {
    let id = path.into_inner();
    let body = body.into_inner();

    let result = employee_service::edit_employee(
        pool.get_ref(),
        id,
        &body.field_name,
        FieldValue::Date(body.new_value),
    )
    .await;

    respond_edit(pool.get_ref(), id, query.session.as_deref(), result).await
}

async fn respond_edit(
    pool: &SqlitePool,
    id: i64,
    session: Option<&str>,
    result: Result<(Employee, &'static FieldDescriptor), EditError>,
) -> HttpResponse {
    match result {
        Ok((employee, descriptor)) => {
            if let Some(session_id) = session {
                import_cache::update_if_present(session_id, &employee).await;
            }
            let new_value = (descriptor.get)(&employee);
            HttpResponse::Ok().json(EditResponse {
                employee,
                field_name: descriptor.name,
                new_value,
            })
        }
        Err(e @ EditError::NotFound { .. }) => HttpResponse::NotFound().json(json!({
            "message": e.to_string()
        })),
        Err(e @ EditError::UnknownField { .. }) => {
            // tell the grid which names it can send
            HttpResponse::BadRequest().json(json!({
                "message": e.to_string(),
                "fields": field_registry::field_names()
            }))
        }
        Err(e @ EditError::TypeMismatch { .. }) => HttpResponse::BadRequest().json(json!({
            "message": e.to_string()
        })),
        Err(e @ EditError::Conflict { .. }) => {
            // hand the grid the persisted record so it can redisplay
            // the value the store actually kept
            let current = employee_service::get_employee(pool, id).await.ok();
            HttpResponse::Conflict().json(json!({
                "message": e.to_string(),
                "employee": current
            }))
        }
        Err(EditError::Database(e)) => {
            error!(error = %e, id, "Failed to edit employee");
            HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            }))
        }
    }
}
