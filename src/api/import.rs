use actix_web::{HttpResponse, Responder, web};
use futures_util::StreamExt;
use serde::Serialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::Config;
use crate::model::employee::Employee;
use crate::service::csv_import;
use crate::service::employee_service;
use crate::utils::import_cache;

#[derive(Serialize, ToSchema)]
pub struct ImportResponse {
    #[schema(example = "7d8a6f62-3b13-4f41-a7f4-2a9c1f7b9a55")]
    pub import_session: String,
    /// Rows in the uploaded file
    #[schema(example = 3)]
    pub requested: usize,
    /// Rows that made it into the store
    #[schema(example = 2)]
    pub accepted: usize,
    #[schema(
    example = json!([{
        "id": 1,
        "payroll_number": "COOP08",
        "first_name": "John",
        "last_name": "William",
        "birthday": "1955-01-26",
        "telephone": "12345678",
        "mobile": "987654231",
        "address": "12 Foreman road",
        "address_2": "London",
        "postcode": "GU12 6JW",
        "email_home": "nomadic20@hotmail.co.uk",
        "start_date": "2013-04-18"
    }])
)]
    pub employees: Vec<Employee>,
}

/// Import Employees from CSV
#[utoipa::path(
    post,
    path = "/api/import",
    request_body(content = String, content_type = "text/csv",
        description = "CSV export with the eleven Personnel_Records.* columns"),
    responses(
        (status = 200, description = "Batch processed; rejected rows are reflected in the counts", body = ImportResponse),
        (status = 400, description = "Bad header line or unparseable row, nothing imported", body = Object, example = json!({
            "message": "csv file is missing required headers: Personnel_Records.Surname"
        })),
        (status = 413, description = "Upload exceeds the configured size limit")
    ),
    tag = "Import"
)]
pub async fn import_csv(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    mut payload: web::Payload,
) -> actix_web::Result<impl Responder> {
    let limit = config.file_size_limit;

    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk?;
        if body.len() + chunk.len() > limit {
            let limit_mb = limit as f64 / (1024.0 * 1024.0);
            return Ok(HttpResponse::PayloadTooLarge().json(json!({
                "message": format!("File size is over the limit of {limit_mb:.1} MB")
            })));
        }
        body.extend_from_slice(&chunk);
    }

    let candidates = match csv_import::read_employees_from_csv(&body) {
        Ok(candidates) => candidates,
        Err(e) => {
            info!(error = %e, "Rejected csv upload");
            return Ok(HttpResponse::BadRequest().json(json!({
                "message": e.to_string()
            })));
        }
    };

    let requested = candidates.len();
    let accepted = employee_service::create_employees(pool.get_ref(), candidates).await;

    let session_id = Uuid::new_v4().to_string();
    import_cache::store(&session_id, accepted.clone()).await;

    info!(
        requested,
        accepted = accepted.len(),
        session = %session_id,
        "Imported employee batch"
    );

    Ok(HttpResponse::Ok().json(ImportResponse {
        import_session: session_id,
        requested,
        accepted: accepted.len(),
        employees: accepted,
    }))
}

/// Get Imported Batch by Session
#[utoipa::path(
    get,
    path = "/api/import/session/{session_id}",
    params(
        ("session_id", Path, description = "Import session id returned by the upload")
    ),
    responses(
        (status = 200, description = "The batch accepted during that session", body = Object, example = json!({
            "import_session": "7d8a6f62-3b13-4f41-a7f4-2a9c1f7b9a55",
            "employees": []
        })),
        (status = 404, description = "Session unknown or expired", body = Object, example = json!({
            "message": "Import session not found or expired"
        }))
    ),
    tag = "Import"
)]
pub async fn get_import_session(path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();

    match import_cache::get(&session_id).await {
        Some(employees) => HttpResponse::Ok().json(json!({
            "import_session": session_id,
            "employees": employees
        })),
        None => HttpResponse::NotFound().json(json!({
            "message": "Import session not found or expired"
        })),
    }
}
