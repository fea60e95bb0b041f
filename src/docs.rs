use crate::api::employee::{EditDateField, EditResponse, EditTextField};
use crate::api::import::ImportResponse;
use crate::model::employee::Employee;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Grid API",
        version = "1.0.0",
        description = r#"
## Employee Grid

This API powers a small intranet **employee grid**: bulk-import employee
records from a personnel CSV export and edit individual fields inline.

### 🔹 Key Features
- **CSV Import**
  - Upload a `Personnel_Records.*` export, all-or-nothing parsing
  - Best-effort persistence: duplicated payroll numbers are dropped, the rest go through
- **Inline Editing**
  - Edit any single field of a record by name, text and date fields alike
  - Uniqueness conflicts come back as 409 with the persisted record for redisplay

### 📦 Response Format
- JSON-based RESTful responses
- Dates are rendered as `YYYY-MM-DD`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::import::import_csv,
        crate::api::import::get_import_session,

        crate::api::employee::get_employee,
        crate::api::employee::edit_text_field,
        crate::api::employee::edit_date_field
    ),
    components(
        schemas(
            Employee,
            ImportResponse,
            EditTextField,
            EditDateField,
            EditResponse
        )
    ),
    tags(
        (name = "Import", description = "CSV import APIs"),
        (name = "Employee", description = "Employee record APIs"),
    )
)]
pub struct ApiDoc;
