pub mod csv_import;
pub mod employee_service;
