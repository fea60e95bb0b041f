pub mod employee;
pub mod import;
