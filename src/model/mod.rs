pub mod employee;
pub mod field_registry;
