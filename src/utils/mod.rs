pub mod import_cache;
