use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,

    /// Upload size cap in bytes, enforced before the importer runs
    pub file_size_limit: usize,

    // Rate limiting
    pub rate_upload_per_min: u32,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            file_size_limit: env::var("FILE_SIZE_LIMIT")
                .unwrap_or_else(|_| "2097152".to_string()) // default 2 MiB
                .parse()
                .unwrap(),
            rate_upload_per_min: env::var("RATE_UPLOAD_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
        }
    }
}
