use moka::future::Cache;
use once_cell::sync::Lazy;
use std::time::Duration;

use crate::model::employee::Employee;

/// Last-imported batch per upload session, keyed by session id.
/// Presentation-layer only: the grid redisplays the batch it just
/// uploaded without re-querying the store.
pub static IMPORT_CACHE: Lazy<Cache<String, Vec<Employee>>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(1_000) // sessions, not records
        .time_to_live(Duration::from_secs(1800)) // 30min TTL
        .build()
});

/// Cache the accepted batch under a fresh session id
pub async fn store(session_id: &str, employees: Vec<Employee>) {
    log::info!(
        "Caching import session {} ({} records)",
        session_id,
        employees.len()
    );
    IMPORT_CACHE.insert(session_id.to_string(), employees).await;
}

/// Look up the batch for a session, if it is still alive
pub async fn get(session_id: &str) -> Option<Vec<Employee>> {
    IMPORT_CACHE.get(session_id).await
}

/// Replace one record in a session's cached batch after a successful
/// edit. A miss (expired session, or the record was not part of that
/// batch) is fine; the cache only mirrors what the grid already shows.
pub async fn update_if_present(session_id: &str, employee: &Employee) {
    if let Some(mut batch) = IMPORT_CACHE.get(session_id).await {
        if let Some(slot) = batch.iter_mut().find(|e| e.id == employee.id) {
            *slot = employee.clone();
            IMPORT_CACHE.insert(session_id.to_string(), batch).await;
        }
    }
}
