use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, warn};

const MAX_CONNECTIONS: u32 = 20;
const CONNECT_ATTEMPTS: u32 = 5;

/// Connects with bounded exponential backoff so the service survives the
/// database coming up after it (compose startup ordering).
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let mut wait = Duration::from_secs(2);

    for attempt in 1..=CONNECT_ATTEMPTS {
        match PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await
        {
            Ok(pool) => {
                info!("Database connection established.");
                return Ok(pool);
            }
            Err(e) if attempt < CONNECT_ATTEMPTS => {
                warn!(
                    "Database connect attempt {}/{} failed: {}. Retrying in {:?}...",
                    attempt, CONNECT_ATTEMPTS, e, wait
                );
                tokio::time::sleep(wait).await;
                wait *= 2;
            }
            Err(e) => return Err(e),
        }
    }

    unreachable!("connect loop returns on success or final error")
}
