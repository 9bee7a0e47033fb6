use mongodb::{Database, bson::doc};
use std::time::Instant;

use crate::common::{DatabaseError, DatabaseResult};

/// Outcome of a timed health probe
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    pub message: Option<String>,
    pub response_time_ms: u64,
}

/// Run the `ping` command against `db`.
pub async fn ping(db: &Database) -> DatabaseResult<()> {
    db.run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))
}

/// Readiness probe: `true` when the deployment answers a ping.
pub async fn check_health(db: &Database) -> bool {
    ping(db).await.is_ok()
}

/// Like [`check_health`] but with latency and the failure message.
pub async fn check_health_detailed(db: &Database) -> HealthStatus {
    let start = Instant::now();
    let result = ping(db).await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    HealthStatus {
        healthy: result.is_ok(),
        message: result.err().map(|e| e.to_string()),
        response_time_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::Client;

    #[tokio::test]
    #[ignore] // Requires a running MongoDB
    async fn test_check_health_detailed() {
        let client = Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        let status = check_health_detailed(&client.database("tasks_test")).await;
        assert!(status.healthy);
        assert!(status.message.is_none());
    }
}
