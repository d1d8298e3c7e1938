use axum::Json;
use serde::Serialize;

use crate::constants::STARTUP_TIME;

#[derive(Debug, Serialize)]
pub struct Health {
    pub name: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
}

/// service liveness, version and uptime.
pub async fn health() -> Json<Health> {
    let uptime_secs = STARTUP_TIME.elapsed().map(|d| d.as_secs()).unwrap_or(0);

    Json(Health {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs,
    })
}
