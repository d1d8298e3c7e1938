mod config;
mod constants;
mod error;
mod init;
mod models;
mod openlibrary;
mod routes;
mod search;
mod store;
mod tags;
mod telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let _ = &*constants::STARTUP_TIME;

    telemetry::init_telemetry();

    let (listener, app) = init::init().await?;

    tracing::info!("finished initializing!");
    axum::serve(listener, app).await?;

    Ok(())
}
