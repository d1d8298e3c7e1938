use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::openlibrary::OpenLibraryClient;
use crate::routes::{self, AppState};
use crate::search::SearchSessions;
use crate::store::{RestStore, Store};

pub async fn init() -> anyhow::Result<(TcpListener, Router)> {
    tracing::info!("initializing... please wait warmly.");

    let config = Config::from_env();
    let reqwest_client = reqwest::Client::new();

    tracing::info!("connecting flows to the remote store...");
    let store: Arc<dyn Store> = Arc::new(RestStore::new(
        reqwest_client.clone(),
        &config.store_url,
        &config.store_key,
    ));

    let catalog = OpenLibraryClient::new(reqwest_client);

    let state = Arc::new(AppState {
        store,
        catalog,
        sessions: SearchSessions::default(),
    });

    let app = routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("listening on {}.", addr);
    let listener = TcpListener::bind(addr).await?;

    Ok((listener, app))
}
