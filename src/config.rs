pub struct Config {
    pub store_url: String,
    pub store_key: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let store_url = std::env::var("SUPABASE_URL").expect("missing SUPABASE_URL");
        let store_key = std::env::var("SUPABASE_ANON_KEY").expect("missing SUPABASE_ANON_KEY");

        let port = match std::env::var("PORT").ok().map(|p| p.parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(e)) => {
                tracing::warn!(err = ?e, "invalid PORT value, falling back to 3000.");
                3000
            }
            None => {
                tracing::info!("no PORT set, using 3000.");
                3000
            }
        };

        Self {
            store_url: store_url.trim_end_matches('/').to_string(),
            store_key,
            port,
        }
    }
}
