use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::DEFAULT_RESULTS_URL;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub results_url: String,
    pub http_timeout: Duration,
}

pub fn load() -> Result<Config> {
    let database_path = env::var("MEGASENA_DB_PATH")
        .unwrap_or_else(|_| "data/megasena.db".to_string())
        .into();

    let results_url =
        env::var("MEGASENA_API_URL").unwrap_or_else(|_| DEFAULT_RESULTS_URL.to_string());

    let http_timeout = match env::var("MEGASENA_HTTP_TIMEOUT_SECS") {
        Ok(raw) => Duration::from_secs(
            raw.trim()
                .parse()
                .with_context(|| format!("MEGASENA_HTTP_TIMEOUT_SECS is not a number: {raw}"))?,
        ),
        Err(_) => Duration::from_secs(30),
    };

    Ok(Config {
        database_path,
        results_url,
        http_timeout,
    })
}
