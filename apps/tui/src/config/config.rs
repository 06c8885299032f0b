use crate::net::DEFAULT_BASE_URL;
use dotenv::dotenv;
use std::env;

/// Initializes the application configuration.
/// Returns the endpoint base URL the client should use.
pub fn init_app_config() -> color_eyre::eyre::Result<String> {
    // Load environment variables from .env file
    dotenv().ok();

    Ok(get_base_url())
}

/// Resolves the endpoint base, `JMA_BASE_URL` taking precedence over the
/// built-in default. Trailing slashes are tolerated.
pub fn get_base_url() -> String {
    env::var("JMA_BASE_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}
