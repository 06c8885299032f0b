mod config;

pub use config::{get_base_url, init_app_config};
