use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(name = "ratatui_jma-browser", version, about = "JMA forecast area browser TUI")]
pub struct CliArgs {
    /// Print the area hierarchy summary and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Fetch one forecast document in headless mode
    #[arg(long, value_name = "CODE")]
    pub area: Option<String>,

    /// Override the JMA endpoint base URL
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.base_url {
            std::env::set_var("JMA_BASE_URL", url);
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}
