mod app;
mod cli;
mod config;
mod domain;
mod event;
mod net;
mod terminal;
mod ui;

use app::{App, AppActions};
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let base_url = config::init_app_config()?;
    let actions = AppActions::with_base_url(base_url);

    // Headless mode for scripts and non-TTY output
    if args.headless || !is_terminal() {
        return event::run_headless(&actions, args.json, args.area.as_deref()).await;
    }

    // Startup fetch: area hierarchy → index → navigation tree. A failure
    // is not fatal; the UI comes up with an error message and a retry key.
    let mut app = App::new(actions);
    app.initialize().await;
    if !app.hierarchy_loaded {
        eprintln!("Area hierarchy unavailable at startup");
        eprintln!("Will continue with limited functionality");
    }

    // Setup terminal
    let mut terminal = terminal::setup_terminal()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app).await;

    // Restore terminal
    terminal::cleanup_terminal_state(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
