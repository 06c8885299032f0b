//! Command-line probe for the live JMA endpoints.
//!
//! Fetches the area hierarchy, prints a short summary, and optionally one
//! forecast document for a code given as the first argument.

use color_eyre::Result;
use ratatui_jma_browser::{build_center_groups, AreaIndex, JmaClient};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let client = JmaClient::with_base_url(ratatui_jma_browser::config::get_base_url());

    let hierarchy = client.fetch_area_hierarchy().await?;
    let index = AreaIndex::from_hierarchy(&hierarchy);
    let groups = build_center_groups(&hierarchy, &index);

    println!(
        "Fetched {} centers / {} offices from {}",
        groups.len(),
        index.len(),
        client.area_url()
    );
    for group in &groups {
        println!("- {} {} ({} areas)", group.code, group.name, group.areas.len());
    }

    if let Some(code) = std::env::args().nth(1) {
        let forecast = client.fetch_forecast(&code).await?;
        println!("\nForecast for {code}:");
        println!("{}", serde_json::to_string_pretty(&forecast)?);
    }

    Ok(())
}
