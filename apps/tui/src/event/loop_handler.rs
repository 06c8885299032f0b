use color_eyre::Result;
use crossterm::event::{self, Event};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;

use crate::app::{handle_input, App, AppActions};
use crate::domain::{build_center_groups, AreaIndex};
use crate::ui;

/// Run the application in headless mode (no UI).
///
/// With an area code, fetch and print that forecast document; otherwise
/// fetch the hierarchy and print a summary of it.
pub async fn run_headless(actions: &AppActions, json: bool, area: Option<&str>) -> Result<()> {
    if let Some(code) = area {
        let Some(doc) = actions.load_forecast(code).await else {
            return Err(color_eyre::eyre::eyre!("forecast fetch failed for {code}"));
        };
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    let Some(hierarchy) = actions.load_area_hierarchy().await else {
        return Err(color_eyre::eyre::eyre!("area hierarchy fetch failed"));
    };

    let stats = build_headless_stats(&hierarchy);
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        render_headless_stats(&stats);
    }

    Ok(())
}

fn render_headless_stats(stats: &HeadlessStats) {
    println!("\nJMA Forecast Areas");
    println!("===================");
    println!("Total centers: {}", stats.total_centers);
    println!("Total offices: {}", stats.total_offices);

    println!("\nCenters:");
    for center in &stats.centers {
        println!(
            "- {} | {} | {} | {} areas",
            center.code, center.name, center.en_name, center.area_count
        );
    }
}

fn build_headless_stats(hierarchy: &serde_json::Value) -> HeadlessStats {
    let index = AreaIndex::from_hierarchy(hierarchy);
    let groups = build_center_groups(hierarchy, &index);

    let centers = groups
        .iter()
        .map(|group| HeadlessCenter {
            code: group.code.clone(),
            name: group.name.clone(),
            en_name: group.en_name.clone(),
            area_count: group.areas.len(),
        })
        .collect();

    HeadlessStats {
        total_centers: groups.len(),
        total_offices: index.len(),
        centers,
    }
}

#[derive(serde::Serialize)]
struct HeadlessStats {
    total_centers: usize,
    total_offices: usize,
    centers: Vec<HeadlessCenter>,
}

#[derive(serde::Serialize)]
struct HeadlessCenter {
    code: String,
    name: String,
    en_name: String,
    area_count: usize,
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    loop {
        // Update animations
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_))
                | Err(_) => {
                    // Ignore non-key events for now
                }
            }
        }

        // Input handlers only flag the work; the fetch itself runs here,
        // inline, stalling further input until it completes.
        if let Some(code) = app.pending_fetch.take() {
            app.status_message = format!("Fetching forecast for {code}...");
            if terminal.draw(|f| ui::ui(app, f)).is_err() {
                // Non-fatal redraw error
            }

            let result = app.actions.load_forecast(&code).await;
            app.apply_forecast_result(code, result);
        }

        if app.pending_reload {
            app.pending_reload = false;
            app.status_message = "Reloading area data...".to_string();
            if terminal.draw(|f| ui::ui(app, f)).is_err() {
                // Non-fatal redraw error
            }

            let hierarchy = app.actions.load_area_hierarchy().await;
            app.apply_hierarchy(hierarchy);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn headless_stats_summarize_hierarchy() {
        let hierarchy = json!({
            "centers": {
                "010300": { "name": "関東甲信地方", "enName": "Kanto Koshin", "children": ["130000", "140000"] },
                "010100": { "name": "北海道地方", "children": ["016000"] }
            },
            "offices": {
                "130000": { "name": "東京都" },
                "140000": { "name": "神奈川県" },
                "016000": { "name": "石狩・空知・後志地方" }
            }
        });

        let stats = build_headless_stats(&hierarchy);

        assert_eq!(stats.total_centers, 2);
        assert_eq!(stats.total_offices, 3);
        assert_eq!(stats.centers[0].code, "010300");
        assert_eq!(stats.centers[0].area_count, 2);
        assert_eq!(stats.centers[1].en_name, "");
    }

    #[test]
    fn headless_stats_serialize_to_json() {
        let stats = build_headless_stats(&json!({
            "centers": { "C1": { "name": "Kanto", "children": ["130010"] } },
            "offices": { "130010": { "name": "Tokyo" } }
        }));

        let rendered = serde_json::to_string_pretty(&stats).unwrap();

        assert!(rendered.contains("\"total_centers\": 1"));
        assert!(rendered.contains("\"area_count\": 1"));
    }

    #[test]
    fn headless_stats_tolerate_malformed_input() {
        let stats = build_headless_stats(&json!(null));

        assert_eq!(stats.total_centers, 0);
        assert_eq!(stats.total_offices, 0);
        assert!(stats.centers.is_empty());
    }
}
