//! The `config` display and the `log` toggle.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use crate::state::AppState;

/// Print the configuration record as a table.
pub async fn show_config(state: &AppState) -> Result<()> {
    let config = state.config.read().await;

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Setting").fg(Color::White),
        Cell::new("Value").fg(Color::White),
    ]);

    table.add_row(vec![Cell::new("app_name"), Cell::new(&config.app_name)]);
    table.add_row(vec![
        Cell::new("model"),
        Cell::new(&config.model).fg(Color::Cyan),
    ]);
    table.add_row(vec![
        Cell::new("temperature"),
        Cell::new(config.temperature.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("max_tokens"),
        Cell::new(config.max_tokens.to_string()),
    ]);
    table.add_row(vec![Cell::new("top_p"), Cell::new(config.top_p.to_string())]);
    table.add_row(vec![
        Cell::new("frequency_penalty"),
        Cell::new(config.frequency_penalty.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("presence_penalty"),
        Cell::new(config.presence_penalty.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("stream"),
        Cell::new(config.stream.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("logging"),
        Cell::new(config.logging.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("system_prompt"),
        Cell::new(preview(&config.system_prompt, 60)),
    ]);
    table.add_row(vec![
        Cell::new("active_session"),
        match config.active_session.as_deref() {
            Some(id) => Cell::new(id).fg(Color::Green),
            None => Cell::new("(none)").fg(Color::DarkGrey),
        },
    ]);

    println!();
    println!("{table}");
    println!();
    println!(
        "  {}",
        style(format!("Config file: {}", state.config.path().display())).dim()
    );
    println!(
        "  {}",
        style(format!("Data dir: {}", state.data_dir.display())).dim()
    );
    println!();

    Ok(())
}

/// Flip the persisted logging flag and report the new state.
pub async fn toggle_logging(state: &AppState) -> Result<()> {
    let config = state.config.update(|c| c.logging = !c.logging).await?;

    if config.logging {
        println!("  {} Logging enabled.", style("*").green().bold());
    } else {
        println!("  {}", style("Logging disabled.").dim());
    }

    Ok(())
}

/// Flatten and shorten a multi-line value for table display.
///
/// Truncation counts characters, not bytes, so multi-byte values stay intact.
fn preview(text: &str, max: usize) -> String {
    let flat = text.trim().replace('\n', " ");
    if flat.chars().count() > max {
        let head: String = flat.chars().take(max - 3).collect();
        format!("{head}...")
    } else {
        flat
    }
}
