//! Candidate list display.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Print the effective candidate list in resolution order.
pub fn list_candidates(state: &AppState, json: bool) -> Result<()> {
    let candidates = state.runtime.candidates();
    let source = if state.config.candidates.is_empty() {
        "platform"
    } else {
        "config"
    };

    if json {
        let report = serde_json::json!({
            "source": source,
            "config_path": state.config_path.as_ref().map(|p| p.display().to_string()),
            "enabled": state.config.enabled,
            "candidates": candidates,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    if !state.config.enabled {
        println!(
            "  {} Loading is disabled in {}",
            style("!").yellow().bold(),
            state
                .config_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "config".to_string())
        );
        println!();
    }

    if candidates.is_empty() {
        println!(
            "  {} No candidates for this platform",
            style("i").blue().bold()
        );
        println!();
        return Ok(());
    }

    for (index, candidate) in candidates.iter().enumerate() {
        println!(
            "  {}. {}",
            index + 1,
            style(candidate).cyan()
        );
    }
    println!();
    println!("  {}", style(format!("source: {source}")).dim());
    println!();

    Ok(())
}
