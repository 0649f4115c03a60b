//! Library discovery probe.

use anyhow::{Result, bail};
use console::style;

use optcrypto_types::binding::BindingSummary;
use optcrypto_types::symbol::SymbolCategory;

use crate::state::AppState;

/// Initialize the runtime and print what was bound.
///
/// With `require`, an unavailable library is reported as an error so
/// scripts can gate on the exit status.
pub fn probe(state: &AppState, require: bool, json: bool) -> Result<()> {
    let available = state.runtime.initialize();
    let summary = state.runtime.summary();

    if json {
        let report = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "enabled": state.config.enabled,
            "available": summary.available,
            "candidate": summary.candidate,
            "slots": summary.slots,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(state, &summary);
    }

    if require && !available {
        bail!("optional cryptography library unavailable");
    }
    Ok(())
}

fn print_summary(state: &AppState, summary: &BindingSummary) {
    println!();
    println!(
        "  {} optcrypto v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Library ──").dim());
    let status = if summary.available {
        style("available").green().bold()
    } else if !state.config.enabled {
        style("disabled").yellow()
    } else {
        style("unavailable").red()
    };
    println!("  Status:    {status}");
    match &summary.candidate {
        Some(candidate) => println!("  Candidate: {}", style(candidate).cyan()),
        None => println!("  Candidate: {}", style("none opened").dim()),
    }
    println!();

    if summary.slots.is_empty() {
        return;
    }

    println!("  {}", style("── Symbols ──").dim());
    println!(
        "  Generic:   {}",
        resolution_line(summary, SymbolCategory::Generic)
    );
    println!(
        "  Specific:  {}",
        resolution_line(summary, SymbolCategory::Specific)
    );

    let missing_generic = summary.unresolved(SymbolCategory::Generic);
    if !missing_generic.is_empty() {
        println!(
            "  Missing:   {}",
            style(missing_generic.join(", ")).red()
        );
    }
    let unbound = summary.unresolved(SymbolCategory::Specific);
    if !unbound.is_empty() {
        println!("  Unbound:   {}", style(unbound.join(", ")).dim());
    }
    println!();
}

/// "resolved/total resolved" for one category.
fn resolution_line(summary: &BindingSummary, category: SymbolCategory) -> String {
    let total = summary
        .slots
        .iter()
        .filter(|s| s.category == category)
        .count();
    let missing = summary.unresolved(category).len();
    format!("{}/{} resolved", total - missing, total)
}
