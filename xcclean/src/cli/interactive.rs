// xcclean/src/cli/interactive.rs
//! Bare `xcclean`: pick categories, confirm, clean.

use std::io::IsTerminal;

use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, MultiSelect};
use tracing::debug;
use xcclean_common::config::Config;
use xcclean_common::error::{Result, XccleanError};
use xcclean_common::format::format_bytes;
use xcclean_core::category::Category;
use xcclean_core::clean::{clean_entries, CleanOptions};
use xcclean_core::scan::{scan_categories, ScanEntry};

use crate::cli::clean::print_outcome;

pub async fn run(config: &Config) -> Result<()> {
    if !std::io::stdin().is_terminal() {
        eprintln!(
            "Interactive mode needs a terminal. Use '{}' or '{}' instead.",
            "xcclean scan".cyan(),
            "xcclean clean --all --yes".cyan()
        );
        return Err(XccleanError::Generic("stdin is not a terminal".to_string()));
    }

    println!("{}", "Scanning Xcode storage...".cyan());
    let report = scan_categories(Category::all(), config).await?;
    if report.is_empty() {
        println!("{}", "Nothing to clean, Xcode storage is tidy.".green());
        return Ok(());
    }

    let choices: Vec<(Category, usize, u64)> = Category::all()
        .iter()
        .filter_map(|&c| {
            let count = report.category_count(c);
            if count == 0 {
                None
            } else {
                Some((c, count, report.category_total(c)))
            }
        })
        .collect();
    let labels: Vec<String> = choices
        .iter()
        .map(|(category, count, size)| {
            format!("{} ({} items, {})", category.label(), count, format_bytes(*size))
        })
        .collect();

    let theme = ColorfulTheme::default();
    let picked = MultiSelect::with_theme(&theme)
        .with_prompt("Select categories to clean (space toggles, enter confirms)")
        .items(&labels)
        .interact()
        .map_err(|e| XccleanError::Generic(format!("Selection prompt failed: {e}")))?;

    if picked.is_empty() {
        println!("Nothing selected.");
        return Ok(());
    }

    let selected: Vec<Category> = picked.iter().map(|&i| choices[i].0).collect();
    debug!("Interactive selection: {:?}", selected);
    let entries: Vec<ScanEntry> = report
        .entries
        .iter()
        .filter(|e| selected.contains(&e.category))
        .cloned()
        .collect();
    let total: u64 = entries.iter().map(|e| e.size_bytes).sum();

    let confirmed = Confirm::with_theme(&theme)
        .with_prompt(format!(
            "Remove {} items and free up to {}?",
            entries.len(),
            format_bytes(total)
        ))
        .default(false)
        .interact()
        .map_err(|e| XccleanError::Generic(format!("Confirmation prompt failed: {e}")))?;
    if !confirmed {
        println!("Aborted.");
        return Ok(());
    }

    let outcome = clean_entries(&entries, config, &CleanOptions::default());
    print_outcome(&outcome, false);

    if outcome.is_clean_failure() {
        Err(XccleanError::Clean(
            "Clean failed for one or more items.".to_string(),
        ))
    } else {
        Ok(())
    }
}
