// xcclean/src/cli/clean.rs
use std::time::Duration;

use clap::Args;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use tracing::{debug, error};
use xcclean_common::config::Config;
use xcclean_common::error::{Result, XccleanError};
use xcclean_common::format::format_bytes;
use xcclean_core::category::Category;
use xcclean_core::clean::{clean_entries, partition_by_age, CleanOptions, CleanOutcome};
use xcclean_core::scan::scan_categories;

use crate::cli::scan::selected_in_catalog_order;

#[derive(Args, Debug)]
pub struct CleanArgs {
    /// The categories to clean
    #[arg(value_enum, conflicts_with = "all")]
    pub categories: Vec<Category>,
    /// Clean every category
    #[arg(long, conflicts_with = "categories")]
    pub all: bool,
    /// Show what would be removed without deleting anything
    #[arg(long)]
    pub dry_run: bool,
    /// Only remove items last modified at least this long ago (e.g. 30d, 2weeks)
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    pub older_than: Option<Duration>,
    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl CleanArgs {
    pub async fn run(&self, config: &Config) -> Result<()> {
        let categories = if self.all {
            Category::all().to_vec()
        } else if self.categories.is_empty() {
            return Err(XccleanError::Generic(
                "No categories given. Pass --all or name the categories to clean.".to_string(),
            ));
        } else {
            selected_in_catalog_order(&self.categories)
        };

        println!("{}", "Scanning Xcode storage...".cyan());
        let report = scan_categories(&categories, config).await?;
        if report.is_empty() {
            println!("{}", "Nothing to clean.".green());
            return Ok(());
        }

        // The age filter applies before the preview so the prompt reflects
        // what will actually be removed.
        let (eligible, too_fresh) = match self.older_than {
            Some(min_age) => partition_by_age(&report.entries, min_age),
            None => (report.entries.clone(), Vec::new()),
        };

        if let Some(min_age) = self.older_than {
            if !too_fresh.is_empty() {
                println!(
                    "{}",
                    format!(
                        "{} items modified within the last {} are left alone",
                        too_fresh.len(),
                        humantime::format_duration(min_age)
                    )
                    .dimmed()
                );
            }
        }

        if eligible.is_empty() {
            println!("{}", "Nothing old enough to clean.".green());
            return Ok(());
        }

        let eligible_bytes: u64 = eligible.iter().map(|e| e.size_bytes).sum();
        println!(
            "{} items, {} reclaimable",
            eligible.len(),
            format_bytes(eligible_bytes).bold()
        );

        if !self.dry_run && !self.yes {
            let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(format!(
                    "Remove {} items and free up to {}?",
                    eligible.len(),
                    format_bytes(eligible_bytes)
                ))
                .default(false)
                .interact()
                .map_err(|e| {
                    XccleanError::Generic(format!(
                        "Confirmation prompt failed ({e}); pass --yes to skip it"
                    ))
                })?;
            if !confirmed {
                println!("Aborted.");
                return Ok(());
            }
        }

        debug!(
            "Cleaning {} entries (dry_run={}, older_than={:?})",
            eligible.len(),
            self.dry_run,
            self.older_than
        );
        let outcome = clean_entries(
            &eligible,
            config,
            &CleanOptions {
                dry_run: self.dry_run,
                older_than: self.older_than,
            },
        );
        print_outcome(&outcome, self.dry_run);

        if outcome.is_clean_failure() {
            Err(XccleanError::Clean(
                "Clean failed for one or more items.".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

pub(crate) fn print_outcome(outcome: &CleanOutcome, dry_run: bool) {
    let verb = if dry_run { "Would remove" } else { "Removed" };
    for entry in &outcome.removed {
        println!(
            "✓ {} {} {} ({})",
            verb,
            entry.category.label(),
            entry.name.green(),
            format_bytes(entry.size_bytes)
        );
    }
    for (entry, reason) in &outcome.skipped {
        println!(
            "· Skipped {} {} ({})",
            entry.category.label(),
            entry.name.cyan(),
            reason.dimmed()
        );
    }
    for (entry, err) in &outcome.failed {
        error!("✖ Failed to remove '{}': {}", entry.name.cyan(), err);
    }

    if dry_run {
        println!(
            "{}",
            format!(
                "Dry run: {} would be freed ({} items)",
                format_bytes(outcome.freed_bytes),
                outcome.removed.len()
            )
            .bold()
        );
    } else {
        println!(
            "{}",
            format!(
                "Freed {} ({} items removed, {} skipped, {} failed)",
                format_bytes(outcome.freed_bytes),
                outcome.removed.len(),
                outcome.skipped.len(),
                outcome.failed.len()
            )
            .bold()
        );
    }
}
