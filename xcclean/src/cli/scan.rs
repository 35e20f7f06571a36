// xcclean/src/cli/scan.rs
use clap::Args;
use colored::Colorize;
use prettytable::{format, Cell, Row, Table};
use xcclean_common::config::Config;
use xcclean_common::error::Result;
use xcclean_common::format::{format_age, format_bytes};
use xcclean_core::category::Category;
use xcclean_core::scan::scan_categories;

#[derive(Args, Debug)]
pub struct Scan {
    /// Categories to scan; scans everything when omitted
    #[arg(value_enum)]
    pub categories: Vec<Category>,
    /// Emit the scan report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Scan {
    pub async fn run(&self, config: &Config) -> Result<()> {
        let categories = if self.categories.is_empty() {
            Category::all().to_vec()
        } else {
            selected_in_catalog_order(&self.categories)
        };

        if !self.json {
            println!("{}", "Scanning Xcode storage...".cyan());
        }
        let report = scan_categories(&categories, config).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        if report.is_empty() {
            println!("{}", "Nothing to clean, Xcode storage is tidy.".green());
            return Ok(());
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
        table.add_row(Row::new(vec![
            Cell::new("Category").style_spec("b"),
            Cell::new("Item").style_spec("b"),
            Cell::new("Size").style_spec("b"),
            Cell::new("Last Used").style_spec("b"),
        ]));
        for entry in &report.entries {
            let age = entry
                .modified
                .map(format_age)
                .unwrap_or_else(|| "-".to_string());
            table.add_row(Row::new(vec![
                Cell::new(entry.category.label()).style_spec("Fg"),
                Cell::new(&entry.name).style_spec("Fb"),
                Cell::new(&format_bytes(entry.size_bytes)),
                Cell::new(&age),
            ]));
        }
        table.printstd();

        println!(
            "{}",
            format!(
                "{} items, {} reclaimable",
                report.entries.len(),
                format_bytes(report.total_bytes())
            )
            .bold()
        );
        println!("Run {} to remove them.", "xcclean clean --all".cyan());
        Ok(())
    }
}

/// Dedupes the user's selection and keeps catalog order so output is stable.
pub(crate) fn selected_in_catalog_order(picked: &[Category]) -> Vec<Category> {
    Category::all()
        .iter()
        .copied()
        .filter(|c| picked.contains(c))
        .collect()
}
