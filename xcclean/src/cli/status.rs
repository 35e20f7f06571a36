// xcclean/src/cli/status.rs
use clap::Args;
use colored::Colorize;
use prettytable::{format, Cell, Row, Table};
use xcclean_common::config::Config;
use xcclean_common::error::Result;
use xcclean_common::format::format_bytes;
use xcclean_core::category::Category;
use xcclean_core::disk::{self, DiskOverview};
use xcclean_core::scan::scan_categories;

#[derive(Args, Debug)]
pub struct Status {
    /// Emit the overview as JSON
    #[arg(long)]
    pub json: bool,
}

impl Status {
    pub async fn run(&self, config: &Config) -> Result<()> {
        let report = scan_categories(Category::all(), config).await?;
        let volume = disk::root_volume()?;

        if self.json {
            let payload = serde_json::json!({
                "disk": volume,
                "categories": Category::all()
                    .iter()
                    .map(|c| serde_json::json!({
                        "category": c,
                        "label": c.label(),
                        "items": report.category_count(*c),
                        "size_bytes": report.category_total(*c),
                    }))
                    .collect::<Vec<_>>(),
                "reclaimable_bytes": report.total_bytes(),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
            return Ok(());
        }

        println!("{}", render_overview_header(&volume));
        println!();

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
        table.add_row(Row::new(vec![
            Cell::new("Category").style_spec("b"),
            Cell::new("Items").style_spec("b"),
            Cell::new("Size").style_spec("b"),
        ]));
        for &category in Category::all() {
            let count = report.category_count(category);
            let size = report.category_total(category);
            let size_cell = if size > 0 {
                Cell::new(&format_bytes(size)).style_spec("Fy")
            } else {
                Cell::new("-")
            };
            table.add_row(Row::new(vec![
                Cell::new(category.label()).style_spec("Fb"),
                Cell::new(&count.to_string()),
                size_cell,
            ]));
        }
        table.printstd();

        println!(
            "{}",
            format!(
                "{} of Xcode storage is reclaimable",
                format_bytes(report.total_bytes())
            )
            .bold()
        );
        Ok(())
    }
}

/// "Mac Storage Overview" is the banner the Homebrew formula's test block
/// greps for.
fn render_overview_header(volume: &DiskOverview) -> String {
    format!(
        "{}\n{} total, {} used, {} free on {}",
        "Mac Storage Overview".bold(),
        format_bytes(volume.total_bytes),
        format_bytes(volume.used_bytes()),
        format_bytes(volume.available_bytes).green(),
        volume.mount_point.display()
    )
}
