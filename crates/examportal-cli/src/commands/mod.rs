pub mod exams;
pub mod init;
pub mod result;
pub mod submit;

use std::path::{Path, PathBuf};

use anyhow::Result;
use comfy_table::{Attribute, Cell, Table};

use examportal_core::result_page::{ResultPage, COLUMNS};
use examportal_report::html::write_html_report;

/// Print or write a result page in the requested format.
///
/// HTML goes to `output` when given, otherwise to a timestamped file under
/// `output_dir`.
pub fn show_page(
    page: &ResultPage,
    format: &str,
    output: Option<PathBuf>,
    output_dir: &Path,
) -> Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(page)?),
        "html" => {
            let path = output.unwrap_or_else(|| {
                let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
                output_dir.join(format!("result-{timestamp}.html"))
            });
            write_html_report(page, &path)?;
            eprintln!("HTML result: {}", path.display());
        }
        "text" => print_page(page),
        other => anyhow::bail!("unknown format: {other} (expected text, html, or json)"),
    }
    Ok(())
}

fn print_page(page: &ResultPage) {
    if page.status.visible {
        println!("{}", page.status.text);
    }
    if page.exam_title.is_empty() && page.rows.is_empty() {
        return;
    }

    println!("{}", page.exam_title);
    println!("Name: {}", page.candidate_name);
    println!("Roll: {}", page.candidate_roll);

    let mut table = Table::new();
    table.set_header(COLUMNS.to_vec());
    for row in &page.rows {
        let cells = row.cells().map(|text| {
            let cell = Cell::new(text);
            if row.highlighted {
                cell.add_attribute(Attribute::Bold)
            } else {
                cell
            }
        });
        table.add_row(cells.to_vec());
    }
    println!("{table}");
}
