//! HTML result page generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use examportal_core::result_page::{ResultPage, TableRow, COLUMNS};

/// Escape service-supplied text for element content and attribute values.
fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Generate an HTML document showing a result page.
pub fn generate_html(page: &ResultPage) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let title = if page.exam_title.is_empty() {
        "Exam result".to_string()
    } else {
        format!("{} result", html_escape(&page.exam_title))
    };
    html.push_str(&format!("<title>{title}</title>\n"));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Status line
    let hidden = if page.status.visible {
        ""
    } else {
        " style=\"display:none\""
    };
    html.push_str(&format!(
        "<p id=\"statusMsg\" class=\"status\"{hidden}>{}</p>\n",
        html_escape(&page.status.text)
    ));

    // Candidate details
    html.push_str("<section class=\"details\">\n");
    html.push_str(&format!(
        "<h1 id=\"examName\">{}</h1>\n",
        html_escape(&page.exam_title)
    ));
    html.push_str(&format!(
        "<p>Name: <strong id=\"rName\">{}</strong></p>\n",
        html_escape(&page.candidate_name)
    ));
    html.push_str(&format!(
        "<p>Roll: <strong id=\"rRoll\">{}</strong></p>\n",
        html_escape(&page.candidate_roll)
    ));
    html.push_str("</section>\n");

    // Subject table
    html.push_str("<table class=\"results-table\">\n<thead><tr>");
    for column in COLUMNS {
        html.push_str(&format!("<th>{column}</th>"));
    }
    html.push_str("</tr></thead>\n");
    html.push_str("<tbody id=\"subjectTableBody\">\n");
    for row in &page.rows {
        html.push_str(&render_row(row));
    }
    html.push_str("</tbody></table>\n");

    html.push_str(&format!(
        "<footer class=\"meta\">Rendered {}</footer>\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</body>\n</html>");
    html
}

fn render_row(row: &TableRow) -> String {
    let mut tr = if row.highlighted {
        String::from("<tr class=\"overall\">")
    } else {
        String::from("<tr>")
    };
    for cell in row.cells() {
        tr.push_str(&format!("<td>{}</td>", html_escape(&cell)));
    }
    tr.push_str("</tr>\n");
    tr
}

/// Render `page` and save it at `path`, creating missing directories.
pub fn write_html_report(page: &ResultPage, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    std::fs::write(path, generate_html(page))
        .with_context(|| format!("failed to write result page: {}", path.display()))
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --accent: #6366f1; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
.status { padding: 0.75rem 1rem; border: 1px solid var(--border); border-radius: 8px; }
.meta { color: #6b7280; margin-top: 2rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
tr.overall { background: var(--accent); color: white; font-weight: bold; }
"#;
