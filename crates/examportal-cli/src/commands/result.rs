//! The `examportal result` command.

use std::path::PathBuf;

use anyhow::Result;

use examportal_client::config::load_config_from;
use examportal_client::create_service;
use examportal_core::navigation::ResultLocation;
use examportal_core::result_page::load_result_page;

use super::show_page;

pub async fn execute(
    href: Option<String>,
    exam: Option<String>,
    roll: Option<String>,
    format: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let location = match href {
        Some(href) => ResultLocation::from_href(&href),
        None => exam
            .zip(roll)
            .filter(|(exam, roll)| !exam.is_empty() && !roll.is_empty())
            .map(|(exam, roll)| ResultLocation { exam, roll }),
    };

    let service = create_service(&config)?;
    let page = load_result_page(location.as_ref(), service.as_ref()).await;

    show_page(&page, &format, output, &config.output_dir)
}
