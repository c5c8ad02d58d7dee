//! The `examportal submit` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::task::JoinHandle;
use tracing::warn;

use examportal_client::config::load_config_from;
use examportal_client::create_service;
use examportal_core::model::AnswerFile;
use examportal_core::result_page::load_result_page;
use examportal_core::submission::{submit, SubmissionForm};

use super::show_page;
use crate::CandidateArgs;

fn read_answer_file(path: &Path) -> Result<AnswerFile> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read answer file: {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "response".to_string());
    Ok(AnswerFile::new(file_name, bytes))
}

pub async fn execute(
    candidate: CandidateArgs,
    page: Option<String>,
    follow: bool,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let file = candidate
        .file
        .as_deref()
        .map(read_answer_file)
        .transpose()?;

    let form = SubmissionForm {
        exam_name: candidate.exam,
        name: candidate.name.unwrap_or_default(),
        roll: candidate.roll.unwrap_or_default(),
        category: candidate.category.unwrap_or_default(),
        gender: candidate.gender.unwrap_or_default(),
        state: candidate.state.unwrap_or_default(),
        file,
    };

    let service = create_service(&config)?;
    let navigation = submit(form, service.clone())?;

    let result_page = page.as_deref().unwrap_or(&config.result_page);
    println!("Navigate: {}", navigation.location.href(result_page));

    if follow {
        let page = load_result_page(Some(&navigation.location), service.as_ref()).await;
        show_page(&page, &format, None, &config.output_dir)?;
    }

    finish_dispatch(navigation.dispatch).await;
    Ok(())
}

/// Let the detached request finish before the process exits.
///
/// Its outcome is logged inside the task; only a panic or cancellation
/// surfaces here.
async fn finish_dispatch(dispatch: JoinHandle<()>) {
    if let Err(e) = dispatch.await {
        warn!(error = %e, "evaluation task did not complete");
    }
}
