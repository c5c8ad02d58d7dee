//! The `examportal exams` commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use examportal_client::config::load_config_from;
use examportal_client::create_service;
use examportal_core::model::{Figure, NewExam};

fn figure_or_dash(figure: &Option<Figure>) -> String {
    figure
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".to_string())
}

pub async fn list(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let service = create_service(&config)?;

    let exams = service.list_exams().await.context("failed to list exams")?;
    if exams.is_empty() {
        println!("No exams found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Exam", "Correct", "Wrong", "NA"]);
    for exam in &exams {
        table.add_row(vec![
            Cell::new(exam.exam_name.as_deref().unwrap_or("-")),
            Cell::new(figure_or_dash(&exam.correct)),
            Cell::new(figure_or_dash(&exam.wrong)),
            Cell::new(figure_or_dash(&exam.na)),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn create(
    name: String,
    correct: f64,
    wrong: f64,
    na: f64,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(!name.trim().is_empty(), "exam name must not be empty");

    let config = load_config_from(config_path.as_deref())?;
    let service = create_service(&config)?;

    let exam = NewExam {
        exam_name: name.trim().to_string(),
        correct,
        wrong,
        na,
    };
    service
        .create_exam(&exam)
        .await
        .with_context(|| format!("failed to create exam '{}'", exam.exam_name))?;
    println!("Created exam: {}", exam.exam_name);
    Ok(())
}

pub async fn delete(name: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let service = create_service(&config)?;

    service
        .delete_exam(&name)
        .await
        .with_context(|| format!("failed to delete exam '{name}'"))?;
    println!("Deleted exam: {name}");
    Ok(())
}
