//! examportal CLI — submit answer sheets and view scored results.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "examportal", version, about = "Exam evaluation portal client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Candidate details as entered by the operator.
///
/// Every field is optional here so that a blank form reaches the submission
/// flow and gets its own prompt.
#[derive(Args)]
pub struct CandidateArgs {
    /// Exam chosen from `examportal exams list`
    #[arg(long)]
    pub exam: Option<String>,

    /// Candidate name
    #[arg(long)]
    pub name: Option<String>,

    /// Roll number
    #[arg(long)]
    pub roll: Option<String>,

    /// Category (e.g. GEN, OBC)
    #[arg(long)]
    pub category: Option<String>,

    /// Gender
    #[arg(long)]
    pub gender: Option<String>,

    /// State of domicile
    #[arg(long)]
    pub state: Option<String>,

    /// Answer sheet to upload
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit an answer sheet for evaluation
    Submit {
        #[command(flatten)]
        candidate: CandidateArgs,

        /// Result page to navigate to (defaults to the configured page)
        #[arg(long)]
        page: Option<String>,

        /// Load and show the result right after navigating
        #[arg(long)]
        follow: bool,

        /// Output format used with --follow: text, html, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show a scored result
    Result {
        /// Result page href, e.g. "result.html?exam=Mock_Exam&roll=1"
        #[arg(long)]
        location: Option<String>,

        /// Exam key (used when --location is absent)
        #[arg(long)]
        exam: Option<String>,

        /// Roll number (used when --location is absent)
        #[arg(long)]
        roll: Option<String>,

        /// Output format: text, html, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Write HTML to this path instead of the configured output directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List and manage exams
    Exams {
        #[command(subcommand)]
        action: ExamAction,

        /// Config file path
        #[arg(long, global = true)]
        config: Option<PathBuf>,
    },

    /// Create a starter config
    Init,
}

#[derive(Subcommand)]
enum ExamAction {
    /// List exams and their marking schemes
    List,

    /// Create an exam
    Create {
        /// Exam name
        #[arg(long)]
        name: String,

        /// Marks per correct answer
        #[arg(long, default_value = "4")]
        correct: f64,

        /// Marks per wrong answer
        #[arg(long, default_value = "-1", allow_negative_numbers = true)]
        wrong: f64,

        /// Marks per unanswered question
        #[arg(long, default_value = "0")]
        na: f64,
    },

    /// Delete an exam and its recorded responses
    Delete {
        /// Exam name
        #[arg(long)]
        name: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("examportal_core=info".parse().unwrap())
                .add_directive("examportal_client=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Submit {
            candidate,
            page,
            follow,
            format,
            config,
        } => commands::submit::execute(candidate, page, follow, format, config).await,
        Commands::Result {
            location,
            exam,
            roll,
            format,
            output,
            config,
        } => commands::result::execute(location, exam, roll, format, output, config).await,
        Commands::Exams { action, config } => match action {
            ExamAction::List => commands::exams::list(config).await,
            ExamAction::Create {
                name,
                correct,
                wrong,
                na,
            } => commands::exams::create(name, correct, wrong, na, config).await,
            ExamAction::Delete { name } => commands::exams::delete(name, config).await,
        },
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
