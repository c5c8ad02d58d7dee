//! The `examportal init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("examportal.toml").exists() {
        println!("examportal.toml already exists, skipping.");
    } else {
        std::fs::write("examportal.toml", SAMPLE_CONFIG)?;
        println!("Created examportal.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point base_url in examportal.toml at your scoring service");
    println!("  2. Run: examportal exams list");
    println!("  3. Run: examportal submit --exam \"<exam>\" --name ... --file response.html");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# examportal configuration

# Scoring service. ${VAR} references are expanded from the environment,
# and EXAMPORTAL_BASE_URL overrides this value.
base_url = "http://127.0.0.1:5000"

# Request timeout in seconds; leave unset to wait indefinitely.
# timeout_secs = 30

# Page the submission flow navigates to.
result_page = "result.html"

# Where `--format html` writes result pages.
output_dir = "./examportal-results"
"#;
