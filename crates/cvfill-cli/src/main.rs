use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use cvfill_core::{load_settings_from_env, FillOptions, ResumeDocument, Settings};
use cvfill_driver::Session;
use cvfill_sites::{detect_form, dispatch_fill, FillTrigger};

#[derive(Debug, Parser)]
#[command(name = "cvfill")]
#[command(about = "Fill job application forms from a JSON Resume document")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fill the application form on the browser's current page.
    Fill {
        /// Path to the resume document (JSON Resume format).
        resume: PathBuf,
        #[command(flatten)]
        connection: Connection,
        #[command(flatten)]
        answers: Answers,
        /// Run with the automatic-trigger guards (reload detection).
        #[arg(long)]
        auto: bool,
    },
    /// Report which supported platform the current page belongs to.
    Detect {
        #[command(flatten)]
        connection: Connection,
    },
}

#[derive(Debug, Args)]
struct Connection {
    /// Attach to an existing WebDriver session instead of starting one.
    #[arg(long)]
    session_id: Option<String>,
}

/// Per-run answers, overriding the configured defaults.
#[derive(Debug, Args)]
struct Answers {
    #[arg(long)]
    employment_type: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    expected_salary: Option<String>,
    #[arg(long)]
    availability: Option<String>,
    #[arg(long)]
    cover_letter: Option<String>,
    #[arg(long)]
    work_mode: Option<String>,
    #[arg(long)]
    english_level: Option<String>,
}

impl Answers {
    fn merge_into(self, mut options: FillOptions) -> FillOptions {
        if self.employment_type.is_some() {
            options.employment_type = self.employment_type;
        }
        if self.location.is_some() {
            options.location = self.location;
        }
        if self.expected_salary.is_some() {
            options.expected_salary = self.expected_salary;
        }
        if self.availability.is_some() {
            options.availability_date = self.availability;
        }
        if self.cover_letter.is_some() {
            options.cover_letter = self.cover_letter;
        }
        if self.work_mode.is_some() {
            options.work_mode = self.work_mode;
        }
        if self.english_level.is_some() {
            options.english_level = self.english_level;
        }
        options
    }
}

async fn connect(settings: &Settings, connection: &Connection) -> anyhow::Result<Session> {
    match &connection.session_id {
        Some(id) => Session::attach(&settings.webdriver_url, id, settings.request_timeout_secs)
            .context("attaching to webdriver session"),
        None => Session::start(&settings.webdriver_url, settings.request_timeout_secs)
            .await
            .context("starting webdriver session"),
    }
}

fn load_resume(path: &PathBuf) -> anyhow::Result<ResumeDocument> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading resume {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing resume {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = load_settings_from_env()?;

    match cli.command {
        Commands::Fill {
            resume,
            connection,
            answers,
            auto,
        } => {
            let resume = load_resume(&resume)?;
            let options = answers.merge_into(settings.default_options());
            let trigger = if auto {
                FillTrigger::Auto
            } else {
                FillTrigger::Manual
            };
            let session = connect(&settings, &connection).await?;
            let outcome = dispatch_fill(&session, &resume, &options, &settings, trigger).await?;
            if outcome.success {
                println!("{}", outcome.message);
            } else {
                println!("{} ({})", outcome.message, outcome.form_type);
            }
        }
        Commands::Detect { connection } => {
            let session = connect(&settings, &connection).await?;
            let outcome = detect_form(&session).await?;
            if outcome.detected {
                println!("{}: {}", outcome.form_type, outcome.url);
            } else {
                println!("no supported form at {}", outcome.url);
            }
        }
    }

    Ok(())
}
