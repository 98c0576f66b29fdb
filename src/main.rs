use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod analysis;
mod ats;
mod config;
mod dashboard;
mod error;
mod extractor;
mod fuzzy;
mod models;
mod pdf;
mod report;
mod scoring;
mod scraper;
mod skills;
mod summarizer;
mod utils;

use analysis::{AnalysisReport, Analyzer};
use config::Config;
use extractor::ExactMatchMode;
use models::ModelSet;
use skills::SkillReferenceSet;

#[derive(Parser)]
#[command(name = "resume-analyzer", version, about = "Score a resume PDF against a job description")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the analysis to stdout
    Analyze {
        #[command(flatten)]
        input: InputArgs,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
        /// Append the full extracted resume text
        #[arg(long)]
        show_text: bool,
    },
    /// Show the analysis in an interactive terminal view
    Dashboard {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Resume PDF
    #[arg(long)]
    resume: PathBuf,
    /// Job description text
    #[arg(long, conflicts_with_all = ["jd_file", "jd_url"])]
    jd: Option<String>,
    /// File holding the job description
    #[arg(long, conflicts_with = "jd_url")]
    jd_file: Option<PathBuf>,
    /// Job posting URL to scrape
    #[arg(long)]
    jd_url: Option<String>,
    /// Skill list, one per line (overrides SKILLS_FILE)
    #[arg(long)]
    skills: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_analyzer={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match cli.command {
        Commands::Analyze {
            input,
            json,
            show_text,
        } => {
            let report = run_analysis(&input, &config)?;
            if json {
                println!("{}", report::render_json(&report)?);
            } else {
                print!("{}", report::render_text(&report, show_text));
            }
        }
        Commands::Dashboard { input } => {
            let report = run_analysis(&input, &config)?;
            info!("Launching dashboard...");
            dashboard::run_dashboard(&report).context("Dashboard error")?;
        }
    }
    Ok(())
}

fn run_analysis(input: &InputArgs, config: &Config) -> anyhow::Result<AnalysisReport> {
    // Inputs are validated before the slow model load
    let jd_text = read_job_description(input)?;
    let resume_bytes = fs::read(&input.resume)
        .with_context(|| format!("Failed to read resume {}", input.resume.display()))?;

    let skills_path = input.skills.as_ref().unwrap_or(&config.skills_file);
    let skills = SkillReferenceSet::load(skills_path)
        .with_context(|| format!("Failed to read skills file {}", skills_path.display()))?;
    if skills.is_empty() {
        warn!("Skill list is empty; only entity recognition will contribute skills");
    }

    info!("Initializing models...");
    let models = ModelSet::load(config.device.to_device()).context("Failed to load models")?;

    let mode = if config.word_boundary_matching {
        ExactMatchMode::WordBoundary
    } else {
        ExactMatchMode::Substring
    };
    let analyzer = Analyzer::new(models, skills, mode);

    info!("Processing resume {}", input.resume.display());
    let report = analyzer
        .analyze_pdf(&resume_bytes, &jd_text)
        .context("Analysis failed")?;
    Ok(report)
}

fn read_job_description(input: &InputArgs) -> anyhow::Result<String> {
    let jd_text = if let Some(text) = &input.jd {
        text.clone()
    } else if let Some(path) = &input.jd_file {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read job description {}", path.display()))?
    } else if let Some(url) = &input.jd_url {
        scraper::scrape_job_url(url).with_context(|| format!("Failed to scrape {url}"))?
    } else {
        info!("Reading job description from stdin...");
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    };

    if jd_text.trim().is_empty() {
        bail!("Job description is empty");
    }
    Ok(jd_text)
}
