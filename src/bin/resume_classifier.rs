use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tokio::sync::mpsc;

use resume_classifier_lib::core::scoring::sort_profiles;
use resume_classifier_lib::core::settings_store::SettingsStore;
use resume_classifier_lib::{
    BatchProgress, BatchRunner, FilterCriteria, HeuristicRecognizer, ResumeProcessor, SortKey,
};

#[derive(Parser)]
#[command(
    name = "resume-classifier",
    about = "Extract candidate profiles from résumés and rank them against filters",
    version
)]
struct Cli {
    /// Résumé files (.pdf, .docx, .txt)
    #[arg(required = true)]
    files: Vec<PathBuf>,
    #[arg(long, default_value_t = 0)]
    min_age: u32,
    #[arg(long, default_value_t = 100)]
    max_age: u32,
    /// Case-insensitive substring of the current residence
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    role: Option<String>,
    #[arg(long)]
    education: Option<String>,
    #[arg(long)]
    nationality: Option<String>,
    #[arg(long, value_enum, default_value_t = SortArg::Score)]
    sort: SortArg,
    /// Extraction settings JSON; defaults to the per-user data directory
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Score,
    Name,
    Age,
    Nationality,
}

impl From<SortArg> for SortKey {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Score => SortKey::MatchScore,
            SortArg::Name => SortKey::Name,
            SortArg::Age => SortKey::Age,
            SortArg::Nationality => SortKey::Nationality,
        }
    }
}

impl Cli {
    /// `None` when no filter flag narrows anything, so profiles stay unscored.
    fn criteria(&self) -> Option<FilterCriteria> {
        let criteria = FilterCriteria {
            min_age: self.min_age,
            max_age: self.max_age,
            location: self.location.clone().unwrap_or_default(),
            role: self.role.clone().unwrap_or_default(),
            education: self.education.clone().unwrap_or_default(),
            nationality: self.nationality.clone().unwrap_or_default(),
        };
        (criteria != FilterCriteria::default()).then_some(criteria)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let store = match &cli.settings {
        Some(path) => SettingsStore::at(path),
        None => SettingsStore::new(),
    };
    let settings = store
        .load()
        .await
        .with_context(|| format!("failed to load settings from {}", store.path().display()))?;

    let processor = ResumeProcessor::new(std::sync::Arc::new(HeuristicRecognizer::new()), settings);
    let runner = BatchRunner::new(processor);

    let (progress_tx, mut progress_rx) = mpsc::channel::<BatchProgress>(16);
    let reporter = tokio::spawn(async move {
        while let Some(progress) = progress_rx.recv().await {
            tracing::info!(
                processed = progress.processed,
                total = progress.total,
                percent = progress.percent,
                source_file = %progress.source_file,
                "document processed"
            );
        }
    });

    let mut profiles = runner
        .run(cli.files.clone(), cli.criteria(), Some(progress_tx))
        .await?;
    reporter.await.context("progress reporter failed")?;

    sort_profiles(&mut profiles, cli.sort.into());

    let json = serde_json::to_string_pretty(&profiles).context("failed to serialize profiles")?;
    println!("{json}");
    Ok(())
}
