use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;

use super::document_parser::ResumeDocumentParser;
use super::errors::CoreError;
use super::models::{BatchProgress, CandidateProfile, FilterCriteria};
use super::processor::ResumeProcessor;

/// Runs documents through the processor one at a time on a blocking thread.
pub struct BatchRunner {
    processor: Arc<ResumeProcessor>,
    parser: Arc<ResumeDocumentParser>,
}

impl BatchRunner {
    pub fn new(processor: ResumeProcessor) -> Self {
        Self::with_parser(processor, ResumeDocumentParser::default())
    }

    pub fn with_parser(processor: ResumeProcessor, parser: ResumeDocumentParser) -> Self {
        Self {
            processor: Arc::new(processor),
            parser: Arc::new(parser),
        }
    }

    /// One profile per path, in input order. Unreadable documents still
    /// produce a profile carrying only their source identifier. Progress is
    /// sent after each document; a dropped receiver does not stop the batch.
    pub async fn run(
        &self,
        paths: Vec<PathBuf>,
        criteria: Option<FilterCriteria>,
        progress_tx: Option<mpsc::Sender<BatchProgress>>,
    ) -> anyhow::Result<Vec<CandidateProfile>> {
        let processor = Arc::clone(&self.processor);
        let parser = Arc::clone(&self.parser);

        tokio::task::spawn_blocking(move || {
            let total = paths.len();
            tracing::info!(total, "batch started");

            let mut profiles = Vec::with_capacity(total);
            for (index, path) in paths.iter().enumerate() {
                let source_file = path.display().to_string();
                let text = read_document(&parser, path).unwrap_or_else(|err| {
                    log_acquisition_failure(&source_file, &err);
                    String::new()
                });

                profiles.push(processor.extract_profile(&text, &source_file, criteria.as_ref()));

                if let Some(tx) = &progress_tx {
                    let progress = BatchProgress {
                        processed: index + 1,
                        total,
                        percent: percent_done(index + 1, total),
                        source_file,
                    };
                    if tx.blocking_send(progress).is_err() {
                        tracing::debug!("progress receiver dropped");
                    }
                }
            }

            tracing::info!(total, "batch finished");
            profiles
        })
        .await
        .context("batch worker panicked")
    }
}

fn read_document(parser: &ResumeDocumentParser, path: &Path) -> anyhow::Result<String> {
    let file_name = path
        .file_name()
        .and_then(|v| v.to_str())
        .unwrap_or_default();
    let bytes = std::fs::read(path).map_err(|err| CoreError::DocumentRead {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;
    parser.extract_text(file_name, &bytes)
}

fn log_acquisition_failure(source_file: &str, err: &anyhow::Error) {
    match err.downcast_ref::<CoreError>() {
        Some(core) if core.is_recoverable() => {
            tracing::warn!(source_file, error = %core, "document skipped; empty profile returned")
        }
        _ => tracing::warn!(source_file, error = %format!("{err:#}"), "text acquisition failed"),
    }
}

fn percent_done(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    u8::try_from(processed * 100 / total).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ExtractionSettings;
    use crate::core::ner::NoopRecognizer;

    fn runner() -> BatchRunner {
        BatchRunner::new(ResumeProcessor::new(
            Arc::new(NoopRecognizer),
            ExtractionSettings::default(),
        ))
    }

    #[test]
    fn percent_is_floored() {
        assert_eq!(percent_done(1, 3), 33);
        assert_eq!(percent_done(2, 3), 66);
        assert_eq!(percent_done(3, 3), 100);
        assert_eq!(percent_done(0, 0), 100);
    }

    #[tokio::test]
    async fn processes_files_in_order_and_reports_progress() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("omar.txt");
        let second = dir.path().join("layla.txt");
        std::fs::write(&first, "Name: Omar Khaled\nLocation: Cairo, Egypt\n").unwrap();
        std::fs::write(&second, "Name: Layla Hassan\nNationality: Jordanian\n").unwrap();

        let (tx, mut rx) = mpsc::channel(8);
        let criteria = FilterCriteria {
            location: "Cairo".to_string(),
            ..FilterCriteria::default()
        };
        let profiles = runner()
            .run(vec![first.clone(), second], Some(criteria), Some(tx))
            .await
            .unwrap();

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].name, "Omar Khaled");
        assert_eq!(profiles[0].match_score, 1.0);
        assert_eq!(profiles[0].source_file, first.display().to_string());
        assert_eq!(profiles[1].name, "Layla Hassan");
        assert_eq!(profiles[1].nationality, "Jordanian");
        assert_eq!(profiles[1].match_score, 0.0);

        let mut updates = Vec::new();
        while let Some(update) = rx.recv().await {
            updates.push(update);
        }
        let percents: Vec<u8> = updates.iter().map(|u| u.percent).collect();
        assert_eq!(percents, [50, 100]);
        assert_eq!(updates[1].processed, 2);
        assert_eq!(updates[1].total, 2);
    }

    #[tokio::test]
    async fn unreadable_documents_yield_empty_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let unsupported = dir.path().join("cv.odt");
        std::fs::write(&unsupported, "Name: Omar Khaled").unwrap();
        let missing = dir.path().join("missing.txt");

        let profiles = runner()
            .run(vec![unsupported.clone(), missing.clone()], None, None)
            .await
            .unwrap();

        assert_eq!(
            profiles,
            vec![
                CandidateProfile::empty(unsupported.display().to_string()),
                CandidateProfile::empty(missing.display().to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn empty_batch_returns_nothing() {
        let profiles = runner().run(Vec::new(), None, None).await.unwrap();
        assert!(profiles.is_empty());
    }
}
