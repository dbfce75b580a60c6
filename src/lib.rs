//! Heuristic extraction of candidate profiles from résumé text.
//!
//! [`core::processor::ResumeProcessor`] turns one document's text into a
//! [`core::models::CandidateProfile`]; [`core::batch::BatchRunner`] does the
//! same for files on disk and reports progress over a channel.

pub mod core;

pub use core::batch::BatchRunner;
pub use core::models::{BatchProgress, CandidateProfile, ExtractionSettings, FilterCriteria, SortKey};
pub use core::ner::{Entity, EntityLabel, EntityRecognizer, HeuristicRecognizer, NoopRecognizer};
pub use core::processor::ResumeProcessor;
