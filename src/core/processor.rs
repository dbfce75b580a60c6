use std::sync::Arc;

use super::confusables;
use super::field_extractor::{
    extract_age, extract_certifications, extract_current_role, extract_education, extract_email,
    extract_languages, extract_phone, FieldExtractor,
};
use super::models::{CandidateProfile, ExtractionSettings, FilterCriteria};
use super::ner::{EntityRecognizer, HeuristicRecognizer};
use super::scoring::match_score;
use super::text::char_prefix;

/// Turns one document's plain text into a [`CandidateProfile`].
///
/// Holds no per-document state, so one processor can serve a whole batch.
pub struct ResumeProcessor {
    fields: FieldExtractor,
}

impl ResumeProcessor {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>, settings: ExtractionSettings) -> Self {
        Self {
            fields: FieldExtractor::new(recognizer, settings),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(Arc::new(HeuristicRecognizer::new()), ExtractionSettings::default())
    }

    pub fn settings(&self) -> &ExtractionSettings {
        self.fields.settings()
    }

    pub fn extract_profile(
        &self,
        text: &str,
        source_file: &str,
        criteria: Option<&FilterCriteria>,
    ) -> CandidateProfile {
        if text.trim().is_empty() {
            return CandidateProfile::empty(source_file);
        }

        let text = confusables::normalize(text);
        let mut profile = CandidateProfile {
            name: self.fields.extract_name(&text),
            age: extract_age(&text),
            current_residence: self.fields.extract_location(&text),
            education: extract_education(&text),
            current_role: extract_current_role(&text),
            email: extract_email(&text),
            phone: extract_phone(&text),
            nationality: self.fields.extract_nationality(&text),
            languages: extract_languages(&text),
            certifications: extract_certifications(&text),
            raw_text: self.preview(&text),
            source_file: source_file.to_string(),
            match_score: 0.0,
        };

        if let Some(criteria) = criteria {
            profile.match_score = match_score(&profile, criteria);
        }

        tracing::debug!(
            source_file,
            name = %profile.name,
            age = profile.age,
            score = profile.match_score,
            "profile assembled"
        );
        profile
    }

    fn preview(&self, text: &str) -> String {
        let text = text.trim();
        let limit = self.settings().preview_limit;
        if text.chars().count() > limit {
            format!("{}...", char_prefix(text, limit))
        } else {
            text.to_string()
        }
    }
}

impl Default for ResumeProcessor {
    fn default() -> Self {
        Self::with_defaults()
    }
}
