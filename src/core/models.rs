use serde::{Deserialize, Serialize};

use super::errors::CoreError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    pub name: String,
    /// 0 means the age could not be determined.
    pub age: u32,
    pub current_residence: String,
    pub education: String,
    pub current_role: String,
    pub email: String,
    pub phone: String,
    pub nationality: String,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    pub raw_text: String,
    pub source_file: String,
    /// Only meaningful after scoring against explicit criteria.
    pub match_score: f64,
}

impl CandidateProfile {
    pub fn empty(source_file: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub min_age: u32,
    pub max_age: u32,
    pub location: String,
    pub role: String,
    pub education: String,
    pub nationality: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            min_age: 0,
            max_age: 100,
            location: String::new(),
            role: String::new(),
            education: String::new(),
            nationality: String::new(),
        }
    }
}

impl FilterCriteria {
    pub fn has_age_constraint(&self) -> bool {
        self.min_age > 0 || self.max_age < 100
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    MatchScore,
    Name,
    Age,
    Nationality,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchProgress {
    pub processed: usize,
    pub total: usize,
    pub percent: u8,
    pub source_file: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractionSettings {
    pub preview_limit: usize,
    pub name_ner_window: usize,
    pub name_ner_max_start: usize,
    pub location_header_lines: usize,
    pub location_ner_window: usize,
    pub max_location_tokens: usize,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            preview_limit: 500,
            name_ner_window: 800,
            name_ner_max_start: 300,
            location_header_lines: 8,
            location_ner_window: 3000,
            max_location_tokens: 3,
        }
    }
}

impl ExtractionSettings {
    pub fn sanitized(self) -> Self {
        Self {
            preview_limit: self.preview_limit.max(1),
            name_ner_window: self.name_ner_window.max(1),
            name_ner_max_start: self.name_ner_max_start.min(self.name_ner_window.max(1)),
            location_header_lines: self.location_header_lines,
            location_ner_window: self.location_ner_window.max(1),
            max_location_tokens: self.max_location_tokens.max(1),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.preview_limit == 0 {
            return Err(CoreError::InvalidSettings(
                "previewLimit must be positive".to_string(),
            ));
        }
        if self.name_ner_max_start > self.name_ner_window {
            return Err(CoreError::InvalidSettings(
                "nameNerMaxStart cannot exceed nameNerWindow".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_profile_keeps_source_and_defaults() {
        let profile = CandidateProfile::empty("cv.pdf");
        assert_eq!(profile.source_file, "cv.pdf");
        assert_eq!(profile.age, 0);
        assert!(profile.name.is_empty());
        assert!(profile.languages.is_empty());
        assert_eq!(profile.match_score, 0.0);
    }

    #[test]
    fn default_criteria_have_no_age_constraint() {
        assert!(!FilterCriteria::default().has_age_constraint());
        let narrowed = FilterCriteria {
            max_age: 40,
            ..FilterCriteria::default()
        };
        assert!(narrowed.has_age_constraint());
    }

    #[test]
    fn criteria_deserialize_with_missing_fields() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"location":"Cairo","minAge":25}"#).unwrap();
        assert_eq!(criteria.location, "Cairo");
        assert_eq!(criteria.min_age, 25);
        assert_eq!(criteria.max_age, 100);
    }

    #[test]
    fn profile_serializes_camel_case() {
        let json = serde_json::to_value(CandidateProfile::empty("a.docx")).unwrap();
        assert!(json.get("currentResidence").is_some());
        assert!(json.get("matchScore").is_some());
        assert!(json.get("sourceFile").is_some());
    }

    #[test]
    fn sanitized_settings_clamp_degenerate_values() {
        let settings = ExtractionSettings {
            preview_limit: 0,
            name_ner_window: 100,
            name_ner_max_start: 400,
            ..ExtractionSettings::default()
        }
        .sanitized();
        assert_eq!(settings.preview_limit, 1);
        assert_eq!(settings.name_ner_max_start, 100);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn validate_rejects_inconsistent_windows() {
        let settings = ExtractionSettings {
            name_ner_window: 10,
            name_ner_max_start: 20,
            ..ExtractionSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
