use std::path::{Path, PathBuf};

use anyhow::Context;

use super::models::ExtractionSettings;

pub struct SettingsStore {
    file_path: PathBuf,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self {
            file_path: settings_path(),
        }
    }

    pub fn at(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// A missing file means defaults; a present but malformed one is an error.
    pub async fn load(&self) -> anyhow::Result<ExtractionSettings> {
        if !tokio::fs::try_exists(&self.file_path)
            .await
            .unwrap_or(false)
        {
            return Ok(ExtractionSettings::default());
        }

        let content = tokio::fs::read_to_string(&self.file_path)
            .await
            .with_context(|| {
                format!("failed to read settings file {}", self.file_path.display())
            })?;

        let parsed = serde_json::from_str::<ExtractionSettings>(&content).with_context(|| {
            format!("invalid JSON in settings file {}", self.file_path.display())
        })?;

        Ok(parsed.sanitized())
    }

    pub async fn save(&self, settings: &ExtractionSettings) -> anyhow::Result<()> {
        settings.validate()?;

        if let Some(parent) = self.file_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(settings)?;
        tokio::fs::write(&self.file_path, json)
            .await
            .with_context(|| {
                format!("failed to write settings file {}", self.file_path.display())
            })?;
        Ok(())
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

fn settings_path() -> PathBuf {
    app_data_root().join("extraction-settings.json")
}

pub fn app_data_root() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ResumeClassifier")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(dir.path().join("absent.json"));
        assert_eq!(store.load().await.unwrap(), ExtractionSettings::default());
    }

    #[tokio::test]
    async fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(dir.path().join("nested").join("settings.json"));
        let settings = ExtractionSettings {
            preview_limit: 120,
            location_header_lines: 4,
            ..ExtractionSettings::default()
        };

        store.save(&settings).await.unwrap();
        assert_eq!(store.load().await.unwrap(), settings);
    }

    #[tokio::test]
    async fn partial_json_fills_defaults_and_clamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        tokio::fs::write(&path, r#"{"previewLimit":0,"maxLocationTokens":5}"#)
            .await
            .unwrap();

        let loaded = SettingsStore::at(&path).load().await.unwrap();
        assert_eq!(loaded.preview_limit, 1);
        assert_eq!(loaded.max_location_tokens, 5);
        assert_eq!(loaded.name_ner_window, 800);
    }

    #[tokio::test]
    async fn malformed_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let err = SettingsStore::at(&path).load().await.unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[tokio::test]
    async fn invalid_settings_are_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = ExtractionSettings {
            name_ner_window: 10,
            name_ner_max_start: 50,
            ..ExtractionSettings::default()
        };

        assert!(SettingsStore::at(&path).save(&settings).await.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn default_location_is_under_app_data_root() {
        let store = SettingsStore::new();
        assert!(store.path().starts_with(app_data_root()));
        assert!(store.path().ends_with("extraction-settings.json"));
    }
}
