// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Language selection — decide once per process which Tesseract pack the OCR
// pipeline is asked for, and whether a custom word list is passed along.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::Command;

use ocrwerk_core::OcrSettings;
use ocrwerk_core::error::{OcrwerkError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Header line printed by `tesseract --list-langs` before the identifiers.
const LIST_LANGS_HEADER: &str = "List of available languages";

/// Source of the installed Tesseract language packs.
pub trait LanguageCatalog {
    fn installed_languages(&self) -> Result<BTreeSet<String>>;
}

/// A fixed, already known set of packs.
impl LanguageCatalog for BTreeSet<String> {
    fn installed_languages(&self) -> Result<BTreeSet<String>> {
        Ok(self.clone())
    }
}

/// Asks the Tesseract binary for its installed packs.
#[derive(Debug, Clone)]
pub struct TesseractCatalog {
    program: String,
}

impl TesseractCatalog {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn from_settings(settings: &OcrSettings) -> Self {
        Self::new(settings.tesseract_program.clone())
    }
}

impl LanguageCatalog for TesseractCatalog {
    #[instrument(skip(self), fields(program = %self.program))]
    fn installed_languages(&self) -> Result<BTreeSet<String>> {
        let output = Command::new(&self.program)
            .arg("--list-langs")
            .output()
            .map_err(|err| {
                OcrwerkError::LanguageQuery(format!("failed to run {}: {}", self.program, err))
            })?;

        if !output.status.success() {
            return Err(OcrwerkError::LanguageQuery(format!(
                "{} --list-langs failed: {}",
                self.program,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        // Tesseract 3.x printed the listing on stderr.
        let stdout = String::from_utf8_lossy(&output.stdout);
        let languages = if stdout.trim().is_empty() {
            parse_language_list(&String::from_utf8_lossy(&output.stderr))
        } else {
            parse_language_list(&stdout)
        };

        debug!(count = languages.len(), "Tesseract languages listed");
        Ok(languages)
    }
}

/// Parse the output of `tesseract --list-langs`.
pub fn parse_language_list(listing: &str) -> BTreeSet<String> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(LIST_LANGS_HEADER))
        .map(String::from)
        .collect()
}

/// Language arguments shared by every OCR invocation of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Tesseract pack passed through `-l`.
    pub language: String,
    /// Word list passed through `--user-words`, if the file was present.
    pub user_words: Option<PathBuf>,
}

impl LanguageConfig {
    /// Pick the language pack and probe for the word list.
    ///
    /// The legal pack wins when installed; anything else, including a failed
    /// catalog query, selects the fallback pack.
    pub fn detect(settings: &OcrSettings, catalog: &dyn LanguageCatalog) -> Self {
        let installed = catalog.installed_languages().unwrap_or_else(|err| {
            warn!(%err, "Could not list installed language packs, using fallback");
            BTreeSet::new()
        });

        let language = if installed.contains(&settings.legal_language) {
            settings.legal_language.clone()
        } else {
            settings.fallback_language.clone()
        };
        info!("Using language {} for OCR", language);

        let user_words = settings
            .word_list
            .exists()
            .then(|| settings.word_list.clone());
        debug!(?user_words, "Word list probed");

        Self {
            language,
            user_words,
        }
    }

    /// `--skip-text -l <language> [--user-words <path>]`.
    pub fn base_args(&self) -> Vec<String> {
        let mut args = vec![
            "--skip-text".to_string(),
            "-l".to_string(),
            self.language.clone(),
        ];
        if let Some(words) = &self.user_words {
            args.push("--user-words".to_string());
            args.push(words.to_string_lossy().into_owned());
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(languages: &[&str]) -> BTreeSet<String> {
        languages.iter().map(|lang| lang.to_string()).collect()
    }

    fn settings_without_word_list() -> OcrSettings {
        OcrSettings {
            word_list: PathBuf::from("/nonexistent/ocrwerk/custom-wordlist.txt"),
            ..Default::default()
        }
    }

    struct FailingCatalog;

    impl LanguageCatalog for FailingCatalog {
        fn installed_languages(&self) -> Result<BTreeSet<String>> {
            Err(OcrwerkError::LanguageQuery("tesseract not installed".into()))
        }
    }

    #[test]
    fn legal_pack_selected_when_installed() {
        let config = LanguageConfig::detect(
            &settings_without_word_list(),
            &catalog(&["eng", "ro_legal", "ron"]),
        );
        assert_eq!(config.language, "ro_legal");
    }

    #[test]
    fn fallback_selected_when_legal_pack_missing() {
        let config =
            LanguageConfig::detect(&settings_without_word_list(), &catalog(&["eng", "ron"]));
        assert_eq!(config.language, "ron");

        let empty = LanguageConfig::detect(&settings_without_word_list(), &catalog(&[]));
        assert_eq!(empty.language, "ron");
    }

    #[test]
    fn failed_query_degrades_to_fallback() {
        let config = LanguageConfig::detect(&settings_without_word_list(), &FailingCatalog);
        assert_eq!(config.language, "ron");
    }

    #[test]
    fn detection_is_idempotent() {
        let settings = settings_without_word_list();
        let installed = catalog(&["ro_legal"]);
        assert_eq!(
            LanguageConfig::detect(&settings, &installed),
            LanguageConfig::detect(&settings, &installed)
        );
    }

    #[test]
    fn word_list_added_only_when_present() {
        let config = LanguageConfig::detect(&settings_without_word_list(), &catalog(&["ron"]));
        assert_eq!(config.user_words, None);
        assert_eq!(config.base_args(), vec!["--skip-text", "-l", "ron"]);

        let file = tempfile::NamedTempFile::new().unwrap();
        let settings = OcrSettings {
            word_list: file.path().to_path_buf(),
            ..Default::default()
        };
        let config = LanguageConfig::detect(&settings, &catalog(&["ron"]));
        let words = file.path().to_string_lossy().into_owned();
        assert_eq!(
            config.base_args(),
            vec!["--skip-text", "-l", "ron", "--user-words", words.as_str()]
        );
    }

    #[test]
    fn list_langs_output_parsed() {
        let listing = "List of available languages in \"/usr/share/tesseract-ocr/5/tessdata/\" (4):\n\
                       eng\n\
                       osd\n\
                       ro_legal\n\
                       ron\n";
        assert_eq!(
            parse_language_list(listing),
            catalog(&["eng", "osd", "ro_legal", "ron"])
        );
        assert!(parse_language_list("").is_empty());
    }

    #[test]
    fn missing_tesseract_is_a_query_error() {
        let err = TesseractCatalog::new("/nonexistent/ocrwerk/tesseract")
            .installed_languages()
            .unwrap_err();
        assert!(matches!(err, OcrwerkError::LanguageQuery(_)));
    }
}
