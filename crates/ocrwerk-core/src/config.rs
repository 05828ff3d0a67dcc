// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{OcrwerkError, Result};

/// Tesseract pack trained on legal-domain text.
pub const LEGAL_LANGUAGE: &str = "ro_legal";
/// Generic pack used when the legal pack is not installed.
pub const FALLBACK_LANGUAGE: &str = "ron";
/// Default location of the custom word list, relative to the working directory.
pub const DEFAULT_WORD_LIST: &str = "nlp/resources/custom-wordlist.txt";

/// Settings read once at startup and used to build a
/// `LanguageConfig` and the OCR backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// Preferred Tesseract language pack.
    pub legal_language: String,
    /// Pack used when `legal_language` is not installed.
    pub fallback_language: String,
    /// Optional word list passed through `--user-words` when the file exists.
    pub word_list: PathBuf,
    /// Executable name or path of the OCR pipeline.
    pub ocrmypdf_program: String,
    /// Executable name or path of the Tesseract engine (language discovery).
    pub tesseract_program: String,
    /// Pass `-v` to subprocess invocations.
    pub verbose: bool,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            legal_language: LEGAL_LANGUAGE.to_string(),
            fallback_language: FALLBACK_LANGUAGE.to_string(),
            word_list: PathBuf::from(DEFAULT_WORD_LIST),
            ocrmypdf_program: "ocrmypdf".to_string(),
            tesseract_program: "tesseract".to_string(),
            verbose: false,
        }
    }
}

impl OcrSettings {
    /// Load settings from a JSON file. Missing fields take their defaults.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let settings: Self = serde_json::from_str(&raw)?;
        settings.validate()?;
        debug!(?settings, "OCR settings loaded");
        Ok(settings)
    }

    /// Reject settings that could never produce a working invocation.
    pub fn validate(&self) -> Result<()> {
        if self.fallback_language.trim().is_empty() {
            return Err(OcrwerkError::Config(
                "fallback_language must not be empty".to_string(),
            ));
        }
        if self.ocrmypdf_program.trim().is_empty() {
            return Err(OcrwerkError::Config(
                "ocrmypdf_program must not be empty".to_string(),
            ));
        }
        if self.tesseract_program.trim().is_empty() {
            return Err(OcrwerkError::Config(
                "tesseract_program must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
