// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Ocrwerk.

use thiserror::Error;

/// Top-level error type for all Ocrwerk operations.
#[derive(Debug, Error)]
pub enum OcrwerkError {
    // -- Document errors --
    #[error("cannot open document: {0}")]
    DocumentOpen(String),

    #[error("decryption failed: {0}")]
    Decryption(String),

    #[error("cannot save document: {0}")]
    Save(String),

    #[error("text extraction failed: {0}")]
    TextExtraction(String),

    // -- OCR errors --
    #[error("could not launch OCR pipeline: {0}")]
    OcrLaunch(String),

    /// Both the PDF/A attempt and the plain PDF retry exited non-zero.
    #[error("OCR failed (exit code {exit_code}): {stderr}")]
    OcrFailure { exit_code: i32, stderr: String },

    #[error("language pack query failed: {0}")]
    LanguageQuery(String),

    // -- Settings / persistence --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, OcrwerkError>;
