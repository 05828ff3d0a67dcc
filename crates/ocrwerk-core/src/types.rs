// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types shared by the document and OCR crates.

use serde::{Deserialize, Serialize};

/// Output flavour requested from the OCR pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputType {
    /// Archival PDF/A (the pipeline default, no extra flag).
    PdfA,
    /// Plain PDF, used when the input cannot be coerced into PDF/A.
    Pdf,
}

impl OutputType {
    /// Extra leading arguments that select this output type.
    pub fn leading_args(&self) -> &'static [&'static str] {
        match self {
            Self::PdfA => &[],
            Self::Pdf => &["--output-type", "pdf"],
        }
    }
}

impl std::fmt::Display for OutputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PdfA => f.write_str("PDF/A"),
            Self::Pdf => f.write_str("PDF"),
        }
    }
}

/// What one invocation of the OCR pipeline produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrOutput {
    /// Process exit code; `-1` when the process was terminated by a signal.
    pub exit_code: i32,
    /// Captured standard output (empty for in-process invocations).
    pub stdout: String,
    /// Captured standard error (empty for in-process invocations).
    pub stderr: String,
}

impl OcrOutput {
    /// Output of an in-process run, which only yields an exit code.
    pub fn from_exit_code(exit_code: i32) -> Self {
        Self {
            exit_code,
            ..Default::default()
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Successful OCR run together with the output type that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrReport {
    pub output_type: OutputType,
    pub output: OcrOutput,
}
