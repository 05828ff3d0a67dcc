// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR invoker — run the pipeline for PDF/A output and, when that fails, retry
// exactly once forcing plain PDF output.
//
// Some inputs cannot be coerced into a valid PDF/A structure. Plain PDF keeps
// the searchable text layer, so one retry trades conformance for robustness.
// There is no third attempt, no backoff, and no timeout.

use std::path::Path;

use ocrwerk_core::OcrSettings;
use ocrwerk_core::error::{OcrwerkError, Result};
use ocrwerk_core::types::{OcrOutput, OcrReport, OutputType};
use tracing::{debug, error, info, instrument};

use crate::backend::{OcrBackend, ProcessBackend};
use crate::language::{LanguageConfig, TesseractCatalog};

/// Runs the OCR pipeline with the process-wide language configuration.
pub struct OcrInvoker<B> {
    backend: B,
    language: LanguageConfig,
}

impl OcrInvoker<ProcessBackend> {
    /// Startup initialisation: query Tesseract for the language once and
    /// prepare the `ocrmypdf` subprocess backend.
    pub fn from_settings(settings: &OcrSettings) -> Result<Self> {
        settings.validate()?;
        let language = LanguageConfig::detect(settings, &TesseractCatalog::from_settings(settings));
        Ok(Self::new(ProcessBackend::from_settings(settings), language))
    }
}

impl<B: OcrBackend> OcrInvoker<B> {
    pub fn new(backend: B, language: LanguageConfig) -> Self {
        Self { backend, language }
    }

    pub fn language(&self) -> &LanguageConfig {
        &self.language
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Argument list for one attempt: output-type flags, language arguments,
    /// then input and output paths.
    pub fn build_args(
        &self,
        output_type: OutputType,
        input: &Path,
        output: &Path,
    ) -> Result<Vec<String>> {
        let mut args: Vec<String> = output_type
            .leading_args()
            .iter()
            .map(|arg| arg.to_string())
            .collect();
        args.extend(self.language.base_args());
        args.push(path_arg(input)?);
        args.push(path_arg(output)?);
        Ok(args)
    }

    /// OCR `input` into a searchable `output`, preferring PDF/A.
    ///
    /// # Errors
    ///
    /// - [`OcrwerkError::OcrLaunch`] if the backend cannot be started (no retry).
    /// - [`OcrwerkError::OcrFailure`] with the retry's stderr if both attempts
    ///   exit non-zero.
    #[instrument(skip_all, fields(
        input = %input.as_ref().display(),
        output = %output.as_ref().display(),
        backend = self.backend.name(),
    ))]
    pub fn run(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<OcrReport> {
        let (input, output) = (input.as_ref(), output.as_ref());

        let first = self.attempt(OutputType::PdfA, input, output)?;
        if first.success() {
            return Ok(OcrReport {
                output_type: OutputType::PdfA,
                output: first,
            });
        }

        info!(
            exit_code = first.exit_code,
            reason = describe_exit_code(first.exit_code),
            "Input file could not be converted to PDF/A, running OCR again with --output-type pdf"
        );

        let retry = self.attempt(OutputType::Pdf, input, output)?;
        if !retry.success() {
            error!(
                exit_code = retry.exit_code,
                reason = describe_exit_code(retry.exit_code),
                stderr = %retry.stderr,
                "OCR failed for both PDF/A and plain PDF output"
            );
            return Err(OcrwerkError::OcrFailure {
                exit_code: retry.exit_code,
                stderr: retry.stderr,
            });
        }

        Ok(OcrReport {
            output_type: OutputType::Pdf,
            output: retry,
        })
    }

    fn attempt(&self, output_type: OutputType, input: &Path, output: &Path) -> Result<OcrOutput> {
        let args = self.build_args(output_type, input, output)?;
        let result = self.backend.invoke(&args)?;
        debug!(
            %output_type,
            exit_code = result.exit_code,
            stdout = %result.stdout,
            stderr = %result.stderr,
            "OCR attempt finished"
        );
        Ok(result)
    }
}

/// Short description of an `ocrmypdf` exit code, for log lines.
pub fn describe_exit_code(code: i32) -> &'static str {
    match code {
        0 => "ok",
        1 => "bad arguments",
        2 => "input file is not a valid PDF",
        3 => "missing dependency",
        4 => "output PDF is invalid",
        5 => "file access error",
        6 => "page already has text",
        7 => "child process error",
        8 => "input PDF is encrypted",
        9 => "invalid configuration",
        10 => "PDF/A conversion failed",
        15 => "other error",
        130 => "interrupted",
        -1 => "terminated by signal",
        _ => "unknown exit code",
    }
}

fn path_arg(path: &Path) -> Result<String> {
    path.to_str().map(str::to_string).ok_or_else(|| {
        OcrwerkError::OcrLaunch(format!("path is not valid UTF-8: {}", path.display()))
    })
}
