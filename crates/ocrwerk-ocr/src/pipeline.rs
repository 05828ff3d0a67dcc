// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document pipeline — encryption check, in-place decryption, OCR, and text
// extraction from the OCR output, in that order.

use std::path::Path;

use ocrwerk_core::error::Result;
use ocrwerk_core::types::OcrReport;
use ocrwerk_document::{extract_and_dump, extract_plain_text, is_pdf_encrypted, remove_encryption};
use tracing::{info, instrument};

use crate::backend::OcrBackend;
use crate::invoker::OcrInvoker;

/// Outcome of processing one document.
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    pub report: OcrReport,
    /// The input was encrypted and has been rewritten in place.
    pub decrypted: bool,
    /// Plain text of the OCR output.
    pub text: String,
}

/// Runs the whole post-processing sequence for one document at a time.
pub struct DocumentPipeline<B> {
    invoker: OcrInvoker<B>,
}

impl<B: OcrBackend> DocumentPipeline<B> {
    pub fn new(invoker: OcrInvoker<B>) -> Self {
        Self { invoker }
    }

    pub fn invoker(&self) -> &OcrInvoker<B> {
        &self.invoker
    }

    /// OCR `input` into `output_pdf` and return its text, also writing the
    /// text to `text_output` when given.
    ///
    /// An encrypted input is decrypted in place first, so the file at `input`
    /// is modified in that case.
    #[instrument(skip_all, fields(input = %input.as_ref().display()))]
    pub fn process(
        &self,
        input: impl AsRef<Path>,
        output_pdf: impl AsRef<Path>,
        text_output: Option<&Path>,
    ) -> Result<ProcessedDocument> {
        let (input, output_pdf) = (input.as_ref(), output_pdf.as_ref());

        let decrypted = is_pdf_encrypted(input)?;
        if decrypted {
            remove_encryption(input)?;
        }

        let report = self.invoker.run(input, output_pdf)?;

        let text = match text_output {
            Some(path) => extract_and_dump(output_pdf, path)?,
            None => extract_plain_text(output_pdf)?,
        };

        info!(
            output_type = %report.output_type,
            decrypted,
            chars = text.len(),
            "Document processed"
        );

        Ok(ProcessedDocument {
            report,
            decrypted,
            text,
        })
    }
}
