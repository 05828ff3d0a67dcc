// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ocrwerk-ocr — Drives the external OCR pipeline.
//
// Selects the Tesseract language once at startup, runs `ocrmypdf` through a
// pluggable backend (subprocess or in-process entry point) with a single
// plain-PDF retry when PDF/A output fails, and ties encryption handling, OCR,
// and text extraction together in `DocumentPipeline`.

pub mod backend;
pub mod invoker;
pub mod language;
pub mod pipeline;

pub use backend::{InProcessBackend, OcrBackend, ProcessBackend};
pub use invoker::{OcrInvoker, describe_exit_code};
pub use language::{LanguageCatalog, LanguageConfig, TesseractCatalog};
pub use pipeline::{DocumentPipeline, ProcessedDocument};
