// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ocrwerk-document — PDF handling for the Ocrwerk OCR service.
//
// Provides encryption inspection (MuPDF + lopdf), in-place decryption by
// re-saving through lopdf, and text extraction from OCR output via MuPDF's
// plain and block-structured text.

pub mod pdf;
pub mod text;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

// Re-export the primary entry points so callers can use `ocrwerk_document::is_pdf_encrypted` etc.
pub use pdf::inspect::{DocumentMetadata, EncryptionFacts, is_pdf_encrypted};
pub use pdf::rewrite::{PdfRewriter, remove_encryption};
pub use text::extract::{
    MupdfTextSource, PageTextSource, dump_text, extract_and_dump, extract_block_text,
    extract_plain_text,
};
