// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — encryption inspection and decryption by re-serialisation.

pub mod inspect;
pub mod rewrite;

use std::path::Path;

use ocrwerk_core::error::{OcrwerkError, Result};

pub use inspect::{EncryptionFacts, is_pdf_encrypted};
pub use rewrite::{PdfRewriter, remove_encryption};

/// Open a document through MuPDF.
pub(crate) fn open_mupdf(path: &Path) -> Result<mupdf::Document> {
    mupdf::Document::open(path).map_err(|err| {
        OcrwerkError::DocumentOpen(format!("failed to open {}: {}", path.display(), err))
    })
}
