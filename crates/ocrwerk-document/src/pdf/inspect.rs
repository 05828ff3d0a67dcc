// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Encryption inspection — gather the password, encryption flag, and metadata
// facts about a PDF and decide whether it must be decrypted before OCR.

use std::path::Path;

use mupdf::MetadataName;
use ocrwerk_core::error::{OcrwerkError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::open_mupdf;
use super::rewrite::PdfRewriter;

/// MuPDF reports this encryption value for unencrypted documents.
const NO_ENCRYPTION: &str = "None";

/// Document information as reported by MuPDF.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Format and version, e.g. `PDF 1.7`.
    pub format: String,
    /// Security handler description, e.g. `Standard V4 R4 128-bit AES`.
    pub encryption: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub creation_date: Option<String>,
}

impl DocumentMetadata {
    /// Read the metadata of an open document.
    ///
    /// Returns `None` when even the format cannot be determined, which happens
    /// for documents MuPDF could open but not parse.
    fn read(document: &mupdf::Document) -> Option<Self> {
        let lookup = |name: MetadataName| -> Option<String> {
            document.metadata(name).ok().filter(|value| !value.is_empty())
        };

        let format = lookup(MetadataName::Format)?;

        Some(Self {
            format,
            encryption: lookup(MetadataName::Encryption).filter(|value| value != NO_ENCRYPTION),
            title: lookup(MetadataName::Title),
            author: lookup(MetadataName::Author),
            subject: lookup(MetadataName::Subject),
            creator: lookup(MetadataName::Creator),
            creation_date: lookup(MetadataName::CreationDate),
        })
    }
}

/// Everything needed to decide whether a PDF is encrypted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionFacts {
    /// The document cannot be opened without a password.
    pub needs_password: bool,
    /// The trailer declares an `/Encrypt` dictionary.
    pub encrypted: bool,
    /// `None` when the metadata could not be read at all.
    pub metadata: Option<DocumentMetadata>,
}

impl EncryptionFacts {
    /// Inspect a PDF on disk.
    ///
    /// Both document handles are dropped before this returns, on every path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn inspect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let (needs_password, metadata) = {
            let document = open_mupdf(path)?;
            let needs_password = document.needs_password().map_err(|err| {
                OcrwerkError::DocumentOpen(format!(
                    "cannot query password state of {}: {}",
                    path.display(),
                    err
                ))
            })?;
            (needs_password, DocumentMetadata::read(&document))
        };

        // A locked document is encrypted by definition, no need to read the trailer.
        let encrypted = needs_password || trailer_declares_encryption(path);

        let facts = Self {
            needs_password,
            encrypted,
            metadata,
        };
        debug!(?facts, "Encryption facts gathered");
        Ok(facts)
    }

    /// Whether the document must go through `remove_encryption` before OCR.
    ///
    /// Missing metadata counts as encrypted.
    pub fn is_encrypted(&self) -> bool {
        let Some(metadata) = &self.metadata else {
            return true;
        };
        if self.needs_password || self.encrypted {
            return true;
        }
        metadata
            .encryption
            .as_deref()
            .is_some_and(|value| !value.is_empty())
    }
}

/// Report whether a PDF is password-protected or flagged as encrypted.
///
/// # Errors
///
/// Returns [`OcrwerkError::DocumentOpen`] if the file cannot be opened as a PDF.
pub fn is_pdf_encrypted(path: impl AsRef<Path>) -> Result<bool> {
    Ok(EncryptionFacts::inspect(path)?.is_encrypted())
}

/// MuPDF has already opened the file at this point, so a document lopdf
/// cannot load only means there is no trailer flag to read.
fn trailer_declares_encryption(path: &Path) -> bool {
    match PdfRewriter::open(path) {
        Ok(rewriter) => rewriter.is_encrypted(),
        Err(err) => {
            debug!(%err, "lopdf could not load the document, trailer not checked");
            false
        }
    }
}
