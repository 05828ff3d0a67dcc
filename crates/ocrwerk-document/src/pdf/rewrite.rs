// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF rewriter — load a document with `lopdf`, drop its encryption, and write
// it back over the original file.

use std::path::{Path, PathBuf};

use lopdf::{Document, Object};
use ocrwerk_core::error::{OcrwerkError, Result};
use tracing::{debug, info, instrument};

/// A PDF loaded for in-place rewriting.
///
/// Wraps `lopdf::Document`. The whole file is read into memory on open, so the
/// rewritten bytes can safely replace the source file on save.
pub struct PdfRewriter {
    /// The underlying lopdf document.
    document: Document,
    /// File the document was loaded from and is saved back to.
    source_path: PathBuf,
}

impl PdfRewriter {
    // -- Construction ---------------------------------------------------------

    /// Load a PDF from the filesystem.
    ///
    /// A document that lopdf refuses because it cannot be decrypted without a
    /// password yields [`OcrwerkError::Decryption`]; any other load failure is
    /// [`OcrwerkError::DocumentOpen`].
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();

        let document = Document::load(path_ref).map_err(|err| {
            let detail = format!("failed to load {}: {}", path_ref.display(), err);
            if is_encryption_error(&err.to_string()) {
                OcrwerkError::Decryption(detail)
            } else {
                OcrwerkError::DocumentOpen(detail)
            }
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded for rewriting");

        Ok(Self {
            document,
            source_path: path_ref.to_path_buf(),
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Whether the trailer still carries an `/Encrypt` dictionary.
    pub fn is_encrypted(&self) -> bool {
        self.document.is_encrypted()
    }

    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    // -- Rewriting ------------------------------------------------------------

    /// Drop the document's encryption so the next save writes a plain file.
    ///
    /// lopdf decrypts on load whenever the empty user password opens the
    /// document and records that in `encryption_state`. Those objects are
    /// already plain and must not go through `decrypt` a second time.
    pub fn strip_encryption(&mut self) -> Result<()> {
        if self.document.is_encrypted() {
            if self.document.encryption_state.is_none() {
                self.document.decrypt("").map_err(|err| {
                    OcrwerkError::Decryption(format!(
                        "{} cannot be decrypted without a password: {}",
                        self.source_path.display(),
                        err
                    ))
                })?;
            } else {
                debug!("Objects already decrypted on load");
            }

            if let Ok(dictionary_id) = self
                .document
                .trailer
                .get(b"Encrypt")
                .and_then(Object::as_reference)
            {
                self.document.objects.remove(&dictionary_id);
            }
            self.document.trailer.remove(b"Encrypt");
            self.document.encryption_state = None;
        }

        let pruned = self.document.prune_objects();
        debug!(pruned = pruned.len(), "Unreferenced objects pruned");
        Ok(())
    }

    /// Serialise the document to bytes.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.document.save_to(&mut output).map_err(|err| {
            OcrwerkError::Save(format!(
                "failed to serialise {}: {}",
                self.source_path.display(),
                err
            ))
        })?;
        Ok(output)
    }

    /// Overwrite the source file with the current document.
    pub fn save_in_place(mut self) -> Result<()> {
        let output = self.to_bytes()?;
        std::fs::write(&self.source_path, &output)?;
        debug!(output_bytes = output.len(), "Document written back to source");
        Ok(())
    }
}

/// Strip encryption from a PDF by re-saving it over itself.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn remove_encryption(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    info!("Saving unencrypted document: {}", path.display());

    let mut rewriter = PdfRewriter::open(path)?;
    rewriter.strip_encryption()?;
    rewriter.save_in_place()
}

/// lopdf reports password and decryption problems only through its error text.
pub(crate) fn is_encryption_error(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    lower.contains("encrypt") || lower.contains("decrypt") || lower.contains("password")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, FixtureCipher};
    use crate::pdf::inspect::is_pdf_encrypted;
    use crate::text::extract::extract_plain_text;

    fn page_content(rewriter: &PdfRewriter) -> String {
        let (_, page_id) = rewriter.document.get_pages().into_iter().next().unwrap();
        String::from_utf8_lossy(&rewriter.document.get_page_content(page_id).unwrap()).into_owned()
    }

    fn assert_decrypts_intact(cipher: FixtureCipher) {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::write_encrypted_pdf(
            dir.path(),
            "encrypted.pdf",
            &["Sentinta civila", "Dosar nr. 7"],
            cipher,
        );
        assert!(is_pdf_encrypted(&path).unwrap());

        remove_encryption(&path).unwrap();

        assert!(!is_pdf_encrypted(&path).unwrap());
        let reopened = PdfRewriter::open(&path).unwrap();
        assert!(!reopened.is_encrypted());
        assert_eq!(reopened.page_count(), 2);
        assert!(
            page_content(&reopened).contains("(Sentinta civila) Tj"),
            "content was {:?}",
            page_content(&reopened)
        );

        let text = extract_plain_text(&path).unwrap();
        assert!(text.contains("Sentinta civila"), "text was {text:?}");
        assert!(text.contains("Dosar nr. 7"), "text was {text:?}");
    }

    #[test]
    fn encryption_error_detection() {
        assert!(is_encryption_error("Decryption error: incorrect password"));
        assert!(is_encryption_error("document is Encrypted"));
        assert!(!is_encryption_error("invalid file trailer"));
    }

    #[test]
    fn rewrite_keeps_pages_and_stays_unencrypted() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::write_pdf(dir.path(), "plain.pdf", &["first page", "second page"]);

        remove_encryption(&path).unwrap();

        let reopened = PdfRewriter::open(&path).unwrap();
        assert_eq!(reopened.page_count(), 2);
        assert!(!reopened.is_encrypted());
        assert!(!is_pdf_encrypted(&path).unwrap());
    }

    #[test]
    fn rc4_document_loses_encryption_but_not_text() {
        assert_decrypts_intact(FixtureCipher::Rc4);
    }

    #[test]
    fn aes_document_loses_encryption_but_not_text() {
        assert_decrypts_intact(FixtureCipher::Aes128);
    }

    #[test]
    fn load_time_decryption_is_not_repeated() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::write_encrypted_pdf(
            dir.path(),
            "rc4.pdf",
            &["Sentinta civila"],
            FixtureCipher::Rc4,
        );

        let mut rewriter = PdfRewriter::open(&path).unwrap();
        assert!(rewriter.is_encrypted());
        assert!(rewriter.document.encryption_state.is_some());
        let before = page_content(&rewriter);
        assert!(before.contains("(Sentinta civila) Tj"), "content was {before:?}");

        rewriter.strip_encryption().unwrap();
        assert!(!rewriter.is_encrypted());
        assert!(rewriter.document.encryption_state.is_none());
        assert_eq!(page_content(&rewriter), before);

        // Stripping an already plain document changes nothing.
        rewriter.strip_encryption().unwrap();
        assert_eq!(page_content(&rewriter), before);
    }

    #[test]
    fn garbage_file_is_document_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let err = remove_encryption(&path).unwrap_err();
        assert!(matches!(err, OcrwerkError::DocumentOpen(_)), "got {err:?}");
        // The failed rewrite must leave the input untouched.
        assert_eq!(std::fs::read(&path).unwrap(), b"this is not a pdf");
    }

    #[test]
    fn missing_file_is_document_open_error() {
        let err = PdfRewriter::open("/nonexistent/ocrwerk/missing.pdf")
            .err()
            .unwrap();
        assert!(matches!(err, OcrwerkError::DocumentOpen(_)));
    }
}
