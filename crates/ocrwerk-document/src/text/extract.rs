// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text extraction — rebuild a document's text either page by page (MuPDF's
// default text) or block by block (structured text, one line per block).

use std::path::Path;

use mupdf::TextPageOptions;
use ocrwerk_core::error::{OcrwerkError, Result};
use tracing::{debug, info, instrument};

use crate::pdf::open_mupdf;

/// Per-page text access, in document order.
pub trait PageTextSource {
    fn page_count(&self) -> Result<usize>;

    /// The page's default text representation.
    fn page_text(&self, index: usize) -> Result<String>;

    /// Raw text of each block on the page. Every line inside a block is
    /// terminated by `\n`.
    fn page_blocks(&self, index: usize) -> Result<Vec<String>>;
}

/// A MuPDF document opened for text extraction.
pub struct MupdfTextSource {
    document: mupdf::Document,
}

impl MupdfTextSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            document: open_mupdf(path.as_ref())?,
        })
    }

    fn load_page(&self, index: usize) -> Result<mupdf::Page> {
        self.document
            .load_page(index as i32)
            .map_err(|err| OcrwerkError::TextExtraction(format!("cannot load page {index}: {err}")))
    }
}

impl PageTextSource for MupdfTextSource {
    fn page_count(&self) -> Result<usize> {
        let count = self
            .document
            .page_count()
            .map_err(|err| OcrwerkError::TextExtraction(format!("cannot count pages: {err}")))?;
        Ok(count.max(0) as usize)
    }

    fn page_text(&self, index: usize) -> Result<String> {
        self.load_page(index)?.to_text().map_err(|err| {
            OcrwerkError::TextExtraction(format!("cannot read text of page {index}: {err}"))
        })
    }

    fn page_blocks(&self, index: usize) -> Result<Vec<String>> {
        // Search-oriented structured text: keep ligatures and whitespace as-is.
        let options = TextPageOptions::PRESERVE_LIGATURES | TextPageOptions::PRESERVE_WHITESPACE;
        let text_page = self.load_page(index)?.to_text_page(options).map_err(|err| {
            OcrwerkError::TextExtraction(format!("cannot structure text of page {index}: {err}"))
        })?;

        let mut blocks = Vec::new();
        for block in text_page.blocks() {
            let mut text = String::new();
            for line in block.lines() {
                text.extend(line.chars().filter_map(|ch| ch.char()));
                text.push('\n');
            }
            blocks.push(text);
        }
        Ok(blocks)
    }
}

/// Concatenate every page's default text, in page order, with no separator.
pub fn collect_plain_text(source: &impl PageTextSource) -> Result<String> {
    let mut text = String::new();
    for index in 0..source.page_count()? {
        text.push_str(&source.page_text(index)?);
    }
    Ok(text)
}

/// One line per block, blocks separated by `\n`, and a `\n` after every page.
pub fn collect_block_text(source: &impl PageTextSource) -> Result<String> {
    let mut text = String::new();
    for index in 0..source.page_count()? {
        let blocks = source.page_blocks(index)?;
        let page = blocks
            .iter()
            .map(|block| flatten_block(block))
            .collect::<Vec<_>>()
            .join("\n");
        text.push_str(&page);
        text.push('\n');
    }
    Ok(text)
}

/// Collapse a block's wrapped lines onto one line.
pub fn flatten_block(block: &str) -> String {
    block.replace('\n', " ")
}

/// Naive strategy: each page's default text, concatenated.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn extract_plain_text(path: impl AsRef<Path>) -> Result<String> {
    let source = MupdfTextSource::open(path)?;
    let text = collect_plain_text(&source)?;
    debug!(chars = text.len(), "Plain text extracted");
    Ok(text)
}

/// Block strategy: structured blocks flattened to one line each.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn extract_block_text(path: impl AsRef<Path>) -> Result<String> {
    let source = MupdfTextSource::open(path)?;
    let text = collect_block_text(&source)?;
    debug!(chars = text.len(), "Block text extracted");
    Ok(text)
}

/// Extract the plain text of `path`, write it to `output`, and return it.
#[instrument(skip_all, fields(path = %path.as_ref().display(), output = %output.as_ref().display()))]
pub fn extract_and_dump(path: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<String> {
    let text = extract_plain_text(path)?;
    dump_text(&text, output)?;
    Ok(text)
}

/// Write text as UTF-8, replacing any existing file.
pub fn dump_text(text: &str, output: impl AsRef<Path>) -> Result<()> {
    let output = output.as_ref();
    std::fs::write(output, text.as_bytes())?;
    info!(output = %output.display(), bytes = text.len(), "Text written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    /// In-memory pages: (default text, raw blocks).
    struct FakePages(Vec<(String, Vec<String>)>);

    impl FakePages {
        fn new(pages: Vec<(&str, Vec<&str>)>) -> Self {
            Self(
                pages
                    .into_iter()
                    .map(|(text, blocks)| {
                        (text.to_string(), blocks.into_iter().map(String::from).collect())
                    })
                    .collect(),
            )
        }
    }

    impl PageTextSource for FakePages {
        fn page_count(&self) -> Result<usize> {
            Ok(self.0.len())
        }

        fn page_text(&self, index: usize) -> Result<String> {
            Ok(self.0[index].0.clone())
        }

        fn page_blocks(&self, index: usize) -> Result<Vec<String>> {
            Ok(self.0[index].1.clone())
        }
    }

    #[test]
    fn plain_text_concatenates_pages_in_order() {
        let pages = FakePages::new(vec![("one\n", vec![]), ("two\n", vec![]), ("three", vec![])]);
        assert_eq!(collect_plain_text(&pages).unwrap(), "one\ntwo\nthree");
    }

    #[test]
    fn empty_document_yields_empty_text() {
        let pages = FakePages::new(vec![]);
        assert_eq!(collect_plain_text(&pages).unwrap(), "");
        assert_eq!(collect_block_text(&pages).unwrap(), "");
    }

    #[test]
    fn blocks_are_flattened_one_per_line() {
        let pages = FakePages::new(vec![
            ("", vec!["Art. 1\nAlineat\n", "Titlu\n"]),
            ("", vec!["Pagina doi\n"]),
        ]);
        let text = collect_block_text(&pages).unwrap();
        assert_eq!(text, "Art. 1 Alineat \nTitlu \nPagina doi \n");

        // Two pages, three blocks: one newline between blocks, one after each page.
        assert_eq!(text.matches('\n').count(), 3);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn page_without_blocks_still_ends_with_newline() {
        let pages = FakePages::new(vec![("", vec![]), ("", vec!["x\n"])]);
        assert_eq!(collect_block_text(&pages).unwrap(), "\nx \n");
    }

    #[test]
    fn flatten_block_removes_every_newline() {
        assert_eq!(flatten_block("a\nb\n\nc"), "a b  c");
        assert!(!flatten_block("line\nwrapped\n").contains('\n'));
    }

    #[test]
    fn extracts_text_from_real_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::write_pdf(dir.path(), "two.pdf", &["Hello", "World"]);

        let plain = extract_plain_text(&path).unwrap();
        let hello = plain.find("Hello").expect("first page text");
        let world = plain.find("World").expect("second page text");
        assert!(hello < world);

        let blocks = extract_block_text(&path).unwrap();
        assert_eq!(
            blocks.lines().map(str::trim).collect::<Vec<_>>(),
            vec!["Hello", "World"]
        );
    }

    #[test]
    fn dump_writes_exactly_the_returned_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::write_pdf(dir.path(), "doc.pdf", &["Sentinta civila"]);
        let output = dir.path().join("doc.txt");
        std::fs::write(&output, "stale content that is much longer than the new text").unwrap();

        let text = extract_and_dump(&path, &output).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), text);
    }

    #[test]
    fn dump_text_is_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.txt");
        dump_text("Înalta Curte de Casație și Justiție", &output).unwrap();
        assert_eq!(
            std::fs::read(&output).unwrap(),
            "Înalta Curte de Casație și Justiție".as_bytes()
        );
    }
}
