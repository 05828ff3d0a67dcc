// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Test fixtures — small text PDFs built in memory with lopdf, plain or
// encrypted with an empty user password.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lopdf::content::{Content, Operation};
use lopdf::encryption::crypt_filters::{Aes128CryptFilter, CryptFilter};
use lopdf::{
    Document, EncryptionState, EncryptionVersion, Object, Permissions, Stream, dictionary,
};

/// Owner password of the encrypted fixtures. The user password is empty.
pub const OWNER_PASSWORD: &str = "ocrwerk-owner";

/// Standard security handler variants used by the encrypted fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureCipher {
    /// V2, 128-bit RC4.
    Rc4,
    /// V4 with an AESV2 crypt filter.
    Aes128,
}

/// Build a PDF with one page per entry, each showing its string in Helvetica.
pub fn pdf_bytes(pages: &[&str]) -> Vec<u8> {
    serialise(build_document(pages))
}

/// Same pages as [`pdf_bytes`], encrypted so that it opens without a password.
pub fn encrypted_pdf_bytes(pages: &[&str], cipher: FixtureCipher) -> Vec<u8> {
    let mut doc = build_document(pages);
    let state = {
        let version = match cipher {
            FixtureCipher::Rc4 => EncryptionVersion::V2 {
                document: &doc,
                owner_password: OWNER_PASSWORD,
                user_password: "",
                key_length: 128,
                permissions: Permissions::all(),
            },
            FixtureCipher::Aes128 => {
                let crypt_filter: Arc<dyn CryptFilter> = Arc::new(Aes128CryptFilter);
                EncryptionVersion::V4 {
                    document: &doc,
                    encrypt_metadata: true,
                    crypt_filters: BTreeMap::from([(b"StdCF".to_vec(), crypt_filter)]),
                    stream_filter: b"StdCF".to_vec(),
                    string_filter: b"StdCF".to_vec(),
                    owner_password: OWNER_PASSWORD,
                    user_password: "",
                    permissions: Permissions::all(),
                }
            }
        };
        EncryptionState::try_from(version).expect("fixture encryption state")
    };
    doc.encrypt(&state).expect("fixture PDF encrypts");
    serialise(doc)
}

/// Write a fixture PDF into `dir` and return its path.
pub fn write_pdf(dir: &Path, name: &str, pages: &[&str]) -> PathBuf {
    write_bytes(dir, name, pdf_bytes(pages))
}

/// Write an encrypted fixture PDF into `dir` and return its path.
pub fn write_encrypted_pdf(
    dir: &Path,
    name: &str,
    pages: &[&str],
    cipher: FixtureCipher,
) -> PathBuf {
    write_bytes(dir, name, encrypted_pdf_bytes(pages, cipher))
}

fn build_document(pages: &[&str]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("fixture content encodes"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    // The standard security handler keys off the first file identifier.
    let file_id = Object::string_literal("ocrwerk-fixture-id");
    doc.trailer.set("ID", vec![file_id.clone(), file_id]);
    doc
}

fn serialise(mut doc: Document) -> Vec<u8> {
    let mut output = Vec::new();
    doc.save_to(&mut output).expect("fixture PDF serialises");
    output
}

fn write_bytes(dir: &Path, name: &str, bytes: Vec<u8>) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("fixture PDF written");
    path
}
