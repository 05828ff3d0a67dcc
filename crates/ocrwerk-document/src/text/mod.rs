// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text module — recover the text layer of OCR output.

pub mod extract;

pub use extract::{
    MupdfTextSource, PageTextSource, extract_and_dump, extract_block_text, extract_plain_text,
};
