// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ocrwerk — Core types, settings, and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::OcrSettings;
pub use error::{OcrwerkError, Result};
pub use types::*;
