// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR backends — the two ways of running the OCR pipeline with a prepared
// argument list.
//
// `ProcessBackend` spawns the `ocrmypdf` executable and captures its output
// streams. `InProcessBackend` calls an embedded entry point that only reports
// an exit code. The retry policy in `OcrInvoker` is shared by both.

use std::process::Command;

use ocrwerk_core::OcrSettings;
use ocrwerk_core::error::{OcrwerkError, Result};
use ocrwerk_core::types::OcrOutput;
use tracing::debug;

/// Runs the OCR pipeline once with the given arguments.
///
/// A non-zero exit code is a normal `Ok` outcome; `Err` means the pipeline
/// could not be started at all.
pub trait OcrBackend {
    /// Short name used in log fields.
    fn name(&self) -> &str;

    fn invoke(&self, args: &[String]) -> Result<OcrOutput>;
}

/// Spawns the `ocrmypdf` executable.
#[derive(Debug, Clone)]
pub struct ProcessBackend {
    program: String,
    verbose: bool,
}

impl ProcessBackend {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            verbose: false,
        }
    }

    pub fn from_settings(settings: &OcrSettings) -> Self {
        Self::new(settings.ocrmypdf_program.clone()).with_verbose(settings.verbose)
    }

    /// Pass `-v` ahead of the pipeline arguments.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl OcrBackend for ProcessBackend {
    fn name(&self) -> &str {
        &self.program
    }

    fn invoke(&self, args: &[String]) -> Result<OcrOutput> {
        let mut command = Command::new(&self.program);
        if self.verbose {
            command.arg("-v");
        }
        command.args(args);
        debug!(program = %self.program, ?args, "Spawning OCR pipeline");

        let output = command.output().map_err(|err| {
            OcrwerkError::OcrLaunch(format!("failed to run {}: {}", self.program, err))
        })?;

        Ok(OcrOutput {
            // No code means the process was killed by a signal.
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Calls an embedded OCR entry point that takes the argument list and returns
/// an exit code.
pub struct InProcessBackend<F> {
    entry: F,
}

impl<F> InProcessBackend<F>
where
    F: Fn(&[String]) -> i32,
{
    pub fn new(entry: F) -> Self {
        Self { entry }
    }
}

impl<F> OcrBackend for InProcessBackend<F>
where
    F: Fn(&[String]) -> i32,
{
    fn name(&self) -> &str {
        "in-process"
    }

    fn invoke(&self, args: &[String]) -> Result<OcrOutput> {
        Ok(OcrOutput::from_exit_code((self.entry)(args)))
    }
}
