// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Farbwerk.

use thiserror::Error;

/// Top-level error type for all Farbwerk operations.
#[derive(Debug, Error)]
pub enum FarbwerkError {
    // -- Validation errors --
    /// Bad caller input: mismatched dimensions, zero worker count, more
    /// workers than the image can be split into, malformed ranges.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // -- Engine errors --
    /// A worker thread panicked mid-recolor.  The destination buffer must be
    /// treated as garbage when this is returned.
    #[error("worker thread panicked: {0}")]
    WorkerPanic(String),

    // -- Collaborator errors --
    #[error("image operation failed: {0}")]
    Image(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FarbwerkError>;
