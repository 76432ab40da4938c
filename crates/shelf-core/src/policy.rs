//! Failure policies for a save attempt.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// What a save attempt does when one of the selected photos cannot be re-encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodecFailurePolicy {
    /// Drop the photo, keep going and report the dropped count on success.
    #[default]
    Skip,
    /// Fail the whole attempt before anything is uploaded.
    Abort,
}

impl FromStr for CodecFailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(CodecFailurePolicy::Skip),
            "abort" => Ok(CodecFailurePolicy::Abort),
            _ => Err(anyhow::anyhow!("Invalid codec failure policy: {}", s)),
        }
    }
}

impl Display for CodecFailurePolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            CodecFailurePolicy::Skip => write!(f, "skip"),
            CodecFailurePolicy::Abort => write!(f, "abort"),
        }
    }
}

/// What happens to photos already uploaded when a later stage of the attempt fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrphanPolicy {
    /// Leave them in blob storage.
    #[default]
    Keep,
    /// Best-effort delete of every blob the failed attempt uploaded.
    Delete,
}

impl FromStr for OrphanPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keep" => Ok(OrphanPolicy::Keep),
            "delete" => Ok(OrphanPolicy::Delete),
            _ => Err(anyhow::anyhow!("Invalid orphan policy: {}", s)),
        }
    }
}

impl Display for OrphanPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            OrphanPolicy::Keep => write!(f, "keep"),
            OrphanPolicy::Delete => write!(f, "delete"),
        }
    }
}
