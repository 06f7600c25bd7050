//! Track disposition - the fate decided for a group of input tracks

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a strategy decision for one track type.
///
/// This set is closed on purpose: consumers match on it exhaustively, so a
/// new variant has to be a breaking release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Track is dropped; no output track is produced for it
    Remove,
    /// Samples are copied to the output without re-encoding
    PassThrough,
    /// Samples are decoded and re-encoded to the decided target format
    Compress,
}

impl Disposition {
    /// Whether the track goes through a decode/encode path
    pub fn is_transcoding(&self) -> bool {
        matches!(self, Disposition::Compress)
    }

    pub fn is_removing(&self) -> bool {
        matches!(self, Disposition::Remove)
    }

    /// Whether an output track is produced at all
    pub fn writes_output(&self) -> bool {
        match self {
            Disposition::Remove => false,
            Disposition::PassThrough | Disposition::Compress => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::Remove => "remove",
            Disposition::PassThrough => "pass_through",
            Disposition::Compress => "compress",
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
