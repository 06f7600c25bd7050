//! Validators decide, from the per-type dispositions, whether an output
//! file has to be written at all

use crate::disposition::Disposition;

/// `None` means the source has no tracks of that type.
pub trait Validator: Send + Sync {
    fn validate(&self, video: Option<Disposition>, audio: Option<Disposition>) -> bool;

    fn name(&self) -> &'static str;
}

/// Transcodes when any group is compressed or removed. When every present
/// group passes through, the source can be used as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValidator;

impl Validator for DefaultValidator {
    fn validate(&self, video: Option<Disposition>, audio: Option<Disposition>) -> bool {
        [video, audio].into_iter().flatten().any(|d| match d {
            Disposition::Compress | Disposition::Remove => true,
            Disposition::PassThrough => false,
        })
    }

    fn name(&self) -> &'static str {
        "default"
    }
}

/// Always writes an output, even when everything passes through
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteAlwaysValidator;

impl Validator for WriteAlwaysValidator {
    fn validate(&self, _video: Option<Disposition>, _audio: Option<Disposition>) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "write_always"
    }
}
