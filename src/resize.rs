//! Output size policies for video compression
//!
//! Resizers work on the major (longer) and minor (shorter) sides, so a
//! policy applies the same way to landscape and portrait inputs.

use serde::Serialize;
use std::fmt::Debug;

use crate::error::StrategyError;

/// Frame dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn major(&self) -> u32 {
        self.width.max(self.height)
    }

    pub fn minor(&self) -> u32 {
        self.width.min(self.height)
    }

    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }

    /// Build a size from sides, keeping the orientation of `like`
    pub fn from_sides(major: u32, minor: u32, like: Size) -> Self {
        if like.is_portrait() {
            Size::new(minor, major)
        } else {
            Size::new(major, minor)
        }
    }

    /// Round both sides down to a multiple of `alignment` (never below it).
    /// An alignment of zero is treated as one.
    pub fn aligned(&self, alignment: u32) -> Self {
        let alignment = alignment.max(1);
        let align = |v: u32| (v / alignment * alignment).max(alignment);
        Size::new(align(self.width), align(self.height))
    }

    fn ensure_non_empty(&self) -> Result<(), StrategyError> {
        if self.width == 0 || self.height == 0 {
            return Err(StrategyError::invalid(
                "size",
                format!("{}x{} has an empty side", self.width, self.height),
            ));
        }
        Ok(())
    }
}

/// Computes the output size from the input size
pub trait Resizer: Send + Sync + Debug {
    fn resize(&self, input: Size) -> Result<Size, StrategyError>;
}

/// Keeps the input size
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughResizer;

impl Resizer for PassThroughResizer {
    fn resize(&self, input: Size) -> Result<Size, StrategyError> {
        Ok(input)
    }
}

/// Scales both sides by a fraction in `(0, 1]`
#[derive(Debug, Clone, Copy)]
pub struct FractionResizer {
    fraction: f64,
}

impl FractionResizer {
    pub fn new(fraction: f64) -> Result<Self, StrategyError> {
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(StrategyError::invalid(
                "fraction",
                format!("{} is outside (0, 1]", fraction),
            ));
        }
        Ok(Self { fraction })
    }
}

impl Resizer for FractionResizer {
    fn resize(&self, input: Size) -> Result<Size, StrategyError> {
        input.ensure_non_empty()?;
        let scale = |v: u32| ((v as f64 * self.fraction).round() as u32).max(1);
        Ok(Size::new(scale(input.width), scale(input.height)))
    }
}

/// Crops to a major/minor aspect ratio, shrinking whichever side is too long
#[derive(Debug, Clone, Copy)]
pub struct AspectRatioResizer {
    ratio: f64,
}

impl AspectRatioResizer {
    /// `ratio` may be given either way round (16/9 and 9/16 are the same)
    pub fn new(ratio: f64) -> Result<Self, StrategyError> {
        if !(ratio.is_finite() && ratio > 0.0) {
            return Err(StrategyError::invalid(
                "aspect_ratio",
                format!("{} is not a positive ratio", ratio),
            ));
        }
        let ratio = if ratio >= 1.0 { ratio } else { 1.0 / ratio };
        Ok(Self { ratio })
    }
}

impl Resizer for AspectRatioResizer {
    fn resize(&self, input: Size) -> Result<Size, StrategyError> {
        input.ensure_non_empty()?;
        let major = input.major() as f64;
        let minor = input.minor() as f64;
        let input_ratio = major / minor;

        let (major, minor) = if input_ratio > self.ratio {
            ((minor * self.ratio).round(), minor)
        } else if input_ratio < self.ratio {
            (major, (major / self.ratio).round())
        } else {
            (major, minor)
        };
        Ok(Size::from_sides(
            (major as u32).max(1),
            (minor as u32).max(1),
            input,
        ))
    }
}

/// Scales down, preserving aspect, until both sides fit their bounds
#[derive(Debug, Clone, Copy)]
pub struct AtMostResizer {
    major: u32,
    minor: u32,
}

impl AtMostResizer {
    pub fn new(major: u32, minor: u32) -> Result<Self, StrategyError> {
        if major == 0 || minor == 0 {
            return Err(StrategyError::invalid(
                "at_most",
                format!("bounds {}x{} must be positive", major, minor),
            ));
        }
        Ok(Self {
            major: major.max(minor),
            minor: major.min(minor),
        })
    }
}

impl Resizer for AtMostResizer {
    fn resize(&self, input: Size) -> Result<Size, StrategyError> {
        input.ensure_non_empty()?;
        if input.major() <= self.major && input.minor() <= self.minor {
            return Ok(input);
        }
        let scale = f64::min(
            self.major as f64 / input.major() as f64,
            self.minor as f64 / input.minor() as f64,
        );
        let major = ((input.major() as f64 * scale).round() as u32).clamp(1, self.major);
        let minor = ((input.minor() as f64 * scale).round() as u32).clamp(1, self.minor);
        Ok(Size::from_sides(major, minor, input))
    }
}

/// Applies a chain of resizers in order
#[derive(Debug, Default)]
pub struct MultiResizer {
    resizers: Vec<Box<dyn Resizer>>,
}

impl MultiResizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resizer: impl Resizer + 'static) -> Self {
        self.resizers.push(Box::new(resizer));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.resizers.is_empty()
    }
}

impl Resizer for MultiResizer {
    fn resize(&self, input: Size) -> Result<Size, StrategyError> {
        self.resizers
            .iter()
            .try_fold(input, |size, resizer| resizer.resize(size))
    }
}
