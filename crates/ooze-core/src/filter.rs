//! Surface post-processing parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Filter chain applied to a whole surface after drawing: blur, then
/// contrast, then brightness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterChain {
    /// Gaussian standard deviation in pixels. Zero disables the blur.
    pub blur_px: f32,
    /// Contrast factor around mid grey. 1.0 is identity.
    pub contrast: f32,
    /// Brightness multiplier. 1.0 is identity.
    pub brightness: f32,
}

impl FilterChain {
    pub const IDENTITY: FilterChain = FilterChain::new(0.0, 1.0, 1.0);

    pub const fn new(blur_px: f32, contrast: f32, brightness: f32) -> Self {
        Self {
            blur_px,
            contrast,
            brightness,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "blur({}px) contrast({}) brightness({})",
            self.blur_px, self.contrast, self.brightness
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_css_syntax() {
        let chain = FilterChain::new(28.0, 12.0, 1.15);
        assert_eq!(chain.to_string(), "blur(28px) contrast(12) brightness(1.15)");
    }

    #[test]
    fn test_identity() {
        assert!(FilterChain::default().is_identity());
        assert!(!FilterChain::new(0.0, 1.0, 0.9).is_identity());
    }
}
