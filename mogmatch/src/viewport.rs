//! Viewport geometry source.
//!
//! Exit trajectories are computed against the host's *current* viewport
//! width. The width is re-read at commit time rather than cached at
//! gesture start, since orientation or resize can change it mid-drag.

/// Source of the host viewport's current width in position units.
pub trait Viewport: Send + Sync {
    /// Current viewport width. Queried once per committed swipe.
    fn width(&self) -> f32;
}

/// Fixed-size viewport for headless hosts and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedViewport {
    width: f32,
}

impl FixedViewport {
    pub fn new(width: f32) -> Self {
        Self { width }
    }
}

impl Viewport for FixedViewport {
    fn width(&self) -> f32 {
        self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_viewport_reports_width() {
        let viewport = FixedViewport::new(390.0);
        assert_eq!(viewport.width(), 390.0);
    }
}
