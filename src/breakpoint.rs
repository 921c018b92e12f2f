pub const DEFAULT_MOBILE_BREAKPOINT_PX: f64 = 768.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breakpoint {
    max_mobile_width: f64,
}

impl Breakpoint {
    pub fn new(max_mobile_width: f64) -> Self {
        Self { max_mobile_width }
    }

    pub fn is_mobile(self, viewport_width: f64) -> bool {
        viewport_width <= self.max_mobile_width
    }
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self::new(DEFAULT_MOBILE_BREAKPOINT_PX)
    }
}
