use crate::config::MotionConfig;
use crate::view::{px, View};

pub const PARALLAX_SELECTOR: &str = ".gradient-orb";

#[derive(Clone, Copy, Debug)]
pub struct Parallax {
    base_speed: f64,
    speed_step: f64,
}

impl Parallax {
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            base_speed: config.parallax_base_speed,
            speed_step: config.parallax_speed_step,
        }
    }

    pub fn speed(&self, index: usize) -> f64 {
        self.base_speed + index as f64 * self.speed_step
    }

    pub fn on_scroll(&self, view: &mut impl View) {
        let scrolled = view.scroll_y();
        for (index, orb) in view.query_all(PARALLAX_SELECTOR).into_iter().enumerate() {
            let offset = scrolled * self.speed(index);
            view.set_style(orb, "transform", &format!("translateY({})", px(offset)));
        }
    }
}
