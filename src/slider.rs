use crate::breakpoint::Breakpoint;
use crate::config::MotionConfig;
use crate::view::{NodeId, View};

pub const RECOMMENDATION_CARD_SELECTOR: &str = ".recommendation-card";
pub const PREV_BUTTON_SELECTOR: &str = "#prevBtn";
pub const NEXT_BUTTON_SELECTOR: &str = "#nextBtn";
pub const SLIDER_CONTROLS_SELECTOR: &str = ".slider-controls";

pub fn next_index(index: usize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    (index + 1) % count
}

pub fn previous_index(index: usize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    (index + count - 1) % count
}

pub struct RecommendationSlider {
    cards: Vec<NodeId>,
    prev: NodeId,
    next: NodeId,
    controls: Option<NodeId>,
    index: usize,
    breakpoint: Breakpoint,
}

impl RecommendationSlider {
    pub fn attach(view: &mut impl View, config: &MotionConfig) -> Option<Self> {
        let prev = view.query_one(PREV_BUTTON_SELECTOR)?;
        let next = view.query_one(NEXT_BUTTON_SELECTOR)?;
        let slider = Self {
            cards: view.query_all(RECOMMENDATION_CARD_SELECTOR),
            prev,
            next,
            controls: view.query_one(SLIDER_CONTROLS_SELECTOR),
            index: 0,
            breakpoint: config.breakpoint(),
        };
        slider.on_resize(view);
        Some(slider)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn prev_button(&self) -> NodeId {
        self.prev
    }

    pub fn next_button(&self) -> NodeId {
        self.next
    }

    pub fn next(&mut self, view: &mut impl View) {
        self.index = next_index(self.index, self.cards.len());
        self.show_slide(view);
    }

    pub fn previous(&mut self, view: &mut impl View) {
        self.index = previous_index(self.index, self.cards.len());
        self.show_slide(view);
    }

    /// Only the current card is displayed, and only on mobile widths.
    pub fn show_slide(&self, view: &mut impl View) {
        if !self.breakpoint.is_mobile(view.viewport_width()) {
            return;
        }
        for (position, &card) in self.cards.iter().enumerate() {
            let display = if position == self.index { "block" } else { "none" };
            view.set_style(card, "display", display);
        }
    }

    pub fn on_resize(&self, view: &mut impl View) {
        if self.breakpoint.is_mobile(view.viewport_width()) {
            if let Some(controls) = self.controls {
                view.set_style(controls, "display", "flex");
            }
            self.show_slide(view);
        } else {
            if let Some(controls) = self.controls {
                view.set_style(controls, "display", "none");
            }
            for &card in &self.cards {
                view.set_style(card, "display", "block");
            }
        }
    }
}
