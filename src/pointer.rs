use crate::config::MotionConfig;
use crate::view::{px, NodeId, View};

pub const CURSOR_DOT_SELECTOR: &str = "[data-cursor-dot]";
pub const CURSOR_OUTLINE_SELECTOR: &str = "[data-cursor-outline]";
pub const INTERACTIVE_SELECTOR: &str = "a, button, .btn";
pub const CERTIFICATE_CARD_SELECTOR: &str = ".certificate-card";

const CARD_LIFTED_TRANSFORM: &str = "translateY(-10px) scale(1.02)";
const CARD_RESTING_TRANSFORM: &str = "translateY(0) scale(1)";

fn centered_scale(scale: f64) -> String {
    format!("translate(-50%, -50%) scale({scale})")
}

pub struct CursorFollower {
    dot: NodeId,
    outline: NodeId,
    interactive: Vec<NodeId>,
    trail_ms: f64,
    hover_scale: f64,
}

impl CursorFollower {
    pub fn attach(view: &mut impl View, config: &MotionConfig) -> Option<Self> {
        let dot = view.query_one(CURSOR_DOT_SELECTOR)?;
        let outline = view.query_one(CURSOR_OUTLINE_SELECTOR)?;
        let interactive = view.query_all(INTERACTIVE_SELECTOR);

        Some(Self {
            dot,
            outline,
            interactive,
            trail_ms: config.cursor_trail_ms,
            hover_scale: config.cursor_hover_scale,
        })
    }

    pub fn interactive_targets(&self) -> &[NodeId] {
        &self.interactive
    }

    pub fn on_pointer_move(&self, view: &mut impl View, x: f64, y: f64) {
        view.set_style(self.dot, "left", &px(x));
        view.set_style(self.dot, "top", &px(y));
        view.animate_position(self.outline, x, y, self.trail_ms);
    }

    pub fn on_hover(&self, view: &mut impl View, hovering: bool) {
        let scale = if hovering { self.hover_scale } else { 1.0 };
        let transform = centered_scale(scale);
        view.set_style(self.dot, "transform", &transform);
        view.set_style(self.outline, "transform", &transform);
    }
}

pub struct CardHover {
    cards: Vec<NodeId>,
}

impl CardHover {
    pub fn attach(view: &mut impl View) -> Self {
        Self {
            cards: view.query_all(CERTIFICATE_CARD_SELECTOR),
        }
    }

    pub fn cards(&self) -> &[NodeId] {
        &self.cards
    }

    pub fn on_hover(&self, view: &mut impl View, card: NodeId, hovering: bool) {
        let transform = if hovering {
            CARD_LIFTED_TRANSFORM
        } else {
            CARD_RESTING_TRANSFORM
        };
        view.set_style(card, "transform", transform);
    }
}
