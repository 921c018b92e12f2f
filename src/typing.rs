use crate::config::MotionConfig;
use crate::view::{NodeId, View};

pub const HERO_TITLE_SELECTOR: &str = ".hero-title";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingStep {
    Continue,
    Finished,
    /// The title left the page; nothing was written.
    Cancelled,
}

pub struct TypingEffect {
    title: NodeId,
    chars: Vec<char>,
    revealed: usize,
    delay_ms: u32,
    interval_ms: u32,
}

impl TypingEffect {
    pub fn attach(view: &mut impl View, config: &MotionConfig) -> Option<Self> {
        let title = view.query_one(HERO_TITLE_SELECTOR)?;
        let chars = view.text(title).chars().collect();
        view.set_text(title, "");
        view.set_style(title, "opacity", "1");

        Some(Self {
            title,
            chars,
            revealed: 0,
            delay_ms: config.typing_delay_ms,
            interval_ms: config.typing_interval_ms,
        })
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn is_finished(&self) -> bool {
        self.revealed >= self.chars.len()
    }

    pub fn tick(&mut self, view: &mut impl View) -> TypingStep {
        if !view.is_connected(self.title) {
            return TypingStep::Cancelled;
        }
        if self.is_finished() {
            return TypingStep::Finished;
        }

        self.revealed += 1;
        let shown: String = self.chars[..self.revealed].iter().collect();
        view.set_text(self.title, &shown);

        if self.is_finished() {
            TypingStep::Finished
        } else {
            TypingStep::Continue
        }
    }
}
