use crate::config::MotionConfig;
use crate::view::{px, Intersection, NodeId, Observation, View};

pub const ANIMATED_SELECTOR: &str = ".section-header, .about-text, .education-card, .skill-category, .project-card, .certificate-card, .recommendation-card, .contact-item";
pub const FADE_IN_UP_SELECTOR: &str = ".fade-in-up";
pub const HERO_FADE_IN_UP_SELECTOR: &str = ".hero .fade-in-up";
pub const SKILL_TAG_SELECTOR: &str = ".skill-tag";
pub const PROJECT_CARD_SELECTOR: &str = ".project-card";

const FADE_IN_UP_CLASS: &str = "fade-in-up";
const LOADED_CLASS: &str = "loaded";

pub struct ScrollReveal {
    targets: Vec<NodeId>,
}

impl ScrollReveal {
    pub fn attach(view: &mut impl View, config: &MotionConfig) -> Self {
        let targets = view.query_all(ANIMATED_SELECTOR);
        let hidden_offset = format!("translateY({})", px(config.reveal_offset_px));
        let transition = format!(
            "opacity {secs}s ease, transform {secs}s ease",
            secs = config.reveal_transition_secs
        );

        for &target in &targets {
            view.set_style(target, "opacity", "0");
            view.set_style(target, "transform", &hidden_offset);
            view.set_style(target, "transition", &transition);
        }

        Self { targets }
    }

    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    pub fn on_intersect(&self, view: &mut impl View, entry: Intersection) -> Observation {
        if entry.is_intersecting {
            show(view, entry.node);
        }
        Observation::Keep
    }

    pub fn show_all(&self, view: &mut impl View) {
        for &target in &self.targets {
            show(view, target);
        }
    }
}

fn show(view: &mut impl View, node: NodeId) {
    view.set_style(node, "opacity", "1");
    view.set_style(node, "transform", "translateY(0)");
}

pub struct FadeInUp {
    targets: Vec<NodeId>,
}

impl FadeInUp {
    pub fn attach(view: &mut impl View) -> Self {
        let targets = view.query_all(FADE_IN_UP_SELECTOR);
        for &target in &targets {
            view.set_style(target, "animation-play-state", "paused");
        }
        Self { targets }
    }

    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    pub fn on_intersect(&self, view: &mut impl View, entry: Intersection) -> Observation {
        if entry.is_intersecting {
            view.set_style(entry.node, "animation-play-state", "running");
        }
        Observation::Keep
    }

    pub fn play_all(&self, view: &mut impl View) {
        for &target in &self.targets {
            view.set_style(target, "animation-play-state", "running");
        }
    }
}

pub fn apply_stagger(view: &mut impl View, config: &MotionConfig) {
    for (index, tag) in view.query_all(SKILL_TAG_SELECTOR).into_iter().enumerate() {
        let delay = index as f64 * config.skill_tag_stagger_secs;
        view.set_style(tag, "animation-delay", &format!("{delay}s"));
        view.add_class(tag, FADE_IN_UP_CLASS);
    }

    for (index, card) in view.query_all(PROJECT_CARD_SELECTOR).into_iter().enumerate() {
        let delay = index as f64 * config.project_card_stagger_secs;
        view.set_style(card, "animation-delay", &format!("{delay}s"));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeroStep {
    pub node: NodeId,
    pub delay_ms: u32,
}

pub fn plan_hero_reveal(view: &mut impl View, config: &MotionConfig) -> Vec<HeroStep> {
    if let Some(body) = view.body() {
        view.add_class(body, LOADED_CLASS);
    }

    view.query_all(HERO_FADE_IN_UP_SELECTOR)
        .into_iter()
        .enumerate()
        .map(|(index, node)| HeroStep {
            node,
            delay_ms: config
                .hero_reveal_delay_ms
                .saturating_add((index as u32).saturating_mul(config.hero_reveal_step_ms)),
        })
        .collect()
}

/// Starts the hero stagger exactly once, whether the page finished loading
/// before or after the effects were wired.
#[derive(Debug, Default)]
pub struct HeroReveal {
    started: bool,
}

impl HeroReveal {
    pub fn start_if_loaded(
        &mut self,
        view: &mut impl View,
        config: &MotionConfig,
    ) -> Option<Vec<HeroStep>> {
        if !view.document_loaded() {
            return None;
        }
        self.on_load(view, config)
    }

    pub fn on_load(&mut self, view: &mut impl View, config: &MotionConfig) -> Option<Vec<HeroStep>> {
        if self.started {
            return None;
        }
        self.started = true;
        Some(plan_hero_reveal(view, config))
    }
}

/// Returns false, without writing, once the node has left the page.
pub fn run_hero_step(view: &mut impl View, step: HeroStep) -> bool {
    if !view.is_connected(step.node) {
        return false;
    }
    view.set_style(step.node, "animation-play-state", "running");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake_view::FakeView;

    #[test]
    fn reveal_targets_start_hidden_and_show_on_intersection() {
        let mut view = FakeView::new();
        let header = view.add(None, "div.section-header");
        let card = view.add(None, "div.project-card");
        view.add(None, "div.unrelated");

        let reveal = ScrollReveal::attach(&mut view, &MotionConfig::default());
        assert_eq!(reveal.targets(), &[header, card]);
        assert_eq!(view.style(card, "opacity"), Some("0"));
        assert_eq!(view.style(card, "transform"), Some("translateY(30px)"));
        assert_eq!(
            view.style(card, "transition"),
            Some("opacity 0.6s ease, transform 0.6s ease")
        );

        assert_eq!(
            reveal.on_intersect(&mut view, Intersection::leaving(card)),
            Observation::Keep
        );
        assert_eq!(view.style(card, "opacity"), Some("0"));

        for _ in 0..2 {
            assert_eq!(
                reveal.on_intersect(&mut view, Intersection::entering(card)),
                Observation::Keep
            );
            assert_eq!(view.style(card, "opacity"), Some("1"));
            assert_eq!(view.style(card, "transform"), Some("translateY(0)"));
        }
    }

    #[test]
    fn stagger_tags_skill_chips_for_fade_in() {
        let mut view = FakeView::new();
        let tags: Vec<NodeId> = (0..3).map(|_| view.add(None, "span.skill-tag")).collect();
        let cards: Vec<NodeId> = (0..2).map(|_| view.add(None, "div.project-card")).collect();

        apply_stagger(&mut view, &MotionConfig::default());

        assert_eq!(view.style(tags[0], "animation-delay"), Some("0s"));
        assert_eq!(view.style(tags[2], "animation-delay"), Some("0.1s"));
        assert!(tags.iter().all(|tag| view.has_class(*tag, "fade-in-up")));
        assert_eq!(view.style(cards[1], "animation-delay"), Some("0.1s"));
        assert!(!view.has_class(cards[0], "fade-in-up"));

        let fade = FadeInUp::attach(&mut view);
        assert_eq!(fade.targets(), tags.as_slice());
        assert_eq!(view.style(tags[1], "animation-play-state"), Some("paused"));

        fade.on_intersect(&mut view, Intersection::entering(tags[1]));
        assert_eq!(view.style(tags[1], "animation-play-state"), Some("running"));
        assert_eq!(view.style(tags[0], "animation-play-state"), Some("paused"));
    }

    #[test]
    fn hero_reveal_staggers_after_load_delay() {
        let mut view = FakeView::new();
        let hero = view.add(None, "section.hero");
        let first = view.add(Some(hero), "h1.fade-in-up");
        let second = view.add(Some(hero), "p.fade-in-up");
        view.add(None, "div.fade-in-up");

        let steps = plan_hero_reveal(&mut view, &MotionConfig::default());

        assert!(view.has_class(view.body, "loaded"));
        assert_eq!(
            steps,
            vec![
                HeroStep { node: first, delay_ms: 300 },
                HeroStep { node: second, delay_ms: 400 },
            ]
        );

        view.detach(second);
        assert!(run_hero_step(&mut view, steps[0]));
        assert!(!run_hero_step(&mut view, steps[1]));
        assert_eq!(view.style(first, "animation-play-state"), Some("running"));
        assert_eq!(view.style(second, "animation-play-state"), None);
    }

    #[test]
    fn hero_reveal_starts_immediately_when_page_already_loaded() {
        let mut view = FakeView::new();
        let hero = view.add(None, "section.hero");
        let title = view.add(Some(hero), "h1.fade-in-up");
        view.loaded = true;

        let mut reveal = HeroReveal::default();
        let steps = reveal
            .start_if_loaded(&mut view, &MotionConfig::default())
            .expect("document already loaded");

        assert!(view.has_class(view.body, "loaded"));
        assert_eq!(steps, vec![HeroStep { node: title, delay_ms: 300 }]);
        assert_eq!(reveal.on_load(&mut view, &MotionConfig::default()), None);
    }

    #[test]
    fn hero_reveal_waits_for_load_while_page_is_loading() {
        let mut view = FakeView::new();
        let hero = view.add(None, "section.hero");
        view.add(Some(hero), "h1.fade-in-up");

        let mut reveal = HeroReveal::default();
        assert_eq!(reveal.start_if_loaded(&mut view, &MotionConfig::default()), None);
        assert!(!view.has_class(view.body, "loaded"));

        let steps = reveal
            .on_load(&mut view, &MotionConfig::default())
            .expect("first load starts the reveal");
        assert_eq!(steps.len(), 1);
        assert!(view.has_class(view.body, "loaded"));
    }

    #[test]
    fn observer_fallback_leaves_nothing_hidden_or_paused() {
        let mut view = FakeView::new();
        let header = view.add(None, "div.section-header");
        let chip = view.add(None, "span.fade-in-up");

        let reveal = ScrollReveal::attach(&mut view, &MotionConfig::default());
        let fade = FadeInUp::attach(&mut view);
        reveal.show_all(&mut view);
        fade.play_all(&mut view);

        assert_eq!(view.style(header, "opacity"), Some("1"));
        assert_eq!(view.style(header, "transform"), Some("translateY(0)"));
        assert_eq!(view.style(chip, "animation-play-state"), Some("running"));
    }
}
