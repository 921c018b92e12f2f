use crate::chrome::{MobileMenu, NavbarState, ScrollProgress, SmoothScroll};
use crate::config::MotionConfig;
use crate::error::MotionError;
use crate::images::{LazyImages, ProfileImageFallback};
use crate::nav_highlight::{NavHighlighter, TrailingDebounce};
use crate::parallax::Parallax;
use crate::pointer::{CardHover, CursorFollower};
use crate::reveal::{apply_stagger, run_hero_step, FadeInUp, HeroReveal, HeroStep, ScrollReveal};
use crate::slider::RecommendationSlider;
use crate::startup::StartupReport;
use crate::tracking::LinkTracking;
use crate::typing::{TypingEffect, TypingStep};
use crate::view::{Intersection, NodeId, Observation, View};
use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use js_sys::{Array, Function, Object, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MouseEvent, ScrollBehavior, ScrollToOptions, Window,
};

const FALLBACK_VIEWPORT_WIDTH: f64 = 1280.0;

type SharedView = Rc<RefCell<WebView>>;

fn js_error(value: JsValue) -> MotionError {
    MotionError::Js(
        value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|error| String::from(error.message()))
            })
            .unwrap_or_else(|| "unknown error".to_string()),
    )
}

/// `View` over the live document. Elements are interned on first sight so
/// handles stay stable across queries.
pub struct WebView {
    window: Window,
    document: Document,
    nodes: RefCell<Vec<Element>>,
}

impl WebView {
    pub fn new() -> Result<Self, MotionError> {
        let window = web_sys::window().ok_or(MotionError::MissingWindow)?;
        let document = window.document().ok_or(MotionError::MissingDocument)?;

        Ok(Self {
            window,
            document,
            nodes: RefCell::new(Vec::new()),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn intern(&self, element: Element) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(position) = nodes.iter().position(|known| known == &element) {
            return NodeId(position);
        }
        nodes.push(element);
        NodeId(nodes.len() - 1)
    }

    pub fn element(&self, node: NodeId) -> Option<Element> {
        self.nodes.borrow().get(node.0).cloned()
    }

    fn html(&self, node: NodeId) -> Option<HtmlElement> {
        self.element(node)?.dyn_into::<HtmlElement>().ok()
    }
}

impl View for WebView {
    fn query_one(&mut self, selector: &str) -> Option<NodeId> {
        let element = self.document.query_selector(selector).ok().flatten()?;
        Some(self.intern(element))
    }

    fn query_all(&mut self, selector: &str) -> Vec<NodeId> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };

        (0..list.length())
            .filter_map(|index| list.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.intern(element))
            .collect()
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.class_list().add_1(class);
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.class_list().remove_1(class);
        }
    }

    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .and_then(|element| element.class_list().toggle(class).ok())
            .unwrap_or(false)
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .map(|element| element.class_list().contains(class))
            .unwrap_or(false)
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(element) = self.html(node) {
            let _ = element.style().set_property(property, value);
        }
    }

    fn text(&self, node: NodeId) -> String {
        self.element(node)
            .and_then(|element| element.text_content())
            .unwrap_or_default()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.element(node) {
            element.set_text_content(Some(text));
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.set_attribute(name, value);
        }
    }

    fn offset_top(&self, node: NodeId) -> f64 {
        self.html(node)
            .map(|element| f64::from(element.offset_top()))
            .unwrap_or(0.0)
    }

    fn offset_height(&self, node: NodeId) -> f64 {
        self.html(node)
            .map(|element| f64::from(element.offset_height()))
            .unwrap_or(0.0)
    }

    fn is_connected(&self, node: NodeId) -> bool {
        self.element(node)
            .map(|element| element.is_connected())
            .unwrap_or(false)
    }

    fn image_failed(&self, node: NodeId) -> bool {
        self.element(node)
            .and_then(|element| element.dyn_into::<HtmlImageElement>().ok())
            .map(|image| image.complete() && image.natural_width() == 0)
            .unwrap_or(false)
    }

    fn create_element(&mut self, tag: &str) -> Option<NodeId> {
        let element = self.document.create_element(tag).ok()?;
        Some(self.intern(element))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let (Some(parent), Some(child)) = (self.element(parent), self.element(child)) {
            let _ = parent.append_child(&child);
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.element(node)?.parent_element()?;
        Some(self.intern(parent))
    }

    fn body(&mut self) -> Option<NodeId> {
        let body: Element = self.document.body()?.into();
        Some(self.intern(body))
    }

    fn document_loaded(&self) -> bool {
        self.document.ready_state() == "complete"
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(FALLBACK_VIEWPORT_WIDTH)
    }

    fn scrollable_height(&self) -> f64 {
        self.document
            .document_element()
            .map(|root| f64::from(root.scroll_height() - root.client_height()))
            .unwrap_or(0.0)
    }

    fn scroll_to_smooth(&mut self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn animate_position(&mut self, node: NodeId, x: f64, y: f64, duration_ms: f64) {
        let Some(element) = self.element(node) else {
            return;
        };
        if animate_with_fill(&element, x, y, duration_ms).is_err() {
            self.set_style(node, "left", &crate::view::px(x));
            self.set_style(node, "top", &crate::view::px(y));
        }
    }
}

fn animate_with_fill(element: &Element, x: f64, y: f64, duration_ms: f64) -> Result<(), JsValue> {
    let element_js: &JsValue = element.as_ref();
    let animate = Reflect::get(element_js, &JsValue::from_str("animate"))?;
    let Some(animate) = animate.dyn_ref::<Function>() else {
        return Err(JsValue::from_str("Element.animate unavailable"));
    };

    let keyframes = Object::new();
    Reflect::set(&keyframes, &"left".into(), &format!("{x}px").into())?;
    Reflect::set(&keyframes, &"top".into(), &format!("{y}px").into())?;

    let timing = Object::new();
    Reflect::set(&timing, &"duration".into(), &JsValue::from_f64(duration_ms))?;
    Reflect::set(&timing, &"fill".into(), &"forwards".into())?;

    animate.call2(element_js, &keyframes, &timing)?;
    Ok(())
}

/// Watches `targets` and feeds each report to `handler`, dropping a target
/// when the handler asks for it.
fn observe<F>(
    view: &SharedView,
    targets: &[NodeId],
    threshold: Option<f64>,
    root_margin: Option<&str>,
    mut handler: F,
) -> Result<(), MotionError>
where
    F: FnMut(&mut WebView, Intersection) -> Observation + 'static,
{
    if targets.is_empty() {
        return Ok(());
    }

    let callback_view = Rc::clone(view);
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let mut view = callback_view.borrow_mut();
                let node = view.intern(target.clone());
                let report = Intersection {
                    node,
                    is_intersecting: entry.is_intersecting(),
                };
                if handler(&mut view, report) == Observation::Unobserve {
                    observer.unobserve(&target);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    if let Some(threshold) = threshold {
        options.set_threshold(&JsValue::from_f64(threshold));
    }
    if let Some(root_margin) = root_margin {
        options.set_root_margin(root_margin);
    }
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(js_error)?;

    for element in targets.iter().filter_map(|node| view.borrow().element(*node)) {
        observer.observe(&element);
    }
    callback.forget();
    Ok(())
}

fn on_element<F>(view: &SharedView, node: NodeId, event: &'static str, callback: F)
where
    F: FnMut(&web_sys::Event) + 'static,
{
    let Some(element) = view.borrow().element(node) else {
        return;
    };
    EventListener::new(&element, event, callback).forget();
}

fn bind_cursor(view: &SharedView, config: &MotionConfig) -> bool {
    let Some(cursor) = CursorFollower::attach(&mut *view.borrow_mut(), config) else {
        return false;
    };
    let cursor = Rc::new(cursor);
    let window = view.borrow().window().clone();

    {
        let view = Rc::clone(view);
        let cursor = Rc::clone(&cursor);
        EventListener::new(&window, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            cursor.on_pointer_move(
                &mut *view.borrow_mut(),
                f64::from(event.client_x()),
                f64::from(event.client_y()),
            );
        })
        .forget();
    }

    for &target in cursor.interactive_targets() {
        for (event, hovering) in [("mouseenter", true), ("mouseleave", false)] {
            let handler_view = Rc::clone(view);
            let cursor = Rc::clone(&cursor);
            on_element(view, target, event, move |_| {
                cursor.on_hover(&mut *handler_view.borrow_mut(), hovering);
            });
        }
    }
    true
}

fn bind_card_hover(view: &SharedView) -> bool {
    let hover = Rc::new(CardHover::attach(&mut *view.borrow_mut()));
    for &card in hover.cards() {
        for (event, hovering) in [("mouseenter", true), ("mouseleave", false)] {
            let handler_view = Rc::clone(view);
            let hover = Rc::clone(&hover);
            on_element(view, card, event, move |_| {
                hover.on_hover(&mut *handler_view.borrow_mut(), card, hovering);
            });
        }
    }
    !hover.cards().is_empty()
}

fn bind_scroll_listener<F>(view: &SharedView, mut handler: F)
where
    F: FnMut(&mut WebView) + 'static,
{
    let window = view.borrow().window().clone();
    let view = Rc::clone(view);
    EventListener::new(&window, "scroll", move |_| {
        handler(&mut view.borrow_mut());
    })
    .forget();
}

fn bind_navbar(view: &SharedView, config: &MotionConfig) -> bool {
    let Some(navbar) = NavbarState::attach(&mut *view.borrow_mut(), config) else {
        return false;
    };
    bind_scroll_listener(view, move |view| navbar.on_scroll(view));
    true
}

fn bind_mobile_menu(view: &SharedView) -> bool {
    let Some(menu) = MobileMenu::attach(&mut *view.borrow_mut()) else {
        return false;
    };
    let menu = Rc::new(menu);

    {
        let handler_view = Rc::clone(view);
        let handler_menu = Rc::clone(&menu);
        on_element(view, menu.hamburger(), "click", move |_| {
            handler_menu.toggle(&mut *handler_view.borrow_mut());
        });
    }

    for &link in menu.links() {
        let handler_view = Rc::clone(view);
        let handler_menu = Rc::clone(&menu);
        on_element(view, link, "click", move |_| {
            handler_menu.close(&mut *handler_view.borrow_mut());
        });
    }
    true
}

fn bind_smooth_scroll(view: &SharedView, config: &MotionConfig) -> bool {
    let scroll = Rc::new(SmoothScroll::attach(&mut *view.borrow_mut(), config));
    for &anchor in scroll.anchors() {
        let handler_view = Rc::clone(view);
        let scroll = Rc::clone(&scroll);
        on_element(view, anchor, "click", move |event| {
            event.prevent_default();
            scroll.on_anchor_click(&mut *handler_view.borrow_mut(), anchor);
        });
    }
    !scroll.anchors().is_empty()
}

fn bind_scroll_reveal(view: &SharedView, config: &MotionConfig) -> Result<bool, MotionError> {
    let reveal = Rc::new(ScrollReveal::attach(&mut *view.borrow_mut(), config));
    let targets = reveal.targets().to_vec();
    let handler = Rc::clone(&reveal);
    let observed = observe(
        view,
        &targets,
        Some(config.reveal_threshold),
        Some(config.reveal_root_margin.as_str()),
        move |view, entry| handler.on_intersect(view, entry),
    );
    if observed.is_err() {
        reveal.show_all(&mut *view.borrow_mut());
    }
    observed.map(|()| !targets.is_empty())
}

fn bind_fade_in_up(view: &SharedView, config: &MotionConfig) -> Result<bool, MotionError> {
    // Skill tags gain `.fade-in-up` here, before the targets are collected.
    apply_stagger(&mut *view.borrow_mut(), config);

    let fade = Rc::new(FadeInUp::attach(&mut *view.borrow_mut()));
    let targets = fade.targets().to_vec();
    let handler = Rc::clone(&fade);
    let observed = observe(
        view,
        &targets,
        Some(config.fade_in_threshold),
        None,
        move |view, entry| handler.on_intersect(view, entry),
    );
    if observed.is_err() {
        fade.play_all(&mut *view.borrow_mut());
    }
    observed.map(|()| !targets.is_empty())
}

fn bind_parallax(view: &SharedView, config: &MotionConfig) {
    let parallax = Parallax::new(config);
    bind_scroll_listener(view, move |view| parallax.on_scroll(view));
}

fn type_next(view: SharedView, mut typing: TypingEffect) {
    let step = typing.tick(&mut *view.borrow_mut());
    if step == TypingStep::Continue {
        let interval = typing.interval_ms();
        Timeout::new(interval, move || type_next(view, typing)).forget();
    }
}

fn bind_typing(view: &SharedView, config: &MotionConfig) -> bool {
    let Some(typing) = TypingEffect::attach(&mut *view.borrow_mut(), config) else {
        return false;
    };
    let view = Rc::clone(view);
    Timeout::new(typing.delay_ms(), move || type_next(view, typing)).forget();
    true
}

fn schedule_hero_steps(view: &SharedView, steps: Vec<HeroStep>) {
    for step in steps {
        let view = Rc::clone(view);
        Timeout::new(step.delay_ms, move || {
            run_hero_step(&mut *view.borrow_mut(), step);
        })
        .forget();
    }
}

fn bind_hero_reveal(view: &SharedView, config: &MotionConfig) {
    let mut hero = HeroReveal::default();
    let steps = hero.start_if_loaded(&mut *view.borrow_mut(), config);
    if let Some(steps) = steps {
        schedule_hero_steps(view, steps);
        return;
    }

    let window = view.borrow().window().clone();
    let view = Rc::clone(view);
    let config = config.clone();
    EventListener::once(&window, "load", move |_| {
        let steps = hero.on_load(&mut *view.borrow_mut(), &config);
        if let Some(steps) = steps {
            schedule_hero_steps(&view, steps);
        }
    })
    .forget();
}

fn bind_slider(view: &SharedView, config: &MotionConfig) -> bool {
    let Some(slider) = RecommendationSlider::attach(&mut *view.borrow_mut(), config) else {
        return false;
    };
    let (prev, next) = (slider.prev_button(), slider.next_button());
    let slider = Rc::new(RefCell::new(slider));

    {
        let handler_view = Rc::clone(view);
        let slider = Rc::clone(&slider);
        on_element(view, prev, "click", move |_| {
            slider.borrow_mut().previous(&mut *handler_view.borrow_mut());
        });
    }
    {
        let handler_view = Rc::clone(view);
        let slider = Rc::clone(&slider);
        on_element(view, next, "click", move |_| {
            slider.borrow_mut().next(&mut *handler_view.borrow_mut());
        });
    }

    let window = view.borrow().window().clone();
    let view = Rc::clone(view);
    EventListener::new(&window, "resize", move |_| {
        slider.borrow().on_resize(&mut *view.borrow_mut());
    })
    .forget();
    true
}

fn bind_nav_highlight(view: &SharedView, config: &MotionConfig) {
    let highlighter = Rc::new(NavHighlighter::attach(&mut *view.borrow_mut(), config));
    let mut debounce = TrailingDebounce::<Timeout>::default();
    let wait_ms = config.highlight_debounce_ms;
    let window = view.borrow().window().clone();
    let view = Rc::clone(view);

    EventListener::new(&window, "scroll", move |_| {
        let view = Rc::clone(&view);
        let highlighter = Rc::clone(&highlighter);
        debounce.schedule(Timeout::new(wait_ms, move || {
            highlighter.highlight(&mut *view.borrow_mut());
        }));
    })
    .forget();
}

fn bind_profile_fallback(view: &SharedView, config: &MotionConfig) -> bool {
    let Some(fallback) = ProfileImageFallback::attach(&mut *view.borrow_mut(), config) else {
        return false;
    };
    let image = fallback.image();
    let fallback = Rc::new(RefCell::new(fallback));

    {
        let handler_view = Rc::clone(view);
        let fallback = Rc::clone(&fallback);
        on_element(view, image, "error", move |_| {
            fallback
                .borrow_mut()
                .on_error(&mut *handler_view.borrow_mut());
        });
    }
    fallback
        .borrow_mut()
        .check_already_failed(&mut *view.borrow_mut());
    true
}

fn bind_lazy_images(view: &SharedView, config: &MotionConfig) -> Result<bool, MotionError> {
    let lazy = Rc::new(RefCell::new(LazyImages::attach(&mut *view.borrow_mut(), config)));
    let targets = lazy.borrow().images().to_vec();
    let handler = Rc::clone(&lazy);
    let observed = observe(view, &targets, None, None, move |view, entry| {
        handler.borrow_mut().on_intersect(view, entry)
    });
    if observed.is_err() {
        lazy.borrow_mut().load_all(&mut *view.borrow_mut());
    }
    observed.map(|()| !targets.is_empty())
}

fn bind_progress(view: &SharedView) -> bool {
    let Some(progress) = ScrollProgress::install(&mut *view.borrow_mut()) else {
        return false;
    };
    bind_scroll_listener(view, move |view| progress.on_scroll(view));
    true
}

fn bind_tracking(view: &SharedView, config: &MotionConfig) {
    let tracking = Rc::new(LinkTracking::attach(&mut *view.borrow_mut(), config));

    for &link in tracking.social_links() {
        let handler_view = Rc::clone(view);
        let tracking = Rc::clone(&tracking);
        on_element(view, link, "click", move |_| {
            tracking.on_social_click(&*handler_view.borrow(), link);
        });
    }
    for &link in tracking.email_links() {
        let tracking = Rc::clone(&tracking);
        on_element(view, link, "click", move |_| tracking.on_email_click());
    }
}

fn greet(config: &MotionConfig) {
    let mut lines = vec![
        ("%c👋 Hello there!".to_string(), "font-size: 20px; font-weight: bold; color: #e94560;"),
        (
            "%cThanks for checking out my portfolio!".to_string(),
            "font-size: 14px; color: #667eea;",
        ),
    ];
    if let Some(email) = config.contact_email.as_deref() {
        lines.push((format!("%cLet's connect: {email}"), "font-size: 12px; color: #adb5bd;"));
    }

    for (text, style) in lines {
        web_sys::console::log_2(&JsValue::from_str(&text), &JsValue::from_str(style));
    }
}

pub fn run() -> Result<(), MotionError> {
    let view: SharedView = Rc::new(RefCell::new(WebView::new()?));
    let config = MotionConfig::from_view(&mut *view.borrow_mut());
    let mut report = StartupReport::new(config.logger());

    report.record("cursor", bind_cursor(&view, &config));
    report.record("navbar", bind_navbar(&view, &config));
    report.record("mobile_menu", bind_mobile_menu(&view));
    report.record("smooth_scroll", bind_smooth_scroll(&view, &config));
    report.record_result("scroll_reveal", bind_scroll_reveal(&view, &config));
    report.record_result("fade_in_up", bind_fade_in_up(&view, &config));
    bind_parallax(&view, &config);
    report.record("typing", bind_typing(&view, &config));
    report.record("card_hover", bind_card_hover(&view));
    report.record("slider", bind_slider(&view, &config));
    bind_nav_highlight(&view, &config);
    report.record("profile_fallback", bind_profile_fallback(&view, &config));
    report.record_result("lazy_images", bind_lazy_images(&view, &config));
    bind_tracking(&view, &config);
    report.record("scroll_progress", bind_progress(&view));
    bind_hero_reveal(&view, &config);

    greet(&config);
    report.finish();
    Ok(())
}
