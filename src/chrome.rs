use crate::config::MotionConfig;
use crate::log::{LogLevel, Logger};
use crate::view::{NodeId, View};
use serde_json::json;

pub const NAVBAR_SELECTOR: &str = "#navbar";
pub const HAMBURGER_SELECTOR: &str = "#hamburger";
pub const NAV_MENU_SELECTOR: &str = "#navMenu";
pub const NAV_LINK_SELECTOR: &str = ".nav-link";
pub const IN_PAGE_ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

const SCROLLED_CLASS: &str = "scrolled";
const ACTIVE_CLASS: &str = "active";

const PROGRESS_BAR_STYLES: [(&str, &str); 8] = [
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "0%"),
    ("height", "3px"),
    ("background", "linear-gradient(90deg, #667eea 0%, #764ba2 100%)"),
    ("z-index", "9999"),
    ("transition", "width 0.1s ease"),
];

pub struct NavbarState {
    navbar: NodeId,
    threshold_px: f64,
}

impl NavbarState {
    pub fn attach(view: &mut impl View, config: &MotionConfig) -> Option<Self> {
        Some(Self {
            navbar: view.query_one(NAVBAR_SELECTOR)?,
            threshold_px: config.navbar_scroll_threshold_px,
        })
    }

    pub fn on_scroll(&self, view: &mut impl View) {
        if view.scroll_y() > self.threshold_px {
            view.add_class(self.navbar, SCROLLED_CLASS);
        } else {
            view.remove_class(self.navbar, SCROLLED_CLASS);
        }
    }
}

pub struct MobileMenu {
    hamburger: NodeId,
    menu: NodeId,
    links: Vec<NodeId>,
}

impl MobileMenu {
    pub fn attach(view: &mut impl View) -> Option<Self> {
        let hamburger = view.query_one(HAMBURGER_SELECTOR)?;
        let menu = view.query_one(NAV_MENU_SELECTOR)?;
        let links = view.query_all(NAV_LINK_SELECTOR);

        Some(Self {
            hamburger,
            menu,
            links,
        })
    }

    pub fn hamburger(&self) -> NodeId {
        self.hamburger
    }

    pub fn links(&self) -> &[NodeId] {
        &self.links
    }

    pub fn toggle(&self, view: &mut impl View) {
        view.toggle_class(self.hamburger, ACTIVE_CLASS);
        view.toggle_class(self.menu, ACTIVE_CLASS);
    }

    pub fn close(&self, view: &mut impl View) {
        view.remove_class(self.hamburger, ACTIVE_CLASS);
        view.remove_class(self.menu, ACTIVE_CLASS);
    }

    #[cfg(test)]
    pub(crate) fn is_open(&self, view: &impl View) -> bool {
        view.has_class(self.menu, ACTIVE_CLASS)
    }
}

pub struct SmoothScroll {
    navbar: Option<NodeId>,
    anchors: Vec<NodeId>,
    logger: Logger,
}

impl SmoothScroll {
    pub fn attach(view: &mut impl View, config: &MotionConfig) -> Self {
        Self {
            navbar: view.query_one(NAVBAR_SELECTOR),
            anchors: view.query_all(IN_PAGE_ANCHOR_SELECTOR),
            logger: config.logger(),
        }
    }

    pub fn anchors(&self) -> &[NodeId] {
        &self.anchors
    }

    /// Default navigation is always suppressed for these anchors; returns the
    /// scroll target when one was found.
    pub fn on_anchor_click(&self, view: &mut impl View, anchor: NodeId) -> Option<f64> {
        let href = view.attribute(anchor, "href")?;
        let target = match href.as_str() {
            "#" => None,
            selector => view.query_one(selector),
        };
        let Some(target) = target else {
            self.logger.event(
                LogLevel::Debug,
                "smooth_scroll.missing_target",
                json!({ "href": href }),
            );
            return None;
        };

        let navbar_height = self
            .navbar
            .map(|navbar| view.offset_height(navbar))
            .unwrap_or(0.0);
        let top = view.offset_top(target) - navbar_height;
        view.scroll_to_smooth(top);
        Some(top)
    }
}

pub struct ScrollProgress {
    bar: NodeId,
}

impl ScrollProgress {
    pub fn install(view: &mut impl View) -> Option<Self> {
        let body = view.body()?;
        let bar = view.create_element("div")?;
        for (property, value) in PROGRESS_BAR_STYLES {
            view.set_style(bar, property, value);
        }
        view.append_child(body, bar);
        Some(Self { bar })
    }

    #[cfg(test)]
    pub(crate) fn bar(&self) -> NodeId {
        self.bar
    }

    pub fn on_scroll(&self, view: &mut impl View) {
        let width = scroll_percent(view.scroll_y(), view.scrollable_height());
        view.set_style(self.bar, "width", &format!("{width}%"));
    }
}

pub fn scroll_percent(scroll_y: f64, scrollable_height: f64) -> f64 {
    if scrollable_height <= 0.0 {
        return 0.0;
    }
    scroll_y / scrollable_height * 100.0
}
