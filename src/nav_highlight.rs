use crate::chrome::NAV_LINK_SELECTOR;
use crate::config::MotionConfig;
use crate::view::{NodeId, View};

pub const SECTION_SELECTOR: &str = "section[id]";

const ACTIVE_CLASS: &str = "active";

/// Holds the one pending timer of a trailing debounce. Dropping a timer
/// handle cancels it, so scheduling a new one cancels the previous.
#[derive(Debug)]
pub struct TrailingDebounce<T> {
    pending: Option<T>,
}

impl<T> Default for TrailingDebounce<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> TrailingDebounce<T> {
    pub fn schedule(&mut self, timer: T) {
        self.pending = Some(timer);
    }
}

struct Section {
    node: NodeId,
    href: String,
}

/// Marks the nav link of the section under the reading line as active.
pub struct NavHighlighter {
    sections: Vec<Section>,
    links: Vec<NodeId>,
    reading_offset_px: f64,
}

impl NavHighlighter {
    pub fn attach(view: &mut impl View, config: &MotionConfig) -> Self {
        let sections = view
            .query_all(SECTION_SELECTOR)
            .into_iter()
            .filter_map(|node| {
                let id = view.attribute(node, "id")?;
                Some(Section {
                    node,
                    href: format!("#{id}"),
                })
            })
            .collect();

        Self {
            sections,
            links: view.query_all(NAV_LINK_SELECTOR),
            reading_offset_px: config.highlight_offset_px,
        }
    }

    /// Section containing `scroll_y + offset`, half-open at the bottom edge.
    pub fn current_section(&self, view: &impl View) -> Option<NodeId> {
        let reading_line = view.scroll_y() + self.reading_offset_px;
        self.sections
            .iter()
            .find(|section| {
                let top = view.offset_top(section.node);
                reading_line >= top && reading_line < top + view.offset_height(section.node)
            })
            .map(|section| section.node)
    }

    /// Clears every link first, so a reading line past the last section
    /// leaves nothing highlighted.
    pub fn highlight(&self, view: &mut impl View) {
        let current_href = self.current_section(&*view).and_then(|node| {
            self.sections
                .iter()
                .find(|section| section.node == node)
                .map(|section| section.href.clone())
        });

        for &link in &self.links {
            view.remove_class(link, ACTIVE_CLASS);
            if current_href.is_some() && view.attribute(link, "href") == current_href {
                view.add_class(link, ACTIVE_CLASS);
            }
        }
    }
}
