use crate::config::MotionConfig;
use crate::log::{LogLevel, Logger};
use crate::view::{Intersection, NodeId, Observation, View};
use serde_json::json;
use std::collections::HashSet;

pub const PROFILE_IMAGE_SELECTOR: &str = "#profileImage";
pub const LAZY_IMAGE_SELECTOR: &str = "img[data-src]";

const DEFERRED_SOURCE_ATTRIBUTE: &str = "data-src";
const LOADED_CLASS: &str = "loaded";

const PLACEHOLDER_STYLES: [(&str, &str); 9] = [
    ("width", "100%"),
    ("height", "100%"),
    ("background", "linear-gradient(135deg, #667eea 0%, #764ba2 100%)"),
    ("display", "flex"),
    ("align-items", "center"),
    ("justify-content", "center"),
    ("font-size", "6rem"),
    ("color", "white"),
    ("font-weight", "bold"),
];

pub struct ProfileImageFallback {
    image: NodeId,
    monogram: String,
    placeholder: Option<NodeId>,
    logger: Logger,
}

impl ProfileImageFallback {
    pub fn attach(view: &mut impl View, config: &MotionConfig) -> Option<Self> {
        Some(Self {
            image: view.query_one(PROFILE_IMAGE_SELECTOR)?,
            monogram: config.placeholder_monogram.clone(),
            placeholder: None,
            logger: config.logger(),
        })
    }

    pub fn image(&self) -> NodeId {
        self.image
    }

    pub fn check_already_failed(&mut self, view: &mut impl View) -> Option<NodeId> {
        if !view.image_failed(self.image) {
            return None;
        }
        self.on_error(view)
    }

    /// Inserts the placeholder next to the image; later errors reuse it.
    pub fn on_error(&mut self, view: &mut impl View) -> Option<NodeId> {
        if self.placeholder.is_some() {
            return self.placeholder;
        }

        view.set_style(self.image, "display", "none");
        let parent = view.parent(self.image)?;
        let placeholder = view.create_element("div")?;
        for (property, value) in PLACEHOLDER_STYLES {
            view.set_style(placeholder, property, value);
        }
        view.set_text(placeholder, &self.monogram);
        view.append_child(parent, placeholder);

        self.logger.event(
            LogLevel::Info,
            "profile_image.fallback",
            json!({ "monogram": self.monogram }),
        );
        self.placeholder = Some(placeholder);
        self.placeholder
    }
}

pub struct LazyImages {
    images: Vec<NodeId>,
    loaded: HashSet<NodeId>,
    logger: Logger,
}

impl LazyImages {
    pub fn attach(view: &mut impl View, config: &MotionConfig) -> Self {
        Self {
            images: view.query_all(LAZY_IMAGE_SELECTOR),
            loaded: HashSet::new(),
            logger: config.logger(),
        }
    }

    pub fn images(&self) -> &[NodeId] {
        &self.images
    }

    pub fn on_intersect(&mut self, view: &mut impl View, entry: Intersection) -> Observation {
        if !entry.is_intersecting {
            return Observation::Keep;
        }
        if self.loaded.contains(&entry.node) {
            return Observation::Unobserve;
        }
        let Some(source) = view.attribute(entry.node, DEFERRED_SOURCE_ATTRIBUTE) else {
            return Observation::Keep;
        };

        view.set_attribute(entry.node, "src", &source);
        view.add_class(entry.node, LOADED_CLASS);
        self.loaded.insert(entry.node);
        self.logger
            .event(LogLevel::Debug, "lazy_image.loaded", json!({ "src": source }));
        Observation::Unobserve
    }

    pub fn load_all(&mut self, view: &mut impl View) {
        for node in self.images.clone() {
            self.on_intersect(
                view,
                Intersection {
                    node,
                    is_intersecting: true,
                },
            );
        }
    }
}
