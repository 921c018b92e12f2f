use crate::config::MotionConfig;
use crate::log::{LogLevel, Logger};
use crate::view::{NodeId, View};
use serde_json::json;

pub const SOCIAL_LINK_SELECTOR: &str = ".social-link, .social-btn";
pub const EMAIL_LINK_SELECTOR: &str = "a[href^=\"mailto:\"]";

const DEFAULT_PLATFORM: &str = "Social";

pub struct LinkTracking {
    social: Vec<NodeId>,
    email: Vec<NodeId>,
    logger: Logger,
}

impl LinkTracking {
    pub fn attach(view: &mut impl View, config: &MotionConfig) -> Self {
        Self {
            social: view.query_all(SOCIAL_LINK_SELECTOR),
            email: view.query_all(EMAIL_LINK_SELECTOR),
            logger: config.logger(),
        }
    }

    pub fn social_links(&self) -> &[NodeId] {
        &self.social
    }

    pub fn email_links(&self) -> &[NodeId] {
        &self.email
    }

    pub fn platform(view: &impl View, link: NodeId) -> String {
        view.attribute(link, "aria-label")
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| DEFAULT_PLATFORM.to_string())
    }

    pub fn on_social_click(&self, view: &impl View, link: NodeId) {
        self.logger.event(
            LogLevel::Info,
            "social_link.click",
            json!({ "platform": Self::platform(view, link) }),
        );
    }

    pub fn on_email_click(&self) {
        self.logger
            .event(LogLevel::Info, "email_link.click", json!({}));
    }
}
