#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Intersection {
    pub node: NodeId,
    pub is_intersecting: bool,
}

#[cfg(test)]
impl Intersection {
    pub(crate) fn entering(node: NodeId) -> Self {
        Self {
            node,
            is_intersecting: true,
        }
    }

    pub(crate) fn leaving(node: NodeId) -> Self {
        Self {
            node,
            is_intersecting: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observation {
    Keep,
    Unobserve,
}

pub trait View {
    fn query_one(&mut self, selector: &str) -> Option<NodeId>;
    fn query_all(&mut self, selector: &str) -> Vec<NodeId>;

    fn add_class(&mut self, node: NodeId, class: &str);
    fn remove_class(&mut self, node: NodeId, class: &str);
    /// Returns whether the class is present after toggling.
    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool;
    fn has_class(&self, node: NodeId, class: &str) -> bool;

    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    fn text(&self, node: NodeId) -> String;
    fn set_text(&mut self, node: NodeId, text: &str);

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn offset_top(&self, node: NodeId) -> f64;
    fn offset_height(&self, node: NodeId) -> f64;

    /// False once the element has been removed from the document.
    fn is_connected(&self, node: NodeId) -> bool;
    fn image_failed(&self, node: NodeId) -> bool;

    fn create_element(&mut self, tag: &str) -> Option<NodeId>;
    fn append_child(&mut self, parent: NodeId, child: NodeId);
    fn parent(&self, node: NodeId) -> Option<NodeId>;
    fn body(&mut self) -> Option<NodeId>;

    fn document_loaded(&self) -> bool;

    fn scroll_y(&self) -> f64;
    fn viewport_width(&self) -> f64;
    /// `scrollHeight - clientHeight` of the document element.
    fn scrollable_height(&self) -> f64;
    fn scroll_to_smooth(&mut self, top: f64);

    /// Animates `left`/`top` to the given point over `duration_ms`, holding
    /// the final frame.
    fn animate_position(&mut self, node: NodeId, x: f64, y: f64, duration_ms: f64);
}

pub fn px(value: f64) -> String {
    format!("{value}px")
}
