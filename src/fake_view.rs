use crate::view::{NodeId, View};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default)]
pub(crate) struct FakeNode {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub styles: BTreeMap<String, String>,
    pub text: String,
    pub offset_top: f64,
    pub offset_height: f64,
    pub parent: Option<NodeId>,
    pub connected: bool,
    pub broken: bool,
    pub animations: Vec<(f64, f64, f64)>,
}

/// In-memory page used by unit tests.
pub(crate) struct FakeView {
    pub nodes: Vec<FakeNode>,
    pub body: NodeId,
    pub loaded: bool,
    pub scroll_y: f64,
    pub viewport_width: f64,
    pub scrollable_height: f64,
    pub smooth_scrolls: Vec<f64>,
}

impl FakeView {
    pub fn new() -> Self {
        let body = FakeNode {
            tag: "body".to_string(),
            connected: true,
            ..FakeNode::default()
        };

        Self {
            nodes: vec![body],
            body: NodeId(0),
            loaded: false,
            scroll_y: 0.0,
            viewport_width: 1280.0,
            scrollable_height: 2000.0,
            smooth_scrolls: Vec::new(),
        }
    }

    /// Appends an element under `parent` (or body) and returns it.
    ///
    /// `markup` is a compound selector such as `section#about.card[data-x=1]`.
    pub fn add(&mut self, parent: Option<NodeId>, markup: &str) -> NodeId {
        let compound = parse_compound(markup);
        let mut node = FakeNode {
            tag: compound.tag.unwrap_or_else(|| "div".to_string()),
            classes: compound.classes,
            parent: Some(parent.unwrap_or(self.body)),
            connected: true,
            ..FakeNode::default()
        };
        if let Some(id) = compound.id {
            node.attributes.insert("id".to_string(), id);
        }
        for attribute in compound.attributes {
            node.attributes
                .insert(attribute.name, attribute.value.unwrap_or_default());
        }

        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, node: NodeId) -> &FakeNode {
        &self.nodes[node.0]
    }

    pub fn node_mut(&mut self, node: NodeId) -> &mut FakeNode {
        &mut self.nodes[node.0]
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.node(node).styles.get(property).map(String::as_str)
    }

    pub fn with_box(&mut self, node: NodeId, top: f64, height: f64) {
        let entry = self.node_mut(node);
        entry.offset_top = top;
        entry.offset_height = height;
    }

    pub fn detach(&mut self, node: NodeId) {
        self.node_mut(node).connected = false;
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        selector
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .any(|part| self.matches_complex(node, part))
    }

    fn matches_complex(&self, node: NodeId, selector: &str) -> bool {
        let compounds: Vec<Compound> = selector.split_whitespace().map(parse_compound).collect();
        let Some((last, ancestors)) = compounds.split_last() else {
            return false;
        };

        if !last.matches(self.node(node)) {
            return false;
        }

        let mut cursor = self.node(node).parent;
        for compound in ancestors.iter().rev() {
            loop {
                let Some(current) = cursor else {
                    return false;
                };
                cursor = self.node(current).parent;
                if compound.matches(self.node(current)) {
                    break;
                }
            }
        }
        true
    }
}

impl View for FakeView {
    fn query_one(&mut self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&mut self, selector: &str) -> Vec<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|node| self.nodes[node.0].connected && self.matches(*node, selector))
            .collect()
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.node_mut(node).classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        self.node_mut(node).classes.retain(|existing| existing != class);
    }

    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).classes.iter().any(|existing| existing == class)
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        self.node_mut(node)
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn text(&self, node: NodeId) -> String {
        self.node(node).text.clone()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.node_mut(node).text = text.to_string();
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.node(node).attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.node_mut(node)
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn offset_top(&self, node: NodeId) -> f64 {
        self.node(node).offset_top
    }

    fn offset_height(&self, node: NodeId) -> f64 {
        self.node(node).offset_height
    }

    fn is_connected(&self, node: NodeId) -> bool {
        self.node(node).connected
    }

    fn image_failed(&self, node: NodeId) -> bool {
        self.node(node).broken
    }

    fn create_element(&mut self, tag: &str) -> Option<NodeId> {
        self.nodes.push(FakeNode {
            tag: tag.to_string(),
            ..FakeNode::default()
        });
        Some(NodeId(self.nodes.len() - 1))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let connected = self.node(parent).connected;
        let entry = self.node_mut(child);
        entry.parent = Some(parent);
        entry.connected = connected;
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    fn body(&mut self) -> Option<NodeId> {
        Some(self.body)
    }

    fn document_loaded(&self) -> bool {
        self.loaded
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn scrollable_height(&self) -> f64 {
        self.scrollable_height
    }

    fn scroll_to_smooth(&mut self, top: f64) {
        self.smooth_scrolls.push(top);
    }

    fn animate_position(&mut self, node: NodeId, x: f64, y: f64, duration_ms: f64) {
        self.node_mut(node).animations.push((x, y, duration_ms));
    }
}

#[derive(Debug, Default)]
struct AttributeSelector {
    name: String,
    value: Option<String>,
    prefix: bool,
}

#[derive(Debug, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeSelector>,
}

impl Compound {
    fn matches(&self, node: &FakeNode) -> bool {
        if let Some(tag) = &self.tag {
            if tag != "*" && tag != &node.tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.attributes.get("id") != Some(id) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| node.classes.contains(class)) {
            return false;
        }
        self.attributes.iter().all(|selector| {
            let Some(actual) = node.attributes.get(&selector.name) else {
                return false;
            };
            match (&selector.value, selector.prefix) {
                (None, _) => true,
                (Some(expected), true) => actual.starts_with(expected.as_str()),
                (Some(expected), false) => actual == expected,
            }
        })
    }
}

fn parse_compound(source: &str) -> Compound {
    let mut compound = Compound::default();
    let mut rest = source.trim();

    let tag_end = rest.find(['#', '.', '[']).unwrap_or(rest.len());
    if tag_end > 0 {
        compound.tag = Some(rest[..tag_end].to_string());
    }
    rest = &rest[tag_end..];

    while let Some(marker) = rest.chars().next() {
        match marker {
            '[' => {
                let close = rest.find(']').unwrap_or(rest.len());
                compound.attributes.push(parse_attribute(&rest[1..close]));
                rest = rest.get(close + 1..).unwrap_or("");
            }
            '#' | '.' => {
                let body = &rest[1..];
                let end = body.find(['#', '.', '[']).unwrap_or(body.len());
                let name = body[..end].to_string();
                if marker == '#' {
                    compound.id = Some(name);
                } else {
                    compound.classes.push(name);
                }
                rest = &body[end..];
            }
            _ => break,
        }
    }

    compound
}

fn parse_attribute(source: &str) -> AttributeSelector {
    let unquote = |value: &str| value.trim().trim_matches('"').trim_matches('\'').to_string();

    if let Some((name, value)) = source.split_once("^=") {
        return AttributeSelector {
            name: name.trim().to_string(),
            value: Some(unquote(value)),
            prefix: true,
        };
    }
    if let Some((name, value)) = source.split_once('=') {
        return AttributeSelector {
            name: name.trim().to_string(),
            value: Some(unquote(value)),
            prefix: false,
        };
    }
    AttributeSelector {
        name: source.trim().to_string(),
        ..AttributeSelector::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_matcher_handles_descendants_and_attribute_prefixes() {
        let mut view = FakeView::new();
        let hero = view.add(None, "section.hero");
        let inside = view.add(Some(hero), "h1.fade-in-up");
        let outside = view.add(None, "p.fade-in-up");
        let anchor = view.add(None, "a[href=\"#about\"]");
        let mail = view.add(None, "a[href=\"mailto:me@example.com\"]");

        assert_eq!(view.query_all(".hero .fade-in-up"), vec![inside]);
        assert_eq!(view.query_all(".fade-in-up"), vec![inside, outside]);
        assert_eq!(view.query_all("a[href^=\"#\"]"), vec![anchor]);
        assert_eq!(view.query_all("a[href^=\"mailto:\"]"), vec![mail]);
        assert_eq!(view.query_all("section, a[href^=\"#\"]"), vec![hero, anchor]);
    }

    #[test]
    fn detached_nodes_drop_out_of_queries() {
        let mut view = FakeView::new();
        let card = view.add(None, "div.project-card");
        view.detach(card);

        assert!(view.query_all(".project-card").is_empty());
        assert!(!view.is_connected(card));
    }
}
