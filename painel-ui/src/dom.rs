//! Browser Document
//!
//! Writes the core's node trees into the page through web-sys.

use painel::{Document, Input, Node, Region};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

/// [`Document`] over the live page
///
/// Regions and inputs are looked up by id on every call, so the page
/// shell may be mounted after the document is created. A missing element
/// turns the call into a no-op.
pub struct DomDocument {
    document: web_sys::Document,
}

impl DomDocument {
    pub fn new() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    fn element(&self, id: &str) -> Option<Element> {
        let element = self.document.get_element_by_id(id);
        if element.is_none() {
            tracing::warn!(id, "Element not found");
        }
        element
    }

    fn input(&self, input: Input) -> Option<HtmlInputElement> {
        self.element(input.id())?.dyn_into::<HtmlInputElement>().ok()
    }

    fn build(&self, node: &Node) -> Option<Element> {
        let element = self.document.create_element(&node.tag).ok()?;
        if let Some(class) = &node.class {
            element.set_class_name(class);
        }
        if let Some(style) = &node.style {
            let _ = element.set_attribute("style", style);
        }
        if let Some(text) = &node.text {
            element.set_text_content(Some(text));
        }
        for child in &node.children {
            if let Some(child) = self.build(child) {
                let _ = element.append_child(&child);
            }
        }
        Some(element)
    }
}

impl Document for DomDocument {
    fn replace_children(&self, region: Region, nodes: Vec<Node>) {
        let Some(container) = self.element(region.id()) else {
            return;
        };
        container.set_inner_html("");
        for node in &nodes {
            if let Some(element) = self.build(node) {
                let _ = container.append_child(&element);
            }
        }
    }

    fn append_child(&self, region: Region, node: Node) {
        let Some(container) = self.element(region.id()) else {
            return;
        };
        if let Some(element) = self.build(&node) {
            let _ = container.append_child(&element);
        }
    }

    fn scroll_to_bottom(&self, region: Region) {
        if let Some(container) = self.element(region.id()) {
            container.set_scroll_top(container.scroll_height());
        }
    }

    fn read_input(&self, input: Input) -> String {
        self.input(input).map(|el| el.value()).unwrap_or_default()
    }

    fn clear_input(&self, input: Input) {
        if let Some(el) = self.input(input) {
            el.set_value("");
        }
    }
}
