//! Render Port
//!
//! The panels never touch a browser directly. They describe content as a
//! small [`Node`] tree and hand it to a [`Document`], which owns the
//! display regions. The browser host implements `Document` over web-sys;
//! [`MemoryDocument`] backs the terminal host and the tests.

use std::cell::RefCell;
use std::collections::HashMap;

/// Element description written into a region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub tag: String,
    pub class: Option<String>,
    pub text: Option<String>,
    pub style: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            class: None,
            text: None,
            style: None,
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    /// Own text followed by the text of all descendants, space separated
    pub fn text_content(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text<'a>(&'a self, parts: &mut Vec<&'a str>) {
        if let Some(text) = &self.text {
            parts.push(text);
        }
        for child in &self.children {
            child.collect_text(parts);
        }
    }

    /// Percentage from an inline `width: N%` style, if any
    pub fn width_percent(&self) -> Option<f64> {
        self.style
            .as_deref()?
            .split(';')
            .find_map(|decl| {
                let (prop, value) = decl.split_once(':')?;
                if prop.trim() != "width" {
                    return None;
                }
                value.trim().strip_suffix('%')?.trim().parse().ok()
            })
    }
}

/// Display areas the panels write into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    CardGrid,
    Alerts,
    BillingPanel,
    ChatLog,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::CardGrid,
        Region::Alerts,
        Region::BillingPanel,
        Region::ChatLog,
    ];

    /// Element id of the region in the host page
    pub fn id(&self) -> &'static str {
        match self {
            Region::CardGrid => "card-grid",
            Region::Alerts => "alerts",
            Region::BillingPanel => "billing-panel",
            Region::ChatLog => "chat-messages",
        }
    }
}

/// Text inputs the controllers read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    ChatMessage,
}

impl Input {
    pub fn id(&self) -> &'static str {
        match self {
            Input::ChatMessage => "chat-input",
        }
    }
}

/// Render port
///
/// Implementations are single-threaded and take `&self`; the host's event
/// loop is the only writer.
pub trait Document {
    /// Drop everything in `region` and insert `nodes` in order
    fn replace_children(&self, region: Region, nodes: Vec<Node>);

    /// Insert `node` after the current last child of `region`
    fn append_child(&self, region: Region, node: Node);

    /// Bring the newest child of `region` into view
    fn scroll_to_bottom(&self, region: Region);

    /// Current value of a text input
    fn read_input(&self, input: Input) -> String;

    /// Reset a text input to empty
    fn clear_input(&self, input: Input);
}

/// In-memory document for tests and the terminal host
#[derive(Debug, Default)]
pub struct MemoryDocument {
    regions: RefCell<HashMap<Region, Vec<Node>>>,
    inputs: RefCell<HashMap<Input, String>>,
    scrolled: RefCell<HashMap<Region, usize>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the children of a region
    pub fn children(&self, region: Region) -> Vec<Node> {
        self.regions
            .borrow()
            .get(&region)
            .cloned()
            .unwrap_or_default()
    }

    /// Text content of each child of a region
    pub fn texts(&self, region: Region) -> Vec<String> {
        self.children(region)
            .iter()
            .map(Node::text_content)
            .collect()
    }

    pub fn set_input(&self, input: Input, value: &str) {
        self.inputs.borrow_mut().insert(input, value.to_string());
    }

    /// Number of children the region held at its last scroll, if it was ever scrolled
    pub fn scrolled_to(&self, region: Region) -> Option<usize> {
        self.scrolled.borrow().get(&region).copied()
    }

    /// Plain-text rendering of a region, one line per text-bearing node
    pub fn render_text(&self, region: Region) -> String {
        let mut out = String::new();
        for node in self.regions.borrow().get(&region).into_iter().flatten() {
            write_node(&mut out, node, 0);
        }
        out
    }
}

const BAR_WIDTH: usize = 20;

fn write_node(out: &mut String, node: &Node, depth: usize) {
    let indent = "  ".repeat(depth);

    if let Some(percent) = node.width_percent() {
        let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(BAR_WIDTH);
        out.push_str(&format!(
            "{}[{}{}] {}%\n",
            indent,
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
            percent
        ));
    }

    let child_depth = match &node.text {
        Some(text) => {
            for line in text.lines() {
                out.push_str(&indent);
                out.push_str(line);
                out.push('\n');
            }
            depth + 1
        }
        None => depth,
    };

    for child in &node.children {
        write_node(out, child, child_depth);
    }
}

impl Document for MemoryDocument {
    fn replace_children(&self, region: Region, nodes: Vec<Node>) {
        self.regions.borrow_mut().insert(region, nodes);
    }

    fn append_child(&self, region: Region, node: Node) {
        self.regions
            .borrow_mut()
            .entry(region)
            .or_default()
            .push(node);
    }

    fn scroll_to_bottom(&self, region: Region) {
        let count = self
            .regions
            .borrow()
            .get(&region)
            .map(Vec::len)
            .unwrap_or(0);
        self.scrolled.borrow_mut().insert(region, count);
    }

    fn read_input(&self, input: Input) -> String {
        self.inputs
            .borrow()
            .get(&input)
            .cloned()
            .unwrap_or_default()
    }

    fn clear_input(&self, input: Input) {
        self.inputs.borrow_mut().insert(input, String::new());
    }
}
