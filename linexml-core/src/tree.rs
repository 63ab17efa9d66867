//! Element tree for line-parsed XML documents.
//!
//! The tree uses an index-based arena pattern for efficient allocation and
//! to enable parent pointers without reference cycles. Parsing never needs
//! an explicit stack: the parent back-references encode it.
//!
//! # Example
//!
//! ```
//! use linexml_core::LineParser;
//!
//! let mut parser = LineParser::new();
//! let out = parser.parse("<greeting lang='en'>hello</greeting>").unwrap();
//!
//! let root = out.document.root();
//! let greeting = root.child_by_name("greeting").unwrap();
//! assert_eq!(greeting.text(), "hello");
//! ```

// ============================================================================
// Core Types
// ============================================================================

/// Name of the synthetic root element that owns the whole tree.
pub const ROOT_NAME: &str = "ROOT";

/// Index into the document's element arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Lifecycle state of one element across the lines that describe it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// No content consumed yet.
    Initial,
    /// Opening tag recognized, accumulating attributes/text, awaiting close.
    Parsing,
    /// Fully parsed via end tag or self-closing marker.
    Closed,
}

/// One attribute as captured from the source line.
///
/// Values are stored verbatim: quotes present in the source are retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Internal element storage.
#[derive(Debug)]
struct ElementData {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    name: String,
    text: String,
    attrs: Vec<Attribute>,
    state: ParseState,
}

impl ElementData {
    fn detached() -> Self {
        ElementData {
            parent: None,
            children: Vec::new(),
            name: String::new(),
            text: String::new(),
            attrs: Vec::new(),
            state: ParseState::Initial,
        }
    }
}

// ============================================================================
// Document
// ============================================================================

/// A parsed document: one arena of elements rooted at a synthetic `ROOT`.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<ElementData>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing only the `ROOT` element.
    pub fn new() -> Self {
        let mut root = ElementData::detached();
        root.name = ROOT_NAME.to_string();
        Document {
            nodes: vec![root],
            root: NodeId::new(0),
        }
    }

    /// Get the root node.
    pub fn root(&self) -> Node<'_> {
        Node { doc: self, id: self.root }
    }

    /// Get the root's id.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Get a node by id.
    pub fn get(&self, id: NodeId) -> Option<Node<'_>> {
        if id.index() < self.nodes.len() {
            Some(Node { doc: self, id })
        } else {
            None
        }
    }

    /// Reset to a lone `ROOT` element so the arena can be reused.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        let root = &mut self.nodes[0];
        root.children.clear();
        root.attrs.clear();
        root.text.clear();
        root.state = ParseState::Initial;
    }

    /// Create a detached element, not yet attached to any parent.
    pub fn create_element(&mut self) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(ElementData::detached());
        id
    }

    /// Attach a detached element under `parent`, setting its back-reference.
    ///
    /// The parent is set exactly once; attaching an already-attached node
    /// is a no-op.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.nodes[child.index()].parent.is_some() || child == self.root {
            return;
        }
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    /// Create a fresh element appended under `parent`. The sole growth
    /// mechanism used by the parser.
    pub fn add_child(&mut self, parent: NodeId) -> NodeId {
        let id = self.create_element();
        self.append_child(parent, id);
        id
    }

    /// Assign the element name. Names are immutable once first assigned,
    /// so a second call is a no-op.
    pub fn set_name(&mut self, id: NodeId, name: &str) {
        let data = &mut self.nodes[id.index()];
        if data.name.is_empty() {
            data.name.push_str(name);
        }
    }

    /// Set the inline text. Last write wins.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        let data = &mut self.nodes[id.index()];
        data.text.clear();
        data.text.push_str(text);
    }

    /// Set the parsing state tag.
    pub fn set_state(&mut self, id: NodeId, state: ParseState) {
        self.nodes[id.index()].state = state;
    }

    /// Store an attribute. Duplicate keys replace in place: last wins.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let attrs = &mut self.nodes[id.index()].attrs;
        if let Some(existing) = attrs.iter_mut().find(|a| a.name == name) {
            existing.value.clear();
            existing.value.push_str(value);
        } else {
            attrs.push(Attribute {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
    }

    fn node_data(&self, id: NodeId) -> &ElementData {
        &self.nodes[id.index()]
    }
}

// ============================================================================
// Node (navigation handle)
// ============================================================================

/// A lightweight handle for navigating the document tree.
#[derive(Clone, Copy)]
pub struct Node<'doc> {
    doc: &'doc Document,
    id: NodeId,
}

impl<'doc> Node<'doc> {
    /// Get the node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Get the element name. Empty until an opening tag named it.
    pub fn name(&self) -> &'doc str {
        &self.doc.node_data(self.id).name
    }

    /// Get the inline text captured between `>` and the next `<`.
    pub fn text(&self) -> &'doc str {
        &self.doc.node_data(self.id).text
    }

    /// Get the parsing state tag.
    pub fn state(&self) -> ParseState {
        self.doc.node_data(self.id).state
    }

    /// Get the parent node, if any. `None` only for the root.
    pub fn parent(&self) -> Option<Node<'doc>> {
        self.doc.node_data(self.id).parent.map(|id| Node { doc: self.doc, id })
    }

    /// Iterate over child nodes in document order.
    pub fn children(&self) -> impl Iterator<Item = Node<'doc>> + 'doc {
        let doc = self.doc;
        self.doc.node_data(self.id).children.iter().map(move |&id| Node { doc, id })
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.doc.node_data(self.id).children.len()
    }

    /// Linear scan of direct children for the first name match.
    /// An empty name never matches anything.
    pub fn child_by_name(&self, name: &str) -> Option<Node<'doc>> {
        if name.is_empty() {
            return None;
        }
        self.children().find(|c| c.name() == name)
    }

    /// Look up an attribute value by name.
    ///
    /// Returns `None` for an absent key (and for an empty name), which is
    /// distinguishable from a stored empty value.
    pub fn attr(&self, name: &str) -> Option<&'doc str> {
        if name.is_empty() {
            return None;
        }
        self.doc
            .node_data(self.id)
            .attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Iterate over attributes in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = &'doc Attribute> + 'doc {
        self.doc.node_data(self.id).attrs.iter()
    }

    /// Render a human-readable multi-line dump of this subtree.
    ///
    /// Four spaces per indent level, then `[name]`, then `, Text[...]` if
    /// text is present, then `, Attributes[k=v,...]` if any, then each
    /// child at `indent_level + 1`.
    pub fn render(&self, indent_level: usize) -> String {
        let mut out = String::new();
        self.render_into(indent_level, &mut out);
        out
    }

    fn render_into(&self, level: usize, out: &mut String) {
        let data = self.doc.node_data(self.id);
        for _ in 0..level {
            out.push_str("    ");
        }
        out.push('[');
        out.push_str(&data.name);
        out.push(']');
        if !data.text.is_empty() {
            out.push_str(", Text[");
            out.push_str(&data.text);
            out.push(']');
        }
        if !data.attrs.is_empty() {
            out.push_str(", Attributes[");
            for (i, attr) in data.attrs.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&attr.name);
                out.push('=');
                out.push_str(&attr.value);
            }
            out.push(']');
        }
        out.push('\n');
        for child in self.children() {
            child.render_into(level + 1, out);
        }
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("state", &self.state())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
