use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A node of the document tree.
///
/// The wire form is internally tagged: `{"type": "paragraph", "content": [...]}`.
/// Attrs are typed per variant; `text` and `image` are leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Doc {
        #[serde(default)]
        content: Vec<Node>,
    },

    Paragraph {
        #[serde(default)]
        content: Vec<Node>,
    },

    Heading {
        attrs: HeadingAttrs,
        #[serde(default)]
        content: Vec<Node>,
    },

    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },

    BulletList {
        #[serde(default)]
        content: Vec<Node>,
    },

    OrderedList {
        #[serde(default)]
        attrs: OrderedListAttrs,
        #[serde(default)]
        content: Vec<Node>,
    },

    ListItem {
        #[serde(default)]
        content: Vec<Node>,
    },

    TaskList {
        #[serde(default)]
        content: Vec<Node>,
    },

    TaskItem {
        #[serde(default)]
        attrs: TaskItemAttrs,
        #[serde(default)]
        content: Vec<Node>,
    },

    Table {
        #[serde(default)]
        attrs: TableAttrs,
        #[serde(default)]
        content: Vec<Node>,
    },

    TableRow {
        #[serde(default)]
        content: Vec<Node>,
    },

    TableCell {
        #[serde(default)]
        attrs: CellAttrs,
        #[serde(default)]
        content: Vec<Node>,
    },

    TableHeader {
        #[serde(default)]
        attrs: CellAttrs,
        #[serde(default)]
        content: Vec<Node>,
    },

    Image {
        attrs: ImageAttrs,
    },

    CodeBlock {
        #[serde(default)]
        attrs: CodeBlockAttrs,
        #[serde(default)]
        content: Vec<Node>,
    },

    Blockquote {
        #[serde(default)]
        content: Vec<Node>,
    },

    HorizontalRule,

    /// Block node that delegates rendering to an externally registered
    /// component, addressed by `component_key`. `props` stays opaque JSON
    /// at the tree level.
    Section {
        attrs: SectionAttrs,
    },
}

/// Discriminant of [`Node`], used by legality tables and locator queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Doc,
    Paragraph,
    Heading,
    Text,
    BulletList,
    OrderedList,
    ListItem,
    TaskList,
    TaskItem,
    Table,
    TableRow,
    TableCell,
    TableHeader,
    Image,
    CodeBlock,
    Blockquote,
    HorizontalRule,
    Section,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeKind::Doc => "doc",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading => "heading",
            NodeKind::Text => "text",
            NodeKind::BulletList => "bulletList",
            NodeKind::OrderedList => "orderedList",
            NodeKind::ListItem => "listItem",
            NodeKind::TaskList => "taskList",
            NodeKind::TaskItem => "taskItem",
            NodeKind::Table => "table",
            NodeKind::TableRow => "tableRow",
            NodeKind::TableCell => "tableCell",
            NodeKind::TableHeader => "tableHeader",
            NodeKind::Image => "image",
            NodeKind::CodeBlock => "codeBlock",
            NodeKind::Blockquote => "blockquote",
            NodeKind::HorizontalRule => "horizontalRule",
            NodeKind::Section => "section",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    pub level: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderedListAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskItemAttrs {
    #[serde(default)]
    pub checked: bool,
}

/// Table-level visual attributes. Sticky and zebra settings are presentation
/// hints consumed by the view layer, not behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(default)]
    pub sticky_header: bool,
    #[serde(default)]
    pub sticky_first_column_count: u32,
    #[serde(default)]
    pub zebra: bool,
    #[serde(default)]
    pub compact: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_style: Option<String>,
    #[serde(default)]
    pub overflow_x: bool,
}

fn default_span() -> u32 {
    1
}

fn is_default_span(v: &u32) -> bool {
    *v == 1
}

/// Per-cell attributes shared by `tableCell` and `tableHeader`.
///
/// `colwidth` on the first row's cells is authoritative for rendered column
/// widths (one entry per spanned column, in pixels).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellAttrs {
    #[serde(default = "default_span", skip_serializing_if = "is_default_span")]
    pub colspan: u32,
    #[serde(default = "default_span", skip_serializing_if = "is_default_span")]
    pub rowspan: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colwidth: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<String>,
}

impl Default for CellAttrs {
    fn default() -> Self {
        Self {
            colspan: 1,
            rowspan: 1,
            colwidth: None,
            background_color: None,
            text_align: None,
            vertical_align: None,
            padding: None,
            border_color: None,
            border_width: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAttrs {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeBlockAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionAttrs {
    pub component_key: String,
    #[serde(default)]
    pub props: Value,
}

/// Inline annotation on a text node. A text run carries at most one mark of
/// each kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    Bold,
    Italic,
    Strike,
    Code,
    Link {
        attrs: LinkAttrs,
    },
    Underline,
    Highlight {
        #[serde(default)]
        attrs: HighlightAttrs,
    },
    Subscript,
    Superscript,
    TextStyle {
        #[serde(default)]
        attrs: TextStyleAttrs,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkKind {
    Bold,
    Italic,
    Strike,
    Code,
    Link,
    Underline,
    Highlight,
    Subscript,
    Superscript,
    TextStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighlightAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A single `textStyle` mark bundles the free-form inline style knobs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyleAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
}

impl Mark {
    pub fn kind(&self) -> MarkKind {
        match self {
            Mark::Bold => MarkKind::Bold,
            Mark::Italic => MarkKind::Italic,
            Mark::Strike => MarkKind::Strike,
            Mark::Code => MarkKind::Code,
            Mark::Link { .. } => MarkKind::Link,
            Mark::Underline => MarkKind::Underline,
            Mark::Highlight { .. } => MarkKind::Highlight,
            Mark::Subscript => MarkKind::Subscript,
            Mark::Superscript => MarkKind::Superscript,
            Mark::TextStyle { .. } => MarkKind::TextStyle,
        }
    }
}

const NO_CHILDREN: &[Node] = &[];

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Doc { .. } => NodeKind::Doc,
            Node::Paragraph { .. } => NodeKind::Paragraph,
            Node::Heading { .. } => NodeKind::Heading,
            Node::Text { .. } => NodeKind::Text,
            Node::BulletList { .. } => NodeKind::BulletList,
            Node::OrderedList { .. } => NodeKind::OrderedList,
            Node::ListItem { .. } => NodeKind::ListItem,
            Node::TaskList { .. } => NodeKind::TaskList,
            Node::TaskItem { .. } => NodeKind::TaskItem,
            Node::Table { .. } => NodeKind::Table,
            Node::TableRow { .. } => NodeKind::TableRow,
            Node::TableCell { .. } => NodeKind::TableCell,
            Node::TableHeader { .. } => NodeKind::TableHeader,
            Node::Image { .. } => NodeKind::Image,
            Node::CodeBlock { .. } => NodeKind::CodeBlock,
            Node::Blockquote { .. } => NodeKind::Blockquote,
            Node::HorizontalRule => NodeKind::HorizontalRule,
            Node::Section { .. } => NodeKind::Section,
        }
    }

    /// Child nodes, empty for leaves.
    pub fn content(&self) -> &[Node] {
        match self {
            Node::Doc { content }
            | Node::Paragraph { content }
            | Node::Heading { content, .. }
            | Node::BulletList { content }
            | Node::OrderedList { content, .. }
            | Node::ListItem { content }
            | Node::TaskList { content }
            | Node::TaskItem { content, .. }
            | Node::Table { content, .. }
            | Node::TableRow { content }
            | Node::TableCell { content, .. }
            | Node::TableHeader { content, .. }
            | Node::CodeBlock { content, .. }
            | Node::Blockquote { content } => content,
            Node::Text { .. } | Node::Image { .. } | Node::HorizontalRule | Node::Section { .. } => {
                NO_CHILDREN
            }
        }
    }

    /// Mutable child vector, `None` for leaves.
    pub fn content_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Doc { content }
            | Node::Paragraph { content }
            | Node::Heading { content, .. }
            | Node::BulletList { content }
            | Node::OrderedList { content, .. }
            | Node::ListItem { content }
            | Node::TaskList { content }
            | Node::TaskItem { content, .. }
            | Node::Table { content, .. }
            | Node::TableRow { content }
            | Node::TableCell { content, .. }
            | Node::TableHeader { content, .. }
            | Node::CodeBlock { content, .. }
            | Node::Blockquote { content } => Some(content),
            Node::Text { .. } | Node::Image { .. } | Node::HorizontalRule | Node::Section { .. } => {
                None
            }
        }
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        fn collect(node: &Node, out: &mut String) {
            if let Node::Text { text, .. } = node {
                out.push_str(text);
            }
            for child in node.content() {
                collect(child, out);
            }
        }
        let mut out = String::new();
        collect(self, &mut out);
        out
    }

    pub fn doc(content: Vec<Node>) -> Self {
        Node::Doc { content }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn paragraph(content: Vec<Node>) -> Self {
        Node::Paragraph { content }
    }

    /// A paragraph holding one text run, or an empty paragraph for empty
    /// text. Empty text nodes are not legal leaves.
    pub fn paragraph_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Node::Paragraph { content: vec![] }
        } else {
            Node::Paragraph {
                content: vec![Node::text(text)],
            }
        }
    }

    pub fn heading(level: u8, content: Vec<Node>) -> Self {
        Node::Heading {
            attrs: HeadingAttrs { level },
            content,
        }
    }

    pub fn table(attrs: TableAttrs, rows: Vec<Node>) -> Self {
        Node::Table {
            attrs,
            content: rows,
        }
    }

    pub fn table_row(cells: Vec<Node>) -> Self {
        Node::TableRow { content: cells }
    }

    pub fn table_cell(attrs: CellAttrs, content: Vec<Node>) -> Self {
        Node::TableCell { attrs, content }
    }

    pub fn table_header(attrs: CellAttrs, content: Vec<Node>) -> Self {
        Node::TableHeader { attrs, content }
    }

    pub fn section(component_key: impl Into<String>, props: Value) -> Self {
        Node::Section {
            attrs: SectionAttrs {
                component_key: component_key.into(),
                props,
            },
        }
    }

    /// Deserialize a node tree from its JSON wire form.
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Serialize to the JSON wire form. Inverse of [`Node::from_json`] for
    /// any tree accepted by [`crate::validate`].
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_form_is_internally_tagged() {
        let node = Node::heading(2, vec![Node::text("Title")]);
        let value = node.to_json().unwrap();

        assert_eq!(value["type"], "heading");
        assert_eq!(value["attrs"]["level"], 2);
        assert_eq!(value["content"][0]["type"], "text");
        assert_eq!(value["content"][0]["text"], "Title");
    }

    #[test]
    fn test_json_round_trip() {
        let node = Node::doc(vec![
            Node::paragraph(vec![Node::Text {
                text: "hello".to_string(),
                marks: vec![
                    Mark::Bold,
                    Mark::Link {
                        attrs: LinkAttrs {
                            href: "https://example.com".to_string(),
                            target: None,
                        },
                    },
                ],
            }]),
            Node::table(
                TableAttrs {
                    zebra: true,
                    ..Default::default()
                },
                vec![Node::table_row(vec![Node::table_cell(
                    CellAttrs::default(),
                    vec![Node::paragraph_text("42")],
                )])],
            ),
            Node::HorizontalRule,
            Node::section("pricing", json!({"plan": "pro"})),
        ]);

        let value = node.to_json().unwrap();
        let back = Node::from_json(value).unwrap();
        assert_eq!(node, back);
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let value = json!({
            "type": "tableCell",
            "content": [{"type": "paragraph"}]
        });
        let node = Node::from_json(value).unwrap();

        match &node {
            Node::TableCell { attrs, content } => {
                assert_eq!(attrs.colspan, 1);
                assert_eq!(attrs.rowspan, 1);
                assert!(attrs.colwidth.is_none());
                assert_eq!(content.len(), 1);
            }
            other => panic!("expected tableCell, got {}", other.kind()),
        }
    }

    #[test]
    fn test_text_content_concatenates_descendants() {
        let table = Node::table_row(vec![
            Node::table_cell(CellAttrs::default(), vec![Node::paragraph_text("a")]),
            Node::table_cell(CellAttrs::default(), vec![Node::paragraph_text("b")]),
        ]);
        assert_eq!(table.text_content(), "ab");
    }

    #[test]
    fn test_paragraph_text_empty_has_no_children() {
        assert!(Node::paragraph_text("").content().is_empty());
    }
}
