use crate::output::RenderNode;
use crate::registry::{normalize_props, ComponentRegistry};
use folio_schema::{CellAttrs, Mark, Node, TableAttrs};
use tracing::debug;

/// Render a document tree (or subtree) to a presentation tree.
///
/// Pure and total over any tree that passed schema validation: the only
/// `None` outcomes are `section` nodes whose `componentKey` is not in the
/// registry (or whose component declined to render), which are skipped
/// silently.
pub fn render(node: &Node, registry: &ComponentRegistry) -> Option<RenderNode> {
    match node {
        Node::Doc { content } => Some(
            RenderNode::element("article").with_children(render_children(content, registry)),
        ),

        Node::Paragraph { content } => {
            Some(RenderNode::element("p").with_children(render_children(content, registry)))
        }

        Node::Heading { attrs, content } => Some(
            RenderNode::element(format!("h{}", attrs.level.clamp(1, 6)))
                .with_children(render_children(content, registry)),
        ),

        Node::Text { text, marks } => Some(render_text(text, marks)),

        Node::BulletList { content } => {
            Some(RenderNode::element("ul").with_children(render_children(content, registry)))
        }

        Node::OrderedList { attrs, content } => {
            let mut element = RenderNode::element("ol");
            if let Some(start) = attrs.start {
                element = element.with_attr("start", start.to_string());
            }
            Some(element.with_children(render_children(content, registry)))
        }

        Node::ListItem { content } => {
            Some(RenderNode::element("li").with_children(render_children(content, registry)))
        }

        Node::TaskList { content } => Some(
            RenderNode::element("ul")
                .with_attr("data-task-list", "true")
                .with_children(render_children(content, registry)),
        ),

        Node::TaskItem { attrs, content } => Some(
            RenderNode::element("li")
                .with_attr("data-checked", attrs.checked.to_string())
                .with_children(render_children(content, registry)),
        ),

        Node::Table { attrs, content } => Some(render_table(attrs, content, registry)),

        // Rows and cells outside render_table: render without partition
        // context (used when a caller renders a subtree directly).
        Node::TableRow { content } => {
            Some(RenderNode::element("tr").with_children(render_children(content, registry)))
        }
        Node::TableCell { attrs, content } => Some(render_cell("td", attrs, content, registry)),
        Node::TableHeader { attrs, content } => Some(render_cell("th", attrs, content, registry)),

        Node::Image { attrs } => {
            let mut element = RenderNode::element("img").with_attr("src", &attrs.src);
            if let Some(alt) = &attrs.alt {
                element = element.with_attr("alt", alt);
            }
            if let Some(width) = attrs.width {
                element = element.with_attr("width", width.to_string());
            }
            Some(element)
        }

        Node::CodeBlock { attrs, content } => {
            let mut code = RenderNode::element("code");
            if let Some(language) = &attrs.language {
                code = code.with_attr("data-language", language);
            }
            Some(
                RenderNode::element("pre")
                    .with_child(code.with_children(render_children(content, registry))),
            )
        }

        Node::Blockquote { content } => Some(
            RenderNode::element("blockquote").with_children(render_children(content, registry)),
        ),

        Node::HorizontalRule => Some(RenderNode::element("hr")),

        Node::Section { attrs } => {
            let Some(component) = registry.resolve(&attrs.component_key) else {
                debug!(key = %attrs.component_key, "skipping unregistered section");
                return None;
            };
            let props = normalize_props(component.fields(), &attrs.props);
            component.render(&props)
        }
    }
}

fn render_children(content: &[Node], registry: &ComponentRegistry) -> Vec<RenderNode> {
    content
        .iter()
        .filter_map(|child| render(child, registry))
        .collect()
}

/// Fixed wrap priority, outermost first. This ordering is what makes nested
/// mark wrapping reproducible.
fn mark_rank(mark: &Mark) -> u8 {
    match mark {
        Mark::Bold => 0,
        Mark::Italic => 1,
        Mark::Strike => 2,
        Mark::Code => 3,
        Mark::Link { .. } => 4,
        Mark::Underline => 5,
        Mark::Highlight { .. } => 6,
        Mark::Subscript => 7,
        Mark::Superscript => 8,
        Mark::TextStyle { .. } => 9,
    }
}

fn mark_wrapper(mark: &Mark) -> RenderNode {
    match mark {
        Mark::Bold => RenderNode::element("strong"),
        Mark::Italic => RenderNode::element("em"),
        Mark::Strike => RenderNode::element("s"),
        Mark::Code => RenderNode::element("code"),
        Mark::Link { attrs } => {
            let mut element = RenderNode::element("a").with_attr("href", &attrs.href);
            if let Some(target) = &attrs.target {
                element = element.with_attr("target", target);
            }
            element
        }
        Mark::Underline => RenderNode::element("u"),
        Mark::Highlight { attrs } => {
            let mut element = RenderNode::element("mark");
            if let Some(color) = &attrs.color {
                element = element.with_style("background-color", color);
            }
            element
        }
        Mark::Subscript => RenderNode::element("sub"),
        Mark::Superscript => RenderNode::element("sup"),
        Mark::TextStyle { attrs } => {
            let mut element = RenderNode::element("span");
            if let Some(size) = &attrs.font_size {
                element = element.with_style("font-size", size);
            }
            if let Some(family) = &attrs.font_family {
                element = element.with_style("font-family", family);
            }
            if let Some(color) = &attrs.color {
                element = element.with_style("color", color);
            }
            if let Some(height) = &attrs.line_height {
                element = element.with_style("line-height", height);
            }
            if let Some(spacing) = &attrs.letter_spacing {
                element = element.with_style("letter-spacing", spacing);
            }
            element
        }
    }
}

fn render_text(text: &str, marks: &[Mark]) -> RenderNode {
    let mut ordered: Vec<&Mark> = marks.iter().collect();
    ordered.sort_by_key(|mark| mark_rank(mark));

    // Wrap inside-out so the lowest rank ends up outermost.
    let mut node = RenderNode::text(text);
    for mark in ordered.into_iter().rev() {
        node = mark_wrapper(mark).with_child(node);
    }
    node
}

fn render_table(attrs: &TableAttrs, rows: &[Node], registry: &ComponentRegistry) -> RenderNode {
    let mut table = RenderNode::element("table");

    if let Some(width) = &attrs.width {
        table = table.with_style("width", width);
    }
    if let Some(align) = &attrs.align {
        table = table.with_attr("data-align", align);
    }
    if attrs.sticky_header {
        table = table.with_attr("data-sticky-header", "true");
    }
    if attrs.sticky_first_column_count > 0 {
        table = table.with_attr(
            "data-sticky-columns",
            attrs.sticky_first_column_count.to_string(),
        );
    }
    if attrs.compact {
        table = table.with_attr("data-compact", "true");
    }
    if attrs.overflow_x {
        table = table.with_attr("data-overflow-x", "true");
    }
    if let Some(border_style) = &attrs.border_style {
        table = table.with_attr("data-border-style", border_style);
    }

    if let Some(caption) = &attrs.caption {
        table = table.with_child(RenderNode::element("caption").with_child(RenderNode::text(caption)));
    }

    if let Some(colgroup) = render_colgroup(rows) {
        table = table.with_child(colgroup);
    }

    // Row 0 is the header iff any of its cells is a tableHeader.
    let has_header = rows
        .first()
        .map(|row| {
            row.content()
                .iter()
                .any(|cell| matches!(cell, Node::TableHeader { .. }))
        })
        .unwrap_or(false);

    let (header_rows, body_rows) = if has_header {
        rows.split_at(1)
    } else {
        (&rows[..0], rows)
    };

    if !header_rows.is_empty() {
        table = table.with_child(
            RenderNode::element("thead").with_children(render_children(header_rows, registry)),
        );
    }

    let mut body = RenderNode::element("tbody");
    for (index, row) in body_rows.iter().enumerate() {
        if let Some(mut rendered) = render(row, registry) {
            // Zebra shading alternates by body-row parity, header excluded.
            if attrs.zebra {
                let parity = if index % 2 == 0 { "even" } else { "odd" };
                rendered = rendered.with_attr("data-parity", parity);
            }
            body = body.with_child(rendered);
        }
    }
    table.with_child(body)
}

/// Column widths come from the first row's `colwidth` attrs; cells without
/// one contribute unsized `col` elements, one per spanned column.
fn render_colgroup(rows: &[Node]) -> Option<RenderNode> {
    let first_row = rows.first()?;
    let cells = first_row.content();
    let any_sized = cells.iter().any(|cell| match cell {
        Node::TableCell { attrs, .. } | Node::TableHeader { attrs, .. } => attrs.colwidth.is_some(),
        _ => false,
    });
    if !any_sized {
        return None;
    }

    let mut colgroup = RenderNode::element("colgroup");
    for cell in cells {
        let attrs = match cell {
            Node::TableCell { attrs, .. } | Node::TableHeader { attrs, .. } => attrs,
            _ => continue,
        };
        match &attrs.colwidth {
            Some(widths) => {
                for width in widths {
                    colgroup = colgroup.with_child(
                        RenderNode::element("col").with_style("width", format!("{}px", width)),
                    );
                }
            }
            None => {
                for _ in 0..attrs.colspan {
                    colgroup = colgroup.with_child(RenderNode::element("col"));
                }
            }
        }
    }
    Some(colgroup)
}

fn render_cell(
    tag: &str,
    attrs: &CellAttrs,
    content: &[Node],
    registry: &ComponentRegistry,
) -> RenderNode {
    let mut cell = RenderNode::element(tag);

    if attrs.colspan > 1 {
        cell = cell.with_attr("colspan", attrs.colspan.to_string());
    }
    if attrs.rowspan > 1 {
        cell = cell.with_attr("rowspan", attrs.rowspan.to_string());
    }
    if let Some(background) = &attrs.background_color {
        cell = cell.with_style("background-color", background);
    }
    if let Some(align) = &attrs.text_align {
        cell = cell.with_style("text-align", align);
    }
    if let Some(valign) = &attrs.vertical_align {
        cell = cell.with_style("vertical-align", valign);
    }
    if let Some(padding) = &attrs.padding {
        cell = cell.with_style("padding", padding);
    }
    if let Some(color) = &attrs.border_color {
        cell = cell.with_style("border-color", color);
    }
    if let Some(width) = &attrs.border_width {
        cell = cell.with_style("border-width", width);
    }

    cell.with_children(render_children(content, registry))
}
