//! # Table Transforms
//!
//! Semantic operations on table subtrees: sort, fill, column attrs, column
//! formatting, matrix replacement.
//!
//! ## Design Principles
//!
//! 1. **Whole-subtree replacement**: each transform materializes a deep copy
//!    of the table, edits the copy, and returns a [`Splice`] addressing the
//!    original — never an in-place mutation.
//! 2. **Silent no-ops**: unmet preconditions (no table at the path, empty
//!    matrix) return `None`; nothing throws.
//! 3. **Pure by default**: transforms take an optional observer callback for
//!    diagnostics, defaulting to no-op, instead of logging internally.

use crate::number::{
    format_currency, format_number, format_percent, parse_numeric, Locale, ParsedNumber,
};
use crate::splice::Splice;
use folio_schema::{CellAttrs, Node, NodePath};
use std::cmp::Ordering;

/// Diagnostic event emitted by a transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformEvent {
    Applied {
        op: &'static str,
        cells_touched: usize,
    },
    Skipped {
        op: &'static str,
        reason: &'static str,
    },
}

/// Optional per-call diagnostics sink; `None` keeps the transform silent.
pub type Observer<'a> = Option<&'a dyn Fn(&TransformEvent)>;

fn notify(observer: Observer<'_>, event: TransformEvent) {
    if let Some(callback) = observer {
        callback(&event);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnFormat {
    Number,
    Currency,
    Percent,
}

/// One visual attribute applied column-wide. `None` values clear the attr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnAttr {
    BackgroundColor(Option<String>),
    TextAlign(Option<String>),
    VerticalAlign(Option<String>),
    Padding(Option<String>),
    BorderColor(Option<String>),
    BorderWidth(Option<String>),
}

impl ColumnAttr {
    fn apply_to(&self, attrs: &mut CellAttrs) {
        match self {
            ColumnAttr::BackgroundColor(value) => attrs.background_color = value.clone(),
            ColumnAttr::TextAlign(value) => attrs.text_align = value.clone(),
            ColumnAttr::VerticalAlign(value) => attrs.vertical_align = value.clone(),
            ColumnAttr::Padding(value) => attrs.padding = value.clone(),
            ColumnAttr::BorderColor(value) => attrs.border_color = value.clone(),
            ColumnAttr::BorderWidth(value) => attrs.border_width = value.clone(),
        }
    }
}

/// Deep copy of the table at `table_path`, or `None` if the path does not
/// address a table.
fn materialize_table(
    doc: &Node,
    table_path: &NodePath,
    op: &'static str,
    observer: Observer<'_>,
) -> Option<(folio_schema::TableAttrs, Vec<Node>)> {
    match doc.node_at(table_path) {
        Some(Node::Table { attrs, content }) => Some((attrs.clone(), content.clone())),
        _ => {
            notify(observer, TransformEvent::Skipped {
                op,
                reason: "no table at path",
            });
            None
        }
    }
}

fn rebuild(table_path: &NodePath, attrs: folio_schema::TableAttrs, rows: Vec<Node>) -> Option<Splice> {
    Splice::replace_node(table_path, Node::table(attrs, rows))
}

/// Row 0 is a header row iff any of its cells is a `tableHeader`.
fn has_header_row(rows: &[Node]) -> bool {
    rows.first()
        .map(|row| {
            row.content()
                .iter()
                .any(|cell| matches!(cell, Node::TableHeader { .. }))
        })
        .unwrap_or(false)
}

fn cell_text(row: &Node, col_index: usize) -> Option<String> {
    row.content().get(col_index).map(Node::text_content)
}

/// Overwrite a cell's content with a single paragraph holding `text`,
/// leaving its attrs untouched.
fn set_cell_text(cell: &mut Node, text: &str) {
    if let Some(children) = cell.content_mut() {
        *children = vec![Node::paragraph_text(text)];
    }
}

/// Sort body rows by the text of the cell at `col_index`. The header row is
/// never reordered; the sort is stable, so equal keys keep their order.
/// Keys that both parse as numbers (group separators and `%` stripped)
/// compare numerically, everything else as case-folded strings.
pub fn sort_by_column(
    doc: &Node,
    table_path: &NodePath,
    col_index: usize,
    direction: SortDirection,
    observer: Observer<'_>,
) -> Option<Splice> {
    let (attrs, mut rows) = materialize_table(doc, table_path, "sortByColumn", observer)?;

    let body_start = if has_header_row(&rows) { 1 } else { 0 };
    let body = &mut rows[body_start..];
    let locale = Locale::en_us();

    body.sort_by(|a, b| {
        let key_a = cell_text(a, col_index).unwrap_or_default();
        let key_b = cell_text(b, col_index).unwrap_or_default();
        let ordering = compare_keys(&key_a, &key_b, &locale);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    let touched = rows.len() - body_start;
    notify(observer, TransformEvent::Applied {
        op: "sortByColumn",
        cells_touched: touched,
    });
    rebuild(table_path, attrs, rows)
}

fn compare_keys(a: &str, b: &str, locale: &Locale) -> Ordering {
    let num_a = parse_numeric(a, locale);
    let num_b = parse_numeric(b, locale);
    if let (Some(left), Some(right)) = (&num_a, &num_b) {
        return left
            .value
            .partial_cmp(&right.value)
            .unwrap_or(Ordering::Equal);
    }
    let folded = a.to_lowercase().cmp(&b.to_lowercase());
    folded.then_with(|| a.cmp(b))
}

/// Copy the text of the cell at `(row_index, col_index)` into every cell
/// below it in the same column. Target cell attrs are preserved; only
/// content is overwritten. Applying twice equals applying once.
pub fn fill_down(
    doc: &Node,
    table_path: &NodePath,
    row_index: usize,
    col_index: usize,
    observer: Observer<'_>,
) -> Option<Splice> {
    let (attrs, mut rows) = materialize_table(doc, table_path, "fillDown", observer)?;

    let Some(source) = rows.get(row_index).and_then(|row| cell_text(row, col_index)) else {
        notify(observer, TransformEvent::Skipped {
            op: "fillDown",
            reason: "no source cell",
        });
        return None;
    };

    let mut touched = 0;
    for row in rows.iter_mut().skip(row_index + 1) {
        if let Some(cell) = row.content_mut().and_then(|cells| cells.get_mut(col_index)) {
            set_cell_text(cell, &source);
            touched += 1;
        }
    }

    notify(observer, TransformEvent::Applied {
        op: "fillDown",
        cells_touched: touched,
    });
    rebuild(table_path, attrs, rows)
}

/// Copy the text of the cell at `(row_index, col_index)` into every cell to
/// its right within the same row.
pub fn fill_right(
    doc: &Node,
    table_path: &NodePath,
    row_index: usize,
    col_index: usize,
    observer: Observer<'_>,
) -> Option<Splice> {
    let (attrs, mut rows) = materialize_table(doc, table_path, "fillRight", observer)?;

    let Some(source) = rows.get(row_index).and_then(|row| cell_text(row, col_index)) else {
        notify(observer, TransformEvent::Skipped {
            op: "fillRight",
            reason: "no source cell",
        });
        return None;
    };

    let mut touched = 0;
    if let Some(cells) = rows[row_index].content_mut() {
        for cell in cells.iter_mut().skip(col_index + 1) {
            set_cell_text(cell, &source);
            touched += 1;
        }
    }

    notify(observer, TransformEvent::Applied {
        op: "fillRight",
        cells_touched: touched,
    });
    rebuild(table_path, attrs, rows)
}

/// Set one visual attribute on every cell of a column, across all rows.
/// Content and other attrs are untouched.
pub fn apply_column_attr(
    doc: &Node,
    table_path: &NodePath,
    col_index: usize,
    attr: &ColumnAttr,
    observer: Observer<'_>,
) -> Option<Splice> {
    let (attrs, mut rows) = materialize_table(doc, table_path, "applyColumnAttr", observer)?;

    let mut touched = 0;
    for row in rows.iter_mut() {
        let Some(cell) = row.content_mut().and_then(|cells| cells.get_mut(col_index)) else {
            continue;
        };
        match cell {
            Node::TableCell { attrs, .. } | Node::TableHeader { attrs, .. } => {
                attr.apply_to(attrs);
                touched += 1;
            }
            _ => {}
        }
    }

    notify(observer, TransformEvent::Applied {
        op: "applyColumnAttr",
        cells_touched: touched,
    });
    rebuild(table_path, attrs, rows)
}

/// Re-emit every numeric cell of a column through the locale formatter.
/// Cells whose text does not parse as a number are left unchanged.
///
/// Percent semantics: a trailing `%` in the source always means percentage
/// points; a bare value greater than 1 is also read as percentage points;
/// a bare value at or below 1 (including negatives) is a fraction.
pub fn format_column(
    doc: &Node,
    table_path: &NodePath,
    col_index: usize,
    kind: ColumnFormat,
    locale: &Locale,
    observer: Observer<'_>,
) -> Option<Splice> {
    let (attrs, mut rows) = materialize_table(doc, table_path, "formatColumn", observer)?;

    let mut touched = 0;
    for row in rows.iter_mut() {
        let Some(cell) = row.content_mut().and_then(|cells| cells.get_mut(col_index)) else {
            continue;
        };
        let Some(parsed) = parse_numeric(&cell.text_content(), locale) else {
            continue;
        };
        set_cell_text(cell, &format_value(parsed, kind, locale));
        touched += 1;
    }

    notify(observer, TransformEvent::Applied {
        op: "formatColumn",
        cells_touched: touched,
    });
    rebuild(table_path, attrs, rows)
}

fn format_value(parsed: ParsedNumber, kind: ColumnFormat, locale: &Locale) -> String {
    match kind {
        ColumnFormat::Number => format_number(parsed.value, locale),
        ColumnFormat::Currency => format_currency(parsed.value, locale),
        ColumnFormat::Percent => {
            let fraction = if parsed.percent || parsed.value > 1.0 {
                parsed.value / 100.0
            } else {
                parsed.value
            };
            format_percent(fraction, locale)
        }
    }
}

/// Rebuild a table's rows from a rectangular string matrix. Row and column
/// counts come from the matrix; missing cells become empty paragraphs; the
/// original table attrs are preserved. No-op for an empty or zero-column
/// matrix.
pub fn replace_with_matrix(
    doc: &Node,
    table_path: &NodePath,
    matrix: &[Vec<String>],
    observer: Observer<'_>,
) -> Option<Splice> {
    let width = matrix.iter().map(Vec::len).max().unwrap_or(0);
    if matrix.is_empty() || width == 0 {
        notify(observer, TransformEvent::Skipped {
            op: "replaceWithMatrix",
            reason: "empty matrix",
        });
        return None;
    }

    let (attrs, _) = materialize_table(doc, table_path, "replaceWithMatrix", observer)?;

    let rows: Vec<Node> = matrix
        .iter()
        .map(|row| {
            let cells: Vec<Node> = (0..width)
                .map(|col| {
                    let text = row.get(col).map(String::as_str).unwrap_or("");
                    Node::table_cell(CellAttrs::default(), vec![Node::paragraph_text(text)])
                })
                .collect();
            Node::table_row(cells)
        })
        .collect();

    notify(observer, TransformEvent::Applied {
        op: "replaceWithMatrix",
        cells_touched: matrix.len() * width,
    });
    rebuild(table_path, attrs, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_schema::{NodeKind, TableAttrs};
    use std::cell::RefCell;

    fn cell(text: &str) -> Node {
        Node::table_cell(CellAttrs::default(), vec![Node::paragraph_text(text)])
    }

    fn header(text: &str) -> Node {
        Node::table_header(CellAttrs::default(), vec![Node::paragraph_text(text)])
    }

    fn doc_with_table(rows: Vec<Node>) -> (Node, NodePath) {
        let doc = Node::doc(vec![
            Node::paragraph_text("intro"),
            Node::table(TableAttrs::default(), rows),
        ]);
        (doc, NodePath::new(vec![1]))
    }

    fn table_rows(doc: &Node, path: &NodePath) -> Vec<Vec<String>> {
        doc.node_at(path)
            .unwrap()
            .content()
            .iter()
            .map(|row| row.content().iter().map(Node::text_content).collect())
            .collect()
    }

    fn commit(doc: &Node, splice: Splice) -> Node {
        splice.apply(doc).unwrap()
    }

    #[test]
    fn test_sort_numeric_keeps_header_pinned() {
        let (doc, path) = doc_with_table(vec![
            Node::table_row(vec![header("Name"), header("Score")]),
            Node::table_row(vec![cell("b"), cell("2")]),
            Node::table_row(vec![cell("a"), cell("10")]),
            Node::table_row(vec![cell("a"), cell("1")]),
        ]);

        let splice = sort_by_column(&doc, &path, 1, SortDirection::Asc, None).unwrap();
        let sorted = commit(&doc, splice);

        assert_eq!(
            table_rows(&sorted, &path),
            vec![
                vec!["Name".to_string(), "Score".to_string()],
                vec!["a".to_string(), "1".to_string()],
                vec!["b".to_string(), "2".to_string()],
                vec!["a".to_string(), "10".to_string()],
            ]
        );
    }

    #[test]
    fn test_sort_is_stable_among_equal_keys() {
        let (doc, path) = doc_with_table(vec![
            Node::table_row(vec![cell("first"), cell("x")]),
            Node::table_row(vec![cell("second"), cell("x")]),
            Node::table_row(vec![cell("third"), cell("x")]),
        ]);

        let splice = sort_by_column(&doc, &path, 1, SortDirection::Asc, None).unwrap();
        let sorted = commit(&doc, splice);
        let names: Vec<String> = table_rows(&sorted, &path)
            .into_iter()
            .map(|row| row[0].clone())
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_sort_descending_strings() {
        let (doc, path) = doc_with_table(vec![
            Node::table_row(vec![cell("apple")]),
            Node::table_row(vec![cell("Cherry")]),
            Node::table_row(vec![cell("banana")]),
        ]);

        let splice = sort_by_column(&doc, &path, 0, SortDirection::Desc, None).unwrap();
        let sorted = commit(&doc, splice);
        let names: Vec<String> = table_rows(&sorted, &path)
            .into_iter()
            .map(|row| row[0].clone())
            .collect();
        assert_eq!(names, vec!["Cherry", "banana", "apple"]);
    }

    #[test]
    fn test_sort_on_non_table_path_is_none() {
        let (doc, _) = doc_with_table(vec![Node::table_row(vec![cell("a")])]);
        let paragraph_path = NodePath::new(vec![0]);
        assert!(sort_by_column(&doc, &paragraph_path, 0, SortDirection::Asc, None).is_none());
    }

    #[test]
    fn test_fill_down_and_idempotence() {
        let (doc, path) = doc_with_table(vec![
            Node::table_row(vec![cell("keep"), cell("template")]),
            Node::table_row(vec![cell("keep"), cell("old1")]),
            Node::table_row(vec![cell("keep"), cell("old2")]),
        ]);

        let once = commit(&doc, fill_down(&doc, &path, 0, 1, None).unwrap());
        let twice = commit(&once, fill_down(&once, &path, 0, 1, None).unwrap());

        assert_eq!(once, twice);
        assert_eq!(
            table_rows(&once, &path),
            vec![
                vec!["keep".to_string(), "template".to_string()],
                vec!["keep".to_string(), "template".to_string()],
                vec!["keep".to_string(), "template".to_string()],
            ]
        );
    }

    #[test]
    fn test_fill_down_preserves_target_attrs() {
        let styled = Node::table_cell(
            CellAttrs {
                background_color: Some("#eee".to_string()),
                ..Default::default()
            },
            vec![Node::paragraph_text("old")],
        );
        let (doc, path) = doc_with_table(vec![
            Node::table_row(vec![cell("new")]),
            Node::table_row(vec![styled]),
        ]);

        let filled = commit(&doc, fill_down(&doc, &path, 0, 0, None).unwrap());
        match &filled.node_at(&path).unwrap().content()[1].content()[0] {
            Node::TableCell { attrs, content } => {
                assert_eq!(attrs.background_color.as_deref(), Some("#eee"));
                assert_eq!(content[0].text_content(), "new");
            }
            _ => panic!("expected tableCell"),
        }
    }

    #[test]
    fn test_fill_right() {
        let (doc, path) = doc_with_table(vec![Node::table_row(vec![
            cell("a"),
            cell("src"),
            cell("x"),
            cell("y"),
        ])]);

        let filled = commit(&doc, fill_right(&doc, &path, 0, 1, None).unwrap());
        assert_eq!(
            table_rows(&filled, &path)[0],
            vec!["a", "src", "src", "src"]
        );
    }

    #[test]
    fn test_fill_down_missing_source_is_none() {
        let (doc, path) = doc_with_table(vec![Node::table_row(vec![cell("a")])]);
        assert!(fill_down(&doc, &path, 5, 0, None).is_none());
        assert!(fill_down(&doc, &path, 0, 5, None).is_none());
    }

    #[test]
    fn test_apply_column_attr_touches_all_rows() {
        let (doc, path) = doc_with_table(vec![
            Node::table_row(vec![header("H1"), header("H2")]),
            Node::table_row(vec![cell("a"), cell("b")]),
        ]);

        let attr = ColumnAttr::TextAlign(Some("right".to_string()));
        let updated = commit(&doc, apply_column_attr(&doc, &path, 1, &attr, None).unwrap());

        for row in updated.node_at(&path).unwrap().content() {
            match &row.content()[1] {
                Node::TableCell { attrs, .. } | Node::TableHeader { attrs, .. } => {
                    assert_eq!(attrs.text_align.as_deref(), Some("right"));
                }
                _ => panic!("expected cell"),
            }
            // Other column untouched.
            match &row.content()[0] {
                Node::TableCell { attrs, .. } | Node::TableHeader { attrs, .. } => {
                    assert!(attrs.text_align.is_none());
                }
                _ => panic!("expected cell"),
            }
        }
    }

    #[test]
    fn test_format_column_percent_tolerance() {
        let (doc, path) = doc_with_table(vec![
            Node::table_row(vec![cell("1,200")]),
            Node::table_row(vec![cell("abc")]),
            Node::table_row(vec![cell("3.5%")]),
        ]);

        let locale = Locale::en_us();
        let splice =
            format_column(&doc, &path, 0, ColumnFormat::Percent, &locale, None).unwrap();
        let formatted = commit(&doc, splice);
        let rows = table_rows(&formatted, &path);

        // 1200 > 1 → percentage points; "abc" untouched; 3.5% stays 3.5%.
        assert_eq!(rows[0][0], "1,200%");
        assert_eq!(rows[1][0], "abc");
        assert_eq!(rows[2][0], "3.5%");
    }

    #[test]
    fn test_format_column_percent_fraction_and_boundary() {
        let (doc, path) = doc_with_table(vec![
            Node::table_row(vec![cell("0.5")]),
            Node::table_row(vec![cell("1")]),
            Node::table_row(vec![cell("-0.5")]),
        ]);

        let locale = Locale::en_us();
        let splice =
            format_column(&doc, &path, 0, ColumnFormat::Percent, &locale, None).unwrap();
        let rows = table_rows(&commit(&doc, splice), &path);

        assert_eq!(rows[0][0], "50%");
        assert_eq!(rows[1][0], "100%");
        assert_eq!(rows[2][0], "-50%");
    }

    #[test]
    fn test_format_column_currency() {
        let (doc, path) = doc_with_table(vec![
            Node::table_row(vec![cell("150")]),
            Node::table_row(vec![cell("200")]),
        ]);

        let locale = Locale::en_us();
        let splice =
            format_column(&doc, &path, 0, ColumnFormat::Currency, &locale, None).unwrap();
        let rows = table_rows(&commit(&doc, splice), &path);

        assert_eq!(rows[0][0], "$150.00");
        assert_eq!(rows[1][0], "$200.00");
    }

    #[test]
    fn test_format_column_number_regroups() {
        let (doc, path) = doc_with_table(vec![Node::table_row(vec![cell("1234567.8")])]);

        let locale = Locale::en_us();
        let splice = format_column(&doc, &path, 0, ColumnFormat::Number, &locale, None).unwrap();
        let rows = table_rows(&commit(&doc, splice), &path);
        assert_eq!(rows[0][0], "1,234,567.8");
    }

    #[test]
    fn test_replace_with_matrix_preserves_table_attrs() {
        let doc = Node::doc(vec![Node::table(
            TableAttrs {
                zebra: true,
                caption: Some("stats".to_string()),
                ..Default::default()
            },
            vec![Node::table_row(vec![cell("old")])],
        )]);
        let path = NodePath::new(vec![0]);

        let matrix = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string()],
        ];
        let replaced = commit(&doc, replace_with_matrix(&doc, &path, &matrix, None).unwrap());

        let table = replaced.node_at(&path).unwrap();
        match table {
            Node::Table { attrs, content } => {
                assert!(attrs.zebra);
                assert_eq!(attrs.caption.as_deref(), Some("stats"));
                assert_eq!(content.len(), 2);
                // Short row padded to matrix width.
                assert_eq!(content[1].content().len(), 2);
                assert_eq!(content[1].content()[1].text_content(), "");
            }
            _ => panic!("expected table"),
        }
        assert_eq!(table.kind(), NodeKind::Table);
    }

    #[test]
    fn test_replace_with_empty_matrix_is_none() {
        let (doc, path) = doc_with_table(vec![Node::table_row(vec![cell("x")])]);
        assert!(replace_with_matrix(&doc, &path, &[], None).is_none());
        assert!(replace_with_matrix(&doc, &path, &[vec![], vec![]], None).is_none());
    }

    #[test]
    fn test_observer_sees_applied_and_skipped() {
        let (doc, path) = doc_with_table(vec![
            Node::table_row(vec![cell("a")]),
            Node::table_row(vec![cell("b")]),
        ]);

        let events: RefCell<Vec<TransformEvent>> = RefCell::new(Vec::new());
        let sink = |event: &TransformEvent| events.borrow_mut().push(event.clone());

        fill_down(&doc, &path, 0, 0, Some(&sink));
        replace_with_matrix(&doc, &path, &[], Some(&sink));

        let events = events.into_inner();
        assert_eq!(
            events[0],
            TransformEvent::Applied {
                op: "fillDown",
                cells_touched: 1
            }
        );
        assert_eq!(
            events[1],
            TransformEvent::Skipped {
                op: "replaceWithMatrix",
                reason: "empty matrix"
            }
        );
    }
}
