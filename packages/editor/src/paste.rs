//! Clipboard paste contract: tabular-looking text dropped inside a table
//! replaces the table's content through the delimited codec.

use crate::locator::find_enclosing;
use crate::splice::Splice;
use crate::transforms::{replace_with_matrix, Observer};
use folio_codec::{looks_tabular, parse_delimited};
use folio_schema::{Node, NodeKind, Position};

/// If `text` looks tabular (a delimiter plus more than one line) and the
/// cursor is inside a table, parse it and rebuild that table from the
/// matrix. `None` otherwise — plain pastes are not this module's business.
pub fn paste_tabular(
    doc: &Node,
    position: &Position,
    text: &str,
    observer: Observer<'_>,
) -> Option<Splice> {
    if !looks_tabular(text) {
        return None;
    }
    let table = find_enclosing(doc, position, NodeKind::Table)?;
    let matrix = parse_delimited(text);
    replace_with_matrix(doc, &table.path, &matrix, observer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_schema::{CellAttrs, NodePath, TableAttrs};

    fn doc_with_table() -> Node {
        Node::doc(vec![
            Node::paragraph_text("intro"),
            Node::table(
                TableAttrs::default(),
                vec![Node::table_row(vec![Node::table_cell(
                    CellAttrs::default(),
                    vec![Node::paragraph_text("old")],
                )])],
            ),
        ])
    }

    #[test]
    fn test_tabular_paste_inside_table_replaces_content() {
        let doc = doc_with_table();
        let cursor = Position::at(vec![1, 0, 0, 0, 0]);

        let splice = paste_tabular(&doc, &cursor, "a\tb\nc\td", None).unwrap();
        let new_doc = splice.apply(&doc).unwrap();

        let table = new_doc.node_at(&NodePath::new(vec![1])).unwrap();
        assert_eq!(table.content().len(), 2);
        assert_eq!(table.content()[0].content()[1].text_content(), "b");
    }

    #[test]
    fn test_plain_text_paste_is_none() {
        let doc = doc_with_table();
        let cursor = Position::at(vec![1, 0, 0, 0, 0]);
        assert!(paste_tabular(&doc, &cursor, "just a sentence", None).is_none());
    }

    #[test]
    fn test_tabular_paste_outside_table_is_none() {
        let doc = doc_with_table();
        let cursor = Position::at(vec![0, 0]);
        assert!(paste_tabular(&doc, &cursor, "a,b\nc,d", None).is_none());
    }
}
