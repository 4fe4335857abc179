//! # Folio Codec
//!
//! Bidirectional conversion between rectangular string matrices and
//! delimited text (CSV/TSV), used by table import/export and paste handling.
//!
//! Parsing is best-effort: malformed input degrades to whatever fields can
//! be read, never an error. Serialization quotes only when a field contains
//! the delimiter, a quote, or a newline, and round-trips through
//! [`parse_delimited`] modulo ragged-row padding.

mod delimited;

pub use delimited::{detect_delimiter, looks_tabular, parse_delimited, serialize_csv};
