//! XML support: entity escaping and the owned element tree the writers
//! build and the rewriter mutates.

pub mod escape;
pub mod tree;

pub use escape::{escape_xml, unescape_xml};
pub use tree::{XmlElement, XmlNode, serialize_document};
