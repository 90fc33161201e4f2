//! Restaurant records as stored in the restaurants JSON file.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// A restaurant the assistant can answer questions about.
///
/// `filename` names the source document (menu, FAQ) that gets ingested
/// into the restaurant's vector index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub filename: String,
}

impl Restaurant {
    /// Name of the vector index table holding this restaurant's chunks.
    pub fn chunk_table_name(&self) -> String {
        chunk_table_name(&self.id)
    }
}

/// Table name for a restaurant id.
///
/// ASCII letters, digits and `-` are kept. Every other byte of the id's
/// UTF-8 encoding, `_` included, becomes `_` followed by two lowercase hex
/// digits, so distinct ids always map to distinct tables.
pub fn chunk_table_name(restaurant_id: &str) -> String {
    let mut name = String::from("restaurant_chunks_");
    for byte in restaurant_id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            name.push(char::from(byte));
        } else {
            let _ = write!(name, "_{byte:02x}");
        }
    }
    name
}
