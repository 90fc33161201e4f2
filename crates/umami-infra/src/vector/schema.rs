//! Arrow schema for the per-restaurant chunk tables.
//!
//! Arrow versions MUST match lancedb's transitive dependency (57.3 for lancedb 0.26).

use std::sync::Arc;

use arrow_schema::{DataType, Field, Schema};

/// Element field of the `vector` column.
pub fn vector_item_field() -> Arc<Field> {
    Arc::new(Field::new("item", DataType::Float32, true))
}

/// Schema for `restaurant_chunks_{id}` tables.
///
/// One row per document chunk, with a `dimension`-wide float32 embedding.
pub fn restaurant_chunks_schema(dimension: i32) -> Schema {
    Schema::new(vec![
        Field::new("chunk_id", DataType::Utf8, false),
        Field::new("restaurant_id", DataType::Utf8, false),
        Field::new("chunk_index", DataType::Int32, false),
        Field::new("chunk_text", DataType::Utf8, false),
        Field::new("embedding_model", DataType::Utf8, false),
        Field::new("ingested_at", DataType::Utf8, false),
        Field::new(
            "vector",
            DataType::FixedSizeList(vector_item_field(), dimension),
            false,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restaurant_chunks_schema_fields() {
        let schema = restaurant_chunks_schema(1536);
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(
            names,
            vec![
                "chunk_id",
                "restaurant_id",
                "chunk_index",
                "chunk_text",
                "embedding_model",
                "ingested_at",
                "vector"
            ]
        );

        let vector = schema.field_with_name("vector").unwrap();
        match vector.data_type() {
            DataType::FixedSizeList(item, size) => {
                assert_eq!(*size, 1536);
                assert_eq!(item.data_type(), &DataType::Float32);
            }
            other => panic!("unexpected vector type: {other:?}"),
        }
    }
}
