//! Document chunking for ingestion.

use text_splitter::{ChunkConfig, MarkdownSplitter, TextSplitter};

use umami_types::error::IngestError;

/// Maximum characters per chunk.
pub const CHUNK_SIZE: usize = 1000;
/// Characters shared between neighbouring chunks.
pub const CHUNK_OVERLAP: usize = 200;

fn chunk_config() -> Result<ChunkConfig<text_splitter::Characters>, IngestError> {
    ChunkConfig::new(CHUNK_SIZE)
        .with_overlap(CHUNK_OVERLAP)
        .map_err(|e| IngestError::Chunking(e.to_string()))
}

/// Split a document into overlapping chunks. Markdown documents split on
/// heading and block boundaries first.
pub fn chunk_document(text: &str, is_markdown: bool) -> Result<Vec<String>, IngestError> {
    let config = chunk_config()?;
    let chunks: Vec<String> = if is_markdown {
        MarkdownSplitter::new(config)
            .chunks(text)
            .map(str::to_string)
            .collect()
    } else {
        TextSplitter::new(config)
            .chunks(text)
            .map(str::to_string)
            .collect()
    };
    Ok(chunks.into_iter().filter(|c| !c.trim().is_empty()).collect())
}
