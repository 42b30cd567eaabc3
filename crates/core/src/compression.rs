//! zstd codec for snippet code bodies stored as `bytea`.

/// Compression level used for stored code. Snippets are small, so the default
/// level is already close to the best ratio.
const LEVEL: i32 = zstd::DEFAULT_COMPRESSION_LEVEL;

#[derive(Debug, thiserror::Error)]
pub enum CompressionError {
    #[error("zstd compression failed: {0}")]
    Compress(#[source] std::io::Error),

    #[error("zstd decompression failed: {0}")]
    Decompress(#[source] std::io::Error),

    #[error("decompressed code is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Compress a code body for storage.
pub fn compress_code(code: &str) -> Result<Vec<u8>, CompressionError> {
    zstd::encode_all(code.as_bytes(), LEVEL).map_err(CompressionError::Compress)
}

/// Decompress a stored code body back into text.
pub fn decompress_code(stored: &[u8]) -> Result<String, CompressionError> {
    let bytes = zstd::decode_all(stored).map_err(CompressionError::Decompress)?;
    Ok(String::from_utf8(bytes)?)
}
