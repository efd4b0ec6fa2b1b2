// Brotli helpers shared by the file store and HTTP responses
use async_compression::tokio::bufread::{BrotliDecoder, BrotliEncoder};
use tokio::io::AsyncReadExt;

pub async fn brotli_compress(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = BrotliEncoder::new(bytes);
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed).await?;

    tracing::debug!(
        "Compressed: {} → {} bytes ({:.1}% reduction)",
        bytes.len(),
        compressed.len(),
        (1.0 - compressed.len() as f64 / bytes.len().max(1) as f64) * 100.0
    );
    Ok(compressed)
}

pub async fn brotli_decompress(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoder = BrotliDecoder::new(bytes);
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed).await?;
    Ok(decompressed)
}
