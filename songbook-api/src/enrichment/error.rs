use thiserror::Error;

/// Enrichment client errors
///
/// Only server errors are retried; every other failure aborts the lookup on
/// the spot.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// Request never produced an HTTP response
    #[error("Transport error reaching metadata source: {0}")]
    Transport(String),

    /// Source rejected the group/song pair (HTTP 400)
    #[error("Metadata source rejected the request: {0}")]
    InvalidInput(String),

    /// Every attempt ended in a server error
    #[error("Metadata source unavailable after {attempts} attempts")]
    UpstreamUnavailable { attempts: u32 },

    /// Unsupported status or an unusable success body
    #[error("Unexpected response from metadata source (status {status}): {detail}")]
    UnexpectedResponse { status: u16, detail: String },
}
