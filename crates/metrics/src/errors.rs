use displaydoc::Display;

/// A specialized result type for the metrics client.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur when fetching and interpreting the node metrics.
#[derive(Debug, Display)]
pub enum Error {
    /// Invalid address '{address}': {source}
    InvalidAddress {
        address: String,
        source: url::ParseError,
    },
    /// Client cert and client key must be provided
    IncompleteClientIdentity,
    /// Unable to read TLS file {path}: {source}
    TlsFile {
        path: String,
        source: std::io::Error,
    },
    /// Invalid TLS configuration: {0}
    Tls(reqwest::Error),
    /// Metrics request failed: {0}
    Request(reqwest::Error),
    /// Unexpected response code {code}: {body}
    UnexpectedStatus { code: u16, body: String },
    /// Gauge "{0}" is not reported by the node
    MissingGauge(String),
    /// The node reports zero {0} capacity
    ZeroCapacity(crate::Resource),
    /// The maximum allowed number of allocations must be greater than zero
    ZeroMaxAllocations,
    /// Unknown resource "{0}", expected one of: allocations, cpu, memory, disk
    UnknownResource(String),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidAddress { source, .. } => Some(source),
            Self::TlsFile { source, .. } => Some(source),
            Self::Tls(err) | Self::Request(err) => Some(err),
            _ => None,
        }
    }
}
