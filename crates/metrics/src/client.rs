use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use reqwest::{tls, Certificate, Identity, StatusCode};
use url::Url;

use crate::{Error, MetricsSummary, Resource, Result};

/// Address of the local Nomad agent.
pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:4646";
/// Path of the metrics endpoint.
const METRICS_PATH: &str = "/v1/metrics";
/// Maximum time to establish a connection, the TLS handshake included.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// TLS options of the metrics client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsConfig {
    /// Path to a PEM encoded CA certificate file or a directory of them.
    pub ca_cert: Option<String>,
    /// Path to a PEM encoded client certificate.
    pub client_cert: Option<String>,
    /// Path to a PEM encoded client certificate key.
    pub client_key: Option<String>,
    /// Disables the server certificate verification.
    pub insecure: bool,
}

/// Metrics client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address of the Nomad agent, like `https://10.0.0.1:4646`.
    pub address: String,
    pub tls: TlsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_owned(),
            tls: TlsConfig::default(),
        }
    }
}

impl Config {
    /// Creates a configuration from the standard `NOMAD_*` environment variables.
    ///
    /// Unset variables keep their default values, an unparsable `NOMAD_SKIP_VERIFY`
    /// is ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|name| env::var(name).ok().filter(|value| !value.is_empty()))
    }

    /// Creates a configuration from the `NOMAD_*` variables returned by the given lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(address) = var("NOMAD_ADDR") {
            config.address = address;
        }
        config.tls.ca_cert = var("NOMAD_CACERT");
        config.tls.client_cert = var("NOMAD_CLIENT_CERT");
        config.tls.client_key = var("NOMAD_CLIENT_KEY");
        if let Some(insecure) = var("NOMAD_SKIP_VERIFY").as_deref().and_then(parse_bool) {
            config.tls.insecure = insecure;
        }
        config
    }
}

/// Parses the boolean spellings accepted by the Nomad command line tools.
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// Nomad agent metrics client.
#[derive(Debug, Clone)]
pub struct Client {
    metrics_url: Url,
    http: reqwest::Client,
}

impl Client {
    /// Creates a new client with the given configuration.
    ///
    /// Certificates are loaded eagerly, so missing or malformed files are reported here.
    pub fn new(config: Config) -> Result<Self> {
        let base = Url::parse(&config.address).map_err(|source| Error::InvalidAddress {
            address: config.address.clone(),
            source,
        })?;
        let metrics_url = base
            .join(METRICS_PATH)
            .map_err(|source| Error::InvalidAddress {
                address: config.address.clone(),
                source,
            })?;

        let http = http_client(&config.tls)?;
        log::debug!("Created metrics client for {metrics_url}");
        Ok(Self { metrics_url, http })
    }

    /// Returns the metrics endpoint URL.
    #[must_use]
    pub fn metrics_url(&self) -> &Url {
        &self.metrics_url
    }

    /// Fetches the current metrics summary.
    pub async fn metrics(&self) -> Result<MetricsSummary> {
        log::trace!("Requesting {}", self.metrics_url);

        let response = self
            .http
            .get(self.metrics_url.clone())
            .send()
            .await
            .map_err(Error::Request)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::UnexpectedStatus {
                code: status.as_u16(),
                body: body.trim().to_owned(),
            });
        }

        response.json().await.map_err(Error::Request)
    }

    /// Fetches the metrics and computes the utilization fraction of the given resource.
    pub async fn utilization(&self, resource: Resource, max_allocations: u32) -> Result<f64> {
        self.metrics()
            .await?
            .utilization(resource, max_allocations)
    }
}

fn http_client(tls: &TlsConfig) -> Result<reqwest::Client> {
    // Check the identity pair before touching the file system.
    let identity = match (&tls.client_cert, &tls.client_key) {
        (Some(cert), Some(key)) => Some(load_identity(cert, key)?),
        (None, None) => None,
        _ => return Err(Error::IncompleteClientIdentity),
    };

    let mut builder = reqwest::Client::builder()
        .use_rustls_tls()
        .min_tls_version(tls::Version::TLS_1_2)
        .connect_timeout(CONNECT_TIMEOUT)
        .danger_accept_invalid_certs(tls.insecure);

    if let Some(ca_cert) = &tls.ca_cert {
        for certificate in load_certificates(Path::new(ca_cert))? {
            builder = builder.add_root_certificate(certificate);
        }
    }
    if let Some(identity) = identity {
        builder = builder.identity(identity);
    }
    if tls.insecure {
        log::warn!("Server certificate verification is disabled");
    }

    builder.build().map_err(Error::Tls)
}

fn read_tls_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::TlsFile {
        path: path.display().to_string(),
        source,
    })
}

fn load_identity(cert: &str, key: &str) -> Result<Identity> {
    let mut pem = read_tls_file(Path::new(cert))?;
    pem.push(b'\n');
    pem.extend(read_tls_file(Path::new(key))?);
    Identity::from_pem(&pem).map_err(Error::Tls)
}

/// Loads a single certificate file or every `.pem` and `.crt` file in a directory.
fn load_certificates(path: &Path) -> Result<Vec<Certificate>> {
    certificate_files(path)?
        .iter()
        .map(|file| {
            log::debug!("Loading CA certificate {}", file.display());
            Certificate::from_pem(&read_tls_file(file)?).map_err(Error::Tls)
        })
        .collect()
}

/// Lists the certificate files in the given directory in name order, or returns the
/// path itself if it is not a directory.
fn certificate_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_owned()]);
    }

    let io_error = |source| Error::TlsFile {
        path: path.display().to_string(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(path).map_err(io_error)? {
        let file = entry.map_err(io_error)?.path();
        let is_certificate = file
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext == "pem" || ext == "crt");
        if is_certificate && file.is_file() {
            files.push(file);
        }
    }
    files.sort();
    Ok(files)
}
