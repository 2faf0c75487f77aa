use std::net::SocketAddr;

use nomad_blinkt_metrics::{Client, Config, Error, Resource, TlsConfig};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    task::JoinHandle,
};

const SUMMARY: &str = r#"{
    "Timestamp": "2023-05-01 10:00:00 +0000 UTC",
    "Gauges": [
        {"Name": "nomad.client.allocations.running", "Value": 3, "Labels": {"node_id": "a"}},
        {"Name": "nomad.client.allocated.memory", "Value": 1024, "Labels": {}},
        {"Name": "nomad.client.unallocated.memory", "Value": 3072, "Labels": {}}
    ],
    "Points": null,
    "Counters": [],
    "Samples": []
}"#;

/// Serves a single canned HTTP response and returns the request head it received.
async fn serve_once(status: &'static str, body: &'static str) -> (SocketAddr, JoinHandle<String>) {
    let _ = env_logger::try_init();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0_u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = stream.read(&mut buf).await.unwrap();
            assert!(read > 0, "connection closed before the request head");
            request.extend_from_slice(&buf[..read]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
        String::from_utf8(request).unwrap()
    });
    (address, handle)
}

fn local_client(address: SocketAddr) -> Client {
    Client::new(Config {
        address: format!("http://{address}"),
        ..Config::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_metrics() {
    let (address, server) = serve_once("200 OK", SUMMARY).await;

    let summary = local_client(address).metrics().await.unwrap();
    assert_eq!(summary.gauges.len(), 3);
    assert!(summary.points.is_empty());
    assert_eq!(summary.gauges[0].labels["node_id"], "a");

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /v1/metrics HTTP/1.1\r\n"));
}

#[tokio::test]
async fn test_fetch_utilization() {
    let (address, _server) = serve_once("200 OK", SUMMARY).await;
    let client = local_client(address);
    let fraction = client.utilization(Resource::Memory, 8).await.unwrap();
    assert!((fraction - 0.25).abs() < f64::EPSILON);

    let (address, _server) = serve_once("200 OK", SUMMARY).await;
    let client = local_client(address);
    let fraction = client.utilization(Resource::Allocations, 4).await.unwrap();
    assert!((fraction - 0.75).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_unexpected_status() {
    let (address, _server) = serve_once("403 Forbidden", "Permission denied\n").await;

    let err = local_client(address).metrics().await.unwrap_err();
    assert!(matches!(
        &err,
        Error::UnexpectedStatus { code: 403, body } if body == "Permission denied"
    ));
    assert_eq!(
        err.to_string(),
        "Unexpected response code 403: Permission denied"
    );
}

#[tokio::test]
async fn test_malformed_body() {
    let (address, _server) = serve_once("200 OK", "not json").await;

    let err = local_client(address).metrics().await.unwrap_err();
    assert!(matches!(err, Error::Request(_)));
}

#[tokio::test]
async fn test_connection_refused() {
    // Bind and drop the listener to get a local port nobody listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let err = local_client(address).metrics().await.unwrap_err();
    assert!(matches!(err, Error::Request(_)));
}

#[test]
fn test_invalid_address() {
    let err = Client::new(Config {
        address: "not a url".to_owned(),
        ..Config::default()
    })
    .unwrap_err();
    assert!(matches!(&err, Error::InvalidAddress { address, .. } if address == "not a url"));
    assert!(err.to_string().starts_with("Invalid address 'not a url'"));
}

#[test]
fn test_incomplete_client_identity() {
    for tls in [
        TlsConfig {
            client_cert: Some("client.pem".to_owned()),
            ..TlsConfig::default()
        },
        TlsConfig {
            client_key: Some("client-key.pem".to_owned()),
            ..TlsConfig::default()
        },
    ] {
        let err = Client::new(Config {
            tls,
            ..Config::default()
        })
        .unwrap_err();
        assert!(matches!(err, Error::IncompleteClientIdentity));
        assert_eq!(err.to_string(), "Client cert and client key must be provided");
    }
}

#[test]
fn test_missing_ca_cert() {
    let err = Client::new(Config {
        tls: TlsConfig {
            ca_cert: Some("/nonexistent/ca.pem".to_owned()),
            ..TlsConfig::default()
        },
        ..Config::default()
    })
    .unwrap_err();
    assert!(matches!(&err, Error::TlsFile { path, .. } if path == "/nonexistent/ca.pem"));
}

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn tls_client(tls: TlsConfig) -> Result<Client, Error> {
    Client::new(Config {
        address: "https://127.0.0.1:4646".to_owned(),
        tls,
    })
}

#[test]
fn test_ca_cert_file() {
    tls_client(TlsConfig {
        ca_cert: Some(fixture("ca.pem")),
        ..TlsConfig::default()
    })
    .unwrap();
}

#[test]
fn test_ca_cert_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(fixture("ca.pem"), dir.path().join("ca.pem")).unwrap();
    std::fs::copy(fixture("ca.pem"), dir.path().join("bundle.crt")).unwrap();
    // Not a certificate file, skipped by the extension filter.
    std::fs::create_dir(dir.path().join("archive.bak")).unwrap();
    std::fs::write(dir.path().join("README"), "CA bundle for the Nomad agents").unwrap();

    tls_client(TlsConfig {
        ca_cert: Some(dir.path().display().to_string()),
        ..TlsConfig::default()
    })
    .unwrap();
}

#[test]
fn test_client_identity() {
    tls_client(TlsConfig {
        ca_cert: Some(fixture("ca.pem")),
        client_cert: Some(fixture("client.pem")),
        client_key: Some(fixture("client-key.pem")),
        insecure: false,
    })
    .unwrap();
}

#[test]
fn test_missing_client_key() {
    let key = fixture("missing-key.pem");
    let err = tls_client(TlsConfig {
        client_cert: Some(fixture("client.pem")),
        client_key: Some(key.clone()),
        ..TlsConfig::default()
    })
    .unwrap_err();
    assert!(matches!(&err, Error::TlsFile { path, .. } if *path == key));
}
