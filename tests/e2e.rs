//! End-to-end tests: a real listener on a loopback port, driven with
//! `reqwest`.
//!
//! Run with:
//!   cargo test --test e2e -- --nocapture

use sii_converter::adapt_plugins::resources::{
    DDI_DATA_FILE, ISO_UNIT_OF_MEASURE_FILE, REPRESENTATION_SYSTEM_FILE, UNIT_SYSTEM_FILE,
};
use sii_converter::{serve_on, AppContext, Plugins, ServiceConfig};
use std::io::{Cursor, Read};
use std::net::SocketAddr;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const ISO: &str = "application/vnd.aggateway.adapt.iso+zip";
const ADM: &str = "application/vnd.aggateway.adapt.adm+zip";
const PAYLOAD: &str = r#"{"id":"abc123","description":"Hybrid-Corn","quantity":{"content":5,"unitCode":"bag"}}"#;

// ── Test helpers ─────────────────────────────────────────────────────────────

struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
    work: TempDir,
    _resources: TempDir,
}

impl TestServer {
    async fn start(function_key: Option<&str>) -> Self {
        let resources = tempfile::tempdir().unwrap();
        for name in [
            UNIT_SYSTEM_FILE,
            REPRESENTATION_SYSTEM_FILE,
            DDI_DATA_FILE,
            ISO_UNIT_OF_MEASURE_FILE,
        ] {
            std::fs::write(resources.path().join(name), b"").unwrap();
        }
        let work = tempfile::tempdir().unwrap();

        let mut builder = ServiceConfig::builder()
            .resources_dir(resources.path())
            .work_root(work.path());
        if let Some(key) = function_key {
            builder = builder.function_key(key);
        }
        let config = builder.build().unwrap();
        let plugins = Plugins::from_config(&config).unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            serve_on(listener, AppContext::new(config, plugins), async {
                let _ = rx.await;
            })
            .await
            .unwrap();
        });

        Self {
            addr,
            shutdown: Some(tx),
            handle,
            work,
            _resources: resources,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn post(&self, path: &str, content_type: &str, payload: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(self.url(path))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(serde_json::to_vec(payload).unwrap())
            .send()
            .await
            .unwrap()
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        (&mut self.handle).await.unwrap();
    }
}

fn read_entry(zip: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(zip)).unwrap();
    let mut text = String::new();
    archive
        .by_name(name)
        .unwrap_or_else(|e| panic!("missing {name}: {e}"))
        .read_to_string(&mut text)
        .unwrap();
    text
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_probe_answers() {
    let server = TestServer::start(None).await;
    let response = reqwest::get(server.url("/api/health")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "ok");
    server.stop().await;
}

#[tokio::test]
async fn native_round_trip() {
    let server = TestServer::start(None).await;
    let response = server.post("/api/Converter", "application/json", PAYLOAD).await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), PAYLOAD);
    server.stop().await;
}

#[tokio::test]
async fn iso_package_over_http() {
    let server = TestServer::start(None).await;
    let response = server.post("/api/Converter", ISO, PAYLOAD).await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()[reqwest::header::CONTENT_TYPE],
        "application/octet-stream"
    );
    let zip = response.bytes().await.unwrap();
    let xml = read_entry(&zip, "TASKDATA/TASKDATA.XML");
    assert!(xml.contains("ISO11783_TaskData"), "{xml}");
    assert!(xml.contains("B=\"Hybrid-Corn\""), "{xml}");
    assert!(xml.contains("E=\"bag\""), "{xml}");
    assert!(xml.contains("D=\"VPN1\" F=\"1\" G=\"5\""), "{xml}");
    server.stop().await;
}

#[tokio::test]
async fn adm_package_over_http() {
    let server = TestServer::start(None).await;
    let response = server.post("/api/Converter", ADM, PAYLOAD).await;
    assert_eq!(response.status(), 200);
    let zip = response.bytes().await.unwrap();
    let catalog: serde_json::Value =
        serde_json::from_str(&read_entry(&zip, "adm/Catalog.adm")).unwrap();
    assert_eq!(catalog["Products"][0]["Id"], "abc123");
    read_entry(&zip, "adm/Documents/abc123.adm");
    server.stop().await;
}

#[tokio::test]
async fn batches_are_rejected() {
    let server = TestServer::start(None).await;
    let response = server
        .post("/api/Converter", ISO, r#"[{"id":"a"},{"id":"b"}]"#)
        .await;
    assert_eq!(response.status(), 400);
    server.stop().await;
}

#[tokio::test]
async fn function_key_gate() {
    let server = TestServer::start(Some("s3cret")).await;
    let denied = server.post("/api/Converter", "text/plain", PAYLOAD).await;
    assert_eq!(denied.status(), 401);
    let allowed = server
        .post("/api/Converter?code=s3cret", "text/plain", PAYLOAD)
        .await;
    assert_eq!(allowed.status(), 200);
    server.stop().await;
}

#[tokio::test]
async fn concurrent_requests_leave_no_workspaces() {
    let server = TestServer::start(None).await;
    let responses = convert_concurrently(&server, 6).await;
    for (i, zip) in responses.into_iter().enumerate() {
        let xml = read_entry(&zip, "TASKDATA/TASKDATA.XML");
        assert!(xml.contains(&format!("doc{i}")), "{xml}");
    }
    assert_eq!(std::fs::read_dir(server.work.path()).unwrap().count(), 0);
    server.stop().await;
}

async fn convert_concurrently(server: &TestServer, n: usize) -> Vec<Vec<u8>> {
    let client = reqwest::Client::new();
    let tasks: Vec<_> = (0..n)
        .map(|i| {
            let client = client.clone();
            let url = server.url("/api/Converter");
            tokio::spawn(async move {
                let payload = format!(r#"{{"id":"doc{i}"}}"#);
                let response = client
                    .post(url)
                    .header(reqwest::header::CONTENT_TYPE, ISO)
                    .body(serde_json::to_vec(&payload).unwrap())
                    .send()
                    .await
                    .unwrap();
                assert_eq!(response.status(), 200);
                response.bytes().await.unwrap().to_vec()
            })
        })
        .collect();

    let mut out = Vec::with_capacity(n);
    for task in tasks {
        out.push(task.await.unwrap());
    }
    out
}
