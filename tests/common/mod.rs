//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use commute_api::config::CommuteConfig;
use commute_api::history::SearchHistory;
use commute_api::lifecycle::{build_state, Shutdown};
use commute_api::HttpServer;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Request head (request line plus headers) as received by a mock backend.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub head: String,
}

impl SeenRequest {
    /// Path and query of the request line.
    pub fn target(&self) -> &str {
        self.head
            .lines()
            .next()
            .and_then(|line| line.split_whitespace().nth(1))
            .unwrap_or("")
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim().eq_ignore_ascii_case(name).then(|| value.trim())
        })
    }

    /// Decoded query parameter.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.target().split_once('?')?.1;
        query.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == name).then(|| decode(value))
        })
    }
}

fn decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).unwrap_or("");
                match u8::from_str_radix(hex, 16) {
                    Ok(b) => {
                        out.push(b);
                        i += 2;
                    }
                    Err(_) => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Log of requests a mock backend has served.
pub type RequestLog = Arc<Mutex<Vec<SeenRequest>>>;

/// Start a programmable mock backend on an ephemeral port.
///
/// `f` sees each request head and returns `(status, json body)`.
pub async fn start_programmable_backend<F, Fut>(f: F) -> (SocketAddr, RequestLog)
where
    F: Fn(SeenRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let task_log = log.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let log = task_log.clone();
                    tokio::spawn(async move {
                        let head = read_head(&mut socket).await;
                        let request = SeenRequest { head };
                        log.lock().unwrap().push(request.clone());

                        let (status, body) = f(request).await;
                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, log)
}

async fn read_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Nominatim body for a single match.
pub fn place(lat: &str, lon: &str, name: &str) -> String {
    format!(
        r#"[{{"place_id":1,"lat":"{}","lon":"{}","display_name":"{}","type":"suburb"}}]"#,
        lat, lon, name
    )
}

/// OSRM body for a single route.
pub fn osrm_route(distance_m: f64, duration_s: f64) -> String {
    format!(
        r#"{{"code":"Ok","routes":[{{"distance":{},"duration":{},"legs":[],"weight":{}}}],"waypoints":[]}}"#,
        distance_m, duration_s, duration_s
    )
}

/// Geocoder that knows Bandra and Andheri and nothing else.
pub async fn start_mumbai_geocoder() -> (SocketAddr, RequestLog) {
    start_programmable_backend(|req: SeenRequest| async move {
        match req.query_param("q").as_deref() {
            Some("Bandra") => (200, place("19.05", "72.84", "Bandra West, Mumbai")),
            Some("Andheri") => (200, place("19.12", "72.85", "Andheri East, Mumbai")),
            _ => (200, "[]".to_string()),
        }
    })
    .await
}

/// Router that always answers 8 km / 20 min.
pub async fn start_fixed_router() -> (SocketAddr, RequestLog) {
    start_programmable_backend(|_| async { (200, osrm_route(8000.0, 1200.0)) }).await
}

/// A running server wired to mock providers and a throwaway database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub history: SearchHistory,
    pub shutdown: Shutdown,
    pub client: reqwest::Client,
    database_path: std::path::PathBuf,
    _dir: tempfile::TempDir,
}

impl TestApp {
    pub fn database_path(&self) -> std::path::PathBuf {
        self.database_path.clone()
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get_routes(&self, from: &str, to: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/get-routes"))
            .json(&serde_json::json!({ "fromLoc": from, "toLoc": to }))
            .send()
            .await
            .expect("Server unreachable")
    }

    /// Wait until the history holds `expected` records, or give up after ~2s.
    pub async fn wait_for_history(&self, expected: u64) -> u64 {
        let mut count = 0;
        for _ in 0..100 {
            count = self.history.count().await.unwrap();
            if count >= expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        count
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the server against the given provider addresses.
pub async fn spawn_app(geocoder: SocketAddr, router: SocketAddr) -> TestApp {
    spawn_app_with(geocoder, router, |_| {}).await
}

/// Start the server, letting the caller adjust the config first.
pub async fn spawn_app_with<F>(geocoder: SocketAddr, router: SocketAddr, adjust: F) -> TestApp
where
    F: FnOnce(&mut CommuteConfig),
{
    let dir = tempfile::tempdir().unwrap();

    let mut config = CommuteConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;
    config.geocoder.endpoint = format!("http://{}/search", geocoder);
    config.router.endpoint = format!("http://{}/route/v1", router);
    let database_path = dir.path().join("commute.db");
    config.storage.database_path = database_path.to_string_lossy().into_owned();
    adjust(&mut config);

    let state = build_state(&config).unwrap();
    let history = state.history.clone();

    let listener = TcpListener::bind(config.listener.bind_address()).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, state);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    TestApp {
        addr,
        history,
        shutdown,
        client,
        database_path,
        _dir: dir,
    }
}
