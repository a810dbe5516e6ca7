//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves fixed bodies by path. A `/relay?url=<target>` route emulates the
//! relay: it looks up the target URL's path in a separate route table, so a
//! resource can be made reachable only through the relay.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Route {
    pub fn ok(body: &[u8]) -> Self {
        Self {
            status: 200,
            body: body.to_vec(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Routes {
    /// Direct routes by request path (including query).
    pub direct: HashMap<String, Route>,
    /// Routes served via `/relay`, keyed by the target URL's path.
    pub relayed: HashMap<String, Route>,
}

impl Routes {
    pub fn direct(mut self, path: &str, route: Route) -> Self {
        self.direct.insert(path.to_string(), route);
        self
    }

    pub fn relayed(mut self, path: &str, route: Route) -> Self {
        self.relayed.insert(path.to_string(), route);
        self
    }
}

pub struct PageServer {
    /// e.g. "http://127.0.0.1:12345"
    pub origin: String,
    /// Request lines seen, in arrival order ("GET /path").
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl PageServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.origin, path)
    }

    pub fn relay_endpoint(&self) -> String {
        self.url("/relay")
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. The server runs until the process exits.
pub fn start(routes: Routes) -> PageServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let seen = Arc::clone(&seen);
            thread::spawn(move || handle(stream, &routes, &seen));
        }
    });
    PageServer {
        origin: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

fn handle(mut stream: std::net::TcpStream, routes: &Routes, seen: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let target = parts.next().unwrap_or("/");
    seen.lock().unwrap().push(format!("{} {}", method, target));

    let route = if !method.eq_ignore_ascii_case("GET") {
        Some(Route::status(405))
    } else if target.starts_with("/relay") {
        relay_target_path(target).and_then(|path| routes.relayed.get(&path).cloned())
    } else {
        routes.direct.get(target).cloned()
    };
    let route = route.unwrap_or(Route::status(404));

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nContent-Type: application/octet-stream\r\nConnection: close\r\n\r\n",
        route.status,
        reason(route.status),
        route.body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(&route.body);
}

/// Path (with query) of the URL carried in `/relay?url=...`.
fn relay_target_path(target: &str) -> Option<String> {
    let relay = url::Url::parse(&format!("http://relay.invalid{}", target)).ok()?;
    let (_, value) = relay.query_pairs().find(|(k, _)| k == "url")?;
    let inner = url::Url::parse(&value).ok()?;
    Some(match inner.query() {
        Some(q) => format!("{}?{}", inner.path(), q),
        None => inner.path().to_string(),
    })
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
