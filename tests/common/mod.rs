#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub enum Reply {
    Json(u16, String),
    /// Accept the connection and say nothing for this long. The stall happens
    /// off the accept loop, so the next connection is served straight away.
    Hang(Duration),
}

/// Serves the given replies in order, one per connection, then stops listening.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub fn start(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        thread::spawn(move || {
            for reply in replies {
                let (mut stream, _) = match listener.accept() {
                    Ok(conn) => conn,
                    Err(_) => return,
                };
                seen.lock().unwrap().push(read_request_line(&mut stream));
                match reply {
                    Reply::Json(status, body) => {
                        let head = format!(
                            "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                            status,
                            body.len()
                        );
                        stream.write_all(head.as_bytes()).ok();
                        stream.write_all(body.as_bytes()).ok();
                        stream.flush().ok();
                    }
                    Reply::Hang(duration) => {
                        thread::spawn(move || {
                            thread::sleep(duration);
                            drop(stream);
                        });
                    }
                }
            }
        });

        Self { base_url, requests }
    }

    /// Request lines received so far, e.g. `GET /v2/... HTTP/1.1`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn read_request_line(stream: &mut TcpStream) -> String {
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .ok();
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];
    while !data.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => data.extend_from_slice(&buf[..n]),
        }
    }
    String::from_utf8_lossy(&data)
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}

/// A port nothing listens on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn directions_body(distance: f64, duration: f64) -> String {
    format!(
        r#"{{"type":"FeatureCollection","features":[{{"type":"Feature",
            "properties":{{"summary":{{"distance":{},"duration":{}}}}},
            "geometry":{{"type":"LineString","coordinates":[[77.579975,12.946538],[77.59,12.99],[77.60185844,13.04438892]]}}}}]}}"#,
        distance, duration
    )
}
