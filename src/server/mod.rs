//! Blocking HTTP front end for the JSON API.
//!
//! Each connection carries exactly one request. Routing lives in [routes] and knows
//! nothing about sockets.

use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::time::Duration;

use tracing::{debug, info, warn};

pub mod api;
pub mod routes;

pub const BIND_ENV_VAR: &str = "SQUAD_RATING_BIND";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Requests larger than this are cut off; solve payloads are far smaller.
const MAX_REQUEST_BYTES: usize = 1 << 20;
/// A stalled client releases the server after this long.
const REQUEST_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Serves the JSON API until the listener fails.
pub fn run_server(bind_addr: &str) -> io::Result<()> {
    let listener = TcpListener::bind(bind_addr)?;
    info!(bind_addr, "squad-rating server listening");

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = serve_connection(&mut stream, REQUEST_READ_TIMEOUT) {
                    warn!(error = %err, "request error");
                }
            }
            Err(err) => warn!(error = %err, "connection failed"),
        }
    }

    Ok(())
}

/// Method, path and body of one parsed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

fn serve_connection(stream: &mut TcpStream, read_timeout: Duration) -> io::Result<()> {
    stream.set_read_timeout(Some(read_timeout))?;
    let Some(request) = read_request(stream)? else {
        return Ok(());
    };

    let response = routes::route_request(&request.method, &request.path, &request.body);
    info!(
        method = %request.method,
        path = %request.path,
        status = response.status_code,
        "request"
    );
    stream.write_all(response.to_http_string().as_bytes())?;
    stream.flush()
}

/// Reads until the headers and a `Content-Length` body have arrived, or the peer stops
/// sending. Returns `None` for a connection that closed without sending anything.
fn read_request(stream: &mut impl Read) -> io::Result<Option<RawRequest>> {
    let mut received = Vec::new();
    let mut chunk = [0_u8; 8192];

    loop {
        let read = stream.read(&mut chunk)?;
        if read == 0 {
            break;
        }
        received.extend_from_slice(&chunk[..read]);
        if received.len() >= MAX_REQUEST_BYTES {
            debug!(bytes = received.len(), "request truncated");
            break;
        }
        if let Some(header_end) = find_header_end(&received) {
            let wanted = content_length(&received[..header_end]).unwrap_or(0);
            if received.len() >= header_end + wanted {
                break;
            }
        }
    }

    if received.is_empty() {
        return Ok(None);
    }
    Ok(Some(parse_request(&String::from_utf8_lossy(&received))))
}

/// Offset just past the blank line ending the headers.
fn find_header_end(bytes: &[u8]) -> Option<usize> {
    bytes
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|index| index + 4)
}

fn content_length(head: &[u8]) -> Option<usize> {
    String::from_utf8_lossy(head).lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.trim().eq_ignore_ascii_case("content-length") {
            value.trim().parse().ok()
        } else {
            None
        }
    })
}

/// Splits a raw request into method, path and body. Missing parts fall back to
/// `GET`, `/` and an empty body.
pub fn parse_request(raw: &str) -> RawRequest {
    let (head, body) = raw
        .split_once("\r\n\r\n")
        .or_else(|| raw.split_once("\n\n"))
        .unwrap_or((raw, ""));
    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();

    RawRequest {
        method: request_line.next().unwrap_or("GET").to_string(),
        path: request_line.next().unwrap_or("/").to_string(),
        body: body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_request_line_and_body() {
        let raw = "POST /api/rating HTTP/1.1\r\nContent-Type: application/json\r\n\r\n{\"ratings\":[85]}";
        let request = parse_request(raw);
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/api/rating");
        assert_eq!(request.body, "{\"ratings\":[85]}");
    }

    #[test]
    fn bare_request_defaults_to_root_get() {
        let request = parse_request("");
        assert_eq!(request.method, "GET");
        assert_eq!(request.path, "/");
        assert!(request.body.is_empty());
    }

    #[test]
    fn reads_whole_body_across_chunks() {
        let body = format!("{{\"ratings\":[{}]}}", vec!["85"; 4000].join(","));
        let raw = format!(
            "POST /api/rating HTTP/1.1\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        );
        let mut reader = io::Cursor::new(raw.into_bytes());
        let request = read_request(&mut reader)
            .expect("cursor reads succeed")
            .expect("request present");
        assert_eq!(request.body, body);
    }

    #[test]
    fn empty_connection_yields_nothing() {
        let mut reader = io::Cursor::new(Vec::new());
        assert_eq!(read_request(&mut reader).expect("cursor reads succeed"), None);
    }

    #[test]
    fn stalled_body_times_out_instead_of_blocking() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("loopback bind");
        let mut client =
            TcpStream::connect(listener.local_addr().expect("bound address")).expect("connect");
        client
            .write_all(b"POST /api/rating HTTP/1.1\r\nContent-Length: 100\r\n\r\n{}")
            .expect("partial request written");
        let (mut server_side, _) = listener.accept().expect("accept");

        let started = std::time::Instant::now();
        let result = serve_connection(&mut server_side, Duration::from_millis(200));
        let err = result.expect_err("short body never completes");
        assert!(matches!(
            err.kind(),
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
        ));
        assert!(started.elapsed() < Duration::from_secs(5));
        drop(client);
    }

    #[test]
    fn content_length_header_is_case_insensitive() {
        assert_eq!(content_length(b"POST / HTTP/1.1\r\ncontent-length: 12\r\n"), Some(12));
        assert_eq!(content_length(b"GET / HTTP/1.1\r\n"), None);
    }
}
