#![allow(dead_code)]

pub mod temp_files {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Write `content` to a temp file with the given extension.
    pub fn create_temp_spec(content: &str, ext: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("brrtcore_test_")
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    pub fn create_temp_yaml(content: &str) -> NamedTempFile {
        create_temp_spec(content, "yaml")
    }

    pub fn create_temp_json(content: &str) -> NamedTempFile {
        create_temp_spec(content, "json")
    }
}

pub mod diagnostics {
    use brrtcore::diagnostics::{Diagnostics, Severity};
    use std::fmt;
    use std::sync::Mutex;

    /// Keeps every event so tests can assert on severities.
    #[derive(Default)]
    pub struct RecordingDiagnostics {
        events: Mutex<Vec<(Severity, String)>>,
    }

    impl RecordingDiagnostics {
        pub fn events(&self) -> Vec<(Severity, String)> {
            self.events.lock().unwrap().clone()
        }

        pub fn count(&self, severity: Severity) -> usize {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter(|(s, _)| *s == severity)
                .count()
        }
    }

    impl Diagnostics for RecordingDiagnostics {
        fn log(&self, severity: Severity, args: fmt::Arguments<'_>) {
            self.events.lock().unwrap().push((severity, args.to_string()));
        }
    }
}

pub mod test_server {
    use std::sync::Once;

    /// Ensures May coroutines are configured only once
    static MAY_INIT: Once = Once::new();

    pub fn setup_may_runtime() {
        MAY_INIT.call_once(|| {
            may::config().set_stack_size(0x8000);
        });
    }
}

pub mod http {
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpStream};
    use std::time::Duration;

    /// Parsed HTTP/1.1 response.
    #[derive(Debug)]
    pub struct RawResponse {
        pub status: u16,
        pub headers: Vec<(String, String)>,
        pub body: Vec<u8>,
    }

    impl RawResponse {
        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        }

        pub fn header_count(&self, name: &str) -> usize {
            self.headers
                .iter()
                .filter(|(k, _)| k.eq_ignore_ascii_case(name))
                .count()
        }
    }

    /// Send a raw request and read until `Content-Length` bytes of body arrived.
    pub fn send_request(addr: SocketAddr, raw: &str) -> RawResponse {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        stream.write_all(raw.as_bytes()).unwrap();

        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = match stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => break,
                Err(e) => panic!("read failed: {e}"),
            };
            buf.extend_from_slice(&chunk[..n]);
            if let Some(resp) = try_parse(&buf) {
                return resp;
            }
        }
        try_parse(&buf).unwrap_or_else(|| {
            panic!(
                "incomplete response: {:?}",
                String::from_utf8_lossy(&buf)
            )
        })
    }

    fn try_parse(buf: &[u8]) -> Option<RawResponse> {
        let split = buf.windows(4).position(|w| w == b"\r\n\r\n")?;
        let head = String::from_utf8_lossy(&buf[..split]).into_owned();
        let mut lines = head.split("\r\n");
        let status_line = lines.next()?;
        let status = status_line.split_whitespace().nth(1)?.parse().ok()?;
        let headers: Vec<(String, String)> = lines
            .filter_map(|l| l.split_once(':'))
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .collect();
        let length: usize = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, v)| v.parse().ok())
            .unwrap_or(0);
        let body = &buf[split + 4..];
        if body.len() < length {
            return None;
        }
        Some(RawResponse {
            status,
            headers,
            body: body[..length].to_vec(),
        })
    }
}
