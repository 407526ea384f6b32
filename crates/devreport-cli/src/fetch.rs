//! # Document Loader
//!
//! Resolves a source identifier to raw report text. Sources starting with
//! `http://` or `https://` are fetched over HTTP with a bounded timeout;
//! anything else is read as a local file path, UTF-8. Loader failures are
//! reported independently of validation errors and terminate the run
//! before parse or validation is attempted.

use std::time::Duration;

use thiserror::Error;

/// Upper bound on one HTTP fetch, connection included.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Failures while resolving a source to text.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The local file could not be read.
    #[error("failed to read file '{path}': {source}")]
    File {
        /// The path as given on the command line.
        path: String,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The URL could not be fetched, or answered with a non-success status.
    #[error("failed to fetch '{url}': {source}")]
    Http {
        /// The URL as given on the command line.
        url: String,
        /// The underlying HTTP failure.
        #[source]
        source: reqwest::Error,
    },
}

/// Resolve a source identifier to the full document text.
pub fn fetch_source(source: &str) -> Result<String, FetchError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        fetch_url(source)
    } else {
        std::fs::read_to_string(source).map_err(|e| FetchError::File {
            path: source.to_string(),
            source: e,
        })
    }
}

fn fetch_url(url: &str) -> Result<String, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| http_error(url, e))?;
    let response = client
        .get(url)
        .send()
        .map_err(|e| http_error(url, e))?
        .error_for_status()
        .map_err(|e| http_error(url, e))?;
    response.text().map_err(|e| http_error(url, e))
}

fn http_error(url: &str, source: reqwest::Error) -> FetchError {
    FetchError::Http {
        url: url.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Serve exactly one canned HTTP response on a loopback port and
    /// return the URL pointing at it.
    fn spawn_one_shot_server(status_line: &str, body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = [0u8; 2048];
                let _ = stream.read(&mut request);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}/status.json")
    }

    #[test]
    fn local_file_roundtrips_as_utf8_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        std::fs::write(&path, "{\"status\": \"été\"}").unwrap();

        let text = fetch_source(path.to_str().unwrap()).unwrap();
        assert_eq!(text, "{\"status\": \"été\"}");
    }

    #[test]
    fn missing_file_is_a_file_error_naming_the_path() {
        let err = fetch_source("/tmp/devreport-no-such-report-92341.json").unwrap_err();
        match err {
            FetchError::File { path, .. } => assert!(path.contains("no-such-report")),
            other => panic!("expected File error, got: {other}"),
        }
    }

    #[test]
    fn http_200_body_is_returned() {
        let url = spawn_one_shot_server("200 OK", "{\"uptime\": \"01:00:00\"}");
        let text = fetch_source(&url).unwrap();
        assert_eq!(text, "{\"uptime\": \"01:00:00\"}");
    }

    #[test]
    fn http_error_status_is_a_fetch_failure() {
        let url = spawn_one_shot_server("404 Not Found", "gone");
        let err = fetch_source(&url).unwrap_err();
        match err {
            FetchError::Http { url: reported, .. } => assert!(reported.contains("status.json")),
            other => panic!("expected Http error, got: {other}"),
        }
    }

    #[test]
    fn https_prefix_routes_to_the_http_client() {
        // No listener: the point is that the path is NOT treated as a
        // local file named "https://...".
        let err = fetch_source("https://127.0.0.1:1/unreachable.json").unwrap_err();
        assert!(matches!(err, FetchError::Http { .. }));
    }
}
