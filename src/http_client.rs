//! HTTP clients for the prediction service and bounded response helpers.
//!
//! JSON calls go through a `ureq` agent; the multipart upload uses a blocking
//! `reqwest` client. Both share the configured timeouts and body cap.

use std::io::{self, Read};
use std::time::Duration;

use crate::config::ServiceSettings;

/// Build an agent with the timeouts configured for the prediction service.
pub(crate) fn build_agent(settings: &ServiceSettings) -> ureq::Agent {
    let (connect_timeout, request_timeout) = timeouts(settings);
    ureq::AgentBuilder::new()
        .timeout_connect(connect_timeout)
        .timeout_read(request_timeout)
        .timeout_write(request_timeout)
        .build()
}

/// Build the client used for multipart uploads.
pub(crate) fn build_upload_client(
    settings: &ServiceSettings,
) -> Result<reqwest::blocking::Client, reqwest::Error> {
    let (connect_timeout, request_timeout) = timeouts(settings);
    reqwest::blocking::Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .build()
}

fn timeouts(settings: &ServiceSettings) -> (Duration, Duration) {
    (
        Duration::from_secs(settings.connect_timeout_secs.max(1)),
        Duration::from_secs(settings.request_timeout_secs.max(1)),
    )
}

/// Read a response into memory, enforcing a maximum byte size.
pub(crate) fn read_response_bytes(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, io::Error> {
    let declared = response
        .header("Content-Length")
        .and_then(|length| length.parse::<u64>().ok());
    read_limited(response.into_reader(), declared, max_bytes)
}

/// Read a response body as UTF-8 text, enforcing a maximum byte size.
pub(crate) fn read_response_text(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<String, io::Error> {
    into_text(read_response_bytes(response, max_bytes)?)
}

/// Read an upload response body as UTF-8 text, enforcing a maximum byte size.
pub(crate) fn read_upload_text(
    response: reqwest::blocking::Response,
    max_bytes: usize,
) -> Result<String, io::Error> {
    let declared = response.content_length();
    into_text(read_limited(response, declared, max_bytes)?)
}

fn read_limited(
    reader: impl Read,
    declared_len: Option<u64>,
    max_bytes: usize,
) -> Result<Vec<u8>, io::Error> {
    if let Some(length) = declared_len {
        if length > max_bytes as u64 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Response too large: {length} bytes"),
            ));
        }
    }
    let mut limited = reader.take(max_bytes as u64 + 1);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes)?;
    if bytes.len() > max_bytes {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response exceeded {max_bytes} bytes"),
        ));
    }
    Ok(bytes)
}

fn into_text(bytes: Vec<u8>) -> Result<String, io::Error> {
    String::from_utf8(bytes).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::TcpListener;
    use std::thread;

    fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{}", addr)
    }

    fn agent() -> ureq::Agent {
        build_agent(&ServiceSettings::default())
    }

    #[test]
    fn rejects_content_length_over_max() {
        let url = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nok".to_string());
        let response = agent().get(&url).call().unwrap();
        let err = read_response_bytes(response, 10).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn rejects_streamed_body_over_max() {
        let body = "a".repeat(32);
        let url = serve_once(format!("HTTP/1.0 200 OK\r\n\r\n{body}"));
        let response = agent().get(&url).call().unwrap();
        let err = read_response_bytes(response, 16).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn reads_text_under_limit() {
        let body = r#"{"status":"healthy"}"#;
        let url = serve_once(format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        ));
        let response = agent().get(&url).call().unwrap();
        assert_eq!(read_response_text(response, 64).unwrap(), body);
    }

    #[test]
    fn upload_reader_applies_the_same_cap() {
        let body = "b".repeat(40);
        let url = serve_once(format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        ));
        let client = build_upload_client(&ServiceSettings::default()).unwrap();
        let response = client.get(&url).send().unwrap();
        let err = read_upload_text(response, 16).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
