//! Mock Route 53 endpoint
//!
//! A loopback HTTP/1.1 server that answers every request with the same
//! canned XML response and records each request it receives. Credentials
//! come from a static test double so no host configuration is consulted.

#![allow(dead_code)]

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_route53::config::Credentials;
use ddns_provider_route53::CredentialProvider;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Accepted change, as Route 53 reports it right after submission
pub const CHANGE_ACCEPTED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ChangeResourceRecordSetsResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <ChangeInfo>
    <Id>/change/C2682N5HXP0BZ4</Id>
    <Status>PENDING</Status>
    <SubmittedAt>2024-05-01T12:00:00.000Z</SubmittedAt>
  </ChangeInfo>
</ChangeResourceRecordSetsResponse>"#;

/// Route 53 error document
pub fn error_body(code: &str, message: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ErrorResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <Error>
    <Type>Sender</Type>
    <Code>{}</Code>
    <Message>{}</Message>
  </Error>
  <RequestId>5a9d3e2f-0000-4000-8000-000000000000</RequestId>
</ErrorResponse>"#,
        code, message
    )
}

/// One request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request line, e.g. `POST /2013-04-01/hostedzone/Z123/rrset/ HTTP/1.1`
    pub request_line: String,
    pub body: String,
}

/// A running mock Route 53 endpoint
pub struct MockRoute53 {
    endpoint: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockRoute53 {
    /// Start a mock that answers `status` with `body`
    pub async fn start(status: u16, body: impl Into<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind loopback listener");
        let addr = listener.local_addr().expect("listener address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let body = body.into();

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve(stream, status, body.clone(), Arc::clone(&recorded)));
            }
        });

        Self {
            endpoint: format!("http://{}", addr),
            requests,
        }
    }

    /// Accept every change
    pub async fn accepting() -> Self {
        Self::start(200, CHANGE_ACCEPTED).await
    }

    pub fn endpoint(&self) -> String {
        self.endpoint.clone()
    }

    /// Number of requests received
    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Credentials and endpoint pointing at this mock
    pub fn credentials(&self) -> StaticCredentials {
        StaticCredentials {
            endpoint: self.endpoint(),
        }
    }
}

async fn serve(
    mut stream: TcpStream,
    status: u16,
    body: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
) {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];

    let head_end = loop {
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => data.extend_from_slice(&buf[..n]),
        }
    };

    let head = String::from_utf8_lossy(&data[..head_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while data.len() < head_end + content_length {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => data.extend_from_slice(&buf[..n]),
        }
    }

    requests.lock().unwrap().push(RecordedRequest {
        request_line: head.lines().next().unwrap_or_default().to_string(),
        body: String::from_utf8_lossy(&data[head_end..head_end + content_length]).to_string(),
    });

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        if status == 200 { "OK" } else { "Error" },
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

/// Fixed test credentials aimed at a mock endpoint
///
/// The SDK's default retry policy is left untouched here.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    endpoint: String,
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn load(&self) -> SdkConfig {
        aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new(
                "AKIDEXAMPLE",
                "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
                None,
                None,
                "static",
            ))
            .endpoint_url(self.endpoint.clone())
            .load()
            .await
    }
}
