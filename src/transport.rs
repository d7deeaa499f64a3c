//! Outbound HTTP transport.
//!
//! Every Aligo call is a form-encoded `POST` whose JSON response is passed
//! through untouched, so the seam is a single method.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::trace;

use crate::{AligoError, Result};

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

#[async_trait]
pub trait Transport: Send + Sync {
    /// Posts `form` to `url` as `application/x-www-form-urlencoded`.
    ///
    /// # Returns
    ///
    /// The parsed JSON body on a success status. Network failures, error
    /// statuses and bodies that are not JSON are [`AligoError::Transport`].
    async fn post_form(
        &self,
        url: &str,
        form: &[(String, String)],
    ) -> Result<Value>;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport. Without a timeout the client default applies.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|err| AligoError::Config(err.to_string()))?;

        Ok(Self {
            client,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(
        &self,
        url: &str,
        form: &[(String, String)],
    ) -> Result<Value> {
        trace!(url, fields = form.len(), "posting form");

        // `form` sets the urlencoded content type; set it explicitly to match the provider docs.
        let res = self.client.post(url).header(CONTENT_TYPE, FORM_URLENCODED).form(form).send().await?.error_for_status()?;
        let body = res.text().await?;

        serde_json::from_str(&body).map_err(|err| AligoError::Transport(format!("invalid response body: {}", err)))
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::{collections::HashMap, sync::Mutex};

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use super::Transport;
    use crate::{AligoError, Result};

    /// A request seen by [`MockTransport`].
    #[derive(Debug, Clone)]
    pub struct RecordedCall {
        pub url: String,
        pub form: Vec<(String, String)>,
    }

    impl RecordedCall {
        pub fn field(
            &self,
            key: &str,
        ) -> Option<&str> {
            self.form.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
        }

        pub fn keys(&self) -> Vec<&str> {
            self.form.iter().map(|(k, _)| k.as_str()).collect()
        }
    }

    /// Records every call and answers with a canned success body,
    /// or with an error for the call numbers registered via `fail_on`.
    #[derive(Default)]
    pub struct MockTransport {
        calls: Mutex<Vec<RecordedCall>>,
        failures: HashMap<usize, String>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_on(
            mut self,
            call: usize,
            message: &str,
        ) -> Self {
            self.failures.insert(call, message.to_string());
            self
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn post_form(
            &self,
            url: &str,
            form: &[(String, String)],
        ) -> Result<Value> {
            let mut calls = self.calls.lock().unwrap();
            let n = calls.len();
            calls.push(RecordedCall {
                url: url.to_string(),
                form: form.to_vec(),
            });

            match self.failures.get(&n) {
                Some(message) => Err(AligoError::Transport(message.clone())),
                None => Ok(json!({ "result_code": "1", "message": "success", "call": n })),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use serde_json::json;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    use super::{HttpTransport, Transport};
    use crate::AligoError;

    /// Answers a single request with `status` and `body`, returning the raw request it read.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/send/", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length").then(|| value.trim().parse::<usize>().ok()).flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= end + 4 + length {
                        break;
                    }
                }
            }

            let response = format!("HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}", status, body.len(), body);
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&raw).to_string()
        });

        (url, handle)
    }

    fn form() -> Vec<(String, String)> {
        vec![("key".to_string(), "a b&c".to_string()), ("user_id".to_string(), "u".to_string())]
    }

    #[test]
    fn test_http_transport_builds_with_and_without_timeout() {
        assert!(HttpTransport::new(None).is_ok());
        assert!(HttpTransport::new(Some(Duration::from_millis(1500))).is_ok());
    }

    #[tokio::test]
    async fn test_post_form_encodes_body_and_parses_json() {
        let (url, server) = serve_once("200 OK", r#"{"result_code":1}"#).await;
        let value = HttpTransport::new(Some(Duration::from_secs(5))).unwrap().post_form(&url, &form()).await.unwrap();
        assert_eq!(value, json!({"result_code": 1}));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /send/ "));
        assert!(request.to_ascii_lowercase().contains("content-type: application/x-www-form-urlencoded"));
        assert!(request.ends_with("key=a+b%26c&user_id=u"));
    }

    #[tokio::test]
    async fn test_post_form_rejects_non_json_body() {
        let (url, server) = serve_once("200 OK", "not json").await;
        let err = HttpTransport::new(Some(Duration::from_secs(5))).unwrap().post_form(&url, &form()).await.unwrap_err();
        server.await.unwrap();

        match err {
            AligoError::Transport(message) => assert!(message.starts_with("invalid response body:")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_post_form_maps_error_status() {
        let (url, server) = serve_once("500 Internal Server Error", r#"{"result_code":-1}"#).await;
        let err = HttpTransport::new(Some(Duration::from_secs(5))).unwrap().post_form(&url, &form()).await.unwrap_err();
        server.await.unwrap();

        match err {
            AligoError::Transport(message) => assert!(message.contains("500")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
