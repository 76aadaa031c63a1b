use crate::{
    cookie::{self, CSRF_COOKIE},
    message::{MessageSubmission, PremiumRequest},
};
use cupid_core::{
    Map,
    error::Error,
    extension::{JsonObjectExt, TomlTableExt},
};
use reqwest::{Client, Response};
use serde::Serialize;
use std::time::Duration;
use toml::Table;
use url::Url;

/// Fallback error for a rejected message submission.
const MESSAGE_FAILED: &str = "Failed to schedule message";

/// Error for a rejected premium services request.
const PREMIUM_FAILED: &str = "Request failed";

/// The service receiving form submissions.
pub trait Backend {
    /// Schedules the message.
    async fn submit_message(&self, submission: &MessageSubmission) -> Result<(), Error>;

    /// Files the premium services request.
    async fn submit_premium(&self, request: &PremiumRequest) -> Result<(), Error>;
}

/// A backend reached over HTTP with JSON bodies.
///
/// It can be configured by the `[backend]` table:
///
/// ```toml
/// [backend]
/// base-url = "https://soltechssolutions.com"
/// request-timeout = "30s"
/// user-agent = "cupid/0.1"
/// ```
#[derive(Debug, Clone)]
pub struct HttpBackend {
    /// HTTP client.
    client: Client,
    /// Base URL with a trailing slash.
    base_url: Url,
    /// Token sent in the `X-CSRFToken` header.
    csrf_token: Option<String>,
}

impl HttpBackend {
    /// Default base URL of the API.
    pub const DEFAULT_BASE_URL: &'static str = "https://soltechssolutions.com";

    /// Creates a new instance with the base URL.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::build(base_url, None, None)
    }

    /// Creates a new instance with the `[backend]` table of the config.
    pub fn with_config(config: &Table) -> Result<Self, Error> {
        let Some(backend) = config.get_table("backend") else {
            return Self::new(Self::DEFAULT_BASE_URL);
        };
        let base_url = backend
            .get_str("base-url")
            .unwrap_or(Self::DEFAULT_BASE_URL);
        Self::build(
            base_url,
            backend.get_duration("request-timeout"),
            backend.get_str("user-agent"),
        )
    }

    fn build(
        base_url: &str,
        timeout: Option<Duration>,
        user_agent: Option<&str>,
    ) -> Result<Self, Error> {
        let mut base_url = Url::parse(base_url)
            .map_err(|err| Error::with_source(format!("invalid base URL `{base_url}`"), err))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let user_agent = user_agent
            .map(|s| s.to_owned())
            .unwrap_or_else(|| format!("cupid-form/{}", env!("CARGO_PKG_VERSION")));
        let mut client_builder = Client::builder().user_agent(user_agent).gzip(true);
        if let Some(timeout) = timeout {
            client_builder = client_builder.timeout(timeout);
        }
        let client = client_builder
            .build()
            .map_err(|err| Error::with_source("fail to build the HTTP client", err))?;
        Ok(Self {
            client,
            base_url,
            csrf_token: None,
        })
    }

    /// Sets the token sent in the `X-CSRFToken` header.
    #[inline]
    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    /// Takes the CSRF token from the `csrftoken` entry of a `Cookie` header.
    pub fn with_cookie_header(mut self, header: &str) -> Self {
        self.csrf_token = cookie::get_cookie(header, CSRF_COOKIE);
        if self.csrf_token.is_none() {
            tracing::warn!("no `{CSRF_COOKIE}` cookie found");
        }
        self
    }

    /// Returns the base URL.
    #[inline]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the CSRF token.
    #[inline]
    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    /// Returns the URL of the endpoint relative to the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, Error> {
        self.base_url
            .join(path)
            .map_err(|err| Error::with_source(format!("invalid endpoint `{path}`"), err))
    }

    /// Posts the body as JSON.
    async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Result<Response, Error> {
        let url = self.endpoint(path)?;
        let mut request = self.client.post(url.clone()).json(body);
        if let Some(token) = &self.csrf_token {
            request = request.header("X-CSRFToken", token);
        }
        let response = request.send().await.map_err(|err| {
            tracing::error!(url = url.as_str(), "fail to send the request: {err}");
            Error::with_source(format!("fail to post to `{url}`"), err)
        })?;
        tracing::debug!(
            url = url.as_str(),
            status = response.status().as_u16(),
            "received a response"
        );
        Ok(response)
    }
}

impl Backend for HttpBackend {
    async fn submit_message(&self, submission: &MessageSubmission) -> Result<(), Error> {
        let response = self
            .post_json("api/messages/", submission)
            .await
            .map_err(|err| err.wrap(MESSAGE_FAILED))?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response
            .json::<Map>()
            .await
            .ok()
            .and_then(|body| {
                body.get_str("message")
                    .filter(|message| !message.is_empty())
                    .map(|message| message.to_owned())
            })
            .unwrap_or_else(|| MESSAGE_FAILED.to_owned());
        tracing::warn!(status = status.as_u16(), "message submission rejected: {message}");
        Err(Error::new(message))
    }

    async fn submit_premium(&self, request: &PremiumRequest) -> Result<(), Error> {
        let response = self
            .post_json("api/premium/", request)
            .await
            .map_err(|err| err.wrap(PREMIUM_FAILED))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            tracing::warn!(status = status.as_u16(), "premium request rejected");
            Err(Error::new(PREMIUM_FAILED))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Backend, HttpBackend};
    use crate::message::{MessageContent, MessageSubmission, MessageType, PremiumRequest};
    use cupid_core::error::Error;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    /// Serves a single request with the canned response and returns the raw request.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("fail to bind a local listener");
        let base_url = format!("http://{}", listener.local_addr().expect("no local addr"));
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("fail to accept");
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = stream.read(&mut chunk).await.expect("fail to read");
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&buf).into_owned();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if buf.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\n\
                 content-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream
                .write_all(response.as_bytes())
                .await
                .expect("fail to write");
            String::from_utf8_lossy(&buf).into_owned()
        });
        (base_url, handle)
    }

    fn submission() -> MessageSubmission {
        MessageSubmission {
            sender_name: "Alice".to_owned(),
            recipient_name: "Bob".to_owned(),
            phone_country: "US".to_owned(),
            phone_number: "+12025550123".to_owned(),
            email: Some("alice@example.com".to_owned()),
            relationship: "friend".to_owned(),
            message_type: MessageType::Description,
            content: MessageContent::new(MessageType::Description, "Kind and funny".to_owned()),
        }
    }

    #[test]
    fn it_builds_endpoints() -> Result<(), Error> {
        let backend = HttpBackend::new("https://example.com/app")?;
        assert_eq!(backend.base_url().as_str(), "https://example.com/app/");
        assert_eq!(
            backend.endpoint("api/messages/")?.as_str(),
            "https://example.com/app/api/messages/"
        );
        assert!(HttpBackend::new("not a url").is_err());

        let backend = backend.with_cookie_header("theme=dark; csrftoken=abc%20123");
        assert_eq!(backend.csrf_token(), Some("abc 123"));
        Ok(())
    }

    #[test]
    fn it_reads_backend_config() -> Result<(), Error> {
        let backend = HttpBackend::with_config(&toml::Table::new())?;
        assert_eq!(backend.base_url().as_str(), "https://soltechssolutions.com/");

        let config: toml::Table = toml::from_str(
            r#"
            [backend]
            base-url = "http://localhost:8000"
            request-timeout = "5s"
            "#,
        )?;
        let backend = HttpBackend::with_config(&config)?;
        assert_eq!(
            backend.endpoint("api/premium/")?.as_str(),
            "http://localhost:8000/api/premium/"
        );
        Ok(())
    }

    #[tokio::test]
    async fn it_posts_messages() -> Result<(), Error> {
        let (base_url, handle) = serve_once("201 Created", r#"{"id":1}"#).await;
        let backend = HttpBackend::new(&base_url)?.with_csrf_token("token-1");
        backend
            .submit_message(&submission())
            .await?;

        let request = handle.await?;
        assert!(request.starts_with("POST /api/messages/ HTTP/1.1"));
        let lowercase = request.to_ascii_lowercase();
        assert!(lowercase.contains("content-type: application/json"));
        assert!(lowercase.contains("x-csrftoken: token-1"));
        assert!(request.contains(r#""phone_number":"+12025550123""#));
        assert!(request.contains(r#""description":"Kind and funny""#));
        Ok(())
    }

    #[tokio::test]
    async fn it_reports_rejected_messages() -> Result<(), Error> {
        let (base_url, handle) =
            serve_once("400 Bad Request", r#"{"message":"Slot unavailable"}"#).await;
        let backend = HttpBackend::new(&base_url)?;
        let err = backend.submit_message(&submission()).await.err();
        assert_eq!(err.map(|e| e.to_string()), Some("Slot unavailable".to_owned()));
        let request = handle.await?;
        assert!(!request.to_ascii_lowercase().contains("x-csrftoken"));

        let (base_url, handle) = serve_once("500 Internal Server Error", "oops").await;
        let backend = HttpBackend::new(&base_url)?;
        let err = backend.submit_message(&submission()).await.err();
        assert_eq!(
            err.map(|e| e.to_string()),
            Some("Failed to schedule message".to_owned())
        );
        handle.await?;
        Ok(())
    }

    #[tokio::test]
    async fn it_posts_premium_requests() -> Result<(), Error> {
        let (base_url, handle) = serve_once("200 OK", "{}").await;
        let backend = HttpBackend::new(&base_url)?;
        let request = PremiumRequest {
            request_description: "Serenade".to_owned(),
            contact_number: "+254712345678".to_owned(),
        };
        backend
            .submit_premium(&request)
            .await?;
        let raw = handle.await?;
        assert!(raw.starts_with("POST /api/premium/ HTTP/1.1"));
        assert!(raw.contains(r#""contact_number":"+254712345678""#));

        let (base_url, handle) = serve_once("503 Service Unavailable", "{}").await;
        let backend = HttpBackend::new(&base_url)?;
        let err = backend.submit_premium(&request).await.err();
        assert_eq!(err.map(|e| e.to_string()), Some("Request failed".to_owned()));
        handle.await?;
        Ok(())
    }

    #[cfg(any(feature = "tls-native", feature = "tls-rustls"))]
    #[tokio::test]
    async fn it_speaks_tls_to_https_backends() -> Result<(), Error> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("https://{}", listener.local_addr()?);
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await?;
            let mut content_type = [0u8; 1];
            stream.read_exact(&mut content_type).await?;
            Ok::<u8, std::io::Error>(content_type[0])
        });

        let backend = HttpBackend::new(&base_url)?;
        let request = PremiumRequest {
            request_description: "Serenade".to_owned(),
            contact_number: "+254712345678".to_owned(),
        };
        let err = backend.submit_premium(&request).await.err();
        assert!(err.is_some_and(|err| {
            err.sources()
                .all(|source| !source.message().contains("scheme is not http"))
        }));

        // A TLS record carrying a handshake starts with the content type 22.
        assert_eq!(handle.await??, 0x16);
        Ok(())
    }
}
