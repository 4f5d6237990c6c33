//! `reqwest` transport, usable natively and from WASM through `fetch`.

use async_trait::async_trait;
use coax_common::JsonObject;
use serde_json::Value;

use crate::error::{PanelError, PanelResult};
use crate::traits::{HttpApi, ResponseStatus};

pub struct ReqwestApi {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestApi {
    /// `base_url` is the backend origin, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn transport_error(path: &str, err: reqwest::Error) -> PanelError {
    PanelError::Http {
        path: path.to_string(),
        message: err.to_string(),
    }
}

#[async_trait(?Send)]
impl HttpApi for ReqwestApi {
    async fn get_json(&self, path: &str) -> PanelResult<JsonObject> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| transport_error(path, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PanelError::HttpStatus {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| transport_error(path, e))?;
        match serde_json::from_str(&body)? {
            Value::Object(map) => Ok(map),
            _ => Err(PanelError::NotAnObject(path.to_string())),
        }
    }

    async fn post_form(&self, path: &str, form: &[(String, String)]) -> PanelResult<ResponseStatus> {
        let response = self
            .client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .map_err(|e| transport_error(path, e))?;
        Ok(ResponseStatus(response.status().as_u16()))
    }

    async fn post_empty(&self, path: &str) -> PanelResult<ResponseStatus> {
        let response = self
            .client
            .post(self.url(path))
            .send()
            .await
            .map_err(|e| transport_error(path, e))?;
        Ok(ResponseStatus(response.status().as_u16()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coax_common::endpoints;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Read one request: headers plus a `Content-Length` body.
    async fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let length = text[..head_end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= head_end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8(buf).unwrap()
    }

    /// Answer a single request with `status` and `body`; the handle yields
    /// the raw request text.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            request
        });
        (format!("http://{addr}"), handle)
    }

    fn local_api(base: String) -> ReqwestApi {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        ReqwestApi::with_client(client, base)
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let api = ReqwestApi::new("http://localhost:8080/");
        assert_eq!(api.url(endpoints::REFRESH), "http://localhost:8080/refresh");
        let api = ReqwestApi::new("http://10.0.0.5:8080");
        assert_eq!(api.url(endpoints::CONFIG), "http://10.0.0.5:8080/config");
    }

    #[tokio::test]
    async fn test_get_json_returns_object() {
        let (base, server) = serve_once("200 OK", r#"{"control_state":"Stopped"}"#).await;
        let api = local_api(base);

        let body = api.get_json(endpoints::REFRESH).await.unwrap();
        assert_eq!(body["control_state"], "Stopped");
        let request = server.await.unwrap();
        assert!(request.starts_with("GET /refresh HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_get_json_non_success_is_status_error() {
        let (base, server) = serve_once("500 Internal Server Error", "{}").await;
        let api = local_api(base);

        let err = api.get_json(endpoints::CONFIG).await.unwrap_err();
        assert!(matches!(
            err,
            PanelError::HttpStatus { ref path, status: 500 } if path == endpoints::CONFIG
        ));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_get_json_array_is_not_an_object() {
        let (base, server) = serve_once("200 OK", "[1,2]").await;
        let api = local_api(base);

        let err = api.get_json(endpoints::OPCUA).await.unwrap_err();
        assert!(matches!(err, PanelError::NotAnObject(ref path) if path == endpoints::OPCUA));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_post_form_is_urlencoded() {
        let (base, server) = serve_once("200 OK", "").await;
        let api = local_api(base);
        let form = vec![
            ("cycle_time".to_string(), "500".to_string()),
            ("serial_device".to_string(), "/dev/ttyACM0".to_string()),
        ];

        let status = api.post_form(endpoints::CONFIG, &form).await.unwrap();
        assert_eq!(status, ResponseStatus(200));

        let request = server.await.unwrap();
        let lower = request.to_ascii_lowercase();
        assert!(request.starts_with("POST /config HTTP/1.1"));
        assert!(lower.contains("content-type: application/x-www-form-urlencoded"));
        assert!(request.ends_with("cycle_time=500&serial_device=%2Fdev%2FttyACM0"));
    }

    #[tokio::test]
    async fn test_post_empty_reports_status() {
        let (base, server) = serve_once("409 Conflict", "").await;
        let api = local_api(base);

        let status = api.post_empty(endpoints::START).await.unwrap();
        assert_eq!(status, ResponseStatus(409));
        assert!(!status.is_success());
        assert!(server.await.unwrap().starts_with("POST /start HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let api = local_api(format!("http://{addr}"));

        let err = api.post_empty(endpoints::STOP).await.unwrap_err();
        assert!(matches!(err, PanelError::Http { ref path, .. } if path == endpoints::STOP));
    }
}
