use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::parse::CompanyRecord;
use crate::{Error, Result};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper around a `reqwest::Client` that knows where the registry lives.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: Client,
    base_url: String,
}

impl RegistryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Makes exactly one request for `cnpj`. Any failure is returned as is, there are no retries.
    pub async fn lookup(&self, cnpj: &str) -> Result<CompanyRecord> {
        let url = format!("{}{cnpj}", self.base_url);
        debug!("GET {url}");

        let res = self.client.get(&url).send().await?;
        match res.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(Error::RateLimited),
            status if !status.is_success() => return Err(Error::Status(status.as_u16())),
            _ => {}
        }

        let body = res.bytes().await?;
        let record: CompanyRecord = serde_json::from_slice(&body)?;
        record.check_status()
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn client_for(server: &MockServer) -> RegistryClient {
        RegistryClient::new(&format!("{}/v1/cnpj/", server.uri()), Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn lookup_decodes_partners() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/cnpj/11222333000181"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "nome": "ACME LTDA",
                "qsa": [{"nome": "Ana Silva", "qual": "49-Sócio-Administrador"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let record = client_for(&server)
            .await
            .lookup("11222333000181")
            .await
            .unwrap();
        assert_eq!(record.nome.as_deref(), Some("ACME LTDA"));
        assert_eq!(record.partners().len(), 1);
    }

    #[tokio::test]
    async fn lookup_maps_rate_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).await.lookup("1").await.unwrap_err();
        assert!(matches!(err, Error::RateLimited));
    }

    #[tokio::test]
    async fn lookup_maps_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).await.lookup("1").await.unwrap_err();
        assert!(matches!(err, Error::Status(503)));
    }

    #[tokio::test]
    async fn lookup_rejects_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.lookup("1").await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[tokio::test]
    async fn lookup_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "OK"}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client =
            RegistryClient::new(&format!("{}/", server.uri()), Duration::from_millis(50)).unwrap();
        let err = client.lookup("1").await.unwrap_err();
        assert!(matches!(err, Error::Reqwest(e) if e.is_timeout()));
    }
}
