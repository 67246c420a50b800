//! HTTP client wrapper - typed requests against the address service

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::TransportError;
use crate::models::{Address, Transaction};

/// Build a path whose last segment is a percent-encoded identity key
pub fn resource_path(collection: &str, key: &str) -> String {
    format!("/{}/{}", collection, urlencoding::encode(key))
}

/// Client for the remote address/transaction service
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        ApiClient {
            http: create_client(timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a JSON array
    pub async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, TransportError> {
        let value = send(self.http.get(self.url(path))).await?;
        serde_json::from_value(value).map_err(|e| TransportError::Decode(e.to_string()))
    }

    /// POST a JSON body
    pub async fn create(&self, path: &str, body: Value) -> Result<Value, TransportError> {
        send(self.http.post(self.url(path)).json(&body)).await
    }

    /// DELETE a single resource
    pub async fn delete_one(&self, path: &str) -> Result<Value, TransportError> {
        send(self.http.delete(self.url(path))).await
    }

    pub async fn list_addresses(&self) -> Result<Vec<Address>, TransportError> {
        self.fetch_list("/addresses").await
    }

    pub async fn add_address(&self, address: &str) -> Result<(), TransportError> {
        self.create("/addresses", json!({ "address": address }))
            .await
            .map(|_| ())
    }

    pub async fn remove_address(&self, address: &str) -> Result<(), TransportError> {
        self.delete_one(&resource_path("addresses", address))
            .await
            .map(|_| ())
    }

    pub async fn sync_address(&self, address: &str) -> Result<(), TransportError> {
        self.create(&resource_path("sync", address), json!({}))
            .await
            .map(|_| ())
    }

    pub async fn list_transactions(&self, address: &str) -> Result<Vec<Transaction>, TransportError> {
        self.fetch_list(&resource_path("transactions", address)).await
    }
}

/// Send a request and read the body. Non-success statuses keep the raw body text.
async fn send(req_builder: reqwest::RequestBuilder) -> Result<Value, TransportError> {
    let resp = req_builder.send().await.map_err(describe)?;
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| TransportError::Network(format!("Error reading body: {}", e)))?;

    if !status.is_success() {
        return Err(TransportError::Status {
            status: status.as_u16(),
            body,
        });
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))
}

fn describe(e: reqwest::Error) -> TransportError {
    let msg = if e.is_timeout() {
        "Request timed out".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        format!("Request failed: {}", e)
    };
    TransportError::Network(msg)
}

/// Create an HTTP client. Without a timeout a stalled request waits indefinitely.
pub fn create_client(timeout: Option<Duration>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TxType;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_resource_path_encodes_key() {
        assert_eq!(resource_path("sync", "1A1zP1"), "/sync/1A1zP1");
        assert_eq!(resource_path("addresses", "a/b c"), "/addresses/a%2Fb%20c");
    }

    #[tokio::test]
    async fn test_list_addresses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/addresses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"address": "1A1zP1", "balance": 0.5, "last_synced": "2024-01-01T00:00:00"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), None);
        let addresses = client.list_addresses().await.unwrap();
        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses[0].address, "1A1zP1");
        assert_eq!(addresses[0].balance, "0.5");
    }

    #[tokio::test]
    async fn test_add_posts_address_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/addresses"))
            .and(body_json(json!({"address": "bc1qxyz"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "Address added"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), None);
        client.add_address("bc1qxyz").await.unwrap();
    }

    #[tokio::test]
    async fn test_error_status_keeps_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/addresses"))
            .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":"Address already exists"}"#))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), None);
        let err = client.add_address("dup").await.unwrap_err();
        assert_eq!(
            err,
            TransportError::Status {
                status: 400,
                body: r#"{"error":"Address already exists"}"#.to_string()
            }
        );
        assert_eq!(crate::error::normalize_error(&err), "Address already exists");
    }

    #[tokio::test]
    async fn test_remove_and_sync_use_encoded_paths() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/addresses/a%20b"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Address removed"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/sync/a%20b"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), None);
        client.remove_address("a b").await.unwrap();
        client.sync_address("a b").await.unwrap();
    }

    #[tokio::test]
    async fn test_list_transactions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transactions/1A1zP1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"tx_hash": "abc", "timestamp": "2024-01-01T00:00:00Z", "type": "incoming", "amount": "0.5"}
            ])))
            .mount(&server)
            .await;

        let client = ApiClient::new(&format!("{}/", server.uri()), None);
        let txs = client.list_transactions("1A1zP1").await.unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].kind, TxType::Incoming);
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/addresses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"addresses": []})))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), None);
        let err = client.list_addresses().await.unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = ApiClient::new(&format!("http://127.0.0.1:{}", port), Some(Duration::from_secs(5)));
        let err = client.list_addresses().await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }
}
