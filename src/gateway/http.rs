//! HTTP client for the contacts REST service.

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::{ContactGateway, GatewayError, GatewayResult};
use crate::models::{Contact, ContactDraft, ContactId};

/// Blocking HTTP gateway speaking JSON to `<base>/contacts`.
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    /// Create a new gateway.
    ///
    /// # Arguments
    /// * `base_url` - Service root, e.g. `http://localhost:3001`
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> GatewayResult<Self> {
        let mut base_url = Url::parse(base_url).map_err(|e| GatewayError::Url(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::Url(format!("{} cannot be a base URL", base_url)));
        }
        // Url::join drops the last segment unless the path ends in a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn collection_url(&self) -> GatewayResult<Url> {
        self.base_url
            .join("contacts")
            .map_err(|e| GatewayError::Url(e.to_string()))
    }

    fn item_url(&self, id: ContactId) -> GatewayResult<Url> {
        self.base_url
            .join(&format!("contacts/{}", id))
            .map_err(|e| GatewayError::Url(e.to_string()))
    }

    fn send(&self, method: &str, url: &Url, req: RequestBuilder) -> GatewayResult<Response> {
        debug!(%method, %url, "contacts request");

        let response = req.send().map_err(|e| {
            warn!(%method, %url, error = %e, "contacts request failed");
            GatewayError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%method, %url, status = status.as_u16(), "contacts service error");
            return Err(GatewayError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
    response
        .json()
        .map_err(|e| GatewayError::Decode(e.to_string()))
}

impl ContactGateway for HttpGateway {
    fn list(&self) -> GatewayResult<Vec<Contact>> {
        let url = self.collection_url()?;
        let response = self.send("GET", &url, self.client.get(url.clone()))?;
        decode(response)
    }

    fn get(&self, id: ContactId) -> GatewayResult<Contact> {
        let url = self.item_url(id)?;
        let response = self.send("GET", &url, self.client.get(url.clone()))?;
        decode(response)
    }

    fn create(&self, draft: &ContactDraft) -> GatewayResult<Contact> {
        let url = self.collection_url()?;
        let response = self.send("POST", &url, self.client.post(url.clone()).json(draft))?;
        decode(response)
    }

    fn update(&self, id: ContactId, draft: &ContactDraft) -> GatewayResult<Contact> {
        let url = self.item_url(id)?;
        let response = self.send("PUT", &url, self.client.put(url.clone()).json(draft))?;
        decode(response)
    }

    fn delete(&self, id: ContactId) -> GatewayResult<Option<Contact>> {
        let url = self.item_url(id)?;
        let response = self.send("DELETE", &url, self.client.delete(url.clone()))?;

        // Some services answer 204 or a bare confirmation instead of the record
        let body = response
            .bytes()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        if body.is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_slice(&body).ok())
    }
}
