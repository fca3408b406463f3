//! HTTP client for the media gateway.

use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use marquee_core::error::{Error, GatewayError, TransportError};
use marquee_core::{GatewayUrl, Result};

use crate::endpoints::ErrorResponse;

/// Map a reqwest failure onto the transport error taxonomy.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let message = err.to_string();
    let transport = if err.is_timeout() {
        TransportError::Timeout { message }
    } else if err.is_connect() {
        TransportError::Connection { message }
    } else if err.is_decode() {
        TransportError::Decode { message }
    } else {
        TransportError::Http { message }
    };
    Error::Transport(transport)
}

/// HTTP client bound to one gateway.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    gateway: GatewayUrl,
}

impl HttpClient {
    /// Create a client with no request timeout.
    pub fn new(gateway: GatewayUrl) -> Result<Self> {
        Self::build(gateway, None)
    }

    /// Create a client that gives up on requests after `timeout`.
    pub fn with_timeout(gateway: GatewayUrl, timeout: Duration) -> Result<Self> {
        Self::build(gateway, Some(timeout))
    }

    fn build(gateway: GatewayUrl, timeout: Option<Duration>) -> Result<Self> {
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("marquee/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(transport_error)?;

        Ok(Self { client, gateway })
    }

    /// Returns the gateway this client is configured for.
    pub fn gateway(&self) -> &GatewayUrl {
        &self.gateway
    }

    /// GET an endpoint.
    #[instrument(skip(self), fields(gateway = %self.gateway))]
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let url = self.gateway.endpoint(path);
        debug!(%url, "GET");

        self.send(self.client.get(&url)).await
    }

    /// GET an endpoint with query parameters.
    #[instrument(skip(self), fields(gateway = %self.gateway))]
    pub async fn get_with_query<Q, R>(&self, path: &str, params: &Q) -> Result<R>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.gateway.endpoint(path);
        debug!(%url, "GET");
        trace!(?params, "query parameters");

        self.send(self.client.get(&url).query(params)).await
    }

    /// Send a JSON body.
    #[instrument(skip(self, body), fields(gateway = %self.gateway))]
    pub async fn send_json<B, R>(&self, method: Method, path: &str, body: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.gateway.endpoint(path);
        debug!(%method, %url, "JSON request");

        self.send(self.client.request(method, &url).json(body)).await
    }

    /// Send a multipart form.
    #[instrument(skip(self, form), fields(gateway = %self.gateway))]
    pub async fn send_multipart<R>(&self, method: Method, path: &str, form: Form) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.gateway.endpoint(path);
        debug!(%method, %url, "multipart request");

        self.send(self.client.request(method, &url).multipart(form)).await
    }

    /// DELETE an endpoint, ignoring any response body.
    #[instrument(skip(self), fields(gateway = %self.gateway))]
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.gateway.endpoint(path);
        debug!(%url, "DELETE");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        trace!(status = %status, "response");
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Gateway(Self::parse_error_response(response).await))
        }
    }

    async fn send<R: DeserializeOwned>(&self, request: RequestBuilder) -> Result<R> {
        let response = request.send().await.map_err(transport_error)?;
        self.handle_response(response).await
    }

    /// Handle a response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(&self, response: reqwest::Response) -> Result<R> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            response.json::<R>().await.map_err(transport_error)
        } else {
            Err(Error::Gateway(Self::parse_error_response(response).await))
        }
    }

    /// Parse an error body, keeping only the status if it is not JSON.
    async fn parse_error_response(response: reqwest::Response) -> GatewayError {
        let status = response.status().as_u16();

        match response.json::<ErrorResponse>().await {
            Ok(body) => GatewayError::new(status, body.error, body.message),
            Err(_) => GatewayError::new(status, None, None),
        }
    }
}
