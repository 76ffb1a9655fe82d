//! HTTP clients for the gateway, blocking ([`GatewayClient`]) and async ([`AsyncGatewayClient`]).
//!
//! Both are thin: one request per call, no retries, no reconnects. Any status other than the one an endpoint answers
//! with on success is an [`UnexpectedStatus`][ClientError::UnexpectedStatus] error.

use std::io::BufReader;

use http_body_util::BodyDataStream;
use reqwest::{
    Body, StatusCode,
    header::{ACCEPT, HeaderValue},
};

use crate::{
    errors::ClientError,
    event::Event,
    frame_reader::{FrameReader, FrameStream},
    gateway::{
        EVENT_STREAM_MIME, HEALTH_PATH, HealthStatus, ID_HEADER, PUBLISH_PATH, Publication,
        PublishReceipt, STREAM_PATH, Subscription, TOPIC_HEADER,
    },
};

/// A successful publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub status: StatusCode,
    /// Raw response body, a JSON receipt
    pub body: String,
}

impl Published {
    pub fn receipt(&self) -> Result<PublishReceipt, serde_path_to_error::Error<serde_json::Error>> {
        PublishReceipt::parse(&self.body)
    }
}

fn normalize_base_url(url: String) -> String {
    match url.strip_suffix('/') {
        Some(trimmed) => trimmed.to_owned(),
        None => url,
    }
}

fn unexpected(operation: &'static str, status: StatusCode, body: String) -> ClientError {
    tracing::debug!(operation, status = status.as_u16(), "unexpected status");
    ClientError::UnexpectedStatus {
        operation,
        status,
        body,
    }
}

/// Blocking gateway client
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::blocking::Client::new(), base_url)
    }

    /// Use an already configured [`reqwest::blocking::Client`], e.g. one with timeouts or TLS settings
    pub fn with_client(http: reqwest::blocking::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /v1/publish`, expects `202 Accepted`
    pub fn publish(&self, publication: &Publication) -> Result<Published, ClientError> {
        tracing::debug!(
            topics = %publication.topics,
            id = %publication.event_id,
            "publishing event"
        );
        let response = self
            .http
            .post(format!("{}{PUBLISH_PATH}", self.base_url))
            .bearer_auth(&publication.api_key)
            .header(TOPIC_HEADER, publication.topics.to_header_value())
            .header(ID_HEADER, publication.event_id.as_str())
            .body(publication.payload.clone())
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if status != StatusCode::ACCEPTED {
            return Err(unexpected("publish", status, body));
        }

        Ok(Published { status, body })
    }

    /// `GET /v1/stream`, expects `200 OK`. The returned reader owns the response; dropping it closes the connection.
    pub fn subscribe(
        &self,
        subscription: &Subscription,
    ) -> Result<FrameReader<BufReader<reqwest::blocking::Response>>, ClientError> {
        tracing::debug!(topics = %subscription.topics, "opening event stream");
        let mut request = self
            .http
            .get(format!("{}{STREAM_PATH}", self.base_url))
            .header(ACCEPT, HeaderValue::from_static(EVENT_STREAM_MIME))
            .header(TOPIC_HEADER, subscription.topics.to_header_value());
        if let Some(subscriber_id) = &subscription.subscriber_id {
            request = request.header(ID_HEADER, subscriber_id.as_str());
        }

        let response = request.send()?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(unexpected("subscribe", status, String::new()));
        }

        Ok(FrameReader::from_read(response))
    }

    /// Subscribes and waits for the first complete event, then drops the connection
    pub fn subscribe_first(&self, subscription: &Subscription) -> Result<Event, ClientError> {
        Ok(self.subscribe(subscription)?.first_event()?)
    }

    /// `GET /healthz`
    pub fn health(&self) -> Result<HealthStatus, ClientError> {
        let response = self
            .http
            .get(format!("{}{HEALTH_PATH}", self.base_url))
            .send()?;
        let status = response.status();
        let body = response.text()?;
        if status != StatusCode::OK {
            return Err(unexpected("health check", status, body));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Convert a [`Response`][::reqwest::Response] into a [`FrameStream`] via a similar mechanism to [::reqwest::Response::bytes_stream]
pub fn response_to_stream(response: reqwest::Response) -> FrameStream<BodyDataStream<Body>> {
    FrameStream::new(BodyDataStream::new(Body::from(response)))
}

/// Async gateway client, same operations as [`GatewayClient`]
#[derive(Debug, Clone)]
pub struct AsyncGatewayClient {
    http: reqwest::Client,
    base_url: String,
}

impl AsyncGatewayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /v1/publish`, expects `202 Accepted`
    pub async fn publish(&self, publication: &Publication) -> Result<Published, ClientError> {
        tracing::debug!(
            topics = %publication.topics,
            id = %publication.event_id,
            "publishing event"
        );
        let response = self
            .http
            .post(format!("{}{PUBLISH_PATH}", self.base_url))
            .bearer_auth(&publication.api_key)
            .header(TOPIC_HEADER, publication.topics.to_header_value())
            .header(ID_HEADER, publication.event_id.as_str())
            .body(publication.payload.clone())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::ACCEPTED {
            return Err(unexpected("publish", status, body));
        }

        Ok(Published { status, body })
    }

    /// `GET /v1/stream`, expects `200 OK`. Every event on the connection comes out of the returned stream.
    pub async fn subscribe(
        &self,
        subscription: &Subscription,
    ) -> Result<FrameStream<BodyDataStream<Body>>, ClientError> {
        tracing::debug!(topics = %subscription.topics, "opening event stream");
        let mut request = self
            .http
            .get(format!("{}{STREAM_PATH}", self.base_url))
            .header(ACCEPT, HeaderValue::from_static(EVENT_STREAM_MIME))
            .header(TOPIC_HEADER, subscription.topics.to_header_value());
        if let Some(subscriber_id) = &subscription.subscriber_id {
            request = request.header(ID_HEADER, subscriber_id.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(unexpected("subscribe", status, String::new()));
        }

        Ok(response_to_stream(response))
    }

    /// Subscribes and waits for the first complete event, then drops the connection
    pub async fn subscribe_first(&self, subscription: &Subscription) -> Result<Event, ClientError> {
        Ok(self.subscribe(subscription).await?.first_event().await?)
    }

    /// `GET /healthz`
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let response = self
            .http
            .get(format!("{}{HEALTH_PATH}", self.base_url))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            return Err(unexpected("health check", status, body));
        }
        Ok(serde_json::from_str(&body)?)
    }
}
