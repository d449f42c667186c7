//! Build and (optionally) send queries to the Violet servers.
//!
//! A query owns an event plus the target rabbit's serial and token, and
//! assembles the complete GET URL. With the `http` feature it also performs
//! the blocking GET and parses the reply.

use crate::event::{Event, EventError};

/// Main API endpoint.
pub const API_URL: &str = "http://api.nabaztag.com/vl/FR/api.jsp";
/// Endpoint for streamed events.
pub const APISTREAM_URL: &str = "http://api.nabaztag.com/vl/FR/api_stream.jsp";

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Event(#[from] EventError),
    #[cfg(feature = "http")]
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    #[cfg(feature = "http")]
    #[error(transparent)]
    Protocol(#[from] crate::response::ProtocolError),
}

/// One query: an event to send and the serial/token of the target rabbit.
#[derive(Debug)]
pub struct Query<E: Event> {
    event: E,
    serial: String,
    token: String,
}

impl<E: Event> Query<E> {
    pub fn new(event: E, serial: impl Into<String>, token: impl Into<String>) -> Self {
        Query {
            event,
            serial: serial.into(),
            token: token.into(),
        }
    }

    pub fn event(&self) -> &E {
        &self.event
    }

    /// The complete GET URL for this query.
    pub fn to_url(&self) -> Result<String, EventError> {
        let opts = self.event.to_query()?.join("&");
        let base = if self.event.streamed() {
            APISTREAM_URL
        } else {
            API_URL
        };
        Ok(format!(
            "{}?sn={}&token={}&{}",
            base, self.serial, self.token, opts
        ))
    }

    /// Send the query and parse the reply.
    #[cfg(feature = "http")]
    pub fn send(&self) -> Result<crate::response::ServerRsp, QueryError> {
        let body = self.send_raw()?;
        Ok(crate::response::parse(&body)?)
    }

    /// Send the query and return the raw XML body.
    #[cfg(feature = "http")]
    pub fn send_raw(&self) -> Result<String, QueryError> {
        let url = self.to_url()?;
        tracing::debug!(%url, "sending query");
        Ok(reqwest::blocking::get(&url)?.text()?)
    }
}
