//! Error types for marquee.
//!
//! This module provides a unified error type with explicit variants for
//! transport, gateway, validation and input errors.

use std::fmt;
use thiserror::Error;

use crate::media::FieldError;

/// The unified error type for marquee operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, undecodable body).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-success responses from the media gateway.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Client-side draft validation errors.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Input validation errors (invalid URL, id, category text).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the detail worth showing a user verbatim, if there is one.
    ///
    /// This is the gateway's own error text, or the list of failed fields
    /// for a validation error. Transport and input errors have none.
    pub fn detail(&self) -> Option<String> {
        match self {
            Error::Gateway(err) => err.detail().map(str::to_string),
            Error::Validation(err) => Some(err.to_string()),
            _ => None,
        }
    }

    /// Returns true if the gateway reported the record as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Gateway(err) if err.is_not_found())
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Response body could not be decoded.
    #[error("invalid response body: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Error response returned by the gateway.
#[derive(Debug)]
pub struct GatewayError {
    /// HTTP status code.
    pub status: u16,
    /// The `error` field of the response body, if present.
    pub error: Option<String>,
    /// The `message` field of the response body, if present.
    pub message: Option<String>,
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(detail) = self.detail() {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for GatewayError {}

impl GatewayError {
    /// Create a new gateway error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// The server-supplied detail, preferring `error` over `message`.
    pub fn detail(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    /// Check if the gateway does not know the requested record.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Field-level problems found in a draft before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Every failing field, in form order.
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    /// Returns the error for a given wire field name, if any.
    pub fn field(&self, name: &str) -> Option<&FieldError> {
        self.fields.iter().find(|f| f.field == name)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.fields.iter().map(|f| f.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid gateway URL.
    #[error("invalid gateway URL '{value}': {reason}")]
    GatewayUrl { value: String, reason: String },

    /// Invalid media id.
    #[error("invalid media id '{value}': {reason}")]
    MediaId { value: String, reason: String },

    /// Unknown media category.
    #[error("unknown category '{value}' (expected 'Movie' or 'TV Show')")]
    Category { value: String },

    /// Poster file could not be used.
    #[error("invalid poster '{path}': {reason}")]
    Poster { path: String, reason: String },
}
