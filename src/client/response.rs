//! Status-driven response interpretation
//!
//! Every service call resolves to exactly one of three terminal states: a
//! decoded success body, a structured error body, or an unrecognized status
//! code. Classification happens here, in one place, so no call site branches
//! on raw status numbers and no caller can ever observe both a success and
//! an error payload.

use serde::de::DeserializeOwned;

use crate::client::models::ErrorModel;
use crate::error::{Error, Result};

/// Status codes that carry the structured `{code, message}` error schema
const ERROR_STATUSES: [u16; 2] = [400, 500];

/// Tagged outcome of a single service response
#[derive(Debug)]
pub enum ServiceReply<T> {
    /// The operation's success status with a body matching its schema
    Success(T),
    /// A well-formed service error
    Failure(ErrorModel),
    /// A status code outside the operation's contract; body not inspected
    Unrecognized(u16),
}

impl<T: DeserializeOwned> ServiceReply<T> {
    /// Classify a raw status/body pair against an operation's success code.
    ///
    /// A body that fails to decode under the schema its status promised is a
    /// fatal parse error, even when the status reported success.
    pub fn classify(status: u16, body: &str, success: u16, context: &'static str) -> Result<Self> {
        if status == success {
            return serde_json::from_str(body)
                .map(ServiceReply::Success)
                .map_err(|source| Error::Parse { context, source });
        }
        if ERROR_STATUSES.contains(&status) {
            return serde_json::from_str(body)
                .map(ServiceReply::Failure)
                .map_err(|source| Error::Parse { context, source });
        }
        Ok(ServiceReply::Unrecognized(status))
    }
}

impl<T> ServiceReply<T> {
    /// Collapse the reply into the caller-facing error-or-result shape
    pub fn into_result(self) -> Result<T> {
        match self {
            ServiceReply::Success(value) => Ok(value),
            ServiceReply::Failure(err) => Err(Error::Service {
                code: err.code,
                message: err.message,
            }),
            ServiceReply::Unrecognized(status) => Err(Error::Protocol(status)),
        }
    }
}

/// Decode a response body according to its status code
pub fn interpret<T: DeserializeOwned>(
    status: u16,
    body: &str,
    success: u16,
    context: &'static str,
) -> Result<T> {
    ServiceReply::classify(status, body, success, context)?.into_result()
}

/// Interpret a response whose success carries no meaningful body
pub fn interpret_empty(status: u16, body: &str, success: u16, context: &'static str) -> Result<()> {
    if status == success {
        return Ok(());
    }
    if ERROR_STATUSES.contains(&status) {
        let err: ErrorModel =
            serde_json::from_str(body).map_err(|source| Error::Parse { context, source })?;
        return Err(Error::Service {
            code: err.code,
            message: err.message,
        });
    }
    Err(Error::Protocol(status))
}
