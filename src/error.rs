// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error as StdError, io, result};

use reqwest::StatusCode;
use thiserror::Error;

use crate::model::ErrorBody;

pub(crate) type Result<T, E = Error> = result::Result<T, E>;

#[derive(Error, Debug)]
pub(crate) enum Error {
    #[error("IO operation failed: {0}")]
    Io(#[from] io::Error),
    #[error("JSON format error: {0}")]
    Json(serde_json::Error),
    #[error("could not reach the server: {0}")]
    Network(#[source] Box<dyn StdError + Send + Sync>),
    #[error("API error: {0}")]
    Api(#[from] Api),
    #[error("operation cancelled")]
    Cancelled,
}

impl Error {
    pub(crate) fn network<E: StdError + Send + Sync + 'static>(e: E) -> Self {
        Self::Network(Box::new(e))
    }

    /// The API failure carried by this error, if the server answered at all.
    #[cfg(test)]
    pub(crate) const fn as_api(&self) -> Option<&Api> {
        match self {
            Self::Api(e) => Some(e),
            Self::Io(_)
            | Self::Json(_)
            | Self::Network(_)
            | Self::Cancelled => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        // LINT: Deliberate fall-through that should catch future cases added to
        // the enum.
        #[allow(clippy::wildcard_enum_match_arm)]
        match value.classify() {
            serde_json::error::Category::Io => Self::Io(value.into()),
            _ => Self::Json(value),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Io(value.into())
    }
}

/// A response that arrived with a non-success status.
#[derive(Error, Debug)]
#[error("server responded with {status}: {}", .body.summary())]
pub(crate) struct Api {
    pub(crate) status: StatusCode,
    pub(crate) body: ErrorBody,
}

impl Api {
    pub(crate) const fn new(status: StatusCode, body: ErrorBody) -> Self {
        Self { status, body }
    }

    /// The session is no longer accepted by the server.
    pub(crate) fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED || self.status == StatusCode::FORBIDDEN
    }

    pub(crate) fn is_conflict(&self) -> bool {
        self.status == StatusCode::CONFLICT
    }

    /// The `error` field, which most endpoints use for their failure text.
    pub(crate) fn error(&self) -> &str {
        self.body.error.as_deref().unwrap_or("")
    }

    /// The `message` field, falling back to `error`. Enrollment endpoints
    /// answer with a message instead of an error.
    pub(crate) fn message(&self) -> &str {
        self.body
            .message
            .as_deref()
            .or(self.body.error.as_deref())
            .unwrap_or("")
    }
}
