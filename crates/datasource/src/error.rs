// Copyright 2026 Element Creations Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use http::StatusCode;
use thiserror::Error;

/// All possible errors constructed by a data source.
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// The downstream service answered with an error status code.
    #[error("{status}: {message}")]
    UpstreamStatus {
        /// The HTTP status code of the response.
        status: StatusCode,

        /// An excerpt of the response body, or the status reason phrase when
        /// the body is empty.
        message: String,
    },

    /// The response declared a JSON body which did not parse.
    #[error("invalid JSON body in subgraph response")]
    InvalidBody(#[from] serde_json::Error),

    /// The response body is not valid UTF-8.
    #[error("subgraph response body is not valid UTF-8")]
    BodyEncoding(#[from] std::string::FromUtf8Error),
}

impl DataSourceError {
    /// The HTTP status code this error was constructed from, if any.
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::UpstreamStatus { status, .. } => Some(*status),
            Self::InvalidBody(_) | Self::BodyEncoding(_) => None,
        }
    }
}
