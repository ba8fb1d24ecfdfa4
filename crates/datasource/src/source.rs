// Copyright 2026 Element Creations Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    context::RequestContext,
    error::DataSourceError,
    response::{ResponseBody, SubgraphResponse},
};

/// How much of an error response body ends up in the constructed error.
const ERROR_BODY_EXCERPT_LEN: usize = 256;

/// Configuration bag for a subgraph data source.
///
/// Stored as-is and handed back through [`SubgraphDataSource::config`];
/// nothing in here changes how responses are handled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSourceConfig {
    /// Human-readable name of the subgraph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Endpoint the gateway dispatches this subgraph's operations to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
}

/// How to call one downstream subgraph service.
///
/// The gateway's dispatch machinery drives the three lifecycle hooks: for
/// each outgoing call, [`RemoteDataSource::on_request`] before the transport
/// call, then exactly one of [`RemoteDataSource::parse_response_body`] (on a
/// non-error HTTP outcome) or [`RemoteDataSource::error_from_response`] (on
/// an error outcome). Which terminal hook fires is the caller's decision,
/// never the data source's.
#[async_trait]
pub trait RemoteDataSource: Send + Sync {
    /// Called before the outgoing request is dispatched, e.g. to decorate it.
    async fn on_request(&self, context: &RequestContext) {
        let _ = context;
    }

    /// Parse the body of a non-error response.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be decoded.
    async fn parse_response_body(
        &self,
        response: SubgraphResponse,
    ) -> Result<ResponseBody, DataSourceError>;

    /// Build the application-level error value for an error response.
    async fn error_from_response(&self, response: SubgraphResponse) -> DataSourceError;
}

/// The default behavior for calling a subgraph: JSON bodies parse into a
/// document, other content types come back as text, and error responses
/// become [`DataSourceError::UpstreamStatus`] values.
#[derive(Debug, Clone, Default)]
pub struct SubgraphDataSource {
    config: DataSourceConfig,
}

impl SubgraphDataSource {
    /// Create a data source with the given configuration, if any.
    #[must_use]
    pub fn new(config: Option<DataSourceConfig>) -> Self {
        Self {
            config: config.unwrap_or_default(),
        }
    }

    /// The configuration this data source was built with.
    #[must_use]
    pub fn config(&self) -> &DataSourceConfig {
        &self.config
    }
}

#[async_trait]
impl RemoteDataSource for SubgraphDataSource {
    async fn parse_response_body(
        &self,
        response: SubgraphResponse,
    ) -> Result<ResponseBody, DataSourceError> {
        if response.has_json_body() {
            Ok(ResponseBody::Json(serde_json::from_slice(response.body())?))
        } else {
            Ok(ResponseBody::Text(String::from_utf8(
                response.into_body().to_vec(),
            )?))
        }
    }

    async fn error_from_response(&self, response: SubgraphResponse) -> DataSourceError {
        let status = response.status();
        let body = String::from_utf8_lossy(response.body());
        let message = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_owned()
        } else {
            excerpt(&body)
        };

        DataSourceError::UpstreamStatus { status, message }
    }
}

fn excerpt(body: &str) -> String {
    if body.len() <= ERROR_BODY_EXCERPT_LEN {
        return body.to_owned();
    }

    let mut end = ERROR_BODY_EXCERPT_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}…", &body[..end])
}
