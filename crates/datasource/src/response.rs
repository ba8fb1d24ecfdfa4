// Copyright 2026 Element Creations Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Response, StatusCode, header::CONTENT_TYPE};

/// A downstream subgraph response, with its body not yet parsed.
#[derive(Debug)]
pub struct SubgraphResponse {
    inner: Response<Bytes>,
}

impl SubgraphResponse {
    /// Wrap a response with the given status and body, and no headers.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        let mut response = Response::new(body.into());
        *response.status_mut() = status;

        Self { inner: response }
    }

    /// Wrap a response with the given status and a JSON body.
    #[must_use]
    pub fn json(status: StatusCode, body: impl Into<Bytes>) -> Self {
        let mut response = Self::new(status, body);
        response
            .inner
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        response
    }

    /// The HTTP status code of the response.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// The response headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// The raw, unparsed body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        self.inner.body()
    }

    /// Consume the response, keeping the raw body.
    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.inner.into_body()
    }

    /// Whether the response declares a JSON content type, including `+json`
    /// suffixed types like `application/graphql-response+json`.
    #[must_use]
    pub fn has_json_body(&self) -> bool {
        let Some(content_type) = self.headers().get(CONTENT_TYPE) else {
            return false;
        };
        let Ok(content_type) = content_type.to_str() else {
            return false;
        };
        let Ok(mime) = content_type.parse::<mime::Mime>() else {
            return false;
        };

        mime.type_() == mime::APPLICATION
            && (mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON))
    }
}

impl From<Response<Bytes>> for SubgraphResponse {
    fn from(inner: Response<Bytes>) -> Self {
        Self { inner }
    }
}

/// A parsed response payload.
///
/// JSON bodies parse into a value; anything else comes back as text, which is
/// what downstream services actually send for non-GraphQL error pages.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// The parsed JSON document.
    Json(serde_json::Value),

    /// The body as text, for non-JSON content types.
    Text(String),
}

impl ResponseBody {
    /// The parsed JSON document, if the body was JSON.
    #[must_use]
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// The body text, if the body was not JSON.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }
}
