// Copyright 2026 Element Creations Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use serde::{Deserialize, Serialize};

/// An outgoing GraphQL operation for a downstream subgraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubgraphRequest {
    query: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    operation_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<serde_json::Value>,
}

impl SubgraphRequest {
    /// Create a request for the given query document.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            operation_name: None,
            variables: None,
        }
    }

    /// Name the operation to execute within the document.
    #[must_use]
    pub fn with_operation_name(mut self, operation_name: impl Into<String>) -> Self {
        self.operation_name = Some(operation_name.into());
        self
    }

    /// Attach variables to the operation.
    #[must_use]
    pub fn with_variables(mut self, variables: serde_json::Value) -> Self {
        self.variables = Some(variables);
        self
    }

    /// The query document text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The name of the operation to execute, if any.
    #[must_use]
    pub fn operation_name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }

    /// The operation variables, if any.
    #[must_use]
    pub fn variables(&self) -> Option<&serde_json::Value> {
        self.variables.as_ref()
    }
}

/// Read-only view of one outgoing call, handed to the request hook: the
/// operation being sent plus whatever ambient context the gateway attached
/// to the inbound request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request: SubgraphRequest,
    context: serde_json::Value,
}

impl RequestContext {
    /// Create a context for the given request, with no ambient context.
    #[must_use]
    pub fn new(request: SubgraphRequest) -> Self {
        Self {
            request,
            context: serde_json::Value::Null,
        }
    }

    /// Attach the gateway's ambient context for this call.
    #[must_use]
    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = context;
        self
    }

    /// The operation being sent.
    #[must_use]
    pub fn request(&self) -> &SubgraphRequest {
        &self.request
    }

    /// The ambient context attached by the gateway.
    #[must_use]
    pub fn context(&self) -> &serde_json::Value {
        &self.context
    }
}
