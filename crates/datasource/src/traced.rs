// Copyright 2026 Element Creations Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use async_trait::async_trait;
use opentelemetry::KeyValue;
use opentelemetry_semantic_conventions::attribute::GRAPHQL_DOCUMENT;
use sgw_trace::{CanonicalCode, Span, SpanKind, SpanOptions, Tracer};

use crate::{
    context::RequestContext,
    error::DataSourceError,
    response::{ResponseBody, SubgraphResponse},
    source::{DataSourceConfig, RemoteDataSource, SubgraphDataSource},
};

/// Name of the span covering one outgoing subgraph request.
pub const GRAPHQL_REQUEST_SPAN_NAME: &str = "graphql-request";

/// A [`RemoteDataSource`] layering tracing over another one.
///
/// The request hook starts a client span, parented under whatever span is
/// current when the call begins, carrying the outgoing query text. Whichever
/// terminal hook fires ends that span: body parsing ends it with its status
/// unset, error construction maps the HTTP status to a canonical code, sets
/// it, then ends the span. Request and response handling itself is entirely
/// the wrapped data source's.
///
/// Tracer faults are not caught here: a tracer that panics or misbehaves
/// surfaces to the caller rather than being silently dropped.
#[derive(Clone, Debug)]
pub struct TracedDataSource<S, T> {
    tracer: T,
    inner: S,
}

impl<T: Tracer> TracedDataSource<SubgraphDataSource, T> {
    /// Trace the default subgraph behavior, passing `config` through to it
    /// untouched.
    #[must_use]
    pub fn new(tracer: T, config: Option<DataSourceConfig>) -> Self {
        Self::wrapping(tracer, SubgraphDataSource::new(config))
    }
}

impl<S, T> TracedDataSource<S, T> {
    /// Layer tracing over an existing data source.
    #[must_use]
    pub fn wrapping(tracer: T, inner: S) -> Self {
        Self { tracer, inner }
    }

    /// The wrapped data source.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S, T> RemoteDataSource for TracedDataSource<S, T>
where
    S: RemoteDataSource,
    T: Tracer,
{
    async fn on_request(&self, context: &RequestContext) {
        let parent = self.tracer.current_span();
        let options = SpanOptions::new()
            .with_parent(parent)
            .with_kind(SpanKind::Client)
            .with_attribute(KeyValue::new(
                GRAPHQL_DOCUMENT,
                context.request().query().to_owned(),
            ));
        self.tracer.start_span(GRAPHQL_REQUEST_SPAN_NAME, options);

        tracing::debug!(
            operation = context.request().operation_name(),
            "started subgraph request span"
        );

        self.inner.on_request(context).await;
    }

    async fn parse_response_body(
        &self,
        response: SubgraphResponse,
    ) -> Result<ResponseBody, DataSourceError> {
        // Reaching body parsing implies a non-error HTTP outcome; the span
        // closes with its status unset.
        if let Some(span) = self.tracer.current_span() {
            span.end();
        }

        self.inner.parse_response_body(response).await
    }

    async fn error_from_response(&self, response: SubgraphResponse) -> DataSourceError {
        if let Some(span) = self.tracer.current_span() {
            span.set_status(CanonicalCode::from_http_status(response.status()));
            span.end();
        }

        self.inner.error_from_response(response).await
    }
}
