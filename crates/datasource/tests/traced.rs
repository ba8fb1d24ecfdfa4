// Copyright 2026 Element Creations Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use assert_matches::assert_matches;
use async_trait::async_trait;
use http::StatusCode;
use serde_json::json;
use sgw_datasource::{
    DataSourceConfig, DataSourceError, GRAPHQL_REQUEST_SPAN_NAME, RemoteDataSource,
    RequestContext, ResponseBody, SubgraphRequest, SubgraphResponse, TracedDataSource,
};
use sgw_trace::{CanonicalCode, MockSpanEvent, MockTracer, SpanKind, SpanOptions, Tracer as _};

/// A data source with canned results, counting how often each hook runs.
#[derive(Debug, Default)]
struct StubSource {
    requests: AtomicUsize,
}

#[async_trait]
impl RemoteDataSource for StubSource {
    async fn on_request(&self, _context: &RequestContext) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    async fn parse_response_body(
        &self,
        response: SubgraphResponse,
    ) -> Result<ResponseBody, DataSourceError> {
        Ok(ResponseBody::Json(
            json!({ "data": { "status": response.status().as_u16() } }),
        ))
    }

    async fn error_from_response(&self, response: SubgraphResponse) -> DataSourceError {
        DataSourceError::UpstreamStatus {
            status: response.status(),
            message: "stubbed".to_owned(),
        }
    }
}

fn hello_request() -> RequestContext {
    RequestContext::new(SubgraphRequest::new("{ hello }"))
}

#[tokio::test]
async fn test_success_path_ends_span_without_status() {
    let tracer = Arc::new(MockTracer::new());
    let source = TracedDataSource::new(Arc::clone(&tracer), None);

    source.on_request(&hello_request()).await;

    let response = SubgraphResponse::json(StatusCode::OK, r#"{"data":{"hello":"world"}}"#);
    let body = source
        .parse_response_body(response)
        .await
        .expect("the body should parse");
    assert_eq!(body, ResponseBody::Json(json!({"data": {"hello": "world"}})));

    let spans = tracer.spans();
    assert_eq!(spans.len(), 1);

    let span = &spans[0];
    assert_eq!(span.name(), GRAPHQL_REQUEST_SPAN_NAME);
    assert_eq!(span.kind(), SpanKind::Client);
    assert!(span.parent().is_none());
    assert!(span.attributes().iter().any(|attribute| {
        attribute.key.as_str() == "graphql.document" && attribute.value.as_str() == "{ hello }"
    }));

    // Ended exactly once, with no status ever set
    assert_eq!(span.events(), vec![MockSpanEvent::End]);
}

#[tokio::test]
async fn test_error_path_sets_mapped_status_then_ends() {
    let tracer = Arc::new(MockTracer::new());
    let source = TracedDataSource::new(Arc::clone(&tracer), None);

    let request = SubgraphRequest::new("query Hello { hello }")
        .with_operation_name("Hello")
        .with_variables(json!({}));
    let context = RequestContext::new(request).with_context(json!({"tenant": "acme"}));
    assert_eq!(context.context()["tenant"], "acme");

    source.on_request(&context).await;

    let response = SubgraphResponse::new(StatusCode::NOT_FOUND, "no such thing");
    let error = source.error_from_response(response).await;
    assert_eq!(error.status_code(), Some(StatusCode::NOT_FOUND));

    let spans = tracer.spans();
    assert_eq!(spans.len(), 1);
    assert_eq!(
        spans[0].events(),
        vec![
            MockSpanEvent::Status(CanonicalCode::NotFound),
            MockSpanEvent::End,
        ]
    );
}

#[tokio::test]
async fn test_unmapped_status_classifies_as_unknown() {
    let tracer = Arc::new(MockTracer::new());
    let source = TracedDataSource::new(Arc::clone(&tracer), None);

    source.on_request(&hello_request()).await;
    source
        .error_from_response(SubgraphResponse::new(StatusCode::IM_A_TEAPOT, ""))
        .await;

    assert_eq!(tracer.spans()[0].statuses(), vec![CanonicalCode::Unknown]);
}

#[tokio::test]
async fn test_terminal_hooks_are_safe_without_a_span() {
    let tracer = Arc::new(MockTracer::new());
    let source = TracedDataSource::wrapping(Arc::clone(&tracer), StubSource::default());

    let body = source
        .parse_response_body(SubgraphResponse::new(StatusCode::OK, ""))
        .await
        .expect("the body should parse");
    assert_eq!(body, ResponseBody::Json(json!({"data": {"status": 200}})));

    let error = source
        .error_from_response(SubgraphResponse::new(StatusCode::BAD_GATEWAY, ""))
        .await;
    assert_matches!(
        error,
        DataSourceError::UpstreamStatus { message, .. } => assert_eq!(message, "stubbed")
    );

    assert!(tracer.spans().is_empty());
}

#[tokio::test]
async fn test_span_parents_under_the_current_span() {
    let tracer = Arc::new(MockTracer::new());
    let inbound = tracer.start_span(
        "inbound-request",
        SpanOptions::new().with_kind(SpanKind::Server),
    );

    let source = TracedDataSource::new(Arc::clone(&tracer), None);
    source.on_request(&hello_request()).await;

    let spans = tracer.spans();
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[1].parent(), Some(&inbound));

    // Closing the outgoing span leaves the inbound one current again
    source
        .error_from_response(SubgraphResponse::new(StatusCode::INTERNAL_SERVER_ERROR, ""))
        .await;
    assert_eq!(tracer.current_span().as_ref(), Some(&inbound));
    assert!(!inbound.is_ended());
}

#[tokio::test]
async fn test_sequential_calls_each_get_their_own_span() {
    let tracer = Arc::new(MockTracer::new());
    let source = TracedDataSource::new(Arc::clone(&tracer), None);

    source.on_request(&hello_request()).await;
    source
        .parse_response_body(SubgraphResponse::json(StatusCode::OK, r#"{"data":null}"#))
        .await
        .expect("the body should parse");

    source.on_request(&hello_request()).await;
    source
        .error_from_response(SubgraphResponse::new(StatusCode::SERVICE_UNAVAILABLE, ""))
        .await;

    let spans = tracer.spans();
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].events(), vec![MockSpanEvent::End]);
    assert_eq!(
        spans[1].events(),
        vec![
            MockSpanEvent::Status(CanonicalCode::Unavailable),
            MockSpanEvent::End,
        ]
    );
    // The second span starts after the first ended, so it has no parent
    assert!(spans[1].parent().is_none());
}

#[tokio::test]
async fn test_hooks_delegate_to_the_wrapped_source() {
    let tracer = Arc::new(MockTracer::new());
    let source = TracedDataSource::wrapping(Arc::clone(&tracer), StubSource::default());

    source.on_request(&hello_request()).await;
    assert_eq!(source.inner().requests.load(Ordering::SeqCst), 1);

    let body = source
        .parse_response_body(SubgraphResponse::new(StatusCode::OK, ""))
        .await
        .expect("the body should parse");
    assert_eq!(body, ResponseBody::Json(json!({"data": {"status": 200}})));
}

#[tokio::test]
async fn test_config_passes_through_untouched() -> anyhow::Result<()> {
    let config = DataSourceConfig {
        name: Some("accounts".to_owned()),
        url: Some("https://accounts.internal/graphql".parse()?),
    };

    let source = TracedDataSource::new(MockTracer::new(), Some(config));

    assert_eq!(source.inner().config().name.as_deref(), Some("accounts"));
    assert_eq!(
        source.inner().config().url.as_ref().map(url::Url::as_str),
        Some("https://accounts.internal/graphql")
    );

    Ok(())
}
