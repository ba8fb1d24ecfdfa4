// Copyright 2026 Element Creations Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::cell::RefCell;

use opentelemetry::{
    Context,
    global::BoxedTracer,
    trace::{SpanBuilder, TraceContextExt as _},
};

use crate::{
    status::CanonicalCode,
    tracer::{Span, SpanKind, SpanOptions, Tracer},
};

tokio::task_local! {
    /// Spans active in the current call scope, innermost last.
    static SPAN_STACK: RefCell<Vec<OtelSpan>>;
}

/// A [`Tracer`] over the OpenTelemetry API.
///
/// "Current span" tracking is task-local: wrap each logical outgoing call in
/// [`OtelTracer::scope`]. Outside a scope, started spans are never current;
/// they still record and close once the last handle is dropped.
#[derive(Debug, Clone)]
pub struct OtelTracer<T = BoxedTracer> {
    tracer: T,
}

impl OtelTracer {
    /// Create a tracer resolving through the globally installed tracer
    /// provider, under the given instrumentation scope name.
    #[must_use]
    pub fn new(scope_name: &'static str) -> Self {
        Self {
            tracer: opentelemetry::global::tracer(scope_name),
        }
    }
}

impl<T> OtelTracer<T> {
    /// Wrap an explicit OpenTelemetry tracer.
    pub fn with_tracer(tracer: T) -> Self {
        Self { tracer }
    }

    /// Run `future` in a fresh call scope.
    ///
    /// The scope starts with the caller's innermost active span, if any, so
    /// spans started inside it parent into the surrounding trace. Concurrent
    /// scopes are isolated from each other.
    pub async fn scope<F: Future>(&self, future: F) -> F::Output {
        let seed = SPAN_STACK
            .try_with(|stack| stack.borrow().last().cloned())
            .ok()
            .flatten();

        SPAN_STACK
            .scope(RefCell::new(seed.into_iter().collect()), future)
            .await
    }
}

impl<T> Tracer for OtelTracer<T>
where
    T: opentelemetry::trace::Tracer + Send + Sync,
    T::Span: Send + Sync + 'static,
{
    type Span = OtelSpan;

    fn current_span(&self) -> Option<OtelSpan> {
        SPAN_STACK
            .try_with(|stack| stack.borrow().last().cloned())
            .ok()
            .flatten()
    }

    fn start_span(&self, name: &str, options: SpanOptions<OtelSpan>) -> OtelSpan {
        let (parent, kind, attributes) = options.into_parts();
        let parent_cx = parent.map_or_else(Context::new, |parent| parent.cx);

        let builder = SpanBuilder::from_name(name.to_owned())
            .with_kind(kind.into())
            .with_attributes(attributes);
        let span = self.tracer.build_with_context(builder, &parent_cx);

        let span = OtelSpan {
            cx: parent_cx.with_span(span),
        };
        let _ = SPAN_STACK.try_with(|stack| stack.borrow_mut().push(span.clone()));

        span
    }
}

/// A started span, carried as the OpenTelemetry context it lives in.
#[derive(Debug, Clone)]
pub struct OtelSpan {
    cx: Context,
}

impl OtelSpan {
    /// The OpenTelemetry context holding this span, e.g. for header
    /// propagation.
    #[must_use]
    pub fn context(&self) -> &Context {
        &self.cx
    }
}

impl Span for OtelSpan {
    fn set_status(&self, code: CanonicalCode) {
        self.cx.span().set_status(code.into());
    }

    fn end(&self) {
        self.cx.span().end();

        let _ = SPAN_STACK.try_with(|stack| {
            let mut stack = stack.borrow_mut();
            let span_context = self.cx.span().span_context().clone();
            if let Some(index) = stack
                .iter()
                .rposition(|entry| *entry.cx.span().span_context() == span_context)
            {
                stack.remove(index);
            }
        });
    }
}

impl From<SpanKind> for opentelemetry::trace::SpanKind {
    fn from(kind: SpanKind) -> Self {
        match kind {
            SpanKind::Client => Self::Client,
            SpanKind::Server => Self::Server,
            SpanKind::Internal => Self::Internal,
            SpanKind::Producer => Self::Producer,
            SpanKind::Consumer => Self::Consumer,
        }
    }
}
