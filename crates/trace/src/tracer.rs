// Copyright 2026 Element Creations Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::sync::Arc;

use opentelemetry::KeyValue;

use crate::status::CanonicalCode;

/// A handle on one traced operation.
///
/// Handles are cheap to clone and all clones refer to the same span. A span
/// carries at most one terminal status, set before [`Span::end`], and is
/// closed exactly once by whoever started it; implementations ignore calls
/// made after the span was ended.
pub trait Span: Clone + Send + Sync + 'static {
    /// Set the terminal status of the span.
    fn set_status(&self, code: CanonicalCode);

    /// Close the span. A span ended without an explicit status keeps the
    /// backend's default status.
    fn end(&self);
}

/// The kind of a span, mirroring the OpenTelemetry span kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpanKind {
    /// An outbound call to a remote service.
    Client,

    /// Handling of an inbound request.
    Server,

    /// An operation internal to the process.
    #[default]
    Internal,

    /// Publishing to an asynchronous channel.
    Producer,

    /// Consuming from an asynchronous channel.
    Consumer,
}

/// Options for starting a span.
#[derive(Debug, Clone)]
pub struct SpanOptions<S> {
    parent: Option<S>,
    kind: SpanKind,
    attributes: Vec<KeyValue>,
}

impl<S> Default for SpanOptions<S> {
    fn default() -> Self {
        Self {
            parent: None,
            kind: SpanKind::default(),
            attributes: Vec::new(),
        }
    }
}

impl<S> SpanOptions<S> {
    /// Create an empty set of options: no parent, [`SpanKind::Internal`], no
    /// attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parent the new span under `parent`, or start a new trace when `None`.
    #[must_use]
    pub fn with_parent(mut self, parent: Option<S>) -> Self {
        self.parent = parent;
        self
    }

    /// Set the kind of the new span.
    #[must_use]
    pub fn with_kind(mut self, kind: SpanKind) -> Self {
        self.kind = kind;
        self
    }

    /// Record an attribute on the new span.
    #[must_use]
    pub fn with_attribute(mut self, attribute: KeyValue) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// The requested parent span, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&S> {
        self.parent.as_ref()
    }

    /// The requested span kind.
    #[must_use]
    pub fn kind(&self) -> SpanKind {
        self.kind
    }

    /// The attributes to record on the new span.
    #[must_use]
    pub fn attributes(&self) -> &[KeyValue] {
        &self.attributes
    }

    /// Decompose the options, for [`Tracer`] implementations.
    #[must_use]
    pub fn into_parts(self) -> (Option<S>, SpanKind, Vec<KeyValue>) {
        (self.parent, self.kind, self.attributes)
    }
}

/// The tracing capability consumed by instrumented components.
///
/// Implementations must scope the "current span" per logical call context:
/// a span started for one call is observed by [`Tracer::current_span`] on
/// that call only, never by concurrent calls sharing the tracer. The span
/// returned by [`Tracer::start_span`] becomes the current span for the call
/// that started it, until it is ended.
///
/// Closure is the caller's responsibility: a call abandoned before its span
/// is ended leaks that span.
pub trait Tracer: Send + Sync {
    /// The span handle type produced by this tracer.
    type Span: Span;

    /// The span currently active in the calling context, if any.
    fn current_span(&self) -> Option<Self::Span>;

    /// Start a new span. The span becomes current for the calling context.
    fn start_span(&self, name: &str, options: SpanOptions<Self::Span>) -> Self::Span;
}

impl<T: Tracer + ?Sized> Tracer for Arc<T> {
    type Span = T::Span;

    fn current_span(&self) -> Option<Self::Span> {
        (**self).current_span()
    }

    fn start_span(&self, name: &str, options: SpanOptions<Self::Span>) -> Self::Span {
        (**self).start_span(name, options)
    }
}
