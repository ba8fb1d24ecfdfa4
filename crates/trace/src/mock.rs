// Copyright 2026 Element Creations Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::sync::{Arc, Mutex};

use opentelemetry::KeyValue;

use crate::{
    status::CanonicalCode,
    tracer::{Span, SpanKind, SpanOptions, Tracer},
};

/// A lifecycle call recorded on a [`MockSpan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockSpanEvent {
    /// `set_status` was called with this code.
    Status(CanonicalCode),

    /// `end` was called.
    End,
}

#[derive(Debug)]
struct MockSpanInner {
    name: String,
    kind: SpanKind,
    parent: Option<MockSpan>,
    attributes: Vec<KeyValue>,
    events: Mutex<Vec<MockSpanEvent>>,
}

/// A recording span handle for tests.
#[derive(Debug, Clone)]
pub struct MockSpan {
    inner: Arc<MockSpanInner>,
}

impl MockSpan {
    /// The name the span was started with.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The kind the span was started with.
    #[must_use]
    pub fn kind(&self) -> SpanKind {
        self.inner.kind
    }

    /// The parent the span was started under, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&MockSpan> {
        self.inner.parent.as_ref()
    }

    /// The attributes the span was started with.
    #[must_use]
    pub fn attributes(&self) -> &[KeyValue] {
        &self.inner.attributes
    }

    /// Every status/end call recorded on this span, in order.
    #[must_use]
    pub fn events(&self) -> Vec<MockSpanEvent> {
        self.inner.events.lock().expect("event log poisoned").clone()
    }

    /// The statuses set on this span, in order.
    #[must_use]
    pub fn statuses(&self) -> Vec<CanonicalCode> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                MockSpanEvent::Status(code) => Some(code),
                MockSpanEvent::End => None,
            })
            .collect()
    }

    /// How many times `end` was called on this span.
    #[must_use]
    pub fn end_count(&self) -> usize {
        self.events()
            .into_iter()
            .filter(|event| *event == MockSpanEvent::End)
            .count()
    }

    /// Whether `end` was called at least once.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.end_count() > 0
    }
}

/// Two handles are equal when they refer to the same span.
impl PartialEq for MockSpan {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for MockSpan {}

impl Span for MockSpan {
    fn set_status(&self, code: CanonicalCode) {
        self.inner
            .events
            .lock()
            .expect("event log poisoned")
            .push(MockSpanEvent::Status(code));
    }

    fn end(&self) {
        self.inner
            .events
            .lock()
            .expect("event log poisoned")
            .push(MockSpanEvent::End);
    }
}

/// A recording [`Tracer`] for tests.
///
/// Records every span started on it; [`Tracer::current_span`] returns the
/// most recently started span that has not been ended. This matches driving
/// one logical call at a time, which is what tests do; it does not provide
/// the per-call isolation real implementations must.
#[derive(Debug, Default)]
pub struct MockTracer {
    spans: Mutex<Vec<MockSpan>>,
}

impl MockTracer {
    /// Create a tracer with no recorded spans.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every span started on this tracer, in start order.
    #[must_use]
    pub fn spans(&self) -> Vec<MockSpan> {
        self.spans.lock().expect("span log poisoned").clone()
    }
}

impl Tracer for MockTracer {
    type Span = MockSpan;

    fn current_span(&self) -> Option<MockSpan> {
        self.spans
            .lock()
            .expect("span log poisoned")
            .iter()
            .rev()
            .find(|span| !span.is_ended())
            .cloned()
    }

    fn start_span(&self, name: &str, options: SpanOptions<MockSpan>) -> MockSpan {
        let (parent, kind, attributes) = options.into_parts();
        let span = MockSpan {
            inner: Arc::new(MockSpanInner {
                name: name.to_owned(),
                kind,
                parent,
                attributes,
                events: Mutex::new(Vec::new()),
            }),
        };

        self.spans
            .lock()
            .expect("span log poisoned")
            .push(span.clone());

        span
    }
}
