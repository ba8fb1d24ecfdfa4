// Copyright 2026 Element Creations Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Tracing capability consumed by the gateway's instrumented components

#![deny(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

mod mock;
mod otel;
mod status;
mod tracer;

pub use self::{
    mock::{MockSpan, MockSpanEvent, MockTracer},
    otel::{OtelSpan, OtelTracer},
    status::CanonicalCode,
    tracer::{Span, SpanKind, SpanOptions, Tracer},
};
