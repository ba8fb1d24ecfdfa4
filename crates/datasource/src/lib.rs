// Copyright 2026 Element Creations Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Data source abstraction for outbound subgraph calls, with tracing
//! instrumentation layered over its lifecycle hooks

#![deny(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

mod context;
mod error;
mod response;
mod source;
mod traced;

pub use self::{
    context::{RequestContext, SubgraphRequest},
    error::DataSourceError,
    response::{ResponseBody, SubgraphResponse},
    source::{DataSourceConfig, RemoteDataSource, SubgraphDataSource},
    traced::{GRAPHQL_REQUEST_SPAN_NAME, TracedDataSource},
};
