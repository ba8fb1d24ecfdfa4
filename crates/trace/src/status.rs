// Copyright 2026 Element Creations Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use http::StatusCode;

/// Canonical trace outcome classifications, decoupled from transport-specific
/// status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalCode {
    /// The operation completed successfully.
    Ok,

    /// The outcome could not be classified.
    Unknown,

    /// The requested entity was not found.
    NotFound,

    /// The caller presented no valid credentials.
    Unauthenticated,

    /// The caller is not allowed to perform the operation.
    PermissionDenied,

    /// A quota or rate limit was exhausted.
    ResourceExhausted,

    /// A precondition required by the operation did not hold.
    FailedPrecondition,

    /// The downstream service failed internally.
    Internal,

    /// The downstream service is currently unavailable.
    Unavailable,
}

impl CanonicalCode {
    /// Classify a downstream HTTP response status.
    ///
    /// Total over all status codes: anything without a dedicated row
    /// classifies as [`CanonicalCode::Unknown`].
    #[must_use]
    pub fn from_http_status(status: StatusCode) -> Self {
        match status.as_u16() {
            404 => Self::NotFound,
            401 => Self::Unauthenticated,
            403 => Self::PermissionDenied,
            429 => Self::ResourceExhausted,
            412 => Self::FailedPrecondition,
            500 => Self::Internal,
            503 => Self::Unavailable,
            _ => Self::Unknown,
        }
    }

    /// The name of the code, as recorded on span statuses.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Unknown => "UNKNOWN",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Self::FailedPrecondition => "FAILED_PRECONDITION",
            Self::Internal => "INTERNAL",
            Self::Unavailable => "UNAVAILABLE",
        }
    }
}

impl std::fmt::Display for CanonicalCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CanonicalCode> for opentelemetry::trace::Status {
    fn from(code: CanonicalCode) -> Self {
        match code {
            CanonicalCode::Ok => Self::Ok,
            code => Self::error(code.as_str()),
        }
    }
}
