// LegalGuru - A terminal chat client for quick legal questions
// Copyright (C) 2025  LegalGuru contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! The completion endpoint seen as one request/response call.

mod completions;
pub mod prompt;

pub use completions::ChatCompletionsGateway;

use async_trait::async_trait;

#[async_trait]
pub trait ResponseGateway: Send + Sync {
    /// Send `user_query` with the fixed system instruction and return the
    /// reply text, trimmed. One round trip, no retries.
    async fn complete(&self, user_query: &str) -> Result<String, GatewayError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("request timed out")]
    Timeout,
    #[error("could not reach the completion service: {0}")]
    Transport(String),
    #[error("completion service returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("unexpected response from the completion service: {0}")]
    Decode(String),
    #[error("completion service returned an empty reply")]
    EmptyReply,
}

/// Coarse failure category shown next to an error bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    RateLimited,
    Unauthorized,
    Unavailable,
    Other,
}

impl FailureClass {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::RateLimited => "rate limited",
            Self::Unauthorized => "check your API key",
            Self::Unavailable => "service unavailable",
            Self::Other => "request failed",
        }
    }
}

impl GatewayError {
    #[must_use]
    pub fn class(&self) -> FailureClass {
        match self {
            Self::Api { status: 429, .. } => FailureClass::RateLimited,
            Self::Api { status: 401 | 403, .. } => FailureClass::Unauthorized,
            Self::Api { status, .. } if *status >= 500 => FailureClass::Unavailable,
            Self::Timeout | Self::Transport(_) => FailureClass::Unavailable,
            Self::Api { message, .. } => classify_error_text(message),
            Self::Decode(_) | Self::EmptyReply => FailureClass::Other,
        }
    }
}

/// Classify a stored error message, e.g. when rendering a transcript loaded
/// from disk where only the text survived.
#[must_use]
pub fn classify_error_text(input: &str) -> FailureClass {
    let lower = input.to_ascii_lowercase();
    if looks_like_rate_limit_lower(&lower) {
        FailureClass::RateLimited
    } else if looks_like_unauthorized_lower(&lower) {
        FailureClass::Unauthorized
    } else if looks_like_unavailable_lower(&lower) {
        FailureClass::Unavailable
    } else {
        FailureClass::Other
    }
}

fn looks_like_rate_limit_lower(lower: &str) -> bool {
    [
        "rate limit",
        "rate-limit",
        "429",
        "too many requests",
        "quota",
    ]
    .iter()
    .any(|needle| lower.contains(needle))
}

fn looks_like_unauthorized_lower(lower: &str) -> bool {
    [
        "401",
        "403",
        "unauthorized",
        "invalid api key",
        "authentication",
    ]
    .iter()
    .any(|needle| lower.contains(needle))
}

fn looks_like_unavailable_lower(lower: &str) -> bool {
    [
        "timed out",
        "could not reach",
        "connection refused",
        "dns error",
        "returned 5",
        "service unavailable",
        "bad gateway",
    ]
    .iter()
    .any(|needle| lower.contains(needle))
}
