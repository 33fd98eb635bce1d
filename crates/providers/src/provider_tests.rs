// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    rate_limited = { ProviderError::RateLimited { retry_after_ms: 50 }, true },
    transient = { ProviderError::Transient("connection reset".into()), true },
    not_found = { ProviderError::NotFound("abc".into()), false },
    auth_failed = { ProviderError::AuthFailed("expired token".into()), false },
    not_implemented = { ProviderError::NotImplemented("x"), false },
)]
fn is_transient_classifies_retryable_errors(err: ProviderError, expected: bool) {
    assert_eq!(err.is_transient(), expected);
}
