// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::constants::DEFAULT_MAX_BACKOFF;
use crate::constants::DEFAULT_MAX_RETRIES;
use rand::Rng;
use ramsign_core::Error;
use std::time::Duration;

const BASE_BACKOFF_MS: u64 = 100;

/// Bounded exponential backoff used by [`Client`](crate::Client).
///
/// `attempt` is zero-based: attempt `0` is the initial request, a call makes
/// at most `max_retries + 1` attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum retries after the initial attempt.
    pub max_retries: usize,
    /// Ceiling of a single wait.
    pub max_backoff: Duration,
    /// Pick a random wait in `[0, backoff]` instead of the full backoff.
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            max_backoff: DEFAULT_MAX_BACKOFF,
            jitter: false,
        }
    }
}

impl RetryPolicy {
    /// Decide whether the failed `attempt` should be followed by another one.
    pub fn should_retry(&self, err: &Error, attempt: usize) -> bool {
        err.is_retryable() && attempt < self.max_retries
    }

    /// Wait computed for the given attempt: `min(2^attempt * 100ms, max_backoff)`.
    ///
    /// The first retry is immediate.
    pub fn backoff(&self, attempt: usize) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let pow = u32::try_from(attempt)
            .ok()
            .and_then(|n| 2u64.checked_pow(n))
            .unwrap_or(u64::MAX);
        let millis = u128::from(BASE_BACKOFF_MS.saturating_mul(pow))
            .min(self.max_backoff.as_millis());
        Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
    }

    /// The wait to actually sleep before the next attempt.
    pub fn delay(&self, attempt: usize) -> Duration {
        let backoff = self.backoff(attempt);
        if !self.jitter || backoff.is_zero() {
            return backoff;
        }

        rand::thread_rng().gen_range(Duration::ZERO..=backoff)
    }
}
