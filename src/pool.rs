//! Bounded-concurrency fetch-and-decode executor
//!
//! Every feed source decomposes into many independent requests (one per item,
//! per page, or per channel). This module provides the shared machinery that
//! turns such a batch into order-aligned typed results without each source
//! re-implementing worker management, ordering, and partial-failure
//! bookkeeping.
//!
//! A [`Job`] pairs a task function with an ordered list of input items and a
//! worker budget. [`Job::run`] drives up to that many task invocations
//! concurrently, waits for all of them, and returns a [`BatchResults`] whose
//! slots line up with the input items regardless of completion order.
//!
//! The executor runs a batch exactly once: retries, backoff, rate limiting,
//! and per-task timeouts are the caller's responsibility (the task function is
//! expected to bound its own execution, e.g. via the HTTP client's timeout).
//!
//! # Example
//!
//! ```no_run
//! use feedrank::pool::{Job, decode_json_task};
//!
//! # async fn example() -> feedrank::Result<()> {
//! let client = reqwest::Client::new();
//! let requests: Vec<reqwest::Request> = vec![/* one prepared request per item */];
//!
//! let batch = Job::new(decode_json_task::<serde_json::Value>(client), requests)
//!     .with_workers(30)
//!     .run()
//!     .await;
//!
//! for outcome in batch.outcomes() {
//!     if let Err(e) = outcome {
//!         tracing::error!(error = %e, "item failed");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use futures::future::BoxFuture;
use futures::{FutureExt, StreamExt, stream};
use serde::de::DeserializeOwned;
use std::future::Future;

/// An immutable pairing of a task function, an ordered item sequence, and a
/// worker-count budget.
///
/// Constructing a job performs no work and no I/O; the batch executes when the
/// job is consumed by [`Job::run`]. Jobs are single-use: one is built fresh
/// per fetch call and discarded afterwards.
pub struct Job<F, I> {
    task: F,
    items: Vec<I>,
    workers: usize,
}

impl<F, I, T, Fut> Job<F, I>
where
    F: Fn(I) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    /// Bind a task function to a batch of input items
    ///
    /// The task receives one item per invocation and returns either a decoded
    /// value or an error. It must be safe to invoke concurrently with its
    /// sibling invocations and must report failures as `Err`, never panic, so
    /// that one failing item cannot abort the rest of the batch.
    ///
    /// The worker budget defaults to 1 (strictly sequential execution); use
    /// [`Job::with_workers`] to raise it.
    pub fn new(task: F, items: Vec<I>) -> Self {
        Self {
            task,
            items,
            workers: 1,
        }
    }

    /// Set the maximum number of concurrently in-flight task invocations
    ///
    /// A value of 0 is normalized to 1 so the job always makes sequential
    /// progress. Budgets larger than the item count are clamped at run time —
    /// the pool never spawns more workers than there is work.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Execute the batch and return order-aligned outcomes
    ///
    /// Up to the configured worker count of task invocations run at once;
    /// each outcome is written back to the slot matching its item's original
    /// position, so `outcomes()[i]` always corresponds to `items[i]` no
    /// matter which worker processed it or in what wall-clock order. The call
    /// does not return until every item has been processed by exactly one
    /// invocation.
    ///
    /// An empty batch returns immediately with empty outcomes and no overall
    /// error.
    pub async fn run(self) -> BatchResults<T> {
        let Job {
            task,
            items,
            workers,
        } = self;

        let total = items.len();
        if total == 0 {
            return BatchResults {
                outcomes: Vec::new(),
                overall: None,
            };
        }

        let workers = workers.min(total);
        let task = &task;

        let mut indexed: Vec<(usize, Result<T>)> = stream::iter(items.into_iter().enumerate())
            .map(|(index, item)| async move { (index, task(item).await) })
            .buffer_unordered(workers)
            .collect()
            .await;

        // Completion order is unspecified; restore the input order.
        indexed.sort_unstable_by_key(|(index, _)| *index);
        let outcomes: Vec<Result<T>> = indexed.into_iter().map(|(_, outcome)| outcome).collect();

        // The batch as a whole failed only if no item produced a result.
        let overall = if outcomes.iter().all(|outcome| outcome.is_err()) {
            Some(Error::NoContent)
        } else {
            None
        };

        BatchResults { outcomes, overall }
    }
}

/// Order-aligned outcomes of one executed [`Job`]
///
/// Holds one `Result` slot per input item, in input order, plus the overall
/// error computed by the executor. Exactly one of value/error is present per
/// slot by construction.
#[derive(Debug)]
pub struct BatchResults<T> {
    outcomes: Vec<Result<T>>,
    overall: Option<Error>,
}

/// Caller-side classification of a finished batch
///
/// Combines the per-item outcomes into the three conditions feed sources act
/// on: propagate "no content", surface a degraded-but-usable feed, or return
/// everything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchStatus {
    /// Every item succeeded (an empty batch counts as full success)
    FullSuccess,
    /// At least one item succeeded and at least one failed
    PartialSuccess {
        /// Number of items that failed
        failed: usize,
    },
    /// Every item failed; the batch yielded zero usable results
    TotalFailure,
}

impl<T> BatchResults<T> {
    /// Number of items in the batch
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// True if the batch had no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// The per-item outcomes, index-aligned with the input items
    #[must_use]
    pub fn outcomes(&self) -> &[Result<T>] {
        &self.outcomes
    }

    /// Consume the batch and return the per-item outcomes
    #[must_use]
    pub fn into_outcomes(self) -> Vec<Result<T>> {
        self.outcomes
    }

    /// The overall error, present only when every item in a non-empty batch
    /// failed
    #[must_use]
    pub fn overall_error(&self) -> Option<&Error> {
        self.overall.as_ref()
    }

    /// Number of items that failed
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.is_err())
            .count()
    }

    /// Consume the batch, yielding successful values in input order
    pub fn successes(self) -> impl Iterator<Item = T> {
        self.outcomes.into_iter().filter_map(|outcome| outcome.ok())
    }

    /// Classify the batch into full success, partial success, or total failure
    #[must_use]
    pub fn classify(&self) -> BatchStatus {
        let failed = self.failed_count();
        if failed == 0 {
            BatchStatus::FullSuccess
        } else if failed == self.outcomes.len() {
            BatchStatus::TotalFailure
        } else {
            BatchStatus::PartialSuccess { failed }
        }
    }
}

/// Build a fetch-and-decode task from a configured HTTP client
///
/// The returned task consumes one prepared [`reqwest::Request`], issues it,
/// checks for a successful status code, and decodes the JSON body into `T`.
/// Per-call timeout enforcement comes from the client's configuration, not
/// from the pool.
///
/// This is the task most feed sources pair with a [`Job`]: build one request
/// per item, decode each response into the source's payload type.
pub fn decode_json_task<T>(
    client: reqwest::Client,
) -> impl Fn(reqwest::Request) -> BoxFuture<'static, Result<T>>
where
    T: DeserializeOwned + Send + 'static,
{
    move |request: reqwest::Request| {
        let client = client.clone();
        async move {
            let url = request.url().to_string();
            let response = client.execute(request).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(Error::Http {
                    status: status.as_u16(),
                    url,
                });
            }
            Ok(response.json::<T>().await?)
        }
        .boxed()
    }
}
