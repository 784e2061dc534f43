//! Fetch pipeline - fetch, validate, transform, commit.
//!
//! [`run_pipeline`] is the pure orchestration: one fetch, one validated
//! transition, one outcome. [`FetchAndCommitHandler`] wires it to a commit
//! port and a failure reporter the way a screen or job would use it.

use std::sync::Arc;

use futures::future::join_all;
use serde::de::DeserializeOwned;
use tracing::{debug, Instrument};
use uuid::Uuid;

use crate::domain::outcome::{PipelineFailure, PipelineOutcome};
use crate::domain::transition::ValidatedTransition;
use crate::ports::{CommitPort, FailureReporter, FetchParams, FetchPort};

/// Runs one fetch through a validated transition.
///
/// The fetch is the only suspension point. Dropping the returned future
/// before it settles discards the pending fetch with no other effect.
pub async fn run_pipeline<W, D, F>(
    fetch: &dyn FetchPort,
    params: &FetchParams,
    transition: &ValidatedTransition<W, D, F>,
) -> PipelineOutcome<D>
where
    W: DeserializeOwned,
    F: Fn(W) -> D + Sync,
{
    let raw = match fetch.fetch(params).await {
        Ok(raw) => raw,
        Err(error) => {
            debug!(reason = %error.reason(), "fetch stage failed");
            return PipelineOutcome::TransportFailure(error);
        }
    };
    debug!("fetch stage settled, validating response");

    match transition.apply(&raw) {
        Ok(value) => {
            debug!("response validated and transformed");
            PipelineOutcome::Success(value)
        }
        Err(failures) => {
            debug!(failures = failures.len(), "validation stage rejected response");
            PipelineOutcome::ValidationFailure(failures)
        }
    }
}

/// Handler that commits successful outcomes and reports failed ones.
pub struct FetchAndCommitHandler<W, D: Send + 'static, F = fn(W) -> D> {
    fetch: Arc<dyn FetchPort>,
    transition: ValidatedTransition<W, D, F>,
    commit: Arc<dyn CommitPort<D>>,
    reporter: Arc<dyn FailureReporter>,
}

impl<W, D, F> FetchAndCommitHandler<W, D, F>
where
    W: DeserializeOwned,
    D: Send + 'static,
    F: Fn(W) -> D + Sync,
{
    pub fn new(
        fetch: Arc<dyn FetchPort>,
        transition: ValidatedTransition<W, D, F>,
        commit: Arc<dyn CommitPort<D>>,
        reporter: Arc<dyn FailureReporter>,
    ) -> Self {
        Self {
            fetch,
            transition,
            commit,
            reporter,
        }
    }

    /// Runs one invocation.
    ///
    /// Commits exactly once on success and reports exactly once on failure;
    /// never both. The failure is also returned to the caller.
    pub async fn handle(&self, params: FetchParams) -> Result<(), PipelineFailure> {
        let invocation_id = Uuid::new_v4();
        let span = tracing::info_span!("fetch_and_commit", %invocation_id);

        async {
            match run_pipeline(self.fetch.as_ref(), &params, &self.transition)
                .await
                .into_result()
            {
                Ok(value) => {
                    self.commit.commit(value).await;
                    debug!("value committed");
                    Ok(())
                }
                Err(failure) => {
                    self.reporter.report(&failure);
                    Err(failure)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Runs independent invocations concurrently, one result per params.
    pub async fn handle_all(
        &self,
        params: impl IntoIterator<Item = FetchParams>,
    ) -> Vec<Result<(), PipelineFailure>> {
        join_all(params.into_iter().map(|p| self.handle(p))).await
    }
}
