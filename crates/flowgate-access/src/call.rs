use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{AccessError, CallError};

/// Await a collaborator call unless the query is cancelled first.
///
/// A token that is already cancelled wins over a ready future.
pub async fn call<T, F>(
    cancel: &CancellationToken,
    operation: &'static str,
    fut: F,
) -> Result<T, CallError>
where
    F: Future<Output = Result<T, AccessError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("{} cancelled", operation);
            Err(CallError::Cancelled { operation })
        }
        result = fut => result.map_err(|source| CallError::Failed { operation, source }),
    }
}
