//! One service per provider.
//!
//! Every operation follows the same path: check configuration, call the
//! injected client, validate the raw body, adapt it, and on any failure
//! classify exactly once with the operation's [`ErrorContext`].
//!
//! | Service | Provider | Client |
//! |---------|----------|--------|
//! | [`MediaService`] | Jellyfin | [`MediaServerClient`](crate::client::MediaServerClient) |
//! | [`RequestService`] | Jellyseerr | [`RequestBrokerClient`](crate::client::RequestBrokerClient) |
//! | [`MovieService`] | Radarr | [`MovieManagerClient`](crate::client::MovieManagerClient) |
//! | [`SeriesService`] | Sonarr | [`SeriesManagerClient`](crate::client::SeriesManagerClient) |

mod media;
mod movies;
mod requests;
mod series;

use std::future::Future;

pub use media::{MediaService, MediaServiceOptions};
pub use movies::MovieService;
pub use requests::RequestService;
pub use series::SeriesService;

use crate::error::{classify, ApiError, ErrorContext, Failure};

/// Runs one service operation and classifies whatever it fails with.
///
/// An unconfigured provider fails before the client is touched.
pub(crate) async fn run<T, F>(configured: bool, context: ErrorContext, work: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, Failure>>,
{
    if !configured {
        tracing::debug!(
            provider = %context.provider,
            operation = %context.operation,
            "provider not configured"
        );
        return Err(ApiError::not_configured(context.provider, &context.operation));
    }

    tracing::debug!(
        provider = %context.provider,
        operation = %context.operation,
        item_id = context.item_id.as_deref(),
        "calling provider"
    );
    work.await.map_err(|failure| classify(failure, &context))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::future::Future;
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    pub(crate) fn block_on<F>(future: F) -> F::Output
    where
        F: Future,
    {
        let waker = noop_waker();
        let mut context = Context::from_waker(&waker);
        let mut future = std::pin::pin!(future);

        loop {
            match future.as_mut().poll(&mut context) {
                Poll::Ready(output) => return output,
                Poll::Pending => std::thread::yield_now(),
            }
        }
    }

    fn noop_waker() -> Waker {
        // SAFETY: The vtable functions never dereference the data pointer and are no-op operations.
        unsafe { Waker::from_raw(noop_raw_waker()) }
    }

    fn noop_raw_waker() -> RawWaker {
        RawWaker::new(std::ptr::null(), &NOOP_RAW_WAKER_VTABLE)
    }

    unsafe fn noop_raw_waker_clone(_: *const ()) -> RawWaker {
        noop_raw_waker()
    }

    unsafe fn noop_raw_waker_wake(_: *const ()) {}

    unsafe fn noop_raw_waker_wake_by_ref(_: *const ()) {}

    unsafe fn noop_raw_waker_drop(_: *const ()) {}

    static NOOP_RAW_WAKER_VTABLE: RawWakerVTable = RawWakerVTable::new(
        noop_raw_waker_clone,
        noop_raw_waker_wake,
        noop_raw_waker_wake_by_ref,
        noop_raw_waker_drop,
    );
}
