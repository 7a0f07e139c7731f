use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

use mediabridge_core::client::{
    CreateRequestBody, MediaServerCall, MovieManagerCall, RequestBrokerCall, SeriesManagerCall,
};
use mediabridge_core::{
    AddMovieOptions, ApiError, ErrorCode, MediaRequestType, MediaService, MediaServiceOptions,
    MovieService, ProviderId, RecordedCall, ReplayClient, RequestService, SeriesService,
    TransportError,
};
use serde_json::json;

#[derive(Clone, Copy)]
struct ProviderCase {
    id: ProviderId,
    operation: &'static str,
}

fn provider_cases() -> Vec<ProviderCase> {
    vec![
        ProviderCase {
            id: ProviderId::Jellyfin,
            operation: "get_item",
        },
        ProviderCase {
            id: ProviderId::Jellyseerr,
            operation: "get_requests",
        },
        ProviderCase {
            id: ProviderId::Radarr,
            operation: "get_movies",
        },
        ProviderCase {
            id: ProviderId::Sonarr,
            operation: "get_series",
        },
    ]
}

/// Runs the case's representative operation against `client`.
fn run_operation(case: ProviderCase, client: Arc<ReplayClient>) -> Result<(), ApiError> {
    match case.id {
        ProviderId::Jellyfin => {
            let options = MediaServiceOptions::new("srv-1").with_user_id("user-1");
            let service = MediaService::new(client, options);
            block_on(service.get_item("item-1")).map(|_| ())
        }
        ProviderId::Jellyseerr => {
            let service = RequestService::new(client);
            block_on(service.get_requests(&Default::default())).map(|_| ())
        }
        ProviderId::Radarr => block_on(MovieService::new(client).get_movies()).map(|_| ()),
        ProviderId::Sonarr => block_on(SeriesService::new(client).get_series()).map(|_| ()),
    }
}

#[test]
fn unconfigured_providers_fail_before_any_call() {
    for case in provider_cases() {
        let client = Arc::new(ReplayClient::unconfigured());
        let error = run_operation(case, client.clone()).expect_err("unconfigured provider must fail");

        assert_eq!(error.code(), ErrorCode::Unknown, "{}", case.id);
        assert_eq!(error.provider(), Some(case.id));
        assert!(error.message().contains(case.id.as_str()));
        assert!(error.message().contains(case.operation));
        assert!(client.calls().is_empty(), "{} touched its client", case.id);
    }
}

#[test]
fn each_operation_issues_exactly_one_call() {
    for case in provider_cases() {
        let client = Arc::new(ReplayClient::failing(TransportError::http(503, None)));
        let error = run_operation(case, client.clone()).expect_err("server error");

        assert_eq!(error.code(), ErrorCode::ServerError);
        assert_eq!(error.http_status(), Some(503));
        assert_eq!(client.operations(), vec![case.operation], "{}", case.id);
    }
}

#[test]
fn schema_violations_carry_provider_and_operation() {
    for case in provider_cases() {
        let client = Arc::new(ReplayClient::returning(json!("not a provider payload")));
        let error = run_operation(case, client).expect_err("payload must be rejected");

        let ApiError::Validation(validation) = &error else {
            panic!("{} produced {error:?} instead of a validation error", case.id);
        };
        assert_eq!(validation.provider(), Some(case.id));
        assert_eq!(validation.operation(), Some(case.operation));
        assert!(!validation.issues().is_empty());
        assert!(!error.is_retryable());
    }
}

#[test]
fn media_server_calls_are_scoped_to_the_configured_user() {
    let client = Arc::new(ReplayClient::returning(json!({
        "Items": [], "TotalRecordCount": 0, "StartIndex": 0
    })));
    let options = MediaServiceOptions::new("srv-1").with_user_id("user-1");
    let service = MediaService::new(client.clone(), options);

    block_on(service.get_resume_items(None)).expect("empty page");

    assert_eq!(
        client.calls(),
        vec![RecordedCall::MediaServer(MediaServerCall::GetResumeItems {
            user_id: "user-1".to_owned(),
            limit: 20,
        })]
    );
}

#[test]
fn tv_requests_send_the_requested_seasons() {
    let client = Arc::new(ReplayClient::failing(TransportError::http(
        409,
        Some(json!({"message": "Request for this media already exists."})),
    )));
    let service = RequestService::new(client.clone());

    let error = block_on(service.create_tv_request(1399, Some(vec![1, 2]), true))
        .expect_err("conflict");

    assert_eq!(error.code(), ErrorCode::Unknown);
    assert_eq!(error.message(), "Request for this media already exists.");
    assert_eq!(
        client.calls(),
        vec![RecordedCall::RequestBroker(RequestBrokerCall::CreateRequest(
            CreateRequestBody {
                media_type: MediaRequestType::Tv,
                media_id: 1399,
                seasons: Some(vec![1, 2]),
                is_4k: true,
            }
        ))]
    );
}

#[test]
fn managers_forward_command_arguments_verbatim() {
    let movie_client = Arc::new(ReplayClient::returning(json!({})));
    let options = AddMovieOptions::new(329865, "Arrival", 4, "/movies");
    let movies = MovieService::new(movie_client.clone());
    let _ = block_on(movies.add_movie(&options));
    block_on(movies.delete_movie(4, true)).expect("deleted");

    assert_eq!(
        movie_client.calls(),
        vec![
            RecordedCall::MovieManager(MovieManagerCall::AddMovie(options)),
            RecordedCall::MovieManager(MovieManagerCall::DeleteMovie {
                movie_id: 4,
                delete_files: true,
            }),
        ]
    );

    let series_client = Arc::new(ReplayClient::returning(json!(null)));
    let series = SeriesService::new(series_client.clone());
    block_on(series.remove_from_queue(21, false, true)).expect("removed");
    block_on(series.trigger_search(3)).expect("search queued");

    assert_eq!(
        series_client.calls(),
        vec![
            RecordedCall::SeriesManager(SeriesManagerCall::RemoveFromQueue {
                queue_id: 21,
                remove_from_client: false,
                blocklist: true,
            }),
            RecordedCall::SeriesManager(SeriesManagerCall::SearchSeries { series_id: 3 }),
        ]
    );
}

fn block_on<F>(future: F) -> F::Output
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
