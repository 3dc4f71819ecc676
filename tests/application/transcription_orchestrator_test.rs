use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;

use transcribe_relay::application::ports::{
    FetchError, JobServiceError, JobSnapshot, RemoteJobStatus,
};
use transcribe_relay::application::services::{
    ErrorKind, OrchestrationError, PollPolicy, TranscriptionOrchestrator,
};
use transcribe_relay::domain::EncodingTag;

use crate::helpers::{RecordingMediaStore, RecordingSleeper, ScriptedJobService, StubResultFetcher};

const RESULT_URI: &str = "https://results.example/transcribe-1.json";

struct Harness {
    store: Arc<RecordingMediaStore>,
    jobs: Arc<ScriptedJobService>,
    fetcher: Arc<StubResultFetcher>,
    sleeper: Arc<RecordingSleeper>,
    orchestrator: TranscriptionOrchestrator,
}

fn harness(
    store: RecordingMediaStore,
    jobs: ScriptedJobService,
    fetcher: StubResultFetcher,
    policy: PollPolicy,
) -> Harness {
    let store = Arc::new(store);
    let jobs = Arc::new(jobs);
    let fetcher = Arc::new(fetcher);
    let sleeper = Arc::new(RecordingSleeper::default());
    let orchestrator = TranscriptionOrchestrator::new(
        store.clone(),
        jobs.clone(),
        fetcher.clone(),
        sleeper.clone(),
        policy,
    );
    Harness {
        store,
        jobs,
        fetcher,
        sleeper,
        orchestrator,
    }
}

fn in_progress() -> JobSnapshot {
    JobSnapshot::running(RemoteJobStatus::InProgress)
}

fn audio() -> Bytes {
    Bytes::from_static(b"RIFF fake audio")
}

#[tokio::test]
async fn given_job_completes_on_third_poll_when_submitting_then_returns_transcript() {
    let h = harness(
        RecordingMediaStore::default(),
        ScriptedJobService::new(vec![
            in_progress(),
            in_progress(),
            JobSnapshot::completed(RESULT_URI),
        ]),
        StubResultFetcher::returning("नमस्ते"),
        PollPolicy::default(),
    );

    let outcome = h
        .orchestrator
        .submit(audio(), "audio/webm", "clip.webm", "hi-IN")
        .await
        .unwrap();

    assert_eq!(outcome.text, "नमस्ते");
    assert_eq!(outcome.language_code, "hi-IN");
    assert!(outcome.job_id.as_str().starts_with("transcribe-"));
    assert_eq!(h.jobs.status_queries(), 3);
    assert_eq!(
        h.sleeper.recorded(),
        vec![Duration::from_secs(2), Duration::from_secs(2)]
    );
    assert_eq!(h.fetcher.fetched(), vec![RESULT_URI.to_string()]);
}

#[tokio::test]
async fn given_successful_job_when_submitting_then_job_id_is_threaded_through_every_collaborator() {
    let h = harness(
        RecordingMediaStore::default(),
        ScriptedJobService::new(vec![JobSnapshot::completed(RESULT_URI)]),
        StubResultFetcher::returning("hello"),
        PollPolicy::default(),
    );

    let outcome = h
        .orchestrator
        .submit(audio(), "", "voice.mp3", "en-US")
        .await
        .unwrap();

    let job_id = outcome.job_id.as_str().to_string();
    let expected_key = format!("uploads/{}.mp3", job_id);

    assert_eq!(h.store.put_keys(), vec![expected_key.clone()]);
    assert_eq!(h.store.delete_keys(), vec![expected_key.clone()]);

    let started = h.jobs.started_requests();
    assert_eq!(started.len(), 1);
    assert_eq!(started[0].job_id.as_str(), job_id);
    assert_eq!(started[0].language_code, "en-US");
    assert_eq!(started[0].encoding, EncodingTag::Mp3);
    assert_eq!(
        started[0].media_reference.as_str(),
        format!("memory://{}", expected_key)
    );
    assert!(!started[0].speaker_labels);

    let queried = h.jobs.queried.lock().unwrap().clone();
    assert!(queried.iter().all(|id| id.as_str() == job_id));
}

#[tokio::test]
async fn given_empty_content_type_when_staging_then_uploads_with_encoding_mime() {
    let h = harness(
        RecordingMediaStore::default(),
        ScriptedJobService::new(vec![JobSnapshot::completed(RESULT_URI)]),
        StubResultFetcher::returning("hello"),
        PollPolicy::default(),
    );

    h.orchestrator
        .submit(audio(), "", "voice.mp3", "hi-IN")
        .await
        .unwrap();

    let puts = h.store.puts.lock().unwrap().clone();
    assert_eq!(puts[0].content_type, "audio/mpeg");
    assert_eq!(puts[0].bytes, audio().len());
}

#[tokio::test]
async fn given_job_fails_when_polling_then_stops_immediately_with_reason() {
    let h = harness(
        RecordingMediaStore::default(),
        ScriptedJobService::new(vec![in_progress(), JobSnapshot::failed("Bad audio")]),
        StubResultFetcher::returning("unused"),
        PollPolicy::default(),
    );

    let err = h
        .orchestrator
        .submit(audio(), "audio/webm", "clip.webm", "hi-IN")
        .await
        .unwrap_err();

    assert!(matches!(
        &err,
        OrchestrationError::RemoteFailure { reason } if reason == "Bad audio"
    ));
    assert_eq!(err.kind(), ErrorKind::RemoteFailure);
    assert_eq!(err.failure_reason(), Some("Bad audio"));
    assert_eq!(h.jobs.status_queries(), 2);
    assert!(h.fetcher.fetched().is_empty());
    assert_eq!(h.store.delete_keys().len(), 1);
}

#[tokio::test]
async fn given_job_never_leaves_in_progress_when_polling_then_times_out_after_budget() {
    let h = harness(
        RecordingMediaStore::default(),
        ScriptedJobService::never_finishing(),
        StubResultFetcher::returning("unused"),
        PollPolicy::default(),
    );

    let err = h
        .orchestrator
        .submit(audio(), "audio/webm", "clip.webm", "hi-IN")
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestrationError::Timeout { attempts: 25 }));
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(h.jobs.status_queries(), 25);
    assert_eq!(h.sleeper.recorded().len(), 24);
    assert!(
        h.sleeper
            .recorded()
            .iter()
            .all(|d| *d == Duration::from_secs(2))
    );
    assert_eq!(h.store.delete_keys().len(), 1);
}

#[tokio::test]
async fn given_custom_poll_policy_when_polling_then_budget_and_interval_are_honoured() {
    let policy = PollPolicy {
        max_attempts: 3,
        interval: Duration::from_millis(10),
    };
    let h = harness(
        RecordingMediaStore::default(),
        ScriptedJobService::never_finishing(),
        StubResultFetcher::returning("unused"),
        policy,
    );

    let err = h
        .orchestrator
        .submit(audio(), "audio/wav", "a.wav", "hi-IN")
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestrationError::Timeout { attempts: 3 }));
    assert_eq!(h.jobs.status_queries(), 3);
    assert_eq!(
        h.sleeper.recorded(),
        vec![Duration::from_millis(10), Duration::from_millis(10)]
    );
}

#[tokio::test]
async fn given_unrecognised_remote_status_when_polling_then_keeps_waiting() {
    let h = harness(
        RecordingMediaStore::default(),
        ScriptedJobService::new(vec![
            JobSnapshot::running(RemoteJobStatus::Queued),
            JobSnapshot::running(RemoteJobStatus::Other("CANCELLED".to_string())),
            JobSnapshot::completed(RESULT_URI),
        ]),
        StubResultFetcher::returning("done"),
        PollPolicy::default(),
    );

    let outcome = h
        .orchestrator
        .submit(audio(), "audio/ogg", "a.ogg", "hi-IN")
        .await
        .unwrap();

    assert_eq!(outcome.text, "done");
    assert_eq!(h.jobs.status_queries(), 3);
}

#[tokio::test]
async fn given_empty_transcript_payload_when_job_completes_then_returns_empty_text() {
    let h = harness(
        RecordingMediaStore::default(),
        ScriptedJobService::new(vec![JobSnapshot::completed(RESULT_URI)]),
        StubResultFetcher::returning(""),
        PollPolicy::default(),
    );

    let outcome = h
        .orchestrator
        .submit(audio(), "audio/webm", "clip.webm", "hi-IN")
        .await
        .unwrap();

    assert_eq!(outcome.text, "");
}

#[tokio::test]
async fn given_empty_audio_when_submitting_then_no_collaborator_is_called() {
    let h = harness(
        RecordingMediaStore::default(),
        ScriptedJobService::never_finishing(),
        StubResultFetcher::returning("unused"),
        PollPolicy::default(),
    );

    let err = h
        .orchestrator
        .submit(Bytes::new(), "audio/webm", "clip.webm", "hi-IN")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(h.store.put_keys().is_empty());
    assert!(h.store.delete_keys().is_empty());
    assert!(h.jobs.started_requests().is_empty());
    assert_eq!(h.jobs.status_queries(), 0);
}

#[tokio::test]
async fn given_staging_fails_when_submitting_then_no_job_is_started() {
    let h = harness(
        RecordingMediaStore::failing_put(),
        ScriptedJobService::never_finishing(),
        StubResultFetcher::returning("unused"),
        PollPolicy::default(),
    );

    let err = h
        .orchestrator
        .submit(audio(), "audio/webm", "clip.webm", "hi-IN")
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestrationError::Store(_)));
    assert_eq!(err.kind(), ErrorKind::ServerError);
    assert!(h.jobs.started_requests().is_empty());
    assert!(h.store.delete_keys().is_empty());
}

#[tokio::test]
async fn given_job_submission_fails_when_submitting_then_staged_audio_is_cleaned_up() {
    let h = harness(
        RecordingMediaStore::default(),
        ScriptedJobService::failing_start(),
        StubResultFetcher::returning("unused"),
        PollPolicy::default(),
    );

    let err = h
        .orchestrator
        .submit(audio(), "audio/webm", "clip.webm", "hi-IN")
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestrationError::Submission(_)));
    assert_eq!(err.kind(), ErrorKind::ServerError);
    assert_eq!(h.jobs.status_queries(), 0);
    assert_eq!(h.store.delete_keys(), h.store.put_keys());
}

#[tokio::test]
async fn given_status_query_errors_when_polling_then_aborts_without_retrying() {
    let jobs = ScriptedJobService::new(vec![in_progress()]);
    jobs.push_error(JobServiceError::ApiRequestFailed("status 503".to_string()));
    let h = harness(
        RecordingMediaStore::default(),
        jobs,
        StubResultFetcher::returning("unused"),
        PollPolicy::default(),
    );

    let err = h
        .orchestrator
        .submit(audio(), "audio/webm", "clip.webm", "hi-IN")
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestrationError::StatusQuery(_)));
    assert_eq!(err.kind(), ErrorKind::ServerError);
    assert_eq!(h.jobs.status_queries(), 2);
    assert_eq!(h.store.delete_keys().len(), 1);
}

#[tokio::test]
async fn given_fetch_fails_after_completion_when_submitting_then_cleanup_still_runs() {
    let h = harness(
        RecordingMediaStore::default(),
        ScriptedJobService::new(vec![JobSnapshot::completed(RESULT_URI)]),
        StubResultFetcher::failing(),
        PollPolicy::default(),
    );

    let err = h
        .orchestrator
        .submit(audio(), "audio/webm", "clip.webm", "hi-IN")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrchestrationError::Fetch(FetchError::RequestFailed(_))
    ));
    assert_eq!(err.kind(), ErrorKind::ServerError);
    assert_eq!(h.store.delete_keys().len(), 1);
}

#[tokio::test]
async fn given_completed_job_without_reference_when_polling_then_reports_missing_reference() {
    let completed_without_uri = JobSnapshot {
        status: RemoteJobStatus::Completed,
        result_reference: None,
        failure_reason: None,
    };
    let h = harness(
        RecordingMediaStore::default(),
        ScriptedJobService::new(vec![completed_without_uri]),
        StubResultFetcher::returning("unused"),
        PollPolicy::default(),
    );

    let err = h
        .orchestrator
        .submit(audio(), "audio/webm", "clip.webm", "hi-IN")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrchestrationError::Fetch(FetchError::MissingReference)
    ));
    assert!(h.fetcher.fetched().is_empty());
    assert_eq!(h.store.delete_keys().len(), 1);
}

#[tokio::test]
async fn given_cleanup_fails_when_job_succeeds_then_outcome_is_still_success() {
    let h = harness(
        RecordingMediaStore::failing_delete(),
        ScriptedJobService::new(vec![JobSnapshot::completed(RESULT_URI)]),
        StubResultFetcher::returning("still fine"),
        PollPolicy::default(),
    );

    let outcome = h
        .orchestrator
        .submit(audio(), "audio/webm", "clip.webm", "hi-IN")
        .await
        .unwrap();

    assert_eq!(outcome.text, "still fine");
    assert_eq!(h.store.delete_keys().len(), 1);
}

#[tokio::test]
async fn given_custom_prefixes_when_submitting_then_job_id_and_key_use_them() {
    let h = harness(
        RecordingMediaStore::default(),
        ScriptedJobService::new(vec![JobSnapshot::completed(RESULT_URI)]),
        StubResultFetcher::returning("ok"),
        PollPolicy::default(),
    );
    let orchestrator = h.orchestrator.with_job_prefix("stt").with_key_prefix("audio/in");

    let outcome = orchestrator
        .submit(audio(), "audio/wav", "a.wav", "hi-IN")
        .await
        .unwrap();

    assert!(outcome.job_id.as_str().starts_with("stt-"));
    assert_eq!(
        h.store.put_keys(),
        vec![format!("audio/in/{}.wav", outcome.job_id)]
    );
}

#[tokio::test]
async fn given_two_submissions_when_running_concurrently_then_each_gets_its_own_job_and_key() {
    let h = harness(
        RecordingMediaStore::default(),
        ScriptedJobService::new(vec![
            JobSnapshot::completed(RESULT_URI),
            JobSnapshot::completed(RESULT_URI),
        ]),
        StubResultFetcher::returning("ok"),
        PollPolicy::default(),
    );

    let (a, b) = tokio::join!(
        h.orchestrator.submit(audio(), "audio/webm", "a.webm", "hi-IN"),
        h.orchestrator.submit(audio(), "audio/webm", "b.webm", "hi-IN"),
    );

    let (a, b) = (a.unwrap(), b.unwrap());
    assert_ne!(a.job_id, b.job_id);

    let keys = h.store.put_keys();
    assert_eq!(keys.len(), 2);
    assert_ne!(keys[0], keys[1]);
}
