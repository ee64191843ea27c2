use std::time::Duration;

use pretty_assertions::assert_eq;
use scout_core::{FailureReason, ProbeOutcome, ProbeRequest};
use scout_engine::{ProbeError, ProbeSettings, Prober, ReqwestProber};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(base: &str, value: u64) -> ProbeRequest {
    ProbeRequest {
        url: format!("{base}/page/{value}"),
        value,
    }
}

#[tokio::test]
async fn probe_classifies_mixed_statuses_in_input_order() {
    let server = MockServer::start().await;
    // The first request is the slowest, so completion order differs from
    // input order; results must still come back by input index.
    Mock::given(method("GET"))
        .and(path("/page/10"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(100)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/page/11"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/page/12"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let prober = ReqwestProber::new(ProbeSettings::default()).expect("client");
    let requests = vec![
        request(&server.uri(), 10),
        request(&server.uri(), 11),
        request(&server.uri(), 12),
    ];

    let results = prober.probe(&requests).await.expect("probe ok");

    let values: Vec<_> = results.iter().map(|r| r.value).collect();
    assert_eq!(values, vec![10, 11, 12]);
    assert!(results[0].succeeded());
    assert!(!results[1].succeeded());
    assert_eq!(
        results[1].outcome,
        ProbeOutcome::Failure {
            reason: FailureReason::HttpStatus(404)
        }
    );
    assert!(results[2].succeeded());
}

#[tokio::test]
async fn slow_request_times_out_without_failing_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page/5"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(250)))
        .mount(&server)
        .await;

    let settings = ProbeSettings {
        request_timeout: Duration::from_millis(50),
        ..ProbeSettings::default()
    };
    let prober = ReqwestProber::new(settings).expect("client");

    let results = prober
        .probe(&[request(&server.uri(), 5)])
        .await
        .expect("probe ok");

    assert_eq!(
        results[0].outcome,
        ProbeOutcome::Failure {
            reason: FailureReason::Timeout
        }
    );
}

#[tokio::test]
async fn connection_failure_classifies_as_network_not_fatal() {
    // Port 9 (discard) refuses connections on typical hosts.
    let prober = ReqwestProber::new(ProbeSettings::default()).expect("client");
    let requests = vec![ProbeRequest {
        url: "http://127.0.0.1:9/closed".to_string(),
        value: 1,
    }];

    let results = prober.probe(&requests).await.expect("probe ok");

    assert_eq!(results[0].value, 1);
    assert_eq!(
        results[0].outcome,
        ProbeOutcome::Failure {
            reason: FailureReason::Network
        }
    );
}

#[tokio::test]
async fn run_deadline_aborts_the_whole_probe_phase() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page/1"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let settings = ProbeSettings {
        run_deadline: Some(Duration::from_millis(50)),
        ..ProbeSettings::default()
    };
    let prober = ReqwestProber::new(settings).expect("client");

    let err = prober
        .probe(&[request(&server.uri(), 1)])
        .await
        .unwrap_err();
    assert!(matches!(err, ProbeError::DeadlineExceeded(_)));
}

#[tokio::test]
async fn empty_request_set_yields_empty_results() {
    let prober = ReqwestProber::new(ProbeSettings::default()).expect("client");
    let results = prober.probe(&[]).await.expect("probe ok");
    assert!(results.is_empty());
}
