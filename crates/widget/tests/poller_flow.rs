//! End-to-end poller tests against a mocked `/subscription/check` endpoint

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mockito::{Mock, ServerGuard};
use serde_json::{json, Value};
use subwatch_widget::{
    render::ALERT_CLASS, AlertKind, AlertState, MemorySurface, PollError, SubscriptionPoller,
    WidgetConfig,
};

const CHECK_PATH: &str = "/subscription/check";

fn config_for(server: &ServerGuard) -> WidgetConfig {
    WidgetConfig {
        check_url: format!("{}{}", server.url(), CHECK_PATH),
        renew_url: "https://billing.example.com/tenant/subscription-expired".to_string(),
        request_timeout: Duration::from_secs(2),
        ..WidgetConfig::default()
    }
}

async fn serve(server: &mut ServerGuard, status: usize, body: Value) -> Mock {
    server
        .mock("GET", CHECK_PATH)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

fn envelope(is_expired: bool, days: Option<f64>) -> Value {
    json!({
        "success": true,
        "message": if is_expired { "expired" } else { "active" },
        "data": { "is_expired": is_expired, "days_until_expiry": days, "status": "active" }
    })
}

async fn alert_kinds(poller: &SubscriptionPoller<MemorySurface>) -> Vec<AlertKind> {
    let surface = poller.surface();
    let surface = surface.lock().await;
    surface.alerts().iter().map(|a| a.kind).collect()
}

#[tokio::test]
async fn test_warning_threshold_edge() {
    let mut server = mockito::Server::new_async().await;
    let poller = SubscriptionPoller::new(config_for(&server), MemorySurface::new()).unwrap();

    let mock = serve(&mut server, 200, envelope(false, Some(7.0))).await;
    assert_eq!(poller.poll().await.unwrap(), AlertState::Warning { days_left: 7 });
    assert_eq!(alert_kinds(&poller).await, vec![AlertKind::Warning]);
    mock.remove_async().await;

    let _mock = serve(&mut server, 200, envelope(false, Some(8.0))).await;
    assert_eq!(poller.poll().await.unwrap(), AlertState::None);
    assert!(alert_kinds(&poller).await.is_empty());
}

#[tokio::test]
async fn test_repeated_polls_keep_single_alert() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", CHECK_PATH)
        .with_status(200)
        .with_body(envelope(true, Some(-1.5)).to_string())
        .expect(3)
        .create_async()
        .await;
    let poller = SubscriptionPoller::new(config_for(&server), MemorySurface::new()).unwrap();

    for _ in 0..3 {
        assert_eq!(poller.poll().await.unwrap(), AlertState::Expired);
    }

    let surface = poller.surface();
    let surface = surface.lock().await;
    assert_eq!(surface.count_with_class(ALERT_CLASS), 1);
    assert!(surface.current().unwrap().html.contains("subscription-expired"));
    drop(surface);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_failed_poll_leaves_alert_unchanged() {
    let mut server = mockito::Server::new_async().await;
    let poller = SubscriptionPoller::new(config_for(&server), MemorySurface::new()).unwrap();

    let mock = serve(&mut server, 200, envelope(false, Some(2.5))).await;
    poller.poll().await.unwrap();
    mock.remove_async().await;

    // Failure envelope from the service
    let mock = serve(
        &mut server,
        500,
        json!({ "success": false, "message": "verification error", "data": null }),
    )
    .await;
    match poller.poll().await {
        Err(PollError::Rejected { status, message }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(message, "verification error");
        }
        other => panic!("Expected Rejected, got: {:?}", other),
    }
    assert_eq!(alert_kinds(&poller).await, vec![AlertKind::Warning]);
    mock.remove_async().await;

    // Body that is not an envelope
    let _mock = server
        .mock("GET", CHECK_PATH)
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;
    assert!(matches!(poller.poll().await, Err(PollError::Decode { .. })));
    assert_eq!(alert_kinds(&poller).await, vec![AlertKind::Warning]);
}

#[tokio::test]
async fn test_success_without_data_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = serve(
        &mut server,
        200,
        json!({ "success": true, "message": "active", "data": null }),
    )
    .await;
    let poller = SubscriptionPoller::new(config_for(&server), MemorySurface::new()).unwrap();

    assert!(matches!(poller.poll().await, Err(PollError::MissingData)));
    assert!(alert_kinds(&poller).await.is_empty());
}

#[tokio::test]
async fn test_unreachable_service_is_an_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = WidgetConfig {
        check_url: format!("http://{}{}", addr, CHECK_PATH),
        ..WidgetConfig::default()
    };
    let poller = SubscriptionPoller::new(config, MemorySurface::new()).unwrap();

    assert!(matches!(poller.poll().await, Err(PollError::Http(_))));
}

#[tokio::test]
async fn test_start_checks_immediately_and_stop_clears() {
    let mut server = mockito::Server::new_async().await;
    let mock = serve(&mut server, 200, envelope(false, Some(1.0))).await;
    let mut poller = SubscriptionPoller::new(config_for(&server), MemorySurface::new()).unwrap();

    poller.start();
    assert!(poller.is_running());

    // The first check runs right away, long before the 30 minute interval
    let mut rendered = false;
    for _ in 0..100 {
        if !alert_kinds(&poller).await.is_empty() {
            rendered = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(rendered, "immediate check should render a warning");
    mock.assert_async().await;

    poller.stop().await;
    assert!(!poller.is_running());
    assert!(alert_kinds(&poller).await.is_empty());
}

async fn wait_for_kinds(poller: &SubscriptionPoller<MemorySurface>, expected: &[AlertKind]) -> bool {
    for _ in 0..100 {
        if alert_kinds(poller).await == expected {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}

#[tokio::test]
async fn test_timer_keeps_polling_after_a_failed_tick() {
    let mut server = mockito::Server::new_async().await;
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let mock = server
        .mock("GET", CHECK_PATH)
        .with_status(200)
        .with_body_from_request(move |_| {
            let body = match counter.fetch_add(1, Ordering::SeqCst) {
                0 => envelope(false, Some(5.0)).to_string(),
                1 => "<html>Bad Gateway</html>".to_string(),
                _ => envelope(true, Some(-0.5)).to_string(),
            };
            body.into_bytes()
        })
        .expect_at_least(3)
        .create_async()
        .await;

    let config = WidgetConfig {
        poll_interval: Duration::from_millis(300),
        ..config_for(&server)
    };
    let mut poller = SubscriptionPoller::new(config, MemorySurface::new()).unwrap();
    poller.start();

    assert!(wait_for_kinds(&poller, &[AlertKind::Warning]).await);

    // Second tick fails to decode; the warning from the first tick stays up
    for _ in 0..100 {
        if hits.load(Ordering::SeqCst) >= 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(hits.load(Ordering::SeqCst) >= 2);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(alert_kinds(&poller).await, vec![AlertKind::Warning]);
    assert!(poller.is_running());

    // Third tick still runs and replaces the warning
    assert!(wait_for_kinds(&poller, &[AlertKind::Expired]).await);
    mock.assert_async().await;

    poller.stop().await;
    assert!(alert_kinds(&poller).await.is_empty());
}

#[tokio::test]
async fn test_dismiss_only_closes_warning() {
    let mut server = mockito::Server::new_async().await;
    let poller = SubscriptionPoller::new(config_for(&server), MemorySurface::new()).unwrap();

    let mock = serve(&mut server, 200, envelope(false, Some(3.0))).await;
    poller.poll().await.unwrap();
    assert!(poller.dismiss().await);
    assert!(alert_kinds(&poller).await.is_empty());
    mock.remove_async().await;

    let _mock = serve(&mut server, 200, envelope(true, None)).await;
    poller.poll().await.unwrap();
    assert!(!poller.dismiss().await);
    assert_eq!(alert_kinds(&poller).await, vec![AlertKind::Expired]);
}
