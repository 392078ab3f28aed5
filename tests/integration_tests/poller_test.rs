//! Status poller integration tests
//!
//! Runs the background poller against a mock platform and checks that
//! changes reach subscribed listeners once, oldest first.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use roomdesk::room_status::{
    RoomId, RoomStatus, RoomStatusClient, RoomStatusCoordinator, StatusPoller,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::fixtures::{client_with_retries, BASELINE_LOGS, UPDATED_LOGS};

type Seen = Arc<Mutex<Vec<(RoomId, RoomStatus, RoomStatus)>>>;

async fn wait_for(seen: &Seen, count: usize) {
    for _ in 0..100 {
        if seen.lock().unwrap().len() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

#[tokio::test]
async fn test_poller_replays_new_changes_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/rooms/21/status/recent"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BASELINE_LOGS))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/rooms/21/status/recent"))
        .respond_with(ResponseTemplate::new(200).set_body_string(UPDATED_LOGS))
        .mount(&mock_server)
        .await;

    let api = Arc::new(client_with_retries(&mock_server, 0));
    let coordinator = Arc::new(RoomStatusCoordinator::new(Arc::new(RoomStatusClient::new(api))));

    let seen: Seen = Arc::default();
    let sink = Arc::clone(&seen);
    let subscription = coordinator.subscribe_to_status_changes(
        21,
        Arc::new(
            move |room_id: RoomId, old: RoomStatus, new: RoomStatus| -> anyhow::Result<()> {
                sink.lock().unwrap().push((room_id, old, new));
                Ok(())
            },
        ),
    );

    let poller = StatusPoller::start(
        Arc::clone(&coordinator),
        vec![21],
        Duration::from_millis(20),
        5,
    );
    assert!(poller.is_running());

    wait_for(&seen, 2).await;
    // A few more ticks must not replay anything
    tokio::time::sleep(Duration::from_millis(100)).await;
    poller.stop();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            (21, RoomStatus::Available, RoomStatus::Occupied),
            (21, RoomStatus::Occupied, RoomStatus::Cleaning),
        ]
    );

    assert!(subscription.unsubscribe());
    assert_eq!(coordinator.subscriber_count(21), 0);
}

#[tokio::test]
async fn test_poller_survives_failing_listener() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/rooms/21/status/recent"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BASELINE_LOGS))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/rooms/21/status/recent"))
        .respond_with(ResponseTemplate::new(200).set_body_string(UPDATED_LOGS))
        .mount(&mock_server)
        .await;

    let api = Arc::new(client_with_retries(&mock_server, 0));
    let coordinator = Arc::new(RoomStatusCoordinator::new(Arc::new(RoomStatusClient::new(api))));

    let _failing = coordinator.subscribe_to_status_changes(
        21,
        Arc::new(
            |_: RoomId, _: RoomStatus, _: RoomStatus| -> anyhow::Result<()> {
                anyhow::bail!("display offline")
            },
        ),
    );

    let seen: Seen = Arc::default();
    let sink = Arc::clone(&seen);
    let _recording = coordinator.subscribe_to_status_changes(
        21,
        Arc::new(
            move |room_id: RoomId, old: RoomStatus, new: RoomStatus| -> anyhow::Result<()> {
                sink.lock().unwrap().push((room_id, old, new));
                Ok(())
            },
        ),
    );

    let poller = StatusPoller::start(
        Arc::clone(&coordinator),
        vec![21],
        Duration::from_millis(20),
        5,
    );

    wait_for(&seen, 2).await;
    poller.stop();

    assert_eq!(seen.lock().unwrap().len(), 2);
}
