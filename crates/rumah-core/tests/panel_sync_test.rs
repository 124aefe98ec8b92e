// Integration tests for the panel sync lifecycle against a mock backend.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rumah_core::{Command, ConnectionState, CoreError, HouseMode, Panel, PanelConfig};

fn config_for(server: &MockServer) -> PanelConfig {
    PanelConfig {
        url: server.uri().parse().expect("mock server URI is valid"),
        // Long enough that the background poll never fires during a test;
        // re-syncs under test are the forced post-command ones.
        poll_interval: Duration::from_secs(60),
        timeout: Duration::from_secs(5),
    }
}

fn status_body(mode: &str, kamar1_light: bool) -> serde_json::Value {
    json!({
        "status": mode,
        "rooms": {
            "kamar1": {"name": "Kamar 1", "light": kamar1_light, "occupied": false},
            "dapur": {"name": "Dapur", "light": false, "occupied": false}
        },
        "devices": {
            "kompor": {"name": "Kompor", "status": true}
        },
        "energy_usage": 300.0,
        "peak_usage": 450.0,
        "avg_usage": 120.0
    })
}

async fn mount_reads(server: &MockServer, status: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/notifications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn connect_populates_the_store() {
    let server = MockServer::start().await;
    mount_reads(&server, status_body("berpenghuni", true)).await;

    let panel = Panel::new(config_for(&server)).expect("panel builds");
    panel.connect().await.expect("connect succeeds");

    let snap = panel.snapshot();
    assert_eq!(snap.mode, HouseMode::Occupied);
    assert!(snap.room("kamar1").expect("kamar1 present").light);
    assert!(snap.device("kompor").expect("kompor present").active);
    assert!((snap.energy.current_watts - 300.0).abs() < f64::EPSILON);
    assert!(snap.fetched_at.is_some());

    panel.disconnect().await;
}

#[tokio::test]
async fn unreachable_backend_degrades_instead_of_dying() {
    let config = PanelConfig {
        url: "http://127.0.0.1:1".parse().expect("valid URL"),
        poll_interval: Duration::from_secs(60),
        timeout: Duration::from_secs(1),
    };

    let panel = Panel::new(config).expect("panel builds");
    let err = panel.connect().await.expect_err("first fetch must fail");
    assert!(matches!(
        err,
        CoreError::ConnectionFailed { .. } | CoreError::Api { .. }
    ));

    // Not fatal: the poll task is running and the state is Degraded,
    // ready to flip to Connected when the backend appears.
    assert_eq!(
        *panel.connection_state().borrow(),
        ConnectionState::Degraded
    );
    panel.disconnect().await;
}

#[tokio::test]
async fn polling_recovers_after_a_failed_initial_fetch() {
    let server = MockServer::start().await;

    // The backend answers the very first status request with an error,
    // then behaves normally.
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "belum siap"})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_reads(&server, status_body("kosong", false)).await;

    let config = PanelConfig {
        url: server.uri().parse().expect("mock server URI is valid"),
        poll_interval: Duration::from_millis(50),
        timeout: Duration::from_secs(5),
    };
    let panel = Panel::new(config).expect("panel builds");

    panel.connect().await.expect_err("first fetch must fail");
    assert!(panel.snapshot().fetched_at.is_none());

    let mut state = panel.connection_state();
    tokio::time::timeout(Duration::from_secs(5), async {
        while *state.borrow_and_update() != ConnectionState::Connected {
            state.changed().await.expect("state sender alive");
        }
    })
    .await
    .expect("a later poll reconnects");

    assert!(panel.snapshot().room("kamar1").is_some());
    panel.disconnect().await;
}

#[tokio::test]
async fn rejected_command_surfaces_message_and_still_resyncs() {
    let server = MockServer::start().await;
    mount_reads(&server, status_body("berpenghuni", false)).await;

    // Stove toggle refused mid-cook: HTTP 200 with success=false.
    Mock::given(method("POST"))
        .and(path("/api/device/kompor/toggle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Kompor sedang aktif"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let panel = Panel::new(config_for(&server)).expect("panel builds");
    panel.connect().await.expect("connect succeeds");

    let before = panel.store().last_seq();
    let err = panel
        .execute(Command::ToggleDevice {
            device_id: "kompor".into(),
        })
        .await
        .expect_err("toggle must be rejected");

    assert!(err.is_rejection());
    assert_eq!(err.to_string(), "Kompor sedang aktif");
    // The forced post-command re-sync ran even though the command failed.
    assert!(panel.store().last_seq() > before);

    panel.disconnect().await;
}

#[tokio::test]
async fn successful_command_forces_a_resync() {
    let server = MockServer::start().await;
    mount_reads(&server, status_body("berpenghuni", true)).await;

    Mock::given(method("POST"))
        .and(path("/api/room/kamar1/toggle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let panel = Panel::new(config_for(&server)).expect("panel builds");
    panel.connect().await.expect("connect succeeds");

    panel
        .execute(Command::ToggleRoomLight {
            room_id: "kamar1".into(),
        })
        .await
        .expect("toggle succeeds");

    // connect applied seq 1; the post-command re-sync applied seq 2
    assert_eq!(panel.store().last_seq(), 2);

    // status was fetched twice in total
    let status_hits = server
        .received_requests()
        .await
        .expect("request recording enabled")
        .iter()
        .filter(|r| r.url.path() == "/api/status")
        .count();
    assert_eq!(status_hits, 2);

    panel.disconnect().await;
}

#[tokio::test]
async fn alerts_fire_only_for_notifications_not_in_the_previous_poll() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("kosong", false)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    // First fetch (connect) sees notification 1; later fetches see 1 and 2.
    Mock::given(method("GET"))
        .and(path("/api/notifications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "timestamp": "10:00:00", "type": "warning",
             "message": "Lampu dinyalakan", "icon": "💡", "sound_type": "light"}
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/notifications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "timestamp": "10:00:00", "type": "warning",
             "message": "Lampu dinyalakan", "icon": "💡", "sound_type": "light"},
            {"id": 2, "timestamp": "10:00:05", "type": "danger",
             "message": "Kompor menyala", "icon": "🔥", "sound_type": "device"}
        ])))
        .mount(&server)
        .await;

    let panel = Panel::new(config_for(&server)).expect("panel builds");
    panel.connect().await.expect("connect succeeds");

    let mut alerts = panel.alerts();

    // Connecting primed the deduper with id 1 -- no replay for it, and the
    // manual refresh discovers only id 2 as fresh.
    panel.refresh().await.expect("refresh succeeds");

    let alert = alerts.try_recv().expect("one fresh alert");
    assert_eq!(alert.id, 2);
    assert_eq!(alert.message, "Kompor menyala");
    assert!(alerts.try_recv().is_err());

    // A further refresh sees the same set again -- nothing new fires.
    panel.refresh().await.expect("refresh succeeds");
    assert!(alerts.try_recv().is_err());

    panel.disconnect().await;
}
