//! WifiController: registration pass-through alongside the status stream

mod common;

use std::time::Duration;

use tokio::time::sleep;

use common::{home, RecordingRegistrar, ScriptedProvider};
use wifi_monitor::{NetworkSecurity, PollConfig, Publication, WifiController};

fn fast_config() -> PollConfig {
    PollConfig {
        stabilization_window: Duration::ZERO,
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_controller_starts_polling_on_construction() {
    let provider = ScriptedProvider::always(home());
    let controller = WifiController::new(provider.clone(), RecordingRegistrar::default(), fast_config());

    assert_eq!(controller.poll_interval(), Duration::from_millis(500));
    assert!(controller.monitor().is_running());

    sleep(Duration::from_millis(1100)).await;
    assert!(matches!(controller.latest(), Some(Publication::Report(_))));
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_add_and_list_networks() {
    let controller = WifiController::new(
        ScriptedProvider::always(home()),
        RecordingRegistrar::default(),
        fast_config(),
    );

    controller.add_open_network("cafe").await.unwrap();
    controller.add_network("home", "correcthorse", false).await.unwrap();
    controller.add_network("legacy", "abcde", true).await.unwrap();

    let ssids = controller.configured_ssids().await.unwrap();
    assert_eq!(ssids, vec!["cafe", "home", "legacy"]);
}

#[tokio::test(start_paused = true)]
async fn test_registration_errors_stay_off_the_stream() {
    let registrar = RecordingRegistrar {
        fail: true,
        ..Default::default()
    };
    let controller = WifiController::new(ScriptedProvider::always(home()), registrar, fast_config());
    let mut sub = controller.subscribe();

    let err = controller.add_network("home", "correcthorse", false).await.unwrap_err();
    assert!(err.to_string().contains("host refused"));

    let next = sub.next().await.unwrap();
    assert!(matches!(next, Publication::Report(_)));
    assert!(!controller.monitor().is_terminated());
}

#[tokio::test(start_paused = true)]
async fn test_invalid_credentials_rejected() {
    let registrar = RecordingRegistrar::default();
    let controller = WifiController::new(ScriptedProvider::always(home()), registrar, fast_config());

    assert!(controller.add_network("home", "short", false).await.is_err());
    assert!(controller.configured_ssids().await.unwrap().is_empty());
}

#[test]
fn test_credentials_security_mapping() {
    let creds = wifi_monitor::NetworkCredentials::with_passphrase("home", "correcthorse", false);
    assert_eq!(
        creds.security,
        NetworkSecurity::Wpa {
            passphrase: "correcthorse".to_string()
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_controller_interval_change() {
    let mut controller = WifiController::new(
        ScriptedProvider::always(home()),
        RecordingRegistrar::default(),
        fast_config(),
    );

    assert_eq!(controller.set_poll_interval(Duration::from_secs(2)), Duration::from_secs(2));
    controller.stop();
    assert!(!controller.monitor().is_running());
    controller.start().unwrap();
    assert_eq!(controller.poll_interval(), Duration::from_secs(2));
}
