// Integration tests for configuring and running a countdown end to end
mod fixtures;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Duration;
use pretty_assertions::assert_eq;
use serial_test::serial;

use celebration_countdown::models::countdown::CountdownState;
use celebration_countdown::models::settings::CountdownSettings;
use celebration_countdown::services::clock::{FixedClock, ManualClock};
use celebration_countdown::services::countdown::{CountdownSession, ExpireCallback, FormattedDuration};
use celebration_countdown::services::settings::{SettingsService, ENV_TARGET, ENV_TIMEZONE};
use celebration_countdown::ConfigurationError;

fn counter() -> (Arc<AtomicUsize>, ExpireCallback) {
    let count = Arc::new(AtomicUsize::new(0));
    let inner = Arc::clone(&count);
    let callback: ExpireCallback = Box::new(move || {
        inner.fetch_add(1, Ordering::SeqCst);
    });
    (count, callback)
}

#[test]
fn test_birthday_scenario_one_day_two_hours() {
    let session = CountdownSession::new(
        fixtures::birthday(),
        FixedClock(fixtures::before_birthday(1, 2)),
        None,
    );

    let snapshot = session.snapshot();
    assert_eq!(snapshot.state, CountdownState::Running);
    assert_eq!(
        FormattedDuration::from(&snapshot.remaining).to_string(),
        "01:02:00:00.00"
    );
}

#[test]
fn test_session_walks_to_expiry_once() {
    let clock = Arc::new(ManualClock::new(fixtures::before_birthday(0, 1)));
    let (fired, on_expire) = counter();
    let mut session = CountdownSession::new(fixtures::birthday(), Arc::clone(&clock), Some(on_expire));

    let mut last_total = session.snapshot().remaining.total_ms;
    for _ in 0..6 {
        clock.advance(Duration::minutes(10));
        let snapshot = session.tick();
        assert!(snapshot.remaining.total_ms < last_total);
        last_total = snapshot.remaining.total_ms;
    }
    assert_eq!(last_total, 0);
    assert!(session.is_expired());

    for _ in 0..10 {
        clock.advance(Duration::milliseconds(10));
        session.tick();
    }
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn test_past_target_fires_before_first_read() {
    let (fired, on_expire) = counter();
    let now = fixtures::birthday_utc() + Duration::days(30);
    let session = CountdownSession::new(fixtures::birthday(), FixedClock(now), Some(on_expire));

    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert!(session.snapshot().is_expired());
}

#[test]
fn test_sessions_share_one_target() {
    let target = fixtures::birthday();
    let a = CountdownSession::new(Arc::clone(&target), FixedClock(fixtures::before_birthday(2, 0)), None);
    let b = CountdownSession::new(Arc::clone(&target), FixedClock(fixtures::before_birthday(0, 5)), None);

    assert_eq!(a.snapshot().remaining.days, 2);
    assert_eq!(b.snapshot().remaining.hours, 5);
    assert_eq!(Arc::strong_count(&target), 3);
}

#[test]
#[serial]
fn test_environment_configures_session() {
    std::env::set_var(ENV_TARGET, "2024-12-10T00:00:00");
    std::env::set_var(ENV_TIMEZONE, "UTC");

    let settings = SettingsService::new(None).load().expect("settings load");

    std::env::remove_var(ENV_TARGET);
    std::env::remove_var(ENV_TIMEZONE);

    // Midnight UTC is 05:30 later than midnight in Kolkata.
    let utc_midnight = fixtures::birthday_utc() + Duration::minutes(330);
    let session = CountdownSession::from_settings(
        &settings,
        FixedClock(utc_midnight - Duration::hours(3)),
        None,
    )
    .unwrap();
    assert_eq!(session.snapshot().remaining.hours, 3);
}

#[test]
#[serial]
fn test_unset_environment_uses_defaults() {
    std::env::remove_var(ENV_TARGET);
    std::env::remove_var(ENV_TIMEZONE);

    let settings = SettingsService::new(None).load().unwrap();
    assert_eq!(settings.target, CountdownSettings::default().target);
    assert_eq!(settings.timezone, "Asia/Kolkata");
}

#[test]
fn test_bad_configuration_never_starts() {
    let (fired, on_expire) = counter();
    let settings = CountdownSettings {
        target: "the tenth of december".into(),
        ..CountdownSettings::default()
    };

    let result = CountdownSession::from_settings(
        &settings,
        FixedClock(fixtures::birthday_utc()),
        Some(on_expire),
    );
    assert!(matches!(result, Err(ConfigurationError::InvalidTarget { .. })));
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}
