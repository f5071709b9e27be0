//! EventController behaviour against mock collaborators.

use collision_alert::app::controller::{COLLISION_MESSAGE, IDLE_PROMPT};
use collision_alert::app::model::{
    AlertOutcome, Coordinates, ReconcileOutcome, SensorState, TelemetryReport,
};
use collision_alert::config::SystemConfig;

use crate::mock_hw::{AlertCall, FIX, Rig};

use SensorState::{Idle, Triggered};

fn rig() -> Rig {
    Rig::new(&SystemConfig::default())
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_shows_prompt_with_actuators_off() {
    let r = rig();
    assert_eq!(r.controller.state(), Idle);
    assert_eq!(r.status().shown, vec![IDLE_PROMPT.to_string()]);
    assert_eq!(r.alert().calls, vec![AlertCall::Stop]);
    assert!(r.reports().is_empty());
}

#[test]
fn quiet_polls_change_nothing() {
    let mut r = rig();
    for _ in 0..10 {
        assert_eq!(r.controller.reconcile(), ReconcileOutcome::Unchanged);
    }
    assert_eq!(r.controller.stats().polls, 10);
    assert!(r.reports().is_empty());
    assert_eq!(r.status().shown.len(), 1);
}

// ── Transitions ───────────────────────────────────────────────

#[test]
fn collision_runs_full_alert_sequence() {
    let mut r = rig();
    r.press(Triggered);

    assert_eq!(
        r.controller.reconcile(),
        ReconcileOutcome::Transitioned { from: Idle, to: Triggered }
    );
    assert_eq!(r.controller.state(), Triggered);
    assert_eq!(r.location().reads, 1);
    assert_eq!(r.status().current(), Some(COLLISION_MESSAGE));
    assert_eq!(r.reports(), &[TelemetryReport::collision(FIX)]);
    assert_eq!(
        r.alert().calls,
        vec![
            AlertCall::Stop,
            AlertCall::Run { budget_ms: 5_000 },
            AlertCall::Stop,
        ]
    );
    assert_eq!(r.alert().outcomes, vec![AlertOutcome::Completed]);
    assert!(!r.alert().active);
}

#[test]
fn clearing_shows_prompt_and_reports_origin() {
    let mut r = rig();
    r.press(Triggered);
    r.controller.reconcile();

    r.press(Idle);
    assert_eq!(
        r.controller.reconcile(),
        ReconcileOutcome::Transitioned { from: Triggered, to: Idle }
    );
    assert_eq!(r.controller.state(), Idle);
    assert_eq!(r.status().current(), Some(IDLE_PROMPT));

    let last = r.reports().last().copied().unwrap();
    assert!(!last.collision);
    assert_eq!(last.position, Coordinates::ORIGIN);

    assert_eq!(r.alert().calls.last(), Some(&AlertCall::Stop));
    assert_eq!(r.alert().runs(), 1);
    // Location is only read for collisions.
    assert_eq!(r.location().reads, 1);
}

#[test]
fn level_change_without_edge_is_still_observed() {
    let mut r = rig();
    r.line.set(Triggered);
    assert!(matches!(r.controller.reconcile(), ReconcileOutcome::Transitioned { .. }));
    assert_eq!(r.controller.state(), Triggered);
}

#[test]
fn held_sensor_does_not_retrigger() {
    let mut r = rig();
    r.press(Triggered);
    r.controller.reconcile();
    for _ in 0..5 {
        assert_eq!(r.controller.reconcile(), ReconcileOutcome::Unchanged);
    }
    assert_eq!(r.alert().runs(), 1);
    assert_eq!(r.reports().len(), 1);
}

// ── Glitches ──────────────────────────────────────────────────

#[test]
fn edge_without_level_change_is_suppressed() {
    let mut r = rig();
    r.edge.raise();
    assert_eq!(r.controller.reconcile(), ReconcileOutcome::GlitchSuppressed);
    assert_eq!(r.controller.state(), Idle);
    assert!(r.reports().is_empty());
    assert_eq!(r.controller.stats().glitches_suppressed, 1);
    // The flag is consumed.
    assert_eq!(r.controller.reconcile(), ReconcileOutcome::Unchanged);
}

#[test]
fn bounce_within_one_poll_collapses_to_nothing() {
    let mut r = rig();
    // Press and release between two polls: two ISR edges, level back to idle.
    r.press(Triggered);
    r.press(Idle);
    assert_eq!(r.controller.reconcile(), ReconcileOutcome::GlitchSuppressed);
    assert_eq!(r.controller.stats().transitions, 0);
    assert_eq!(r.alert().runs(), 0);
    assert!(r.reports().is_empty());
}

// ── Sensor failures ───────────────────────────────────────────

#[test]
fn read_failure_keeps_state_and_recovers_next_poll() {
    let mut r = rig();
    r.press(Triggered);
    r.controller.collaborators_mut().sensor.fail_reads = 1;

    assert_eq!(r.controller.reconcile(), ReconcileOutcome::Unchanged);
    assert_eq!(r.controller.state(), Idle);
    assert_eq!(r.controller.stats().read_failures, 1);
    assert!(r.reports().is_empty());

    assert!(matches!(r.controller.reconcile(), ReconcileOutcome::Transitioned { .. }));
    assert_eq!(r.controller.state(), Triggered);
}

// ── Cancel on clear ───────────────────────────────────────────

fn clear_after_cycle(r: &mut Rig, cycle: u32) {
    let line = r.line.clone();
    r.controller.collaborators_mut().alert.on_cycle = Some(Box::new(move |i| {
        if i == cycle {
            line.set(Idle);
        }
    }));
}

#[test]
fn alert_runs_to_completion_by_default() {
    let mut r = rig();
    clear_after_cycle(&mut r, 1);
    r.press(Triggered);
    r.controller.reconcile();

    assert_eq!(r.alert().outcomes, vec![AlertOutcome::Completed]);
    assert_eq!(r.controller.state(), Triggered);
    assert_eq!(r.controller.stats().alerts_cancelled, 0);
}

#[test]
fn cancel_on_clear_stops_at_next_cycle_boundary() {
    let config = SystemConfig {
        cancel_alert_on_clear: true,
        ..SystemConfig::default()
    };
    let mut r = Rig::new(&config);
    clear_after_cycle(&mut r, 1);
    r.press(Triggered);
    r.controller.reconcile();

    assert_eq!(
        r.alert().outcomes,
        vec![AlertOutcome::Cancelled { elapsed_ms: 2_000 }]
    );
    assert_eq!(r.alert().calls.last(), Some(&AlertCall::Stop));
    assert!(!r.alert().active);
    assert_eq!(r.controller.stats().alerts_cancelled, 1);
    // The transition itself stands; the clear is picked up next poll.
    assert_eq!(r.controller.state(), Triggered);

    assert_eq!(
        r.controller.reconcile(),
        ReconcileOutcome::Transitioned { from: Triggered, to: Idle }
    );
    assert_eq!(r.reports().len(), 2);
}

#[test]
fn failed_read_during_alert_is_counted_and_does_not_cancel() {
    let config = SystemConfig {
        cancel_alert_on_clear: true,
        ..SystemConfig::default()
    };
    let mut r = Rig::new(&config);
    // The poll's own read succeeds; every check inside the alert fails.
    r.controller.collaborators_mut().sensor.fail_from = Some(2);
    r.press(Triggered);
    r.controller.reconcile();

    assert_eq!(r.alert().outcomes, vec![AlertOutcome::Completed]);
    assert_eq!(r.controller.stats().alerts_cancelled, 0);

    let checks = r.controller.collaborators().sensor.samples - 1;
    assert!(checks > 0);
    assert_eq!(r.controller.stats().read_failures, checks);
    assert_eq!(r.controller.state(), Triggered);
}

// ── Accounting ────────────────────────────────────────────────

#[test]
fn one_report_per_transition() {
    let mut r = rig();
    let script = [Triggered, Triggered, Idle, Idle, Triggered, Idle, Triggered];
    let mut transitions = 0;
    for level in script {
        r.press(level);
        if matches!(r.controller.reconcile(), ReconcileOutcome::Transitioned { .. }) {
            transitions += 1;
        }
    }

    assert_eq!(transitions, 5);
    assert_eq!(r.reports().len(), 5);
    assert_eq!(r.alert().runs(), 3);
    let collisions = r.reports().iter().filter(|rep| rep.collision).count();
    assert_eq!(collisions, 3);

    let stats = r.controller.stats();
    assert_eq!(stats.transitions, 5);
    assert_eq!(stats.polls, script.len() as u64);
    assert_eq!(stats.glitches_suppressed, 2);
}
