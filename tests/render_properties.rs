use std::time::Duration;

use proptest::prelude::*;

use circle_timer::{
    render::{describe_arc, format_time, fraction_remaining, Frame},
    state::{Snapshot, TimerSession, TimerState},
    testing::Harness,
};

fn angle_strategy() -> impl Strategy<Value = f64> {
    0.0001f64..359.9999
}

proptest! {
    /// Same inputs always give the same path
    #[test]
    fn describe_arc_is_deterministic(
        cx in -500.0f64..500.0,
        cy in -500.0f64..500.0,
        r in 0.1f64..300.0,
        angle in -720.0f64..720.0,
    ) {
        prop_assert_eq!(describe_arc(cx, cy, r, angle), describe_arc(cx, cy, r, angle));
    }

    /// Partial sectors start at the center and close
    #[test]
    fn partial_sector_shape(angle in angle_strategy()) {
        let path = describe_arc(100.0, 100.0, 90.0, angle);
        prop_assert!(path.starts_with("M 100 100 L 100 10 A 90 90 0 "));
        prop_assert!(path.ends_with(" Z"));
        let large = if angle > 180.0 { " 0 1 1 " } else { " 0 0 1 " };
        prop_assert!(path.contains(large));
    }

    /// Non-positive angles never draw
    #[test]
    fn non_positive_angle_is_empty(angle in -1000.0f64..=0.0) {
        prop_assert_eq!(describe_arc(100.0, 100.0, 90.0, angle), "");
    }

    /// The fraction never leaves [0, 1]
    #[test]
    fn fraction_is_clamped(remaining in 0u64..10_000, total in 0u64..10_000) {
        let f = fraction_remaining(Duration::from_millis(remaining), Duration::from_millis(total));
        prop_assert!((0.0..=1.0).contains(&f));
    }

    /// Whole seconds format as M:SS with two-digit seconds
    #[test]
    fn format_matches_integer_split(seconds in 0u32..3600, frac in 0.0f64..0.999) {
        let text = format_time(seconds as f64 + frac);
        prop_assert_eq!(text, format!("{}:{:02}", seconds / 60, seconds % 60));
    }

    /// Negative time always reads zero
    #[test]
    fn negative_time_reads_zero(seconds in -10_000.0f64..0.0) {
        prop_assert_eq!(format_time(seconds), "0:00");
    }

    /// Only a finished run lifts the sector above the track
    #[test]
    fn layering_tracks_finished_state(
        state in prop_oneof![
            Just(TimerState::Idle),
            Just(TimerState::Running),
            Just(TimerState::Paused),
            Just(TimerState::Finished),
        ],
        dark_mode in any::<bool>(),
    ) {
        let frame = Frame::compose(&Snapshot {
            state,
            total: Duration::from_secs(60),
            remaining: Duration::from_secs(if state == TimerState::Finished { 0 } else { 30 }),
            dark_mode,
        });
        prop_assert_eq!(
            frame.layering == circle_timer::render::Layering::SectorAbove,
            state == TimerState::Finished
        );
    }

    /// Random tap/tick sequences keep 0 <= remaining <= total
    #[test]
    fn random_runs_preserve_invariants(
        total_ms in 0u64..2_000,
        steps in proptest::collection::vec(0u8..3, 0..80),
    ) {
        let mut h = Harness::new(TimerSession::with_total(Duration::from_millis(total_ms), false));
        for step in steps {
            match step {
                0 => { h.machine.tap(); }
                1 => { h.tick(); }
                _ => { h.machine.set_dark_mode(!h.machine.session().dark_mode()); }
            }
            let session = h.machine.session();
            prop_assert!(session.remaining() <= session.total());
            prop_assert!(session.is_consistent());
            prop_assert_eq!(h.ticker.log().active.is_some(), session.state() == TimerState::Running);
            if session.state() != TimerState::Running {
                prop_assert_eq!(h.lock.counts().outstanding(), 0);
            }
        }
    }
}
