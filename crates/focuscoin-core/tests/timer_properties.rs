//! Property tests for the countdown and formatting.

use focuscoin_core::{compute_reward, format_time, Event, ManualScheduler, SessionTimer, TimerState};
use proptest::prelude::*;

proptest! {
    #[test]
    fn d_ticks_complete_exactly_once(d in 1u64..5_000) {
        let mut timer = SessionTimer::new(ManualScheduler::new());
        timer.start(d, "prop");
        let token = timer.tick_token().unwrap();

        let mut completions = 0;
        for i in 1..=d {
            prop_assert_eq!(timer.state(), TimerState::Running);
            if let Some(Event::SessionCompleted { .. }) = timer.tick(token) {
                completions += 1;
            }
            prop_assert_eq!(timer.remaining_secs(), d - i);
        }
        prop_assert_eq!(completions, 1);
        prop_assert_eq!(timer.state(), TimerState::Completed);

        // Extra ticks do nothing once completed.
        prop_assert!(timer.tick(token).is_none());
        prop_assert_eq!(timer.scheduler().active_count(), 0);
    }

    #[test]
    fn pause_freezes_countdown(d in 2u64..1_000, before in 0u64..1_000, extra in 0usize..50) {
        let before = before % (d - 1);
        let mut timer = SessionTimer::new(ManualScheduler::new());
        timer.start(d, "prop");
        let token = timer.tick_token().unwrap();
        for _ in 0..before {
            timer.tick(token);
        }
        timer.pause();
        for _ in 0..extra {
            prop_assert!(timer.tick(token).is_none());
        }
        prop_assert_eq!(timer.remaining_secs(), d - before);
    }

    #[test]
    fn format_time_roundtrips(secs in 0u64..10_000_000) {
        let text = format_time(secs);
        let parts: Vec<u64> = text.split(':').map(|p| p.parse().unwrap()).collect();
        prop_assert_eq!(parts.len(), 3);
        prop_assert!(parts[1] < 60 && parts[2] < 60);
        prop_assert_eq!(parts[0] * 3600 + parts[1] * 60 + parts[2], secs);
        prop_assert!(text.split(':').all(|p| p.len() >= 2));
    }

    #[test]
    fn reward_is_monotonic_off_preset(a in 0u64..100_000, b in 0u64..100_000) {
        let presets = [3600, 7200, 10800];
        prop_assume!(!presets.contains(&a) && !presets.contains(&b));
        if a <= b {
            prop_assert!(compute_reward(a) <= compute_reward(b));
        }
    }
}
