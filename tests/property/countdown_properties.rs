//! Property tests for the countdown state machine.
//!
//! Uses proptest to verify:
//! 1. A run of `D` seconds shows `D, D-1, …, 0` and completes on tick `D`.
//! 2. Completion credits exactly `D` to the accumulator.
//! 3. Urgency changes only at the 50 % and 20 % boundaries.
//! 4. Stop then resume continues from the stopped remaining time.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pomodoro_core::countdown::{
    Accumulator, Countdown, CountdownSpec, Phase, TickOutcome,
};
use pomodoro_core::display::Urgency;
use pomodoro_core::task::Task;
use proptest::prelude::*;

/// Ticks until completion, collecting every displayed remaining value.
fn drain(countdown: &mut Countdown) -> (Vec<u64>, u64) {
    let mut shown = vec![countdown.snapshot().remaining];
    loop {
        match countdown.tick().unwrap() {
            TickOutcome::Ticked(s) => shown.push(s.remaining),
            TickOutcome::Completed { snapshot, completion } => {
                shown.push(snapshot.remaining);
                return (shown, completion.total);
            }
        }
    }
}

fn expected_urgency(remaining: u64, total: u64) -> Urgency {
    if remaining * 2 > total {
        Urgency::Nominal
    } else if remaining * 5 > total {
        Urgency::Warning
    } else {
        Urgency::Critical
    }
}

proptest! {
    #[test]
    fn natural_completion_credits_duration(d in 1u64..2000) {
        let task = Task::new("focus", d);
        let mut countdown = Countdown::new();
        countdown.start(CountdownSpec::for_task(&task)).unwrap();

        let mut acc = Accumulator::new();
        let mut ticks = 0u64;
        let completion = loop {
            ticks += 1;
            if let TickOutcome::Completed { completion, .. } = countdown.tick().unwrap() {
                break completion;
            }
        };
        prop_assert_eq!(ticks, d);
        prop_assert!(acc.record(&completion));
        prop_assert_eq!(acc.total_secs(), d);
        prop_assert_eq!(countdown.phase(), Phase::Completed);
    }

    #[test]
    fn readout_steps_down_by_one(d in 1u64..500) {
        let mut countdown = Countdown::new();
        countdown.start(CountdownSpec::break_of(d)).unwrap();
        let (shown, total) = drain(&mut countdown);
        let expected: Vec<u64> = (0..=d).rev().collect();
        prop_assert_eq!(shown, expected);
        prop_assert_eq!(total, d);
    }

    #[test]
    fn urgency_matches_thresholds(d in 1u64..500) {
        let mut countdown = Countdown::new();
        countdown.start(CountdownSpec::break_of(d)).unwrap();
        let mut previous = countdown.snapshot().urgency();
        prop_assert_eq!(previous, Urgency::Nominal);
        while let Some(TickOutcome::Ticked(s)) = countdown.tick() {
            let urgency = s.urgency();
            prop_assert_eq!(urgency, expected_urgency(s.remaining, d));
            if urgency != previous {
                // Transitions only ever move towards critical.
                prop_assert!(matches!(
                    (previous, urgency),
                    (Urgency::Nominal, Urgency::Warning | Urgency::Critical)
                        | (Urgency::Warning, Urgency::Critical)
                ));
            }
            previous = urgency;
        }
    }

    #[test]
    fn stop_then_resume_continues_from_remaining(d in 2u64..500, cut in any::<prop::sample::Index>()) {
        let elapsed = cut.index(usize::try_from(d - 1).unwrap()) as u64 + 1;
        let mut countdown = Countdown::new();
        countdown.start(CountdownSpec::break_of(d)).unwrap();
        for _ in 0..elapsed {
            countdown.tick();
        }
        let stopped = countdown.stop().unwrap();
        prop_assert_eq!(stopped.remaining, d - elapsed);

        let resumed = countdown.resume().unwrap();
        prop_assert_eq!(resumed.remaining, d - elapsed);
        let (shown, total) = drain(&mut countdown);
        prop_assert_eq!(shown.first().copied(), Some(d - elapsed));
        prop_assert_eq!(shown.last().copied(), Some(0));
        prop_assert_eq!(total, d - elapsed);
    }
}
