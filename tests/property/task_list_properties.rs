//! Property tests for the task list and the task file format.
//!
//! Uses proptest to verify:
//! 1. `add` appends `(name, minutes * 60)` at the end.
//! 2. Encode → decode keeps names, budgets and order.
//! 3. `delete(i)` keeps the relative order of the other entries.
//! 4. `edit(i)` leaves every other entry untouched.
//! 5. Arbitrary text never panics the decoder.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pomodoro_core::codec;
use pomodoro_core::task::{TaskList, parse_minutes};
use proptest::prelude::*;

/// Strategy for non-blank task names within the default length limit.
fn arb_name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 _.-]{0,40}"
}

/// Strategy for a positive minute count.
fn arb_minutes() -> impl Strategy<Value = u32> {
    1u32..=600
}

/// Strategy for a non-empty task list built through `add`.
fn arb_list() -> impl Strategy<Value = TaskList> {
    prop::collection::vec((arb_name(), arb_minutes()), 1..20).prop_map(|entries| {
        let mut list = TaskList::new();
        for (name, minutes) in entries {
            list.add(&name, minutes).unwrap();
        }
        list
    })
}

/// Name and budget pairs, ignoring in-memory identifiers.
fn pairs(list: &TaskList) -> Vec<(String, u64)> {
    list.tasks()
        .iter()
        .map(|t| (t.name.clone(), t.budget_secs))
        .collect()
}

proptest! {
    #[test]
    fn add_puts_task_last(mut list in arb_list(), name in arb_name(), minutes in arb_minutes()) {
        let before = list.len();
        list.add(&name, minutes).unwrap();
        prop_assert_eq!(list.len(), before + 1);
        let last = list.tasks().last().unwrap();
        prop_assert_eq!(&last.name, &name);
        prop_assert_eq!(last.budget_secs, u64::from(minutes) * 60);
        let line = list.list().pop().unwrap();
        prop_assert_eq!(line, format!("{}. {}", before + 1, name));
    }

    #[test]
    fn file_format_round_trips(list in arb_list()) {
        let text = codec::encode(list.tasks()).unwrap();
        let restored = TaskList::from_tasks(codec::decode(&text).unwrap());
        prop_assert_eq!(pairs(&restored), pairs(&list));
    }

    #[test]
    fn delete_keeps_relative_order(mut list in arb_list(), pick in any::<prop::sample::Index>()) {
        let i = pick.index(list.len());
        let mut expected = pairs(&list);
        expected.remove(i);
        list.delete(Some(i)).unwrap();
        prop_assert_eq!(pairs(&list), expected);
    }

    #[test]
    fn edit_touches_only_its_index(
        mut list in arb_list(),
        pick in any::<prop::sample::Index>(),
        name in arb_name(),
        minutes in arb_minutes(),
    ) {
        let i = pick.index(list.len());
        let before = list.tasks().to_vec();
        list.edit(Some(i), &name, minutes).unwrap();
        for (j, (old, new)) in before.iter().zip(list.tasks()).enumerate() {
            if j == i {
                prop_assert_eq!(&new.name, &name);
                prop_assert_eq!(new.budget_secs, u64::from(minutes) * 60);
                prop_assert_eq!(new.id, old.id);
            } else {
                prop_assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn decode_never_panics(text in ".{0,256}") {
        let _ = codec::decode(&text);
    }

    #[test]
    fn parse_minutes_accepts_exactly_positive_integers(n in 1u32..=u32::MAX) {
        prop_assert_eq!(parse_minutes(&n.to_string()), Ok(n));
    }

    #[test]
    fn parse_minutes_rejects_fractions(whole in 0u32..1000, frac in 1u32..100) {
        let text = format!("{whole}.{frac}");
        prop_assert!(parse_minutes(&text).is_err());
    }
}
