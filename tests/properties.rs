//! Invariants that hold after any sequence of editing gestures.

use std::collections::BTreeMap;

use proptest::prelude::*;

use bracket_editor::{
    bracket::Bracket,
    graph,
    layout::LayoutConfig,
    matches::{MatchId, NewMatch},
    position::Position,
    rounds::round_invariant_holds,
};

#[derive(Clone, Debug)]
enum Gesture {
    Create,
    Connect(usize, usize),
    Disconnect(usize),
    Delete(usize),
    Move(usize, u16, u16),
    MoveAnywhere(usize, f64, f64),
    AutoArrange,
    Undo,
    Redo,
}

fn arb_gesture() -> impl Strategy<Value = Gesture> {
    prop_oneof![
        3 => Just(Gesture::Create),
        4 => (0..16usize, 0..16usize).prop_map(|(a, b)| Gesture::Connect(a, b)),
        1 => (0..16usize).prop_map(Gesture::Disconnect),
        1 => (0..16usize).prop_map(Gesture::Delete),
        1 => (0..16usize, 0..1000u16, 0..1000u16).prop_map(|(a, x, y)| Gesture::Move(a, x, y)),
        1 => (0..16usize, prop::num::f64::ANY, prop::num::f64::ANY)
            .prop_map(|(a, x, y)| Gesture::MoveAnywhere(a, x, y)),
        1 => Just(Gesture::AutoArrange),
        1 => Just(Gesture::Undo),
        1 => Just(Gesture::Redo),
    ]
}

fn nth_id(bracket: &Bracket, index: usize) -> Option<MatchId> {
    let len = bracket.matches().len();
    if len == 0 {
        return None;
    }

    bracket
        .matches()
        .iter()
        .nth(index % len)
        .map(|game| game.id.clone())
}

fn apply(bracket: &mut Bracket, gesture: &Gesture) {
    match *gesture {
        Gesture::Create => {
            bracket.create_match(NewMatch::default());
        }
        Gesture::Connect(a, b) => {
            if let (Some(source), Some(target)) = (nth_id(bracket, a), nth_id(bracket, b)) {
                let _ = bracket.connect(&source, &target);
            }
        }
        Gesture::Disconnect(a) => {
            if let Some(id) = nth_id(bracket, a) {
                bracket.disconnect(&id);
            }
        }
        Gesture::Delete(a) => {
            if let Some(id) = nth_id(bracket, a) {
                bracket.delete_match(&id);
            }
        }
        Gesture::Move(a, x, y) => {
            if let Some(id) = nth_id(bracket, a) {
                bracket.move_match(&id, Position::new(f64::from(x), f64::from(y)));
            }
        }
        Gesture::MoveAnywhere(a, x, y) => {
            if let Some(id) = nth_id(bracket, a) {
                let before = bracket.history_len();
                let moved = bracket.move_match(&id, Position::new(x, y));
                if !(x.is_finite() && y.is_finite()) {
                    assert!(!moved);
                    assert_eq!(bracket.history_len(), before);
                }
            }
        }
        Gesture::AutoArrange => {
            bracket.auto_arrange();
        }
        Gesture::Undo => {
            bracket.undo();
        }
        Gesture::Redo => {
            bracket.redo();
        }
    }
}

fn no_dangling_edges(bracket: &Bracket) -> bool {
    bracket.matches().iter().all(|game| {
        game.next_match_id
            .as_ref()
            .is_none_or(|next| bracket.matches().contains(next))
    })
}

fn numbers_are_contiguous(bracket: &Bracket) -> bool {
    let mut numbers: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    for game in bracket.matches() {
        numbers.entry(game.round).or_default().push(game.match_number);
    }

    numbers.into_values().all(|mut numbers| {
        numbers.sort_unstable();
        numbers.iter().copied().eq(1..=u32::try_from(numbers.len()).unwrap_or(u32::MAX))
    })
}

proptest! {
    #[test]
    fn every_state_is_consistent(gestures in prop::collection::vec(arb_gesture(), 0..60)) {
        let mut bracket = Bracket::default();

        for gesture in &gestures {
            apply(&mut bracket, gesture);

            prop_assert!(round_invariant_holds(bracket.matches()), "{gesture:?}\n{bracket}");
            prop_assert!(no_dangling_edges(&bracket), "{gesture:?}\n{bracket}");
            prop_assert_eq!(
                graph::topological_order(bracket.matches()).len(),
                bracket.matches().len()
            );
            prop_assert!(numbers_are_contiguous(&bracket), "{gesture:?}\n{bracket}");
            prop_assert!(bracket.history_index() < bracket.history_len());
            prop_assert!(bracket.matches().iter().all(|game| game.position.is_finite()));
        }
    }

    #[test]
    fn undo_everything_then_redo_everything(gestures in prop::collection::vec(arb_gesture(), 0..40)) {
        let mut bracket = Bracket::default();
        for gesture in &gestures {
            apply(&mut bracket, gesture);
        }

        let last = bracket.history_index();
        let at_last = bracket.matches().clone();

        while bracket.can_undo() {
            bracket.undo();
        }
        prop_assert!(bracket.matches().is_empty());

        for _ in 0..last {
            bracket.redo();
        }
        prop_assert_eq!(bracket.history_index(), last);
        prop_assert_eq!(bracket.matches(), &at_last);
    }

    #[test]
    fn auto_arrange_is_deterministic(
        gestures in prop::collection::vec(arb_gesture(), 0..40),
        columns in 1..6usize,
    ) {
        let layout = LayoutConfig {
            columns,
            ..LayoutConfig::default()
        };
        let mut bracket = Bracket::new(layout);
        for gesture in &gestures {
            apply(&mut bracket, gesture);
        }

        bracket.auto_arrange();
        let arranged = bracket.matches().clone();
        let history_len = bracket.history_len();

        prop_assert!(!bracket.auto_arrange());
        prop_assert_eq!(bracket.matches(), &arranged);
        prop_assert_eq!(bracket.history_len(), history_len);

        let mut cells = arranged
            .iter()
            .map(|game| game.position.to_string())
            .collect::<Vec<_>>();
        cells.sort();
        cells.dedup();
        prop_assert_eq!(cells.len(), arranged.len());
    }
}
