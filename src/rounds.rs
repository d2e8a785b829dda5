// This file is part of bracket-editor.
//
// bracket-editor is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// bracket-editor is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Round numbers follow the progression graph: a match with no parents is in
//! round one, otherwise it is one past its latest parent. Canvas positions
//! never feed into this.

use log::trace;
use rustc_hash::FxHashMap;

use crate::{
    graph::{get_parents, parents_index, topological_order},
    matches::{MatchId, Matches},
};

/// The round `id` should be in given its parents' current rounds.
#[must_use]
pub fn expected_round(id: &MatchId, matches: &Matches) -> u32 {
    get_parents(id, matches)
        .iter()
        .map(|parent| parent.round)
        .max()
        .map_or(1, |round| round + 1)
}

/// Recomputes the round of `id` and, while it keeps changing, of every match
/// downstream of it.
///
/// Returns how many matches changed round.
pub fn propagate_rounds(id: &MatchId, matches: &mut Matches) -> usize {
    let mut changed = 0;
    let mut here = Some(id.clone());

    while let Some(id) = here.take() {
        // A walk longer than the bracket means the edges loop.
        if changed > matches.len() {
            break;
        }

        let round = expected_round(&id, matches);
        let Some(game) = matches.get_mut(&id) else {
            break;
        };

        if game.round == round {
            break;
        }

        trace!("{id} round {} -> {round}", game.round);
        game.round = round;
        changed += 1;
        here.clone_from(&game.next_match_id);
    }

    changed
}

/// Assigns every round from scratch. Matches stuck in a loop end up in round
/// one.
pub fn recompute_all_rounds(matches: &mut Matches) {
    let order = topological_order(matches);
    let mut rounds: FxHashMap<MatchId, u32> = FxHashMap::default();

    {
        let parents = parents_index(matches);
        for id in order {
            let round = parents
                .get(&id)
                .into_iter()
                .flatten()
                .filter_map(|parent| rounds.get(*parent))
                .max()
                .map_or(1, |round| round + 1);

            rounds.insert(id, round);
        }
    }

    for game in &mut matches.0 {
        game.round = rounds.get(&game.id).copied().unwrap_or(1);
    }
}

/// Whether every match sits exactly one round past its latest parent.
#[must_use]
pub fn round_invariant_holds(matches: &Matches) -> bool {
    matches
        .iter()
        .all(|game| game.round == expected_round(&game.id, matches))
}

#[cfg(test)]
mod tests {
    use crate::matches::NewMatch;

    use super::*;

    fn unlinked(count: u64) -> Matches {
        let mut matches = Matches::default();
        for index in 1..=count {
            matches.create_match(MatchId::new(index), NewMatch::default());
        }
        matches
    }

    fn link(matches: &mut Matches, source: u64, target: u64) {
        if let Some(game) = matches.get_mut(&MatchId::new(source)) {
            game.next_match_id = Some(MatchId::new(target));
        }
        propagate_rounds(&MatchId::new(target), matches);
    }

    fn round(matches: &Matches, index: u64) -> Option<u32> {
        matches.get(&MatchId::new(index)).map(|game| game.round)
    }

    #[test]
    fn two_parents_one_final() {
        let mut matches = unlinked(3);
        link(&mut matches, 1, 3);
        link(&mut matches, 2, 3);

        assert_eq!(round(&matches, 3), Some(2));
        assert!(round_invariant_holds(&matches));
    }

    #[test]
    fn chains_propagate_forward() {
        let mut matches = unlinked(4);
        link(&mut matches, 3, 4);
        link(&mut matches, 2, 3);
        link(&mut matches, 1, 2);

        assert_eq!(round(&matches, 1), Some(1));
        assert_eq!(round(&matches, 2), Some(2));
        assert_eq!(round(&matches, 3), Some(3));
        assert_eq!(round(&matches, 4), Some(4));
        assert!(round_invariant_holds(&matches));
    }

    #[test]
    fn unchanged_round_stops_the_walk() {
        let mut matches = unlinked(3);
        link(&mut matches, 1, 3);

        assert_eq!(propagate_rounds(&MatchId::new(3), &mut matches), 0);
        assert_eq!(propagate_rounds(&MatchId::new(9), &mut matches), 0);
    }

    #[test]
    fn recompute_everything() {
        let mut matches = unlinked(4);
        for (source, target) in [(1, 3), (2, 3), (3, 4)] {
            if let Some(game) = matches.get_mut(&MatchId::new(source)) {
                game.next_match_id = Some(MatchId::new(target));
            }
        }
        assert!(!round_invariant_holds(&matches));

        recompute_all_rounds(&mut matches);
        assert_eq!(round(&matches, 3), Some(2));
        assert_eq!(round(&matches, 4), Some(3));
        assert!(round_invariant_holds(&matches));
    }
}
