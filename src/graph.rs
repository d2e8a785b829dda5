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

//! The progression graph, derived on demand from `next_match_id`.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::matches::{Match, MatchId, Matches};

/// The winner of `source` goes on to play in `target`.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Connection {
    pub source: MatchId,
    pub target: MatchId,
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// Every edge whose target still exists, in match order.
#[must_use]
pub fn connections(matches: &Matches) -> Vec<Connection> {
    matches
        .iter()
        .filter_map(|game| {
            let target = game.next_match_id.as_ref()?;
            matches.contains(target).then(|| Connection {
                source: game.id.clone(),
                target: target.clone(),
            })
        })
        .collect()
}

/// The matches feeding into `id`.
#[must_use]
pub fn get_parents<'a>(id: &MatchId, matches: &'a Matches) -> Vec<&'a Match> {
    matches
        .iter()
        .filter(|game| game.next_match_id.as_ref() == Some(id))
        .collect()
}

/// Groups the sources of every edge by their target.
#[must_use]
pub fn parents_index(matches: &Matches) -> FxHashMap<&MatchId, Vec<&MatchId>> {
    let mut index: FxHashMap<&MatchId, Vec<&MatchId>> = FxHashMap::default();
    for game in matches {
        if let Some(next) = &game.next_match_id {
            index.entry(next).or_default().push(&game.id);
        }
    }

    index
}

/// Whether adding `source -> target` closes a loop. Every match has at most
/// one successor, so it is enough to walk forward from `target`.
#[must_use]
pub fn would_create_cycle(source: &MatchId, target: &MatchId, matches: &Matches) -> bool {
    let mut seen = FxHashSet::default();
    let mut here = Some(target);

    while let Some(id) = here {
        if id == source {
            return true;
        }
        if !seen.insert(id) {
            // Already looping without passing through source.
            return false;
        }

        here = matches.get(id).and_then(|game| game.next_match_id.as_ref());
    }

    false
}

/// Ids ordered so that every match comes after all of its parents. Matches
/// caught in a cycle are left out.
#[must_use]
pub fn topological_order(matches: &Matches) -> Vec<MatchId> {
    let parents = parents_index(matches);
    let mut waiting: FxHashMap<&MatchId, usize> = matches
        .iter()
        .map(|game| (&game.id, parents.get(&game.id).map_or(0, Vec::len)))
        .collect();

    let mut ready: Vec<&MatchId> = matches
        .iter()
        .filter(|game| waiting.get(&game.id) == Some(&0))
        .map(|game| &game.id)
        .collect();
    ready.reverse();

    let mut order = Vec::with_capacity(matches.len());
    while let Some(id) = ready.pop() {
        order.push(id.clone());

        let next = matches.get(id).and_then(|game| game.next_match_id.as_ref());
        if let Some(next) = next
            && let Some(count) = waiting.get_mut(next)
        {
            *count -= 1;
            if *count == 0 {
                ready.push(next);
            }
        }
    }

    order
}
