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

//! The match store: every match node of a bracket, in canvas order.

use std::{collections::BTreeMap, convert::Infallible, fmt, str::FromStr};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    position::Position,
    slot::{Slot, SlotKey, TeamType},
};

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct MatchId(pub String);

impl MatchId {
    #[must_use]
    pub fn new(index: u64) -> Self {
        Self(format!("match-{index}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MatchId {
    type Err = Infallible;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        Ok(Self(id.to_string()))
    }
}

impl From<&str> for MatchId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Match {
    pub id: MatchId,
    pub position: Position,
    pub team1: Slot,
    pub team2: Slot,
    /// Derived from the progression graph, see [`crate::rounds`].
    pub round: u32,
    /// Display ordinal, unique within a round.
    pub match_number: u32,
    pub next_match_id: Option<MatchId>,
    /// Best-of count.
    pub best_of: u32,
    pub team_type: TeamType,
}

impl Match {
    #[must_use]
    pub fn slot(&self, key: SlotKey) -> &Slot {
        match key {
            SlotKey::Team1 => &self.team1,
            SlotKey::Team2 => &self.team2,
        }
    }

    pub fn slot_mut(&mut self, key: SlotKey) -> &mut Slot {
        match key {
            SlotKey::Team1 => &mut self.team1,
            SlotKey::Team2 => &mut self.team2,
        }
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} vs {}",
            self.match_number, self.id, self.team1, self.team2
        )?;

        if let Some(next) = &self.next_match_id {
            write!(f, " -> {next}")?;
        }

        Ok(())
    }
}

/// The fields a caller may choose when creating a match.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct NewMatch {
    pub position: Option<Position>,
    pub team1: Slot,
    pub team2: Slot,
    pub best_of: u32,
    pub team_type: TeamType,
}

impl Default for NewMatch {
    fn default() -> Self {
        Self {
            position: None,
            team1: Slot::Empty,
            team2: Slot::Empty,
            best_of: 1,
            team_type: TeamType::Solo,
        }
    }
}

/// A partial update, merged field by field into an existing match.
///
/// There is no `round` or `next_match_id` here. Rounds are derived and edges
/// only change through [`crate::bracket::Bracket::connect`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct MatchUpdate {
    pub position: Option<Position>,
    pub team1: Option<Slot>,
    pub team2: Option<Slot>,
    pub best_of: Option<u32>,
    pub team_type: Option<TeamType>,
}

impl MatchUpdate {
    #[must_use]
    pub fn position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn slot(key: SlotKey, slot: Slot) -> Self {
        match key {
            SlotKey::Team1 => Self {
                team1: Some(slot),
                ..Self::default()
            },
            SlotKey::Team2 => Self {
                team2: Some(slot),
                ..Self::default()
            },
        }
    }

    fn merge_into(self, game: &mut Match) {
        if let Some(position) = self.position {
            game.position = position;
        }
        if let Some(team1) = self.team1 {
            game.team1 = team1;
        }
        if let Some(team2) = self.team2 {
            game.team2 = team2;
        }
        if let Some(best_of) = self.best_of {
            game.best_of = best_of;
        }
        if let Some(team_type) = self.team_type {
            game.team_type = team_type;
        }
    }
}

/// The ordered list of matches. This is also the shape of one undo snapshot.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Matches(pub Vec<Match>);

impl Matches {
    #[must_use]
    pub fn get(&self, id: &MatchId) -> Option<&Match> {
        self.0.iter().find(|game| &game.id == id)
    }

    pub fn get_mut(&mut self, id: &MatchId) -> Option<&mut Match> {
        self.0.iter_mut().find(|game| &game.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &MatchId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Match> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a fresh round one match. The id is supplied by the caller so
    /// that ids stay unique across undo.
    pub fn create_match(&mut self, id: MatchId, initial: NewMatch) -> Match {
        let match_number = self.iter().filter(|game| game.round == 1).count() + 1;

        let game = Match {
            id,
            position: initial.position.unwrap_or_default(),
            team1: initial.team1,
            team2: initial.team2,
            round: 1,
            match_number: u32::try_from(match_number).unwrap_or(u32::MAX),
            next_match_id: None,
            best_of: initial.best_of,
            team_type: initial.team_type,
        };

        self.0.push(game.clone());
        game
    }

    /// Returns `false` when there is no match with that id.
    pub fn update_match(&mut self, id: &MatchId, update: MatchUpdate) -> bool {
        if let Some(game) = self.get_mut(id) {
            update.merge_into(game);
            true
        } else {
            false
        }
    }

    /// Removes the match and clears every edge that pointed at it.
    pub fn delete_match(&mut self, id: &MatchId) -> Option<Match> {
        let index = self.0.iter().position(|game| &game.id == id)?;
        let removed = self.0.remove(index);

        for game in &mut self.0 {
            if game.next_match_id.as_ref() == Some(id) {
                game.next_match_id = None;
            }
        }

        Some(removed)
    }

    pub fn clear_all(&mut self) {
        self.0.clear();
    }

    /// Numbers the matches `1..=k` within each round, in list order.
    pub fn renumber(&mut self) {
        let mut counters: FxHashMap<u32, u32> = FxHashMap::default();

        for game in &mut self.0 {
            let counter = counters.entry(game.round).or_insert(0);
            *counter += 1;
            game.match_number = *counter;
        }
    }

    #[must_use]
    pub fn by_round(&self) -> BTreeMap<u32, Vec<&Match>> {
        let mut rounds: BTreeMap<u32, Vec<&Match>> = BTreeMap::new();
        for game in &self.0 {
            rounds.entry(game.round).or_default().push(game);
        }

        rounds
    }
}

impl<'a> IntoIterator for &'a Matches {
    type Item = &'a Match;
    type IntoIter = std::slice::Iter<'a, Match>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Matches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "(no matches)");
        }

        for (round, games) in self.by_round() {
            writeln!(f, "Round {round}:")?;
            for game in games {
                writeln!(f, "  {game}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Context;

    use crate::participant::Participant;

    use super::*;

    fn three_matches() -> Matches {
        let mut matches = Matches::default();
        for index in 1..=3 {
            matches.create_match(MatchId::new(index), NewMatch::default());
        }
        matches
    }

    #[test]
    fn create_numbers_within_round_one() {
        let matches = three_matches();
        let numbers = matches.iter().map(|game| game.match_number).collect::<Vec<_>>();

        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(matches.iter().all(|game| game.round == 1));
        assert!(matches.iter().all(|game| game.team1 == Slot::Empty));
        assert_eq!(matches.0[0].position, Position::default());
    }

    #[test]
    fn update_merges_only_given_fields() -> anyhow::Result<()> {
        let mut matches = three_matches();
        let id = MatchId::new(2);
        let astrid = Slot::Solo(Participant::member("1", "astrid"));

        assert!(matches.update_match(&id, MatchUpdate::slot(SlotKey::Team1, astrid.clone())));
        assert!(matches.update_match(&id, MatchUpdate::position(Position::new(5.0, 6.0))));

        let game = matches.get(&id).context("match-2 should exist")?;
        assert_eq!(game.team1, astrid);
        assert_eq!(game.team2, Slot::Empty);
        assert_eq!(game.position, Position::new(5.0, 6.0));

        Ok(())
    }

    #[test]
    fn update_unknown_is_a_no_op() {
        let mut matches = three_matches();
        let before = matches.clone();

        assert!(!matches.update_match(&MatchId::from("nope"), MatchUpdate::default()));
        assert_eq!(matches, before);
    }

    #[test]
    fn delete_clears_dangling_edges() {
        let mut matches = three_matches();
        let target = MatchId::new(3);
        for game in &mut matches.0 {
            if game.id != target {
                game.next_match_id = Some(target.clone());
            }
        }

        let removed = matches.delete_match(&target);
        assert!(removed.is_some());
        assert!(matches.iter().all(|game| game.next_match_id.is_none()));
        assert!(matches.delete_match(&target).is_none());
    }

    #[test]
    fn renumber_per_round() {
        let mut matches = three_matches();
        matches.0[1].round = 2;
        matches.renumber();

        let numbers = matches
            .iter()
            .map(|game| (game.round, game.match_number))
            .collect::<Vec<_>>();
        assert_eq!(numbers, vec![(1, 1), (2, 1), (1, 2)]);
    }
}
