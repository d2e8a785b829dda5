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

//! The interaction controller.
//!
//! Every gesture becomes at most one history commit. A gesture that would
//! leave the matches unchanged (an unknown id, moving a box onto itself,
//! linking a match to itself) commits nothing.

use std::fmt;

use log::{debug, warn};
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::{
    graph::{self, Connection},
    history::History,
    layout::{self, LayoutConfig},
    matches::{Match, MatchId, MatchUpdate, Matches, NewMatch},
    participant::Participant,
    position::Position,
    rounds::{propagate_rounds, recompute_all_rounds},
    slot::{Slot, SlotKey},
};

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum BracketError {
    #[error("connect: {from} -> {to} would create a cycle")]
    InvalidEdge { from: MatchId, to: MatchId },
    #[error("load: {0} appears more than once")]
    DuplicateId(MatchId),
}

#[derive(Clone, Debug)]
pub struct Bracket {
    history: History<Matches>,
    next_id: u64,
    layout: LayoutConfig,
    dragged_participant: Option<Participant>,
    connection_source: Option<MatchId>,
}

impl Bracket {
    #[must_use]
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            history: History::default(),
            next_id: 1,
            layout,
            dragged_participant: None,
            connection_source: None,
        }
    }

    /// Starts editing an existing bracket. Links to matches that aren't in
    /// the list are dropped, then rounds and match numbers are recomputed and
    /// the history starts over from it.
    ///
    /// # Errors
    ///
    /// If two matches share an id or the links loop.
    pub fn from_matches(
        mut matches: Matches,
        layout: LayoutConfig,
    ) -> Result<Self, BracketError> {
        let mut ids = FxHashSet::default();
        for game in &matches {
            if !ids.insert(game.id.clone()) {
                return Err(BracketError::DuplicateId(game.id.clone()));
            }
        }

        for game in &mut matches.0 {
            if !game.position.is_finite() {
                warn!("load: {} has a position that isn't finite", game.id);
                game.position = Position::default();
            }
            if let Some(next) = &game.next_match_id
                && !ids.contains(next)
            {
                warn!("load: {} -> {next} points at nothing, dropping it", game.id);
                game.next_match_id = None;
            }
        }

        let order = graph::topological_order(&matches);
        if order.len() != matches.len() {
            let ordered = order.iter().collect::<FxHashSet<_>>();
            if let Some((from, to)) = matches
                .iter()
                .filter(|game| !ordered.contains(&game.id))
                .find_map(|game| Some((&game.id, game.next_match_id.as_ref()?)))
            {
                warn!("load: {from} -> {to} is part of a cycle");
                return Err(BracketError::InvalidEdge {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
        }

        recompute_all_rounds(&mut matches);
        matches.renumber();

        let next_id = matches
            .iter()
            .filter_map(|game| game.id.as_str().strip_prefix("match-"))
            .filter_map(|index| index.parse::<u64>().ok())
            .max()
            .map_or(1, |index| index + 1);

        Ok(Self {
            history: History::new(matches),
            next_id,
            layout,
            dragged_participant: None,
            connection_source: None,
        })
    }

    #[must_use]
    pub fn matches(&self) -> &Matches {
        self.history.current()
    }

    #[must_use]
    pub fn get(&self, id: &MatchId) -> Option<&Match> {
        self.matches().get(id)
    }

    #[must_use]
    pub fn connections(&self) -> Vec<Connection> {
        graph::connections(self.matches())
    }

    #[must_use]
    pub fn history_index(&self) -> usize {
        self.history.index()
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Runs `edit` on a copy of the current matches and commits the copy if
    /// `edit` reports success and something actually changed.
    fn apply<F>(&mut self, gesture: &str, edit: F) -> bool
    where
        F: FnOnce(&mut Matches) -> bool,
    {
        let mut state = self.matches().clone();
        if !edit(&mut state) || state == *self.matches() {
            debug!("{gesture}: nothing changed");
            return false;
        }

        self.history.commit(state);
        debug!(
            "{gesture}: committed {}/{}",
            self.history.index(),
            self.history.len()
        );
        true
    }

    /// Adds a match in round one. A position that isn't finite is replaced
    /// by the origin.
    pub fn create_match(&mut self, mut initial: NewMatch) -> Match {
        if initial.position.is_some_and(|position| !position.is_finite()) {
            warn!("create_match: position isn't finite, using the origin");
            initial.position = None;
        }

        let id = MatchId::new(self.next_id);
        self.next_id += 1;

        let mut state = self.matches().clone();
        let game = state.create_match(id, initial);
        state.renumber();
        self.history.commit(state);
        debug!("create_match: {} at {}", game.id, game.position);

        game
    }

    /// Shallow-merges `update` into the match. Rounds are left alone.
    pub fn update_match(&mut self, id: &MatchId, update: MatchUpdate) -> bool {
        if update.position.is_some_and(|position| !position.is_finite()) {
            debug!("update_match: position isn't finite");
            return false;
        }

        self.apply("update_match", |matches| matches.update_match(id, update))
    }

    /// Puts `participant` into a slot. In a solo match the slot is
    /// overwritten. In a team match the participant joins the slot's team
    /// unless they are already on it.
    pub fn assign_participant(
        &mut self,
        id: &MatchId,
        key: SlotKey,
        participant: Participant,
    ) -> bool {
        self.apply("assign_participant", |matches| {
            let Some(game) = matches.get_mut(id) else {
                return false;
            };

            let slot = game.slot(key).assign(participant, game.team_type);
            *game.slot_mut(key) = slot;
            true
        })
    }

    pub fn remove_participant(&mut self, id: &MatchId, key: SlotKey) -> bool {
        self.apply("remove_participant", |matches| {
            matches.update_match(id, MatchUpdate::slot(key, Slot::Empty))
        })
    }

    /// Moves the box on the canvas. Rounds are never touched by this.
    pub fn move_match(&mut self, id: &MatchId, position: Position) -> bool {
        if !position.is_finite() {
            debug!("move_match: {position} isn't finite");
            return false;
        }

        self.apply("move_match", |matches| {
            matches.update_match(id, MatchUpdate::position(position))
        })
    }

    pub fn delete_match(&mut self, id: &MatchId) -> bool {
        let deleted = self.apply("delete_match", |matches| {
            let Some(removed) = matches.delete_match(id) else {
                return false;
            };

            if let Some(next) = &removed.next_match_id {
                propagate_rounds(next, matches);
            }
            matches.renumber();
            true
        });

        if deleted && self.connection_source.as_ref() == Some(id) {
            self.connection_source = None;
        }
        deleted
    }

    pub fn clear_all(&mut self) -> bool {
        self.connection_source = None;
        self.apply("clear_all", |matches| {
            matches.clear_all();
            true
        })
    }

    /// Makes the winner of `source` play in `target`, replacing any earlier
    /// link out of `source`. Linking a match to itself is a deselect.
    ///
    /// # Errors
    ///
    /// If `target` already leads into `source`.
    pub fn connect(&mut self, source: &MatchId, target: &MatchId) -> Result<bool, BracketError> {
        if source == target {
            debug!("connect: {source} to itself, deselecting");
            return Ok(false);
        }

        let matches = self.matches();
        if !matches.contains(source) || !matches.contains(target) {
            debug!("connect: {source} or {target} doesn't exist");
            return Ok(false);
        }

        if graph::would_create_cycle(source, target, matches) {
            warn!("connect: {source} -> {target} would create a cycle");
            return Err(BracketError::InvalidEdge {
                from: source.clone(),
                to: target.clone(),
            });
        }

        Ok(self.apply("connect", |matches| {
            let Some(game) = matches.get_mut(source) else {
                return false;
            };

            let previous = game.next_match_id.replace(target.clone());
            propagate_rounds(target, matches);
            if let Some(previous) = previous {
                propagate_rounds(&previous, matches);
            }
            matches.renumber();
            true
        }))
    }

    /// Removes the link out of `source`.
    pub fn disconnect(&mut self, source: &MatchId) -> bool {
        self.apply("disconnect", |matches| {
            let Some(previous) = matches
                .get_mut(source)
                .and_then(|game| game.next_match_id.take())
            else {
                return false;
            };

            propagate_rounds(&previous, matches);
            matches.renumber();
            true
        })
    }

    pub fn auto_arrange(&mut self) -> bool {
        let layout = self.layout;
        self.apply("auto_arrange", |matches| {
            *matches = layout::auto_arrange(matches, &layout);
            true
        })
    }

    pub fn undo(&mut self) -> &Matches {
        if !self.history.can_undo() {
            debug!("undo: already at the oldest snapshot");
        }
        self.history.undo();
        self.forget_missing_source();
        self.history.current()
    }

    pub fn redo(&mut self) -> &Matches {
        if !self.history.can_redo() {
            debug!("redo: already at the newest snapshot");
        }
        self.history.redo();
        self.forget_missing_source();
        self.history.current()
    }

    fn forget_missing_source(&mut self) {
        if let Some(source) = &self.connection_source
            && !self.history.current().contains(source)
        {
            self.connection_source = None;
        }
    }

    // Gesture state below is never recorded in the history.

    pub fn begin_drag(&mut self, participant: Participant) {
        self.dragged_participant = Some(participant);
    }

    pub fn cancel_drag(&mut self) -> Option<Participant> {
        self.dragged_participant.take()
    }

    #[must_use]
    pub fn dragged_participant(&self) -> Option<&Participant> {
        self.dragged_participant.as_ref()
    }

    /// Drops the dragged participant into a slot. Without a drag in progress
    /// this does nothing.
    pub fn drop_on_slot(&mut self, id: &MatchId, key: SlotKey) -> bool {
        match self.dragged_participant.take() {
            Some(participant) => self.assign_participant(id, key, participant),
            None => false,
        }
    }

    #[must_use]
    pub fn connection_source(&self) -> Option<&MatchId> {
        self.connection_source.as_ref()
    }

    /// Click handling for linking matches. The first click picks the source,
    /// the second picks the target and links them. Clicking the source again
    /// deselects it.
    ///
    /// # Errors
    ///
    /// If the link would create a cycle.
    pub fn select_for_connection(
        &mut self,
        id: &MatchId,
    ) -> Result<Option<Connection>, BracketError> {
        let Some(source) = self.connection_source.take() else {
            if self.matches().contains(id) {
                self.connection_source = Some(id.clone());
            }
            return Ok(None);
        };

        if self.connect(&source, id)? {
            Ok(Some(Connection {
                source,
                target: id.clone(),
            }))
        } else {
            Ok(None)
        }
    }
}

impl Default for Bracket {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl fmt::Display for Bracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.matches())
    }
}
