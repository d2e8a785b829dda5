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

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::status::Status;

pub const GUEST_PREFIX: &str = "guest_";

/// Someone who can be dragged into a match slot.
///
/// Participants belong to the roster; matches hold clones of them and never
/// write back.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Participant {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub is_guest: bool,
    #[serde(default)]
    pub status: Status,
}

impl Participant {
    #[must_use]
    pub fn member(id: &str, username: &str) -> Self {
        Self {
            id: id.to_string(),
            username: username.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn guest(username: &str) -> Self {
        Self {
            id: format!("{GUEST_PREFIX}{username}"),
            username: username.to_string(),
            profile_picture: None,
            is_guest: true,
            status: Status::Pending,
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_guest {
            write!(f, "{} (guest)", self.username)
        } else {
            write!(f, "{}", self.username)
        }
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum RosterError {
    #[error("add_guest: the username can't be empty")]
    EmptyUsername,
    #[error("add_guest: {0} is already on the roster")]
    Duplicate(String),
}

/// Channel members plus the guests the organizer typed in.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Roster {
    pub members: Vec<Participant>,
    pub guests: Vec<Participant>,
}

impl Roster {
    #[must_use]
    pub fn new(members: Vec<Participant>) -> Self {
        Self {
            members,
            guests: Vec::new(),
        }
    }

    /// # Errors
    ///
    /// If the username is blank or a guest with that username already exists.
    pub fn add_guest(&mut self, username: &str) -> Result<&Participant, RosterError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(RosterError::EmptyUsername);
        }

        let guest = Participant::guest(username);
        if self.find(&guest.id).is_some() {
            return Err(RosterError::Duplicate(username.to_string()));
        }

        self.guests.push(guest);
        Ok(&self.guests[self.guests.len() - 1])
    }

    /// Returns the removed guest, if there was one.
    pub fn remove_guest(&mut self, username: &str) -> Option<Participant> {
        let id = format!("{GUEST_PREFIX}{}", username.trim());
        let index = self.guests.iter().position(|guest| guest.id == id)?;
        Some(self.guests.remove(index))
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Participant> {
        self.all().find(|participant| participant.id == id)
    }

    pub fn all(&self) -> impl Iterator<Item = &Participant> {
        self.members.iter().chain(self.guests.iter())
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let participants = self
            .all()
            .map(|participant| format!("{}:{}", participant.id, participant.status))
            .collect::<Vec<_>>()
            .join(" ");

        write!(f, "{participants}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guests_are_prefixed() {
        let guest = Participant::guest("ragnar");
        assert_eq!(guest.id, "guest_ragnar");
        assert!(guest.is_guest);
        assert_eq!(guest.status, Status::Pending);
    }

    #[test]
    fn add_and_remove_guest() -> anyhow::Result<()> {
        let mut roster = Roster::new(vec![Participant::member("7", "astrid")]);

        roster.add_guest(" ragnar ")?;
        assert!(roster.find("guest_ragnar").is_some());
        assert_eq!(
            roster.add_guest("ragnar"),
            Err(RosterError::Duplicate("ragnar".to_string()))
        );
        assert_eq!(roster.add_guest("   "), Err(RosterError::EmptyUsername));

        assert!(roster.remove_guest("ragnar").is_some());
        assert!(roster.remove_guest("ragnar").is_none());
        assert_eq!(roster.all().count(), 1);

        Ok(())
    }
}
