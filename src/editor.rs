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

use std::{borrow::Cow, fmt, str::FromStr};

use anyhow::Context;
use log::info;

use crate::{
    bracket::Bracket,
    layout::LayoutConfig,
    matches::NewMatch,
    message::{COMMANDS, Message},
    participant::Roster,
    tournament,
};

/// A bracket being edited together with the roster it draws from.
#[derive(Clone, Debug, Default)]
pub struct Editor {
    pub bracket: Bracket,
    pub roster: Roster,
    pub quit: bool,
}

impl Editor {
    #[must_use]
    pub fn new(roster: Roster, layout: LayoutConfig) -> Self {
        Self {
            bracket: Bracket::new(layout),
            roster,
            quit: false,
        }
    }

    /// # Errors
    ///
    /// If the command is illegal or invalid.
    pub fn read_line(&mut self, buffer: &str) -> anyhow::Result<Option<String>> {
        let mut buffer = Cow::from(buffer);
        if let Some(comment_offset) = buffer.find('#') {
            buffer.to_mut().replace_range(comment_offset.., "");
        }

        self.update(Message::from_str(buffer.as_ref())?)
    }

    /// # Errors
    ///
    /// If the command is illegal or invalid.
    #[allow(clippy::too_many_lines)]
    pub fn update(&mut self, message: Message) -> anyhow::Result<Option<String>> {
        match message {
            Message::AddGuest(username) => {
                let guest = self.roster.add_guest(&username)?;
                info!("add_guest {}", guest.id);
                Ok(Some(guest.id.clone()))
            }
            Message::Assign(id, key, participant_id) => {
                let participant = self
                    .roster
                    .find(&participant_id)
                    .with_context(|| format!("assign: unknown participant {participant_id}"))?
                    .clone();

                Ok(Some(
                    self.bracket
                        .assign_participant(&id, key, participant)
                        .to_string(),
                ))
            }
            Message::AutoArrange => Ok(Some(self.bracket.auto_arrange().to_string())),
            Message::ClearAll => Ok(Some(self.bracket.clear_all().to_string())),
            Message::Connect(source, target) => {
                Ok(Some(self.bracket.connect(&source, &target)?.to_string()))
            }
            Message::CreateMatch(position) => {
                let game = self.bracket.create_match(NewMatch {
                    position,
                    ..NewMatch::default()
                });
                Ok(Some(game.id.to_string()))
            }
            Message::Delete(id) => Ok(Some(self.bracket.delete_match(&id).to_string())),
            Message::Disconnect(id) => Ok(Some(self.bracket.disconnect(&id).to_string())),
            Message::Empty => Ok(None),
            Message::History => Ok(Some(format!(
                "{} {}",
                self.bracket.history_index(),
                self.bracket.history_len()
            ))),
            Message::KnownCommand(command) => {
                Ok(Some(COMMANDS.contains(&command.as_str()).to_string()))
            }
            Message::ListCommands => {
                let mut commands = "\n".to_string();
                commands.push_str(&COMMANDS.join("\n"));
                Ok(Some(commands))
            }
            Message::Move(id, position) => {
                Ok(Some(self.bracket.move_match(&id, position).to_string()))
            }
            Message::Name => Ok(Some(env!("CARGO_PKG_NAME").to_string())),
            Message::ProtocolVersion => Ok(Some("1".to_string())),
            Message::Quit => {
                self.quit = true;
                Ok(None)
            }
            Message::Redo => {
                self.bracket.redo();
                Ok(Some(self.bracket.history_index().to_string()))
            }
            Message::Remove(id, key) => {
                Ok(Some(self.bracket.remove_participant(&id, key).to_string()))
            }
            Message::RemoveGuest(username) => {
                Ok(Some(self.roster.remove_guest(&username).is_some().to_string()))
            }
            Message::Roster => Ok(Some(self.roster.to_string())),
            Message::Select(id) => match self.bracket.select_for_connection(&id)? {
                Some(connection) => Ok(Some(connection.to_string())),
                None => Ok(Some(
                    self.bracket
                        .connection_source()
                        .map_or_else(|| "none".to_string(), ToString::to_string),
                )),
            },
            Message::ShowBracket => Ok(Some(format!("\n{}", self.bracket))),
            Message::Submit(metadata) => {
                let tournament = tournament::submit_now(&metadata, self.bracket.matches())?;
                info!("submit {}", tournament.name);
                Ok(Some(format!("\n{}", tournament.to_ron()?)))
            }
            Message::Undo => {
                self.bracket.undo();
                Ok(Some(self.bracket.history_index().to_string()))
            }
            Message::Version => Ok(Some(env!("CARGO_PKG_VERSION").to_string())),
        }
    }

    /// Runs one line and formats the reply the way the protocol prints it.
    pub fn reply(&mut self, buffer: &str) -> String {
        match self.read_line(buffer) {
            Ok(Some(reply)) => format!("= {reply}"),
            Ok(None) => String::new(),
            Err(error) => format!("? {error}"),
        }
    }
}

impl fmt::Display for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bracket)
    }
}
