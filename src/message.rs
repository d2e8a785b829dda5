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

use std::str::FromStr;

use thiserror::Error;

use crate::{
    matches::MatchId, position::Position, slot::SlotKey, tournament::TournamentMetadata,
};

pub const COMMANDS: [&str; 24] = [
    "add_guest",
    "assign",
    "auto_arrange",
    "clear_all",
    "connect",
    "create_match",
    "delete",
    "disconnect",
    "history",
    "known_command",
    "list_commands",
    "move",
    "name",
    "protocol_version",
    "quit",
    "redo",
    "remove",
    "remove_guest",
    "roster",
    "select",
    "show_bracket",
    "submit",
    "undo",
    "version",
];

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    AddGuest(String),
    Assign(MatchId, SlotKey, String),
    AutoArrange,
    ClearAll,
    Connect(MatchId, MatchId),
    CreateMatch(Option<Position>),
    Delete(MatchId),
    Disconnect(MatchId),
    Empty,
    History,
    KnownCommand(String),
    ListCommands,
    Move(MatchId, Position),
    Name,
    ProtocolVersion,
    Quit,
    Redo,
    Remove(MatchId, SlotKey),
    RemoveGuest(String),
    Roster,
    Select(MatchId),
    ShowBracket,
    Submit(TournamentMetadata),
    Undo,
    Version,
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum MessageError {
    #[error("{command}: expected '{usage}'")]
    Usage {
        command: &'static str,
        usage: &'static str,
    },
    #[error("{0}: {1}")]
    Argument(&'static str, String),
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

fn usage(command: &'static str, usage: &'static str) -> MessageError {
    MessageError::Usage { command, usage }
}

fn slot_key(command: &'static str, string: &str) -> Result<SlotKey, MessageError> {
    SlotKey::from_str(string).map_err(|error| MessageError::Argument(command, error.to_string()))
}

fn position(command: &'static str, x: &str, y: &str) -> Result<Position, MessageError> {
    Position::try_from((x, y)).map_err(|error| MessageError::Argument(command, error.to_string()))
}

impl FromStr for Message {
    type Err = MessageError;

    fn from_str(message: &str) -> Result<Self, Self::Err> {
        let args: Vec<&str> = message.split_ascii_whitespace().collect();
        let Some(command) = args.first() else {
            return Ok(Self::Empty);
        };

        match (*command, &args[1..]) {
            ("add_guest", [username]) => Ok(Self::AddGuest((*username).to_string())),
            ("add_guest", _) => Err(usage("add_guest", "add_guest USERNAME")),
            ("assign", [id, key, participant]) => Ok(Self::Assign(
                MatchId::from(*id),
                slot_key("assign", key)?,
                (*participant).to_string(),
            )),
            ("assign", _) => Err(usage("assign", "assign MATCH team1|team2 PARTICIPANT")),
            ("auto_arrange", _) => Ok(Self::AutoArrange),
            ("clear_all", _) => Ok(Self::ClearAll),
            ("connect", [source, target]) => {
                Ok(Self::Connect(MatchId::from(*source), MatchId::from(*target)))
            }
            ("connect", _) => Err(usage("connect", "connect SOURCE TARGET")),
            ("create_match", []) => Ok(Self::CreateMatch(None)),
            ("create_match", [x, y]) => Ok(Self::CreateMatch(Some(position("create_match", x, y)?))),
            ("create_match", _) => Err(usage("create_match", "create_match [X Y]")),
            ("delete", [id]) => Ok(Self::Delete(MatchId::from(*id))),
            ("delete", _) => Err(usage("delete", "delete MATCH")),
            ("disconnect", [id]) => Ok(Self::Disconnect(MatchId::from(*id))),
            ("disconnect", _) => Err(usage("disconnect", "disconnect SOURCE")),
            ("history", _) => Ok(Self::History),
            ("known_command", [command]) => Ok(Self::KnownCommand((*command).to_string())),
            ("known_command", _) => Err(usage("known_command", "known_command COMMAND")),
            ("list_commands", _) => Ok(Self::ListCommands),
            ("move", [id, x, y]) => Ok(Self::Move(MatchId::from(*id), position("move", x, y)?)),
            ("move", _) => Err(usage("move", "move MATCH X Y")),
            ("name", _) => Ok(Self::Name),
            ("protocol_version", _) => Ok(Self::ProtocolVersion),
            ("quit", _) => Ok(Self::Quit),
            ("redo", _) => Ok(Self::Redo),
            ("remove", [id, key]) => Ok(Self::Remove(MatchId::from(*id), slot_key("remove", key)?)),
            ("remove", _) => Err(usage("remove", "remove MATCH team1|team2")),
            ("remove_guest", [username]) => Ok(Self::RemoveGuest((*username).to_string())),
            ("remove_guest", _) => Err(usage("remove_guest", "remove_guest USERNAME")),
            ("roster", _) => Ok(Self::Roster),
            ("select", [id]) => Ok(Self::Select(MatchId::from(*id))),
            ("select", _) => Err(usage("select", "select MATCH")),
            ("show_bracket", _) => Ok(Self::ShowBracket),
            ("submit", [date, time, rest @ ..]) => {
                let rest = rest.join(" ");
                let Some((name, location)) = rest.split_once('|') else {
                    return Err(usage("submit", "submit DATE TIME NAME | LOCATION"));
                };

                Ok(Self::Submit(TournamentMetadata {
                    name: name.trim().to_string(),
                    date: (*date).to_string(),
                    time: (*time).to_string(),
                    location: location.trim().to_string(),
                }))
            }
            ("submit", _) => Err(usage("submit", "submit DATE TIME NAME | LOCATION")),
            ("undo", _) => Ok(Self::Undo),
            ("version", _) => Ok(Self::Version),
            (command, _) => Err(MessageError::UnknownCommand(command.to_string())),
        }
    }
}
