//! An editing engine for single elimination style tournament brackets.
//!
//! Matches are placed on a canvas, participants are dropped into their two
//! slots and matches are linked so the winner of one plays in the next. Round
//! numbers follow the links, and every edit can be undone.
//!
//! ## Layout
//!
//! * [`matches`] - the match store
//! * [`history`] - snapshot undo/redo
//! * [`graph`] - links between matches
//! * [`rounds`] - round numbers from the links
//! * [`layout`] - grid auto-arrange
//! * [`bracket`] - turns gestures into commits
//! * [`tournament`] - form validation and hand-off
//!
//! ## Text Protocol
//!
//! The `bracket-text-protocol` binary reads one [`message::Message`] per line
//! and answers `= reply` or `? error`.

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

#![deny(clippy::panic)]

pub mod bracket;
pub mod editor;
pub mod graph;
pub mod history;
pub mod layout;
pub mod matches;
pub mod message;
pub mod participant;
pub mod position;
pub mod rounds;
pub mod slot;
pub mod status;
pub mod tournament;
pub mod utils;

pub const HOME: &str = "bracket-editor";

pub const COPYRIGHT: &str = r".SH COPYRIGHT
Copyright (C) 2026 Bracket Editor Developers

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU Affero General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU Affero General Public License for more details.

You should have received a copy of the GNU Affero General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>.
";

pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "
Copyright (c) 2026 Bracket Editor Developers
Licensed under the AGPLv3"
);
