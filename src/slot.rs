use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::participant::Participant;

/// One of the two sides of a match.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Slot {
    #[default]
    Empty,
    Solo(Participant),
    Team(Team),
}

impl Slot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Solo(_) => false,
            Self::Team(team) => team.players.is_empty(),
        }
    }

    /// Places a participant according to the match's team type. A solo slot
    /// is overwritten, a team slot gains a player.
    #[must_use]
    pub fn assign(&self, participant: Participant, team_type: TeamType) -> Self {
        match (team_type, self) {
            (TeamType::Solo, _) => Self::Solo(participant),
            (TeamType::Team, Self::Team(team)) => {
                let mut team = team.clone();
                if !team.contains(&participant.id) {
                    team.players.push(participant);
                }
                Self::Team(team)
            }
            (TeamType::Team, Self::Empty | Self::Solo(_)) => Self::Team(Team {
                players: vec![participant],
                score: 0,
            }),
        }
    }

    #[must_use]
    pub fn contains(&self, participant_id: &str) -> bool {
        match self {
            Self::Empty => false,
            Self::Solo(participant) => participant.id == participant_id,
            Self::Team(team) => team.contains(participant_id),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "TBD"),
            Self::Solo(participant) => write!(f, "{participant}"),
            Self::Team(team) => write!(f, "{team}"),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Team {
    pub players: Vec<Participant>,
    pub score: u32,
}

impl Team {
    #[must_use]
    pub fn contains(&self, participant_id: &str) -> bool {
        self.players.iter().any(|player| player.id == participant_id)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.players.is_empty() {
            return write!(f, "TBD");
        }

        let players = self
            .players
            .iter()
            .map(|player| player.username.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        write!(f, "[{players}] {}", self.score)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum SlotKey {
    Team1,
    Team2,
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Team1 => write!(f, "team1"),
            Self::Team2 => write!(f, "team2"),
        }
    }
}

impl FromStr for SlotKey {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> anyhow::Result<Self> {
        match string.to_lowercase().as_str() {
            "1" | "team1" => Ok(Self::Team1),
            "2" | "team2" => Ok(Self::Team2),
            _ => Err(anyhow::Error::msg(format!(
                "Error trying to convert '{string}' to a SlotKey!"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum TeamType {
    #[default]
    Solo,
    Team,
}

impl fmt::Display for TeamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solo => write!(f, "solo"),
            Self::Team => write!(f, "team"),
        }
    }
}

impl FromStr for TeamType {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> anyhow::Result<Self> {
        match string.to_lowercase().as_str() {
            "solo" => Ok(Self::Solo),
            "team" => Ok(Self::Team),
            _ => Err(anyhow::Error::msg(format!(
                "Error trying to convert '{string}' to a TeamType!"
            ))),
        }
    }
}
