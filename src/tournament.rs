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

//! The hand-off to whoever saves tournaments. Form fields are checked here
//! and nowhere else.

use std::{collections::BTreeMap, fmt};

use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matches::Matches;

pub const NAME_MIN_CHARS: usize = 3;

/// The form as typed in.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TournamentMetadata {
    pub name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, seconds optional.
    pub time: String,
    pub location: String,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Field {
    Name,
    Date,
    Time,
    Location,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Date => write!(f, "date"),
            Self::Time => write!(f, "time"),
            Self::Location => write!(f, "location"),
        }
    }
}

#[derive(Clone, Debug, Default, Error, Eq, PartialEq)]
#[error("{}", join_errors(.0))]
pub struct ValidationErrors(pub BTreeMap<Field, String>);

fn join_errors(errors: &BTreeMap<Field, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// What gets handed to persistence once the form is valid.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Tournament {
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub matches: Matches,
}

impl Tournament {
    /// # Errors
    ///
    /// If serialization fails.
    pub fn to_ron(&self) -> anyhow::Result<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }
}

impl TournamentMetadata {
    /// Checks every field against `today` and reports all problems at once.
    ///
    /// # Errors
    ///
    /// One message per invalid field.
    pub fn validate(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveTime), ValidationErrors> {
        let mut errors = BTreeMap::new();

        if self.name.trim().chars().count() < NAME_MIN_CHARS {
            errors.insert(
                Field::Name,
                format!("must be at least {NAME_MIN_CHARS} characters"),
            );
        }

        if self.location.trim().is_empty() {
            errors.insert(Field::Location, "is required".to_string());
        }

        let date = if self.date.trim().is_empty() {
            errors.insert(Field::Date, "is required".to_string());
            None
        } else if let Ok(date) = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d") {
            if date < today {
                errors.insert(Field::Date, "can't be in the past".to_string());
            }
            Some(date)
        } else {
            errors.insert(Field::Date, "expected YYYY-MM-DD".to_string());
            None
        };

        let time = if self.time.trim().is_empty() {
            errors.insert(Field::Time, "is required".to_string());
            None
        } else {
            let time = self.time.trim();
            let parsed = NaiveTime::parse_from_str(time, "%H:%M")
                .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"));
            if parsed.is_err() {
                errors.insert(Field::Time, "expected HH:MM".to_string());
            }
            parsed.ok()
        };

        match (date, time) {
            (Some(date), Some(time)) if errors.is_empty() => Ok((date, time)),
            _ => Err(ValidationErrors(errors)),
        }
    }
}

/// Validates the form and packages it with the bracket.
///
/// # Errors
///
/// If any field is invalid, nothing is submitted.
pub fn submit(
    metadata: &TournamentMetadata,
    matches: &Matches,
    today: NaiveDate,
) -> Result<Tournament, ValidationErrors> {
    let (date, time) = metadata.validate(today)?;

    Ok(Tournament {
        name: metadata.name.trim().to_string(),
        date,
        time,
        location: metadata.location.trim().to_string(),
        matches: matches.clone(),
    })
}

/// [`submit`] with today's date in UTC.
///
/// # Errors
///
/// If any field is invalid.
pub fn submit_now(
    metadata: &TournamentMetadata,
    matches: &Matches,
) -> Result<Tournament, ValidationErrors> {
    submit(metadata, matches, Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap_or_default()
    }

    fn metadata() -> TournamentMetadata {
        TournamentMetadata {
            name: "Spring Cup".to_string(),
            date: "2026-03-20".to_string(),
            time: "18:30".to_string(),
            location: "Reykjavik".to_string(),
        }
    }

    #[test]
    fn valid_form_is_submitted() -> anyhow::Result<()> {
        let tournament = submit(&metadata(), &Matches::default(), today())?;

        assert_eq!(tournament.name, "Spring Cup");
        assert_eq!(tournament.time, NaiveTime::from_hms_opt(18, 30, 0).unwrap_or_default());
        assert!(tournament.to_ron()?.contains("Reykjavik"));

        Ok(())
    }

    #[test]
    fn today_is_not_the_past() {
        let form = TournamentMetadata {
            date: "2026-03-14".to_string(),
            ..metadata()
        };

        assert!(form.validate(today()).is_ok());
    }

    #[test]
    fn every_bad_field_is_reported() {
        let form = TournamentMetadata {
            name: "ab".to_string(),
            date: "2026-03-13".to_string(),
            time: String::new(),
            location: "  ".to_string(),
        };

        let errors = form.validate(today()).err().unwrap_or_default();
        assert_eq!(
            errors.0.keys().copied().collect::<Vec<_>>(),
            vec![Field::Name, Field::Date, Field::Time, Field::Location]
        );
        assert_eq!(errors.0.get(&Field::Date).map(String::as_str), Some("can't be in the past"));
    }

    #[test]
    fn unparsable_date_and_time() {
        let form = TournamentMetadata {
            date: "20/03/2026".to_string(),
            time: "6pm".to_string(),
            ..metadata()
        };

        let errors = form.validate(today()).err().unwrap_or_default();
        assert_eq!(errors.0.len(), 2);
        assert_eq!(
            errors.to_string(),
            "date: expected YYYY-MM-DD, time: expected HH:MM"
        );
    }
}
