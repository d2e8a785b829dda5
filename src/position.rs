use std::{fmt, str::FromStr};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Canvas coordinates of a match box. Purely cosmetic, the bracket structure
/// never reads them.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    fn finite(self) -> anyhow::Result<Self> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(anyhow::Error::msg("position: x and y must be finite"))
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;

    fn from_str(position: &str) -> anyhow::Result<Self> {
        let (x, y) = position
            .split_once(',')
            .context("position: expected x,y")?;

        Self {
            x: x.trim().parse().context("position: invalid x")?,
            y: y.trim().parse().context("position: invalid y")?,
        }
        .finite()
    }
}

impl TryFrom<(&str, &str)> for Position {
    type Error = anyhow::Error;

    fn try_from((x, y): (&str, &str)) -> anyhow::Result<Self> {
        Self {
            x: x.parse().context("position: invalid x")?,
            y: y.parse().context("position: invalid y")?,
        }
        .finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_position() -> anyhow::Result<()> {
        assert_eq!(Position::from_str("10.5, -3")?, Position::new(10.5, -3.0));
        assert_eq!(Position::try_from(("1", "2"))?, Position::new(1.0, 2.0));
        assert!(Position::from_str("10").is_err());
        assert!(Position::from_str("a,1").is_err());

        Ok(())
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        assert!(Position::from_str("NaN,0").is_err());
        assert!(Position::try_from(("1", "inf")).is_err());
        assert!(Position::try_from(("-infinity", "2")).is_err());
        assert!(!Position::new(f64::NAN, 0.0).is_finite());
        assert!(Position::new(-4.5, 1e300).is_finite());
    }
}
