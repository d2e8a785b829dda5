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

use std::{fs, io::ErrorKind, path::Path};

use serde::{Deserialize, Serialize};

use crate::{matches::Matches, position::Position};

pub const LAYOUT_FILE: &str = "layout.ron";

/// Grid geometry used by [`auto_arrange`].
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub columns: usize,
    pub box_width: f64,
    pub box_height: f64,
    pub gap_horizontal: f64,
    pub gap_vertical: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            columns: 3,
            box_width: 220.0,
            box_height: 100.0,
            gap_horizontal: 60.0,
            gap_vertical: 40.0,
        }
    }
}

impl LayoutConfig {
    /// # Errors
    ///
    /// If the RON is invalid, asks for zero columns, or has a size that is
    /// negative or not finite.
    pub fn from_ron(string: &str) -> anyhow::Result<Self> {
        let config: Self = ron::from_str(string)?;
        if config.columns == 0 {
            return Err(anyhow::Error::msg("layout: columns must be at least 1"));
        }

        let sizes = [
            config.box_width,
            config.box_height,
            config.gap_horizontal,
            config.gap_vertical,
        ];
        if sizes.iter().any(|size| !size.is_finite() || *size < 0.0) {
            return Err(anyhow::Error::msg(
                "layout: sizes must be finite and not negative",
            ));
        }

        Ok(config)
    }

    /// Reads the layout from `path`. A missing file gives the defaults.
    ///
    /// # Errors
    ///
    /// If the file can't be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        match fs::read_to_string(path) {
            Ok(string) => Self::from_ron(&string)
                .map_err(|err| anyhow::Error::msg(format!("RON: {}: {err}", path.display()))),
            Err(err) => match err.kind() {
                ErrorKind::NotFound => Ok(Self::default()),
                _ => Err(anyhow::Error::msg(format!("{}: {err}", path.display()))),
            },
        }
    }

    /// Where the `index`th box goes, counting left to right then top to
    /// bottom.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn cell(&self, index: usize) -> Position {
        let columns = self.columns.max(1);
        let column = index % columns;
        let row = index / columns;

        Position {
            x: column as f64 * (self.box_width + self.gap_horizontal),
            y: row as f64 * (self.box_height + self.gap_vertical),
        }
    }
}

/// Re-flows the matches into a grid, in list order. The bracket structure is
/// ignored.
#[must_use]
pub fn auto_arrange(matches: &Matches, config: &LayoutConfig) -> Matches {
    let mut arranged = matches.clone();
    for (index, game) in arranged.0.iter_mut().enumerate() {
        game.position = config.cell(index);
    }

    arranged
}
