use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;
use core::str::FromStr;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Grid of lights, `true` meaning lit.
///
/// A board is a plain value: [`Board::flip_cells_around`] hands back a new board and leaves the receiver alone, so
/// any earlier copy keeps showing the state it had before the move.
///
/// Serialized as an array of rows, e.g. `[[false,false,false],[true,true,false],[false,false,false]]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<bool>>", try_from = "Vec<Vec<bool>>")]
pub struct Board {
    lights: Array2<bool>,
}

impl Board {
    pub const LIT: char = 'O';
    pub const UNLIT: char = '.';

    /// A board of the given `(rows, cols)` size with every light off.
    pub fn unlit(size: Coord2) -> Self {
        Self {
            lights: Array2::default(size.to_nd_index()),
        }
    }

    pub fn from_lights(lights: Array2<bool>) -> Result<Self> {
        let (rows, cols) = lights.dim();
        if Coord::try_from(rows).is_err() || Coord::try_from(cols).is_err() {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self::from_lights_unchecked(lights))
    }

    /// Caller guarantees both dimensions fit in [`Coord`].
    pub(crate) fn from_lights_unchecked(lights: Array2<bool>) -> Self {
        Self { lights }
    }

    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        if nrows == 0 || ncols == 0 || rows.iter().any(|row| row.len() != ncols) {
            return Err(GameError::InvalidBoardShape);
        }

        let lights = Array2::from_shape_fn((nrows, ncols), |(y, x)| rows[y][x]);
        Self::from_lights(lights)
    }

    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.lights
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect()
    }

    /// Size as `(rows, cols)`.
    pub fn size(&self) -> Coord2 {
        (self.nrows(), self.ncols())
    }

    pub fn nrows(&self) -> Coord {
        self.lights.nrows() as Coord
    }

    pub fn ncols(&self) -> Coord {
        self.lights.ncols() as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.nrows(), self.ncols())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<bool> {
        self.lights.get(coords.to_nd_index()).copied()
    }

    pub fn is_lit(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn lit_count(&self) -> CellCount {
        self.lights.iter().filter(|&&lit| lit).count() as CellCount
    }

    /// Whether every light is off.
    pub fn has_won(&self) -> bool {
        self.lights.iter().all(|&lit| !lit)
    }

    /// Returns a copy of this board with the cell at `coords` and its four orthogonal neighbors inverted.
    ///
    /// Cells of the pattern that fall outside the board are skipped.
    #[must_use]
    pub fn flip_cells_around(&self, coords: Coord2) -> Self {
        let mut next = self.clone();
        next.flip_in_place(coords);
        next
    }

    /// Same as [`Board::flip_cells_around`] but modifies this board.
    pub fn flip_in_place(&mut self, coords: Coord2) {
        for pos in self.lights.iter_toggle_pattern(coords) {
            let light = &mut self.lights[pos.to_nd_index()];
            *light = !*light;
        }
    }
}

impl Index<Coord2> for Board {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.lights[coords.to_nd_index()]
    }
}

impl From<Board> for Vec<Vec<bool>> {
    fn from(board: Board) -> Self {
        board.to_rows()
    }
}

impl TryFrom<Vec<Vec<bool>>> for Board {
    type Error = GameError;

    fn try_from(rows: Vec<Vec<bool>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.lights.rows().into_iter().enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for &lit in row {
                let c = if lit { Self::LIT } else { Self::UNLIT };
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = GameError;

    /// Parses one line per row, `O` for a lit cell and `.` for an unlit one. Blank lines and surrounding whitespace
    /// are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .map(|c| match c {
                        Self::LIT => Ok(true),
                        Self::UNLIT => Ok(false),
                        other => Err(GameError::InvalidCell(other)),
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(rows)
    }
}
