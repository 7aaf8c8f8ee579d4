use ndarray::Array2;

/// Single coordinate axis used for board height, width, and positions.
pub type Coord = u8;

/// Count type used for lit-cell and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(y, x)`, row first.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait TogglePatternExt {
    fn iter_toggle_pattern(&self, center: Coord2) -> TogglePatternIter;
}

impl<T> TogglePatternExt for Array2<T> {
    fn iter_toggle_pattern(&self, center: Coord2) -> TogglePatternIter {
        let (rows, cols) = self.dim();
        let bounds = (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        );
        TogglePatternIter::new(center, bounds)
    }
}

/// The plus shape, center first, then up, down, left, right.
const DISPLACEMENTS: [(isize, isize); 5] = [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (y, x) = coords;
    let (dy, dx) = delta;
    let (max_y, max_x) = bounds;

    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;
    if next_y >= max_y {
        return None;
    }

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    if next_x >= max_x {
        return None;
    }

    Some((next_y, next_x))
}

/// Yields the in-bounds cells of the toggle pattern around `center`.
///
/// Candidates that fall off the board are skipped, including the center itself.
#[derive(Debug)]
pub struct TogglePatternIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl TogglePatternIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for TogglePatternIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn pattern_in_the_middle_has_five_cells() {
        let cells: Vec<_> = TogglePatternIter::new((1, 1), (3, 3)).collect();

        assert_eq!(cells, [(1, 1), (0, 1), (2, 1), (1, 0), (1, 2)]);
    }

    #[test]
    fn pattern_in_the_corner_skips_off_board_cells() {
        let cells: Vec<_> = TogglePatternIter::new((0, 0), (2, 2)).collect();

        assert_eq!(cells, [(0, 0), (1, 0), (0, 1)]);
    }

    #[test]
    fn pattern_on_single_cell_board_is_only_the_center() {
        let cells: Vec<_> = TogglePatternIter::new((0, 0), (1, 1)).collect();

        assert_eq!(cells, [(0, 0)]);
    }

    #[test]
    fn pattern_with_off_board_center_keeps_in_bounds_neighbors() {
        let cells: Vec<_> = TogglePatternIter::new((3, 1), (3, 3)).collect();

        assert_eq!(cells, [(2, 1)]);
    }

    #[test]
    fn pattern_at_coordinate_limit_does_not_overflow() {
        let cells: Vec<_> =
            TogglePatternIter::new((Coord::MAX, 0), (Coord::MAX, Coord::MAX)).collect();

        assert_eq!(cells, [(Coord::MAX - 1, 0)]);
    }
}
