/// Single coordinate axis used for board rows, columns and positions.
pub type Coord = u8;

/// Count type used for cell counts, pair counts and linear cell indices.
pub type CellCount = u16;

/// Linear cell index, row-major: cell `i` sits at `(i / cols, i % cols)`.
pub type CellIndex = CellCount;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Index into the player roster.
pub type PlayerId = u8;

/// Host supplied timestamp in milliseconds.
pub type Millis = u64;

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

/// Converts a linear index into `(row, col)` for a board with `size = (rows, cols)`.
pub const fn index_to_coords(index: CellIndex, size: Coord2) -> Option<Coord2> {
    let (rows, cols) = size;
    if cols == 0 || index >= mult(rows, cols) {
        return None;
    }
    let cols = cols as CellIndex;
    Some(((index / cols) as Coord, (index % cols) as Coord))
}

pub const fn coords_to_index((row, col): Coord2, size: Coord2) -> Option<CellIndex> {
    let (rows, cols) = size;
    if row >= rows || col >= cols {
        return None;
    }
    Some(row as CellIndex * cols as CellIndex + col as CellIndex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_index_is_row_major() {
        assert_eq!(index_to_coords(0, (2, 3)), Some((0, 0)));
        assert_eq!(index_to_coords(4, (2, 3)), Some((1, 1)));
        assert_eq!(index_to_coords(6, (2, 3)), None);
        assert_eq!(coords_to_index((1, 2), (2, 3)), Some(5));
        assert_eq!(coords_to_index((2, 0), (2, 3)), None);
    }
}
