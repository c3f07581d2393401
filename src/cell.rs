use std::fmt;

/// The value held by a single grid position.
#[repr(u8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellValue {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl CellValue {
    /// ALIVE becomes DEAD and DEAD becomes ALIVE
    pub const fn flip(self) -> Self {
        match self {
            CellValue::Dead => CellValue::Alive,
            CellValue::Alive => CellValue::Dead,
        }
    }

    pub const fn is_alive(self) -> bool {
        matches!(self, CellValue::Alive)
    }

    /// Character used by the text form of a grid
    pub const fn as_char(self) -> char {
        match self {
            CellValue::Dead => '.',
            CellValue::Alive => '#',
        }
    }
}

impl From<bool> for CellValue {
    fn from(alive: bool) -> Self {
        if alive {
            CellValue::Alive
        } else {
            CellValue::Dead
        }
    }
}

/// A `(row, col)` position on a grid, 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Apply a signed offset. Returns `None` if either component would go negative.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;

        Some(Self { row, col })
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod test {
    use super::CellCoord;
    use super::CellValue;

    #[test]
    fn flip_is_an_involution() {
        assert_eq!(CellValue::Dead.flip(), CellValue::Alive);
        assert_eq!(CellValue::Alive.flip(), CellValue::Dead);
        assert_eq!(CellValue::Alive.flip().flip(), CellValue::Alive);
    }

    #[test]
    fn discriminants() {
        assert_eq!(CellValue::Dead as u8, 0);
        assert_eq!(CellValue::Alive as u8, 1);
        assert_eq!(CellValue::default(), CellValue::Dead);
    }

    #[test]
    fn offset_stops_at_zero() {
        let c = CellCoord::new(0, 3);

        assert_eq!(c.offset(-1, 0), None);
        assert_eq!(c.offset(0, -1), Some(CellCoord::new(0, 2)));
        assert_eq!(c.offset(1, 1), Some(CellCoord::new(1, 4)));
    }
}
