use std::fmt;


use super::error::{PaintError, Result};

pub type Coord = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    White,
    Black,
}

impl Cell {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Cell::White),
            '#' => Some(Cell::Black),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::White => '.',
            Cell::Black => '#',
        }
    }

    pub fn is_black(self) -> bool {
        self == Cell::Black
    }
}

/// Immutable target image, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let n = rows.len();
        let m = rows.first().map_or(0, Vec::len);
        if n == 0 || m == 0 {
            return Err(PaintError::EmptyGrid { rows: n, cols: m });
        }
        let mut cells = Vec::with_capacity(n * m);
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != m {
                return Err(PaintError::RowLength { row: r, expected: m, found: row.len() });
            }
            cells.extend(row);
        }
        Ok(Self { rows: n, cols: m, cells })
    }

    pub fn blank(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(PaintError::EmptyGrid { rows, cols });
        }
        Ok(Self { rows, cols, cells: vec![Cell::White; rows * cols] })
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }

    pub fn get(&self, r: usize, c: usize) -> Cell {
        self.cells[r * self.cols + c]
    }

    pub fn is_black(&self, r: usize, c: usize) -> bool {
        self.get(r, c).is_black()
    }

    pub fn row(&self, r: usize) -> &[Cell] {
        &self.cells[r * self.cols..(r + 1) * self.cols]
    }

    pub fn black_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_black()).count()
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| (r, c)))
    }

    /// Cells along an axis-aligned segment, inclusive on both ends.
    pub fn segment(&self, r1: usize, c1: usize, r2: usize, c2: usize) -> Vec<Cell> {
        if r1 == r2 {
            self.row(r1)[c1..=c2].to_vec()
        } else {
            (r1..=r2).map(|r| self.get(r, c1)).collect()
        }
    }

    pub(crate) fn set(&mut self, r: usize, c: usize, cell: Cell) {
        self.cells[r * self.cols + c] = cell;
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.rows, self.cols)?;
        for r in 0..self.rows {
            let line: String = self.row(r).iter().map(|c| c.to_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Line { r1: usize, c1: usize, r2: usize, c2: usize },
    Square { row: usize, col: usize, radius: usize },
    Erase { row: usize, col: usize },
}

impl Operation {
    pub fn line(r1: usize, c1: usize, r2: usize, c2: usize) -> Self {
        debug_assert!(r1 == r2 || c1 == c2);
        Operation::Line { r1, c1, r2, c2 }
    }

    pub fn square(row: usize, col: usize, radius: usize) -> Self {
        debug_assert!(radius >= 1);
        Operation::Square { row, col, radius }
    }

    pub fn erase(row: usize, col: usize) -> Self {
        Operation::Erase { row, col }
    }

    pub fn is_draw(&self) -> bool {
        !matches!(self, Operation::Erase { .. })
    }

    /// Inclusive bounding box `(top, left, bottom, right)`.
    pub fn bounds(&self) -> (usize, usize, usize, usize) {
        match *self {
            Operation::Line { r1, c1, r2, c2 } => (r1.min(r2), c1.min(c2), r1.max(r2), c1.max(c2)),
            Operation::Square { row, col, radius } => (
                row.saturating_sub(radius),
                col.saturating_sub(radius),
                row.saturating_add(radius),
                col.saturating_add(radius),
            ),
            Operation::Erase { row, col } => (row, col, row, col),
        }
    }

    /// Every cell this operation paints or erases.
    pub fn footprint(&self) -> Vec<Coord> {
        let (top, left, bottom, right) = self.bounds();
        (top..=bottom)
            .flat_map(|r| (left..=right).map(move |c| (r, c)))
            .collect()
    }

    pub fn fits(&self, rows: usize, cols: usize) -> bool {
        match *self {
            Operation::Line { r1, c1, r2, c2 } => {
                (r1 == r2 || c1 == c2) && r1.max(r2) < rows && c1.max(c2) < cols
            }
            Operation::Square { row, col, radius } => {
                radius > 0
                    && row >= radius
                    && col >= radius
                    && row.checked_add(radius).is_some_and(|bottom| bottom < rows)
                    && col.checked_add(radius).is_some_and(|right| right < cols)
            }
            Operation::Erase { row, col } => row < rows && col < cols,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Line { r1, c1, r2, c2 } => write!(f, "PAINT_LINE {} {} {} {}", r1, c1, r2, c2),
            Operation::Square { row, col, radius } => write!(f, "PAINT_SQUARE {} {} {}", row, col, radius),
            Operation::Erase { row, col } => write!(f, "ERASE_CELL {} {}", row, col),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_rows_rejected() {
        let rows = vec![vec![Cell::Black, Cell::White], vec![Cell::Black]];
        assert!(matches!(
            Grid::from_rows(rows),
            Err(PaintError::RowLength { row: 1, expected: 2, found: 1 })
        ));
    }

    #[test]
    fn empty_grid_rejected() {
        assert!(matches!(Grid::from_rows(vec![]), Err(PaintError::EmptyGrid { .. })));
        assert!(matches!(Grid::blank(3, 0), Err(PaintError::EmptyGrid { .. })));
    }

    #[test]
    fn vertical_segment() {
        let grid = Grid::from_rows(vec![
            vec![Cell::Black, Cell::White],
            vec![Cell::White, Cell::White],
            vec![Cell::Black, Cell::Black],
        ]).unwrap();
        assert_eq!(grid.segment(0, 0, 2, 0), vec![Cell::Black, Cell::White, Cell::Black]);
        assert_eq!(grid.segment(2, 0, 2, 1), vec![Cell::Black, Cell::Black]);
        assert_eq!(grid.black_count(), 3);
    }

    #[test]
    fn square_footprint() {
        let sq = Operation::square(1, 2, 1);
        let fp = sq.footprint();
        assert_eq!(fp.len(), 9);
        assert!(fp.contains(&(0, 1)));
        assert!(fp.contains(&(2, 3)));
        assert!(!fp.contains(&(1, 0)));
    }

    #[test]
    fn line_footprint_and_kind() {
        let line = Operation::line(3, 1, 3, 4);
        assert_eq!(line.footprint(), vec![(3, 1), (3, 2), (3, 3), (3, 4)]);
        assert!(line.is_draw());
        assert!(!Operation::erase(0, 0).is_draw());
    }

    #[test]
    fn fits_checks_bounds() {
        assert!(Operation::square(1, 1, 1).fits(3, 3));
        assert!(!Operation::square(1, 1, 1).fits(2, 3));
        assert!(!Operation::square(0, 1, 1).fits(3, 3));
        assert!(!Operation::Line { r1: 0, c1: 0, r2: 1, c2: 1 }.fits(3, 3));
        assert!(Operation::erase(2, 2).fits(3, 3));
        assert!(!Operation::erase(3, 0).fits(3, 3));
    }

    #[test]
    fn fits_rejects_overflowing_square() {
        assert!(!Operation::square(usize::MAX, 1, 1).fits(3, 3));
        assert!(!Operation::square(1, usize::MAX, 1).fits(3, 3));
        assert!(!Operation::square(usize::MAX, usize::MAX, usize::MAX).fits(3, 3));
        assert_eq!(Operation::square(usize::MAX, 1, 1).bounds().2, usize::MAX);
    }

    #[test]
    fn display_matches_command_format() {
        assert_eq!(Operation::line(0, 1, 0, 4).to_string(), "PAINT_LINE 0 1 0 4");
        assert_eq!(Operation::square(2, 2, 1).to_string(), "PAINT_SQUARE 2 2 1");
        assert_eq!(Operation::erase(5, 6).to_string(), "ERASE_CELL 5 6");
    }
}
