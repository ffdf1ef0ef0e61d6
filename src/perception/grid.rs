// Text loader for target images.
//
// Format: a `rows cols` header followed by `rows` lines of `.` (white) and
// `#` (black). Leading and trailing whitespace on every line is ignored;
// anything after the last grid row is ignored too.

use std::path::Path;

use crate::core::{Cell, Grid, PaintError, Result};

pub fn parse_grid(text: &str) -> Result<Grid> {
    let mut lines = text.lines();
    let header = lines.next().unwrap_or("").trim();
    let (rows, cols) = parse_header(header)?;
    if rows == 0 || cols == 0 {
        return Err(PaintError::EmptyGrid { rows, cols });
    }

    let mut cells = Vec::with_capacity(rows);
    for r in 0..rows {
        let line = lines
            .next()
            .ok_or(PaintError::MissingRow { expected: rows, found: r })?
            .trim();
        let found = line.chars().count();
        if found != cols {
            return Err(PaintError::RowLength { row: r, expected: cols, found });
        }
        let row = line
            .chars()
            .enumerate()
            .map(|(c, ch)| Cell::from_char(ch).ok_or(PaintError::InvalidCell { row: r, col: c, ch }))
            .collect::<Result<Vec<_>>>()?;
        cells.push(row);
    }

    Grid::from_rows(cells)
}

fn parse_header(header: &str) -> Result<(usize, usize)> {
    let parts: Vec<&str> = header.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(PaintError::MalformedHeader(header.to_string()));
    }
    let parse = |s: &str| {
        s.parse::<usize>()
            .map_err(|_| PaintError::MalformedHeader(header.to_string()))
    };
    Ok((parse(parts[0])?, parse(parts[1])?))
}

pub fn load_grid(path: impl AsRef<Path>) -> Result<Grid> {
    let content = std::fs::read_to_string(path)?;
    parse_grid(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_small_grid() {
        let grid = parse_grid("2 3\n#.#\n...\n").unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 3));
        assert!(grid.is_black(0, 0));
        assert!(!grid.is_black(0, 1));
        assert_eq!(grid.black_count(), 2);
    }

    #[test]
    fn display_round_trips_text() {
        let text = "3 4\n#..#\n.##.\n....\n";
        assert_eq!(parse_grid(text).unwrap().to_string(), text);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let grid = parse_grid("  1 2 \r\n #. \r\n").unwrap();
        assert_eq!(grid.row(0), &[Cell::Black, Cell::White]);
    }

    #[test]
    fn bad_header() {
        assert!(matches!(parse_grid("3\n###\n"), Err(PaintError::MalformedHeader(_))));
        assert!(matches!(parse_grid("a b\n"), Err(PaintError::MalformedHeader(_))));
        assert!(matches!(parse_grid(""), Err(PaintError::MalformedHeader(_))));
    }

    #[test]
    fn zero_dimension() {
        assert!(matches!(parse_grid("0 4\n"), Err(PaintError::EmptyGrid { .. })));
    }

    #[test]
    fn short_row() {
        assert!(matches!(
            parse_grid("2 3\n###\n##\n"),
            Err(PaintError::RowLength { row: 1, expected: 3, found: 2 })
        ));
    }

    #[test]
    fn missing_row() {
        assert!(matches!(
            parse_grid("3 2\n##\n..\n"),
            Err(PaintError::MissingRow { expected: 3, found: 2 })
        ));
    }

    #[test]
    fn invalid_character() {
        assert!(matches!(
            parse_grid("1 3\n#x.\n"),
            Err(PaintError::InvalidCell { row: 0, col: 1, ch: 'x' })
        ));
    }
}
