// Candidate enumeration.
//
// One pass over the grid produces every admissible operation together with a
// per-cell list of the candidates that touch that cell. Catalog order is fixed:
// horizontal lines, vertical lines, squares, then erases. Erases are appended
// last, so in every cell's list the draw candidates come first and the erase (if
// any) is the final entry. The model builder relies on that.

use std::io::{self, Write};

use crate::core::{Grid, Operation};
use super::heuristics::line_admissible;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub horizontal: usize,
    pub vertical: usize,
    pub squares: usize,
    pub erases: usize,
}

impl CatalogStats {
    pub fn draws(&self) -> usize {
        self.horizontal + self.vertical + self.squares
    }

    pub fn total(&self) -> usize {
        self.draws() + self.erases
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateCatalog {
    rows: usize,
    cols: usize,
    operations: Vec<Operation>,
    coverage: Vec<Vec<usize>>,
    unit_lines: Vec<usize>,
    stats: CatalogStats,
}

impl CandidateCatalog {
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Catalog indices of every candidate touching `(r, c)`, draws first.
    pub fn coverage(&self, r: usize, c: usize) -> &[usize] {
        &self.coverage[r * self.cols + c]
    }

    pub fn stats(&self) -> CatalogStats {
        self.stats
    }

    /// The one-line-per-black-cell assignment. Always feasible.
    pub fn fallback_assignment(&self) -> Vec<bool> {
        let mut values = vec![false; self.operations.len()];
        for &idx in &self.unit_lines {
            values[idx] = true;
        }
        values
    }

    /// Human-readable listing of every candidate and every cell's coverage list.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "-------------------------- Commands")?;
        for op in &self.operations {
            writeln!(out, "{}", op)?;
        }
        writeln!(out, "-------------------------- Cell commands")?;
        for r in 0..self.rows {
            for c in 0..self.cols {
                writeln!(out, ">>>>> {} {}", r, c)?;
                for &idx in self.coverage(r, c) {
                    writeln!(out, "{}", self.operations[idx])?;
                }
            }
        }
        Ok(())
    }
}

struct CatalogBuilder {
    cols: usize,
    operations: Vec<Operation>,
    coverage: Vec<Vec<usize>>,
}

impl CatalogBuilder {
    fn push(&mut self, op: Operation) -> usize {
        let idx = self.operations.len();
        for (r, c) in op.footprint() {
            self.coverage[r * self.cols + c].push(idx);
        }
        self.operations.push(op);
        idx
    }
}

pub fn generate(grid: &Grid, patch_ratio: bool) -> CandidateCatalog {
    let (n, m) = (grid.rows(), grid.cols());
    let mut builder = CatalogBuilder {
        cols: m,
        operations: Vec::new(),
        coverage: vec![Vec::new(); n * m],
    };
    let mut stats = CatalogStats::default();
    let mut unit_lines = Vec::new();

    // Horizontal lines; the only candidates that paint a single cell.
    for r in 0..n {
        let row = grid.row(r);
        for start in 0..m {
            for end in start..m {
                if !line_admissible(&row[start..=end], patch_ratio) {
                    continue;
                }
                let idx = builder.push(Operation::line(r, start, r, end));
                if start == end {
                    unit_lines.push(idx);
                }
                stats.horizontal += 1;
            }
        }
    }

    for c in 0..m {
        for start in 0..n {
            for end in start + 1..n {
                if !line_admissible(&grid.segment(start, c, end, c), patch_ratio) {
                    continue;
                }
                builder.push(Operation::line(start, c, end, c));
                stats.vertical += 1;
            }
        }
    }

    for top in 0..n {
        for left in 0..m {
            let mut side = 3;
            while top + side <= n && left + side <= m {
                let radius = side / 2;
                builder.push(Operation::square(top + radius, left + radius, radius));
                stats.squares += 1;
                side += 2;
            }
        }
    }

    for (r, c) in grid.coords() {
        if !grid.is_black(r, c) && !builder.coverage[r * m + c].is_empty() {
            builder.push(Operation::erase(r, c));
            stats.erases += 1;
        }
    }

    tracing::info!(
        horizontal = stats.horizontal,
        vertical = stats.vertical,
        squares = stats.squares,
        erases = stats.erases,
        "generated {} candidates",
        stats.total()
    );

    CandidateCatalog {
        rows: n,
        cols: m,
        operations: builder.operations,
        coverage: builder.coverage,
        unit_lines,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perception::parse_grid;
    use pretty_assertions::assert_eq;

    #[test]
    fn all_white_has_only_squares() {
        let grid = parse_grid("3 3\n...\n...\n...\n").unwrap();
        let cat = generate(&grid, true);
        let stats = cat.stats();
        assert_eq!(stats.horizontal + stats.vertical, 0);
        assert_eq!(stats.squares, 1);
        // Every cell is under the square, so each gets an erase.
        assert_eq!(stats.erases, 9);
        assert!(cat.fallback_assignment().iter().all(|v| !v));
    }

    #[test]
    fn two_by_two_has_no_squares_or_erases() {
        let grid = parse_grid("2 2\n#.\n..\n").unwrap();
        let cat = generate(&grid, true);
        assert_eq!(cat.operations(), &[Operation::line(0, 0, 0, 0)]);
        assert_eq!(cat.coverage(0, 0), &[0]);
        assert!(cat.coverage(1, 1).is_empty());
    }

    #[test]
    fn catalog_order_by_kind() {
        let grid = parse_grid("3 3\n##.\n#..\n...\n").unwrap();
        let cat = generate(&grid, true);
        let ops = cat.operations();
        assert_eq!(
            &ops[..4],
            &[
                Operation::line(0, 0, 0, 0),
                Operation::line(0, 0, 0, 1),
                Operation::line(0, 1, 0, 1),
                Operation::line(1, 0, 1, 0),
            ]
        );
        assert_eq!(ops[4], Operation::line(0, 0, 1, 0));
        assert_eq!(ops[5], Operation::square(1, 1, 1));
        assert!(ops[6..].iter().all(|op| !op.is_draw()));
        assert_eq!(cat.stats().erases, 6);
    }

    #[test]
    fn erase_is_last_in_white_cells() {
        let grid = parse_grid("3 5\n#.#.#\n#####\n#.#.#\n").unwrap();
        let cat = generate(&grid, false);
        for (r, c) in grid.coords() {
            let list = cat.coverage(r, c);
            let erases = list.iter().filter(|&&i| !cat.operations()[i].is_draw()).count();
            if grid.is_black(r, c) {
                assert_eq!(erases, 0);
                assert!(!list.is_empty());
            } else if !list.is_empty() {
                assert_eq!(erases, 1);
                assert_eq!(cat.operations()[*list.last().unwrap()], Operation::erase(r, c));
                assert!(list[..list.len() - 1].iter().all(|&i| cat.operations()[i].is_draw()));
            }
        }
    }

    #[test]
    fn gapped_row_yields_spanning_line() {
        let grid = parse_grid("1 7\n###.###\n").unwrap();
        let cat = generate(&grid, true);
        assert!(cat.operations().contains(&Operation::line(0, 0, 0, 6)));
        assert!(cat.operations().contains(&Operation::erase(0, 3)));
    }

    #[test]
    fn square_sizes_grow_by_two() {
        let grid = parse_grid("5 5\n.....\n.....\n.....\n.....\n.....\n").unwrap();
        let squares: Vec<Operation> = generate(&grid, true)
            .operations()
            .iter()
            .copied()
            .filter(|op| matches!(op, Operation::Square { .. }))
            .collect();
        // 9 radius-1 positions plus one radius-2 at the center.
        assert_eq!(squares.len(), 10);
        assert_eq!(squares[0], Operation::square(1, 1, 1));
        assert_eq!(squares[1], Operation::square(2, 2, 2));
    }

    #[test]
    fn fallback_selects_one_line_per_black_cell() {
        let grid = parse_grid("2 3\n#.#\n.##\n").unwrap();
        let cat = generate(&grid, true);
        let chosen: Vec<Operation> = cat
            .fallback_assignment()
            .iter()
            .zip(cat.operations())
            .filter(|(v, _)| **v)
            .map(|(_, op)| *op)
            .collect();
        assert_eq!(chosen.len(), grid.black_count());
        for (r, c) in grid.coords().filter(|&(r, c)| grid.is_black(r, c)) {
            assert!(chosen.contains(&Operation::line(r, c, r, c)));
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let grid = parse_grid("4 4\n#.##\n##.#\n.###\n#..#\n").unwrap();
        assert_eq!(generate(&grid, true), generate(&grid, true));
    }

    #[test]
    fn dump_lists_cells() {
        let grid = parse_grid("1 2\n#.\n").unwrap();
        let mut out = Vec::new();
        generate(&grid, true).dump(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("PAINT_LINE 0 0 0 0"));
        assert!(text.contains(">>>>> 0 1"));
    }
}
