#![forbid(unsafe_code)]

//! The cell matrix.
//!
//! Cells live in a flat `Vec` indexed `row * cols + col`. The grid is sized
//! once at engine construction from the surface's pixel dimensions; there
//! is no live resize.

use crate::layout::Line;
use crate::pool::GlyphRng;

/// One character position in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Glyph currently drawn.
    pub current: char,
    /// Glyph this cell resolves to when the sweep passes it (space = blank).
    pub target: char,
    /// True once the sweep frontier has passed this cell's column.
    pub resolved: bool,
    /// Frames accumulated toward the next noise reassignment.
    pub timer: u8,
    /// Frames between noise reassignments while unresolved, in `[1, 5]`.
    pub speed: u8,
}

/// `cols × rows` matrix of [`Cell`]s.
#[derive(Debug, Clone)]
pub struct CellGrid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Build a grid of unresolved noise cells with randomized flicker timing.
    #[must_use]
    pub fn new(cols: usize, rows: usize, rng: &mut GlyphRng) -> Self {
        let cells = (0..cols * rows)
            .map(|_| Cell {
                current: rng.glyph(),
                target: ' ',
                resolved: false,
                timer: rng.next_below(6) as u8,
                speed: rng.next_below(5) as u8 + 1,
            })
            .collect();
        Self { cols, rows, cells }
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row * self.cols + col]
    }

    #[must_use]
    pub fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        &mut self.cells[row * self.cols + col]
    }

    /// All cells with their (row, col) coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (i / self.cols, i % self.cols, cell))
    }

    /// Reset every cell for a fresh sweep: unresolved, fresh noise glyph,
    /// blank target, re-randomized flicker timer. Flicker speed is fixed at
    /// construction and survives resets.
    pub fn reset_for_sweep(&mut self, rng: &mut GlyphRng) {
        for cell in &mut self.cells {
            cell.resolved = false;
            cell.current = rng.glyph();
            cell.target = ' ';
            cell.timer = rng.next_below(6) as u8;
        }
    }

    /// Write one layout line's characters into cell targets.
    ///
    /// Rows at or past the bottom edge are dropped whole; characters past
    /// the right edge are truncated, not wrapped.
    pub fn write_targets(&mut self, line: &Line) {
        if line.row >= self.rows {
            return;
        }
        for (i, ch) in line.text.chars().enumerate() {
            let col = line.col + i;
            if col >= self.cols {
                break;
            }
            self.cell_mut(line.row, col).target = ch;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(cols: usize, rows: usize) -> (CellGrid, GlyphRng) {
        let mut rng = GlyphRng::from_seed(1);
        (CellGrid::new(cols, rows, &mut rng), rng)
    }

    #[test]
    fn new_grid_is_unresolved_noise() {
        let (g, _) = grid(10, 4);
        for (_, _, cell) in g.iter() {
            assert!(!cell.resolved);
            assert_eq!(cell.target, ' ');
            assert!((1..=5).contains(&cell.speed));
            assert!(cell.timer < 6);
        }
    }

    #[test]
    fn reset_preserves_speed_and_blanks_targets() {
        let (mut g, mut rng) = grid(8, 3);
        let speeds: Vec<u8> = g.iter().map(|(_, _, c)| c.speed).collect();
        g.write_targets(&Line {
            row: 1,
            col: 0,
            text: "HELLO".into(),
            bright: false,
        });
        g.reset_for_sweep(&mut rng);
        for ((_, _, cell), speed) in g.iter().zip(speeds) {
            assert_eq!(cell.speed, speed);
            assert_eq!(cell.target, ' ');
            assert!(!cell.resolved);
        }
    }

    #[test]
    fn write_targets_truncates_at_right_edge() {
        let (mut g, _) = grid(5, 2);
        g.write_targets(&Line {
            row: 0,
            col: 3,
            text: "ABCD".into(),
            bright: false,
        });
        assert_eq!(g.cell(0, 3).target, 'A');
        assert_eq!(g.cell(0, 4).target, 'B');
        // Nothing wrapped onto the next row.
        assert!((0..5).all(|c| g.cell(1, c).target == ' '));
    }

    #[test]
    fn write_targets_drops_out_of_range_rows() {
        let (mut g, _) = grid(5, 2);
        g.write_targets(&Line {
            row: 7,
            col: 0,
            text: "NOPE".into(),
            bright: false,
        });
        assert!(g.iter().all(|(_, _, c)| c.target == ' '));
    }
}
