#![allow(dead_code)]

use packforge::config::PackLayout;
use packforge::core_types::{CellId, GroupId};
use packforge::graph::{CellGraph, CellRecord};
use packforge::partition::Partition;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const SQRT3_2: f64 = 0.866_025_403_784_438_6;

/// Id of the cell at row `r`, column `c` of a `cols`-wide grid.
pub fn cell_id(r: usize, c: usize, cols: usize) -> CellId {
    (r * cols + c + 1) as CellId
}

/// Hexagonally packed grid. Odd rows sit half a pitch to the right, so an
/// even-row cell touches columns c - 1 and c of the rows above and below,
/// an odd-row cell touches columns c and c + 1.
///
/// Slots: 0 right, 1 upper right, 2 upper left, 3 left, 4 lower left,
/// 5 lower right. Only existing neighbors are populated.
pub fn hex_grid(rows: usize, cols: usize, row_pitch: f64) -> Vec<CellRecord> {
    let mut cells = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        let shift = r % 2;
        for c in 0..cols {
            let x = c as f64 + 0.5 * shift as f64;
            let y = r as f64 * row_pitch;
            let mut rec = CellRecord::new(cell_id(r, c, cols), x, y);

            let (left_col, right_col) = if shift == 0 {
                (c.checked_sub(1), Some(c))
            } else {
                (Some(c), Some(c + 1).filter(|&cc| cc < cols))
            };

            if c + 1 < cols {
                rec = rec.with_neighbor(0, cell_id(r, c + 1, cols));
            }
            if c > 0 {
                rec = rec.with_neighbor(3, cell_id(r, c - 1, cols));
            }
            if r > 0 {
                if let Some(cc) = right_col {
                    rec = rec.with_neighbor(1, cell_id(r - 1, cc, cols));
                }
                if let Some(cc) = left_col {
                    rec = rec.with_neighbor(2, cell_id(r - 1, cc, cols));
                }
            }
            if r + 1 < rows {
                if let Some(cc) = left_col {
                    rec = rec.with_neighbor(4, cell_id(r + 1, cc, cols));
                }
                if let Some(cc) = right_col {
                    rec = rec.with_neighbor(5, cell_id(r + 1, cc, cols));
                }
            }
            cells.push(rec);
        }
    }
    cells
}

/// Partition where every grid row is one group.
pub fn rows_as_groups(
    rows: usize,
    cols: usize,
    group_of_row: impl Fn(usize) -> GroupId,
) -> Partition {
    let groups = (0..rows * cols).map(|idx| group_of_row(idx / cols)).collect();
    Partition::new(groups, rows).unwrap()
}

/// The 140-cell reference pack: 10 rows of 14, row r seeded as group 10 - r,
/// so group 1 is cells 127..=140 and group 10 holds cells 1, 2 and 6.
pub struct Pack140 {
    pub cells: Vec<CellRecord>,
    pub graph: Arc<CellGraph>,
    pub seed: Partition,
    pub layout: PackLayout,
}

pub fn pack_140() -> Pack140 {
    let cells = hex_grid(10, 14, SQRT3_2);
    let graph = Arc::new(CellGraph::from_records(&cells).unwrap());
    let seed = rows_as_groups(10, 14, |r| (10 - r) as GroupId);
    Pack140 {
        cells,
        graph,
        seed,
        layout: PackLayout::default(),
    }
}

/// Two rows of ten, rows 1.2 apart; each row is one group, nothing pinned.
pub struct Pack20 {
    pub cells: Vec<CellRecord>,
    pub graph: Arc<CellGraph>,
    pub seed: Partition,
    pub layout: PackLayout,
}

pub fn pack_20() -> Pack20 {
    let cells = hex_grid(2, 10, 1.2);
    let graph = Arc::new(CellGraph::from_records(&cells).unwrap());
    let seed = rows_as_groups(2, 10, |r| (r + 1) as GroupId);
    Pack20 {
        cells,
        graph,
        seed,
        layout: PackLayout::unpinned(2, 10),
    }
}

pub fn write_json<T: serde::Serialize>(dir: &Path, name: &str, value: &T) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
