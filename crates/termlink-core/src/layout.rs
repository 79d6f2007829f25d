//! Coordinate mapping between grid cells and terminal cells.
//!
//! A board row looks like this, repeated once per panel:
//!
//! ```text
//! 0xA3F0 ;$#?CAT*-=.+  0xA490 ...
//! ^      ^          ^^
//! label  cells      gap
//! ```
//!
//! The header occupies the first [`HEADER_HEIGHT`] lines.

use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;

/// Width of the `0xABCD` address label.
pub const ADDR_LEN: usize = 6;
/// Lines above the first grid row.
pub const HEADER_HEIGHT: usize = 5;
/// Blank columns after each panel.
pub const PANEL_GAP: usize = 2;

const ADDRESS_FLOOR: usize = 0xA000;
const ADDRESS_CEILING: usize = 0xFFFF;

/// A logical cell: which panel, and where inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub panel: usize,
    pub row: usize,
    pub column: usize,
}

impl GridPosition {
    pub const fn new(panel: usize, row: usize, column: usize) -> Self {
        Self { panel, row, column }
    }
}

/// An absolute terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayPosition {
    pub x: usize,
    pub y: usize,
}

impl DisplayPosition {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Board geometry plus the cosmetic start address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    panels: usize,
    rows: usize,
    columns: usize,
    start_address: usize,
}

impl Layout {
    pub fn new(panels: usize, rows: usize, columns: usize, start_address: usize) -> Self {
        Self {
            panels,
            rows,
            columns,
            start_address,
        }
    }

    pub fn panels(&self) -> usize {
        self.panels
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn start_address(&self) -> usize {
        self.start_address
    }

    /// Number of cells in one panel.
    pub fn panel_size(&self) -> usize {
        self.rows * self.columns
    }

    /// Horizontal distance between the labels of two neighbouring panels.
    pub fn panel_stride(&self) -> usize {
        ADDR_LEN + 1 + self.columns + PANEL_GAP
    }

    /// Total board width including labels and gaps.
    pub fn width(&self) -> usize {
        self.panels * self.panel_stride()
    }

    /// Total board height including the header.
    pub fn height(&self) -> usize {
        HEADER_HEIGHT + self.rows
    }

    pub fn contains(&self, pos: GridPosition) -> bool {
        pos.panel < self.panels && pos.row < self.rows && pos.column < self.columns
    }

    pub fn to_display(&self, pos: GridPosition) -> DisplayPosition {
        DisplayPosition {
            x: (ADDR_LEN + 1) * (pos.panel + 1) + (PANEL_GAP + self.columns) * pos.panel + pos.column,
            y: HEADER_HEIGHT + pos.row,
        }
    }

    /// Inverse of [`Layout::to_display`]. Returns `None` for anything that is
    /// not a grid cell: the header, address labels, gaps, or past the board.
    pub fn to_grid(&self, pos: DisplayPosition) -> Option<GridPosition> {
        let row = pos.y.checked_sub(HEADER_HEIGHT)?;
        let relative = pos.x.checked_sub(ADDR_LEN + 1)?;
        let stride = self.panel_stride();
        let grid = GridPosition {
            panel: relative / stride,
            row,
            column: relative % stride,
        };
        self.contains(grid).then_some(grid)
    }

    /// Splits a panel-local offset into row and column.
    pub fn flatten(&self, panel: usize, offset: usize) -> GridPosition {
        GridPosition {
            panel,
            row: offset / self.columns,
            column: offset % self.columns,
        }
    }

    /// Panel-local offset of a cell; inverse of [`Layout::flatten`].
    pub fn offset_of(&self, pos: GridPosition) -> usize {
        pos.row * self.columns + pos.column
    }

    pub fn linear_to_display(&self, panel: usize, offset: usize) -> DisplayPosition {
        self.to_display(self.flatten(panel, offset))
    }

    /// Where the address label of `row` in `panel` is drawn.
    pub fn label_origin(&self, row: usize, panel: usize) -> DisplayPosition {
        DisplayPosition {
            x: panel * self.panel_stride(),
            y: HEADER_HEIGHT + row,
        }
    }

    /// Fake memory address shown in front of a row.
    pub fn address(&self, row: usize, panel: usize) -> usize {
        self.start_address + row * self.columns + panel * self.rows * self.columns
    }
}

/// Picks a start address so the last row of the last panel still fits in
/// four hex digits. Oversized boards start at the floor.
pub fn random_start_address<R: RandomSource + ?Sized>(
    rng: &mut R,
    panels: usize,
    rows: usize,
    columns: usize,
) -> usize {
    let span = panels * rows * columns;
    match ADDRESS_CEILING.checked_sub(span) {
        Some(high) if high > ADDRESS_FLOOR => rng.between(ADDRESS_FLOOR, high),
        _ => ADDRESS_FLOOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;
    use proptest::prelude::*;

    fn layout() -> Layout {
        Layout::new(3, 20, 12, 0xA000)
    }

    #[test]
    fn test_to_display_matches_board_layout() {
        let layout = layout();
        // First cell sits right after "0xA000 ".
        assert_eq!(
            layout.to_display(GridPosition::new(0, 0, 0)),
            DisplayPosition::new(7, 5)
        );
        // Second panel: label(6) + space + 12 cells + 2 gap + label(6) + space.
        assert_eq!(
            layout.to_display(GridPosition::new(1, 3, 2)),
            DisplayPosition::new(7 + 21 + 2, 8)
        );
    }

    #[test]
    fn test_to_grid_rejects_non_cells() {
        let layout = layout();
        // Header
        assert_eq!(layout.to_grid(DisplayPosition::new(8, 2)), None);
        // Address label of panel 0
        assert_eq!(layout.to_grid(DisplayPosition::new(3, 6)), None);
        // Gap after panel 0
        assert_eq!(layout.to_grid(DisplayPosition::new(7 + 12, 6)), None);
        // Address label of panel 1
        assert_eq!(layout.to_grid(DisplayPosition::new(21 + 2, 6)), None);
        // Past the last panel
        assert_eq!(layout.to_grid(DisplayPosition::new(3 * 21 + 7, 6)), None);
        // Below the last row
        assert_eq!(layout.to_grid(DisplayPosition::new(8, 5 + 20)), None);
    }

    #[test]
    fn test_flatten_and_offset_are_inverse() {
        let layout = layout();
        let pos = layout.flatten(2, 37);
        assert_eq!(pos, GridPosition::new(2, 3, 1));
        assert_eq!(layout.offset_of(pos), 37);
        assert_eq!(
            layout.linear_to_display(2, 37),
            layout.to_display(GridPosition::new(2, 3, 1))
        );
    }

    #[test]
    fn test_label_origin_precedes_first_cell() {
        let layout = layout();
        for panel in 0..layout.panels() {
            let label = layout.label_origin(4, panel);
            let first = layout.to_display(GridPosition::new(panel, 4, 0));
            assert_eq!(label.y, first.y);
            assert_eq!(label.x + ADDR_LEN + 1, first.x);
        }
    }

    #[test]
    fn test_addresses_are_monotonic_per_cell() {
        let layout = layout();
        let mut previous = None;
        for panel in 0..layout.panels() {
            for row in 0..layout.rows() {
                let address = layout.address(row, panel);
                if let Some(prev) = previous {
                    assert_eq!(address, prev + layout.columns());
                }
                previous = Some(address);
            }
        }
        assert_eq!(layout.address(0, 0), 0xA000);
        assert_eq!(layout.address(1, 1), 0xA000 + 12 + 240);
    }

    #[test]
    fn test_random_start_address_bounds() {
        let mut rng = SimpleRng::with_seed(1);
        for _ in 0..200 {
            let start = random_start_address(&mut rng, 3, 20, 12);
            assert!(start >= 0xA000);
            assert!(start + 3 * 20 * 12 <= 0xFFFF);
        }
        assert_eq!(random_start_address(&mut rng, 10, 100, 100), 0xA000);
    }

    proptest! {
        #[test]
        fn display_mapping_round_trips(
            panels in 1usize..6,
            rows in 1usize..40,
            columns in 1usize..24,
            cell in any::<(usize, usize, usize)>(),
        ) {
            let layout = Layout::new(panels, rows, columns, 0xA000);
            let pos = GridPosition::new(cell.0 % panels, cell.1 % rows, cell.2 % columns);
            prop_assert_eq!(layout.to_grid(layout.to_display(pos)), Some(pos));
        }

        #[test]
        fn to_grid_only_accepts_mapped_cells(
            x in 0usize..200,
            y in 0usize..60,
        ) {
            let layout = Layout::new(3, 17, 12, 0xA000);
            if let Some(pos) = layout.to_grid(DisplayPosition::new(x, y)) {
                prop_assert!(layout.contains(pos));
                prop_assert_eq!(layout.to_display(pos), DisplayPosition::new(x, y));
            }
        }
    }
}
