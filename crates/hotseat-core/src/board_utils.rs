//! Static geometry tables for the 8x8 board.
//!
//! Tiles are addressed by a single linear index 0-63, row by row from the
//! top of the board as White sees it. The tables below are computed at
//! compile time and never change.

/// Number of tiles on the board.
pub const NUM_TILES: usize = 64;

/// Number of tiles in a row or column.
pub const NUM_TILES_PER_ROW: usize = 8;

/// `COLUMNS[c][i]` is true when tile `i` lies in column `c` (0 = a-file).
pub const COLUMNS: [[bool; NUM_TILES]; NUM_TILES_PER_ROW] = compute_columns();

/// `ROWS[r][i]` is true when tile `i` lies in row `r` (0 = eighth rank).
pub const ROWS: [[bool; NUM_TILES]; NUM_TILES_PER_ROW] = compute_rows();

pub const FIRST_COLUMN: [bool; NUM_TILES] = COLUMNS[0];
pub const SECOND_COLUMN: [bool; NUM_TILES] = COLUMNS[1];
pub const SEVENTH_COLUMN: [bool; NUM_TILES] = COLUMNS[6];
pub const EIGHTH_COLUMN: [bool; NUM_TILES] = COLUMNS[7];

pub const FIRST_ROW: [bool; NUM_TILES] = ROWS[0];
pub const SECOND_ROW: [bool; NUM_TILES] = ROWS[1];
pub const THIRD_ROW: [bool; NUM_TILES] = ROWS[2];
pub const FOURTH_ROW: [bool; NUM_TILES] = ROWS[3];
pub const FIFTH_ROW: [bool; NUM_TILES] = ROWS[4];
pub const SIXTH_ROW: [bool; NUM_TILES] = ROWS[5];
pub const SEVENTH_ROW: [bool; NUM_TILES] = ROWS[6];
pub const EIGHTH_ROW: [bool; NUM_TILES] = ROWS[7];

/// Returns true if `index` addresses a tile on the board.
#[inline]
pub const fn is_valid_coordinate(index: i32) -> bool {
    index >= 0 && index < NUM_TILES as i32
}

/// Returns the column (0-7) of a tile index.
#[inline]
pub const fn column_of(index: usize) -> usize {
    index % NUM_TILES_PER_ROW
}

/// Returns the row (0-7) of a tile index.
#[inline]
pub const fn row_of(index: usize) -> usize {
    index / NUM_TILES_PER_ROW
}

const fn compute_columns() -> [[bool; NUM_TILES]; NUM_TILES_PER_ROW] {
    let mut columns = [[false; NUM_TILES]; NUM_TILES_PER_ROW];
    let mut index = 0;
    while index < NUM_TILES {
        columns[column_of(index)][index] = true;
        index += 1;
    }
    columns
}

const fn compute_rows() -> [[bool; NUM_TILES]; NUM_TILES_PER_ROW] {
    let mut rows = [[false; NUM_TILES]; NUM_TILES_PER_ROW];
    let mut index = 0;
    while index < NUM_TILES {
        rows[row_of(index)][index] = true;
        index += 1;
    }
    rows
}
