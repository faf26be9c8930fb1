//! Precomputed move geometry for every tile.
//!
//! Occupancy never enters these tables; they only describe where a piece
//! could travel on an empty board. Blockers are resolved during move
//! generation.

use hotseat_core::board_utils::{
    is_valid_coordinate, EIGHTH_COLUMN, FIRST_COLUMN, NUM_TILES, SECOND_COLUMN, SEVENTH_COLUMN,
};
use hotseat_core::Coordinate;

/// Knight offsets in index space.
pub const KNIGHT_OFFSETS: [i32; 8] = [-17, -15, -10, -6, 6, 10, 15, 17];

/// King offsets in index space.
pub const KING_OFFSETS: [i32; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];

/// Sliding directions. Rooks use the first four, bishops the last four.
pub const DIRECTIONS: [i32; 8] = [-8, -1, 1, 8, -9, -7, 7, 9];

pub const ROOK_DIRECTIONS: &[usize] = &[0, 1, 2, 3];
pub const BISHOP_DIRECTIONS: &[usize] = &[4, 5, 6, 7];
pub const QUEEN_DIRECTIONS: &[usize] = &[0, 1, 2, 3, 4, 5, 6, 7];

/// Precomputed knight destinations.
pub static KNIGHT_TARGETS: [Line; NUM_TILES] = compute_targets(KNIGHT_OFFSETS, true);

/// Precomputed king destinations (castling excluded).
pub static KING_TARGETS: [Line; NUM_TILES] = compute_targets(KING_OFFSETS, false);

/// Maximal rays [origin][direction], ordered outwards from the origin.
pub static RAYS: [[Line; 8]; NUM_TILES] = compute_rays();

/// An ordered run of up to eight tiles.
#[derive(Debug, Clone, Copy)]
pub struct Line {
    tiles: [u8; 8],
    len: u8,
}

impl Line {
    const EMPTY: Line = Line {
        tiles: [0; 8],
        len: 0,
    };

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns true if the line passes through `target`.
    #[inline]
    pub fn contains(&self, target: Coordinate) -> bool {
        self.tiles[..self.len()]
            .iter()
            .any(|&t| t as usize == target.index())
    }

    /// Iterates the tiles of the line in order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.tiles[..self.len()]
            .iter()
            .filter_map(|&t| Coordinate::from_index(t as usize))
    }
}

/// Returns true if stepping by `offset` from `index` would wrap across the
/// left or right edge of the board.
const fn step_wraps(index: usize, offset: i32) -> bool {
    (FIRST_COLUMN[index] && matches!(offset, -9 | -1 | 7))
        || (EIGHTH_COLUMN[index] && matches!(offset, -7 | 1 | 9))
}

const fn knight_wraps(index: usize, offset: i32) -> bool {
    (FIRST_COLUMN[index] && matches!(offset, -17 | -10 | 6 | 15))
        || (SECOND_COLUMN[index] && matches!(offset, -10 | 6))
        || (SEVENTH_COLUMN[index] && matches!(offset, -6 | 10))
        || (EIGHTH_COLUMN[index] && matches!(offset, -15 | -6 | 10 | 17))
}

const fn compute_targets(offsets: [i32; 8], knight: bool) -> [Line; NUM_TILES] {
    let mut table = [Line::EMPTY; NUM_TILES];
    let mut index = 0;

    while index < NUM_TILES {
        let mut i = 0;
        while i < offsets.len() {
            let offset = offsets[i];
            let wraps = if knight {
                knight_wraps(index, offset)
            } else {
                step_wraps(index, offset)
            };
            let destination = index as i32 + offset;
            if !wraps && is_valid_coordinate(destination) {
                let len = table[index].len as usize;
                table[index].tiles[len] = destination as u8;
                table[index].len += 1;
            }
            i += 1;
        }
        index += 1;
    }

    table
}

const fn compute_rays() -> [[Line; 8]; NUM_TILES] {
    let mut rays = [[Line::EMPTY; 8]; NUM_TILES];
    let mut origin = 0;

    while origin < NUM_TILES {
        let mut direction = 0;
        while direction < DIRECTIONS.len() {
            let offset = DIRECTIONS[direction];
            let mut current = origin;
            loop {
                if step_wraps(current, offset) {
                    break;
                }
                let next = current as i32 + offset;
                if !is_valid_coordinate(next) {
                    break;
                }
                let len = rays[origin][direction].len as usize;
                rays[origin][direction].tiles[len] = next as u8;
                rays[origin][direction].len += 1;
                current = next as usize;
            }
            direction += 1;
        }
        origin += 1;
    }

    rays
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> Coordinate {
        Coordinate::from_algebraic(s).unwrap()
    }

    #[test]
    fn knight_targets_respect_edges() {
        // Corner knights have two moves
        assert_eq!(KNIGHT_TARGETS[at("a8").index()].len(), 2);
        assert_eq!(KNIGHT_TARGETS[at("h1").index()].len(), 2);
        // Centre knights have eight
        assert_eq!(KNIGHT_TARGETS[at("d4").index()].len(), 8);
        // b1 must not wrap to the h-file
        let b1 = KNIGHT_TARGETS[at("b1").index()];
        assert_eq!(b1.len(), 3);
        assert!(b1.contains(at("a3")));
        assert!(b1.contains(at("c3")));
        assert!(b1.contains(at("d2")));
    }

    #[test]
    fn king_targets_respect_edges() {
        assert_eq!(KING_TARGETS[at("a1").index()].len(), 3);
        assert_eq!(KING_TARGETS[at("e1").index()].len(), 5);
        assert_eq!(KING_TARGETS[at("e4").index()].len(), 8);
        let h4 = KING_TARGETS[at("h4").index()];
        assert!(!h4.contains(at("a5")));
        assert!(!h4.contains(at("a4")));
        assert!(!h4.contains(at("a3")));
    }

    #[test]
    fn rays_stop_at_edges() {
        // Rook ray east from a1 covers b1..h1
        let east = RAYS[at("a1").index()][2];
        assert_eq!(east.len(), 7);
        assert_eq!(east.coordinates().last(), Some(at("h1")));
        // No ray west from the a-file
        assert_eq!(RAYS[at("a5").index()][1].len(), 0);
        // Diagonal from c1 towards the top-left stops at a3
        let up_left = RAYS[at("c1").index()][4];
        let tiles: Vec<_> = up_left.coordinates().map(|c| c.to_algebraic()).collect();
        assert_eq!(tiles, ["b2", "a3"]);
    }

    #[test]
    fn rays_total_matches_queen_mobility() {
        let d4: usize = RAYS[at("d4").index()].iter().map(|l| l.len()).sum();
        assert_eq!(d4, 27);
        let a1: usize = RAYS[at("a1").index()].iter().map(|l| l.len()).sum();
        assert_eq!(a1, 21);
    }
}
