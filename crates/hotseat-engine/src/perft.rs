//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal move tree at a given depth. The
//! counts for well-known positions are published, so any mismatch points at
//! a move generation bug.

use crate::board::Board;
use crate::error::EngineError;

/// Counts the leaf nodes at the given depth.
pub fn perft(board: &Board, depth: u32) -> Result<u64, EngineError> {
    if depth == 0 {
        return Ok(1);
    }

    let player = board.current_player()?;
    if depth == 1 {
        return Ok(player.legal_moves().len() as u64);
    }

    let mut nodes = 0u64;
    for mv in player.legal_moves() {
        let next = mv.execute(board)?;
        nodes += perft(&next, depth - 1)?;
    }
    Ok(nodes)
}

/// Perft split by root move, sorted by coordinate form.
pub fn perft_divide(board: &Board, depth: u32) -> Result<Vec<(String, u64)>, EngineError> {
    let player = board.current_player()?;
    let mut results = Vec::with_capacity(player.legal_moves().len());

    for mv in player.legal_moves() {
        let nodes = if depth > 1 {
            perft(&mv.execute(board)?, depth - 1)?
        } else {
            1
        };
        results.push((mv.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 0 1";

    fn count(text: &str, depth: u32) -> u64 {
        perft(&Board::from_notation(text).unwrap(), depth).unwrap()
    }

    #[test]
    fn perft_standard() {
        let board = Board::standard();
        assert_eq!(perft(&board, 0).unwrap(), 1);
        assert_eq!(perft(&board, 1).unwrap(), 20);
        assert_eq!(perft(&board, 2).unwrap(), 400);
        assert_eq!(perft(&board, 3).unwrap(), 8902);
    }

    // Slow without optimizations.
    #[test]
    #[ignore]
    fn perft_standard_depth_4() {
        assert_eq!(perft(&Board::standard(), 4).unwrap(), 197281);
    }

    // Castling, en passant, and pins all at once.
    #[test]
    fn perft_kiwipete() {
        assert_eq!(count(KIWIPETE, 1), 48);
        assert_eq!(count(KIWIPETE, 2), 2039);
        assert_eq!(count(KIWIPETE, 3), 97862);
    }

    // Check evasion, en passant discovered checks, promotion.
    #[test]
    fn perft_position3() {
        assert_eq!(count(POSITION_3, 1), 14);
        assert_eq!(count(POSITION_3, 2), 191);
        assert_eq!(count(POSITION_3, 3), 2812);
    }

    #[test]
    fn perft_position4() {
        assert_eq!(count(POSITION_4, 1), 6);
        assert_eq!(count(POSITION_4, 2), 264);
        assert_eq!(count(POSITION_4, 3), 9467);
    }

    #[test]
    fn perft_position5() {
        assert_eq!(count(POSITION_5, 1), 44);
        assert_eq!(count(POSITION_5, 2), 1486);
        assert_eq!(count(POSITION_5, 3), 62379);
    }

    #[test]
    fn perft_divide_works() {
        let board = Board::standard();
        let results = perft_divide(&board, 2).unwrap();
        assert_eq!(results.len(), 20);
        assert_eq!(results[0].0, "a2a3");
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 400);
    }
}
