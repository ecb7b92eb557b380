/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use harmony::{perft, Color, Position};

/// Moves carry no metadata, so only depths reachable without castling, en passant, or promotion are checked.
fn test_perft_fen_nodes(depth: usize, fen: &str, expected: u64) {
    let position = Position::from_fen(fen).unwrap();
    let res = perft(&position, Color::White, depth);
    assert_eq!(res, expected, "PERFT({depth}) failed on {fen}");
}

#[cfg(test)]
mod startpos_perft {
    use crate::test_perft_fen_nodes;
    use harmony::FEN_STARTPOS;

    #[test]
    fn test_startpos_perft_1() {
        test_perft_fen_nodes(1, FEN_STARTPOS, 20);
    }

    #[test]
    fn test_startpos_perft_2() {
        test_perft_fen_nodes(2, FEN_STARTPOS, 400);
    }

    #[test]
    fn test_startpos_perft_3() {
        test_perft_fen_nodes(3, FEN_STARTPOS, 8_902);
    }

    #[test]
    fn test_startpos_perft_4() {
        test_perft_fen_nodes(4, FEN_STARTPOS, 197_281);
    }
}

#[cfg(test)]
mod known_positions_perft {
    use crate::test_perft_fen_nodes;
    use harmony::FEN_KIWIPETE;

    #[test]
    fn test_kiwipete_perft_1() {
        // 48 including the two castling moves
        test_perft_fen_nodes(1, FEN_KIWIPETE, 46);
    }

    #[test]
    fn test_rook_endgame_perft_1() {
        test_perft_fen_nodes(1, "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8", 14);
    }

    #[test]
    fn test_rook_endgame_perft_2() {
        // The only en passant capture at this depth exposes Black's King, so it never counts
        test_perft_fen_nodes(2, "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8", 191);
    }

    #[test]
    fn test_mirrored_castling_perft_1() {
        test_perft_fen_nodes(1, "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1", 6);
    }
}

#[cfg(test)]
mod black_to_move_perft {
    use harmony::{perft, Color, Position};

    #[test]
    fn test_mirror_has_same_tree() {
        let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R";
        let position = Position::from_fen(fen).unwrap();
        let mirrored = position.mirror();

        for depth in 1..=2 {
            assert_eq!(
                perft(&position, Color::White, depth),
                perft(&mirrored, Color::Black, depth),
                "depth {depth}"
            );
        }
    }
}
