/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Bitboard, Color, Move, Piece, PieceKind, Position, Square};

const KNIGHT_ATTACKS: [Bitboard; Square::COUNT] = generate_leaper_mobility(&KNIGHT_DELTAS);
const KING_ATTACKS: [Bitboard; Square::COUNT] = generate_leaper_mobility(&QUEEN_DELTAS);
const WHITE_PAWN_ATTACKS: [Bitboard; Square::COUNT] = generate_pawn_attacks(Color::White);
const BLACK_PAWN_ATTACKS: [Bitboard; Square::COUNT] = generate_pawn_attacks(Color::Black);

/// Deltas for the movement of the Queen, as `(row, col)` offsets.
const QUEEN_DELTAS: [(i8, i8); 8] = [
    /* Rook */
    (1, 0),
    (0, -1),
    (-1, 0),
    (0, 1),
    /* Bishop */
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

/// Deltas for the movement of the Rook.
const ROOK_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[0],
    QUEEN_DELTAS[1],
    QUEEN_DELTAS[2],
    QUEEN_DELTAS[3],
];

/// Deltas for the movement of the Bishop.
const BISHOP_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[4],
    QUEEN_DELTAS[5],
    QUEEN_DELTAS[6],
    QUEEN_DELTAS[7],
];

/// Deltas for the movement of the Knight.
const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (2, 1),
    (2, -1),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
];

/// Fetch the attacks for `piece` at `square`, given the occupied squares in `blockers`.
///
/// Rays stop at, and include, the first blocker regardless of who owns it.
/// For Pawns, this is only the two forward diagonals, never the pushes.
#[inline(always)]
pub fn attacks_for(piece: Piece, square: Square, blockers: Bitboard) -> Bitboard {
    match piece.kind() {
        PieceKind::Pawn => pawn_attacks(square, piece.color()),
        PieceKind::Knight => knight_attacks(square),
        PieceKind::Bishop => bishop_attacks(square, blockers),
        PieceKind::Rook => rook_attacks(square, blockers),
        PieceKind::Queen => queen_attacks(square, blockers),
        PieceKind::King => king_attacks(square),
    }
}

/// Computes the attacks of a Rook on `square`, stopping each ray at its first blocker.
///
/// # Example
/// ```
/// # use harmony::*;
/// let blockers = Bitboard::from_square(Square::D6) | Square::F4;
/// let attacks = rook_attacks(Square::D4, blockers);
/// assert!(attacks.contains(Square::D6));
/// assert!(!attacks.contains(Square::D7));
/// assert!(attacks.contains(Square::F4));
/// assert!(!attacks.contains(Square::G4));
/// assert_eq!(attacks.population(), 10);
/// ```
#[inline(always)]
pub fn rook_attacks(square: Square, blockers: Bitboard) -> Bitboard {
    ray_attacks(square, blockers, &ROOK_DELTAS)
}

/// Computes the attacks of a Bishop on `square`, stopping each ray at its first blocker.
#[inline(always)]
pub fn bishop_attacks(square: Square, blockers: Bitboard) -> Bitboard {
    ray_attacks(square, blockers, &BISHOP_DELTAS)
}

/// Computes the attacks of a Queen on `square`, stopping each ray at its first blocker.
#[inline(always)]
pub fn queen_attacks(square: Square, blockers: Bitboard) -> Bitboard {
    ray_attacks(square, blockers, &QUEEN_DELTAS)
}

/// Fetch the attacks of a Knight on `square`.
///
/// # Example
/// ```
/// # use harmony::*;
/// // A Knight on the a-file never wraps around to the g- or h-files
/// let attacks = knight_attacks(Square::A4);
/// assert_eq!(attacks.population(), 4);
/// assert!(attacks.iter().all(|sq| sq.col() == 1 || sq.col() == 2));
/// ```
#[inline(always)]
pub const fn knight_attacks(square: Square) -> Bitboard {
    KNIGHT_ATTACKS[square.index()]
}

/// Fetch the attacks of a King on `square`.
#[inline(always)]
pub const fn king_attacks(square: Square) -> Bitboard {
    KING_ATTACKS[square.index()]
}

/// Fetch the squares a `color` Pawn on `square` attacks: one step forward and one step to either side.
///
/// # Example
/// ```
/// # use harmony::*;
/// let white = pawn_attacks(Square::E4, Color::White);
/// assert_eq!(white, Bitboard::from_square(Square::D5) | Square::F5);
///
/// let black = pawn_attacks(Square::A5, Color::Black);
/// assert_eq!(black, Bitboard::from_square(Square::B4));
/// ```
#[inline(always)]
pub const fn pawn_attacks(square: Square, color: Color) -> Bitboard {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square.index()],
        Color::Black => BLACK_PAWN_ATTACKS[square.index()],
    }
}

/// The row a `color` Pawn starts on, from which it may advance two squares.
#[inline(always)]
pub const fn pawn_start_row(color: Color) -> u8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}

/// Walks every ray in `deltas` from `square`, adding squares until (and including) the first blocker.
fn ray_attacks(square: Square, blockers: Bitboard, deltas: &[(i8, i8)]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY_BOARD;

    for &(dr, dc) in deltas {
        let mut ray = square;
        while let Some(shifted) = ray.offset(dr, dc) {
            attacks.set(shifted);
            if blockers.contains(shifted) {
                break;
            }
            ray = shifted;
        }
    }

    attacks
}

/// Generates the attacks of a `color` Pawn from every square.
const fn generate_pawn_attacks(color: Color) -> [Bitboard; Square::COUNT] {
    let mut boards = [Bitboard::EMPTY_BOARD; Square::COUNT];
    let forward = -color.negation_multiplier();

    let mut i = 0;
    while i < Square::COUNT {
        let square = Square::from_index_unchecked(i);

        if let Some(left) = square.offset(forward, -1) {
            boards[i] = boards[i].or(left.bitboard());
        }
        if let Some(right) = square.offset(forward, 1) {
            boards[i] = boards[i].or(right.bitboard());
        }

        i += 1;
    }

    boards
}

/// Generates the moves from every location for the "Leaper" pieces.
/// Leapers may "leap" or "jump" to a square a specified distance away.
///
/// In standard chess, the Leapers are the King and Knight.
const fn generate_leaper_mobility(deltas: &[(i8, i8)]) -> [Bitboard; Square::COUNT] {
    let mut mobility = [Bitboard::EMPTY_BOARD; Square::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        let square = Square::from_index_unchecked(i);
        let mut movement = Bitboard::EMPTY_BOARD;

        let mut j = 0;
        while j < deltas.len() {
            let (dr, dc) = deltas[j];
            // Deltas that would leave the board (or wrap around an edge) are discarded
            if let Some(shifted) = square.offset(dr, dc) {
                movement = movement.or(shifted.bitboard());
            }

            j += 1;
        }

        mobility[i] = movement;
        i += 1;
    }

    mobility
}

impl Position {
    /// The squares attacked by the piece on `square`, or an empty set if `square` is empty.
    ///
    /// A ray's first occupied square is included whatever its owner, so pieces "attack" the friendly pieces they defend.
    /// Pawns attack their two forward diagonals.
    ///
    /// # Example
    /// ```
    /// # use harmony::*;
    /// let position = Position::default();
    /// // The b1 Knight defends d2 and covers a3 and c3
    /// assert_eq!(position.attacks_from(Square::B1).population(), 3);
    /// assert!(position.attacks_from(Square::E4).is_empty());
    /// ```
    #[inline(always)]
    pub fn attacks_from(&self, square: Square) -> Bitboard {
        self.piece_at(square)
            .map(|piece| attacks_for(piece, square, self.occupied()))
            .unwrap_or_default()
    }

    /// Every square holding a `by` piece whose attacks (see [`Position::attacks_from`]) include `square`.
    ///
    /// Because attacks include friendly blockers, this counts defenders as well as attackers.
    ///
    /// # Example
    /// ```
    /// # use harmony::*;
    /// let position = Position::default();
    /// // d2 is defended by the b1 Knight, c1 Bishop, d1 Queen, and e1 King
    /// assert_eq!(position.attackers_of(Square::D2, Color::White).population(), 4);
    /// assert!(position.attackers_of(Square::D2, Color::Black).is_empty());
    /// ```
    pub fn attackers_of(&self, square: Square, by: Color) -> Bitboard {
        self.pieces_of(by)
            .filter(|&(from, _)| self.attacks_from(from).contains(square))
            .map(|(from, _)| from)
            .collect()
    }

    /// Alias for the free function [`pawn_attacks`].
    #[inline(always)]
    pub fn pawn_attacks(&self, square: Square, color: Color) -> Bitboard {
        pawn_attacks(square, color)
    }

    /// Every square the piece on `square` may move to, ignoring whether its own King would be left in check.
    ///
    /// * Knights and Kings move to any adjacent (or L-shaped) square not occupied by their own side.
    /// * Rooks, Bishops, and Queens slide until the edge of the board; the first occupied square is a destination
    ///   only if it holds an opposing piece.
    /// * Pawns push one square onto an empty square, two squares from their start row if both are empty,
    ///   and capture diagonally forward only onto an opposing piece.
    ///
    /// An empty `square` has no destinations.
    ///
    /// # Example
    /// ```
    /// # use harmony::*;
    /// let position = Position::default();
    /// let pushes = position.pseudo_legal_moves(Square::E2);
    /// assert_eq!(pushes, Bitboard::from_square(Square::E3) | Square::E4);
    /// assert!(position.pseudo_legal_moves(Square::A1).is_empty());
    /// ```
    pub fn pseudo_legal_moves(&self, square: Square) -> Bitboard {
        let Some(piece) = self.piece_at(square) else {
            return Bitboard::EMPTY_BOARD;
        };
        let color = piece.color();

        if piece.is_pawn() {
            let mut moves = pawn_attacks(square, color) & self.color_mask(color.opponent());

            if let Some(single) = square.forward_by(color, 1).filter(|&sq| !self.has(sq)) {
                moves.set(single);

                if square.row() == pawn_start_row(color) {
                    if let Some(double) = square.forward_by(color, 2).filter(|&sq| !self.has(sq)) {
                        moves.set(double);
                    }
                }
            }

            moves
        } else {
            self.attacks_from(square) & !self.color_mask(color)
        }
    }

    /// Returns `true` if any `by` piece could move to `square`.
    ///
    /// Pawns attack their forward diagonals whether or not anything stands there.
    /// Every other piece attacks its pseudo-legal destinations (see [`Position::pseudo_legal_moves`]),
    /// so a square occupied by `by` itself is only ever attacked by `by`'s Pawns.
    ///
    /// # Example
    /// ```
    /// # use harmony::*;
    /// let position = Position::default();
    /// assert!(position.is_square_attacked(Square::F6, Color::Black));
    /// assert!(!position.is_square_attacked(Square::E4, Color::Black));
    /// ```
    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        self.pieces_of(by).any(|(from, piece)| {
            if piece.is_pawn() {
                pawn_attacks(from, by).contains(square)
            } else {
                self.pseudo_legal_moves(from).contains(square)
            }
        })
    }

    /// Returns `true` if moving the piece on `from` to `to` leaves `color`'s King unattacked.
    ///
    /// The move itself is not checked for pseudo-legality.
    /// If `color` has no King after the move, the move is never legal.
    pub fn is_legal(&self, from: Square, to: Square, color: Color) -> bool {
        let after = self.simulate(from, to);

        after
            .king_square(color)
            .is_some_and(|king| !after.is_square_attacked(king, color.opponent()))
    }

    /// Every pseudo-legal move of `color` that does not leave its own King attacked.
    ///
    /// Moves are ordered by origin square, then by destination square.
    ///
    /// # Example
    /// ```
    /// # use harmony::*;
    /// let position = Position::default();
    /// assert_eq!(position.legal_moves(Color::White).len(), 20);
    /// assert_eq!(position.legal_moves(Color::Black).len(), 20);
    /// ```
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);

        for (from, _) in self.pieces_of(color) {
            for to in self.pseudo_legal_moves(from) {
                if self.is_legal(from, to, color) {
                    moves.push(Move::new(from, to));
                }
            }
        }

        moves
    }

    /// Number of legal moves available to `color`. See [`Position::legal_moves`].
    #[inline(always)]
    pub fn count_legal_moves(&self, color: Color) -> usize {
        self.legal_moves(color).len()
    }

    /// Every legal destination of the piece on `square`, for its owner.
    pub fn legal_moves_from(&self, square: Square) -> Bitboard {
        let Some(color) = self.color_at(square) else {
            return Bitboard::EMPTY_BOARD;
        };

        self.pseudo_legal_moves(square)
            .iter()
            .filter(|&to| self.is_legal(square, to, color))
            .collect()
    }

    /// Returns `true` if `color`'s King is attacked. A side without a King is never in check.
    #[inline(always)]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_square_attacked(king, color.opponent()))
    }

    /// Returns `true` if `color` is in check and has no legal moves.
    ///
    /// # Example
    /// ```
    /// # use harmony::*;
    /// // Fool's mate
    /// let position = Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR").unwrap();
    /// assert!(position.is_checkmated(Color::White));
    /// assert!(!position.is_checkmated(Color::Black));
    /// ```
    #[inline(always)]
    pub fn is_checkmated(&self, color: Color) -> bool {
        self.is_in_check(color) && self.legal_moves(color).is_empty()
    }

    /// Returns `true` if the piece on `square` is pinned to its own King.
    ///
    /// A piece is pinned when it stands on a rank, file, or diagonal between its King and an enemy slider that moves
    /// along that line, with nothing else in between. Kings, empty squares, and pieces of a side without a King are never pinned.
    ///
    /// # Example
    /// ```
    /// # use harmony::*;
    /// let position = Position::from_fen("4r1k1/8/8/8/8/8/4R3/4K3").unwrap();
    /// assert!(position.is_pinned(Square::E2));
    /// assert!(!position.is_pinned(Square::E1));
    /// ```
    pub fn is_pinned(&self, square: Square) -> bool {
        let Some(piece) = self.piece_at(square) else {
            return false;
        };
        if piece.is_king() {
            return false;
        }
        let color = piece.color();
        let Some(king) = self.king_square(color) else {
            return false;
        };

        let dr = square.row() as i8 - king.row() as i8;
        let dc = square.col() as i8 - king.col() as i8;
        let orthogonal = dr == 0 || dc == 0;
        if !orthogonal && dr.abs() != dc.abs() {
            return false;
        }
        let (step_r, step_c) = (dr.signum(), dc.signum());

        // Walk outward from the King: the first piece met must be the one on `square`
        let mut current = king;
        let mut passed_square = false;
        while let Some(next) = current.offset(step_r, step_c) {
            current = next;
            let Some(occupant) = self.piece_at(next) else {
                continue;
            };

            if !passed_square {
                if next != square {
                    return false;
                }
                passed_square = true;
                continue;
            }

            // The next piece beyond `square` must be an enemy slider along this line
            return occupant.color() != color
                && if orthogonal {
                    occupant.is_orthogonal_slider()
                } else {
                    occupant.is_diagonal_slider()
                };
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Checks if `moves` and `expected` contain all the same elements, ignoring order
    fn lists_match(moves: Bitboard, expected: &[Square]) {
        assert_eq!(
            moves.len(),
            expected.len(),
            "\nMoves: {:?}\nExpected: {:?}",
            moves.iter().collect::<Vec<_>>(),
            expected
        );

        for mv in moves {
            assert!(expected.contains(&mv), "{} not found in {:?}", mv, expected);
        }
    }

    #[test]
    fn test_rook_rays_stop_at_first_blocker() {
        // White Rook e4, White Pawn e2, Black Knight e7
        let position = Position::from_fen("4k3/4n3/8/8/4R3/8/4P3/4K3").unwrap();
        let moves = position.pseudo_legal_moves(Square::E4);

        lists_match(
            moves,
            &[
                Square::E5,
                Square::E6,
                Square::E7,
                Square::E3,
                Square::A4,
                Square::B4,
                Square::C4,
                Square::D4,
                Square::F4,
                Square::G4,
                Square::H4,
            ],
        );
        assert!(moves.contains(Square::from_index(12).unwrap()));
        assert!(!moves.contains(Square::from_index(4).unwrap()));
        assert!(!moves.contains(Square::from_index(52).unwrap()));
        assert!(!moves.contains(Square::from_index(60).unwrap()));
    }

    #[test]
    fn test_knight_never_wraps() {
        for row in 0..8 {
            let from_a = knight_attacks(Square::new(row, 0));
            let from_h = knight_attacks(Square::new(row, 7));
            assert!(from_a.iter().all(|sq| sq.col() <= 2));
            assert!(from_h.iter().all(|sq| sq.col() >= 5));
        }

        lists_match(
            knight_attacks(Square::from_index(32).unwrap()),
            &[Square::B6, Square::C5, Square::C3, Square::B2],
        );
    }

    #[test]
    fn test_king_attacks_in_corner() {
        lists_match(king_attacks(Square::A8), &[Square::B8, Square::A7, Square::B7]);
        assert_eq!(king_attacks(Square::E4).population(), 8);
    }

    #[test]
    fn test_pawn_pushes_and_captures() {
        let position = Position::from_fen("4k3/8/8/8/8/3n1p2/4P3/4K3").unwrap();
        lists_match(
            position.pseudo_legal_moves(Square::E2),
            &[Square::E3, Square::E4, Square::D3, Square::F3],
        );

        // A blocked pawn cannot double push through the blocker
        let blocked = Position::from_fen("4k3/8/8/8/8/4n3/4P3/4K3").unwrap();
        assert!(blocked.pseudo_legal_moves(Square::E2).is_empty());

        // Black pawns move toward increasing rows
        let black = Position::from_fen("4k3/3p4/8/8/8/8/8/4K3").unwrap();
        lists_match(black.pseudo_legal_moves(Square::D7), &[Square::D6, Square::D5]);
    }

    #[test]
    fn test_pawn_diagonals_attack_regardless_of_occupancy() {
        let position = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3").unwrap();
        assert!(position.is_square_attacked(Square::D3, Color::White));
        assert!(position.is_square_attacked(Square::F3, Color::White));
        assert!(!position.is_square_attacked(Square::E3, Color::White));
    }

    #[test]
    fn test_pinned_piece_stays_on_pin_line() {
        // White King e1, White Rook e2, Black Rook e8, Black King a8
        let position = Position::from_fen("k3r3/8/8/8/8/8/4R3/4K3").unwrap();
        assert!(position.is_pinned(Square::E2));

        let rook_moves = position.legal_moves_from(Square::E2);
        assert!(rook_moves.is_nonempty());
        assert!(rook_moves.iter().all(|sq| sq.col() == 4));
        assert!(rook_moves.contains(Square::E8));

        let moves = position.legal_moves(Color::White);
        assert!(moves
            .iter()
            .filter(|mv| mv.from() == Square::E2)
            .all(|mv| mv.to().col() == 4));
    }

    #[test]
    fn test_not_pinned_without_slider_or_with_blocker() {
        // A Knight behind the Rook does not pin it
        let knight = Position::from_fen("k3n3/8/8/8/8/8/4R3/4K3").unwrap();
        assert!(!knight.is_pinned(Square::E2));

        // A Bishop on a file does not pin
        let bishop = Position::from_fen("k3b3/8/8/8/8/8/4R3/4K3").unwrap();
        assert!(!bishop.is_pinned(Square::E2));

        // A second piece in between breaks the pin
        let blocked = Position::from_fen("k3r3/8/8/4P3/8/8/4R3/4K3").unwrap();
        assert!(!blocked.is_pinned(Square::E2));

        // Diagonal pins work too
        let diagonal = Position::from_fen("k7/8/8/b7/8/2N5/8/4K3").unwrap();
        assert!(diagonal.is_pinned(Square::C3));
    }

    #[test]
    fn test_missing_king() {
        let position = Position::from_fen("8/8/8/8/8/8/4P3/8").unwrap();
        assert!(!position.is_in_check(Color::White));
        assert!(!position.is_checkmated(Color::White));
        assert!(position.legal_moves(Color::White).is_empty());
        assert!(!position.is_legal(Square::E2, Square::E3, Color::White));
    }

    #[test]
    fn test_attackers_include_defenders() {
        let position = Position::from_fen("4k3/8/8/3p4/4P3/8/8/4K3").unwrap();
        assert_eq!(
            position.attackers_of(Square::D5, Color::White),
            Bitboard::from_square(Square::E4)
        );
        assert_eq!(
            position.attackers_of(Square::E4, Color::Black),
            Bitboard::from_square(Square::D5)
        );
    }
}
