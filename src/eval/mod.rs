/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, Sub},
    str::FromStr,
};

use anyhow::{bail, Result};
use log::{debug, warn};

use crate::{Color, Position};

mod activity;
mod center;
mod config;
mod context;
mod coordination;
mod exchange;
mod harmony;
mod king;
mod material;
mod mobility;
mod pawns;
mod placement;
mod psqt;
mod tactics;
mod tempo;

pub use config::EvalConfig;
pub use psqt::Psqt;

use context::EvalContext;

/// Space control is not measured; it always contributes this neutral value.
const SPACE_CONTROL: i32 = 0;

/// Truncates a real-valued score toward zero.
///
/// Scores are first snapped to a thousandth, so that two mathematically equal sums
/// accumulated in different orders always truncate to the same integer.
#[inline(always)]
pub(crate) fn truncate(score: f32) -> i32 {
    ((score * 1000.0).round() / 1000.0) as i32
}

/// Combines per-side scores as White's minus Black's.
#[inline(always)]
fn balance<T: Sub<Output = T>>(f: impl Fn(Color) -> T) -> T {
    f(Color::White) - f(Color::Black)
}

/// One of the twelve named components of an [`Evaluation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Factor {
    MaterialBalance,
    PieceMobility,
    PieceCoordination,
    PawnStructure,
    KingSafety,
    ControlOfCenter,
    PieceActivity,
    SpaceControl,
    PawnStructureStrength,
    PiecePlacement,
    PieceExchange,
    Tempo,
}

impl Factor {
    /// Number of factors.
    pub const COUNT: usize = 12;

    /// Every factor, in canonical order.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        use Factor::*;
        [
            MaterialBalance,
            PieceMobility,
            PieceCoordination,
            PawnStructure,
            KingSafety,
            ControlOfCenter,
            PieceActivity,
            SpaceControl,
            PawnStructureStrength,
            PiecePlacement,
            PieceExchange,
            Tempo,
        ]
    }

    /// Index of this factor in canonical order.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// The `snake_case` name of this factor.
    ///
    /// # Example
    /// ```
    /// # use harmony::Factor;
    /// assert_eq!(Factor::ControlOfCenter.name(), "control_of_center");
    /// ```
    pub const fn name(&self) -> &'static str {
        use Factor::*;
        match self {
            MaterialBalance => "material_balance",
            PieceMobility => "piece_mobility",
            PieceCoordination => "piece_coordination",
            PawnStructure => "pawn_structure",
            KingSafety => "king_safety",
            ControlOfCenter => "control_of_center",
            PieceActivity => "piece_activity",
            SpaceControl => "space_control",
            PawnStructureStrength => "pawn_structure_strength",
            PiecePlacement => "piece_placement",
            PieceExchange => "piece_exchange",
            Tempo => "tempo",
        }
    }

    /// The human-readable label of this factor.
    ///
    /// # Example
    /// ```
    /// # use harmony::Factor;
    /// assert_eq!(Factor::ControlOfCenter.label(), "Control of Center");
    /// ```
    pub const fn label(&self) -> &'static str {
        use Factor::*;
        match self {
            MaterialBalance => "Material Balance",
            PieceMobility => "Piece Mobility",
            PieceCoordination => "Piece Coordination",
            PawnStructure => "Pawn Structure",
            KingSafety => "King Safety",
            ControlOfCenter => "Control of Center",
            PieceActivity => "Piece Activity",
            SpaceControl => "Space Control",
            PawnStructureStrength => "Pawn Structure Strength",
            PiecePlacement => "Piece Placement",
            PieceExchange => "Piece Exchange",
            Tempo => "Tempo",
        }
    }

    /// Returns `true` if this factor is negated when evaluating from Black's point of view.
    ///
    /// The remaining factors are always reported from White's point of view.
    #[inline(always)]
    pub const fn flips_with_perspective(&self) -> bool {
        use Factor::*;
        matches!(
            self,
            MaterialBalance
                | PieceMobility
                | PieceCoordination
                | PawnStructure
                | ControlOfCenter
                | PieceActivity
                | Tempo
        )
    }
}

impl FromStr for Factor {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::all().into_iter().find(|factor| factor.name() == s) {
            Some(factor) => Ok(factor),
            None => bail!("Invalid factor name: {s:?}"),
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl<T> Index<Factor> for [T; Factor::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Factor) -> &Self::Output {
        &self[index.index()]
    }
}

/// The result of analyzing a position: twelve factor scores and a pair of harmony scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Evaluation {
    /// The side the factors are reported for.
    perspective: Color,

    /// Factor scores, in canonical order.
    factors: [i32; Factor::COUNT],

    /// White's and Black's harmony scores. Never negated.
    harmony: (i32, i32),
}

impl Evaluation {
    /// The side whose point of view this evaluation was made from.
    #[inline(always)]
    pub const fn perspective(&self) -> Color {
        self.perspective
    }

    /// The score of `factor`.
    #[inline(always)]
    pub fn get(&self, factor: Factor) -> i32 {
        self.factors[factor]
    }

    /// The score of the factor called `name`, if there is one.
    ///
    /// # Example
    /// ```
    /// # use harmony::*;
    /// let eval = analyze(&Position::default(), Color::White);
    /// assert_eq!(eval.get_by_name("material_balance"), Some(0));
    /// assert_eq!(eval.get_by_name("mate_threats"), None);
    /// ```
    pub fn get_by_name(&self, name: &str) -> Option<i32> {
        name.parse().ok().map(|factor| self.get(factor))
    }

    /// White's and Black's harmony scores, in that order.
    #[inline(always)]
    pub const fn harmony(&self) -> (i32, i32) {
        self.harmony
    }

    /// An iterator over every factor and its score, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Factor, i32)> + '_ {
        Factor::all().into_iter().map(|factor| (factor, self.get(factor)))
    }
}

impl Index<Factor> for Evaluation {
    type Output = i32;
    #[inline(always)]
    fn index(&self, index: Factor) -> &Self::Output {
        &self.factors[index]
    }
}

impl fmt::Display for Evaluation {
    /// Prints one labelled line per factor, followed by both harmony scores.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Evaluation for {}:", self.perspective.title())?;
        for (factor, score) in self.iter() {
            writeln!(f, "{}: {score}", factor.label())?;
        }
        writeln!(f, "White Harmony Score: {}", self.harmony.0)?;
        write!(f, "Black Harmony Score: {}", self.harmony.1)
    }
}

/// Encapsulates the logic of scoring a chess position.
///
/// Every factor is computed from White's point of view, so a high score is good for White.
/// [`Evaluator::evaluate`] then flips some of them when asked for Black's point of view (see [`Factor::flips_with_perspective`]).
#[derive(Debug, Clone)]
pub struct Evaluator<'a> {
    ctx: EvalContext<'a>,
    config: EvalConfig,
}

impl<'a> Evaluator<'a> {
    /// Construct a new [`Evaluator`] with the default weights, computing any important metadata.
    #[inline(always)]
    pub fn new(position: &'a Position) -> Self {
        Self::with_config(position, EvalConfig::default())
    }

    /// Construct a new [`Evaluator`] with custom weights.
    ///
    /// Warns once for each side without a King; every King-dependent term is neutral for that side.
    pub fn with_config(position: &'a Position, config: EvalConfig) -> Self {
        let ctx = EvalContext::new(position);

        for color in ctx.missing_kings() {
            warn!("{} has no King; King-dependent terms are neutral", color.title());
        }

        Self { ctx, config }
    }

    /// White's and Black's harmony scores.
    #[inline(always)]
    pub fn harmony(&self) -> (i32, i32) {
        harmony::evaluate(&self.ctx, &self.config)
    }

    /// The score of a single factor, from White's point of view.
    pub fn factor(&self, factor: Factor) -> i32 {
        let harmony = if factor == Factor::PieceCoordination {
            self.harmony()
        } else {
            (0, 0)
        };

        self.compute(factor, harmony)
    }

    /// Evaluate every factor from `perspective`'s point of view.
    pub fn evaluate(&self, perspective: Color) -> Evaluation {
        let harmony = self.harmony();
        let mut factors = [0; Factor::COUNT];

        for factor in Factor::all() {
            let mut score = self.compute(factor, harmony);

            if perspective == Color::Black && factor.flips_with_perspective() {
                score = -score;
            }

            debug!("{factor}: {score}");
            factors[factor.index()] = score;
        }

        debug!("harmony: {harmony:?}");

        Evaluation {
            perspective,
            factors,
            harmony,
        }
    }

    /// Computes `factor` from White's point of view, given both sides' harmony scores.
    fn compute(&self, factor: Factor, harmony: (i32, i32)) -> i32 {
        let ctx = &self.ctx;
        let config = &self.config;

        match factor {
            Factor::MaterialBalance => balance(|color| material::evaluate(ctx, color)),
            Factor::PieceMobility => truncate(mobility::evaluate(ctx, config)),
            Factor::PieceCoordination => truncate(coordination::evaluate(ctx, config, harmony)),
            Factor::PawnStructure => truncate(pawns::evaluate(ctx, config)),
            Factor::KingSafety => balance(|color| king::evaluate(ctx, color, config)),
            Factor::ControlOfCenter => truncate(balance(|color| center::evaluate(ctx, color))),
            Factor::PieceActivity => truncate(activity::evaluate(ctx, config)),
            Factor::SpaceControl => SPACE_CONTROL,
            Factor::PawnStructureStrength => balance(|color| pawns::chain_strength(ctx, color)),
            Factor::PiecePlacement => {
                config.scale_psqt(balance(|color| placement::evaluate(ctx, color)))
            }
            Factor::PieceExchange => truncate(balance(|color| exchange::evaluate(ctx, color))),
            Factor::Tempo => truncate(balance(|color| tempo::evaluate(ctx, color, config))),
        }
    }
}

/// Analyze `position` from `perspective`'s point of view with the default weights.
///
/// # Example
/// ```
/// # use harmony::*;
/// let position = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR").unwrap();
/// let white = analyze(&position, Color::White);
/// let black = analyze(&position, Color::Black);
/// assert_eq!(white[Factor::MaterialBalance], -9);
/// assert_eq!(black[Factor::MaterialBalance], 9);
/// ```
pub fn analyze(position: &Position, perspective: Color) -> Evaluation {
    Evaluator::new(position).evaluate(perspective)
}

/// White's and Black's harmony scores for `position`, in that order.
///
/// # Example
/// ```
/// # use harmony::*;
/// let (white, black) = evaluate_piece_harmony(&Position::default());
/// assert_eq!(white, black);
/// ```
pub fn evaluate_piece_harmony(position: &Position) -> (i32, i32) {
    Evaluator::new(position).harmony()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate(2.9999), 3);
        assert_eq!(truncate(2.5), 2);
        assert_eq!(truncate(-2.5), -2);
        assert_eq!(truncate(-0.9999), -1);
        assert_eq!(truncate(0.4), 0);
    }

    #[test]
    fn test_factor_names_round_trip() {
        for factor in Factor::all() {
            assert_eq!(factor.name().parse::<Factor>().unwrap(), factor);
        }
        assert!("space".parse::<Factor>().is_err());
    }

    #[test]
    fn test_factor_order() {
        for (i, factor) in Factor::all().into_iter().enumerate() {
            assert_eq!(factor.index(), i);
        }
        assert_eq!(Factor::all().into_iter().filter(Factor::flips_with_perspective).count(), 7);
    }

    #[test]
    fn test_start_position_is_neutral() {
        let eval = analyze(&Position::default(), Color::White);
        for (factor, score) in eval.iter() {
            assert_eq!(score, 0, "{factor} should be 0");
        }
    }

    #[test]
    fn test_single_factor_matches_full_evaluation() {
        let position = Position::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R").unwrap();
        let evaluator = Evaluator::new(&position);
        let eval = evaluator.evaluate(Color::White);

        for factor in Factor::all() {
            assert_eq!(evaluator.factor(factor), eval[factor], "{factor}");
        }
    }

    #[test]
    fn test_display() {
        let eval = analyze(&Position::default(), Color::Black);
        let text = eval.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 1 + Factor::COUNT + 2);
        assert_eq!(lines[0], "Evaluation for Black:");
        assert_eq!(lines[1], "Material Balance: 0");
        assert_eq!(lines[12], "Tempo: 0");
        assert!(lines[13].starts_with("White Harmony Score: "));
        assert!(lines[14].starts_with("Black Harmony Score: "));
    }
}
