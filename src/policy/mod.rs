//! Computer opponents.
//!
//! Policies only read the engine's query surface and synthesise arguments
//! for its operations; they never touch the board. The choice among legal
//! options is delegated to a `SelectionPolicy`:
//! - `UniformRandom`: seeded uniform choice
//! - `FirstOption`: always the first option, for deterministic tests

use tracing::debug;

use crate::core::{ActionResult, GameRng, PlayerSide, Position};
use crate::pieces::{Piece, PieceId, PieceType};
use crate::rules::{GameState, Phase, TurnRequest, TurnResult};

// =============================================================================
// Selection Policy
// =============================================================================

/// Picks one of `option_count` legal options.
pub trait SelectionPolicy {
    /// Index of the chosen option, or `None` when there is nothing to choose.
    fn select(&mut self, option_count: usize) -> Option<usize>;
}

/// Uniform random choice from a seeded stream.
#[derive(Clone, Debug)]
pub struct UniformRandom {
    rng: GameRng,
}

impl UniformRandom {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: GameRng::new(seed) }
    }

    #[must_use]
    pub fn from_rng(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl SelectionPolicy for UniformRandom {
    fn select(&mut self, option_count: usize) -> Option<usize> {
        (option_count > 0).then(|| self.rng.gen_index(option_count))
    }
}

/// Always the first option.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstOption;

impl SelectionPolicy for FirstOption {
    fn select(&mut self, option_count: usize) -> Option<usize> {
        (option_count > 0).then_some(0)
    }
}

// =============================================================================
// Random Player
// =============================================================================

/// What `RandomPlayer::step` did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Placed(Piece),
    Assigned(PlayerSide),
    Moved(PlayerSide, TurnResult),
    Resurrected(Piece),
    /// The acting side had no legal option.
    NoOptions(PlayerSide),
    /// The match is already over.
    Finished,
}

/// Plays any phase of the match by choosing among legal options.
#[derive(Clone, Debug)]
pub struct RandomPlayer<P: SelectionPolicy> {
    policy: P,
}

impl RandomPlayer<UniformRandom> {
    /// Uniform random player from a seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(UniformRandom::new(seed))
    }
}

impl<P: SelectionPolicy> RandomPlayer<P> {
    pub fn new(policy: P) -> Self {
        Self { policy }
    }

    fn pick<T: Copy>(&mut self, options: &[T]) -> Option<T> {
        self.policy.select(options.len()).and_then(|i| options.get(i).copied())
    }

    /// A counter type and square for `side`'s next placement.
    pub fn choose_placement(
        &mut self,
        game: &GameState,
        side: PlayerSide,
    ) -> Option<(PieceType, Position)> {
        let kind = self.pick(&game.remaining_placements(side))?;
        let position = self.pick(&game.placement_positions(side))?;
        Some((kind, position))
    }

    /// Two of `side`'s counters to make strong.
    pub fn choose_strengths(&mut self, game: &GameState, side: PlayerSide) -> Option<[PieceId; 2]> {
        let ids: Vec<PieceId> = game.board().pieces_for(side).map(|p| p.id).collect();
        if ids.len() != PieceType::ALL.len() {
            return None;
        }
        let weak = self.pick(&ids)?;
        let mut strong = ids.into_iter().filter(|id| *id != weak);
        Some([strong.next()?, strong.next()?])
    }

    /// A move for `side`. No strength swap; resurrection is left pending
    /// and resolved with [`RandomPlayer::choose_resurrection`].
    pub fn choose_turn(&mut self, game: &GameState, side: PlayerSide) -> Option<TurnRequest> {
        let (piece, destination) = self.pick(&game.legal_moves(side))?;
        Some(TurnRequest::new(piece, destination))
    }

    /// A square for `side`'s returning counter.
    pub fn choose_resurrection(&mut self, game: &GameState, side: PlayerSide) -> Option<Position> {
        self.pick(&game.available_resurrection_positions(side))
    }

    /// Act once for whichever side the match is waiting on.
    pub fn step(&mut self, game: &mut GameState) -> ActionResult<Step> {
        match game.phase() {
            Phase::Placement => {
                let side = game.current_player();
                let Some((kind, position)) = self.choose_placement(game, side) else {
                    return Ok(Step::NoOptions(side));
                };
                Ok(Step::Placed(game.place_piece(side, kind, position)?))
            }
            Phase::Assignment => {
                let side = if game.strengths_assigned(game.current_player()) {
                    game.current_player().opponent()
                } else {
                    game.current_player()
                };
                let Some(strong) = self.choose_strengths(game, side) else {
                    return Ok(Step::NoOptions(side));
                };
                game.assign_initial_strengths(side, &strong)?;
                Ok(Step::Assigned(side))
            }
            Phase::Active => {
                if let Some(pending) = game.pending_resurrection() {
                    let side = pending.owner();
                    let Some(position) = self.choose_resurrection(game, side) else {
                        return Ok(Step::NoOptions(side));
                    };
                    return Ok(Step::Resurrected(game.complete_resurrection(side, position)?));
                }
                let side = game.current_player();
                let Some(turn) = self.choose_turn(game, side) else {
                    return Ok(Step::NoOptions(side));
                };
                let result = game.take_turn(side, &turn)?;
                Ok(Step::Moved(side, result))
            }
            Phase::GameOver => Ok(Step::Finished),
        }
    }

    /// Step until the match ends, someone is stuck, or `max_steps` is reached.
    ///
    /// Returns the number of steps taken.
    pub fn play_out(&mut self, game: &mut GameState, max_steps: usize) -> ActionResult<usize> {
        for taken in 0..max_steps {
            match self.step(game)? {
                Step::Finished => return Ok(taken),
                Step::NoOptions(side) => {
                    debug!(side = %side, "no legal option");
                    return Ok(taken);
                }
                _ => {}
            }
        }
        Ok(max_steps)
    }
}
