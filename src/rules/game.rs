//! The Sa-Jin match: phases, turn order, captures and resurrection.
//!
//! ## Flow
//!
//! 1. **Placement**: sides alternate placing one counter per call on their
//!    home rows. A placed counter may not share a row or column with any
//!    living counter.
//! 2. **Assignment**: each side marks exactly two of its three counters
//!    strong, once.
//! 3. **Active**: alternating single-square moves, each optionally followed by
//!    a strength swap. After the move the mover's strong counters attack;
//!    any opposing strong counter covered by two or more of them is captured.
//!    A side that loses one counter and walks both survivors onto the enemy
//!    back rank may return the lost counter to its home rows.
//! 4. **GameOver**: the first side to capture two counters wins.
//!
//! ## Atomicity
//!
//! A refused call leaves the state untouched. `take_turn` checks its inputs
//! first and then resolves the turn on a scratch copy, committing only when
//! every step succeeded.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::board::Board;
use crate::core::{
    iter_half_board, ActionErrorKind, ActionResult, GameConfig, IllegalAction, PlayerSide, Position,
    SideMap, SnapshotError,
};
use crate::pieces::{coverage_map, Piece, PieceId, PieceType};

use super::summary::{BoardSnapshot, GameResult, Phase, StatusSummary};
use super::turn::{RecordKind, TurnRecord, TurnRequest, TurnResult};

/// Strong counters a side must keep while it has at least that many alive.
const MIN_STRONG: usize = 2;

/// Captures needed to win.
const CAPTURES_TO_WIN: u8 = 2;

fn illegal(kind: ActionErrorKind, reason: impl Into<String>) -> IllegalAction {
    IllegalAction::new(kind, reason)
}

/// Complete state of one match.
///
/// The value is owned by whoever drives the match (console, GUI, test) and
/// is passed explicitly between calls.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    phase: Phase,
    current_player: PlayerSide,
    placements_remaining: SideMap<SmallVec<[PieceType; 3]>>,
    strengths_assigned: SideMap<bool>,
    captures: SideMap<u8>,
    winner: Option<PlayerSide>,
    pending_resurrection: Option<PieceId>,
    turn_number: u32,
    history: Vector<TurnRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl GameState {
    /// Start a match in the placement phase.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let starting_side = config.starting_side;
        Self {
            config,
            board: Board::new(),
            phase: Phase::Placement,
            current_player: starting_side,
            placements_remaining: SideMap::new(|_| SmallVec::from_slice(&PieceType::ALL)),
            strengths_assigned: SideMap::with_value(false),
            captures: SideMap::with_value(0),
            winner: None,
            pending_resurrection: None,
            turn_number: 1,
            history: Vector::new(),
        }
    }

    /// Start directly in active play from a prepared board.
    pub(super) fn active_from(
        config: GameConfig,
        board: Board,
        captures: SideMap<u8>,
        to_move: PlayerSide,
    ) -> Self {
        Self {
            config,
            board,
            phase: Phase::Active,
            current_player: to_move,
            placements_remaining: SideMap::with_value(SmallVec::new()),
            strengths_assigned: SideMap::with_value(true),
            captures,
            winner: None,
            pending_resurrection: None,
            turn_number: 1,
            history: Vector::new(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Side expected to act next.
    #[must_use]
    pub fn current_player(&self) -> PlayerSide {
        self.current_player
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerSide> {
        self.winner
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// `Some` once the match has ended.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        if !self.is_over() {
            return None;
        }
        Some(self.winner.map_or(GameResult::Draw, GameResult::Winner))
    }

    /// Opposing counters captured by `side`.
    #[must_use]
    pub fn captures(&self, side: PlayerSide) -> u8 {
        self.captures[side]
    }

    /// Check if `side` already designated its strong counters.
    #[must_use]
    pub fn strengths_assigned(&self, side: PlayerSide) -> bool {
        self.strengths_assigned[side]
    }

    /// The captured counter waiting for `complete_resurrection`.
    #[must_use]
    pub fn pending_resurrection(&self) -> Option<&Piece> {
        self.pending_resurrection.and_then(|id| self.board.get(id))
    }

    /// Accepted active-play turns and resurrections, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.history
    }

    // === Placement ===

    /// Place one of `side`'s counters during the placement phase.
    pub fn place_piece(
        &mut self,
        side: PlayerSide,
        kind: PieceType,
        position: Position,
    ) -> ActionResult<Piece> {
        if self.phase != Phase::Placement {
            return Err(illegal(
                ActionErrorKind::WrongPhase,
                "Pieces can only be placed during the placement phase",
            ));
        }
        if side != self.current_player {
            return Err(illegal(
                ActionErrorKind::WrongPlayer,
                "It is not this player's placement turn",
            ));
        }
        if !self.placements_remaining[side].contains(&kind) {
            return Err(illegal(
                ActionErrorKind::AlreadyPlaced,
                format!("The {kind} has already been placed"),
            ));
        }
        self.check_home_row(side, position)?;
        if self.board.is_occupied(position) {
            return Err(illegal(
                ActionErrorKind::SquareOccupied,
                format!("Square {position} already occupied"),
            ));
        }
        self.check_alignment(position)?;

        let piece = Piece::new(side, kind, position);
        self.board.add_piece(piece.clone())?;
        self.placements_remaining[side].retain(|k| *k != kind);
        debug!(side = %side, piece = %piece.id, at = %position, "placed counter");

        let other = side.opponent();
        if !self.placements_remaining[other].is_empty() {
            self.current_player = other;
        } else if !self.placements_remaining[side].is_empty() {
            self.current_player = side;
        } else {
            self.phase = Phase::Assignment;
            self.current_player = side;
            info!(phase = %self.phase, "all counters placed");
        }

        Ok(piece)
    }

    /// Designate exactly two of `side`'s counters strong; the third is weak.
    pub fn assign_initial_strengths(
        &mut self,
        side: PlayerSide,
        strong: &[PieceId],
    ) -> ActionResult<()> {
        if self.phase != Phase::Assignment {
            return Err(illegal(
                ActionErrorKind::WrongPhase,
                "Initial strengths can only be assigned after placement",
            ));
        }
        if self.strengths_assigned[side] {
            return Err(illegal(
                ActionErrorKind::AlreadyAssigned,
                "This player has already assigned strengths",
            ));
        }
        if self.board.pieces_for(side).count() != PieceType::ALL.len() {
            return Err(illegal(
                ActionErrorKind::IncompleteSide,
                "All three counters must be on the board to assign strength",
            ));
        }

        let mut chosen: SmallVec<[PieceId; 3]> = SmallVec::new();
        for id in strong {
            if !chosen.contains(id) {
                chosen.push(*id);
            }
        }
        if chosen.len() != MIN_STRONG {
            return Err(illegal(
                ActionErrorKind::StrongCount,
                "Exactly two counters must be designated strong",
            ));
        }
        if let Some(foreign) = chosen.iter().find(|id| id.owner != side) {
            return Err(illegal(
                ActionErrorKind::NotOwner,
                format!("{foreign} is not your counter"),
            ));
        }

        let ids: SmallVec<[PieceId; 3]> = self.board.pieces_for(side).map(|p| p.id).collect();
        for id in ids {
            self.board.set_strong(id, chosen.contains(&id))?;
        }
        self.strengths_assigned[side] = true;
        debug!(side = %side, strong = ?chosen, "assigned strengths");

        if self.strengths_assigned.all(|done| *done) {
            self.phase = Phase::Active;
            self.current_player = self.config.starting_side;
            info!(phase = %self.phase, first = %self.current_player, "play begins");
        }

        Ok(())
    }

    // === Active Play ===

    /// Play one turn for `side`: move, optional swap, captures, resurrection.
    pub fn take_turn(
        &mut self,
        side: PlayerSide,
        request: &TurnRequest,
    ) -> ActionResult<TurnResult> {
        self.check_turn(side, request)?;

        let mut next = self.clone();
        let result = next.resolve_turn(side, request)?;
        *self = next;

        Ok(result)
    }

    fn check_turn(&self, side: PlayerSide, request: &TurnRequest) -> ActionResult<()> {
        match self.phase {
            Phase::Active => {}
            Phase::GameOver => return Err(illegal(ActionErrorKind::WrongPhase, "The game is over")),
            _ => {
                return Err(illegal(
                    ActionErrorKind::WrongPhase,
                    "Cannot take a turn until the game has started",
                ))
            }
        }
        if self.pending_resurrection.is_some() {
            return Err(illegal(
                ActionErrorKind::ResurrectionPending,
                "A resurrection must be completed before taking another turn",
            ));
        }
        if side != self.current_player {
            return Err(illegal(ActionErrorKind::WrongPlayer, "It is not this player's turn"));
        }

        let piece = self.board.piece(request.piece)?;
        if piece.owner() != side {
            return Err(illegal(ActionErrorKind::NotOwner, "You can only move your own counters"));
        }
        if !piece.alive {
            return Err(illegal(ActionErrorKind::CapturedPiece, "Cannot move a captured counter"));
        }
        match piece.position.chebyshev_distance(request.destination) {
            0 => {
                return Err(illegal(
                    ActionErrorKind::NullMove,
                    "A counter must move at least one square",
                ))
            }
            1 => {}
            _ => {
                return Err(illegal(
                    ActionErrorKind::IllegalDistance,
                    "Counters move one square in any direction",
                ))
            }
        }
        if self.board.is_occupied(request.destination) {
            return Err(illegal(ActionErrorKind::SquareOccupied, "Destination square is occupied"));
        }

        if let Some((first, second)) = request.swap {
            self.check_swap(side, first, second)?;
        }

        Ok(())
    }

    fn check_swap(&self, side: PlayerSide, first: PieceId, second: PieceId) -> ActionResult<()> {
        if first == second {
            return Err(illegal(ActionErrorKind::InvalidSwap, "Cannot swap a counter with itself"));
        }
        let owned = |id: PieceId| self.board.pieces_for(side).any(|p| p.id == id);
        if !owned(first) || !owned(second) {
            return Err(illegal(
                ActionErrorKind::InvalidSwap,
                "Both counters in a swap must belong to the player",
            ));
        }
        // Exchanging two flags keeps the count, so only an already short side fails.
        let alive = self.board.pieces_for(side).count();
        let strong = self.board.pieces_for(side).filter(|p| p.strong).count();
        if strong < alive.min(MIN_STRONG) {
            return Err(illegal(
                ActionErrorKind::InsufficientStrength,
                "At least two counters must be on their strong side",
            ));
        }
        Ok(())
    }

    fn resolve_turn(
        &mut self,
        side: PlayerSide,
        request: &TurnRequest,
    ) -> ActionResult<TurnResult> {
        self.board.move_piece(request.piece, request.destination)?;
        debug!(side = %side, piece = %request.piece, to = %request.destination, "moved counter");

        if let Some((first, second)) = request.swap {
            let first_strong = self.board.piece(first)?.strong;
            let second_strong = self.board.piece(second)?.strong;
            self.board.set_strong(first, second_strong)?;
            self.board.set_strong(second, first_strong)?;
            debug!(side = %side, first = %first, second = %second, "swapped strengths");
        }

        let captures = self.resolve_captures(side)?;
        let mut result = TurnResult {
            captures,
            ..TurnResult::default()
        };

        // A finished game pre-empts resurrection.
        if self.phase == Phase::Active {
            match (self.resurrection_candidate_id(side), request.resurrect_at) {
                (Some(candidate), None) => {
                    self.pending_resurrection = Some(candidate);
                    result.needs_resurrection = true;
                    debug!(side = %side, piece = %candidate, "resurrection pending");
                }
                (Some(candidate), Some(position)) => {
                    self.check_resurrection_square(side, position)?;
                    self.board.resurrect_piece(candidate, position)?;
                    result.resurrected = Some(self.board.piece(candidate)?.clone());
                    debug!(side = %side, piece = %candidate, at = %position, "resurrected counter");
                }
                (None, Some(_)) => {
                    return Err(illegal(
                        ActionErrorKind::NotEligible,
                        "A resurrection was requested but no counter can return",
                    ))
                }
                (None, None) => {}
            }
        }

        self.history.push_back(TurnRecord {
            turn: self.turn_number,
            side,
            kind: RecordKind::Move {
                request: request.clone(),
                captured: result.captures.iter().map(|p| p.id).collect(),
            },
        });

        if !result.needs_resurrection && self.phase == Phase::Active {
            self.current_player = side.opponent();
            self.turn_number += 1;
        }

        Ok(result)
    }

    /// Capture every opposing strong counter covered by two or more of the
    /// attacker's strong counters, all at once.
    fn resolve_captures(&mut self, attacker: PlayerSide) -> ActionResult<SmallVec<[Piece; 3]>> {
        let occupied = self.board.occupied();
        let coverage = coverage_map(self.board.pieces_for(attacker), &occupied);
        trace!(attacker = %attacker, squares = coverage.len(), "computed coverage");

        let defender = attacker.opponent();
        let victims: SmallVec<[PieceId; 3]> = self
            .board
            .pieces_for(defender)
            .filter(|p| p.strong && coverage.get(&p.position).copied().unwrap_or(0) >= 2)
            .map(|p| p.id)
            .collect();

        for id in &victims {
            self.board.remove_piece(*id)?;
            self.board.set_strong(*id, false)?;
        }

        let mut captured = SmallVec::new();
        for id in victims {
            self.captures[attacker] += 1;
            let survivors: SmallVec<[PieceId; 3]> =
                self.board.pieces_for(defender).map(|p| p.id).collect();
            if survivors.len() == MIN_STRONG {
                for survivor in survivors {
                    self.board.set_strong(survivor, true)?;
                }
            }
            let piece = self.board.piece(id)?.clone();
            debug!(attacker = %attacker, piece = %id, at = %piece.position, "captured counter");
            captured.push(piece);
        }

        if !captured.is_empty() && self.captures[attacker] >= CAPTURES_TO_WIN {
            self.phase = Phase::GameOver;
            self.winner = Some(attacker);
            info!(winner = %attacker, "game over");
        }

        Ok(captured)
    }

    /// Return the pending counter to `position` and pass the turn.
    pub fn complete_resurrection(
        &mut self,
        side: PlayerSide,
        position: Position,
    ) -> ActionResult<Piece> {
        let candidate = self.pending_resurrection.ok_or_else(|| {
            illegal(ActionErrorKind::NoPendingResurrection, "No resurrection is pending")
        })?;
        if candidate.owner != side {
            return Err(illegal(
                ActionErrorKind::WrongPlayer,
                "It is not this player's resurrection to resolve",
            ));
        }
        self.check_resurrection_square(side, position)?;

        self.board.resurrect_piece(candidate, position)?;
        self.pending_resurrection = None;
        self.history.push_back(TurnRecord {
            turn: self.turn_number,
            side,
            kind: RecordKind::Resurrection {
                piece: candidate,
                position,
            },
        });
        if self.phase == Phase::Active {
            self.current_player = side.opponent();
            self.turn_number += 1;
        }
        debug!(side = %side, piece = %candidate, at = %position, "resurrected counter");

        self.board.piece(candidate).cloned()
    }

    // === Validation Helpers ===

    fn check_home_row(&self, side: PlayerSide, position: Position) -> ActionResult<()> {
        if side.is_home_row(position.row()) {
            Ok(())
        } else {
            Err(illegal(
                ActionErrorKind::OutsideHomeRows,
                "Counter must be placed on your half of the board",
            ))
        }
    }

    fn check_alignment(&self, position: Position) -> ActionResult<()> {
        if self.board.is_aligned(position) {
            Err(illegal(
                ActionErrorKind::Aligned,
                "Counters cannot share the same row or column with another counter",
            ))
        } else {
            Ok(())
        }
    }

    fn check_resurrection_square(&self, side: PlayerSide, position: Position) -> ActionResult<()> {
        self.check_home_row(side, position)?;
        if self.board.is_occupied(position) {
            return Err(illegal(
                ActionErrorKind::SquareOccupied,
                "Cannot resurrect onto an occupied square",
            ));
        }
        self.check_alignment(position)
    }

    fn resurrection_candidate_id(&self, side: PlayerSide) -> Option<PieceId> {
        let mut lost = self.board.all_pieces_for(side).filter(|p| !p.alive);
        let candidate = lost.next()?;
        if lost.next().is_some() {
            return None;
        }
        let back_rank = side.enemy_home_row();
        let mut survivors = 0;
        for piece in self.board.pieces_for(side) {
            if piece.position.row() != back_rank {
                return None;
            }
            survivors += 1;
        }
        (survivors == MIN_STRONG).then_some(candidate.id)
    }

    // === Queries ===

    /// Every (counter, destination) one square away onto an empty square.
    ///
    /// Alignment is not considered: it only restricts placement and resurrection.
    #[must_use]
    pub fn legal_moves(&self, side: PlayerSide) -> Vec<(PieceId, Position)> {
        let mut moves = Vec::new();
        for piece in self.board.pieces_for(side) {
            for d_row in -1..=1 {
                for d_col in -1..=1 {
                    if d_row == 0 && d_col == 0 {
                        continue;
                    }
                    if let Some(target) = piece.position.translate(d_row, d_col) {
                        if !self.board.is_occupied(target) {
                            moves.push((piece.id, target));
                        }
                    }
                }
            }
        }
        moves
    }

    /// Counter types `side` has yet to place.
    #[must_use]
    pub fn remaining_placements(&self, side: PlayerSide) -> Vec<PieceType> {
        self.placements_remaining[side].to_vec()
    }

    /// Squares where `side` could legally place a counter now.
    #[must_use]
    pub fn placement_positions(&self, side: PlayerSide) -> Vec<Position> {
        if self.phase != Phase::Placement {
            return Vec::new();
        }
        iter_half_board(side)
            .filter(|pos| !self.board.is_occupied(*pos) && !self.board.is_aligned(*pos))
            .collect()
    }

    /// The captured counter `side` may bring back right now, if any.
    #[must_use]
    pub fn resurrection_candidate(&self, side: PlayerSide) -> Option<&Piece> {
        self.resurrection_candidate_id(side).and_then(|id| self.board.get(id))
    }

    /// Squares a resurrected counter of `side` may return to.
    #[must_use]
    pub fn available_resurrection_positions(&self, side: PlayerSide) -> Vec<Position> {
        if self.resurrection_candidate_id(side).is_none() {
            return Vec::new();
        }
        iter_half_board(side)
            .filter(|pos| self.check_resurrection_square(side, *pos).is_ok())
            .collect()
    }

    #[must_use]
    pub fn status_summary(&self) -> StatusSummary {
        StatusSummary {
            phase: self.phase,
            current_player: self.current_player,
            winner: self.winner,
            captures: self.captures.clone(),
            pending_resurrection: self.pending_resurrection,
        }
    }

    /// Which living counter stands on each square.
    #[must_use]
    pub fn board_snapshot(&self) -> BoardSnapshot {
        let mut snapshot = BoardSnapshot::default();
        for piece in self.board.alive_pieces() {
            let (row, col) = (usize::from(piece.position.row()), usize::from(piece.position.col()));
            snapshot.cells[row][col] = Some(piece.id);
        }
        snapshot
    }

    // === Snapshots ===

    /// Encode the whole match.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a match produced by [`GameState::to_bytes`].
    ///
    /// Squares are bounds-checked while decoding; the board registry is
    /// checked afterwards.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let game: Self = bincode::deserialize(bytes)?;
        if let Some(problem) = game.board.find_inconsistency() {
            return Err(SnapshotError::Inconsistent(problem));
        }
        Ok(game)
    }
}
