//! Computer opponent integration tests.

use sa_jin::{
    FirstOption, GameState, Phase, PieceId, PieceType, PlayerSide, Position, RandomPlayer,
    ScenarioBuilder, Step, TurnRequest,
};

fn pos(label: &str) -> Position {
    Position::from_algebraic(label).unwrap()
}

// =============================================================================
// Deterministic Policy
// =============================================================================

#[test]
fn test_first_option_setup_sequence() {
    let mut game = GameState::default();
    let mut player = RandomPlayer::new(FirstOption);

    let mut placed = Vec::new();
    while game.phase() == Phase::Placement {
        match player.step(&mut game).unwrap() {
            Step::Placed(piece) => placed.push((piece.id.to_string(), piece.position.to_string())),
            other => panic!("expected a placement, got {other:?}"),
        }
    }

    let expected = [
        ("S_triangle", "A1"),
        ("N_triangle", "B5"),
        ("S_rectangle", "C2"),
        ("N_rectangle", "D6"),
        ("S_square", "E3"),
        ("N_square", "F7"),
    ];
    let expected: Vec<_> =
        expected.iter().map(|(id, at)| (id.to_string(), at.to_string())).collect();
    assert_eq!(placed, expected);

    // North placed last and assigns first
    assert_eq!(player.step(&mut game).unwrap(), Step::Assigned(PlayerSide::North));
    assert_eq!(player.step(&mut game).unwrap(), Step::Assigned(PlayerSide::South));
    assert_eq!(game.phase(), Phase::Active);

    for side in PlayerSide::ALL {
        let weak: Vec<_> =
            game.board().pieces_for(side).filter(|p| !p.strong).map(|p| p.kind()).collect();
        assert_eq!(weak, vec![PieceType::Triangle]);
    }
}

#[test]
fn test_policy_resolves_pending_resurrection() {
    let mut game = ScenarioBuilder::new()
        .captured(PlayerSide::South, PieceType::Triangle)
        .strong(PlayerSide::South, PieceType::Rectangle, "D7")
        .strong(PlayerSide::South, PieceType::Square, "F8")
        .weak(PlayerSide::North, PieceType::Triangle, "H2")
        .strong(PlayerSide::North, PieceType::Rectangle, "A4")
        .strong(PlayerSide::North, PieceType::Square, "B3")
        .captures(PlayerSide::North, 1)
        .build()
        .unwrap();

    let turn = TurnRequest::new(PieceId::new(PlayerSide::South, PieceType::Rectangle), pos("D8"));
    assert!(game.take_turn(PlayerSide::South, &turn).unwrap().needs_resurrection);

    let mut player = RandomPlayer::new(FirstOption);
    assert_eq!(player.choose_resurrection(&game, PlayerSide::South), Some(pos("C1")));

    match player.step(&mut game).unwrap() {
        Step::Resurrected(piece) => assert_eq!(piece.position, pos("C1")),
        other => panic!("expected a resurrection, got {other:?}"),
    }
    assert_eq!(game.current_player(), PlayerSide::North);
}

#[test]
fn test_choices_are_legal() {
    let mut game = GameState::default();
    let mut player = RandomPlayer::seeded(5);

    while game.phase() == Phase::Placement {
        let side = game.current_player();
        let (kind, at) = player.choose_placement(&game, side).unwrap();
        assert!(game.remaining_placements(side).contains(&kind));
        assert!(game.placement_positions(side).contains(&at));
        game.place_piece(side, kind, at).unwrap();
    }
    for side in PlayerSide::ALL {
        let strong = player.choose_strengths(&game, side).unwrap();
        assert_ne!(strong[0], strong[1]);
        assert!(strong.iter().all(|id| id.owner == side));
        game.assign_initial_strengths(side, &strong).unwrap();
    }

    let side = game.current_player();
    let turn = player.choose_turn(&game, side).unwrap();
    assert!(turn.swap.is_none());
    assert!(turn.resurrect_at.is_none());
    assert!(game.legal_moves(side).contains(&(turn.piece, turn.destination)));
}

// =============================================================================
// Random Playouts
// =============================================================================

#[test]
fn test_seeded_playouts_replay() {
    let mut first = GameState::default();
    let mut second = GameState::default();

    let a = RandomPlayer::seeded(11).play_out(&mut first, 300).unwrap();
    let b = RandomPlayer::seeded(11).play_out(&mut second, 300).unwrap();

    assert_eq!(a, b);
    assert_eq!(first.to_bytes().unwrap(), second.to_bytes().unwrap());
}

#[test]
fn test_many_playouts_stay_legal() {
    for seed in 0..25 {
        let mut game = GameState::default();
        RandomPlayer::seeded(seed).play_out(&mut game, 1_000).unwrap();

        assert!(game.phase() >= Phase::Active, "seed {seed} stuck in setup");
        match game.winner() {
            Some(winner) => {
                assert!(game.is_over());
                assert!(game.captures(winner) >= 2);
            }
            None => {
                assert!(PlayerSide::ALL.iter().all(|side| game.captures(*side) < 2));
            }
        }
    }
}
