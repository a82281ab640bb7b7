//! Snapshot, serialization and rendering integration tests.

use sa_jin::{
    Board, GameState, Phase, Piece, PieceId, PieceType, PlayerSide, Position, RandomPlayer,
    ScenarioBuilder, SnapshotError, StatusSummary, TurnRecord, TurnRequest,
};

fn pos(label: &str) -> Position {
    Position::from_algebraic(label).unwrap()
}

#[test]
fn test_restored_match_plays_on_identically() {
    let mut game = GameState::default();
    RandomPlayer::seeded(21).play_out(&mut game, 40).unwrap();

    let bytes = game.to_bytes().unwrap();
    let mut restored = GameState::from_bytes(&bytes).unwrap();
    assert_eq!(restored.phase(), game.phase());
    assert_eq!(restored.history().len(), game.history().len());
    assert_eq!(restored.board_snapshot(), game.board_snapshot());

    RandomPlayer::seeded(99).play_out(&mut game, 40).unwrap();
    RandomPlayer::seeded(99).play_out(&mut restored, 40).unwrap();
    assert_eq!(restored.to_bytes().unwrap(), game.to_bytes().unwrap());
}

#[test]
fn test_pending_resurrection_survives_snapshot() {
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
    game.take_turn(
        PlayerSide::South,
        &TurnRequest::new(PieceId::new(PlayerSide::South, PieceType::Rectangle), pos("D8")),
    )
    .unwrap();

    let mut restored = GameState::from_bytes(&game.to_bytes().unwrap()).unwrap();
    assert_eq!(restored.status_summary(), game.status_summary());
    assert!(restored.pending_resurrection().is_some());

    restored.complete_resurrection(PlayerSide::South, pos("E1")).unwrap();
    assert_eq!(restored.phase(), Phase::Active);
    assert_eq!(restored.current_player(), PlayerSide::North);
}

/// Encoded game with the strong North triangle on B8, plus the offset of
/// that counter's record within the bytes.
fn encoded_with_north_triangle() -> (Vec<u8>, usize) {
    let game = ScenarioBuilder::new()
        .weak(PlayerSide::South, PieceType::Triangle, "A1")
        .strong(PlayerSide::South, PieceType::Rectangle, "C2")
        .strong(PlayerSide::South, PieceType::Square, "E3")
        .strong(PlayerSide::North, PieceType::Triangle, "B8")
        .weak(PlayerSide::North, PieceType::Rectangle, "D7")
        .strong(PlayerSide::North, PieceType::Square, "F6")
        .build()
        .unwrap();
    let bytes = game.to_bytes().unwrap();

    // owner North, kind Triangle, row 7, col 1, strong, alive
    let record = [1, 0, 0, 0, 0, 0, 0, 0, 7, 1, 1, 1];
    let offset = bytes.windows(record.len()).position(|w| w == record).unwrap();
    assert!(GameState::from_bytes(&bytes).is_ok());
    (bytes, offset)
}

#[test]
fn test_snapshot_with_off_board_square_is_rejected() {
    let (mut bytes, offset) = encoded_with_north_triangle();
    bytes[offset + 8] = 200;

    let err = GameState::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, SnapshotError::Encoding(_)), "{err}");
}

#[test]
fn test_snapshot_with_mislabelled_counter_is_rejected() {
    let (mut bytes, offset) = encoded_with_north_triangle();
    // Record stays under the N_triangle key but claims to be N_square
    bytes[offset + 4] = 2;

    let err = GameState::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, SnapshotError::Inconsistent(_)), "{err}");
}

#[test]
fn test_json_views() {
    let mut game = GameState::default();
    RandomPlayer::seeded(4).play_out(&mut game, 20).unwrap();

    let summary = game.status_summary();
    let json = serde_json::to_string(&summary).unwrap();
    assert_eq!(serde_json::from_str::<StatusSummary>(&json).unwrap(), summary);

    let piece = Piece::new(PlayerSide::North, PieceType::Square, pos("E6"));
    let json = serde_json::to_string(&piece).unwrap();
    assert_eq!(serde_json::from_str::<Piece>(&json).unwrap(), piece);

    let records: Vec<TurnRecord> = game.history().iter().cloned().collect();
    let json = serde_json::to_string(&records).unwrap();
    assert_eq!(serde_json::from_str::<Vec<TurnRecord>>(&json).unwrap(), records);
}

#[test]
fn test_board_rendering() {
    let game = ScenarioBuilder::new()
        .strong(PlayerSide::South, PieceType::Triangle, "A1")
        .strong(PlayerSide::South, PieceType::Rectangle, "C2")
        .weak(PlayerSide::South, PieceType::Square, "E3")
        .strong(PlayerSide::North, PieceType::Triangle, "B8")
        .weak(PlayerSide::North, PieceType::Rectangle, "D7")
        .strong(PlayerSide::North, PieceType::Square, "F6")
        .build()
        .unwrap();

    let text = game.board().to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 9);
    assert!(lines[0].starts_with("8 |"));
    assert!(lines[0].contains("NT"));
    assert!(lines[1].contains("Nr"));
    assert!(lines[7].starts_with("1 |"));
    assert!(lines[7].contains("ST"));
    assert!(lines[5].contains("Ss"));
    assert!(lines[8].contains('A') && lines[8].contains('H'));

    assert_eq!(Board::new().to_string().matches(" .").count(), 64);
}
