use std::fs;

use spacedodge::game::score::{HighScoreFile, ScoreBoard};

// ── ScoreBoard ────────────────────────────────────────────────────────────

#[test]
fn score_counts_hundredths_of_a_second() {
    let mut board = ScoreBoard::new(0, 10_000);
    board.begin_round(2_000);
    board.update(2_009);
    assert_eq!(board.score(), 0);
    board.update(3_234);
    assert_eq!(board.score(), 123);
}

#[test]
fn high_score_never_decreases() {
    let mut board = ScoreBoard::new(50, 10_000);
    let mut last = board.high_score();
    board.begin_round(0);
    for now in (0..3_000).step_by(16) {
        board.update(now);
        assert!(board.high_score() >= last);
        last = board.high_score();
    }
    assert_eq!(last, 299);

    board.begin_round(5_000);
    board.update(5_100);
    assert_eq!(board.score(), 10);
    assert_eq!(board.high_score(), 299);
}

#[test]
fn stored_high_score_survives_low_rounds() {
    let mut board = ScoreBoard::new(1_000, 10_000);
    board.begin_round(0);
    board.update(500);
    assert_eq!(board.high_score(), 1_000);
}

#[test]
fn zero_interval_never_cues() {
    let mut board = ScoreBoard::new(0, 0);
    assert!(!board.accrue(1_000_000));
}

// ── High-score file ───────────────────────────────────────────────────────

#[test]
fn missing_file_loads_zero() {
    let dir = tempfile::tempdir().unwrap();
    let file = HighScoreFile::new(dir.path().join("scores"));
    assert_eq!(file.read(), None);
    assert_eq!(file.load(), 0);
}

#[test]
fn short_file_loads_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores");
    fs::write(&path, [1u8, 2]).unwrap();
    assert_eq!(HighScoreFile::new(&path).load(), 0);
}

#[test]
fn negative_value_loads_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores");
    fs::write(&path, (-40i32).to_ne_bytes()).unwrap();
    let file = HighScoreFile::new(&path);
    assert_eq!(file.read(), Some(-40));
    assert_eq!(file.load(), 0);
}

#[test]
fn save_creates_native_endian_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores");
    let file = HighScoreFile::new(&path);
    assert!(file.save(1_234).unwrap());
    assert_eq!(fs::read(&path).unwrap(), 1_234i32.to_ne_bytes());
    assert_eq!(file.load(), 1_234);
}

#[test]
fn save_keeps_higher_stored_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores");
    let file = HighScoreFile::new(&path);
    file.save(900).unwrap();
    assert!(!file.save(900).unwrap());
    assert!(!file.save(10).unwrap());
    assert_eq!(file.load(), 900);
    assert!(file.save(901).unwrap());
    assert_eq!(file.load(), 901);
}

#[test]
fn persisted_value_is_max_of_session_and_stored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores");
    let file = HighScoreFile::new(&path);
    file.save(500).unwrap();

    let mut board = ScoreBoard::new(file.load(), 10_000);
    board.begin_round(0);
    board.update(3_000);
    file.persist(board.high_score());
    assert_eq!(file.load(), 500);

    board.begin_round(10_000);
    board.update(17_000);
    file.persist(board.high_score());
    assert_eq!(file.load(), 700);
}

#[test]
fn oversized_score_saturates() {
    let dir = tempfile::tempdir().unwrap();
    let file = HighScoreFile::new(dir.path().join("scores"));
    file.save(u32::MAX).unwrap();
    assert_eq!(file.read(), Some(i32::MAX));
}

#[test]
fn trailing_bytes_are_truncated_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores");
    let mut bytes = 3i32.to_ne_bytes().to_vec();
    bytes.extend_from_slice(&[9, 9, 9]);
    fs::write(&path, bytes).unwrap();
    let file = HighScoreFile::new(&path);
    assert_eq!(file.load(), 3);
    assert!(file.save(4).unwrap());
    assert_eq!(fs::read(&path).unwrap().len(), 4);
}
