use glam::Vec2;

use spacedodge::config::GameConfig;
use spacedodge::game::actors::Asteroid;
use spacedodge::game::session::{FrameEvents, FrameInput, Phase, Session};
use spacedodge::game::sim::Simulation;
use spacedodge::input::Steering;

const FRAME_MS: u64 = 16;

fn session(high_score: u32) -> Session {
    let cfg = GameConfig::default();
    Session::new(&cfg, Simulation::with_seed(&cfg, 16, 16, 11), high_score)
}

fn idle() -> FrameInput {
    FrameInput::default()
}

fn confirm() -> FrameInput {
    FrameInput { confirm: true, ..FrameInput::default() }
}

fn restart() -> FrameInput {
    FrameInput { restart: true, ..FrameInput::default() }
}

fn park_asteroids(s: &mut Session) {
    for a in &mut s.sim.asteroids {
        a.pos = Vec2::new(0.0, -10_000.0);
        a.velocity = 0.0;
    }
}

/// Enter Playing at `now` with the intro already finished.
fn playing(now: u64) -> Session {
    let mut s = session(0);
    s.frame(now, FRAME_MS, &confirm(), false);
    park_asteroids(&mut s);
    s
}

// ── Title ─────────────────────────────────────────────────────────────────

#[test]
fn starts_on_title() {
    assert_eq!(session(0).phase(), Phase::Title);
}

#[test]
fn title_waits_for_confirm() {
    let mut s = session(0);
    for i in 0..10 {
        let ev = s.frame(i * FRAME_MS, FRAME_MS, &restart(), false);
        assert_eq!(ev, FrameEvents::default());
    }
    assert_eq!(s.phase(), Phase::Title);

    let ev = s.frame(200, FRAME_MS, &confirm(), false);
    assert_eq!(s.phase(), Phase::Playing);
    assert!(ev.play_intro);
}

#[test]
fn quit_is_honoured_everywhere() {
    let quit = FrameInput { quit: true, ..FrameInput::default() };
    let mut s = session(0);
    assert!(s.frame(0, FRAME_MS, &quit, false).quit);

    let mut s = playing(0);
    assert!(s.frame(16, FRAME_MS, &quit, false).quit);
}

// ── Playing ───────────────────────────────────────────────────────────────

#[test]
fn intro_freezes_the_round() {
    let mut s = playing(1_000);
    let ship = s.sim.ship.position;
    let steer = FrameInput { steering: Steering::new(true, false), ..FrameInput::default() };
    for i in 1..=50 {
        s.frame(1_000 + i * FRAME_MS, FRAME_MS, &steer, true);
        assert_eq!(s.score.score(), 0);
    }
    assert_eq!(s.sim.ship.position, ship);
    assert_eq!(s.background.offset(), 0.0);
}

#[test]
fn score_counts_from_the_end_of_the_intro() {
    let mut s = playing(1_000);
    s.frame(2_000, FRAME_MS, &idle(), true);
    s.frame(2_500, 500, &idle(), false);
    assert_eq!(s.score.score(), 50);
    assert_eq!(s.score.high_score(), 50);
}

#[test]
fn points_cue_every_ten_seconds() {
    let mut s = playing(0);
    let mut cues = 0;
    let mut now = 0;
    for _ in 0..(25_000 / 100) {
        now += 100;
        if s.frame(now, 100, &idle(), false).play_points {
            cues += 1;
        }
    }
    assert_eq!(cues, 2);
}

#[test]
fn steering_moves_the_ship() {
    let mut s = playing(0);
    let right = FrameInput { steering: Steering::new(false, true), ..FrameInput::default() };
    s.frame(100, 100, &right, false);
    assert!((s.sim.ship.position - 133.0).abs() < 1e-3);
}

#[test]
fn collision_ends_the_round() {
    let mut s = playing(0);
    s.sim.asteroids[0] = Asteroid { pos: Vec2::new(124.0, 290.0), velocity: 0.0, size: 8 };
    let ev = s.frame(16, FRAME_MS, &idle(), false);
    assert!(ev.play_boom);
    assert_eq!(s.phase(), Phase::GameOver);
}

#[test]
fn collision_is_detected_while_intro_plays() {
    let mut s = playing(0);
    s.sim.asteroids[0] = Asteroid { pos: Vec2::new(124.0, 290.0), velocity: 0.0, size: 8 };
    s.frame(16, FRAME_MS, &idle(), true);
    assert_eq!(s.phase(), Phase::GameOver);
}

// ── Game over ─────────────────────────────────────────────────────────────

fn game_over() -> Session {
    let mut s = playing(0);
    s.frame(3_000, 3_000, &idle(), false);
    park_asteroids(&mut s);
    s.sim.asteroids[0] = Asteroid { pos: Vec2::new(124.0, 290.0), velocity: 0.0, size: 8 };
    s.frame(3_016, FRAME_MS, &idle(), false);
    assert_eq!(s.phase(), Phase::GameOver);
    s
}

#[test]
fn game_over_freezes_scores_but_scrolls() {
    let mut s = game_over();
    let score = s.score.score();
    let high = s.score.high_score();
    let offset = s.background.offset();
    let ship = s.sim.ship.position;
    for i in 1..=10 {
        s.frame(3_016 + i * 100, 100, &idle(), false);
    }
    assert_eq!(s.phase(), Phase::GameOver);
    assert_eq!(s.score.score(), score);
    assert_eq!(s.score.high_score(), high);
    assert_eq!(s.sim.ship.position, ship);
    assert_ne!(s.background.offset(), offset);
}

#[test]
fn confirm_does_not_leave_game_over() {
    let mut s = game_over();
    s.frame(4_000, FRAME_MS, &confirm(), false);
    assert_eq!(s.phase(), Phase::GameOver);
}

#[test]
fn restart_begins_a_new_round() {
    let mut s = game_over();
    let high = s.score.high_score();
    let ev = s.frame(5_000, FRAME_MS, &restart(), false);
    assert!(ev.play_intro);
    assert!(!ev.play_boom);
    assert_eq!(s.phase(), Phase::Playing);
    assert_eq!(s.score.score(), 0);
    assert_eq!(s.score.high_score(), high);
    assert_eq!(s.sim.ship.position, 120.0);
    assert!(s.sim.asteroids.iter().all(|a| a.pos.y < 0.0));
}

#[test]
fn restart_while_playing_resets_the_round() {
    let mut s = playing(0);
    s.frame(2_000, 2_000, &idle(), false);
    assert_eq!(s.score.score(), 200);
    let ev = s.frame(2_016, FRAME_MS, &restart(), false);
    assert!(ev.play_intro);
    assert_eq!(s.score.score(), 0);
    assert_eq!(s.score.high_score(), 200);
}

// ── Exit ──────────────────────────────────────────────────────────────────

#[test]
fn quitting_from_title_persists_nothing() {
    let mut s = session(500);
    let quit = FrameInput { quit: true, ..FrameInput::default() };
    assert!(s.frame(100, FRAME_MS, &quit, false).quit);
    assert_eq!(s.high_score_to_persist(), None);
}

#[test]
fn quitting_mid_round_persists_the_session_best() {
    let mut s = playing(0);
    s.frame(2_000, 2_000, &idle(), false);
    assert_eq!(s.high_score_to_persist(), Some(200));
}

#[test]
fn stored_best_is_kept_when_the_round_scores_less() {
    let mut s = session(500);
    s.frame(0, FRAME_MS, &confirm(), false);
    park_asteroids(&mut s);
    s.frame(1_000, 1_000, &idle(), false);
    assert_eq!(s.score.score(), 100);
    assert_eq!(s.high_score_to_persist(), Some(500));
}

#[test]
fn game_over_persists_the_session_best() {
    let s = game_over();
    assert_eq!(s.high_score_to_persist(), Some(s.score.high_score()));
}
