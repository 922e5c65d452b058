use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Milliseconds per score point.
pub const MS_PER_POINT: u64 = 10;

// ── ScoreBoard ───────────────────────────────────────────────────────────────

/// Survival score for the current round plus the best score seen.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreBoard {
    round_start_ms: u64,
    score: u32,
    high_score: u32,
    points_timer_ms: u64,
    points_interval_ms: u64,
}

impl ScoreBoard {
    pub fn new(high_score: u32, points_interval_ms: u64) -> Self {
        Self {
            round_start_ms: 0,
            score: 0,
            high_score,
            points_timer_ms: 0,
            points_interval_ms,
        }
    }

    pub fn score(&self) -> u32 { self.score }
    pub fn high_score(&self) -> u32 { self.high_score }

    /// Restart the clock at `now_ms`.
    pub fn begin_round(&mut self, now_ms: u64) {
        self.hold(now_ms);
        self.score = 0;
    }

    /// Keep the round from counting: the start follows `now_ms` and the
    /// points timer stays empty.
    pub fn hold(&mut self, now_ms: u64) {
        self.round_start_ms = now_ms;
        self.points_timer_ms = 0;
    }

    /// Add `delta_ms` of scoring play.  Returns true each time another full
    /// points interval has passed.
    pub fn accrue(&mut self, delta_ms: u64) -> bool {
        if self.points_interval_ms == 0 {
            return false;
        }
        self.points_timer_ms += delta_ms;
        if self.points_timer_ms >= self.points_interval_ms {
            self.points_timer_ms -= self.points_interval_ms;
            true
        } else {
            false
        }
    }

    /// Recompute the score at `now_ms` and raise the high score to match.
    pub fn update(&mut self, now_ms: u64) {
        let points = now_ms.saturating_sub(self.round_start_ms) / MS_PER_POINT;
        self.score = u32::try_from(points).unwrap_or(u32::MAX);
        self.high_score = self.high_score.max(self.score);
    }
}

// ── High-score file ──────────────────────────────────────────────────────────

/// A file holding exactly one native-endian `i32`.
#[derive(Clone, Debug)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path { &self.path }

    /// The stored value; `None` when the file is missing, unreadable or
    /// shorter than four bytes.
    pub fn read(&self) -> Option<i32> {
        let mut file = File::open(&self.path).ok()?;
        read_value(&mut file)
    }

    /// High score to start the session with.  Negative values read as 0.
    pub fn load(&self) -> u32 {
        let high = self.read().map_or(0, |v| v.max(0) as u32);
        log::info!("high score {high} from {}", self.path.display());
        high
    }

    /// Write `high_score` if it beats the stored value or nothing is stored.
    /// Returns whether the file was written.  Values past `i32::MAX` are
    /// stored as `i32::MAX`.
    pub fn save(&self, high_score: u32) -> io::Result<bool> {
        let value = i32::try_from(high_score).unwrap_or(i32::MAX);
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;

        if read_value(&mut file).is_some_and(|stored| value <= stored) {
            return Ok(false);
        }
        file.seek(SeekFrom::Start(0))?;
        file.write_all(&value.to_ne_bytes())?;
        file.set_len(4)?;
        Ok(true)
    }

    /// [`HighScoreFile::save`] with the outcome logged.  Failures are not
    /// propagated.
    pub fn persist(&self, high_score: u32) {
        match self.save(high_score) {
            Ok(true) => log::info!("saved high score {high_score} to {}", self.path.display()),
            Ok(false) => log::info!("stored high score is not lower than {high_score}"),
            Err(e) => log::warn!("could not save high score to {}: {e}", self.path.display()),
        }
    }
}

fn read_value(file: &mut File) -> Option<i32> {
    let mut buf = [0u8; 4];
    file.read_exact(&mut buf).ok()?;
    Some(i32::from_ne_bytes(buf))
}

// ── Tests ────────────────────────────────────────────────────────────────────
