//! Local high score persistence.
//!
//! Finished games land in a [`ScoreBoard`]: a running high-water mark plus a
//! date-stamped table of the best [`SCORE_CAPACITY`] results, kept sorted
//! from highest to lowest. [`ScoreStore`] reads and writes the board as a
//! small JSON savefile in the platform config directory, treating a missing
//! or unreadable file as an empty board so a fresh install starts clean.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Number of finished games the score table remembers.
pub const SCORE_CAPACITY: usize = 10;

/// File name of the savefile inside the config directory.
pub const SAVEFILE_NAME: &str = ".blockfall_scores.json";

/// One finished game: its final score and the local date it was played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    pub date: String,
}

/// The persistent score table.
///
/// Every finished game is recorded, even a zero-score one; only the best
/// [`SCORE_CAPACITY`] entries survive. The high-water mark is tracked
/// separately so it outlives entries that fall off the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    high_score: u32,
    entries: Vec<ScoreEntry>,
}

impl ScoreBoard {
    /// Best score ever recorded.
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Recorded games, best first.
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Records a finished game stamped with today's date and reports whether
    /// it set a new high score.
    ///
    /// ```
    /// use blockfall_scores::ScoreBoard;
    ///
    /// let mut board = ScoreBoard::default();
    /// assert!(board.record(500));
    /// assert_eq!(board.high_score(), 500);
    /// assert_eq!(board.entries()[0].score, 500);
    /// ```
    pub fn record(&mut self, score: u32) -> bool {
        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        self.record_dated(score, date)
    }

    // Ties keep the earlier game first, so a new entry goes after every
    // entry with a score >= its own.
    fn record_dated(&mut self, score: u32, date: String) -> bool {
        let at = self
            .entries
            .iter()
            .position(|entry| entry.score < score)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, ScoreEntry { score, date });
        self.entries.truncate(SCORE_CAPACITY);
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }
}

/// Disk location of the score table.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    /// Store rooted at the platform config directory, falling back to the
    /// working directory when none exists.
    pub fn at_default_location() -> Self {
        let path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(SAVEFILE_NAME);
        Self { path }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the score table from disk.
    pub fn load(&self) -> io::Result<ScoreBoard> {
        let mut file = File::open(&self.path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let board = serde_json::from_str(&contents)?;
        Ok(board)
    }

    /// Reads the score table, treating a missing or unreadable savefile as
    /// an empty one.
    pub fn load_or_default(&self) -> ScoreBoard {
        self.load().unwrap_or_default()
    }

    /// Writes the score table to disk.
    pub fn save(&self, board: &ScoreBoard) -> io::Result<()> {
        let contents = serde_json::to_string(board)?;
        let mut file = File::create(&self.path)?;
        file.write_all(contents.as_bytes())?;
        Ok(())
    }
}
