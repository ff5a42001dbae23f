//! Board coordinates and zones.
//!
//! An opportunity score in [0,1] discretizes onto an 8x8 board: rank 1-8 is
//! the risk tier (score near 1 maps to rank 1, the safest), file A-H is the
//! quality bucket. Both are derived from the score and never mutated on
//! their own. The zone is the binary price-vs-moving-average regime.

use serde::{Deserialize, Serialize};
use std::fmt;

const FILES: &[u8; 8] = b"ABCDEFGH";

/// Which side of its moving average an instrument trades on.
///
/// Equality is unfavorable: the comparison is strict `price > ma`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Favorable,
    Unfavorable,
}

impl Zone {
    pub fn from_price_ma(price: f64, moving_average: f64) -> Self {
        if price > moving_average {
            Zone::Favorable
        } else {
            Zone::Unfavorable
        }
    }

    pub fn is_favorable(self) -> bool {
        self == Zone::Favorable
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Favorable => write!(f, "favorable"),
            Zone::Unfavorable => write!(f, "unfavorable"),
        }
    }
}

/// A square on the 8x8 board: rank in [1,8], file in A-H.
///
/// Constructed only through [`BoardCoordinate::from_score`], so bounds hold
/// by construction and a given score always maps to the same square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCoordinate {
    rank: u8,
    file: char,
}

impl BoardCoordinate {
    /// Discretize a score into a board square.
    ///
    /// rank = clamp(1 + floor((1 - score) * 8), 1, 8) — high score, low rank.
    /// file = "ABCDEFGH"[clamp(floor(score * 8), 0, 7)].
    pub fn from_score(score: f64) -> Self {
        Self {
            rank: score_to_rank(score),
            file: score_to_file(score),
        }
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn file(&self) -> char {
        self.file
    }

    /// Zero-based column index of the file (A = 0).
    pub fn file_index(&self) -> usize {
        (self.file as u8 - b'A') as usize
    }

    /// Center files C-F carry the higher-quality buckets.
    pub fn is_center_file(&self) -> bool {
        matches!(self.file, 'C'..='F')
    }

    /// Flank files A-B and G-H.
    pub fn is_flank_file(&self) -> bool {
        !self.is_center_file()
    }
}

impl fmt::Display for BoardCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank)
    }
}

/// Map a score to its risk rank. Scores near 1.0 land on rank 1.
pub fn score_to_rank(score: f64) -> u8 {
    let raw = 1 + ((1.0 - score) * 8.0).floor() as i32;
    raw.clamp(1, 8) as u8
}

/// Map a score to its quality file.
pub fn score_to_file(score: f64) -> char {
    let idx = (score * 8.0).floor() as i32;
    FILES[idx.clamp(0, 7) as usize] as char
}
