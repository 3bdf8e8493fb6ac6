//! The cat: four rows of ASCII art with a two-frame running gait.

use crate::results::RunCounters;

/// Columns reserved for the cat after the trail.
pub const CAT_WIDTH: usize = 11;

/// The cat's expression, chosen from the run counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// At least one test failed.
    Distressed,
    /// No failures, but some tests are pending.
    Sleepy,
    /// Only passing tests so far.
    Happy,
    /// Nothing has run yet.
    Neutral,
}

impl Face {
    /// Pick a face: failures beat pending, pending beats passing.
    pub fn from_counters(counters: &RunCounters) -> Self {
        if counters.num_failed_tests > 0 {
            Self::Distressed
        } else if counters.num_pending_tests > 0 {
            Self::Sleepy
        } else if counters.num_passed_tests > 0 {
            Self::Happy
        } else {
            Self::Neutral
        }
    }

    /// The face as drawn on the cat.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Distressed => "( x .x)",
            Self::Sleepy => "( o .o)",
            Self::Happy => "( ^ .^)",
            Self::Neutral => "( - .-)",
        }
    }
}

/// Rows of the cat for one gait phase: head, body, tail and face, feet.
pub fn cat_frame(tick: bool, face: Face) -> [String; 4] {
    let (body_pad, face_pad, tail, feet_pad) = if tick {
        ("  ", "_", '~', " ")
    } else {
        ("   ", "__", '^', "  ")
    };

    [
        "_,------,".to_string(),
        format!("_|{body_pad}/\\_/\\ "),
        format!("{tail}|{face_pad}{} ", face.glyph()),
        format!("{feet_pad}\"\"  \"\" "),
    ]
}
