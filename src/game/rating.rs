//! Final-score ratings shown in the farewell message.
//!
//! Thresholds are inclusive lower bounds. Use [rating] for display.
pub const SKILLED_MIN: u32 = 3;
pub const EXCELLENT_MIN: u32 = 6;
pub const GRANDMASTER_MIN: u32 = 10;

/// Return the rating line for a final score.
///
/// Scores ≥10 are "Grandmaster", 6–9 "Excellent", 3–5 "Skilled", otherwise "Beginner".
pub fn rating(score: u32) -> &'static str {
    match score {
        s if s >= GRANDMASTER_MIN => "Grandmaster of idioms! Truly legendary.",
        s if s >= EXCELLENT_MIN => "Excellent player! You really know your idioms.",
        s if s >= SKILLED_MIN => "Skilled player! Nicely done.",
        _ => "Beginner player - keep practicing!",
    }
}
