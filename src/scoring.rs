//! Pure scoring computations: line/T-spin/combo/perfect-clear awards,
//! back-to-back multiplier, level progression, drop interval.
//!
//! All arithmetic is integer; every division here is meant to floor toward
//! zero, matching the spec's "divisions round toward zero" rule.

use crate::types::{LineClearKind, TSpinKind};

/// Minimum drop interval, in ms, regardless of level.
const MIN_DROP_INTERVAL_MS: u32 = 50;
/// Drop interval at level 1.
const BASE_DROP_INTERVAL_MS: f64 = 1000.0;
/// Per-level decay factor applied to the base interval.
const DROP_INTERVAL_DECAY: f64 = 0.8;

const COMBO_BASE: u64 = 50;

const PERFECT_CLEAR_BONUS: [u64; 5] = [0, 800, 1200, 1800, 2000];

fn base_line_award(kind: LineClearKind) -> u64 {
    match kind {
        LineClearKind::Single => 100,
        LineClearKind::Double => 300,
        LineClearKind::Triple => 500,
        LineClearKind::Tetris => 800,
    }
}

/// Award for a T-spin that cleared `lines` rows (0..=3; a T can't clear
/// four). `lines == 0` covers the no-clear T-spin bonus.
fn tspin_award(kind: TSpinKind, lines: usize) -> u64 {
    match (kind, lines) {
        (TSpinKind::Mini, 0) => 100,
        (TSpinKind::Mini, 1) => 200,
        (TSpinKind::Mini, _) => 400,
        (TSpinKind::Proper, 0) => 400,
        (TSpinKind::Proper, 1) => 800,
        (TSpinKind::Proper, 2) => 1200,
        (TSpinKind::Proper, _) => 1600,
        (TSpinKind::None, _) => 0,
    }
}

/// Whether a clear of `kind`/`tspin` participates in the back-to-back
/// chain: Tetris, or any T-spin that cleared at least one line.
#[must_use]
pub fn is_back_to_back_eligible(kind: LineClearKind, tspin: TSpinKind) -> bool {
    match tspin {
        TSpinKind::Proper => true,
        TSpinKind::Mini => false,
        TSpinKind::None => matches!(kind, LineClearKind::Tetris),
    }
}

/// Result of scoring one clearing lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResult {
    /// Base line/T-spin award, after the back-to-back multiplier.
    pub clear_award: u64,
    pub combo_award: u64,
    pub perfect_clear_award: u64,
    pub total: u64,
    /// Whether this clear continues the back-to-back chain going forward.
    pub back_to_back: bool,
}

/// Scores a clearing lock (`lines >= 1`).
///
/// `combo` is the number of *preceding* consecutive clearing locks (0 for
/// the first clear in a streak); `previous_back_to_back` is whether the
/// chain was already active before this clear.
#[must_use]
pub fn calculate_score(
    kind: LineClearKind,
    tspin: TSpinKind,
    lines: usize,
    level: u8,
    combo: u32,
    previous_back_to_back: bool,
    perfect_clear: bool,
) -> ScoreResult {
    let level = u64::from(level);

    let base = if tspin == TSpinKind::None {
        base_line_award(kind)
    } else {
        tspin_award(tspin, lines)
    };

    let eligible = is_back_to_back_eligible(kind, tspin);
    let clear_award = if eligible && previous_back_to_back {
        (base * 3 / 2) * level
    } else {
        base * level
    };

    let combo_award = COMBO_BASE * u64::from(combo) * level;

    let perfect_clear_award = if perfect_clear {
        PERFECT_CLEAR_BONUS[lines.min(4)] * level
    } else {
        0
    };

    ScoreResult {
        clear_award,
        combo_award,
        perfect_clear_award,
        total: clear_award + combo_award + perfect_clear_award,
        back_to_back: eligible,
    }
}

/// Score for a T-spin that locked without clearing any lines. Not part of
/// the back-to-back/combo chain (a zero-line lock breaks both).
#[must_use]
pub fn calculate_no_clear_tspin_score(tspin: TSpinKind, level: u8) -> u64 {
    tspin_award(tspin, 0) * u64::from(level)
}

/// Soft/hard drop bonuses are flat per-cell awards, not multiplied by
/// level (spec §4.8).
#[must_use]
pub fn soft_drop_score(cells: u32) -> u64 {
    u64::from(cells)
}

#[must_use]
pub fn hard_drop_score(cells: u32) -> u64 {
    u64::from(cells) * 2
}

/// `level = min(99, 1 + floor(lines / 10))`.
#[must_use]
pub fn level_for_lines(total_lines: u32) -> u8 {
    let level = 1 + total_lines / 10;
    level.min(99) as u8
}

/// `level 1 = 1000ms; level N = max(50, 1000 * 0.8^(N-1))`.
#[must_use]
pub fn drop_interval_ms(level: u8) -> u32 {
    let exponent = (level.saturating_sub(1)) as i32;
    let scaled = BASE_DROP_INTERVAL_MS * DROP_INTERVAL_DECAY.powi(exponent);
    (scaled as u32).max(MIN_DROP_INTERVAL_MS)
}
