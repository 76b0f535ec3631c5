//! Particle kinds and the cyclic dominance relation
//!
//! Paper covers Rock, Rock breaks Scissors, Scissors cut Paper.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One of the three cyclic-dominance categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Paper,
    Rock,
    Scissors,
}

impl Kind {
    /// All kinds in canonical order (also the spawn order used by `resize`)
    pub const ALL: [Kind; 3] = [Kind::Paper, Kind::Rock, Kind::Scissors];

    /// Dense index into per-kind arrays
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Kind::Paper => 0,
            Kind::Rock => 1,
            Kind::Scissors => 2,
        }
    }

    /// The kind this one converts on contact
    #[inline]
    pub fn prey(self) -> Kind {
        match self {
            Kind::Paper => Kind::Rock,
            Kind::Rock => Kind::Scissors,
            Kind::Scissors => Kind::Paper,
        }
    }

    /// True iff `self` converts `other` on contact. Irreflexive.
    #[inline]
    pub fn beats(self, other: Kind) -> bool {
        self.prey() == other
    }

    /// Kind that survives a contact between `a` and `b`, or `None` for a tie
    pub fn winner(a: Kind, b: Kind) -> Option<Kind> {
        if a.beats(b) {
            Some(a)
        } else if b.beats(a) {
            Some(b)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Paper => "paper",
            Kind::Rock => "rock",
            Kind::Scissors => "scissors",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "paper" | "p" => Some(Kind::Paper),
            "rock" | "r" => Some(Kind::Rock),
            "scissors" | "s" => Some(Kind::Scissors),
            _ => None,
        }
    }

    /// Display glyph for hosts that draw particles
    pub fn glyph(&self) -> &'static str {
        match self {
            Kind::Paper => "📄",
            Kind::Rock => "🪨",
            Kind::Scissors => "✂️",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind particle counts (targets for `resize`, or a census)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCounts {
    pub paper: u32,
    pub rock: u32,
    pub scissors: u32,
}

impl KindCounts {
    pub fn new(paper: u32, rock: u32, scissors: u32) -> Self {
        Self {
            paper,
            rock,
            scissors,
        }
    }

    /// Same count for every kind
    pub fn uniform(n: u32) -> Self {
        Self::new(n, n, n)
    }

    /// Validate raw host input ordered as `Kind::ALL`.
    ///
    /// Rejects negative, non-finite, non-integral or out-of-range values.
    pub fn from_raw(raw: [f64; 3]) -> Result<Self> {
        let mut counts = Self::default();
        for (kind, value) in Kind::ALL.into_iter().zip(raw) {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid(format!(
                    "{kind} count must be finite and >= 0, got {value}"
                )));
            }
            if value.fract() != 0.0 || value > u32::MAX as f64 {
                return Err(Error::invalid(format!(
                    "{kind} count must be a whole number that fits in u32, got {value}"
                )));
            }
            counts.set(kind, value as u32);
        }
        Ok(counts)
    }

    #[inline]
    pub fn get(&self, kind: Kind) -> u32 {
        match kind {
            Kind::Paper => self.paper,
            Kind::Rock => self.rock,
            Kind::Scissors => self.scissors,
        }
    }

    #[inline]
    pub fn set(&mut self, kind: Kind, n: u32) {
        match kind {
            Kind::Paper => self.paper = n,
            Kind::Rock => self.rock = n,
            Kind::Scissors => self.scissors = n,
        }
    }

    pub fn total(&self) -> u64 {
        Kind::ALL.iter().map(|&k| self.get(k) as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyclic_closure_all_pairs() {
        for a in Kind::ALL {
            assert!(!a.beats(a), "{a} must not beat itself");
            for b in Kind::ALL {
                if a != b {
                    assert!(
                        a.beats(b) ^ b.beats(a),
                        "exactly one of {a}/{b} must win"
                    );
                }
            }
        }
    }

    #[test]
    fn test_classic_rules() {
        assert!(Kind::Paper.beats(Kind::Rock));
        assert!(Kind::Rock.beats(Kind::Scissors));
        assert!(Kind::Scissors.beats(Kind::Paper));
        assert!(!Kind::Rock.beats(Kind::Paper));
    }

    #[test]
    fn test_winner() {
        assert_eq!(Kind::winner(Kind::Rock, Kind::Paper), Some(Kind::Paper));
        assert_eq!(Kind::winner(Kind::Scissors, Kind::Rock), Some(Kind::Rock));
        assert_eq!(Kind::winner(Kind::Scissors, Kind::Scissors), None);
    }

    #[test]
    fn test_kind_str_round_trip() {
        for k in Kind::ALL {
            assert_eq!(Kind::from_str(k.as_str()), Some(k));
        }
        assert_eq!(Kind::from_str("ROCK"), Some(Kind::Rock));
        assert_eq!(Kind::from_str("lizard"), None);
    }

    #[test]
    fn test_from_raw_rejects_bad_counts() {
        assert!(KindCounts::from_raw([1.0, -1.0, 0.0]).is_err());
        assert!(KindCounts::from_raw([f64::NAN, 0.0, 0.0]).is_err());
        assert!(KindCounts::from_raw([0.0, 0.0, f64::INFINITY]).is_err());
        assert!(KindCounts::from_raw([2.5, 0.0, 0.0]).is_err());
        assert_eq!(
            KindCounts::from_raw([3.0, 4.0, 5.0]).ok(),
            Some(KindCounts::new(3, 4, 5))
        );
    }

    #[test]
    fn test_counts_total() {
        let counts = KindCounts::new(u32::MAX, u32::MAX, 1);
        assert_eq!(counts.total(), 2 * u32::MAX as u64 + 1);
    }
}
