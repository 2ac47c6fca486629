//! Prize registry
//!
//! An ordered, validated list of prizes. Order defines sector order on the
//! wheel and the index that selection returns.

use serde::{Deserialize, Serialize};

use crate::consts::PROBABILITY_TOLERANCE;
use crate::error::{Result, WheelError};

/// A single prize on the wheel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrizeEntry {
    pub label: String,
    /// Share of spins landing here, in (0, 1]
    pub probability: f64,
}

impl PrizeEntry {
    pub fn new(label: impl Into<String>, probability: f64) -> Self {
        Self {
            label: label.into(),
            probability,
        }
    }
}

/// Anything that can hand out the current prize list
pub trait PrizeSource {
    fn prizes(&self) -> Vec<PrizeEntry>;
}

/// Validated prize list (non-empty, probabilities sum to 1.0)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrizeRegistry {
    entries: Vec<PrizeEntry>,
}

impl PrizeRegistry {
    /// Build a registry, rejecting tables the wheel cannot spin on
    pub fn new(entries: Vec<PrizeEntry>) -> Result<Self> {
        validate(&entries)?;
        Ok(Self { entries })
    }

    /// Snapshot a prize source
    pub fn from_source(source: &dyn PrizeSource) -> Result<Self> {
        Self::new(source.prizes())
    }

    /// Parse a JSON array of `{ "label": ..., "probability": ... }`
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<PrizeEntry> = serde_json::from_str(json)?;
        Self::new(entries).inspect_err(|e| log::warn!("Rejected prize table: {e}"))
    }

    pub fn entries(&self) -> &[PrizeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a validated registry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PrizeEntry> {
        self.entries.get(index)
    }
}

impl Default for PrizeRegistry {
    fn default() -> Self {
        Self {
            entries: default_prizes(),
        }
    }
}

impl PrizeSource for PrizeRegistry {
    fn prizes(&self) -> Vec<PrizeEntry> {
        self.entries.clone()
    }
}

impl<'de> Deserialize<'de> for PrizeRegistry {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            entries: Vec<PrizeEntry>,
        }
        let raw = Raw::deserialize(d)?;
        Self::new(raw.entries).map_err(serde::de::Error::custom)
    }
}

/// The stock jewelry-shop table: one rare jackpot, common small discounts
pub fn default_prizes() -> Vec<PrizeEntry> {
    vec![
        PrizeEntry::new("1캐럿 다이아💎 증정", 0.001),
        PrizeEntry::new("다이아💎 세팅 변경", 0.01),
        PrizeEntry::new("5천원 할인", 0.08),
        PrizeEntry::new("재방문 1만원 할인권", 0.15),
        PrizeEntry::new("3천원 할인", 0.30),
        PrizeEntry::new("1천원 할인", 0.459),
    ]
}

fn validate(entries: &[PrizeEntry]) -> Result<()> {
    if entries.is_empty() {
        return Err(WheelError::EmptyRegistry);
    }
    for (index, entry) in entries.iter().enumerate() {
        let p = entry.probability;
        if !p.is_finite() || p <= 0.0 || p > 1.0 {
            return Err(WheelError::InvalidProbability { index, value: p });
        }
    }
    let sum: f64 = entries.iter().map(|e| e.probability).sum();
    if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(WheelError::ProbabilitySum { sum });
    }
    Ok(())
}
