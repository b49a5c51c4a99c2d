//! Lot and wafer catalog derived from an uploaded wafer map.
//!
//! There is no image analysis behind this: the number of lots is a function of
//! the file size alone, and every lot carries the same fixed number of wafers.

use crate::config::{
    BYTES_PER_EXTRA_LOT, FALLBACK_LOTS, LOT_ID_BASE, LOT_ID_PREFIX, MAX_LOT_COUNT, MIN_LOT_COUNT,
    WAFERS_PER_LOT,
};
use crate::Artifact;
use log::info;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Lot {
    pub id: String,
    /// Wafer ids in index order, `<lot>_1` first.
    pub wafers: Vec<String>,
}

impl Lot {
    fn with_wafers(id: String, wafer_count: usize) -> Self {
        let wafers = (1..=wafer_count).map(|n| wafer_id(&id, n)).collect();
        Self { id, wafers }
    }
}

/// Ordered lot -> wafer mapping. Replaced wholesale, never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Catalog {
    lots: Vec<Lot>,
}

impl Catalog {
    /// Derive the catalog for an uploaded artifact.
    pub fn generate(artifact: &Artifact) -> Self {
        let count = lot_count(artifact.size_bytes);
        let lots = (0..count)
            .map(|i| Lot::with_wafers(lot_id(LOT_ID_BASE + i), WAFERS_PER_LOT))
            .collect();

        info!(
            "Generated {} lots x {} wafers from '{}' ({} bytes)",
            count, WAFERS_PER_LOT, artifact.name, artifact.size_bytes
        );
        Self { lots }
    }

    /// The demonstration lots shown before anything has been uploaded.
    pub fn fallback() -> Self {
        let lots = FALLBACK_LOTS
            .iter()
            .map(|(id, _)| Lot::with_wafers(id.to_string(), WAFERS_PER_LOT))
            .collect();
        Self { lots }
    }

    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lots.len()
    }

    pub fn lots(&self) -> impl Iterator<Item = &str> {
        self.lots.iter().map(|lot| lot.id.as_str())
    }

    pub fn first_lot(&self) -> Option<&str> {
        self.lots.first().map(|lot| lot.id.as_str())
    }

    pub fn contains_lot(&self, lot_id: &str) -> bool {
        self.lots.iter().any(|lot| lot.id == lot_id)
    }

    pub fn wafers(&self, lot_id: &str) -> Option<&[String]> {
        self.lots
            .iter()
            .find(|lot| lot.id == lot_id)
            .map(|lot| lot.wafers.as_slice())
    }

    /// Total wafers across every lot.
    pub fn wafer_count(&self) -> usize {
        self.lots.iter().map(|lot| lot.wafers.len()).sum()
    }
}

/// `clamp(floor(size / 50000) + 5, 5, 12)`.
pub fn lot_count(size_bytes: u64) -> usize {
    let extra = usize::try_from(size_bytes / BYTES_PER_EXTRA_LOT).unwrap_or(usize::MAX);
    extra
        .saturating_add(MIN_LOT_COUNT)
        .clamp(MIN_LOT_COUNT, MAX_LOT_COUNT)
}

pub fn lot_id(number: usize) -> String {
    format!("{}{}", LOT_ID_PREFIX, number)
}

pub fn wafer_id(lot_id: &str, wafer_number: usize) -> String {
    format!("{}_{}", lot_id, wafer_number)
}
