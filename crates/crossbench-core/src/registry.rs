//! Append-only registry of scored models.
//!
//! Names are unique. Records whose aggregate score is not positive are never
//! stored. Once admitted, a record can only be read.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::{CrossbenchError, Modality, ModelEntity, Result, View};
use crate::ecosystem::{summarize_ecosystem, OrgSummary};
use crate::scoring::{rank_by_view, EcosystemWeights};

/// Outcome of [`Registry::admit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    /// Aggregate score was 0: the record carried no evidence.
    Unscored,
}

/// Count of registry entries per modality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModalityCounts {
    pub text: usize,
    pub image: usize,
    pub video: usize,
}

#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<ModelEntity>,
    names: HashSet<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a scored record.
    ///
    /// Fails with [`CrossbenchError::DuplicateName`] if the name is already
    /// present; the existing record is kept.
    pub fn admit(&mut self, entity: ModelEntity) -> Result<Admission> {
        if self.names.contains(entity.name()) {
            return Err(CrossbenchError::DuplicateName(entity.name().to_string()));
        }
        if !(entity.aggregate_score() > 0.0) {
            return Ok(Admission::Unscored);
        }
        self.names.insert(entity.name().to_string());
        self.entries.push(entity);
        Ok(Admission::Accepted)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn get(&self, name: &str) -> Option<&ModelEntity> {
        self.entries.iter().find(|e| e.name() == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in admission order.
    pub fn iter(&self) -> impl Iterator<Item = &ModelEntity> {
        self.entries.iter()
    }

    pub fn ranked(&self, view: View) -> Vec<&ModelEntity> {
        rank_by_view(self.entries.iter(), view)
    }

    pub fn ecosystem(&self, weights: &EcosystemWeights) -> Vec<OrgSummary> {
        summarize_ecosystem(self.entries.iter(), weights)
    }

    pub fn modality_counts(&self) -> ModalityCounts {
        let mut counts = ModalityCounts::default();
        for entry in &self.entries {
            let mods = entry.modalities();
            counts.text += usize::from(mods.contains(Modality::Text));
            counts.image += usize::from(mods.contains(Modality::Image));
            counts.video += usize::from(mods.contains(Modality::Video));
        }
        counts
    }
}
