//! Authoritative plant state management utilities.

use std::collections::BTreeMap;

use lawn_defence_core::{CellCoord, PlantId, PlantKind, PlantSnapshot, PlantTemplate};

/// Snapshot of a plant stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct PlantState {
    /// Identifier allocated by the world for the plant.
    pub(crate) id: PlantId,
    /// Kind of plant that was grown.
    pub(crate) kind: PlantKind,
    /// Cell occupied by the plant.
    pub(crate) cell: CellCoord,
    pub(crate) health: u32,
    pub(crate) max_health: u32,
    pub(crate) last_fired_at_ms: Option<u64>,
    pub(crate) boosted_until_ms: Option<u64>,
}

impl PlantState {
    pub(crate) fn is_boosted(&self, now_ms: u64) -> bool {
        self.boosted_until_ms.is_some_and(|until| now_ms < until)
    }

    pub(crate) fn is_ready(&self, template: &PlantTemplate, now_ms: u64) -> bool {
        template.is_ready(self.last_fired_at_ms, self.is_boosted(now_ms), now_ms)
    }

    pub(crate) fn snapshot(&self, template: Option<&PlantTemplate>, now_ms: u64) -> PlantSnapshot {
        PlantSnapshot {
            id: self.id,
            kind: self.kind,
            cell: self.cell,
            health: self.health,
            max_health: self.max_health,
            last_fired_at_ms: self.last_fired_at_ms,
            boosted_until_ms: self.boosted_until_ms,
            ready: template.is_some_and(|template| self.is_ready(template, now_ms)),
        }
    }
}

/// Registry that stores plants and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct PlantRegistry {
    entries: BTreeMap<PlantId, PlantState>,
    occupancy: BTreeMap<CellCoord, PlantId>,
    next_plant_id: PlantId,
}

impl PlantRegistry {
    /// Creates an empty plant registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            occupancy: BTreeMap::new(),
            next_plant_id: PlantId::new(0),
        }
    }

    /// Stores a freshly grown plant, returning its identifier.
    ///
    /// Callers must check that the cell is free first.
    pub(crate) fn insert(
        &mut self,
        kind: PlantKind,
        cell: CellCoord,
        max_health: u32,
        now_ms: u64,
    ) -> PlantId {
        let id = self.next_plant_id;
        self.next_plant_id = PlantId::new(id.get().saturating_add(1));
        let state = PlantState {
            id,
            kind,
            cell,
            health: max_health,
            max_health,
            last_fired_at_ms: Some(now_ms),
            boosted_until_ms: None,
        };
        let _ = self.occupancy.insert(cell, id);
        let _ = self.entries.insert(id, state);
        id
    }

    pub(crate) fn remove(&mut self, plant: PlantId) -> Option<PlantState> {
        let state = self.entries.remove(&plant)?;
        let _ = self.occupancy.remove(&state.cell);
        Some(state)
    }

    pub(crate) fn get(&self, plant: PlantId) -> Option<&PlantState> {
        self.entries.get(&plant)
    }

    pub(crate) fn get_mut(&mut self, plant: PlantId) -> Option<&mut PlantState> {
        self.entries.get_mut(&plant)
    }

    pub(crate) fn occupant(&self, cell: CellCoord) -> Option<PlantId> {
        self.occupancy.get(&cell).copied()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &PlantState> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut PlantState> {
        self.entries.values_mut()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
