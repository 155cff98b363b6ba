use std::collections::BTreeSet;
use std::rc::Rc;

use super::model::{PenguinDataset, Species};

// ---------------------------------------------------------------------------
// Filter predicate: body-mass ceiling + selected species
// ---------------------------------------------------------------------------

pub const MASS_CEILING_MIN: f64 = 2000.0;
pub const MASS_CEILING_MAX: f64 = 6000.0;

/// User-controlled filter parameters of one session.
///
/// Fields are private so that every change goes through [`FilteredView`],
/// which is what keeps its cache honest.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    mass_ceiling: f64,
    species_selection: BTreeSet<Species>,
}

impl Default for FilterState {
    /// Ceiling at the slider maximum, every species selected.
    fn default() -> Self {
        FilterState {
            mass_ceiling: MASS_CEILING_MAX,
            species_selection: Species::ALL.into_iter().collect(),
        }
    }
}

impl FilterState {
    pub fn new(mass_ceiling: f64, species_selection: BTreeSet<Species>) -> Self {
        FilterState {
            mass_ceiling,
            species_selection,
        }
    }

    pub fn mass_ceiling(&self) -> f64 {
        self.mass_ceiling
    }

    pub fn species_selection(&self) -> &BTreeSet<Species> {
        &self.species_selection
    }

    /// Whether a penguin with these attributes belongs in the view.
    /// A missing body mass never compares below the ceiling.
    pub fn admits(&self, species: Species, body_mass_g: Option<f64>) -> bool {
        self.species_selection.contains(&species)
            && body_mass_g.is_some_and(|mass| mass < self.mass_ceiling)
    }
}

/// Return indices of penguins that pass the filter, in dataset order.
pub fn filtered_indices(dataset: &PenguinDataset, filter: &FilterState) -> Vec<usize> {
    if filter.species_selection.is_empty() {
        return Vec::new();
    }
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, p)| filter.admits(p.species, p.body_mass_g))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – the memoized filter result of one session
// ---------------------------------------------------------------------------

/// Owns a session's [`FilterState`] together with the cached result of
/// [`filtered_indices`] for it.
///
/// Mutators drop the cache when they change the state; [`FilteredView::get`]
/// rebuilds it on the next read. Setting a value equal to the current one
/// keeps the cache.
#[derive(Debug, Default)]
pub struct FilteredView {
    state: FilterState,
    cached: Option<Rc<[usize]>>,
    recomputes: u64,
}

impl FilteredView {
    pub fn new(state: FilterState) -> Self {
        FilteredView {
            state,
            cached: None,
            recomputes: 0,
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Whether the next [`FilteredView::get`] will rescan the dataset.
    #[cfg(test)]
    pub fn is_stale(&self) -> bool {
        self.cached.is_none()
    }

    /// How many times the dataset has been scanned so far.
    #[cfg(test)]
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    pub fn set_mass_ceiling(&mut self, value: f64) {
        if self.state.mass_ceiling != value {
            self.state.mass_ceiling = value;
            self.invalidate();
        }
    }

    pub fn set_species_selection(&mut self, labels: BTreeSet<Species>) {
        if self.state.species_selection != labels {
            self.state.species_selection = labels;
            self.invalidate();
        }
    }

    /// Flip one species in or out of the selection.
    pub fn toggle_species(&mut self, species: Species) {
        let mut labels = self.state.species_selection.clone();
        if !labels.remove(&species) {
            labels.insert(species);
        }
        self.set_species_selection(labels);
    }

    /// Current filtered row indices, recomputed only if the state changed
    /// since the last read.
    pub fn get(&mut self, dataset: &PenguinDataset) -> Rc<[usize]> {
        if let Some(cached) = &self.cached {
            return Rc::clone(cached);
        }
        let fresh: Rc<[usize]> = filtered_indices(dataset, &self.state).into();
        self.recomputes += 1;
        log::debug!(
            "Recomputed filtered view (#{}): {} of {} penguins (ceiling {} g, species {:?})",
            self.recomputes,
            fresh.len(),
            dataset.len(),
            self.state.mass_ceiling,
            self.state.species_selection
        );
        self.cached = Some(Rc::clone(&fresh));
        fresh
    }

    fn invalidate(&mut self) {
        self.cached = None;
    }
}
