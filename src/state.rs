use std::collections::BTreeSet;
use std::rc::Rc;
use std::sync::Arc;

use crate::color::SpeciesColors;
use crate::data::filter::{FilterState, FilteredView};
use crate::data::grid::GridState;
use crate::data::model::{PenguinDataset, Species};
use crate::data::stats::Summary;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Everything one dashboard window owns, independent of rendering.
///
/// The dataset is shared with every other session; the filter, its memoized
/// view and the grid settings belong to this session alone.
pub struct DashboardSession {
    dataset: Arc<PenguinDataset>,
    view: FilteredView,
    pub grid: GridState,
    pub colors: SpeciesColors,
}

impl DashboardSession {
    #[cfg(test)]
    pub fn new(dataset: Arc<PenguinDataset>) -> Self {
        Self::with_filter(dataset, FilterState::default())
    }

    pub fn with_filter(dataset: Arc<PenguinDataset>, filter: FilterState) -> Self {
        Self {
            dataset,
            view: FilteredView::new(filter),
            grid: GridState::default(),
            colors: SpeciesColors::default(),
        }
    }

    pub fn dataset(&self) -> &PenguinDataset {
        &self.dataset
    }

    /// Split borrow for the grid renderer, which edits the grid settings
    /// while reading rows.
    pub fn dataset_and_grid(&mut self) -> (&PenguinDataset, &mut GridState) {
        (&self.dataset, &mut self.grid)
    }

    pub fn filter(&self) -> &FilterState {
        self.view.state()
    }

    pub fn set_mass_ceiling(&mut self, value: f64) {
        self.view.set_mass_ceiling(value);
    }

    pub fn set_species_selection(&mut self, labels: BTreeSet<Species>) {
        self.view.set_species_selection(labels);
    }

    pub fn toggle_species(&mut self, species: Species) {
        self.view.toggle_species(species);
    }

    pub fn select_all_species(&mut self) {
        self.set_species_selection(Species::ALL.into_iter().collect());
    }

    pub fn select_no_species(&mut self) {
        self.set_species_selection(BTreeSet::new());
    }

    /// Row indices matching the current filter (memoized).
    pub fn filtered(&mut self) -> Rc<[usize]> {
        self.view.get(&self.dataset)
    }

    /// Value-box numbers for the current filter.
    pub fn summary(&mut self) -> Summary {
        let rows = self.filtered();
        Summary::of(&self.dataset, &rows)
    }

    /// Rows the data grid displays: the filtered view narrowed by the grid's
    /// own column filters and sorted.
    pub fn grid_rows(&mut self) -> Vec<usize> {
        let rows = self.filtered();
        self.grid.rows(&self.dataset, &rows)
    }

    /// Number of times this session has rescanned the dataset.
    #[cfg(test)]
    pub fn recompute_count(&self) -> u64 {
        self.view.recompute_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixture::spread;
    use crate::data::grid::{ColumnFilter, GridColumn};
    use crate::data::loader::load_builtin;
    use crate::data::stats::NO_DATA;

    #[test]
    fn default_session_shows_the_whole_fixture() {
        let mut session = DashboardSession::new(Arc::new(spread(344)));
        let summary = session.summary();
        assert_eq!(summary.count, 344);
        assert_eq!(summary.count_text(), "344");
        assert_eq!(session.grid_rows().len(), 344);
    }

    #[test]
    fn renderers_share_one_recompute_per_change() {
        let mut session = DashboardSession::new(Arc::new(spread(60)));
        session.summary();
        session.grid_rows();
        session.filtered();
        assert_eq!(session.recompute_count(), 1);

        session.set_mass_ceiling(4000.0);
        session.summary();
        session.grid_rows();
        assert_eq!(session.recompute_count(), 2);
    }

    #[test]
    fn sessions_over_one_dataset_are_isolated() {
        let dataset = Arc::new(spread(60));
        let mut a = DashboardSession::new(Arc::clone(&dataset));
        let mut b = DashboardSession::new(Arc::clone(&dataset));

        a.select_no_species();
        assert_eq!(a.summary().count, 0);
        assert_eq!(b.summary().count, 60);
        assert_eq!(b.filter(), &FilterState::default());
    }

    #[test]
    fn grid_filters_do_not_touch_the_summary() {
        let mut session = DashboardSession::new(Arc::new(spread(60)));
        session
            .grid
            .set_filter(GridColumn::Species, ColumnFilter::Contains("gentoo".into()));
        assert_eq!(session.grid_rows().len(), 20);
        assert_eq!(session.summary().count, 60);
    }

    #[test]
    fn builtin_adelie_summary() {
        let mut session = DashboardSession::new(Arc::new(load_builtin().unwrap()));
        session.set_species_selection([Species::Adelie].into_iter().collect());
        let summary = session.summary();
        assert_eq!(summary.count, 151);
        assert_eq!(summary.bill_length_text(), "38.8 mm");
        assert_eq!(summary.bill_depth_text(), "18.3 mm");
        let rows = session.filtered();
        assert!(rows
            .iter()
            .all(|&i| session.dataset().records()[i].species == Species::Adelie));
    }

    #[test]
    fn builtin_default_filter_drops_heavy_and_unweighed_birds() {
        let mut session = DashboardSession::new(Arc::new(load_builtin().unwrap()));
        assert_eq!(session.dataset().len(), 344);
        // Two birds were never weighed and four Gentoo reach 6000 g or more.
        assert_eq!(session.summary().count, 338);
    }

    #[test]
    fn builtin_gentoo_below_3000_is_empty() {
        let mut session = DashboardSession::new(Arc::new(load_builtin().unwrap()));
        session.set_species_selection([Species::Gentoo].into_iter().collect());
        session.set_mass_ceiling(3000.0);
        let summary = session.summary();
        assert_eq!(summary.count_text(), "0");
        assert_eq!(summary.bill_length_text(), NO_DATA);
        assert_eq!(summary.bill_depth_text(), NO_DATA);
        assert!(session.grid_rows().is_empty());
    }
}
