use super::model::{Penguin, PenguinDataset};

// ---------------------------------------------------------------------------
// Value-box summaries over a filtered view
// ---------------------------------------------------------------------------

/// Text shown in place of a statistic that has no values to summarise.
pub const NO_DATA: &str = "no data";

/// The three headline numbers of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean_bill_length_mm: Option<f64>,
    pub mean_bill_depth_mm: Option<f64>,
}

impl Summary {
    pub fn of(dataset: &PenguinDataset, indices: &[usize]) -> Self {
        let rows = || indices.iter().filter_map(|&i| dataset.get(i));
        Summary {
            count: indices.len(),
            mean_bill_length_mm: mean(rows().map(|p: &Penguin| p.bill_length_mm)),
            mean_bill_depth_mm: mean(rows().map(|p: &Penguin| p.bill_depth_mm)),
        }
    }

    pub fn count_text(&self) -> String {
        self.count.to_string()
    }

    pub fn bill_length_text(&self) -> String {
        format_mm(self.mean_bill_length_mm)
    }

    pub fn bill_depth_text(&self) -> String {
        format_mm(self.mean_bill_depth_mm)
    }
}

/// Arithmetic mean of the present values; `None` when there are none.
pub fn mean(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// One decimal place with a millimetre suffix, or [`NO_DATA`].
pub fn format_mm(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1} mm"),
        None => NO_DATA.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filtered_indices, FilterState};
    use crate::data::fixture::{penguin, spread};
    use crate::data::model::Species;

    #[test]
    fn mean_skips_missing_values() {
        assert_eq!(mean([Some(1.0), None, Some(3.0)]), Some(2.0));
    }

    #[test]
    fn mean_of_nothing_is_undefined() {
        assert_eq!(mean(std::iter::empty()), None);
        assert_eq!(mean([None, None]), None);
    }

    #[test]
    fn formatting_rounds_to_one_decimal() {
        assert_eq!(format_mm(Some(43.921)), "43.9 mm");
        assert_eq!(format_mm(Some(17.15)), "17.1 mm");
        assert_eq!(format_mm(None), "no data");
    }

    #[test]
    fn empty_view_reports_zero_and_no_data() {
        let ds = spread(12);
        let s = Summary::of(&ds, &[]);
        assert_eq!(s.count_text(), "0");
        assert_eq!(s.bill_length_text(), NO_DATA);
        assert_eq!(s.bill_depth_text(), NO_DATA);
    }

    #[test]
    fn means_cover_only_the_filtered_rows() {
        let ds = PenguinDataset::new(vec![
            penguin(Species::Adelie, Some(3700.0), Some((38.0, 18.0))),
            penguin(Species::Gentoo, Some(5000.0), Some((48.0, 15.0))),
            penguin(Species::Adelie, Some(3500.0), Some((40.0, 19.0))),
        ]);
        let filter = FilterState::new(6000.0, [Species::Adelie].into_iter().collect());
        let s = Summary::of(&ds, &filtered_indices(&ds, &filter));
        assert_eq!(s.count, 2);
        assert_eq!(s.mean_bill_length_mm, Some(39.0));
        assert_eq!(s.mean_bill_depth_mm, Some(18.5));
        assert_eq!(s.bill_length_text(), "39.0 mm");
    }

    #[test]
    fn rows_without_measurements_count_but_do_not_average() {
        let ds = PenguinDataset::new(vec![
            penguin(Species::Chinstrap, Some(3600.0), None),
            penguin(Species::Chinstrap, Some(3800.0), Some((49.0, 18.0))),
        ]);
        let s = Summary::of(&ds, &[0, 1]);
        assert_eq!(s.count, 2);
        assert_eq!(s.mean_bill_length_mm, Some(49.0));
    }

    #[test]
    fn single_missing_row_view_is_no_data() {
        let ds = PenguinDataset::new(vec![penguin(Species::Adelie, Some(3000.0), None)]);
        let s = Summary::of(&ds, &[0]);
        assert_eq!(s.count_text(), "1");
        assert_eq!(s.bill_depth_text(), NO_DATA);
    }
}
