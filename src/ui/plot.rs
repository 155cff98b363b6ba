use eframe::egui::Ui;
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::color::SpeciesColors;
use crate::data::model::{PenguinDataset, Species};

// ---------------------------------------------------------------------------
// Bill length vs bill depth scatter
// ---------------------------------------------------------------------------

/// `[bill_length, bill_depth]` pairs of the given rows for one species.
/// Rows missing either measurement are skipped.
pub fn species_points(
    dataset: &PenguinDataset,
    rows: &[usize],
    species: Species,
) -> Vec<[f64; 2]> {
    rows.iter()
        .filter_map(|&i| dataset.get(i))
        .filter(|p| p.species == species)
        .filter_map(|p| Some([p.bill_length_mm?, p.bill_depth_mm?]))
        .collect()
}

/// Render the scatter plot of the filtered rows, one series per species.
pub fn scatter_plot(
    ui: &mut Ui,
    dataset: &PenguinDataset,
    rows: &[usize],
    colors: &SpeciesColors,
    radius: f32,
) {
    Plot::new("bill_scatter")
        .legend(Legend::default())
        .x_axis_label("bill_length_mm")
        .y_axis_label("bill_depth_mm")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for species in Species::ALL {
                let xy = species_points(dataset, rows, species);
                if xy.is_empty() {
                    continue;
                }
                let points: PlotPoints = xy.into();
                plot_ui.points(
                    Points::new(points)
                        .name(species.as_str())
                        .color(colors.color_for(species))
                        .radius(radius)
                        .filled(true),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixture::penguin;

    #[test]
    fn points_follow_row_order_and_skip_missing() {
        let ds = PenguinDataset::new(vec![
            penguin(Species::Adelie, Some(3000.0), Some((39.0, 18.0))),
            penguin(Species::Gentoo, Some(5000.0), Some((47.0, 15.0))),
            penguin(Species::Adelie, Some(3100.0), None),
            penguin(Species::Adelie, Some(3200.0), Some((41.0, 19.0))),
        ]);
        assert_eq!(
            species_points(&ds, &[3, 0, 1, 2], Species::Adelie),
            vec![[41.0, 19.0], [39.0, 18.0]]
        );
        assert_eq!(species_points(&ds, &[0, 1], Species::Gentoo), vec![[47.0, 15.0]]);
    }

    #[test]
    fn degenerate_inputs_give_zero_or_one_point() {
        let ds = PenguinDataset::new(vec![penguin(
            Species::Chinstrap,
            Some(3500.0),
            Some((50.0, 19.0)),
        )]);
        assert!(species_points(&ds, &[], Species::Chinstrap).is_empty());
        assert_eq!(species_points(&ds, &[0], Species::Chinstrap).len(), 1);
    }
}
