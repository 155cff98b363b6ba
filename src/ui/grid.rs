use eframe::egui::{self, Align, Layout, RichText, TextEdit, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::grid::{ColumnFilter, GridColumn, GridSort, GridState};
use crate::data::model::PenguinDataset;

const HEADER_HEIGHT: f32 = 52.0;
const ROW_HEIGHT: f32 = 18.0;

/// Text typed into the numeric range boxes. Kept verbatim so half-typed
/// numbers ("4.", "-") survive between frames.
#[derive(Debug, Default)]
pub struct RangeInputs {
    bounds: [(String, String); 5],
}

impl RangeInputs {
    pub fn clear(&mut self) {
        self.bounds = Default::default();
    }
}

/// Parse a bound box: blank is an open bound, garbage is ignored.
fn parse_bound(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Data grid (filtered view + per-column filters)
// ---------------------------------------------------------------------------

/// Render the data grid. `view_len` is the size of the filtered view the
/// grid rows were drawn from.
pub fn data_grid(
    ui: &mut Ui,
    dataset: &PenguinDataset,
    rows: &[usize],
    view_len: usize,
    grid: &mut GridState,
    inputs: &mut RangeInputs,
) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{} of {view_len} rows", rows.len()));
        if grid.any_filter_active() && ui.small_button("Clear filters").clicked() {
            grid.clear_filters();
            inputs.clear();
        }
    });

    let island_hint = format!("Islands: {}", dataset.islands().join(", "));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(80.0), GridColumn::ALL.len())
        .min_scrolled_height(0.0)
        .header(HEADER_HEIGHT, |mut header| {
            for column in GridColumn::ALL {
                header.col(|ui: &mut Ui| {
                    ui.vertical(|ui: &mut Ui| {
                        header_button(ui, column, grid);
                        filter_box(ui, column, grid, inputs, &island_hint);
                    });
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let Some(p) = rows.get(row.index()).and_then(|&i| dataset.get(i)) else {
                    return;
                };
                for column in GridColumn::ALL {
                    row.col(|ui: &mut Ui| {
                        if column.is_numeric() {
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
                                ui.label(column.cell(p));
                            });
                        } else {
                            ui.label(column.cell(p));
                        }
                    });
                }
            });
        });
}

fn header_button(ui: &mut Ui, column: GridColumn, grid: &mut GridState) {
    let arrow = match grid.sort() {
        Some(GridSort { column: c, ascending: true }) if c == column => " ▲",
        Some(GridSort { column: c, ascending: false }) if c == column => " ▼",
        _ => "",
    };
    let label = RichText::new(format!("{}{arrow}", column.header())).strong();
    if ui
        .add(egui::Button::new(label).frame(false))
        .on_hover_text("Sort")
        .clicked()
    {
        grid.cycle_sort(column);
    }
}

fn filter_box(
    ui: &mut Ui,
    column: GridColumn,
    grid: &mut GridState,
    inputs: &mut RangeInputs,
    island_hint: &str,
) {
    if let ColumnFilter::Contains(needle) = grid.filter_mut(column) {
        let response = ui.add(
            TextEdit::singleline(needle)
                .hint_text("filter")
                .desired_width(f32::INFINITY),
        );
        if column == GridColumn::Island {
            response.on_hover_text(island_hint);
        }
        return;
    }

    let (min_text, max_text) = &mut inputs.bounds[column.index()];
    let changed = ui
        .horizontal(|ui: &mut Ui| {
            let lo = ui.add(TextEdit::singleline(min_text).hint_text("min").desired_width(40.0));
            let hi = ui.add(TextEdit::singleline(max_text).hint_text("max").desired_width(40.0));
            lo.changed() || hi.changed()
        })
        .inner;
    if changed {
        grid.set_filter(
            column,
            ColumnFilter::Range {
                min: parse_bound(min_text),
                max: parse_bound(max_text),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_parse_leniently() {
        assert_eq!(parse_bound(" 42.5 "), Some(42.5));
        assert_eq!(parse_bound(""), None);
        assert_eq!(parse_bound("4."), Some(4.0));
        assert_eq!(parse_bound("-"), None);
        assert_eq!(parse_bound("inf"), None);
    }
}
