use eframe::egui::{self, Ui};

use crate::config::{DashboardConfig, Link};
use crate::state::DashboardSession;
use crate::ui::grid::RangeInputs;
use crate::ui::{grid, panels, plot, value_boxes};

/// The two cards below the value boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Card {
    Scatter,
    Grid,
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PenguinsApp {
    session: DashboardSession,
    title: String,
    links: Vec<Link>,
    point_radius: f32,
    range_inputs: RangeInputs,
    /// Card currently shown full screen, if any.
    expanded: Option<Card>,
}

impl PenguinsApp {
    pub fn new(session: DashboardSession, config: &DashboardConfig) -> Self {
        Self {
            session,
            title: config.title.clone(),
            links: config.links.clone(),
            point_radius: config.point_radius,
            range_inputs: RangeInputs::default(),
            expanded: None,
        }
    }

    /// Card frame with a header line and a full-screen toggle.
    fn card(&mut self, ui: &mut Ui, card: Card, add_contents: impl FnOnce(&mut Self, &mut Ui)) {
        let title = match card {
            Card::Scatter => "Bill Length vs. Bill Depth",
            Card::Grid => "Penguins Dataset Overview",
        };
        egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
            ui.set_min_size(ui.available_size());
            ui.horizontal(|ui: &mut Ui| {
                ui.strong(title);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
                    let (icon, hint) = if self.expanded == Some(card) {
                        ("🗗", "Restore")
                    } else {
                        ("🗖", "Expand")
                    };
                    if ui.small_button(icon).on_hover_text(hint).clicked() {
                        self.expanded = match self.expanded {
                            Some(c) if c == card => None,
                            _ => Some(card),
                        };
                    }
                });
            });
            ui.separator();
            add_contents(self, ui);
        });
    }

    fn scatter_card(&mut self, ui: &mut Ui) {
        self.card(ui, Card::Scatter, |app: &mut Self, ui: &mut Ui| {
            let rows = app.session.filtered();
            plot::scatter_plot(
                ui,
                app.session.dataset(),
                &rows,
                &app.session.colors,
                app.point_radius,
            );
        });
    }

    fn grid_card(&mut self, ui: &mut Ui) {
        self.card(ui, Card::Grid, |app: &mut Self, ui: &mut Ui| {
            let view_len = app.session.filtered().len();
            let rows = app.session.grid_rows();
            let (dataset, grid_state) = app.session.dataset_and_grid();
            grid::data_grid(
                ui,
                dataset,
                &rows,
                view_len,
                grid_state,
                &mut app.range_inputs,
            );
        });
    }
}

impl eframe::App for PenguinsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui: &mut Ui| {
            panels::top_bar(ui, &self.title, &mut self.session);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui: &mut Ui| {
                panels::side_panel(ui, &mut self.session, &self.links);
            });

        // ---- Central panel: value boxes, scatter, grid ----
        egui::CentralPanel::default().show(ctx, |ui: &mut Ui| {
            if let Some(card) = self.expanded {
                match card {
                    Card::Scatter => self.scatter_card(ui),
                    Card::Grid => self.grid_card(ui),
                }
                return;
            }

            let summary = self.session.summary();
            value_boxes::value_boxes(ui, &summary);
            ui.add_space(8.0);

            ui.columns(2, |cols: &mut [Ui]| {
                self.scatter_card(&mut cols[0]);
                self.grid_card(&mut cols[1]);
            });
        });
    }
}
