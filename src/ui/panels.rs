use eframe::egui::{self, RichText, ScrollArea, Slider, Ui};

use crate::config::Link;
use crate::data::filter::{MASS_CEILING_MAX, MASS_CEILING_MIN};
use crate::data::model::Species;
use crate::state::DashboardSession;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, session: &mut DashboardSession, links: &[Link]) {
    // ---- Logo (centered) ----
    let logo = egui::include_image!("../../assets/logo.png");
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add(
            egui::Image::new(logo)
                .max_width(ui.available_width() * 0.5)
                .max_height(96.0)
                .corner_radius(4.0),
        );
    });
    ui.add_space(4.0);

    ui.heading("Filter Penguins Data");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Body-mass ceiling ----
            ui.strong("Maximum Body Mass (grams)");
            let mut ceiling = session.filter().mass_ceiling();
            let slider = Slider::new(&mut ceiling, MASS_CEILING_MIN..=MASS_CEILING_MAX)
                .step_by(1.0)
                .suffix(" g");
            if ui.add(slider).changed() {
                session.set_mass_ceiling(ceiling);
            }
            ui.add_space(8.0);

            // ---- Species checkbox group ----
            let n_selected = session.filter().species_selection().len();
            let header = format!(
                "Select Species to Display  ({n_selected}/{})",
                Species::ALL.len()
            );
            ui.strong(header);
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    session.select_all_species();
                }
                if ui.small_button("None").clicked() {
                    session.select_no_species();
                }
            });

            for species in Species::ALL {
                let mut checked = session.filter().species_selection().contains(&species);
                let text = RichText::new(species.as_str()).color(session.colors.color_for(species));
                if ui.checkbox(&mut checked, text).changed() {
                    session.toggle_species(species);
                }
            }

            ui.separator();

            // ---- Static resources ----
            ui.label(RichText::new("Useful Resources").small().strong());
            for link in links {
                ui.hyperlink_to(link.label.as_str(), &link.url);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with a one-line dataset status.
pub fn top_bar(ui: &mut Ui, title: &str, session: &mut DashboardSession) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(title);
        ui.separator();
        let visible = session.filtered().len();
        ui.label(format!(
            "{} penguins loaded, {visible} visible",
            session.dataset().len()
        ));
    });
}
