use eframe::egui::{self, Align, Layout, RichText, Ui};

use crate::data::stats::Summary;

/// The three headline value boxes, side by side.
pub fn value_boxes(ui: &mut Ui, summary: &Summary) {
    ui.columns(3, |cols: &mut [Ui]| {
        value_box(&mut cols[0], "🐧", "Total Number of Penguins", &summary.count_text());
        value_box(&mut cols[1], "↔", "Average Bill Length (mm)", &summary.bill_length_text());
        value_box(&mut cols[2], "↕", "Average Bill Depth (mm)", &summary.bill_depth_text());
    });
}

fn value_box(ui: &mut Ui, icon: &str, title: &str, value: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.with_layout(Layout::left_to_right(Align::Center), |ui: &mut Ui| {
            ui.label(RichText::new(icon).size(32.0));
            ui.vertical(|ui: &mut Ui| {
                ui.label(title);
                ui.label(RichText::new(value).size(24.0).strong());
            });
        });
    });
}
