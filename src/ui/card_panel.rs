use super::images::CardImages;
use super::state::Panel;
use crate::formatters::CardView;
use eframe::egui;

const IMAGE_WIDTH: f32 = 300.0;

pub struct CardPanel;

impl CardPanel {
    pub fn show(ui: &mut egui::Ui, panel: &Panel, images: &CardImages) {
        match panel {
            Panel::Idle => {}
            Panel::Loading => {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.add(egui::Spinner::new().size(32.0));
                    ui.label("Loading...");
                });
            }
            Panel::Error(message) => {
                ui.add_space(20.0);
                ui.colored_label(egui::Color32::RED, message);
            }
            Panel::NoResults => {
                ui.add_space(20.0);
                ui.label("No cards found. Try a different search term.");
            }
            Panel::Card(view) => Self::show_card(ui, view, images),
        }
    }

    fn show_card(ui: &mut egui::Ui, view: &CardView, images: &CardImages) {
        ui.horizontal_top(|ui| {
            Self::show_image(ui, view, images);
            ui.add_space(20.0);

            ui.vertical(|ui| {
                ui.heading(&view.name);
                ui.label(egui::RichText::new(&view.type_line).italics());
                ui.label(format!("Set: {}", view.set_name));
                ui.add_space(10.0);

                if !view.stats.is_empty() {
                    egui::Grid::new("card_stats")
                        .num_columns(2)
                        .spacing([20.0, 4.0])
                        .show(ui, |ui| {
                            for stat in &view.stats {
                                ui.strong(stat.label);
                                ui.label(&stat.value);
                                ui.end_row();
                            }
                        });
                    ui.add_space(10.0);
                }

                ui.separator();
                ui.label(&view.oracle_text);
                ui.add_space(8.0);
                ui.label(egui::RichText::new(&view.flavor_text).italics().weak());
                ui.add_space(8.0);
                ui.label(egui::RichText::new(&view.artist_credit).small());
            });
        });
    }

    fn show_image(ui: &mut egui::Ui, view: &CardView, images: &CardImages) {
        let Some(url) = view.image_url.as_deref() else {
            return;
        };

        match images.texture_for(url) {
            Some(texture) => {
                let size = texture.size_vec2();
                let scale = IMAGE_WIDTH / size.x.max(1.0);
                ui.image((texture.id(), size * scale)).on_hover_text(&view.name);
            }
            None if images.is_loading() => {
                ui.allocate_ui(egui::vec2(IMAGE_WIDTH, IMAGE_WIDTH * 1.4), |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                });
            }
            None => {
                ui.allocate_ui(egui::vec2(IMAGE_WIDTH, 40.0), |ui| {
                    ui.weak("Image unavailable");
                });
            }
        }
    }
}
