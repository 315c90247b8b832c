use std::sync::Arc;

use eframe::egui;

use crate::config::PlayerConfig;
use crate::engine::gst_engine::GstEngineFactory;
use crate::engine::position::Waker;
use crate::ops::transport::TransportController;
use crate::types::command::{SliderInteraction, TransportCommand};
use crate::ui::file_dialog::pick_audio_file;
use crate::ui::view::PlayerView;

pub struct PlayerApp {
    transport: TransportController<PlayerView>,
    volume_slider_width: f32,
}

impl PlayerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &PlayerConfig) -> Self {
        let ctx = cc.egui_ctx.clone();
        let waker: Waker = Arc::new(move || ctx.request_repaint());
        let factory = GstEngineFactory::new(config.position_interval);
        let transport = TransportController::new(
            Box::new(factory),
            PlayerView::new(config.default_volume),
            Some(waker),
        );
        Self {
            transport,
            volume_slider_width: config.volume_slider_width,
        }
    }
}

impl eframe::App for PlayerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Position notifications from the engine thread land here.
        self.transport.pump();

        let mut commands = Vec::new();
        let volume_slider_width = self.volume_slider_width;
        let view = self.transport.view_mut();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    if ui.button("📂").on_hover_text("Open").clicked() {
                        commands.push(TransportCommand::Open(pick_audio_file()));
                    }
                    if ui.button(view.icon.glyph()).clicked() {
                        commands.push(TransportCommand::TogglePlayPause);
                    }
                    if ui.button("🔁").on_hover_text("Restart").clicked() {
                        commands.push(TransportCommand::Restart);
                    }
                    if ui.button("⏹").on_hover_text("Stop").clicked() {
                        commands.push(TransportCommand::Stop);
                    }

                    ui.label("🔊");
                    ui.spacing_mut().slider_width = volume_slider_width;
                    let response =
                        ui.add(egui::Slider::new(&mut view.volume, 0.0..=100.0).show_value(false));
                    if response.changed() {
                        commands.push(TransportCommand::Volume {
                            level: view.volume,
                            interaction: interaction(&response),
                        });
                    }
                });

                let full_width = ui.available_width();
                ui.spacing_mut().slider_width = full_width;
                let response =
                    ui.add(egui::Slider::new(&mut view.position, 0.0..=100.0).show_value(false));
                if response.changed() {
                    commands.push(TransportCommand::Seek {
                        percent: view.position,
                        interaction: interaction(&response),
                    });
                }
            });
        });

        if let Some(message) = view.warning().map(str::to_string) {
            egui::Window::new("Warning")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(message);
                    if ui.button("OK").clicked() {
                        view.dismiss_warning();
                    }
                });
        }

        for command in commands {
            self.transport.dispatch(command);
        }
    }
}

fn interaction(response: &egui::Response) -> SliderInteraction {
    SliderInteraction::from(response.dragged() || response.is_pointer_button_down_on())
}
