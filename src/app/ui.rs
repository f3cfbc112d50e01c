use super::{ComparisonState, FileComparator};
use crate::compare::FileSlot;
use crate::utils::format::FormatUtils;
use eframe::egui::{self, Align, Color32, RichText};
use rfd::FileDialog;

const ACCENT: Color32 = Color32::from_rgb(161, 89, 225);
const SUCCESS: Color32 = Color32::from_rgb(0, 150, 0);
const FAILURE: Color32 = Color32::from_rgb(220, 50, 50);

impl FileComparator {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let total_height = ui.available_height();
            let footer_height = 40.0;
            let footer_margin = 15.0;
            let content_height = total_height - footer_height - footer_margin;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("Comparador de Arquivos");
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new("Envie dois documentos e descubra o quanto eles se parecem")
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(20.0);

                    ui.group(|ui| {
                        self.render_file_row(ui, FileSlot::First, "Arquivo 1");
                        ui.add_space(8.0);
                        self.render_file_row(ui, FileSlot::Second, "Arquivo 2");
                    });

                    ui.add_space(20.0);

                    ui.vertical_centered(|ui| {
                        let loading = self.controller.state().is_loading();

                        ui.add_enabled_ui(!loading, |ui| {
                            let button = egui::Button::new("🔍 Comparar")
                                .min_size(egui::vec2(200.0, 40.0));
                            if ui.add(button).clicked() {
                                self.start_compare(ctx);
                            }
                        });

                        if loading {
                            ui.add_space(5.0);
                            if ui.button("Cancelar").clicked() {
                                self.controller.cancel();
                            }
                        } else if self.controller.state().is_finished() {
                            ui.add_space(5.0);
                            if ui.button("🗑 Limpar").clicked() {
                                self.controller.reset();
                            }
                        }
                    });

                    ui.add_space(20.0);
                    self.render_result(ui);
                    ui.add_space(20.0);
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(footer_margin);
                self.render_footer(ui);
            });
        });
    }

    fn render_file_row(&mut self, ui: &mut egui::Ui, slot: FileSlot, label: &str) {
        let loading = self.controller.state().is_loading();

        ui.horizontal(|ui| {
            ui.label(RichText::new(label).strong());
            ui.add_enabled_ui(!loading, |ui| {
                if ui.button("📄 Selecionar").clicked() {
                    if let Some(path) = FileDialog::new()
                        .add_filter("Documentos", &["txt", "pdf", "docx"])
                        .add_filter("Todos os arquivos", &["*"])
                        .pick_file()
                    {
                        self.controller.select_file(slot, path);
                    }
                }
            });

            let selected = self.controller.file(slot).map(|file| {
                let details = match file.size {
                    Some(size) => format!("{} ({})", file.name, FormatUtils::format_size(size)),
                    None => file.name.clone(),
                };
                (details, file.path.display().to_string())
            });

            match selected {
                Some((details, path)) => {
                    ui.label(details).on_hover_text(path);
                    if !loading && ui.small_button("✖").clicked() {
                        self.controller.clear_file(slot);
                    }
                }
                None => {
                    ui.label(
                        RichText::new("Nenhum arquivo selecionado")
                            .color(ui.visuals().text_color().gamma_multiply(0.5)),
                    );
                }
            }
        });
    }

    fn render_result(&self, ui: &mut egui::Ui) {
        let state = self.controller.state();
        if !state.result_area_visible() {
            return;
        }

        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| match state {
                ComparisonState::Idle => {}
                ComparisonState::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Comparando arquivos...");
                    });
                }
                ComparisonState::Success { summary } => {
                    ui.colored_label(SUCCESS, summary.as_str());
                }
                ComparisonState::Error { message } => {
                    ui.colored_label(FAILURE, message.as_str());
                }
            });
        });
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        ui.horizontal_centered(|ui| {
            ui.label("Servidor:");
            if ui
                .add(
                    egui::Label::new(RichText::new(&self.server_url).color(ACCENT))
                        .sense(egui::Sense::click()),
                )
                .on_hover_text("Abrir no navegador")
                .clicked()
            {
                if let Err(e) = open::that(&self.server_url) {
                    tracing::warn!(error = %e, url = %self.server_url, "could not open browser");
                }
            }
        });
    }
}
