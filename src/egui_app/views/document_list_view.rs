use eframe::egui;

use crate::egui_app::documents::list::{EMPTY_STATE, NO_CONTENT, NO_PREVIEW};
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::types::Route;
use crate::egui_app::views::markup_view;

/// Something a card asked for; applied once the list is no longer borrowed
enum CardAction {
    Edit(i64),
    Preview(i64),
    Export(i64),
    Delete(i64),
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("My Documents")
                .size(24.0)
                .strong()
                .color(colors::TEXT_LIGHT),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.add(styles::primary_button("New Document")).clicked() {
                state.navigate(Route::Create);
            }
        });
    });
    ui.add_space(12.0);

    ui.horizontal(|ui| {
        ui.add(
            egui::TextEdit::singleline(&mut state.documents.search_input)
                .hint_text("Search documents...")
                .desired_width(f32::INFINITY)
                .text_color(colors::TEXT_DARK),
        );
    });
    ui.add_space(12.0);

    let list = &state.documents;
    if list.is_loading() && !list.has_loaded() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(egui::RichText::new("Loading documents...").color(colors::TEXT_LIGHT));
        });
        return;
    }

    if list.documents().is_empty() {
        ui.add_space(40.0);
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new(EMPTY_STATE)
                    .size(18.0)
                    .color(colors::TEXT_SECONDARY),
            );
        });
        return;
    }

    let mut action = None;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for doc in list.documents() {
                let deleting = list.is_deleting(doc.id);
                styles::card_frame(false).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(doc.display_title())
                                .size(18.0)
                                .strong()
                                .color(colors::TEXT_DARK),
                        );
                        ui.label(
                            egui::RichText::new(doc.visibility.label())
                                .small()
                                .color(styles::visibility_color(doc.visibility)),
                        );
                    });
                    ui.add_space(4.0);

                    match list.preview_markup(doc) {
                        Some(preview) => markup_view::render(ui, preview, colors::TEXT_DARK, NO_PREVIEW),
                        None => {
                            ui.label(egui::RichText::new(NO_PREVIEW).italics().color(colors::TEXT_SECONDARY));
                        }
                    }

                    ui.add_space(4.0);
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(doc.created_at_display())
                                .small()
                                .color(colors::TIMESTAMP),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.add_enabled(!deleting, styles::danger_button("Delete")).clicked() {
                                action = Some(CardAction::Delete(doc.id));
                            }
                            if ui.button("Export PDF").clicked() {
                                action = Some(CardAction::Export(doc.id));
                            }
                            if ui.button("Preview").clicked() {
                                action = Some(CardAction::Preview(doc.id));
                            }
                            if ui.button("Edit").clicked() {
                                action = Some(CardAction::Edit(doc.id));
                            }
                            if deleting {
                                ui.spinner();
                            }
                        });
                    });
                });
                ui.add_space(10.0);
            }
        });

    match action {
        Some(CardAction::Edit(id)) => state.navigate(Route::Edit(id)),
        Some(CardAction::Preview(id)) => state.documents.open_preview(id),
        Some(CardAction::Export(id)) => state.export_document(id),
        Some(CardAction::Delete(id)) => state.documents.request_delete(id),
        None => {}
    }
}

/// Delete confirmation and preview windows
pub fn render_dialogs(ctx: &egui::Context, state: &mut AppState) {
    if let Some(doc) = state.documents.pending_delete_document() {
        let title = doc.display_title().to_string();
        let mut confirmed = false;
        let mut cancelled = false;

        egui::Window::new("Delete document")
            .frame(styles::modal_frame())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(format!("Are you sure you want to delete \"{}\"?", title))
                        .color(colors::TEXT_DARK),
                );
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    confirmed = ui.add(styles::danger_button("Delete")).clicked();
                    cancelled = ui.button("Cancel").clicked();
                });
            });

        if confirmed {
            state.confirm_delete();
        } else if cancelled {
            state.documents.cancel_delete();
        }
    }

    if let Some(doc) = state.documents.preview() {
        let mut open = true;
        let mut export = None;
        egui::Window::new(doc.display_title())
            .id(egui::Id::new("document_preview"))
            .frame(styles::modal_frame())
            .open(&mut open)
            .collapsible(false)
            .default_size([560.0, 480.0])
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(format!("Created at: {}", doc.created_at_display()))
                        .small()
                        .color(colors::TIMESTAMP),
                );
                ui.separator();
                egui::ScrollArea::vertical().max_height(380.0).show(ui, |ui| {
                    markup_view::render(ui, &doc.content, colors::TEXT_DARK, NO_CONTENT);
                });
                ui.separator();
                if ui.add(styles::primary_button("Export PDF")).clicked() {
                    export = Some(doc.id);
                }
            });

        if let Some(id) = export {
            state.export_document(id);
        }
        if !open {
            state.documents.close_preview();
        }
    }
}
