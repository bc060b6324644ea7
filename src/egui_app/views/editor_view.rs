use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::types::Route;
use crate::egui_app::views::markup_view;
use crate::shared::Visibility;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let heading = state.editor.mode().heading();
    ui.label(
        egui::RichText::new(heading)
            .size(24.0)
            .strong()
            .color(colors::TEXT_LIGHT),
    );
    ui.add_space(12.0);

    if state.editor.is_loading() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(egui::RichText::new("Loading document...").color(colors::TEXT_LIGHT));
        });
        return;
    }

    let mut save = false;
    let mut cancel = false;

    styles::paper_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        let editor = &mut state.editor;

        ui.label(egui::RichText::new("Title").color(colors::TEXT_SECONDARY));
        ui.add(
            egui::TextEdit::singleline(&mut editor.title)
                .hint_text("Document title")
                .desired_width(f32::INFINITY)
                .text_color(colors::TEXT_DARK),
        );
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Visibility").color(colors::TEXT_SECONDARY));
            egui::ComboBox::from_id_salt("visibility")
                .selected_text(editor.visibility.label())
                .show_ui(ui, |ui| {
                    for visibility in Visibility::ALL {
                        ui.selectable_value(&mut editor.visibility, visibility, visibility.label());
                    }
                });
            ui.add_space(16.0);
            ui.checkbox(&mut editor.show_preview, "Show preview");
        });
        ui.add_space(8.0);

        ui.label(egui::RichText::new("Content").color(colors::TEXT_SECONDARY));
        let show_preview = editor.show_preview;
        ui.columns(if show_preview { 2 } else { 1 }, |columns| {
            columns[0].add(
                egui::TextEdit::multiline(&mut editor.content)
                    .code_editor()
                    .desired_rows(18)
                    .desired_width(f32::INFINITY)
                    .text_color(colors::TEXT_DARK),
            );
            if show_preview {
                egui::ScrollArea::vertical()
                    .id_salt("editor_preview")
                    .max_height(360.0)
                    .show(&mut columns[1], |ui| {
                        markup_view::render(ui, &editor.content, colors::TEXT_DARK, "Nothing to preview");
                    });
            }
        });
        ui.add_space(12.0);

        ui.horizontal(|ui| {
            let label = if editor.is_saving() { "Saving..." } else { "Save" };
            save = ui.add_enabled(editor.can_save(), styles::primary_button(label)).clicked();
            cancel = ui.button("Cancel").clicked();
            if editor.is_saving() {
                ui.spinner();
            }
        });
    });

    if save {
        state.submit_editor();
    } else if cancel {
        state.navigate(Route::Documents);
    }
}
