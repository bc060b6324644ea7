use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::types::Route;

pub mod auth_view;
pub mod document_list_view;
pub mod editor_view;
pub mod markup_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_panel")
        .frame(styles::top_bar_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new("Docshelf").size(18.0).strong());

                if !state.session.is_authenticated() {
                    return;
                }

                ui.add_space(16.0);
                if ui.button("Documents").clicked() {
                    state.navigate(Route::Documents);
                }
                if ui.button("New").clicked() {
                    state.navigate(Route::Create);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Logout").clicked() {
                        state.logout();
                    }
                    if state.history.can_go_back() && ui.button("Back").clicked() {
                        state.back();
                    }
                });
            });
        });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default()
        .frame(styles::main_frame())
        .show(ctx, |ui| match state.current_route() {
            Route::Login | Route::Register => auth_view::render(ui, state),
            Route::Documents => document_list_view::render(ui, state),
            Route::Create | Route::Edit(_) => editor_view::render(ui, state),
        });

    if state.current_route() == Route::Documents {
        document_list_view::render_dialogs(ctx, state);
    }
}

/// Transient notifications stacked in the bottom-right corner
pub fn render_toasts(ctx: &egui::Context, state: &mut AppState) {
    if state.toasts.is_empty() {
        return;
    }

    let mut dismissed = None;
    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for (index, toast) in state.toasts.iter().enumerate() {
                styles::toast_frame(toast.level).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(&toast.message).color(styles::toast_color(toast.level)));
                        if ui.small_button("x").clicked() {
                            dismissed = Some(index);
                        }
                    });
                });
                ui.add_space(6.0);
            }
        });

    if let Some(index) = dismissed {
        state.toasts.dismiss(index);
    }
}
