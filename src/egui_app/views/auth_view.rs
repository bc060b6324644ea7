use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::types::Route;

const INPUT_WIDTH: f32 = 280.0;
const LABEL_WIDTH: f32 = 80.0;

fn field(ui: &mut egui::Ui, available_width: f32, label: &str, value: &mut String, password: bool) -> egui::Response {
    ui.horizontal(|ui| {
        ui.add_space(((available_width - INPUT_WIDTH - LABEL_WIDTH - 20.0) / 2.0).max(0.0));
        ui.add_sized(
            [LABEL_WIDTH, 24.0],
            egui::Label::new(egui::RichText::new(label).color(colors::TEXT_SECONDARY)),
        );
        ui.add_sized(
            [INPUT_WIDTH, 28.0],
            egui::TextEdit::singleline(value)
                .password(password)
                .text_color(colors::TEXT_DARK),
        )
    })
    .inner
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let registering = state.current_route() == Route::Register;

    // Fill the entire background first
    let available_rect = ui.available_rect_before_wrap();
    ui.painter().rect_filled(available_rect, 0.0, colors::BG_DARK);
    let width = available_rect.width();

    ui.scope_builder(egui::UiBuilder::new().max_rect(available_rect), |ui| {
        ui.vertical_centered(|ui| {
            let total_height = if registering { 330.0 } else { 280.0 };
            ui.add_space(((available_rect.height() - total_height) / 2.0).max(0.0));

            ui.label(
                egui::RichText::new(if registering { "Create Account" } else { "Login" })
                    .size(26.0)
                    .strong()
                    .color(colors::TEXT_LIGHT),
            );
            ui.add_space(20.0);

            if let Some(ref error) = state.auth_state.error {
                ui.label(egui::RichText::new(error).color(colors::ERROR));
                ui.add_space(10.0);
            }

            let mut submitted = false;
            if registering {
                let form = &mut state.register_form;
                let _ = field(ui, width, "Email:", &mut form.email, false);
                ui.add_space(8.0);
                let _ = field(ui, width, "Username:", &mut form.username, false);
                ui.add_space(8.0);
                let password = field(ui, width, "Password:", &mut form.password, true);
                submitted |= password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            } else {
                let form = &mut state.login_form;
                let _ = field(ui, width, "Email:", &mut form.email, false);
                ui.add_space(8.0);
                let password = field(ui, width, "Password:", &mut form.password, true);
                submitted |= password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            }

            ui.add_space(20.0);

            let loading = state.auth_state.loading;
            ui.horizontal(|ui| {
                let button_width = 140.0;
                ui.add_space(((width - button_width * 2.0 - 10.0) / 2.0).max(0.0));

                let label = if registering { "Register" } else { "Login" };
                let submit = ui.add_enabled(
                    !loading,
                    styles::primary_button(label).min_size(egui::vec2(button_width, 32.0)),
                );
                submitted |= submit.clicked();

                ui.add_space(10.0);

                let other = if registering { "Back to Login" } else { "Create Account" };
                if ui
                    .add_sized([button_width, 32.0], egui::Button::new(other))
                    .clicked()
                {
                    state.navigate(if registering { Route::Login } else { Route::Register });
                }
            });

            if submitted && !loading {
                if registering {
                    state.handle_register();
                } else {
                    state.handle_login();
                }
            }

            if state.auth_state.loading {
                ui.add_space(15.0);
                ui.horizontal(|ui| {
                    ui.add_space(((width - 100.0) / 2.0).max(0.0));
                    ui.label(egui::RichText::new("Loading...").color(colors::TEXT_LIGHT));
                    ui.spinner();
                });
            }
        });
    });
}
