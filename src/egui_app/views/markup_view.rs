use eframe::egui::{self, Color32};

use crate::shared::markup::{self, BlockKind};

fn block_size(kind: BlockKind) -> f32 {
    match kind {
        BlockKind::Heading(1) => 22.0,
        BlockKind::Heading(2) => 19.0,
        BlockKind::Heading(_) => 16.0,
        BlockKind::Paragraph | BlockKind::ListItem => 14.0,
    }
}

/// Render document markup as styled labels. Shows `fallback` in italics
/// when nothing visible is left after parsing.
pub fn render(ui: &mut egui::Ui, source: &str, color: Color32, fallback: &str) {
    let blocks: Vec<_> = markup::parse(source)
        .into_iter()
        .filter(|b| !b.text().trim().is_empty())
        .collect();

    if blocks.is_empty() {
        ui.label(egui::RichText::new(fallback).italics().color(color));
        return;
    }

    for block in &blocks {
        let size = block_size(block.kind);
        let heading = matches!(block.kind, BlockKind::Heading(_));

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            if block.kind == BlockKind::ListItem {
                ui.add_space(12.0);
                ui.label(egui::RichText::new("• ").size(size).color(color));
            }
            for span in &block.spans {
                let mut text = egui::RichText::new(span.text.as_str()).size(size).color(color);
                if span.bold || heading {
                    text = text.strong();
                }
                if span.italic {
                    text = text.italics();
                }
                ui.label(text);
            }
        });
        ui.add_space(if heading { 6.0 } else { 3.0 });
    }
}
