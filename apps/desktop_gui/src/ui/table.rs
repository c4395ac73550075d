//! Grid table rendering: sortable headers, a per-column filter row, and
//! the record rows themselves. All state lives in the `GridModel`; this
//! module only draws it and forwards widget interactions.

use eframe::egui;
use shared::domain::field_text;
use shared::schema::ColumnKind;

use crate::controller::reducer::{GridModel, NumericOp, SortOrder, SortState};

const MIN_COLUMN_WIDTH: f32 = 110.0;

/// Render the toolbar (reset + row counts) and the grid itself. The model
/// is mutated in place as header and filter widgets fire.
pub fn show_grid(ui: &mut egui::Ui, id_salt: &str, model: &mut GridModel) {
    show_toolbar(ui, model);
    ui.add_space(6.0);

    egui::ScrollArea::both()
        .id_salt(id_salt)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new((id_salt, "records_grid"))
                .striped(true)
                .min_col_width(MIN_COLUMN_WIDTH)
                .show(ui, |ui| {
                    show_header_row(ui, model);
                    show_filter_row(ui, model);
                    show_record_rows(ui, model);
                });
        });
}

fn show_toolbar(ui: &mut egui::Ui, model: &mut GridModel) {
    ui.horizontal(|ui| {
        let reset = ui.add_enabled(!model.is_pristine(), egui::Button::new("Reset table"));
        if reset.on_hover_text("Restore the unfiltered, unsorted full set").clicked() {
            model.reset();
        }
        ui.label(format!(
            "{} of {} rows",
            model.visible_len(),
            model.total_rows()
        ));
    });
}

fn show_header_row(ui: &mut egui::Ui, model: &mut GridModel) {
    let columns = model.columns();
    for (index, column) in columns.iter().enumerate() {
        let marker = match model.sort() {
            Some(SortState {
                column: sorted,
                order,
            }) if sorted == index => match order {
                SortOrder::Ascending => " \u{25b2}",
                SortOrder::Descending => " \u{25bc}",
            },
            _ => "",
        };
        let label = egui::RichText::new(format!("{}{marker}", column.label)).strong();
        if ui.button(label).clicked() {
            model.toggle_sort(index);
        }
    }
    ui.end_row();
}

fn show_filter_row(ui: &mut egui::Ui, model: &mut GridModel) {
    let columns = model.columns();
    for (index, column) in columns.iter().enumerate() {
        ui.vertical(|ui| {
            match column.kind {
                ColumnKind::Text => {
                    let draft = model.draft_mut(index);
                    ui.add(
                        egui::TextEdit::singleline(&mut draft.text)
                            .hint_text("contains...")
                            .desired_width(MIN_COLUMN_WIDTH - 8.0),
                    );
                }
                ColumnKind::Numeric => {
                    let draft = model.draft_mut(index);
                    egui::ComboBox::from_id_salt((column.field, "filter_op"))
                        .selected_text(draft.op.label())
                        .width(MIN_COLUMN_WIDTH - 8.0)
                        .show_ui(ui, |ui| {
                            for op in NumericOp::ALL {
                                ui.selectable_value(&mut draft.op, op, op.label());
                            }
                        });
                    ui.add(
                        egui::TextEdit::singleline(&mut draft.low)
                            .hint_text(match draft.op {
                                NumericOp::InRange => "from",
                                _ => "value",
                            })
                            .desired_width(MIN_COLUMN_WIDTH - 8.0),
                    );
                    if draft.op == NumericOp::InRange {
                        ui.add(
                            egui::TextEdit::singleline(&mut draft.high)
                                .hint_text("to")
                                .desired_width(MIN_COLUMN_WIDTH - 8.0),
                        );
                    }
                }
            }
            ui.horizontal(|ui| {
                if ui.small_button("Apply").clicked() {
                    model.apply_draft(index);
                }
                if ui.small_button("Clear").clicked() {
                    model.clear_filter(index);
                }
            });
        });
    }
    ui.end_row();
}

fn show_record_rows(ui: &mut egui::Ui, model: &GridModel) {
    let columns = model.columns();
    for record in model.visible_rows() {
        for column in columns {
            ui.label(field_text(record, column.field));
        }
        ui.end_row();
    }
}
