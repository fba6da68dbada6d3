use crate::form::OverlayForm;
use crate::overlay::{Field, HexColor, Position, TextAlign};
use eframe::egui;

/// Draw the overlay form. Returns `true` when any control changed.
pub fn form_ui(ui: &mut egui::Ui, form: &mut OverlayForm) -> bool {
    let mut changed = false;

    ui.label("Text");
    changed |= ui
        .add(egui::TextEdit::multiline(&mut form.text).desired_rows(3))
        .changed();
    ui.separator();

    egui::Grid::new("overlay_form_grid")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            for field in Field::ALL {
                ui.label(field.label());
                changed |= field_ui(ui, form, field);
                ui.end_row();
            }
        });
    changed
}

fn field_ui(ui: &mut egui::Ui, form: &mut OverlayForm, field: Field) -> bool {
    match field {
        Field::TextColor | Field::BgColor => color_ui(ui, form, field),
        Field::Position => choice_ui(
            ui,
            form,
            field,
            &Position::ALL.map(Position::as_str),
        ),
        Field::TextAlign => choice_ui(
            ui,
            form,
            field,
            &TextAlign::ALL.map(TextAlign::as_str),
        ),
        f if f.is_slider() => slider_ui(ui, form, field),
        _ => text_ui(ui, form, field),
    }
}

fn text_ui(ui: &mut egui::Ui, form: &mut OverlayForm, field: Field) -> bool {
    let mut value = form.value(field).to_string();
    let resp = ui.add(egui::TextEdit::singleline(&mut value).hint_text(field.default_value()));
    if resp.changed() {
        form.set_value(field, value);
        return true;
    }
    false
}

fn color_ui(ui: &mut egui::Ui, form: &mut OverlayForm, field: Field) -> bool {
    let current = HexColor::parse(form.value(field))
        .or_else(|| HexColor::parse(field.default_value()))
        .map(|c| c.rgb())
        .unwrap_or_default();
    let mut rgb = current;
    let mut changed = false;
    ui.horizontal(|ui| {
        if ui.color_edit_button_srgb(&mut rgb).changed() && rgb != current {
            form.set_value(field, HexColor::from_rgb(rgb).to_string());
            changed = true;
        }
        ui.label(form.value(field).to_string());
    });
    changed
}

fn choice_ui(ui: &mut egui::Ui, form: &mut OverlayForm, field: Field, options: &[&'static str]) -> bool {
    let mut selected = form.value(field).to_string();
    egui::ComboBox::from_id_source(field.key())
        .selected_text(selected.clone())
        .show_ui(ui, |ui| {
            for option in options {
                ui.selectable_value(&mut selected, option.to_string(), *option);
            }
        });
    if selected != form.value(field) {
        form.set_value(field, selected);
        return true;
    }
    false
}

fn slider_ui(ui: &mut egui::Ui, form: &mut OverlayForm, field: Field) -> bool {
    let (min, max) = match field {
        Field::BgBlur => (0, 50),
        _ => field.range().unwrap_or((0, 100)),
    };
    let mut value: i64 = form
        .value(field)
        .parse()
        .or_else(|_| field.default_value().parse())
        .unwrap_or(min);
    let mut changed = false;
    ui.horizontal(|ui| {
        let slider = egui::Slider::new(&mut value, min..=max)
            .show_value(false)
            .clamp_to_range(false);
        if ui.add(slider).changed() {
            form.set_value(field, value.to_string());
            changed = true;
        }
        ui.label(form.readout(field).unwrap_or_default().to_string());
    });
    changed
}
