use overlay_panel::codec::{decode_into, encode_form, query_of};
use overlay_panel::form::OverlayForm;
use overlay_panel::overlay::{Field, OverlaySettings, Position};
use url::Url;

fn base() -> Url {
    Url::parse("http://localhost:5000/").unwrap()
}

const DEFAULT_QUERY: &str = "font_size=40&text_color=%23FFFFFF&position=center&text_align=center\
&x_offset=0&y_offset=0&bg_color=%23000000&bg_opacity=128&bg_blur=10&bg_radius=15\
&bg_padding=20&box_width_percent=80";

#[test]
fn untouched_form_encodes_all_defaults() {
    let form = OverlayForm::new();
    let url = encode_form(&base(), &form);
    assert_eq!(url.query(), Some(DEFAULT_QUERY));
    assert_eq!(url.as_str(), format!("http://localhost:5000/?{DEFAULT_QUERY}"));
}

#[test]
fn blank_controls_encode_defaults() {
    let mut form = OverlayForm::new();
    for field in Field::ALL {
        form.set_value(field, "");
    }
    form.set_value(Field::FontSize, "abc");
    let url = encode_form(&base(), &form);
    assert_eq!(url.query(), Some(DEFAULT_QUERY));
}

#[test]
fn decode_then_encode_round_trips_every_key() {
    let query = "font_name=DejaVu+Sans&font_size=72&text_color=%23ff8800&position=top-left\
&text_align=right&x_offset=-15&y_offset=30&bg_color=%23102030&bg_opacity=0&bg_blur=0\
&bg_radius=4&bg_padding=8&box_width_percent=100&sample=beach.jpg";
    let mut form = OverlayForm::new();
    let report = decode_into(query, &mut form);
    assert_eq!(report.applied.len(), 13);
    assert!(report.skipped.is_empty());

    let url = encode_form(&base(), &form);
    assert_eq!(url.query(), Some(query));
}

#[test]
fn absent_keys_decode_to_defaults() {
    let mut form = OverlayForm::new();
    decode_into("?bg_blur=3", &mut form);
    let url = encode_form(&base(), &form);
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(pairs.contains(&("bg_blur".into(), "3".into())));
    assert!(pairs.contains(&("font_size".into(), "40".into())));
    assert!(pairs.contains(&("box_width_percent".into(), "80".into())));
    assert!(!pairs.iter().any(|(k, _)| k == "font_name" || k == "sample"));
    assert_eq!(pairs.len(), 12);
}

#[test]
fn malformed_values_are_skipped() {
    let mut form = OverlayForm::new();
    let report = decode_into(
        "font_size=big&bg_opacity=300&text_color=red&position=middle&box_width_percent=0&zoom=2&x_offset=5",
        &mut form,
    );
    assert_eq!(report.applied, vec![Field::XOffset]);
    assert_eq!(report.skipped.len(), 6);
    let settings = OverlaySettings::from_form(&form);
    assert_eq!(settings.font_size, 40);
    assert_eq!(settings.bg_opacity, 128);
    assert_eq!(settings.text_color.as_str(), "#FFFFFF");
    assert_eq!(settings.position, Position::Center);
    assert_eq!(settings.box_width_percent, 80);
    assert_eq!(settings.x_offset, 5);
}

#[test]
fn decode_updates_slider_readouts() {
    let mut form = OverlayForm::new();
    decode_into("bg_opacity=200&bg_blur=4&box_width_percent=65", &mut form);
    assert_eq!(form.readout(Field::BgOpacity), Some("200"));
    assert_eq!(form.readout(Field::BgBlur), Some("4"));
    assert_eq!(form.readout(Field::BoxWidthPercent), Some("65%"));
}

#[test]
fn full_url_input_is_accepted() {
    let mut form = OverlayForm::new();
    decode_into("http://localhost:5000/?font_size=60#top", &mut form);
    assert_eq!(form.value(Field::FontSize), "60");
    assert_eq!(query_of("http://localhost:5000/?font_size=60#top"), "font_size=60");
}

#[test]
fn encode_replaces_existing_query_on_base() {
    let base = Url::parse("http://example.com/panel?old=1#frag").unwrap();
    let url = encode_form(&base, &OverlayForm::new());
    assert_eq!(url.path(), "/panel");
    assert_eq!(url.fragment(), None);
    assert!(!url.query().unwrap_or("").contains("old="));
}

#[test]
fn font_name_round_trips_verbatim() {
    for query in ["font_name=+Arial", "font_name=+", "font_name=Open+Sans+"] {
        let mut form = OverlayForm::new();
        decode_into(query, &mut form);
        let url = encode_form(&base(), &form);
        let sent: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let expected: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        assert_eq!(sent[0], expected[0], "{query}");
    }
}

#[test]
fn empty_font_name_is_omitted() {
    let mut form = OverlayForm::new();
    decode_into("font_name=", &mut form);
    let url = encode_form(&base(), &form);
    assert!(!url.query_pairs().any(|(k, _)| k == "font_name"));
}
