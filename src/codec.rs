//! Conversion between the overlay form and shareable URL query strings.

use crate::form::OverlayForm;
use crate::overlay::{Field, OverlaySettings};
use url::{form_urlencoded, Url};

/// Query key carrying the selected sample image.
pub const SAMPLE_KEY: &str = "sample";

/// What [`decode_into`] did with each query pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Fields written into the form, in query order.
    pub applied: Vec<Field>,
    /// Sample name found in the query, if any.
    pub sample: Option<String>,
    /// Pairs that were ignored: unknown keys or values the field cannot hold.
    pub skipped: Vec<(String, String)>,
}

/// Accepts a full URL, `?a=b&c=d` or a bare `a=b&c=d` and returns the query
/// part.
pub fn query_of(input: &str) -> &str {
    let input = input.trim();
    let query = match input.find('?') {
        Some(idx) => &input[idx + 1..],
        None if input.contains("://") => "",
        None => input,
    };
    query.split('#').next().unwrap_or("")
}

/// Write every recognized and valid query value into `form`.
///
/// Never fails: anything unusable is recorded in the report and the
/// control keeps its current value. When a key repeats the last value wins.
pub fn decode_into(input: &str, form: &mut OverlayForm) -> DecodeReport {
    let mut report = DecodeReport::default();
    for (key, value) in form_urlencoded::parse(query_of(input).as_bytes()) {
        if key == SAMPLE_KEY {
            form.set_sample(value.to_string());
            report.sample = Some(value.into_owned());
            continue;
        }
        let Some(field) = Field::from_key(&key) else {
            tracing::debug!(key = %key, "ignoring unknown query key");
            report.skipped.push((key.into_owned(), value.into_owned()));
            continue;
        };
        match field.normalize(&value) {
            Some(canonical) => {
                form.set_value(field, canonical);
                report.applied.push(field);
            }
            None => {
                tracing::warn!(field = %field, value = %value, "ignoring malformed query value");
                report.skipped.push((key.into_owned(), value.into_owned()));
            }
        }
    }
    report
}

/// Query pairs for the given settings, in field order, with `sample` last.
pub fn encode_pairs(settings: &OverlaySettings, sample: Option<&str>) -> Vec<(&'static str, String)> {
    let mut pairs = settings.pairs();
    if let Some(name) = sample.filter(|s| !s.is_empty()) {
        pairs.push((SAMPLE_KEY, name.to_string()));
    }
    pairs
}

/// Build the share URL for `settings` on top of `base`. Any query or
/// fragment already on `base` is replaced.
pub fn encode_url(base: &Url, settings: &OverlaySettings, sample: Option<&str>) -> Url {
    let mut url = base.clone();
    url.set_fragment(None);
    url.set_query(None);
    url.query_pairs_mut()
        .extend_pairs(encode_pairs(settings, sample));
    url
}

/// Encode the live form: settings with defaults filled in plus the selected
/// sample.
pub fn encode_form(base: &Url, form: &OverlayForm) -> Url {
    let settings = OverlaySettings::from_form(form);
    encode_url(base, &settings, Some(form.sample()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_of_variants() {
        assert_eq!(query_of("http://h/?a=1#frag"), "a=1");
        assert_eq!(query_of("?a=1"), "a=1");
        assert_eq!(query_of("a=1&b=2"), "a=1&b=2");
        assert_eq!(query_of("http://h/"), "");
    }

    #[test]
    fn sample_is_recorded() {
        let mut form = OverlayForm::new();
        let report = decode_into("sample=beach.jpg", &mut form);
        assert_eq!(report.sample.as_deref(), Some("beach.jpg"));
        assert_eq!(form.sample(), "beach.jpg");
        assert!(report.applied.is_empty());
    }
}
