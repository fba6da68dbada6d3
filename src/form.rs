use crate::overlay::Field;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_TEXT: &str = "Sample Text";

/// In-memory model of the overlay form.
///
/// Controls hold raw strings, exactly like input elements do, so a blank or
/// half-typed value is representable. Typed settings are derived from it with
/// [`crate::overlay::OverlaySettings::from_form`].
#[derive(Debug, Clone)]
pub struct OverlayForm {
    values: BTreeMap<Field, String>,
    readouts: BTreeMap<Field, String>,
    pub text: String,
    sample: String,
    upload: Option<PathBuf>,
}

impl Default for OverlayForm {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayForm {
    /// A form with every control at its built-in default.
    pub fn new() -> Self {
        let mut form = Self {
            values: BTreeMap::new(),
            readouts: BTreeMap::new(),
            text: DEFAULT_TEXT.to_string(),
            sample: String::new(),
            upload: None,
        };
        for field in Field::ALL {
            form.set_value(field, field.default_value());
        }
        form
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Write a control. Slider fields keep their readout label in sync.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        if let Some(readout) = field.readout(&value) {
            self.readouts.insert(field, readout);
        }
        self.values.insert(field, value);
    }

    pub fn readout(&self, field: Field) -> Option<&str> {
        self.readouts.get(&field).map(String::as_str)
    }

    /// Value of the hidden selected-sample field; empty when none.
    pub fn sample(&self) -> &str {
        &self.sample
    }

    pub fn set_sample(&mut self, name: impl Into<String>) {
        self.sample = name.into();
    }

    pub fn clear_sample(&mut self) {
        self.sample.clear();
    }

    pub fn upload(&self) -> Option<&Path> {
        self.upload.as_deref()
    }

    pub fn set_upload(&mut self, path: PathBuf) {
        self.upload = Some(path);
    }

    pub fn clear_upload(&mut self) {
        self.upload = None;
    }
}
