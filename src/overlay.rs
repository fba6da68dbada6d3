use crate::form::OverlayForm;
use serde::{Deserialize, Serialize};

/// Where the text block is anchored on the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    Top,
    Center,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Default for Position {
    fn default() -> Self {
        Position::Center
    }
}

impl Position {
    pub const ALL: [Position; 7] = [
        Position::Top,
        Position::Center,
        Position::Bottom,
        Position::TopLeft,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomRight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Position::Top => "top",
            Position::Center => "center",
            Position::Bottom => "bottom",
            Position::TopLeft => "top-left",
            Position::TopRight => "top-right",
            Position::BottomLeft => "bottom-left",
            Position::BottomRight => "bottom-right",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl Default for TextAlign {
    fn default() -> Self {
        TextAlign::Center
    }
}

impl TextAlign {
    pub const ALL: [TextAlign; 3] = [TextAlign::Left, TextAlign::Center, TextAlign::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == s)
    }
}

impl std::fmt::Display for TextAlign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `#RRGGBB` color. The spelling is kept as given so that a value read
/// from a URL is written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#')?;
        if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }

    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        Self(format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2]))
    }

    pub fn rgb(&self) -> [u8; 3] {
        let hex = &self.0[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        [channel(0), channel(2), channel(4)]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HexColor::parse(&value).ok_or_else(|| format!("'{value}' is not a #RRGGBB color"))
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One named control of the overlay form. The order of [`Field::ALL`] is the
/// order fields are written to URLs and request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    FontName,
    FontSize,
    TextColor,
    Position,
    TextAlign,
    XOffset,
    YOffset,
    BgColor,
    BgOpacity,
    BgBlur,
    BgRadius,
    BgPadding,
    BoxWidthPercent,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::FontName,
        Field::FontSize,
        Field::TextColor,
        Field::Position,
        Field::TextAlign,
        Field::XOffset,
        Field::YOffset,
        Field::BgColor,
        Field::BgOpacity,
        Field::BgBlur,
        Field::BgRadius,
        Field::BgPadding,
        Field::BoxWidthPercent,
    ];

    /// Fields rendered as sliders with a companion readout label.
    pub const SLIDERS: [Field; 3] = [Field::BgOpacity, Field::BgBlur, Field::BoxWidthPercent];

    pub fn key(self) -> &'static str {
        match self {
            Field::FontName => "font_name",
            Field::FontSize => "font_size",
            Field::TextColor => "text_color",
            Field::Position => "position",
            Field::TextAlign => "text_align",
            Field::XOffset => "x_offset",
            Field::YOffset => "y_offset",
            Field::BgColor => "bg_color",
            Field::BgOpacity => "bg_opacity",
            Field::BgBlur => "bg_blur",
            Field::BgRadius => "bg_radius",
            Field::BgPadding => "bg_padding",
            Field::BoxWidthPercent => "box_width_percent",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn default_value(self) -> &'static str {
        match self {
            Field::FontName => "",
            Field::FontSize => "40",
            Field::TextColor => "#FFFFFF",
            Field::Position => "center",
            Field::TextAlign => "center",
            Field::XOffset | Field::YOffset => "0",
            Field::BgColor => "#000000",
            Field::BgOpacity => "128",
            Field::BgBlur => "10",
            Field::BgRadius => "15",
            Field::BgPadding => "20",
            Field::BoxWidthPercent => "80",
        }
    }

    /// Human readable label used by the panel.
    pub fn label(self) -> &'static str {
        match self {
            Field::FontName => "Font",
            Field::FontSize => "Font size",
            Field::TextColor => "Text color",
            Field::Position => "Position",
            Field::TextAlign => "Text alignment",
            Field::XOffset => "X offset",
            Field::YOffset => "Y offset",
            Field::BgColor => "Box color",
            Field::BgOpacity => "Box opacity",
            Field::BgBlur => "Background blur",
            Field::BgRadius => "Corner radius",
            Field::BgPadding => "Box padding",
            Field::BoxWidthPercent => "Box width",
        }
    }

    pub fn is_slider(self) -> bool {
        Self::SLIDERS.contains(&self)
    }

    /// Inclusive bounds for integer fields.
    pub fn range(self) -> Option<(i64, i64)> {
        match self {
            Field::FontSize => Some((1, i64::from(u32::MAX))),
            Field::XOffset | Field::YOffset => Some((i64::from(i32::MIN), i64::from(i32::MAX))),
            Field::BgOpacity => Some((0, 255)),
            Field::BgBlur | Field::BgRadius | Field::BgPadding => Some((0, i64::from(u32::MAX))),
            Field::BoxWidthPercent => Some((1, 100)),
            _ => None,
        }
    }

    /// Validate a raw control value and return its canonical spelling.
    ///
    /// Integers are re-printed (`"060"` becomes `"60"`), colors and enum
    /// names are kept as given. The font name is free text and kept
    /// verbatim, surrounding whitespace included. Returns `None` for
    /// anything this field cannot hold.
    pub fn normalize(self, raw: &str) -> Option<String> {
        if self == Field::FontName {
            return Some(raw.to_string());
        }
        let raw = raw.trim();
        match self {
            Field::TextColor | Field::BgColor => HexColor::parse(raw).map(String::from),
            Field::Position => Position::parse(raw).map(|p| p.as_str().to_string()),
            Field::TextAlign => TextAlign::parse(raw).map(|a| a.as_str().to_string()),
            _ => {
                let (min, max) = self.range()?;
                let value: i64 = raw.parse().ok()?;
                (min..=max).contains(&value).then(|| value.to_string())
            }
        }
    }

    /// Text for the readout label next to a slider.
    pub fn readout(self, value: &str) -> Option<String> {
        match self {
            Field::BgOpacity | Field::BgBlur => Some(value.to_string()),
            Field::BoxWidthPercent => Some(format!("{value}%")),
            _ => None,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Fully defaulted overlay styling parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlaySettings {
    pub font_name: Option<String>,
    pub font_size: u32,
    pub text_color: HexColor,
    pub position: Position,
    pub text_align: TextAlign,
    pub x_offset: i32,
    pub y_offset: i32,
    pub bg_color: HexColor,
    pub bg_opacity: u8,
    pub bg_blur: u32,
    pub bg_radius: u32,
    pub bg_padding: u32,
    pub box_width_percent: u8,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            font_name: None,
            font_size: 40,
            text_color: HexColor("#FFFFFF".into()),
            position: Position::Center,
            text_align: TextAlign::Center,
            x_offset: 0,
            y_offset: 0,
            bg_color: HexColor("#000000".into()),
            bg_opacity: 128,
            bg_blur: 10,
            bg_radius: 15,
            bg_padding: 20,
            box_width_percent: 80,
        }
    }
}

impl OverlaySettings {
    /// Read the live form. Blank or malformed controls fall back to their
    /// default value.
    pub fn from_form(form: &OverlayForm) -> Self {
        let value = |field: Field| {
            field
                .normalize(form.value(field))
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| field.default_value().to_string())
        };
        let int = |field: Field| value(field).parse::<i64>().unwrap_or_default();
        let defaults = Self::default();

        let font_name = value(Field::FontName);
        Self {
            font_name: (!font_name.is_empty()).then_some(font_name),
            font_size: u32::try_from(int(Field::FontSize)).unwrap_or(defaults.font_size),
            text_color: HexColor::parse(&value(Field::TextColor)).unwrap_or(defaults.text_color),
            position: Position::parse(&value(Field::Position)).unwrap_or_default(),
            text_align: TextAlign::parse(&value(Field::TextAlign)).unwrap_or_default(),
            x_offset: i32::try_from(int(Field::XOffset)).unwrap_or_default(),
            y_offset: i32::try_from(int(Field::YOffset)).unwrap_or_default(),
            bg_color: HexColor::parse(&value(Field::BgColor)).unwrap_or(defaults.bg_color),
            bg_opacity: u8::try_from(int(Field::BgOpacity)).unwrap_or(defaults.bg_opacity),
            bg_blur: u32::try_from(int(Field::BgBlur)).unwrap_or(defaults.bg_blur),
            bg_radius: u32::try_from(int(Field::BgRadius)).unwrap_or(defaults.bg_radius),
            bg_padding: u32::try_from(int(Field::BgPadding)).unwrap_or(defaults.bg_padding),
            box_width_percent: u8::try_from(int(Field::BoxWidthPercent))
                .unwrap_or(defaults.box_width_percent),
        }
    }

    /// Value of a single field as it is written to URLs and request bodies.
    pub fn get(&self, field: Field) -> String {
        match field {
            Field::FontName => self.font_name.clone().unwrap_or_default(),
            Field::FontSize => self.font_size.to_string(),
            Field::TextColor => self.text_color.to_string(),
            Field::Position => self.position.to_string(),
            Field::TextAlign => self.text_align.to_string(),
            Field::XOffset => self.x_offset.to_string(),
            Field::YOffset => self.y_offset.to_string(),
            Field::BgColor => self.bg_color.to_string(),
            Field::BgOpacity => self.bg_opacity.to_string(),
            Field::BgBlur => self.bg_blur.to_string(),
            Field::BgRadius => self.bg_radius.to_string(),
            Field::BgPadding => self.bg_padding.to_string(),
            Field::BoxWidthPercent => self.box_width_percent.to_string(),
        }
    }

    /// Every field in [`Field::ALL`] order; `font_name` is left out when empty.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        Field::ALL
            .into_iter()
            .filter(|f| *f != Field::FontName || self.font_name.is_some())
            .map(|f| (f.key(), self.get(f)))
            .collect()
    }
}
