//! Conversion settings sent along with an upload.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

const STORAGE_KEY: &str = "ep_conversion_settings";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StitchType {
    #[default]
    Normal,
    Satin,
    Fill,
    Running,
}

impl StitchType {
    pub const ALL: [StitchType; 4] = [
        StitchType::Normal,
        StitchType::Satin,
        StitchType::Fill,
        StitchType::Running,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StitchType::Normal => "normal",
            StitchType::Satin => "satin",
            StitchType::Fill => "fill",
            StitchType::Running => "running",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StitchType::Normal => "Normal",
            StitchType::Satin => "Satin",
            StitchType::Fill => "Fill",
            StitchType::Running => "Running",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Monochrome,
    Color,
}

impl ColorMode {
    pub const ALL: [ColorMode; 2] = [ColorMode::Monochrome, ColorMode::Color];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Monochrome => "monochrome",
            ColorMode::Color => "color",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorMode::Monochrome => "Monochrome",
            ColorMode::Color => "Color",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

/// Inclusive slider range with a fixed step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn contains(&self, v: f64) -> bool {
        v.is_finite() && v >= self.min && v <= self.max
    }

    /// Snap to the nearest step, then clamp. Non-finite input falls back to `min`.
    pub fn snap(&self, v: f64) -> f64 {
        if !v.is_finite() {
            return self.min;
        }
        let steps = ((v - self.min) / self.step).round();
        (self.min + steps * self.step).max(self.min).min(self.max)
    }
}

pub const STITCH_DENSITY: Range = Range::new(1.0, 10.0, 0.5);
pub const STROKE_DEPTH: Range = Range::new(1.0, 5.0, 0.5);
pub const VECTOR_QUALITY: Range = Range::new(1.0, 5.0, 0.5);
pub const PATH_SIMPLIFICATION: Range = Range::new(1.0, 5.0, 0.5);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversionSettings {
    /// Sparse (1) to dense (10).
    pub stitch_density: f64,
    pub stitch_type: StitchType,
    /// Shallow (1) to deep (5).
    pub stroke_depth: f64,
    pub color_mode: ColorMode,
    /// Fast (1) to detailed (5).
    pub vector_quality: f64,
    /// Simple (1) to complex (5).
    pub path_simplification: f64,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            stitch_density: 2.0,
            stitch_type: StitchType::Normal,
            stroke_depth: 1.0,
            color_mode: ColorMode::Monochrome,
            vector_quality: 2.0,
            path_simplification: 2.0,
        }
    }
}

impl ConversionSettings {
    pub fn validate(&self) -> Result<(), AppError> {
        let checks = [
            ("stitch_density", self.stitch_density, STITCH_DENSITY),
            ("stroke_depth", self.stroke_depth, STROKE_DEPTH),
            ("vector_quality", self.vector_quality, VECTOR_QUALITY),
            ("path_simplification", self.path_simplification, PATH_SIMPLIFICATION),
        ];
        for (field, value, range) in checks {
            if !range.contains(value) {
                return Err(AppError::InvalidSetting {
                    field,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn with_stitch_density(mut self, v: f64) -> Self {
        self.stitch_density = STITCH_DENSITY.snap(v);
        self
    }

    pub fn with_stroke_depth(mut self, v: f64) -> Self {
        self.stroke_depth = STROKE_DEPTH.snap(v);
        self
    }

    pub fn with_vector_quality(mut self, v: f64) -> Self {
        self.vector_quality = VECTOR_QUALITY.snap(v);
        self
    }

    pub fn with_path_simplification(mut self, v: f64) -> Self {
        self.path_simplification = PATH_SIMPLIFICATION.snap(v);
        self
    }

    pub fn with_stitch_type(mut self, t: StitchType) -> Self {
        self.stitch_type = t;
        self
    }

    pub fn with_color_mode(mut self, m: ColorMode) -> Self {
        self.color_mode = m;
        self
    }

    /// Multipart field names and values the upload endpoint expects.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("stitch_density", self.stitch_density.to_string()),
            ("stitch_type", self.stitch_type.as_str().to_string()),
            ("stroke_depth", self.stroke_depth.to_string()),
            ("color_mode", self.color_mode.as_str().to_string()),
            ("vector_quality", self.vector_quality.to_string()),
            ("path_simplification", self.path_simplification.to_string()),
        ]
    }

    /// Parse persisted settings; anything unreadable or out of range yields the defaults.
    pub fn from_json_or_default(raw: &str) -> Self {
        match serde_json::from_str::<ConversionSettings>(raw) {
            Ok(s) if s.validate().is_ok() => s,
            Ok(s) => {
                log::warn!("discarding out-of-range stored settings: {:?}", s);
                Self::default()
            }
            Err(e) => {
                log::warn!("discarding unreadable stored settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn load() -> Self {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(Some(raw)) = store.get_item(STORAGE_KEY) {
                    return Self::from_json_or_default(&raw);
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) -> Result<(), AppError> {
        let store = web_sys::window()
            .ok_or_else(|| AppError::Dom("no window".into()))?
            .local_storage()?
            .ok_or_else(|| AppError::Dom("localStorage unavailable".into()))?;
        store.set_item(STORAGE_KEY, &serde_json::to_string(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ConversionSettings::default().validate().is_ok());
    }

    #[test]
    fn validate_names_offending_field() {
        let s = ConversionSettings {
            stroke_depth: 9.0,
            ..ConversionSettings::default()
        };
        assert_eq!(
            s.validate(),
            Err(AppError::InvalidSetting {
                field: "stroke_depth",
                value: "9".into()
            })
        );
        let s = ConversionSettings {
            vector_quality: f64::NAN,
            ..ConversionSettings::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn setters_snap_and_clamp() {
        let s = ConversionSettings::default()
            .with_stitch_density(3.3)
            .with_stroke_depth(12.0)
            .with_vector_quality(-4.0)
            .with_path_simplification(2.76);
        assert_eq!(s.stitch_density, 3.5);
        assert_eq!(s.stroke_depth, 5.0);
        assert_eq!(s.vector_quality, 1.0);
        assert_eq!(s.path_simplification, 3.0);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn form_fields_use_backend_names() {
        let s = ConversionSettings::default()
            .with_stitch_type(StitchType::Satin)
            .with_color_mode(ColorMode::Color)
            .with_stitch_density(4.5);
        let fields = s.form_fields();
        assert_eq!(
            fields,
            vec![
                ("stitch_density", "4.5".to_string()),
                ("stitch_type", "satin".to_string()),
                ("stroke_depth", "1".to_string()),
                ("color_mode", "color".to_string()),
                ("vector_quality", "2".to_string()),
                ("path_simplification", "2".to_string()),
            ]
        );
    }

    #[test]
    fn enums_round_trip_their_wire_names() {
        for t in StitchType::ALL {
            assert_eq!(StitchType::parse(t.as_str()), Some(t));
        }
        for m in ColorMode::ALL {
            assert_eq!(ColorMode::parse(m.as_str()), Some(m));
        }
        assert_eq!(StitchType::parse("zigzag"), None);
        let json = serde_json::to_string(&ConversionSettings::default()).unwrap();
        assert!(json.contains("\"stitch_type\":\"normal\""));
        assert!(json.contains("\"color_mode\":\"monochrome\""));
    }

    #[test]
    fn stored_settings_fall_back_to_defaults() {
        assert_eq!(
            ConversionSettings::from_json_or_default("not json"),
            ConversionSettings::default()
        );
        let out_of_range = r#"{"stitch_density":99,"stitch_type":"fill","stroke_depth":1,"color_mode":"color","vector_quality":2,"path_simplification":2}"#;
        assert_eq!(
            ConversionSettings::from_json_or_default(out_of_range),
            ConversionSettings::default()
        );
        let good = r#"{"stitch_density":6,"stitch_type":"fill","stroke_depth":1.5,"color_mode":"color","vector_quality":2,"path_simplification":2}"#;
        let s = ConversionSettings::from_json_or_default(good);
        assert_eq!(s.stitch_type, StitchType::Fill);
        assert_eq!(s.stitch_density, 6.0);
    }
}
