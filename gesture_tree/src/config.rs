//! Runtime configuration.
//!
//! Layers, later wins: built-in defaults, a TOML file (`--config <path>` or
//! `gesture_tree.toml` in the working directory), `GESTURE_TREE__*`
//! environment variables, then command-line flags.  Environment values are
//! merged into the TOML table before deserializing, so they are type-checked
//! exactly like file values.

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use glam::Vec2;
use serde::Deserialize;
use tracing::{info, warn};

use cloud_layout::{Cone, Shell};

use crate::camera::{CameraMode, CameraSettings};
use crate::choreography::MachineSettings;
use crate::error::AppError;
use crate::gesture::{Classifier, HAND_LANDMARKS};
use crate::scene::SceneSpec;

pub const DEFAULT_CONFIG_FILE: &str = "gesture_tree.toml";
pub const ENV_PREFIX: &str = "GESTURE_TREE__";

/// Which gesture backend drives the tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Keyboard and mouse in the visualizer window.
    #[default]
    Sim,
    /// A built-in open/close cycle.
    Scripted,
    /// LeapMotion hardware (requires the `leap` feature).
    Leap,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    // ── choreography ─────────────────────────────────────────────────────
    pub confidence_threshold: f32,
    pub debounce_frames:      u32,
    pub transition_rate:      f32,

    // ── camera ───────────────────────────────────────────────────────────
    pub camera_mode:          CameraMode,
    pub orbit_sensitivity:    f32,
    pub orbit_distance:       f32,
    pub orbit_height:         f32,
    pub orbit_height_gain:    f32,
    pub follow_gain:          f32,
    pub absolute_span:        [f32; 2],
    pub absolute_depth:       f32,

    // ── gesture input ────────────────────────────────────────────────────
    pub backend:              BackendKind,
    pub reference_landmark:   usize,
    pub sim_init_delay_ms:    u64,

    // ── scene ────────────────────────────────────────────────────────────
    pub foliage_count:        usize,
    pub gift_box_count:       usize,
    pub gloss_orb_count:      usize,
    pub matte_orb_count:      usize,
    pub light_count:          usize,
    pub dust_count:           usize,
    pub gift_count:           usize,
    pub floor_dust_count:     usize,
    pub photo_count:          usize,
    pub chaos_min_radius:     f32,
    pub chaos_max_radius:     f32,
    pub tree_radius:          f32,
    pub tree_height:          f32,
    pub seed:                 Option<u64>,

    // ── window ───────────────────────────────────────────────────────────
    pub window_width:         usize,
    pub window_height:        usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            confidence_threshold: 0.6,
            debounce_frames:      1,
            transition_rate:      2.0,

            camera_mode:          CameraMode::Orbit,
            orbit_sensitivity:    5.0,
            orbit_distance:       20.0,
            orbit_height:         0.0,
            orbit_height_gain:    0.1,
            follow_gain:          0.05,
            absolute_span:        [30.0, 20.0],
            absolute_depth:       25.0,

            backend:              BackendKind::Sim,
            reference_landmark:   0,
            sim_init_delay_ms:    800,

            foliage_count:        8000,
            gift_box_count:       12,
            gloss_orb_count:      15,
            matte_orb_count:      10,
            light_count:          120,
            dust_count:           600,
            gift_count:           12,
            floor_dust_count:     200,
            photo_count:          9,
            chaos_min_radius:     15.0,
            chaos_max_radius:     20.0,
            tree_radius:          5.0,
            tree_height:          12.0,
            seed:                 None,

            window_width:         960,
            window_height:        720,
        }
    }
}

impl Settings {
    /// Load defaults, then the config file, then environment overrides.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let mut table = match path {
            Some(p) => read_table(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                read_table(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => {
                info!("no config file, using defaults");
                toml::Table::new()
            }
        };
        apply_env(&mut table, std::env::vars());
        Settings::from_table(table)
    }

    /// Deserialize and validate a merged table.
    pub fn from_table(table: toml::Table) -> Result<Self, AppError> {
        let settings: Settings = toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| AppError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let bad = |msg: String| Err(AppError::Config(msg));
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return bad(format!("confidence_threshold {} outside [0, 1]", self.confidence_threshold));
        }
        if !(self.transition_rate.is_finite() && self.transition_rate > 0.0) {
            return bad(format!("transition_rate must be positive, got {}", self.transition_rate));
        }
        for (name, gain) in [
            ("orbit_height_gain", self.orbit_height_gain),
            ("follow_gain", self.follow_gain),
        ] {
            if !(0.0..=1.0).contains(&gain) {
                return bad(format!("{} {} outside [0, 1]", name, gain));
            }
        }
        if !(self.chaos_min_radius >= 0.0 && self.chaos_min_radius <= self.chaos_max_radius) {
            return bad(format!(
                "chaos radii {}..{} are not an increasing range",
                self.chaos_min_radius, self.chaos_max_radius
            ));
        }
        if !(self.tree_radius > 0.0 && self.tree_height > 0.0) {
            return bad(format!("tree {}×{} must have positive size", self.tree_radius, self.tree_height));
        }
        if self.reference_landmark >= HAND_LANDMARKS {
            return bad(format!(
                "reference_landmark {} outside 0..{}",
                self.reference_landmark, HAND_LANDMARKS
            ));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return bad("window size must be non-zero".into());
        }
        Ok(())
    }

    pub fn machine(&self) -> MachineSettings {
        MachineSettings {
            threshold:       self.confidence_threshold,
            rate:            self.transition_rate,
            debounce_frames: self.debounce_frames,
        }
    }

    pub fn camera(&self) -> CameraSettings {
        CameraSettings {
            mode:        self.camera_mode,
            sensitivity: self.orbit_sensitivity,
            distance:    self.orbit_distance,
            height:      self.orbit_height,
            height_gain: self.orbit_height_gain,
            follow_gain: self.follow_gain,
            span:        Vec2::from_array(self.absolute_span),
            depth:       self.absolute_depth,
        }
    }

    pub fn classifier(&self) -> Classifier {
        Classifier { reference_landmark: self.reference_landmark, ..Default::default() }
    }

    pub fn scene(&self) -> SceneSpec {
        let mut spec = SceneSpec {
            chaos:            Shell::new(self.chaos_min_radius, self.chaos_max_radius),
            tree:             Cone::new(self.tree_radius, self.tree_height),
            foliage_count:    self.foliage_count,
            gift_count:       self.gift_count,
            floor_dust_count: self.floor_dust_count,
            photo_count:      self.photo_count,
            ..SceneSpec::default()
        };
        let counts = [
            self.gift_box_count,
            self.gloss_orb_count,
            self.matte_orb_count,
            self.light_count,
            self.dust_count,
        ];
        for (o, n) in spec.ornaments.iter_mut().zip(counts) {
            o.count = n;
        }
        spec
    }
}

fn read_table(path: &Path) -> Result<toml::Table, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
    let table = raw
        .parse::<toml::Table>()
        .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
    info!(path = %path.display(), "loaded config file");
    Ok(table)
}

/// Merge `GESTURE_TREE__<KEY>=<value>` pairs into `table` as `<key>`.
///
/// Values are typed by shape: integer, float, bool, comma-separated floats,
/// otherwise string.
pub fn apply_env<I>(table: &mut toml::Table, vars: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    for (key, value) in vars {
        let Some(name) = key.strip_prefix(ENV_PREFIX) else { continue };
        let name = name.to_ascii_lowercase();
        if name.is_empty() {
            warn!(%key, "ignoring empty config override");
            continue;
        }
        info!(key = %name, "config override from environment");
        table.insert(name, env_value(value.trim()));
    }
}

fn env_value(raw: &str) -> toml::Value {
    if let Ok(i) = raw.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return toml::Value::Float(f);
    }
    if let Ok(b) = raw.parse::<bool>() {
        return toml::Value::Boolean(b);
    }
    if raw.contains(',') {
        let parts: Result<Vec<f64>, _> = raw.split(',').map(|p| p.trim().parse::<f64>()).collect();
        if let Ok(parts) = parts {
            return toml::Value::Array(parts.into_iter().map(toml::Value::Float).collect());
        }
    }
    toml::Value::String(raw.to_string())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn empty_table_is_default() {
        assert_eq!(Settings::from_table(toml::Table::new()).unwrap(), Settings::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let table: toml::Table = r#"
            confidence_threshold = 0.75
            camera_mode = "absolute"
            backend = "scripted"
            absolute_span = [40.0, 10.0]
            seed = 42
        "#.parse().unwrap();
        let s = Settings::from_table(table).unwrap();
        assert_eq!(s.confidence_threshold, 0.75);
        assert_eq!(s.camera_mode, CameraMode::Absolute);
        assert_eq!(s.backend, BackendKind::Scripted);
        assert_eq!(s.absolute_span, [40.0, 10.0]);
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.foliage_count, 8000);
    }

    #[test]
    fn env_overrides_file() {
        let mut table: toml::Table = "transition_rate = 3.0\nfoliage_count = 100".parse().unwrap();
        apply_env(&mut table, vars(&[
            ("GESTURE_TREE__TRANSITION_RATE", "4"),
            ("GESTURE_TREE__CAMERA_MODE", "combined"),
            ("GESTURE_TREE__ABSOLUTE_SPAN", "12, 8"),
            ("HOME", "/root"),
        ]));
        let s = Settings::from_table(table).unwrap();
        assert_eq!(s.transition_rate, 4.0);
        assert_eq!(s.camera_mode, CameraMode::Combined);
        assert_eq!(s.absolute_span, [12.0, 8.0]);
        assert_eq!(s.foliage_count, 100);
    }

    #[test]
    fn unknown_key_rejected() {
        let mut table = toml::Table::new();
        apply_env(&mut table, vars(&[("GESTURE_TREE__NOT_A_KEY", "1")]));
        assert!(matches!(Settings::from_table(table), Err(AppError::Config(_))));
    }

    #[test]
    fn wrong_type_rejected() {
        let table: toml::Table = "debounce_frames = \"lots\"".parse().unwrap();
        assert!(matches!(Settings::from_table(table), Err(AppError::Config(_))));
    }

    #[test]
    fn validation_catches_bad_threshold() {
        let table: toml::Table = "confidence_threshold = 1.5".parse().unwrap();
        let err = Settings::from_table(table).unwrap_err();
        assert!(err.to_string().contains("confidence_threshold"));
    }

    #[test]
    fn reference_landmark_must_exist() {
        let table: toml::Table = "reference_landmark = 21".parse().unwrap();
        let err = Settings::from_table(table).unwrap_err();
        assert!(err.to_string().contains("reference_landmark"));
        let table: toml::Table = "reference_landmark = 20".parse().unwrap();
        assert_eq!(Settings::from_table(table).unwrap().reference_landmark, 20);
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/gesture_tree.toml"))).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn derived_settings_follow_fields() {
        let s = Settings { gloss_orb_count: 3, reference_landmark: 9, ..Default::default() };
        assert_eq!(s.machine(), MachineSettings::default());
        assert_eq!(s.camera(), CameraSettings::default());
        assert_eq!(s.classifier().reference_landmark, 9);
        let scene = s.scene();
        assert_eq!(scene.ornaments[1].count, 3);
        assert_eq!(scene.ornaments[4].count, 600);
    }
}
