//! Project schema definitions.

use serde::{Deserialize, Serialize};

/// Reserved entry name that implies designator `'T'` when none is given.
///
/// Kept for compatibility with old configs where the hotend fader was the
/// only instance and carried no explicit designator.
pub const LEGACY_HOTEND_NAME: &str = "hotend";

/// Designator implied by [`LEGACY_HOTEND_NAME`].
pub const LEGACY_HOTEND_DESIGNATOR: char = 'T';

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub faders: Vec<FaderDef>,
}

/// Raw configuration for one fader instance.
///
/// Field defaults match the firmware this format descends from: a 50–150 °C
/// fade band mapped onto the full 0–255 duty range, slow polling while idle
/// (15 s) or fully on (60 s), fast polling (1 s) while fading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FaderDef {
    /// Entry name, unique within the project.
    pub name: String,

    /// Disabled entries are ignored entirely.
    #[serde(default)]
    pub enable: bool,

    /// Designator tag selecting which temperature sources to monitor.
    /// Only the first character is significant.
    #[serde(default)]
    pub designator: String,

    /// Name of the switch output to drive.
    #[serde(default)]
    pub switch: String,

    /// Deprecated alias for `switch`, consulted only when `switch` is empty.
    #[serde(default)]
    pub device: String,

    /// Lower bound of the fade band (°C). At or below: output idles.
    #[serde(default = "default_min_fade_temp")]
    pub min_fade_temp: f64,

    /// Upper bound of the fade band (°C). At or above: output at maximum.
    #[serde(default = "default_max_fade_temp")]
    pub max_fade_temp: f64,

    /// Duty value dispatched while idle.
    #[serde(default = "default_min_fade_pwm")]
    pub min_fade_pwm: u8,

    /// Duty value dispatched while fully on.
    #[serde(default = "default_max_fade_pwm")]
    pub max_fade_pwm: u8,

    /// Poll interval (ticks) while idle below the band.
    #[serde(default = "default_heatup_poll")]
    pub heatup_poll: u32,

    /// Poll interval (ticks) while fully on above the band.
    #[serde(default = "default_cooldown_poll")]
    pub cooldown_poll: u32,

    /// Poll interval (ticks) while inside the band.
    #[serde(default = "default_fading_poll")]
    pub fading_poll: u32,
}

impl FaderDef {
    /// Resolve the effective designator for this entry.
    ///
    /// The explicit `designator` field wins; an empty field falls back to the
    /// legacy hotend default when the entry carries the reserved name.
    /// `None` means the entry is invalid and produces no fader.
    pub fn resolved_designator(&self) -> Option<char> {
        if let Some(c) = self.designator.chars().next() {
            return Some(c);
        }
        if self.name == LEGACY_HOTEND_NAME {
            return Some(LEGACY_HOTEND_DESIGNATOR);
        }
        None
    }

    /// Resolve the effective switch name, honoring the deprecated `device`
    /// alias. `None` means no switch is configured.
    pub fn resolved_switch(&self) -> Option<&str> {
        if !self.switch.is_empty() {
            return Some(&self.switch);
        }
        if !self.device.is_empty() {
            return Some(&self.device);
        }
        None
    }
}

fn default_min_fade_temp() -> f64 {
    50.0
}

fn default_max_fade_temp() -> f64 {
    150.0
}

fn default_min_fade_pwm() -> u8 {
    0
}

fn default_max_fade_pwm() -> u8 {
    255
}

fn default_heatup_poll() -> u32 {
    15
}

fn default_cooldown_poll() -> u32 {
    60
}

fn default_fading_poll() -> u32 {
    1
}
