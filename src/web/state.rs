//! Shared state of the simulated lightbulb.
//!
//! A single state object exists for the lifetime of the process and is
//! shared by every request handler. Last write wins.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::settings::Settings;

/// One of the writable numeric attributes of the bulb, addressed by a
/// request path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightField {
    Brightness,
    Hue,
    Saturation,
    ColorTemperature,
}

impl LightField {
    /// Returns a human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            LightField::Brightness => "Brightness",
            LightField::Hue => "Hue",
            LightField::Saturation => "Saturation",
            LightField::ColorTemperature => "Color Temperature",
        }
    }
}

impl std::str::FromStr for LightField {
    type Err = String;

    // Path segments are matched verbatim: accessory drivers send lowercase
    // field names and anything else must fall through to a 404.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brightness" => Ok(LightField::Brightness),
            "hue" => Ok(LightField::Hue),
            "saturation" => Ok(LightField::Saturation),
            "colortemperature" => Ok(LightField::ColorTemperature),
            _ => Err(format!("Unknown light field '{}'", s)),
        }
    }
}

/// Internal mutable state.
#[derive(Debug)]
struct LightStateInner {
    on: bool,
    brightness: i64,
    hue: i64,
    saturation: i64,
    color_temperature: i64,
}

/// Shared lightbulb state.
///
/// Cloning returns another handle to the same underlying state, so it can
/// be handed both to the router and to whoever seeded it.
#[derive(Debug, Clone)]
pub struct LightState {
    inner: Arc<RwLock<LightStateInner>>,
}

impl Default for LightState {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl LightState {
    /// Create the device state with the initial values from `settings`.
    pub fn new(settings: &Settings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(LightStateInner {
                on: settings.on,
                brightness: settings.brightness,
                hue: settings.hue,
                saturation: settings.saturation,
                color_temperature: settings.color_temperature,
            })),
        }
    }

    /// Check whether the bulb is on.
    pub fn is_on(&self) -> bool {
        self.inner.read().on
    }

    /// Set the power state.
    pub fn set_on(&self, on: bool) {
        self.inner.write().on = on;
    }

    /// Get the current value of a numeric field.
    pub fn get(&self, field: LightField) -> i64 {
        let inner = self.inner.read();
        match field {
            LightField::Brightness => inner.brightness,
            LightField::Hue => inner.hue,
            LightField::Saturation => inner.saturation,
            LightField::ColorTemperature => inner.color_temperature,
        }
    }

    /// Assign a numeric field. Values are not range-checked: the simulated
    /// device accepts whatever the driver sends, negatives included.
    pub fn set(&self, field: LightField, value: i64) {
        let mut inner = self.inner.write();
        match field {
            LightField::Brightness => inner.brightness = value,
            LightField::Hue => inner.hue = value,
            LightField::Saturation => inner.saturation = value,
            LightField::ColorTemperature => inner.color_temperature = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = LightState::default();
        assert!(!state.is_on());
        assert_eq!(state.get(LightField::Brightness), 100);
        assert_eq!(state.get(LightField::Hue), 0);
        assert_eq!(state.get(LightField::Saturation), 100);
        assert_eq!(state.get(LightField::ColorTemperature), 140);
    }

    #[test]
    fn test_set_and_get() {
        let state = LightState::default();
        state.set(LightField::Hue, 270);
        assert_eq!(state.get(LightField::Hue), 270);
        state.set(LightField::Brightness, -10);
        assert_eq!(state.get(LightField::Brightness), -10);
    }

    #[test]
    fn test_power_state() {
        let state = LightState::default();
        state.set_on(true);
        assert!(state.is_on());
        state.set_on(false);
        assert!(!state.is_on());
    }

    #[test]
    fn test_shared_handles() {
        let state = LightState::default();
        let other = state.clone();
        other.set(LightField::Saturation, 50);
        assert_eq!(state.get(LightField::Saturation), 50);
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!(
            "brightness".parse::<LightField>().unwrap(),
            LightField::Brightness
        );
        assert_eq!(
            "colortemperature".parse::<LightField>().unwrap(),
            LightField::ColorTemperature
        );
        assert!("Brightness".parse::<LightField>().is_err());
        assert!("colorTemperature".parse::<LightField>().is_err());
        assert!("power".parse::<LightField>().is_err());
    }

    #[test]
    fn test_field_display_names() {
        assert_eq!(
            LightField::ColorTemperature.display_name(),
            "Color Temperature"
        );
        assert_eq!(LightField::Brightness.display_name(), "Brightness");
    }

    #[test]
    fn test_seeded_state() {
        let settings = Settings {
            on: true,
            brightness: 42,
            ..Settings::default()
        };
        let state = LightState::new(&settings);
        assert!(state.is_on());
        assert_eq!(state.get(LightField::Brightness), 42);
    }
}
