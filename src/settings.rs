//! Player preferences
//!
//! Read once at startup from the page query string
//! (`?mute&tilt=off&seed=42`). Nothing is written back.

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Visuals ===
    /// Rotate the van with its vertical velocity
    pub tilt: bool,
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (disables tilt)
    pub reduced_motion: bool,

    // === Play ===
    /// Start in demo mode
    pub autopilot: bool,
    /// Fixed session seed; random when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            tilt: true,
            show_fps: false,

            reduced_motion: false,

            autopilot: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse a query string such as `?volume=0.5&mute&seed=7`.
    ///
    /// Unknown keys and malformed values are logged and ignored, leaving the
    /// default in place. A bare key means "on".
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        let query = query.trim_start_matches('?');

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let applied = match key {
                "volume" => parse_volume(value).map(|v| settings.master_volume = v),
                "sfx" => parse_volume(value).map(|v| settings.sfx_volume = v),
                "mute" => parse_flag(value).map(|v| settings.muted = v),
                "tilt" => parse_flag(value).map(|v| settings.tilt = v),
                "fps" => parse_flag(value).map(|v| settings.show_fps = v),
                "reduced_motion" => parse_flag(value).map(|v| settings.reduced_motion = v),
                "autopilot" | "demo" => parse_flag(value).map(|v| settings.autopilot = v),
                "seed" => value.parse().ok().map(|v| settings.seed = Some(v)),
                _ => {
                    log::debug!("Ignoring unknown setting '{key}'");
                    Some(())
                }
            };
            if applied.is_none() {
                log::warn!("Ignoring bad value '{value}' for setting '{key}'");
            }
        }

        settings
    }

    /// Effective tilt (respects reduced_motion)
    pub fn effective_tilt(&self) -> bool {
        self.tilt && !self.reduced_motion
    }

    /// Gain applied to every sound cue
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn parse_volume(value: &str) -> Option<f32> {
    value
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_default() {
        assert_eq!(Settings::from_query(""), Settings::default());
        assert_eq!(Settings::from_query("?"), Settings::default());
    }

    #[test]
    fn test_query_flags_and_values() {
        let s = Settings::from_query("?mute&tilt=off&fps=1&seed=42&volume=0.25");
        assert!(s.muted);
        assert!(!s.tilt);
        assert!(s.show_fps);
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.master_volume, 0.25);
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let s = Settings::from_query("seed=abc&tilt=maybe&volume=loud&bogus=1");
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_volume_is_clamped() {
        let s = Settings::from_query("volume=3&sfx=-1");
        assert_eq!(s.master_volume, 1.0);
        assert_eq!(s.sfx_volume, 0.0);
    }

    #[test]
    fn test_reduced_motion_disables_tilt() {
        let mut s = Settings::default();
        assert!(s.effective_tilt());
        s.reduced_motion = true;
        assert!(!s.effective_tilt());
    }

    #[test]
    fn test_effective_volume() {
        let mut s = Settings::default();
        s.master_volume = 0.5;
        s.sfx_volume = 0.5;
        assert_eq!(s.effective_volume(), 0.25);
        s.muted = true;
        assert_eq!(s.effective_volume(), 0.0);
    }
}
