use serde::{Deserialize, Serialize};

/// Light/dark presentation of a page. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Light,
    Dark,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Class applied to the page root.
    pub fn class(self) -> &'static str {
        match self {
            Self::Light => "",
            Self::Dark => "dark",
        }
    }

    /// Glyph for the toggle button: shows where a click will take you.
    pub fn toggle_glyph(self) -> &'static str {
        match self {
            Self::Light => "☾",
            Self::Dark => "☀",
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "Switch to dark mode",
            Self::Dark => "Switch to light mode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips() {
        let mut mode = ViewMode::Light;
        mode = mode.toggled();
        assert_eq!(mode, ViewMode::Dark);
        assert_eq!(mode.class(), "dark");
        mode = mode.toggled();
        assert_eq!(mode, ViewMode::Light);
        assert_eq!(mode.class(), "");
    }

    #[test]
    fn test_even_toggles_restore_class() {
        for start in [ViewMode::Light, ViewMode::Dark] {
            for n in [2, 4, 10] {
                let mut mode = start;
                for _ in 0..n {
                    mode = mode.toggled();
                }
                assert_eq!(mode, start);
                assert_eq!(mode.class(), start.class());
            }
            assert_eq!(start.toggled().toggled(), start);
            assert_ne!(start.toggled(), start);
        }
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(ViewMode::Dark.toggle_glyph(), "☀");
        assert_eq!(ViewMode::Light.toggle_glyph(), "☾");
        assert_eq!(ViewMode::default(), ViewMode::Light);
    }
}
