//! Media Preferences
//!
//! User preference media features as the host platform reports them.
//! `matches` answers `matchMedia(query).matches` for `prefers-reduced-motion`;
//! every other feature reports no match.

/// Combined media preferences
#[derive(Debug, Clone, Default)]
pub struct MediaPreferences {
    /// prefers-reduced-motion
    pub reduced_motion: bool,
}

impl MediaPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a media query matches
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_ascii_lowercase();
        match parse_feature(&query) {
            Some(("prefers-reduced-motion", "reduce")) => self.reduced_motion,
            Some(("prefers-reduced-motion", "no-preference")) => !self.reduced_motion,
            _ => false,
        }
    }

    /// Set reduced motion
    pub fn set_reduced_motion(&mut self, reduce: bool) {
        self.reduced_motion = reduce;
    }
}

/// Split `(feature: value)` into its parts
fn parse_feature(query: &str) -> Option<(&str, &str)> {
    let inner = query.trim().strip_prefix('(')?.strip_suffix(')')?;
    let (feature, value) = inner.split_once(':')?;
    Some((feature.trim(), value.trim()))
}
