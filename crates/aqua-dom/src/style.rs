//! Inline style declarations
//!
//! The `style` attribute as an ordered property map. Setting an empty value
//! removes the declaration, matching `element.style.foo = ""`.

/// Property names the interaction layer writes
pub mod property {
    pub const ANIMATION: &str = "animation";
    pub const ANIMATION_DURATION: &str = "animation-duration";
    pub const ANIMATION_ITERATION_COUNT: &str = "animation-iteration-count";
    pub const TRANSITION: &str = "transition";
    pub const TRANSFORM: &str = "transform";
    pub const POSITION: &str = "position";
    pub const OVERFLOW: &str = "overflow";
    pub const LEFT: &str = "left";
    pub const TOP: &str = "top";
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
    pub const BACKGROUND: &str = "background";
    pub const DISPLAY: &str = "display";
}

/// Inline style declaration block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `prop: value; prop: value`
    pub fn parse(css_text: &str) -> Self {
        let mut style = Self::new();
        for decl in css_text.split(';') {
            if let Some((name, value)) = decl.split_once(':') {
                style.set_property(name.trim(), value.trim());
            }
        }
        style
    }

    pub fn get_property(&self, name: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a property; an empty value removes it
    pub fn set_property(&mut self, name: &str, value: &str) {
        if value.is_empty() {
            self.remove_property(name);
            return;
        }
        let name = name.to_ascii_lowercase();
        match self.declarations.iter_mut().find(|(n, _)| *n == name) {
            Some(decl) => decl.1 = value.to_string(),
            None => self.declarations.push((name, value.to_string())),
        }
    }

    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        let pos = self.declarations.iter().position(|(n, _)| n == name)?;
        Some(self.declarations.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Serialized declaration block
    pub fn css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(n, v)| format!("{n}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear() {
        let mut style = InlineStyle::new();
        style.set_property(property::ANIMATION_DURATION, "600ms");
        assert_eq!(style.get_property("animation-duration"), Some("600ms"));

        style.set_property(property::ANIMATION_DURATION, "");
        assert!(style.is_empty());
    }

    #[test]
    fn test_parse_css_text() {
        let style = InlineStyle::parse("position: relative; overflow:hidden;");
        assert_eq!(style.len(), 2);
        assert_eq!(style.get_property("overflow"), Some("hidden"));
        assert_eq!(style.css_text(), "position: relative; overflow: hidden;");
    }
}
