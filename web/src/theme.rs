use crate::utils::*;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

/// Colour scheme picked in the sidebar; no stored choice leaves the stylesheet default.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub(crate) const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    /// Attribute on `<html>` that style.css keys its colours on.
    const ROOT_ATTR: &'static str = "data-theme";

    pub(crate) const fn scheme(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }

    pub(crate) fn stored() -> Option<Self> {
        LocalOrDefault::local_or_default()
    }

    fn mark_root(theme: Option<Self>) -> Result<(), JsValue> {
        let root = gloo::utils::document()
            .document_element()
            .ok_or_else(|| JsValue::from_str("document has no root element"))?;
        match theme {
            Some(theme) => root.set_attribute(Self::ROOT_ATTR, theme.scheme()),
            None => root.remove_attribute(Self::ROOT_ATTR),
        }
    }

    fn show(theme: Option<Self>) {
        log::debug!("showing theme {:?}", theme);
        if let Err(err) = Self::mark_root(theme) {
            log::error!("could not show theme {:?}: {:?}", theme, err);
        }
    }

    /// Shows the stored choice before the first render.
    pub(crate) fn init() {
        Self::show(Self::stored());
    }

    /// Remembers a new choice and shows it right away.
    pub(crate) fn apply(theme: Option<Self>) {
        theme.local_save();
        Self::show(theme);
    }
}

impl StorageKey for Theme {
    const KEY: &'static str = "concentration:theme";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemes_match_stylesheet_selectors() {
        let schemes: Vec<_> = Theme::ALL.into_iter().map(Theme::scheme).collect();
        assert_eq!(schemes, ["light", "dark"]);
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::Dark.label(), "Dark");
    }
}
