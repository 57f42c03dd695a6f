//! Site configuration.
//!
//! Defaults match the shipped markup. A page may override any field with a
//! `<script type="application/json" id="site-config">` block; missing fields
//! keep their defaults.

use serde::Deserialize;

use crate::error::SiteError;

/// Element id of the optional JSON override block.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub year_id: String,
    pub canvas_id: String,
    pub hamburger_selector: String,
    pub nav_list_selector: String,
    pub open_class: String,
    pub filter_selector: String,
    pub active_class: String,
    pub container_selector: String,
    pub namespace_attribute: String,
    pub prevent_attribute: String,
    /// Fixed header height subtracted from anchor scroll targets, in CSS px.
    pub header_offset: f64,
    pub scroll_duration: f64,
    pub fade_duration: f64,
    pub particle_count: usize,
    pub particle_extent: f32,
    pub max_pixel_ratio: f64,
    /// Views whose entry re-measures the canvas.
    pub resize_namespaces: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            year_id: "year".into(),
            canvas_id: "three-canvas".into(),
            hamburger_selector: ".hamburger".into(),
            nav_list_selector: ".nav-list".into(),
            open_class: "open".into(),
            filter_selector: ".filter-btn".into(),
            active_class: "active".into(),
            container_selector: "[data-barba=\"container\"]".into(),
            namespace_attribute: "data-barba-namespace".into(),
            prevent_attribute: "data-barba-prevent".into(),
            header_offset: 70.0,
            scroll_duration: 0.8,
            fade_duration: 0.45,
            particle_count: 200,
            particle_extent: 12.0,
            max_pixel_ratio: 2.0,
            resize_namespaces: vec!["home".into()],
        }
    }
}

impl SiteConfig {
    /// Parse a JSON override on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, SiteError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn resizes_on_enter(&self, namespace: Option<&str>) -> bool {
        namespace.is_some_and(|ns| self.resize_namespaces.iter().any(|r| r == ns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_override_keeps_defaults() {
        let cfg = SiteConfig::from_json("{}").unwrap();
        assert_eq!(cfg, SiteConfig::default());
    }

    #[test]
    fn partial_override() {
        let cfg = SiteConfig::from_json(r#"{"headerOffset": 96, "resizeNamespaces": ["home", "work"]}"#)
            .unwrap();
        assert_eq!(cfg.header_offset, 96.0);
        assert_eq!(cfg.particle_count, 200);
        assert!(cfg.resizes_on_enter(Some("work")));
    }

    #[test]
    fn malformed_override_is_an_error() {
        assert!(SiteConfig::from_json(r#"{"particleCount": "many"}"#).is_err());
    }

    #[test]
    fn only_listed_namespaces_resize() {
        let cfg = SiteConfig::default();
        assert!(cfg.resizes_on_enter(Some("home")));
        assert!(!cfg.resizes_on_enter(Some("about")));
        assert!(!cfg.resizes_on_enter(None));
    }
}
