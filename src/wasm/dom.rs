//! Element lookups. Every lookup is optional: missing markup disables the
//! feature that needs it.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, Window};

use crate::config::{SiteConfig, CONFIG_ELEMENT_ID};
use crate::error::SiteError;

/// Fixed handles resolved once at boot.
#[derive(Debug, Clone, Default)]
pub struct PageElements {
    pub year: Option<Element>,
    pub hamburger: Option<Element>,
    pub nav_list: Option<Element>,
    pub canvas: Option<HtmlCanvasElement>,
}

impl PageElements {
    pub fn query(document: &Document, config: &SiteConfig) -> Self {
        Self {
            year: document.get_element_by_id(&config.year_id),
            hamburger: query(document, &config.hamburger_selector),
            nav_list: query(document, &config.nav_list_selector),
            canvas: document
                .get_element_by_id(&config.canvas_id)
                .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok()),
        }
    }
}

/// First match for `selector`, treating an invalid selector as no match.
pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

/// All HTML elements matching `selector` under `root`, in document order.
pub fn query_all(root: &Element, selector: &str) -> Vec<HtmlElement> {
    root.query_selector_all(selector)
        .map(|list| {
            (0..list.length())
                .filter_map(|i| list.item(i))
                .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
                .collect()
        })
        .unwrap_or_default()
}

pub fn document_root(document: &Document) -> Option<Element> {
    document.document_element()
}

pub fn window() -> Result<Window, SiteError> {
    web_sys::window().ok_or(SiteError::NoWindow)
}

pub fn document(window: &Window) -> Result<Document, SiteError> {
    window.document().ok_or(SiteError::NoDocument)
}

pub fn now_ms(window: &Window) -> f64 {
    window.performance().map_or_else(js_sys::Date::now, |p| p.now())
}

/// Load the site config, applying the page's JSON override when present.
pub fn load_config(document: &Document) -> SiteConfig {
    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return SiteConfig::default();
    };
    SiteConfig::from_json(&text).unwrap_or_else(|e| {
        log::warn!("{e}; using defaults");
        SiteConfig::default()
    })
}

/// Opacity the stylesheet gives `el` right now.
pub fn computed_opacity(window: &Window, el: &Element) -> f64 {
    window
        .get_computed_style(el)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value("opacity").ok())
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(1.0)
}

pub fn set_year(el: &Element) {
    let year = js_sys::Date::new_0().get_full_year();
    el.set_text_content(Some(&year.to_string()));
}
