//! Same-origin page loading and container swapping for animated transitions.

use gloo_net::http::Request;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, DomParser, Element, HtmlElement, SupportedType, Window};

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::transition::{NavRequest, View};
use crate::wasm::dom;

/// The parts of a fetched document a transition needs.
#[derive(Debug)]
pub struct FetchedPage {
    container: Element,
    namespace: Option<String>,
    title: String,
}

impl View for FetchedPage {
    fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}

impl FetchedPage {
    pub fn from_document(doc: &Document, config: &SiteConfig) -> Result<Self, SiteError> {
        let container = doc
            .query_selector(&config.container_selector)?
            .ok_or(SiteError::MissingContainer)?;
        Ok(Self {
            namespace: container.get_attribute(&config.namespace_attribute),
            title: doc.title(),
            container,
        })
    }

    pub fn parse(html: &str, config: &SiteConfig) -> Result<Self, SiteError> {
        let doc = DomParser::new()?.parse_from_string(html, SupportedType::TextHtml)?;
        Self::from_document(&doc, config)
    }
}

pub async fn fetch_page(url: &str, config: &SiteConfig) -> Result<FetchedPage, SiteError> {
    let response = Request::get(url).send().await?;
    if !response.ok() {
        return Err(SiteError::HttpStatus { url: url.to_string(), status: response.status() });
    }
    let html = response.text().await?;
    FetchedPage::parse(&html, config)
}

/// The transition container currently in the document.
pub fn current_container(document: &Document, config: &SiteConfig) -> Option<HtmlElement> {
    document
        .query_selector(&config.container_selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Replace the live container with the fetched one and update title and
/// history. Returns the new container and the opacity its styles give it.
pub fn swap(
    window: &Window,
    document: &Document,
    page: &FetchedPage,
    request: &NavRequest,
    config: &SiteConfig,
) -> Result<(HtmlElement, f64), SiteError> {
    let current = current_container(document, config).ok_or(SiteError::MissingContainer)?;
    let incoming = document
        .import_node_with_deep(&page.container, true)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| SiteError::MissingContainer)?;
    current.replace_with_with_node_1(&incoming)?;
    let resting = dom::computed_opacity(window, &incoming);
    // hidden until the fade-in takes over
    incoming.style().set_property("opacity", "0")?;
    if !page.title.is_empty() {
        document.set_title(&page.title);
    }
    if request.push_history {
        window
            .history()?
            .push_state_with_url(&JsValue::NULL, &page.title, Some(&request.url))?;
    }
    Ok((incoming, resting))
}
