//! Document-level event wiring: delegated clicks, the mobile menu, window
//! resize and history traversal.

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Element, HtmlAnchorElement, MouseEvent, Url};

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::input::{classify_link, ClickIntent, LinkClick};
use crate::transition::NavRequest;
use crate::wasm::app::{dispatch, SharedApp};

/// Flip the open state of the menu button and the nav list together.
pub fn toggle_menu(hamburger: &Element, nav_list: &Element, open_class: &str) {
    let _ = nav_list.class_list().toggle(open_class);
    let _ = hamburger.class_list().toggle(open_class);
}

/// Make `button` the only active filter in its group. A button without a
/// parent element is left alone.
pub fn select_filter(button: &Element, config: &SiteConfig) {
    let Some(group) = button.parent_element() else {
        return;
    };
    if let Ok(siblings) = group.query_selector_all(&config.filter_selector) {
        for i in 0..siblings.length() {
            if let Some(el) = siblings.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                let _ = el.class_list().remove_1(&config.active_class);
            }
        }
    }
    let _ = button.class_list().add_1(&config.active_class);
}

pub fn install(app: &SharedApp) -> Result<(), SiteError> {
    let (window, document) = {
        let app = app.borrow();
        (app.window.clone(), app.document.clone())
    };

    if let Some(ham) = app.borrow().elements.hamburger.clone() {
        let shared = app.clone();
        let on_toggle = Closure::wrap(Box::new(move || {
            shared.borrow().toggle_menu();
        }) as Box<dyn FnMut()>);
        ham.add_event_listener_with_callback("click", on_toggle.as_ref().unchecked_ref())?;
        on_toggle.forget();
    }

    let shared = app.clone();
    let on_click = Closure::wrap(Box::new(move |event: MouseEvent| {
        on_document_click(&shared, &event);
    }) as Box<dyn FnMut(MouseEvent)>);
    document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    let shared = app.clone();
    let on_resize = Closure::wrap(Box::new(move || {
        shared.borrow_mut().resize();
    }) as Box<dyn FnMut()>);
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    let shared = app.clone();
    let on_popstate = Closure::wrap(Box::new(move || {
        let url = shared.borrow().window.location().href();
        if let Ok(url) = url {
            let commands = shared.borrow_mut().navigate(NavRequest::history(url));
            dispatch(&shared, commands);
        }
    }) as Box<dyn FnMut()>);
    window.add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())?;
    on_popstate.forget();

    Ok(())
}

fn on_document_click(app: &SharedApp, event: &MouseEvent) {
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };

    if let Some(anchor) = target
        .closest("a")
        .ok()
        .flatten()
        .and_then(|a| a.dyn_into::<HtmlAnchorElement>().ok())
    {
        match classify_anchor(app, &anchor, event) {
            ClickIntent::ScrollTo(selector) => {
                event.prevent_default();
                app.borrow_mut().scroll_to(&selector);
            }
            ClickIntent::Navigate(url) => {
                event.prevent_default();
                let commands = app.borrow_mut().navigate(NavRequest::link(url));
                dispatch(app, commands);
            }
            ClickIntent::Ignore => {}
        }
    }

    let filter_selector = app.borrow().config.filter_selector.clone();
    if let Some(button) = target.closest(&filter_selector).ok().flatten() {
        select_filter(&button, &app.borrow().config);
    }
}

fn classify_anchor(app: &SharedApp, anchor: &HtmlAnchorElement, event: &MouseEvent) -> ClickIntent {
    let app = app.borrow();
    let href = anchor.get_attribute("href").unwrap_or_default();
    let resolved = anchor.href();
    let current = app.window.location().href().unwrap_or_default();
    let origin = app.window.location().origin().unwrap_or_default();
    let same_origin = Url::new(&resolved).is_ok_and(|u| u.origin() == origin);
    let target = anchor.target();
    let link = LinkClick {
        href: &href,
        resolved: &resolved,
        current: &current,
        same_origin,
        new_context: !target.is_empty() && target != "_self",
        download: anchor.has_attribute("download"),
        opted_out: anchor.has_attribute(&app.config.prevent_attribute),
        modified: event.ctrl_key() || event.meta_key() || event.shift_key() || event.alt_key() || event.button() != 0,
    };
    classify_link(&link)
}
