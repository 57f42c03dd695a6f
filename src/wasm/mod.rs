use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::error::SiteError;

pub mod animator;
pub mod app;
pub mod dom;
pub mod frame;
pub mod input;
pub mod render;
pub mod router;
pub mod scene;

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // a second init (e.g. under the test harness) is harmless
    console_log::init_with_level(log::Level::Info).ok();

    boot()?;
    Ok(())
}

/// Wire the page: year stamp, listeners, intro, hero scene and frame loop.
pub fn boot() -> Result<app::SharedApp, SiteError> {
    let window = dom::window()?;
    let document = dom::document(&window)?;
    let config = dom::load_config(&document);

    let app = Rc::new(RefCell::new(app::App::new(window, document, config)));
    if let Some(year) = &app.borrow().elements.year {
        dom::set_year(year);
    }
    input::install(&app)?;
    app.borrow_mut().run_intro();
    // the loop runs for the life of the page
    app::start_frames(&app)?;

    log::info!(
        "landing page ready (scene: {})",
        if app.borrow().scene.is_some() { "on" } else { "off" }
    );
    Ok(app)
}
