#![cfg(target_arch = "wasm32")]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use landing_wasm::intro;
use landing_wasm::transition::{NavRequest, View};
use landing_wasm::wasm::{animator::Animator, app::App, dom, frame, input, router, scene};
use landing_wasm::{SiteConfig, SiteError};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, Window};

wasm_bindgen_test_configure!(run_in_browser);

fn page() -> (Window, Document) {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();
    (window, document)
}

fn element(document: &Document, tag: &str, class: &str) -> HtmlElement {
    let el: HtmlElement = document.create_element(tag).unwrap().dyn_into().unwrap();
    el.set_class_name(class);
    el
}

#[wasm_bindgen_test]
fn menu_toggle_round_trip() {
    let (_, document) = page();
    let ham = element(&document, "button", "hamburger");
    let nav = element(&document, "ul", "nav-list");
    let before = (ham.class_name(), nav.class_name());

    input::toggle_menu(&ham, &nav, "open");
    assert!(ham.class_list().contains("open") && nav.class_list().contains("open"));
    input::toggle_menu(&ham, &nav, "open");

    assert_eq!((ham.class_name(), nav.class_name()), before);
}

#[wasm_bindgen_test]
fn filter_click_leaves_one_active() {
    let (_, document) = page();
    let config = SiteConfig::default();
    let group = element(&document, "div", "chart-controls");
    let other = element(&document, "div", "chart-controls");
    let buttons: Vec<HtmlElement> = ["filter-btn active", "filter-btn", "filter-btn active", "filter-btn"]
        .iter()
        .map(|class| {
            let b = element(&document, "button", class);
            group.append_child(&b).unwrap();
            b
        })
        .collect();
    let outsider = element(&document, "button", "filter-btn active");
    other.append_child(&outsider).unwrap();

    input::select_filter(&buttons[1], &config);

    let active: Vec<usize> = buttons
        .iter()
        .enumerate()
        .filter(|(_, b)| b.class_list().contains("active"))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(active, vec![1]);
    assert!(outsider.class_list().contains("active"));
}

#[wasm_bindgen_test]
fn orphan_filter_button_is_left_alone() {
    let (_, document) = page();
    let lone = element(&document, "button", "filter-btn");
    let lone: &Element = lone.as_ref();
    input::select_filter(lone, &SiteConfig::default());
    assert!(!lone.class_list().contains("active"));
}

#[wasm_bindgen_test]
fn intro_completion_restores_resting_styles() {
    let (window, document) = page();
    let body = document.body().unwrap();
    let stage = element(&document, "div", "intro-stage");
    body.append_child(&stage).unwrap();

    let classes = ["brand-logo", "brand-text", "nav-link", "nav-link", "title", "subtitle", "featured-card"];
    for class in classes {
        stage.append_child(&element(&document, "div", class)).unwrap();
    }
    let actions = element(&document, "div", "hero-actions");
    actions.append_child(&element(&document, "a", "btn")).unwrap();
    stage.append_child(&actions).unwrap();

    let targets: Vec<Vec<HtmlElement>> =
        intro::GROUPS.iter().map(|sel| dom::query_all(&stage, sel)).collect();
    let before: Vec<f64> = targets.iter().flatten().map(|el| dom::computed_opacity(&window, el)).collect();
    let counts: Vec<usize> = targets.iter().map(Vec::len).collect();
    assert!(counts.iter().all(|c| *c > 0));

    let mut animator = Animator::new();
    let id = animator.play_timeline(&window, intro::timeline(&counts), targets.clone(), 0.0);
    // from-state is applied immediately
    assert_eq!(targets[0][0].style().get_property_value("opacity").unwrap(), "0");

    assert!(animator.tick(600.0).is_empty());
    assert!(animator.is_playing(id));
    assert_eq!(animator.tick(60_000.0), vec![id]);
    assert!(!animator.is_playing(id));

    for el in targets.iter().flatten() {
        let style = el.style();
        assert_eq!(style.get_property_value("opacity").unwrap(), "");
        assert_eq!(style.get_property_value("transform").unwrap(), "");
    }
    let after: Vec<f64> = targets.iter().flatten().map(|el| dom::computed_opacity(&window, el)).collect();
    assert_eq!(before, after);
    body.remove_child(&stage).unwrap();
}

#[wasm_bindgen_test]
fn missing_canvas_has_no_scene_and_frames_run() {
    let (window, document) = page();
    let config = SiteConfig::default();
    assert!(scene::SceneContext::init(&window, None, &config).is_none());

    let mut app = App::new(window, document, config);
    assert!(app.scene.is_none());
    let start = app.now_ms();
    for i in 0..3 {
        assert!(app.frame(start + 16.0 * i as f64).is_empty());
    }
    app.resize();
}

#[wasm_bindgen_test]
fn zero_sized_canvas_resizes_to_window() {
    let (window, document) = page();
    let config = SiteConfig::default();
    let canvas: HtmlCanvasElement = document.create_element("canvas").unwrap().dyn_into().unwrap();
    assert_eq!((canvas.client_width(), canvas.client_height()), (0, 0));

    scene::resize(None, &window);
    let Some(mut ctx) = scene::SceneContext::init(&window, Some(canvas.clone()), &config) else {
        // no WebGL2 in this browser; the guard path above is all there is
        return;
    };
    ctx.resize(&window);
    let ratio = window.device_pixel_ratio().min(config.max_pixel_ratio);
    let inner_w = window.inner_width().unwrap().as_f64().unwrap();
    assert_eq!(canvas.width(), (inner_w * ratio).floor() as u32);
    for i in 0..3 {
        ctx.frame(i as f64 * 0.016);
    }
}

#[wasm_bindgen_test]
fn fetched_page_exposes_namespace() {
    let html = r#"<html><head><title>About</title></head>
        <body><main data-barba="container" data-barba-namespace="about"><h1>Hi</h1></main></body></html>"#;
    let page = router::FetchedPage::parse(html, &SiteConfig::default()).unwrap();
    assert_eq!(page.namespace(), Some("about"));

    let bare = "<html><body><p>no container</p></body></html>";
    assert!(router::FetchedPage::parse(bare, &SiteConfig::default()).is_err());
}

#[wasm_bindgen_test]
async fn missing_page_fetch_reports_http_status() {
    let err = router::fetch_page("/no-such-page.html", &SiteConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SiteError::HttpStatus { status: 404, .. }), "{err}");
}

#[wasm_bindgen_test]
fn swap_keeps_a_single_container() {
    let (window, document) = page();
    let config = SiteConfig::default();
    let body = document.body().unwrap();
    let old = element(&document, "main", "");
    old.set_attribute("data-barba", "container").unwrap();
    old.set_attribute("data-barba-namespace", "home").unwrap();
    body.append_child(&old).unwrap();

    let html = r#"<main data-barba="container" data-barba-namespace="about"><p id="fresh">new</p></main>"#;
    let page = router::FetchedPage::parse(html, &config).unwrap();
    let (incoming, resting) =
        router::swap(&window, &document, &page, &NavRequest::history("/about"), &config).unwrap();
    assert_eq!(resting, 1.0);

    let containers = document.query_selector_all(&config.container_selector).unwrap();
    assert_eq!(containers.length(), 1);
    assert_eq!(incoming.get_attribute("data-barba-namespace").as_deref(), Some("about"));
    assert_eq!(incoming.style().get_property_value("opacity").unwrap(), "0");
    assert!(document.get_element_by_id("fresh").is_some());
    incoming.remove();
}

#[wasm_bindgen_test]
fn swap_reports_the_stylesheet_opacity_of_the_new_view() {
    let (window, document) = page();
    let config = SiteConfig::default();
    let sheet = document.create_element("style").unwrap();
    sheet.set_text_content(Some(".dimmed { opacity: 0.5; }"));
    document.head().unwrap().append_child(&sheet).unwrap();
    let old = element(&document, "main", "");
    old.set_attribute("data-barba", "container").unwrap();
    document.body().unwrap().append_child(&old).unwrap();

    let html = r#"<main class="dimmed" data-barba="container" data-barba-namespace="about"></main>"#;
    let page = router::FetchedPage::parse(html, &config).unwrap();
    let (incoming, resting) =
        router::swap(&window, &document, &page, &NavRequest::history("/dimmed"), &config).unwrap();

    assert!((resting - 0.5).abs() < 1e-6);
    assert_eq!(incoming.style().get_property_value("opacity").unwrap(), "0");
    incoming.remove();
    sheet.remove();
}

async fn frames_until(count: &Cell<u32>, target: u32) {
    for _ in 0..200 {
        if count.get() >= target {
            return;
        }
        TimeoutFuture::new(16).await;
    }
    panic!("frame loop stalled at {} frames", count.get());
}

#[wasm_bindgen_test]
async fn cancelled_frame_loop_stops_calling_back() {
    let (window, _) = page();
    let count = Rc::new(Cell::new(0u32));
    let seen = count.clone();
    let handle = frame::start(&window, move |_| seen.set(seen.get() + 1)).unwrap();

    frames_until(&count, 3).await;
    handle.cancel();
    assert!(handle.is_cancelled());
    let stopped_at = count.get();

    TimeoutFuture::new(150).await;
    assert_eq!(count.get(), stopped_at);
}

#[wasm_bindgen_test]
async fn frame_loop_can_cancel_itself() {
    let (window, _) = page();
    let count = Rc::new(Cell::new(0u32));
    let slot: Rc<RefCell<Option<frame::FrameHandle>>> = Rc::new(RefCell::new(None));

    let (seen, own) = (count.clone(), slot.clone());
    let handle = frame::start(&window, move |_| {
        seen.set(seen.get() + 1);
        if seen.get() == 2 {
            if let Some(handle) = own.borrow().as_ref() {
                handle.cancel();
            }
        }
    })
    .unwrap();
    *slot.borrow_mut() = Some(handle);

    frames_until(&count, 2).await;
    TimeoutFuture::new(150).await;
    assert_eq!(count.get(), 2);
}
