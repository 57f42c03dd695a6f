use rand::{rngs::SmallRng, SeedableRng};
use web_sys::{HtmlCanvasElement, Window};

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::scene::SceneState;
use crate::viewport;
use crate::wasm::render::Renderer;

/// The live hero scene: model state plus the GL renderer drawing it.
///
/// A page without the canvas, or a browser without WebGL2, has no
/// `SceneContext` at all. Callers hold an `Option` and skip the scene work.
#[derive(Debug)]
pub struct SceneContext {
    pub state: SceneState,
    renderer: Renderer,
    canvas: HtmlCanvasElement,
}

impl SceneContext {
    pub fn init(
        window: &Window,
        canvas: Option<HtmlCanvasElement>,
        config: &SiteConfig,
    ) -> Option<Self> {
        let canvas = canvas?;
        match Self::try_init(window, canvas, config) {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                log::warn!("hero scene disabled: {e}");
                None
            }
        }
    }

    fn try_init(
        window: &Window,
        canvas: HtmlCanvasElement,
        config: &SiteConfig,
    ) -> Result<Self, SiteError> {
        let (width, height) = measure(window, &canvas);
        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        let state = SceneState::new(
            viewport::aspect(width, height),
            config.particle_count,
            config.particle_extent,
            &mut SmallRng::seed_from_u64(seed),
        );
        let pixel_ratio = viewport::pixel_ratio(window.device_pixel_ratio(), config.max_pixel_ratio);
        let renderer = Renderer::new(canvas.clone(), &state, pixel_ratio)?;
        renderer.set_size(width, height);
        log::info!(
            "hero scene ready: {}x{} @{pixel_ratio}x, {} particles",
            width,
            height,
            state.particles.len()
        );
        Ok(Self { state, renderer, canvas })
    }

    /// Advance the scene to `elapsed` seconds and draw it.
    pub fn frame(&mut self, elapsed: f64) {
        self.state.update(elapsed);
        self.renderer.render(&self.state);
    }

    /// Match the drawing buffer and camera to the canvas' current box.
    pub fn resize(&mut self, window: &Window) {
        let (width, height) = measure(window, &self.canvas);
        self.renderer.set_size(width, height);
        self.state.set_aspect(viewport::aspect(width, height));
    }
}

/// Per-frame entry point; a no-op without a scene.
pub fn frame(scene: Option<&mut SceneContext>, elapsed: f64) {
    if let Some(scene) = scene {
        scene.frame(elapsed);
    }
}

pub fn resize(scene: Option<&mut SceneContext>, window: &Window) {
    if let Some(scene) = scene {
        scene.resize(window);
    }
}

fn measure(window: &Window, canvas: &HtmlCanvasElement) -> (f64, f64) {
    let inner = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    viewport::resolve_size(
        (canvas.client_width() as f64, canvas.client_height() as f64),
        (inner(window.inner_width()), inner(window.inner_height())),
    )
}
