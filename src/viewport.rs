/// Size the renderer should take, in CSS pixels. Each axis falls back to the
/// window's inner size when the canvas reports zero (detached or collapsed).
pub fn resolve_size(client: (f64, f64), window: (f64, f64)) -> (f64, f64) {
    let pick = |c: f64, w: f64| if c > 0.0 { c } else { w };
    (pick(client.0, window.0), pick(client.1, window.1))
}

pub fn aspect(width: f64, height: f64) -> f32 {
    if height > 0.0 { (width / height) as f32 } else { 1.0 }
}

/// Drawing-buffer size for a CSS size at the given pixel ratio.
pub fn buffer_size(css: (f64, f64), pixel_ratio: f64) -> (u32, u32) {
    let px = |v: f64| (v * pixel_ratio).floor().max(0.0) as u32;
    (px(css.0), px(css.1))
}

pub fn pixel_ratio(device: f64, max: f64) -> f64 {
    if device > 0.0 { device.min(max) } else { 1.0 }
}
