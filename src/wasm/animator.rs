//! Plays tweens against the live DOM.
//!
//! The animator is ticked from the frame loop. It applies the current value
//! of every running playback and reports which ones finished during the tick.
//! Finished and cancelled element animations drop their inline styles so
//! elements fall back to their stylesheet values.

use web_sys::{HtmlElement, Window};

use crate::tween::{Ease, ScalarTween, Timeline};
use crate::wasm::dom;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(u64);

#[derive(Debug)]
enum Track {
    Timeline {
        timeline: Timeline,
        targets: Vec<Vec<HtmlElement>>,
        resting: Vec<Vec<f64>>,
    },
    Opacity {
        element: HtmlElement,
        tween: ScalarTween,
        clear_on_complete: bool,
    },
    Scroll {
        window: Window,
        tween: ScalarTween,
    },
}

#[derive(Debug)]
struct Playback {
    id: AnimationId,
    started_ms: f64,
    track: Track,
}

#[derive(Debug, Default)]
pub struct Animator {
    next_id: u64,
    playing: Vec<Playback>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Play a from-timeline over element groups. `targets[g][i]` is element
    /// `i` of group `g`. From-states are applied immediately.
    pub fn play_timeline(
        &mut self,
        window: &Window,
        timeline: Timeline,
        targets: Vec<Vec<HtmlElement>>,
        now_ms: f64,
    ) -> AnimationId {
        let resting = targets
            .iter()
            .map(|group| group.iter().map(|el| dom::computed_opacity(window, el)).collect())
            .collect();
        self.start(now_ms, Track::Timeline { timeline, targets, resting })
    }

    pub fn fade(
        &mut self,
        element: HtmlElement,
        tween: ScalarTween,
        clear_on_complete: bool,
        now_ms: f64,
    ) -> AnimationId {
        self.start(now_ms, Track::Opacity { element, tween, clear_on_complete })
    }

    /// Scroll the window to `to_y`, replacing any scroll already in flight.
    pub fn scroll_window(
        &mut self,
        window: &Window,
        to_y: f64,
        duration: f64,
        ease: Ease,
        now_ms: f64,
    ) -> AnimationId {
        self.playing.retain(|pb| !matches!(pb.track, Track::Scroll { .. }));
        let from = window.scroll_y().unwrap_or(0.0);
        let tween = ScalarTween::new(from, to_y, duration, ease);
        self.start(now_ms, Track::Scroll { window: window.clone(), tween })
    }

    /// Stop a playback and restore the elements it touched.
    pub fn cancel(&mut self, id: AnimationId) {
        if let Some(pos) = self.playing.iter().position(|pb| pb.id == id) {
            let playback = self.playing.remove(pos);
            finish(&playback.track, true);
        }
    }

    pub fn is_playing(&self, id: AnimationId) -> bool {
        self.playing.iter().any(|pb| pb.id == id)
    }

    /// Apply every playback at `now_ms` and return the ids that completed.
    pub fn tick(&mut self, now_ms: f64) -> Vec<AnimationId> {
        let mut done = Vec::new();
        self.playing.retain(|pb| {
            let t = ((now_ms - pb.started_ms) / 1000.0).max(0.0);
            if apply(&pb.track, t) {
                finish(&pb.track, false);
                done.push(pb.id);
                false
            } else {
                true
            }
        });
        done
    }

    fn start(&mut self, now_ms: f64, track: Track) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        apply(&track, 0.0);
        self.playing.push(Playback { id, started_ms: now_ms, track });
        id
    }
}

/// Apply `track` at `t` seconds; true once it is complete.
fn apply(track: &Track, t: f64) -> bool {
    match track {
        Track::Timeline { timeline, targets, resting } => {
            for (group, index, frame) in timeline.sample(t) {
                let Some(el) = targets.get(group).and_then(|g| g.get(index)) else {
                    continue;
                };
                let style = el.style();
                if let Some(factor) = frame.opacity {
                    let rest = resting[group][index];
                    let _ = style.set_property("opacity", &(rest * factor).to_string());
                }
                let _ = style.set_property("transform", &frame.transform_css());
            }
            timeline.is_complete(t)
        }
        Track::Opacity { element, tween, .. } => {
            let _ = element.style().set_property("opacity", &tween.value_at(t).to_string());
            tween.is_complete(t)
        }
        Track::Scroll { window, tween } => {
            window.scroll_to_with_x_and_y(window.scroll_x().unwrap_or(0.0), tween.value_at(t));
            tween.is_complete(t)
        }
    }
}

fn finish(track: &Track, cancelled: bool) {
    match track {
        Track::Timeline { targets, .. } => {
            for el in targets.iter().flatten() {
                let style = el.style();
                let _ = style.remove_property("opacity");
                let _ = style.remove_property("transform");
            }
        }
        Track::Opacity { element, clear_on_complete, .. } => {
            if *clear_on_complete || cancelled {
                let _ = element.style().remove_property("opacity");
            }
        }
        Track::Scroll { .. } => {}
    }
}
