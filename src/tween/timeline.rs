//! Timelines of "from" tweens.
//!
//! Each [`Step`] animates every element of one group from an offset state back
//! to its resting state (no translation, unit scale, full resting opacity).
//! Steps are placed relative to the end of the timeline built so far, so a
//! negative offset overlaps a step with its predecessor.

use super::Ease;

/// Where a step starts, relative to the timeline built so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// At the current end of the timeline.
    Sequence,
    /// `d` seconds before the current end, clamped at zero.
    Overlap(f64),
    /// At an absolute time.
    At(f64),
}

/// Offset state an element animates from. `opacity` is a fraction of the
/// element's resting opacity; `None` leaves opacity alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FromVars {
    pub opacity: Option<f64>,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for FromVars {
    fn default() -> Self {
        Self { opacity: None, x: 0.0, y: 0.0, scale: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub group: usize,
    pub from: FromVars,
    pub duration: f64,
    pub ease: Ease,
    pub stagger: f64,
    pub position: Position,
}

impl Step {
    pub fn from(group: usize) -> Self {
        Self {
            group,
            from: FromVars::default(),
            duration: 0.5,
            ease: Ease::default(),
            stagger: 0.0,
            position: Position::Sequence,
        }
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.from.opacity = Some(opacity);
        self
    }

    pub fn x(mut self, x: f64) -> Self {
        self.from.x = x;
        self
    }

    pub fn y(mut self, y: f64) -> Self {
        self.from.y = y;
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.from.scale = scale;
        self
    }

    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

/// One element's placed tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub group: usize,
    pub index: usize,
    pub start: f64,
    pub duration: f64,
    pub ease: Ease,
    pub from: FromVars,
}

impl Tween {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    fn frame_at(&self, t: f64) -> Frame {
        let p = if self.duration <= 0.0 {
            if t >= self.start { 1.0 } else { 0.0 }
        } else {
            ((t - self.start) / self.duration).clamp(0.0, 1.0)
        };
        if p >= 1.0 {
            return Frame {
                opacity: self.from.opacity.map(|_| 1.0),
                x: 0.0,
                y: 0.0,
                scale: 1.0,
            };
        }
        let e = self.ease.apply(p);
        Frame {
            opacity: self.from.opacity.map(|o| o + (1.0 - o) * e),
            x: self.from.x * (1.0 - e),
            y: self.from.y * (1.0 - e),
            scale: self.from.scale + (1.0 - self.from.scale) * e,
        }
    }
}

/// Sampled visual state of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub opacity: Option<f64>,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Frame {
    pub fn transform_css(&self) -> String {
        format!("translate({}px, {}px) scale({})", self.x, self.y, self.scale)
    }

    pub fn is_resting(&self) -> bool {
        self.opacity.is_none_or(|o| o == 1.0) && self.x == 0.0 && self.y == 0.0 && self.scale == 1.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    tweens: Vec<Tween>,
    duration: f64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `step` for a group of `count` elements.
    pub fn add(&mut self, step: Step, count: usize) -> &mut Self {
        if count == 0 {
            return self;
        }
        let start = match step.position {
            Position::Sequence => self.duration,
            Position::Overlap(d) => (self.duration - d).max(0.0),
            Position::At(t) => t.max(0.0),
        };
        for index in 0..count {
            let tween = Tween {
                group: step.group,
                index,
                start: start + index as f64 * step.stagger,
                duration: step.duration,
                ease: step.ease,
                from: step.from,
            };
            self.duration = self.duration.max(tween.end());
            self.tweens.push(tween);
        }
        self
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    /// Start time of the first element of `group`, if the group was placed.
    pub fn start_of(&self, group: usize) -> Option<f64> {
        self.tweens.iter().find(|tw| tw.group == group).map(|tw| tw.start)
    }

    pub fn is_complete(&self, t: f64) -> bool {
        t >= self.duration
    }

    /// Visual state of every placed element at time `t`.
    pub fn sample(&self, t: f64) -> impl Iterator<Item = (usize, usize, Frame)> + '_ {
        self.tweens.iter().map(move |tw| (tw.group, tw.index, tw.frame_at(t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn overlap_is_relative_to_end() {
        let mut tl = Timeline::new();
        tl.add(Step::from(0).opacity(0.0).duration(0.6), 1)
            .add(Step::from(1).opacity(0.0).duration(0.5).at(Position::Overlap(0.4)), 1);
        assert!(approx(tl.start_of(1).unwrap(), 0.2));
        assert!(approx(tl.duration(), 0.7));
    }

    #[test]
    fn overlap_never_goes_negative() {
        let mut tl = Timeline::new();
        tl.add(Step::from(0).duration(0.2), 1)
            .add(Step::from(1).duration(0.2).at(Position::Overlap(5.0)), 1);
        assert_eq!(tl.start_of(1), Some(0.0));
    }

    #[test]
    fn stagger_offsets_each_element() {
        let mut tl = Timeline::new();
        tl.add(Step::from(0).y(-8.0).duration(0.45).stagger(0.08), 3);
        let starts: Vec<f64> = tl.tweens().iter().map(|tw| tw.start).collect();
        assert!(approx(starts[1], 0.08) && approx(starts[2], 0.16));
        assert!(approx(tl.duration(), 0.61));
    }

    #[test]
    fn empty_group_does_not_move_end() {
        let mut tl = Timeline::new();
        tl.add(Step::from(0).duration(1.0), 1).add(Step::from(1).duration(3.0), 0);
        assert_eq!(tl.start_of(1), None);
        assert!(approx(tl.duration(), 1.0));
    }

    #[test]
    fn from_state_is_rendered_before_start() {
        let mut tl = Timeline::new();
        tl.add(Step::from(0).duration(1.0), 1)
            .add(Step::from(1).y(10.0).opacity(0.0).duration(1.0), 1);
        let (_, _, frame) = tl.sample(0.5).find(|(g, _, _)| *g == 1).unwrap();
        assert_eq!(frame.y, 10.0);
        assert_eq!(frame.opacity, Some(0.0));
    }

    #[test]
    fn everything_rests_at_the_end() {
        let mut tl = Timeline::new();
        tl.add(Step::from(0).x(-8.0).opacity(0.0).ease(Ease::Power3Out), 2)
            .add(Step::from(1).scale(0.98).opacity(0.0).stagger(0.12).at(Position::Overlap(0.3)), 4);
        assert!(tl.sample(tl.duration()).all(|(_, _, f)| f.is_resting()));
        assert!(!tl.sample(0.0).all(|(_, _, f)| f.is_resting()));
    }

    #[test]
    fn transform_css_format() {
        let frame = Frame { opacity: None, x: -8.0, y: 2.5, scale: 0.98 };
        assert_eq!(frame.transform_css(), "translate(-8px, 2.5px) scale(0.98)");
    }
}
