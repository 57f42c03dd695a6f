//! The page-enter intro sequence: brand, navigation, hero copy, calls to
//! action and featured cards, each easing in slightly before the previous
//! group finishes.

use crate::tween::{Ease, Position, Step, Timeline};

/// Element groups in playback order.
pub const GROUPS: [&str; 7] = [
    ".brand-logo",
    ".brand-text",
    ".nav-link",
    ".title",
    ".subtitle",
    ".hero-actions .btn",
    ".featured-card",
];

pub fn steps() -> [Step; 7] {
    [
        Step::from(0).y(-10.0).opacity(0.0).duration(0.6).ease(Ease::Power3Out),
        Step::from(1).x(-8.0).opacity(0.0).duration(0.5).at(Position::Overlap(0.4)),
        Step::from(2)
            .y(-8.0)
            .opacity(0.0)
            .stagger(0.08)
            .duration(0.45)
            .at(Position::Overlap(0.35)),
        Step::from(3)
            .y(10.0)
            .opacity(0.0)
            .duration(0.8)
            .ease(Ease::Power2Out)
            .at(Position::Overlap(0.2)),
        Step::from(4).y(8.0).opacity(0.0).duration(0.6).at(Position::Overlap(0.5)),
        Step::from(5)
            .y(8.0)
            .opacity(0.0)
            .stagger(0.08)
            .duration(0.5)
            .at(Position::Overlap(0.4)),
        Step::from(6)
            .scale(0.98)
            .opacity(0.0)
            .stagger(0.12)
            .duration(0.6)
            .at(Position::Overlap(0.7)),
    ]
}

/// Build the intro timeline for the given number of elements in each group.
/// Missing trailing counts are treated as empty groups.
pub fn timeline(counts: &[usize]) -> Timeline {
    let mut tl = Timeline::new();
    for step in steps() {
        tl.add(step, counts.get(step.group).copied().unwrap_or(0));
    }
    tl
}
