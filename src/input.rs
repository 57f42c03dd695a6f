//! Click classification for the delegated document listener.

/// What the browser tells us about a clicked link.
#[derive(Debug, Clone, Default)]
pub struct LinkClick<'a> {
    /// The raw `href` attribute.
    pub href: &'a str,
    /// The href resolved against the document URL.
    pub resolved: &'a str,
    /// Current document URL.
    pub current: &'a str,
    pub same_origin: bool,
    /// `target` other than `_self`.
    pub new_context: bool,
    pub download: bool,
    /// The link opts out of animated transitions.
    pub opted_out: bool,
    /// Modifier key held or non-primary button.
    pub modified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickIntent {
    /// Smooth-scroll to the element matching this selector.
    ScrollTo(String),
    /// Run an animated page transition to this URL.
    Navigate(String),
    Ignore,
}

pub fn classify_link(link: &LinkClick<'_>) -> ClickIntent {
    if link.href.starts_with('#') {
        return ClickIntent::ScrollTo(link.href.to_string());
    }
    if link.href.is_empty()
        || !link.same_origin
        || link.new_context
        || link.download
        || link.opted_out
        || link.modified
        || strip_fragment(link.resolved) == strip_fragment(link.current)
    {
        return ClickIntent::Ignore;
    }
    ClickIntent::Navigate(link.resolved.to_string())
}

fn strip_fragment(url: &str) -> &str {
    url.split_once('#').map_or(url, |(base, _)| base)
}

/// Window scroll position that puts `offset_top` just below a fixed header.
pub fn scroll_target(offset_top: f64, header_offset: f64) -> f64 {
    (offset_top - header_offset).max(0.0)
}
