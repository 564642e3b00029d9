// Link classification and scroll arithmetic for in-page anchors. No DOM here;
// smooth_scroll feeds these functions attribute values and measurements.

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollConfig {
    // Fixed header height plus padding
    pub header_offset: f64,
    // Time given to layout before correcting a hash present at load
    pub settle_delay_ms: u32,
    // Animated scroll; false jumps straight to the target
    pub smooth: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        ScrollConfig {
            header_offset: 100.0,
            settle_delay_ms: 100,
            smooth: true,
        }
    }
}

/// What a click on an anchor link should turn into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickAction {
    /// Leave the click to the browser (a `/#id` link followed from another page).
    Navigate,
    /// Nothing to scroll to (`#` or empty); the browser default is left alone too.
    Ignore,
    /// Prevent the default jump and smooth-scroll to the element with this id.
    ScrollTo(String),
}

pub const ROOT_PATHS: [&str; 2] = ["/", "/index.html"];

pub fn is_root_path(pathname: &str) -> bool {
    ROOT_PATHS.contains(&pathname)
}

pub fn resolve_click(href: &str, pathname: &str) -> ClickAction {
    let fragment = if href.starts_with("/#") {
        if !is_root_path(pathname) {
            return ClickAction::Navigate;
        }
        &href[1..]
    } else {
        href
    };

    if fragment.is_empty() || fragment == "#" {
        return ClickAction::Ignore;
    }
    if !fragment.starts_with('#') {
        return ClickAction::Navigate;
    }
    ClickAction::ScrollTo(fragment[1..].to_owned())
}

/// True for links into the root page's anchors followed from any other page.
/// The arriving page corrects its own scroll from the URL hash.
pub fn defers_to_navigation(href: &str, pathname: &str) -> bool {
    href.contains("/#") && !is_root_path(pathname)
}

/// Document offset to scroll to so the element clears the fixed header.
/// `element_top` is relative to the viewport, as from getBoundingClientRect.
pub fn scroll_target(element_top: f64, scroll_y: f64, header_offset: f64) -> f64 {
    element_top + scroll_y - header_offset
}

pub fn fragment_from_hash(hash: &str) -> Option<&str> {
    let id = hash.strip_prefix('#').unwrap_or(hash);
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}
