// Offset-aware smooth scrolling for anchor links.
//
// Clicks on `#id` links (and `/#id` links while on the root page) scroll
// smoothly so the target sits below the fixed header, then record the hash
// with `pushState`. A hash already in the URL at load gets the same
// correction once layout has had a moment to settle.

use crate::anchor::{self, ClickAction, ScrollConfig};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, ScrollBehavior, ScrollToOptions, Window};

const IN_PAGE_LINKS: &str = "a[href^=\"#\"], a[href^=\"/#\"]";
const CROSS_PAGE_LINKS: &str = "a[href*=\"/#\"]";

pub fn install(window: &Window, document: &Document, config: ScrollConfig) -> Result<(), JsValue> {
    intercept_links(window, document, config)?;
    cross_page_links(window, document)?;
    correct_initial_hash(window, document, config)?;
    Ok(())
}

/// Scrolls to the element with `id`, leaving room for the header.
/// Returns false, and does nothing, when there is no such element.
#[allow(deprecated)]
pub fn scroll_to_element(
    window: &Window,
    document: &Document,
    id: &str,
    config: &ScrollConfig,
) -> Result<bool, JsValue> {
    let element = match document.get_element_by_id(id) {
        Some(element) => element,
        None => return Ok(false),
    };
    let top = element.get_bounding_client_rect().top();
    let target = anchor::scroll_target(top, window.scroll_y()?, config.header_offset);
    let behavior = if config.smooth {
        ScrollBehavior::Smooth
    } else {
        ScrollBehavior::Auto
    };

    let mut options = ScrollToOptions::new();
    options.top(target).behavior(behavior);
    window.scroll_to_with_scroll_to_options(&options);
    Ok(true)
}

fn anchors(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    let mut elements = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        if let Some(element) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            elements.push(element);
        }
    }
    Ok(elements)
}

fn handle_click(
    window: &Window,
    document: &Document,
    link: &Element,
    event: &Event,
    config: &ScrollConfig,
) -> Result<(), JsValue> {
    let href = match link.get_attribute("href") {
        Some(href) => href,
        None => return Ok(()),
    };
    let pathname = window.location().pathname()?;

    let id = match anchor::resolve_click(&href, &pathname) {
        ClickAction::ScrollTo(id) => id,
        ClickAction::Navigate | ClickAction::Ignore => return Ok(()),
    };

    event.prevent_default();
    if scroll_to_element(window, document, &id, config)? {
        // pushState changes the URL without the jump a hash assignment would cause
        window
            .history()?
            .push_state_with_url(&JsValue::NULL, "", Some(&format!("#{}", id)))?;
    }
    Ok(())
}

fn intercept_links(window: &Window, document: &Document, config: ScrollConfig) -> Result<(), JsValue> {
    for link in anchors(document, IN_PAGE_LINKS)? {
        let window = window.clone();
        let document = document.clone();
        let target = link.clone();
        let on_click = Closure::wrap(Box::new(move |event: Event| {
            let _ = handle_click(&window, &document, &target, &event, &config);
        }) as Box<dyn FnMut(_)>);
        link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}

/// Links into the root page followed from another page get no handler: the
/// browser navigates as usual and the arriving page fixes the offset in
/// `correct_initial_hash`. Returns how many links on this page that applies to.
pub fn cross_page_links(window: &Window, document: &Document) -> Result<usize, JsValue> {
    let pathname = window.location().pathname()?;
    let deferred = anchors(document, CROSS_PAGE_LINKS)?
        .iter()
        .filter_map(|link| link.get_attribute("href"))
        .filter(|href| anchor::defers_to_navigation(href, &pathname))
        .count();
    Ok(deferred)
}

fn correct_initial_hash(window: &Window, document: &Document, config: ScrollConfig) -> Result<(), JsValue> {
    let hash = window.location().hash()?;
    let id = match anchor::fragment_from_hash(&hash) {
        Some(id) => id.to_owned(),
        None => return Ok(()),
    };

    let window = window.clone();
    let document = document.clone();
    Timeout::new(config.settle_delay_ms, move || {
        let _ = scroll_to_element(&window, &document, &id, &config);
    })
    .forget();
    Ok(())
}
