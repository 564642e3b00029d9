// requestAnimationFrame adapter. Calls back once per frame, forever, with a
// FrameContext describing the frame; all per-frame work lives in the callback.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Window};

// Physics steps once per frame regardless of timing, so these fields are
// diagnostics only: which frame this is and when the browser produced it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameContext {
    pub index: u64,
    // DOMHighResTimeStamp passed by the browser
    pub timestamp_ms: f64,
}

impl FrameContext {
    pub fn new(index: u64, timestamp_ms: f64) -> Self {
        FrameContext {
            index,
            timestamp_ms,
        }
    }

    pub fn next(&self, timestamp_ms: f64) -> FrameContext {
        FrameContext {
            index: self.index + 1,
            timestamp_ms,
        }
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(window: &Window, callback: &FrameCallback) -> Result<i32, JsValue> {
    match callback.borrow().as_ref() {
        Some(closure) => window.request_animation_frame(closure.as_ref().unchecked_ref()),
        None => Err(JsValue::from_str("animation callback dropped")),
    }
}

/// Starts a loop that never stops: `on_frame` runs once per animation frame
/// until the page goes away.
pub fn start_loop<F>(window: Window, mut on_frame: F) -> Result<(), JsValue>
where
    F: FnMut(&FrameContext) + 'static,
{
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    let scheduler = window.clone();
    let mut last: Option<FrameContext> = None;

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        let frame = match last {
            Some(prev) => prev.next(timestamp),
            None => FrameContext::new(0, timestamp),
        };
        on_frame(&frame);
        last = Some(frame);

        if let Err(err) = request_frame(&scheduler, &f) {
            console::error_1(&err);
        }
    }) as Box<dyn FnMut(f64)>));

    request_frame(&window, &g)?;
    Ok(())
}
