mod utils;

pub mod anchor;
pub mod animation;
pub mod color;
pub mod field;
pub mod particle;
pub mod point_cloud;
pub mod pointer;
pub mod renderer;
pub mod smooth_scroll;

use anchor::ScrollConfig;
use field::FieldConfig;
use wasm_bindgen::prelude::*;
use web_sys::console;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    utils::set_panic_hook();
    let document = utils::document()?;
    utils::on_dom_ready(&document, || {
        if let Err(err) = install_smooth_scroll() {
            console::error_1(&err);
        }
        if let Err(err) = mount_point_cloud() {
            console::error_1(&err);
        }
    })
}

/// Starts the point cloud background. False when the page has no canvas for it.
#[wasm_bindgen]
pub fn mount_point_cloud() -> Result<bool, JsValue> {
    let window = utils::window()?;
    let document = utils::document()?;
    let cloud = point_cloud::mount(&window, &document, FieldConfig::default())?;
    Ok(cloud.is_some())
}

#[wasm_bindgen]
pub fn install_smooth_scroll() -> Result<(), JsValue> {
    let window = utils::window()?;
    let document = utils::document()?;
    smooth_scroll::install(&window, &document, ScrollConfig::default())
}
