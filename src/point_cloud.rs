// Browser side of the point cloud background.
//
// Finds the `<canvas id="point-cloud-canvas">`, keeps it the size of the
// viewport, tracks the mouse and drives a ParticleField from
// `requestAnimationFrame`. A page without the canvas gets nothing.

use crate::animation::{self, FrameContext};
use crate::field::{FieldConfig, ParticleField};
use crate::pointer::PointerState;
use crate::renderer::CanvasRenderer;
use crate::utils::{self, Timer};
use rand::rngs::ThreadRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, MouseEvent, Window};

pub const CANVAS_ID: &str = "point-cloud-canvas";

pub struct PointCloud {
    canvas: HtmlCanvasElement,
    renderer: CanvasRenderer,
    field: ParticleField,
    pointer: PointerState,
    rng: ThreadRng,
}

impl PointCloud {
    pub fn new(
        canvas: HtmlCanvasElement,
        renderer: CanvasRenderer,
        viewport: (f64, f64),
        config: FieldConfig,
    ) -> PointCloud {
        let mut rng = rand::thread_rng();
        let (width, height) = viewport;
        set_canvas_size(&canvas, width, height);
        let field = ParticleField::new(width, height, config, &mut rng);
        PointCloud {
            canvas,
            renderer,
            field,
            pointer: PointerState::new(config.interaction_radius),
            rng,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        set_canvas_size(&self.canvas, width, height);
        self.field.resize(width, height, &mut self.rng);
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.set(x, y);
    }

    pub fn pointer_left(&mut self) {
        self.pointer.clear();
    }

    pub fn frame(&mut self, frame: &FrameContext) {
        {
            let _timer = Timer::new("PointCloud::update");
            self.field.tick(&self.pointer, frame);
        }
        let _timer = Timer::new("PointCloud::render");
        self.renderer.draw_field(&self.field);
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }
}

fn set_canvas_size(canvas: &HtmlCanvasElement, width: f64, height: f64) {
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
}

pub fn viewport_size(window: &Window) -> Result<(f64, f64), JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((width, height))
}

/// Builds the point cloud on `document`, wires its listeners and starts the
/// animation loop. Returns `Ok(None)` without touching anything when the page
/// has no usable canvas.
pub fn mount(
    window: &Window,
    document: &Document,
    config: FieldConfig,
) -> Result<Option<Rc<RefCell<PointCloud>>>, JsValue> {
    let canvas = match document
        .get_element_by_id(CANVAS_ID)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
    {
        Some(canvas) => canvas,
        None => {
            utils::debug("point cloud: no canvas on this page");
            return Ok(None);
        }
    };
    let renderer = match CanvasRenderer::from_canvas(&canvas)? {
        Some(renderer) => renderer,
        None => {
            utils::debug("point cloud: canvas has no 2d context");
            return Ok(None);
        }
    };

    let viewport = viewport_size(window)?;
    let cloud = Rc::new(RefCell::new(PointCloud::new(canvas, renderer, viewport, config)));
    add_listeners(window, &cloud)?;

    let looped = cloud.clone();
    animation::start_loop(window.clone(), move |frame| {
        looped.borrow_mut().frame(frame);
    })?;
    Ok(Some(cloud))
}

fn add_listeners(window: &Window, cloud: &Rc<RefCell<PointCloud>>) -> Result<(), JsValue> {
    {
        let cloud = cloud.clone();
        let resized = window.clone();
        let on_resize = Closure::wrap(Box::new(move |_: web_sys::Event| {
            if let Ok((width, height)) = viewport_size(&resized) {
                cloud.borrow_mut().resize(width, height);
            }
        }) as Box<dyn FnMut(_)>);
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        on_resize.forget();
    }

    {
        let cloud = cloud.clone();
        let on_move = Closure::wrap(Box::new(move |event: MouseEvent| {
            cloud
                .borrow_mut()
                .pointer_moved(event.client_x() as f64, event.client_y() as f64);
        }) as Box<dyn FnMut(_)>);
        window.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        on_move.forget();
    }

    {
        let cloud = cloud.clone();
        let on_out = Closure::wrap(Box::new(move |event: MouseEvent| {
            // mouseout also fires between child elements; only a null
            // relatedTarget means the pointer left the window
            if event.related_target().is_none() {
                cloud.borrow_mut().pointer_left();
            }
        }) as Box<dyn FnMut(_)>);
        window.add_event_listener_with_callback("mouseout", on_out.as_ref().unchecked_ref())?;
        on_out.forget();
    }

    Ok(())
}
