//! Browser bindings for the metaball renderer.
//!
//! The page owns the canvas and its size; [`start`] takes a ready canvas,
//! builds the GL backend on its WebGL2 context, and drives the render loop
//! from `requestAnimationFrame` until [`MetaballHandle::stop`] is called.
#![cfg(target_arch = "wasm32")]

use metaball_core::render::GlBackend;
use metaball_core::{
    FieldSourceSet, RenderLoop, RendererConfig, ShaderConstants, StopSignal, TickStatus,
};
use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent, WebGl2RenderingContext};

/// `None` once the loop has stopped and its GL objects are released.
type SharedLoop = Rc<RefCell<Option<RenderLoop<GlBackend>>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Routes `log` records to the browser console and panics to `console.error`.
#[wasm_bindgen(start)]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// Returned to JS by [`start`]; stopping is its only operation.
///
/// Freeing the handle from JS stops the loop too, so a dropped handle never
/// leaves a listener or frame callback pointing at freed Rust closures.
#[wasm_bindgen]
pub struct MetaballHandle {
    stop: StopSignal,
    canvas: HtmlCanvasElement,
    on_pointer_move: Closure<dyn FnMut(MouseEvent)>,
}

#[wasm_bindgen]
impl MetaballHandle {
    /// Stops the loop before its next tick and detaches the pointer listener.
    pub fn stop(&self) {
        self.stop.stop();
        let _ = self.canvas.remove_event_listener_with_callback(
            "mousemove",
            self.on_pointer_move.as_ref().unchecked_ref(),
        );
    }

    #[wasm_bindgen(js_name = isStopped)]
    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }
}

impl Drop for MetaballHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Starts rendering `count` sources into `canvas` at its current size.
///
/// Any setup failure (bad count, missing WebGL2, shader compile, link, or
/// binding errors) rejects before the first frame with the diagnostic text.
#[wasm_bindgen]
pub fn start(canvas: HtmlCanvasElement, count: usize, seed: u32) -> Result<MetaballHandle, JsValue> {
    let config = RendererConfig {
        count,
        seed: seed.into(),
        ..RendererConfig::with_size(canvas.width(), canvas.height())
    };
    config.validate().map_err(to_js)?;
    let viewport = config.viewport().map_err(to_js)?;
    let constants = ShaderConstants::new(viewport, config.count).map_err(to_js)?;

    let webgl: WebGl2RenderingContext = canvas
        .get_context("webgl2")?
        .ok_or("WebGL2 not supported")?
        .dyn_into()?;
    let gl = glow::Context::from_webgl2_context(webgl);
    let backend = GlBackend::new(gl, &constants).map_err(to_js)?;
    let sources = FieldSourceSet::spawn(&config).map_err(to_js)?;

    let render_loop: SharedLoop = Rc::new(RefCell::new(Some(RenderLoop::new(sources, backend))));
    let stop = StopSignal::new();

    let on_pointer_move = {
        let render_loop = render_loop.clone();
        Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
            if let Some(lp) = render_loop.borrow_mut().as_mut() {
                let p = viewport.from_top_left(ev.offset_x() as f32, ev.offset_y() as f32);
                lp.on_pointer_move(p.x, p.y);
            }
        })
    };
    canvas.add_event_listener_with_callback("mousemove", on_pointer_move.as_ref().unchecked_ref())?;

    schedule_frames(render_loop, stop.clone())?;

    Ok(MetaballHandle {
        stop,
        canvas,
        on_pointer_move,
    })
}

/// Installs the self-rescheduling frame callback.
///
/// When the loop reports `Stopped` the callback drops the loop (releasing
/// its GL objects), releases itself from its slot, and does not request
/// another frame. wasm-bindgen defers freeing a closure dropped while it
/// runs until the call returns.
fn schedule_frames(render_loop: SharedLoop, stop: StopSignal) -> Result<(), JsValue> {
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let next = callback.clone();

    *callback.borrow_mut() = Some(Closure::new(move || {
        let status = match render_loop.borrow_mut().as_mut() {
            Some(lp) => lp.step(&stop),
            None => TickStatus::Stopped,
        };
        if status == TickStatus::Stopped {
            if let Some(lp) = render_loop.borrow_mut().take() {
                log::info!("metaball loop stopped after {} ticks", lp.frame_index());
            }
            // Breaks the slot -> closure -> slot cycle.
            let _ = next.borrow_mut().take();
            return;
        }
        if let Err(e) = request_frame(&next) {
            log::error!("requestAnimationFrame failed: {e:?}");
        }
    }));

    request_frame(&callback)
}

fn request_frame(callback: &FrameCallback) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no global window")?;
    let borrowed = callback.borrow();
    let closure = borrowed.as_ref().ok_or("frame callback released")?;
    window.request_animation_frame(closure.as_ref().unchecked_ref())?;
    Ok(())
}

fn to_js(e: impl Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
