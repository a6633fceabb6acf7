//! Browser tests; run with `wasm-pack test --headless --firefox crates/wasm`.
#![cfg(target_arch = "wasm32")]

use metaball_wasm::start;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlCanvasElement, MouseEvent};

wasm_bindgen_test_configure!(run_in_browser);

fn canvas(width: u32, height: u32) -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas: HtmlCanvasElement = document.create_element("canvas").unwrap().dyn_into().unwrap();
    canvas.set_width(width);
    canvas.set_height(height);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn start_rejects_zero_sources_before_touching_gl() {
    assert!(start(canvas(64, 48), 0, 1).is_err());
}

#[wasm_bindgen_test]
fn stop_is_observable_and_repeatable() {
    let handle = start(canvas(64, 48), 4, 7).unwrap();
    assert!(!handle.is_stopped());
    handle.stop();
    handle.stop();
    assert!(handle.is_stopped());
}

#[wasm_bindgen_test]
fn pointer_events_after_drop_reach_no_listener() {
    let canvas = canvas(64, 48);
    let handle = start(canvas.clone(), 4, 7).unwrap();
    let event = MouseEvent::new("mousemove").unwrap();
    assert!(canvas.dispatch_event(&event).unwrap());

    // Dropping without stop() must detach the listener before the closure is freed.
    drop(handle);
    let event = MouseEvent::new("mousemove").unwrap();
    assert!(canvas.dispatch_event(&event).unwrap());
}
