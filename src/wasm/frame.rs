use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::Window;

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Handle to a running `requestAnimationFrame` loop.
#[derive(Debug, Clone)]
pub struct FrameHandle {
    window: Window,
    slot: FrameSlot,
    request: Rc<Cell<Option<i32>>>,
    cancelled: Rc<Cell<bool>>,
}

impl FrameHandle {
    /// Stop rescheduling. The frame closure is released here unless the
    /// loop is cancelled from inside its own callback.
    pub fn cancel(&self) {
        self.cancelled.set(true);
        // no pending request means the callback is on the stack right now
        if let Some(id) = self.request.take() {
            let _ = self.window.cancel_animation_frame(id);
            self.slot.borrow_mut().take();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Call `on_frame` with the frame timestamp on every display refresh until
/// the returned handle is cancelled.
pub fn start(window: &Window, mut on_frame: impl FnMut(f64) + 'static) -> Result<FrameHandle, JsValue> {
    // `slot` holds the frame closure so that it can keep calling
    // `request_animation_frame` on itself. The `Option` lets us create the
    // closure first and then store it where the closure can reach it.
    let slot: FrameSlot = Rc::new(RefCell::new(None));
    let handle = FrameHandle {
        window: window.clone(),
        slot: slot.clone(),
        request: Rc::new(Cell::new(None)),
        cancelled: Rc::new(Cell::new(false)),
    };

    let inner = handle.clone();
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        inner.request.set(None);
        if inner.cancelled.get() {
            return;
        }
        on_frame(timestamp);
        if inner.cancelled.get() {
            return;
        }

        // schedule next
        let next = match inner.slot.borrow().as_ref() {
            Some(cb) => inner.window.request_animation_frame(cb.as_ref().unchecked_ref()),
            None => return,
        };
        match next {
            Ok(id) => inner.request.set(Some(id)),
            Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
        }
    }) as Box<dyn FnMut(f64)>));

    let first = match slot.borrow().as_ref() {
        Some(cb) => window.request_animation_frame(cb.as_ref().unchecked_ref())?,
        None => return Err(JsValue::from_str("frame closure missing")),
    };
    handle.request.set(Some(first));
    Ok(handle)
}
