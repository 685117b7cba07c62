use frontline_core::InputEvent;
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;
use yew::prelude::*;

/// Forwards window-level mouse moves and releases to `on_event`.
///
/// The listeners are attached once; the latest callback is used for every
/// event.
#[hook]
pub fn use_pointer_events(on_event: Callback<InputEvent>) {
    let handler = use_mut_ref(|| on_event.clone());
    *handler.borrow_mut() = on_event;

    use_effect_with((), move |_| {
        let listeners = web_sys::window().map(|window| {
            let move_handler = handler.clone();
            let on_move = EventListener::new(&window, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let callback = move_handler.borrow().clone();
                callback.emit(InputEvent::MouseMove {
                    x: f64::from(event.client_x()),
                    y: f64::from(event.client_y()),
                    timestamp_ms: js_sys::Date::now(),
                });
            });

            let up_handler = handler;
            let on_up = EventListener::new(&window, "mouseup", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let callback = up_handler.borrow().clone();
                callback.emit(InputEvent::MouseUp {
                    x: f64::from(event.client_x()),
                    y: f64::from(event.client_y()),
                });
            });

            (on_move, on_up)
        });

        move || drop(listeners)
    });
}
