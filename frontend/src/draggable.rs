//! JS entry point: `makeDraggable(container, options, onDrop)`
//!
//! Listener wiring around [`DragController`]. Each session gets a `mousedown`
//! listener at attach time; the document-level `mousemove` / `mouseup` pair
//! exists only while a gesture is in progress.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use log::{error, warn};
use timetable_shared::{DragConfig, DragController, Point, PointerDown};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, MouseEvent};

use crate::dom_surface::DomSurface;

type MouseListener = Closure<dyn FnMut(MouseEvent)>;

struct DocumentListeners {
    mousemove: MouseListener,
    mouseup: MouseListener,
}

impl DocumentListeners {
    fn each(&self) -> [(&'static str, &MouseListener); 2] {
        [("mousemove", &self.mousemove), ("mouseup", &self.mouseup)]
    }
}

struct Binding {
    controller: RefCell<DragController<DomSurface>>,
    document: Document,
    on_drop: Function,
    session_listeners: RefCell<Vec<(Element, MouseListener)>>,
    document_listeners: RefCell<Option<DocumentListeners>>,
    // Unbound from the document but possibly still on the call stack:
    // the mouseup listener unbinds itself
    retired_listeners: RefCell<Option<DocumentListeners>>,
}

fn client_point(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

impl Binding {
    fn bind_sessions(self: &Rc<Self>) {
        let sessions = self.controller.borrow().sessions().to_vec();
        let mut listeners = self.session_listeners.borrow_mut();
        for session in sessions {
            let listener = Closure::wrap(Box::new({
                let binding = Rc::downgrade(self);
                let session = session.clone();
                move |event: MouseEvent| {
                    if let Some(binding) = binding.upgrade() {
                        binding.on_mousedown(&session, &event);
                    }
                }
            }) as Box<dyn FnMut(MouseEvent)>);
            if let Err(error) =
                session.add_event_listener_with_callback("mousedown", listener.as_ref().unchecked_ref())
            {
                warn!("failed to wire session: {:?}", error);
                continue;
            }
            listeners.push((session, listener));
        }
    }

    fn on_mousedown(self: &Rc<Self>, session: &Element, event: &MouseEvent) {
        let target = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .unwrap_or_else(|| session.clone());
        let outcome = self.controller.borrow_mut().pointer_down(
            session,
            &target,
            event.button(),
            client_point(event),
        );
        if outcome == PointerDown::Started {
            event.prevent_default();
            event.stop_propagation();
            self.bind_document();
        }
    }

    fn bind_document(self: &Rc<Self>) {
        let mousemove = Closure::wrap(Box::new({
            let binding = Rc::downgrade(self);
            move |event: MouseEvent| {
                if let Some(binding) = binding.upgrade() {
                    binding.controller.borrow_mut().pointer_move(client_point(&event));
                }
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        let mouseup = Closure::wrap(Box::new({
            let binding = Rc::downgrade(self);
            move |event: MouseEvent| {
                if let Some(binding) = binding.upgrade() {
                    binding.on_mouseup(&event);
                }
            }
        }) as Box<dyn FnMut(MouseEvent)>);

        let listeners = DocumentListeners { mousemove, mouseup };
        for (event_name, listener) in listeners.each() {
            if let Err(error) = self
                .document
                .add_event_listener_with_callback(event_name, listener.as_ref().unchecked_ref())
            {
                warn!("failed to listen for document {}: {:?}", event_name, error);
            }
        }
        self.unbind_document();
        *self.document_listeners.borrow_mut() = Some(listeners);
    }

    fn unbind_document(&self) {
        let Some(listeners) = self.document_listeners.borrow_mut().take() else {
            return;
        };
        for (event_name, listener) in listeners.each() {
            let _ = self
                .document
                .remove_event_listener_with_callback(event_name, listener.as_ref().unchecked_ref());
        }
        *self.retired_listeners.borrow_mut() = Some(listeners);
    }

    fn on_mouseup(&self, event: &MouseEvent) {
        self.unbind_document();
        let dropped = self.controller.borrow_mut().pointer_up(client_point(event));
        // Controller borrow is released: the handler may call detach()
        let Some(dropped) = dropped else {
            return;
        };
        if let Err(error) = self.on_drop.call3(
            &JsValue::NULL,
            &dropped.session,
            &dropped.cell,
            &JsValue::from(dropped.extra),
        ) {
            error!("onDrop handler threw: {:?}", error);
        }
    }

    fn detach(&self) {
        self.unbind_document();
        for (session, listener) in self.session_listeners.borrow_mut().drain(..) {
            let _ = session
                .remove_event_listener_with_callback("mousedown", listener.as_ref().unchecked_ref());
        }
        match self.controller.try_borrow_mut() {
            Ok(mut controller) => controller.detach(),
            Err(_) => warn!("detach called while the controller is busy"),
        }
    }
}

impl Drop for Binding {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Handle returned to JS. `detach()` (or its alias `destroy()`) removes every
/// listener and the drop indicator, cancelling a drag in progress.
#[wasm_bindgen]
pub struct DraggableHandle {
    binding: Rc<Binding>,
}

impl DraggableHandle {
    pub fn attach(
        surface: DomSurface,
        container: Option<&Element>,
        config: DragConfig,
        on_drop: Function,
    ) -> Self {
        let document = surface.document().clone();
        let binding = Rc::new(Binding {
            controller: RefCell::new(DragController::attach(surface, container, config)),
            document,
            on_drop,
            session_listeners: RefCell::new(Vec::new()),
            document_listeners: RefCell::new(None),
            retired_listeners: RefCell::new(None),
        });
        binding.bind_sessions();
        Self { binding }
    }
}

#[wasm_bindgen]
impl DraggableHandle {
    pub fn detach(&self) {
        self.binding.detach();
    }

    pub fn destroy(&self) {
        self.detach();
    }

    #[wasm_bindgen(js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.binding
            .controller
            .try_borrow()
            .is_ok_and(|controller| controller.is_dragging())
    }

    #[wasm_bindgen(js_name = sessionCount)]
    pub fn session_count(&self) -> usize {
        self.binding.session_listeners.borrow().len()
    }
}

/// Make every session inside `container` draggable onto timetable cells.
///
/// `options` may be `undefined` or an object overriding any `DragConfig`
/// field (`sessionSelector`, `cellSelector`, `columnSelector`, ...).
/// `onDrop(session, cell, 0)` runs once per completed drop.
#[wasm_bindgen(js_name = makeDraggable)]
pub fn make_draggable(
    container: Option<Element>,
    options: JsValue,
    on_drop: Function,
) -> Result<DraggableHandle, JsError> {
    let config = config_from_js(options)?;
    let surface = DomSurface::from_window()
        .ok_or_else(|| JsError::new("makeDraggable needs a window with a document"))?;
    Ok(DraggableHandle::attach(surface, container.as_ref(), config, on_drop))
}

fn config_from_js(options: JsValue) -> Result<DragConfig, JsError> {
    if options.is_undefined() || options.is_null() {
        return Ok(DragConfig::default());
    }
    let config: DragConfig = serde_wasm_bindgen::from_value(options)?;
    config.validate()?;
    Ok(config)
}
