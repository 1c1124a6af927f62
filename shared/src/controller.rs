//! Session drag controller
//!
//! Turns raw pointer events on session elements into a single drop
//! notification while keeping a floating proxy under the cursor and a shared
//! indicator over the hovered cell.
//!
//! Gesture flow: `Idle → Pressed → Dragging → Ended`. A gesture becomes a drag
//! only once the pointer leaves the threshold box around the press point, and
//! every gesture ends on pointer-up whether or not it ever dragged.
//!
//! The controller owns no listeners. The host binding forwards
//! `mousedown` / `mousemove` / `mouseup`, binds the document-level move/up
//! listeners only while [`DragController::is_active`] is true, and dispatches
//! the [`DropEvent`] returned from [`DragController::pointer_up`].

use log::{debug, warn};

use crate::config::DragConfig;
use crate::geometry::Point;
use crate::gesture::{Gesture, GesturePhase};
use crate::styles::override_stylesheet;
use crate::surface::DragSurface;

/// `MouseEvent.button` value of the main (usually left) button.
pub const PRIMARY_BUTTON: i16 = 0;

/// Third argument of every drop notification.
pub const DROP_EXTRA: i32 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerDown {
    /// Gesture started: suppress the default action, stop propagation and
    /// bind the document-level move/up listeners.
    Started,
    /// Leave the event alone.
    Ignored,
}

/// A completed drop, to be handed to the host's `onDrop(session, cell, extra)`.
#[derive(Clone, Debug, PartialEq)]
pub struct DropEvent<E> {
    pub session: E,
    pub cell: E,
    pub extra: i32,
}

pub struct DragController<S: DragSurface> {
    surface: S,
    config: DragConfig,
    sessions: Vec<S::Element>,
    indicator: Option<S::Element>,
    // Single slot: at most one gesture exists at a time
    active: Option<Gesture<S::Element>>,
    detached: bool,
}

impl<S: DragSurface> DragController<S> {
    /// Wire the controller to every session currently inside `container`.
    ///
    /// Sessions added to the container later are not tracked; attach again
    /// after re-rendering. A missing container or an empty match leaves the
    /// controller attached to nothing, which is not an error.
    pub fn attach(mut surface: S, container: Option<&S::Element>, config: DragConfig) -> Self {
        if !surface.has_element_with_id(&config.style_id) {
            surface.inject_style(&config.style_id, &override_stylesheet(&config));
        }

        let indicator = surface.create_indicator(&config.indicator_class);
        if indicator.is_none() {
            warn!("drop indicator could not be created; drops still work without it");
        }

        let sessions = match container {
            Some(container) => surface.query_all(container, &config.session_selector),
            None => {
                warn!("drag container not found; no sessions wired");
                Vec::new()
            }
        };
        if container.is_some() && sessions.is_empty() {
            warn!("no elements match '{}' in the drag container", config.session_selector);
        }
        debug!("drag controller attached to {} sessions", sessions.len());

        Self {
            surface,
            config,
            sessions,
            indicator,
            active: None,
            detached: false,
        }
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Sessions wired at attach time. Empty after [`Self::detach`].
    pub fn sessions(&self) -> &[S::Element] {
        &self.sessions
    }

    pub fn indicator(&self) -> Option<&S::Element> {
        self.indicator.as_ref()
    }

    /// True between an accepted pointer-down and the matching pointer-up.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.as_ref().is_some_and(Gesture::is_dragging)
    }

    pub fn hovered_cell(&self) -> Option<&S::Element> {
        self.active.as_ref().and_then(|gesture| gesture.hovered_cell.as_ref())
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    // ===== POINTER EVENTS =====

    /// Handle a press on `session`. `target` is the innermost element under
    /// the pointer, which may be a child of the session such as a resize grip.
    pub fn pointer_down(
        &mut self,
        session: &S::Element,
        target: &S::Element,
        button: i16,
        at: Point,
    ) -> PointerDown {
        if button != PRIMARY_BUTTON {
            return PointerDown::Ignored;
        }
        if self.surface.has_class(target, &self.config.resize_handle_class) {
            return PointerDown::Ignored;
        }
        if self.active.is_some() {
            debug!("press ignored: another gesture is in progress");
            return PointerDown::Ignored;
        }
        if !self.sessions.contains(session) {
            return PointerDown::Ignored;
        }

        let session_origin = self.surface.bounding_rect(session).origin();
        self.active = Some(Gesture::new(session.clone(), at, session_origin));
        PointerDown::Started
    }

    pub fn pointer_move(&mut self, at: Point) {
        let Some(gesture) = self.active.as_mut() else {
            return;
        };

        if !gesture.is_dragging() {
            if !at.exceeds(gesture.origin, self.config.threshold_px) {
                return;
            }
            self.surface.set_body_class(&self.config.dragging_body_class, true);
            let proxy = self.surface.create_proxy(&gesture.session, &self.config.proxy_class);
            if proxy.is_none() {
                warn!("drag proxy could not be created; continuing without it");
            }
            self.surface.set_visible(&gesture.session, false);
            gesture.phase = GesturePhase::Dragging { proxy };
            debug!("drag started at ({}, {})", at.x, at.y);
        }

        if let GesturePhase::Dragging { proxy: Some(proxy) } = &gesture.phase {
            self.surface.move_proxy(proxy, gesture.proxy_position(at));
        }

        let cell = find_drop_cell(&self.surface, &self.config, at);
        if let Some(indicator) = &self.indicator {
            match &cell {
                Some(cell) => {
                    let rect = self.surface.bounding_rect(cell);
                    self.surface.show_indicator(indicator, rect);
                }
                None => self.surface.hide_indicator(indicator),
            }
        }
        gesture.hovered_cell = cell;
    }

    /// End the current gesture. Returns the drop to report, if any.
    pub fn pointer_up(&mut self, at: Point) -> Option<DropEvent<S::Element>> {
        let gesture = self.active.take()?;
        let Some(session) = self.end_gesture(gesture) else {
            debug!("press released before the drag threshold");
            return None;
        };

        match find_drop_cell(&self.surface, &self.config, at) {
            Some(cell) => {
                debug!("session dropped at ({}, {})", at.x, at.y);
                Some(DropEvent {
                    session,
                    cell,
                    extra: DROP_EXTRA,
                })
            }
            None => {
                debug!("drop at ({}, {}) is outside every column; discarded", at.x, at.y);
                None
            }
        }
    }

    /// Stop tracking sessions and remove the indicator.
    ///
    /// A gesture still in progress is cancelled: the proxy is removed, the
    /// session shown again and no drop is reported. Calling this twice is a
    /// no-op.
    pub fn detach(&mut self) {
        if self.detached {
            return;
        }
        if let Some(gesture) = self.active.take() {
            debug!("detached mid-gesture; cancelling");
            self.end_gesture(gesture);
        }
        if let Some(indicator) = self.indicator.take() {
            self.surface.remove_element(&indicator);
        }
        self.sessions.clear();
        self.detached = true;
    }

    /// Shared cleanup for pointer-up and cancellation. Returns the session
    /// when the gesture had reached the dragging phase.
    fn end_gesture(&mut self, gesture: Gesture<S::Element>) -> Option<S::Element> {
        self.surface.set_body_class(&self.config.dragging_body_class, false);
        if let Some(indicator) = &self.indicator {
            self.surface.hide_indicator(indicator);
        }
        if !gesture.is_dragging() {
            return None;
        }
        let session = gesture.session.clone();
        if let Some(proxy) = gesture.into_proxy() {
            self.surface.remove_element(&proxy);
        }
        self.surface.set_visible(&session, true);
        Some(session)
    }
}

/// Topmost element under `at` that is a cell inside a column.
fn find_drop_cell<S: DragSurface>(surface: &S, config: &DragConfig, at: Point) -> Option<S::Element> {
    surface.elements_from_point(at).into_iter().find(|element| {
        surface.matches(element, &config.cell_selector)
            && surface.closest(element, &config.column_selector).is_some()
    })
}
