//! Per-gesture state, created at pointer-down and dropped at pointer-up

use crate::geometry::Point;

#[derive(Clone, Debug, PartialEq)]
pub enum GesturePhase<E> {
    /// Button is down but the pointer has not left the threshold box yet
    Pressed,
    /// Threshold crossed; never reverts to `Pressed`.
    /// `proxy` is `None` only when the surface failed to clone the session.
    Dragging { proxy: Option<E> },
}

/// One press-move-release interaction on a single session.
#[derive(Clone, Debug)]
pub struct Gesture<E> {
    pub session: E,
    pub origin: Point,
    /// Pointer position relative to the session's top-left corner at press time
    pub grab_offset: Point,
    pub phase: GesturePhase<E>,
    pub hovered_cell: Option<E>,
}

impl<E> Gesture<E> {
    pub fn new(session: E, origin: Point, session_origin: Point) -> Self {
        Self {
            session,
            origin,
            grab_offset: origin - session_origin,
            phase: GesturePhase::Pressed,
            hovered_cell: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging { .. })
    }

    /// Where the proxy's top-left corner goes so the grab point stays under the cursor.
    pub fn proxy_position(&self, pointer: Point) -> Point {
        pointer - self.grab_offset
    }

    /// Leave the gesture, handing back the proxy if one was created.
    pub fn into_proxy(self) -> Option<E> {
        match self.phase {
            GesturePhase::Dragging { proxy } => proxy,
            GesturePhase::Pressed => None,
        }
    }
}
