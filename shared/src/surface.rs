//! Document abstraction the drag controller drives
//!
//! The controller never touches a concrete DOM. Everything it reads (geometry,
//! selector matches, hit-testing) and everything it writes (indicator, proxy,
//! visibility, body marker) goes through this trait, so the same state machine
//! runs against `web-sys` in the browser and against an in-memory document in
//! tests.

use crate::geometry::{Point, Rect};

pub trait DragSurface {
    /// Handle to a node. Cloning must be cheap and must not copy the node.
    type Element: Clone + PartialEq;

    // ===== QUERIES =====

    /// Descendants of `scope` matching `selector`, in document order.
    fn query_all(&self, scope: &Self::Element, selector: &str) -> Vec<Self::Element>;

    fn matches(&self, element: &Self::Element, selector: &str) -> bool;

    /// Nearest inclusive ancestor matching `selector`.
    fn closest(&self, element: &Self::Element, selector: &str) -> Option<Self::Element>;

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    /// Every hit-testable element under `point`, topmost first.
    fn elements_from_point(&self, point: Point) -> Vec<Self::Element>;

    fn has_element_with_id(&self, id: &str) -> bool;

    // ===== MUTATIONS =====

    fn inject_style(&mut self, id: &str, css: &str);

    /// Append a hidden indicator element with `class` to the body.
    fn create_indicator(&mut self, class: &str) -> Option<Self::Element>;

    fn show_indicator(&mut self, indicator: &Self::Element, rect: Rect);

    fn hide_indicator(&mut self, indicator: &Self::Element);

    /// Append a deep, non-interactive copy of `source` to the body.
    fn create_proxy(&mut self, source: &Self::Element, class: &str) -> Option<Self::Element>;

    fn move_proxy(&mut self, proxy: &Self::Element, top_left: Point);

    fn remove_element(&mut self, element: &Self::Element);

    fn set_visible(&mut self, element: &Self::Element, visible: bool);

    fn set_body_class(&mut self, class: &str, enabled: bool);
}
