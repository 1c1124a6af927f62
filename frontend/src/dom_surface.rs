//! `DragSurface` over the live browser document

use log::warn;
use timetable_shared::{DragSurface, Point, Rect};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

const PROXY_Z_INDEX: &str = "10000";
const PROXY_OPACITY: &str = "0.8";
const PROXY_SHADOW: &str = "0 10px 25px rgba(0,0,0,0.3)";

#[derive(Clone, Debug)]
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn from_window() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn append_to_body(&self, element: &Element) -> bool {
        let Some(body) = self.document.body() else {
            warn!("document has no body");
            return false;
        };
        match body.append_child(element) {
            Ok(_) => true,
            Err(error) => {
                warn!("failed to append element to body: {:?}", error);
                false
            }
        }
    }
}

fn set_style(element: &Element, properties: &[(&str, &str)]) {
    let Some(html_el) = element.dyn_ref::<HtmlElement>() else {
        return;
    };
    let style = html_el.style();
    for (name, value) in properties {
        if let Err(error) = style.set_property(name, value) {
            warn!("failed to set style '{}': {:?}", name, error);
        }
    }
}

fn px(value: f64) -> String {
    format!("{}px", value)
}

impl DragSurface for DomSurface {
    type Element = Element;

    fn query_all(&self, scope: &Element, selector: &str) -> Vec<Element> {
        let nodes = match scope.query_selector_all(selector) {
            Ok(nodes) => nodes,
            Err(error) => {
                warn!("invalid selector '{}': {:?}", selector, error);
                return Vec::new();
            }
        };
        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn matches(&self, element: &Element, selector: &str) -> bool {
        element.matches(selector).unwrap_or(false)
    }

    fn closest(&self, element: &Element, selector: &str) -> Option<Element> {
        element.closest(selector).ok().flatten()
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn bounding_rect(&self, element: &Element) -> Rect {
        let rect = element.get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn elements_from_point(&self, point: Point) -> Vec<Element> {
        self.document
            .elements_from_point(point.x as f32, point.y as f32)
            .iter()
            .filter_map(|value| value.dyn_into::<Element>().ok())
            .collect()
    }

    fn has_element_with_id(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn inject_style(&mut self, id: &str, css: &str) {
        let style = match self.document.create_element("style") {
            Ok(style) => style,
            Err(error) => {
                warn!("failed to create style element: {:?}", error);
                return;
            }
        };
        style.set_id(id);
        style.set_text_content(Some(css));
        let appended = match self.document.head() {
            Some(head) => head.append_child(&style).is_ok(),
            None => self.append_to_body(&style),
        };
        if !appended {
            warn!("drag override styles were not injected");
        }
    }

    fn create_indicator(&mut self, class: &str) -> Option<Element> {
        let indicator = self
            .document
            .create_element("div")
            .map_err(|error| warn!("failed to create drop indicator: {:?}", error))
            .ok()?;
        indicator.set_class_name(class);
        set_style(&indicator, &[("display", "none")]);
        self.append_to_body(&indicator).then_some(indicator)
    }

    fn show_indicator(&mut self, indicator: &Element, rect: Rect) {
        set_style(
            indicator,
            &[
                ("display", "block"),
                ("left", px(rect.left).as_str()),
                ("top", px(rect.top).as_str()),
                ("width", px(rect.width).as_str()),
                ("height", px(rect.height).as_str()),
            ],
        );
    }

    fn hide_indicator(&mut self, indicator: &Element) {
        set_style(indicator, &[("display", "none")]);
    }

    fn create_proxy(&mut self, source: &Element, class: &str) -> Option<Element> {
        let proxy = source
            .clone_node_with_deep(true)
            .map_err(|error| warn!("failed to clone session: {:?}", error))
            .ok()?
            .dyn_into::<Element>()
            .ok()?;
        if let Err(error) = proxy.class_list().add_1(class) {
            warn!("failed to mark drag proxy: {:?}", error);
        }
        // Pin the size: outside its grid cell the clone would otherwise reflow
        let rect = self.bounding_rect(source);
        set_style(
            &proxy,
            &[
                ("position", "fixed"),
                ("margin", "0"),
                ("box-sizing", "border-box"),
                ("width", px(rect.width).as_str()),
                ("height", px(rect.height).as_str()),
                ("z-index", PROXY_Z_INDEX),
                ("opacity", PROXY_OPACITY),
                ("pointer-events", "none"),
                ("box-shadow", PROXY_SHADOW),
            ],
        );
        self.append_to_body(&proxy).then_some(proxy)
    }

    fn move_proxy(&mut self, proxy: &Element, top_left: Point) {
        set_style(proxy, &[("left", px(top_left.x).as_str()), ("top", px(top_left.y).as_str())]);
    }

    fn remove_element(&mut self, element: &Element) {
        element.remove();
    }

    fn set_visible(&mut self, element: &Element, visible: bool) {
        let visibility = if visible { "visible" } else { "hidden" };
        set_style(element, &[("visibility", visibility)]);
    }

    fn set_body_class(&mut self, class: &str, enabled: bool) {
        let Some(body) = self.document.body() else {
            return;
        };
        let class_list = body.class_list();
        let result = if enabled {
            class_list.add_1(class)
        } else {
            class_list.remove_1(class)
        };
        if let Err(error) = result {
            warn!("failed to toggle body class '{}': {:?}", class, error);
        }
    }
}
