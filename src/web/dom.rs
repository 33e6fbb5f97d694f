use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::error::PageError;
use crate::stage::{Point, Rect, Stage, Viewport};

pub fn window() -> Result<Window, PageError> {
    web_sys::window().ok_or(PageError::NoWindow)
}

pub fn document() -> Result<Document, PageError> {
    window()?.document().ok_or(PageError::NoDocument)
}

pub fn query_all(doc: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = doc.query_selector_all(selector) else {
        log::warn!("bad selector `{selector}`");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|n| n.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn query(doc: &Document, selector: &str) -> Option<HtmlElement> {
    doc.query_selector(selector).ok().flatten().and_then(|e| e.dyn_into().ok())
}

pub fn query_in(scope: &Element, selector: &str) -> Option<HtmlElement> {
    scope.query_selector(selector).ok().flatten().and_then(|e| e.dyn_into().ok())
}

pub fn by_id(doc: &Document, id: &str) -> Option<HtmlElement> {
    doc.get_element_by_id(id).and_then(|e| e.dyn_into().ok())
}

/// Viewport-relative box, matching `MouseEvent::client_x/y`.
pub fn client_rect(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.top(), r.left(), r.width(), r.height())
}

pub fn pointer(evt: &web_sys::MouseEvent) -> Point {
    Point { x: evt.client_x() as f64, y: evt.client_y() as f64 }
}

pub fn create(doc: &Document, tag: &str, class: &str) -> Result<HtmlElement, PageError> {
    let el: HtmlElement = doc.create_element(tag)?.dyn_into().map_err(|_| PageError::Js(format!("<{tag}> is not an HtmlElement")))?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = el.style().set_property(property, value) {
        log::debug!("style {property}: {err:?}");
    }
}

/// The live document seen through [`Stage`].
pub struct DomStage {
    window: Window,
    document: Document,
}

impl DomStage {
    pub fn new() -> Result<Self, PageError> {
        let window = window()?;
        let document = window.document().ok_or(PageError::NoDocument)?;
        Ok(Self { window, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Stage for DomStage {
    type Node = HtmlElement;

    fn select_all(&self, selector: &str) -> Vec<HtmlElement> {
        query_all(&self.document, selector)
    }

    fn select(&self, selector: &str) -> Option<HtmlElement> {
        query(&self.document, selector)
    }

    fn select_within(&self, scope: &HtmlElement, selector: &str) -> Option<HtmlElement> {
        query_in(scope, selector)
    }

    fn children(&self, node: &HtmlElement) -> Vec<HtmlElement> {
        let kids = node.children();
        (0..kids.length())
            .filter_map(|i| kids.item(i))
            .filter_map(|e| e.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn attribute(&self, node: &HtmlElement, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn text(&self, node: &HtmlElement) -> Option<String> {
        node.text_content()
    }

    fn bounds(&self, node: &HtmlElement) -> Option<Rect> {
        let mut rect = client_rect(node);
        rect.top += self.viewport().scroll_y;
        Some(rect)
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            scroll_y: self.window.scroll_y().unwrap_or(0.0),
            height: self.window.inner_height().ok().and_then(|h| h.as_f64()).unwrap_or(0.0),
        }
    }
}
