//! Page chrome: a borderless fullscreen canvas and the two counter labels.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, HtmlElement};

use crate::error::{CanvasError, Result};
use crate::frame_loop::{
    fps_label, frame_cost_label, MetricsSink, FPS_LABEL_INITIAL, FRAME_COST_LABEL_INITIAL,
};

fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) -> Result<()> {
    let style = element.style();
    for (name, value) in styles {
        style.set_property(name, value)?;
    }
    Ok(())
}

fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T> {
    document
        .create_element(tag)?
        .dyn_into::<T>()
        .map_err(|_| CanvasError::Dom(format!("<{tag}> has an unexpected type")))
}

/// FPS and frame cost labels pinned to the top left corner.
pub struct Overlay {
    fps: HtmlElement,
    frame_cost: HtmlElement,
}

impl Overlay {
    fn label(document: &Document, width: &str, left: &str, text: &str) -> Result<HtmlElement> {
        let label: HtmlElement = create(document, "div")?;
        set_styles(
            &label,
            &[
                ("background-color", "rgba(50%, 50%, 50%, 0.5)"),
                ("margin", "0px 5px"),
                ("padding", "6px 5px"),
                ("border-radius", "5px"),
                ("width", width),
                ("font-size", "15px"),
                ("text-align", "center"),
                ("color", "white"),
                ("top", "15px"),
                ("left", left),
                ("position", "fixed"),
                ("z-index", "1"),
                ("display", "block"),
            ],
        )?;
        label.set_text_content(Some(text));
        Ok(label)
    }
}

impl MetricsSink for Overlay {
    fn publish_fps(&mut self, fps: u32) {
        self.fps.set_text_content(Some(&fps_label(fps)));
    }

    fn publish_frame_cost(&mut self, ms: u32) {
        self.frame_cost.set_text_content(Some(&frame_cost_label(ms)));
    }
}

/// Styles the body to fill the window and appends the canvas and labels.
pub fn build_page(document: &Document) -> Result<(HtmlCanvasElement, Overlay)> {
    let body = document
        .body()
        .ok_or_else(|| CanvasError::Dom("document has no body".to_string()))?;
    set_styles(
        &body,
        &[
            ("margin", "0px"),
            ("padding", "0px"),
            ("width", "100%"),
            ("height", "100%"),
            ("overflow", "hidden"),
        ],
    )?;

    let canvas: HtmlCanvasElement = create(document, "canvas")?;
    set_styles(&canvas, &[("width", "100%"), ("height", "100%"), ("display", "block")])?;
    body.append_child(&canvas)?;

    let fps = Overlay::label(document, "50px", "10px", FPS_LABEL_INITIAL)?;
    body.append_child(&fps)?;
    let frame_cost = Overlay::label(document, "60px", "80px", FRAME_COST_LABEL_INITIAL)?;
    body.append_child(&frame_cost)?;

    Ok((canvas, Overlay { fps, frame_cost }))
}
