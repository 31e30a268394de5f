//! Paints an [`ExportPlan`] onto an offscreen 2D canvas.

use std::collections::HashMap;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, Document, HtmlAnchorElement, HtmlCanvasElement, HtmlImageElement};

use super::layout::{fit_image, layout_text, ExportPlan};
use super::ExportError;
use crate::scene::{BlurStyle, Layer, LayerKind, TextStyle, Vec2, CANVAS_SIZE};

const CANVAS_FILL: &str = "#000000";
const CORNER_RADIUS: f64 = 16.0;
const TEXT_SHADOW: &str = "rgba(0, 0, 0, 0.5)";
const BLUR_TINT: &str = "rgba(255, 255, 255, 0.1)";
const BLUR_BORDER: &str = "rgba(255, 255, 255, 0.2)";

fn js_message(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn canvas_err(value: JsValue) -> ExportError {
    ExportError::Canvas(js_message(value))
}

fn document() -> Result<Document, ExportError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or(ExportError::TargetMissing)
}

fn create_canvas(document: &Document, size: u32) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), ExportError> {
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(canvas_err)?
        .dyn_into()
        .map_err(|_| ExportError::Canvas("element is not a canvas".to_string()))?;
    canvas.set_width(size);
    canvas.set_height(size);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(canvas_err)?
        .ok_or_else(|| ExportError::Canvas("2d context unavailable".to_string()))?
        .dyn_into()
        .map_err(|_| ExportError::Canvas("unexpected context type".to_string()))?;
    Ok((canvas, ctx))
}

async fn load_image(src: &str) -> Result<HtmlImageElement, ExportError> {
    let img = HtmlImageElement::new().map_err(canvas_err)?;
    img.set_src(src);
    JsFuture::from(img.decode())
        .await
        .map_err(|e| ExportError::ImageLoad(js_message(e)))?;
    Ok(img)
}

async fn fonts_ready(document: &Document) {
    if let Ok(ready) = document.fonts().ready() {
        if let Err(err) = JsFuture::from(ready).await {
            log::warn!("fonts not ready: {}", js_message(err));
        }
    }
}

/// Render the plan at 1080×1080, pixel ratio 1, and return a PNG data URL
pub async fn rasterize(plan: &ExportPlan) -> Result<String, ExportError> {
    let document = document()?;
    let size = CANVAS_SIZE as u32;
    let (canvas, ctx) = create_canvas(&document, size)?;

    fonts_ready(&document).await;

    let mut images = HashMap::new();
    for src in plan.image_sources() {
        images.insert(src.to_string(), load_image(src).await?);
    }

    ctx.set_fill_style_str(CANVAS_FILL);
    ctx.fill_rect(0.0, 0.0, CANVAS_SIZE as f64, CANVAS_SIZE as f64);

    for layer in plan.items() {
        ctx.save();
        let drawn = paint_layer(&document, &canvas, &ctx, layer, &images);
        ctx.restore();
        drawn?;
    }

    canvas.to_data_url_with_type("image/png").map_err(canvas_err)
}

/// Move the origin to the layer anchor and apply its rotation and scale
fn apply_placement(ctx: &CanvasRenderingContext2d, layer: &Layer) -> Result<(), ExportError> {
    let anchor = layer.placement.anchor();
    ctx.translate(anchor.x as f64, anchor.y as f64).map_err(canvas_err)?;
    ctx.rotate(layer.placement.rotation_radians()).map_err(canvas_err)?;
    let scale = layer.scale() as f64;
    ctx.scale(scale, scale).map_err(canvas_err)
}

fn paint_layer(
    document: &Document,
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    layer: &Layer,
    images: &HashMap<String, HtmlImageElement>,
) -> Result<(), ExportError> {
    apply_placement(ctx, layer)?;

    match &layer.kind {
        LayerKind::Image { src, style } | LayerKind::Product { src, style } => {
            let img = images
                .get(src)
                .ok_or_else(|| ExportError::ImageLoad(format!("{} was not loaded", layer.id)))?;
            let natural = Vec2::new(img.natural_width() as f32, img.natural_height() as f32);
            let size = fit_image(layer, natural);
            if let Some(filter) = &style.filter {
                ctx.set_filter(filter);
            }
            ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img,
                -size.x as f64 / 2.0,
                -size.y as f64 / 2.0,
                size.x as f64,
                size.y as f64,
            )
            .map_err(canvas_err)
        }
        LayerKind::Text { text, width, style } => paint_text(ctx, text, *width, style),
        LayerKind::Blur { width, height, style } => paint_blur(document, canvas, ctx, *width, *height, style),
    }
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) -> Result<(), ExportError> {
    let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.arc_to(x + w, y, x + w, y + h, r).map_err(canvas_err)?;
    ctx.arc_to(x + w, y + h, x, y + h, r).map_err(canvas_err)?;
    ctx.arc_to(x, y + h, x, y, r).map_err(canvas_err)?;
    ctx.arc_to(x, y, x + w, y, r).map_err(canvas_err)?;
    ctx.close_path();
    Ok(())
}

fn paint_text(ctx: &CanvasRenderingContext2d, text: &str, width: f32, style: &TextStyle) -> Result<(), ExportError> {
    ctx.set_font(&format!("bold {}px {}", style.font_size, style.font_family));
    let block = layout_text(text, width, style, |s| {
        ctx.measure_text(s).map(|m| m.width() as f32).unwrap_or(0.0)
    });
    let (w, h) = (block.size.x as f64, block.size.y as f64);

    if style.background.is_some() {
        rounded_rect(ctx, -w / 2.0, -h / 2.0, w, h, CORNER_RADIUS)?;
        ctx.set_fill_style_str(&style.css_background());
        ctx.fill();
    }

    ctx.set_fill_style_str(&style.color.to_hex());
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_shadow_color(TEXT_SHADOW);
    ctx.set_shadow_offset_y(4.0);
    ctx.set_shadow_blur(8.0);

    let advance = block.line_advance as f64;
    let first = -h / 2.0 + style.padding as f64 + advance / 2.0;
    for (i, line) in block.lines.iter().enumerate() {
        ctx.fill_text(line, 0.0, first + i as f64 * advance).map_err(canvas_err)?;
    }
    Ok(())
}

/// Frosted-glass region: blur what has been painted so far inside the box
fn paint_blur(
    document: &Document,
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    width: f32,
    height: f32,
    style: &BlurStyle,
) -> Result<(), ExportError> {
    let (w, h) = (width as f64, height as f64);

    // Snapshot the canvas so the blur samples pixels from below the layer only
    let (backdrop, backdrop_ctx) = create_canvas(document, canvas.width())?;
    backdrop_ctx
        .draw_image_with_html_canvas_element(canvas, 0.0, 0.0)
        .map_err(canvas_err)?;

    rounded_rect(ctx, -w / 2.0, -h / 2.0, w, h, CORNER_RADIUS)?;
    ctx.save();
    ctx.clip();
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).map_err(canvas_err)?;
    ctx.set_filter(&format!("blur({}px)", style.strength.max(0.0)));
    ctx.draw_image_with_html_canvas_element(&backdrop, 0.0, 0.0)
        .map_err(canvas_err)?;
    ctx.restore();

    ctx.set_fill_style_str(BLUR_TINT);
    ctx.fill();
    ctx.set_stroke_style_str(BLUR_BORDER);
    ctx.set_line_width(1.0);
    ctx.stroke();
    Ok(())
}

/// Save a data URL through a temporary download link
pub fn download(data_url: &str, filename: &str) -> Result<(), ExportError> {
    let document = document()?;
    let body = document.body().ok_or(ExportError::TargetMissing)?;
    let link: HtmlAnchorElement = document
        .create_element("a")
        .map_err(canvas_err)?
        .dyn_into()
        .map_err(|_| ExportError::Canvas("element is not an anchor".to_string()))?;
    link.set_download(filename);
    link.set_href(data_url);

    body.append_child(&link).map_err(canvas_err)?;
    link.click();
    link.remove();
    log::info!("downloaded {}", filename);
    Ok(())
}
