use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, PointerEvent, ResizeObserver};
use yew::prelude::*;

use crate::export::{EXPORT_CANVAS_ID, PRODUCT_MAX_WIDTH};
use crate::interaction::{InteractionController, PointerDown};
use crate::scene::{Layer, LayerId, LayerKind, LayerStore, CANVAS_SIZE};
use crate::types::{EditorMode, Grip};
use crate::utils::client_point;

/// Shared editor state. Pointer events mutate it in place so consecutive
/// events observe each other's writes before the next render.
#[derive(Clone)]
pub struct EditorHandle {
    pub store: Rc<RefCell<LayerStore>>,
    pub controller: Rc<RefCell<InteractionController>>,
}

impl PartialEq for EditorHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store) && Rc::ptr_eq(&self.controller, &other.controller)
    }
}

#[derive(Properties, PartialEq)]
pub struct EditorCanvasProps {
    pub editor: EditorHandle,
    /// Incremented by the owner after every store mutation
    pub render_version: u32,
    pub on_change: Callback<()>,
    pub on_magic: Callback<LayerId>,
}

fn capture_pointer(e: &PointerEvent) {
    let Some(target) = e.current_target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };
    if let Err(err) = target.set_pointer_capture(e.pointer_id()) {
        log::warn!("pointer capture failed: {:?}", err);
    }
}

fn release_pointer(e: &PointerEvent) {
    let Some(target) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };
    if target.has_pointer_capture(e.pointer_id()) {
        if let Err(err) = target.release_pointer_capture(e.pointer_id()) {
            log::warn!("pointer release failed: {:?}", err);
        }
    }
}

/// Callbacks wired to one layer element
struct LayerHandlers {
    on_body_down: Callback<PointerEvent>,
    on_resize_down: Callback<PointerEvent>,
    on_remove: Callback<MouseEvent>,
}

fn layer_content(layer: &Layer, selected: bool) -> Html {
    let scale = format!("transform: scale({});", layer.scale());

    match &layer.kind {
        LayerKind::Image { src, style } => {
            let width = if layer.is_background() { "1080px" } else { "auto" };
            html! {
                <div style={scale}>
                    <img
                        src={src.clone()}
                        alt="layer"
                        draggable="false"
                        class="pointer-events-none rounded-lg object-cover"
                        style={format!(
                            "width: {}; max-width: {}px; filter: {};",
                            width,
                            CANVAS_SIZE,
                            style.filter.as_deref().unwrap_or("none")
                        )}
                    />
                </div>
            }
        }
        LayerKind::Product { src, style } => html! {
            <div style={scale}>
                <img
                    src={src.clone()}
                    alt="product"
                    draggable="false"
                    class="pointer-events-none object-contain drop-shadow-2xl"
                    style={format!(
                        "max-width: {}px; filter: {};",
                        PRODUCT_MAX_WIDTH,
                        style.filter.as_deref().unwrap_or("none")
                    )}
                />
            </div>
        },
        LayerKind::Text { text, style, .. } => html! {
            <div
                class={classes!("text-center", selected.then_some("outline-dashed outline-2 outline-blue-400"))}
                style={format!(
                    "{} color: {}; font-size: {}px; font-weight: bold; font-family: {}; \
                     text-shadow: 0px 4px 8px rgba(0,0,0,0.5); background-color: {}; padding: {}px; \
                     line-height: {}; border-radius: 16px; white-space: pre-wrap; word-break: break-word;",
                    scale,
                    style.color.to_hex(),
                    style.font_size,
                    style.font_family,
                    style.css_background(),
                    style.padding,
                    style.line_height
                )}
            >
                {text.clone()}
            </div>
        },
        LayerKind::Blur { style, .. } => html! {
            <div
                style={format!(
                    "{} width: 100%; height: 100%; backdrop-filter: blur({}px); \
                     background-color: rgba(255, 255, 255, 0.1); border-radius: 16px; \
                     border: 1px solid rgba(255, 255, 255, 0.2);",
                    scale,
                    style.strength
                )}
            />
        },
    }
}

fn layer_view(layer: &Layer, stacking: usize, selected: bool, mode: EditorMode, handlers: LayerHandlers) -> Html {
    let background = layer.is_background();

    let mut style = format!(
        "left: 50%; top: 50%; transform: {}; z-index: {};",
        layer.placement.css_transform(),
        stacking
    );
    match &layer.kind {
        LayerKind::Text { width, .. } => style.push_str(&format!(" width: {}px;", width)),
        LayerKind::Blur { width, height, .. } => {
            style.push_str(&format!(" width: {}px; height: {}px;", width, height))
        }
        _ => {}
    }
    if background {
        style.push_str(" pointer-events: none;");
    }

    let show_chrome = selected && mode == EditorMode::Edit && !background;
    let stop = Callback::from(|e: PointerEvent| e.stop_propagation());

    html! {
        <div
            key={layer.id.as_str().to_string()}
            id={layer.id.as_str().to_string()}
            data-layer-type={layer.layer_type().label()}
            class={classes!(
                "absolute",
                "touch-none",
                "select-none",
                (!background && mode == EditorMode::Edit).then_some(Grip::Body.cursor_class()),
                (!background && mode == EditorMode::Magic).then_some("cursor-pointer"),
                show_chrome.then_some("ring-4 ring-blue-500/60 rounded-2xl"),
            )}
            style={style}
            onpointerdown={handlers.on_body_down}
        >
            {layer_content(layer, selected)}

            if show_chrome {
                <div
                    class="absolute -top-20 left-0 bg-black/75 text-white rounded-full px-4 py-2 flex items-center gap-4 shadow-xl border border-white/20"
                    style="transform: scale(1.5); transform-origin: left bottom;"
                >
                    <button
                        title="Delete layer"
                        class="text-red-400 hover:text-red-300 font-bold"
                        onpointerdown={stop}
                        onclick={handlers.on_remove}
                    >
                        {"✕"}
                    </button>
                    <span class="text-gray-300">{"✥"}</span>
                </div>
                <div
                    data-testid="resize-handle"
                    class={classes!(
                        "absolute", "-bottom-6", "-right-6", "w-12", "h-12", "bg-blue-500",
                        "rounded-full", "border-4", "border-white", "shadow-lg",
                        Grip::Resize.cursor_class()
                    )}
                    style="z-index: 30;"
                    onpointerdown={handlers.on_resize_down}
                />
            }
        </div>
    }
}

/// The scaled editing surface.
///
/// Only the outer wrapper is CSS-scaled to fit the container; the inner
/// 1080×1080 subtree holds untransformed logical coordinates.
#[function_component(EditorCanvas)]
pub fn editor_canvas(props: &EditorCanvasProps) -> Html {
    let container_ref = use_node_ref();

    // Track the rendered width of the container
    {
        let container_ref = container_ref.clone();
        let controller = props.editor.controller.clone();
        let on_change = props.on_change.clone();

        use_effect_with((), move |_| {
            let observer = container_ref.cast::<HtmlElement>().and_then(|element| {
                let measure = {
                    let element = element.clone();
                    move || {
                        let width = element.get_bounding_client_rect().width();
                        if controller.borrow_mut().set_container_width(width) {
                            on_change.emit(());
                        }
                    }
                };
                measure();

                let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |_entries: js_sys::Array| measure());
                match ResizeObserver::new(callback.as_ref().unchecked_ref()) {
                    Ok(observer) => {
                        observer.observe(&element);
                        Some((observer, callback))
                    }
                    Err(err) => {
                        log::error!("ResizeObserver unavailable: {:?}", err);
                        None
                    }
                }
            });

            move || {
                if let Some((observer, callback)) = observer {
                    observer.disconnect();
                    drop(callback);
                }
            }
        });
    }

    let on_pointer_down = |id: LayerId, grip: Grip| {
        let editor = props.editor.clone();
        let on_change = props.on_change.clone();
        let on_magic = props.on_magic.clone();
        Callback::from(move |e: PointerEvent| {
            e.stop_propagation();
            let outcome = {
                let mut store = editor.store.borrow_mut();
                editor
                    .controller
                    .borrow_mut()
                    .pointer_down(&mut store, &id, grip, client_point(&e))
            };
            match outcome {
                PointerDown::Dragging(_) => {
                    capture_pointer(&e);
                    on_change.emit(());
                }
                PointerDown::MagicTarget(id) => on_magic.emit(id),
                PointerDown::Ignored => {}
            }
        })
    };

    let on_remove = |id: LayerId| {
        let editor = props.editor.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            if editor.store.borrow_mut().remove_layer(&id).is_some() {
                on_change.emit(());
            }
        })
    };

    let on_pointer_move = {
        let editor = props.editor.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: PointerEvent| {
            let changed = {
                let mut store = editor.store.borrow_mut();
                editor.controller.borrow_mut().pointer_move(&mut store, client_point(&e))
            };
            if changed {
                on_change.emit(());
            }
        })
    };

    let on_pointer_up = {
        let editor = props.editor.clone();
        Callback::from(move |e: PointerEvent| {
            release_pointer(&e);
            editor.controller.borrow_mut().pointer_up();
        })
    };

    let on_empty_down = {
        let editor = props.editor.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: PointerEvent| {
            {
                let mut store = editor.store.borrow_mut();
                editor.controller.borrow_mut().click_empty(&mut store);
            }
            on_change.emit(());
        })
    };

    let store = props.editor.store.borrow();
    let controller = props.editor.controller.borrow();
    let mode = controller.mode();
    let scale = controller.render_scale().get();

    // DOM order stays stable so pointer capture survives re-renders;
    // stacking comes from z-index instead
    let stacking: HashMap<&LayerId, usize> = store
        .render_order()
        .into_iter()
        .enumerate()
        .map(|(index, layer)| (&layer.id, index))
        .collect();

    let layers = store
        .layers()
        .iter()
        .map(|layer| {
            let handlers = LayerHandlers {
                on_body_down: on_pointer_down(layer.id.clone(), Grip::Body),
                on_resize_down: on_pointer_down(layer.id.clone(), Grip::Resize),
                on_remove: on_remove(layer.id.clone()),
            };
            let stack = stacking.get(&layer.id).copied().unwrap_or_default();
            layer_view(layer, stack, store.is_selected(&layer.id), mode, handlers)
        })
        .collect::<Html>();

    html! {
        <div
            ref={container_ref}
            data-testid="editor-canvas"
            data-render-scale={scale.to_string()}
            class="relative w-full aspect-square overflow-hidden rounded-2xl shadow-2xl bg-black select-none touch-none"
            onpointerdown={on_empty_down}
            onpointermove={on_pointer_move}
            onpointerup={on_pointer_up.clone()}
            onpointercancel={on_pointer_up}
        >
            <div
                class="absolute top-0 left-0"
                style={format!(
                    "width: {size}px; height: {size}px; transform: scale({scale}); transform-origin: top left;",
                    size = CANVAS_SIZE,
                    scale = scale
                )}
            >
                <div id={EXPORT_CANVAS_ID} class="w-full h-full bg-black relative overflow-hidden">
                    {layers}
                </div>
            </div>

            if mode == EditorMode::Magic {
                <div class="absolute inset-0 pointer-events-none flex items-center justify-center" style="z-index: 50;">
                    <div class="bg-black/50 text-white px-4 py-2 rounded-full text-sm animate-bounce">
                        {"✨ Tap an object for magic"}
                    </div>
                </div>
            }
        </div>
    }
}
