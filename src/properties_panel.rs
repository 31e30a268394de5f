use yew::prelude::*;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use crate::scene::{BlurStyle, Color, ImageStyle, Layer, LayerId, LayerKind, LayerStyle, LayerUpdate, TextStyle};
use crate::utils::parse_number;

pub const TEXT_COLORS: [&str; 6] = ["#ffffff", "#000000", "#ef4444", "#3b82f6", "#22c55e", "#facc15"];
/// `None` is the transparent background
pub const BACKGROUND_COLORS: [Option<&str>; 5] = [None, Some("#ffffff"), Some("#000000"), Some("#ef4444"), Some("#3b82f6")];
pub const IMAGE_FILTERS: [(&str, Option<&str>); 5] = [
    ("None", None),
    ("Bright", Some("brightness(1.2)")),
    ("Contrast", Some("contrast(1.3)")),
    ("Mono", Some("grayscale(1)")),
    ("Warm", Some("sepia(0.4) saturate(1.4)")),
];

#[derive(Properties, PartialEq)]
pub struct PropertiesPanelProps {
    pub layer: Option<Layer>,
    pub on_update: Callback<(LayerId, LayerUpdate)>,
    pub on_remove: Callback<LayerId>,
}

/// Range input that emits parsed values
fn slider(label: &str, value: f32, min: f32, max: f32, step: f32, on_value: Callback<f32>) -> Html {
    let oninput = Callback::from(move |e: InputEvent| {
        if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
            if let Some(v) = parse_number(&input.value()) {
                on_value.emit(v);
            }
        }
    });

    html! {
        <div class="space-y-1">
            <label class="block text-xs font-medium text-gray-700">
                {format!("{}: {}", label, value)}
            </label>
            <input
                type="range"
                min={min.to_string()}
                max={max.to_string()}
                step={step.to_string()}
                value={value.to_string()}
                {oninput}
                class="w-full accent-blue-600"
            />
        </div>
    }
}

fn swatch(css: &str, active: bool, onclick: Callback<MouseEvent>) -> Html {
    html! {
        <button
            title={css.to_string()}
            {onclick}
            class={classes!(
                "w-8",
                "h-8",
                "rounded-full",
                "border-2",
                if active { "border-blue-500 scale-110" } else { "border-gray-200" }
            )}
            style={format!("background: {};", css)}
        />
    }
}

fn text_controls(id: &LayerId, text: &str, style: &TextStyle, on_update: &Callback<(LayerId, LayerUpdate)>) -> Html {
    let emit_style = {
        let id = id.clone();
        let on_update = on_update.clone();
        move |style: TextStyle| on_update.emit((id.clone(), LayerUpdate::style(LayerStyle::Text(style))))
    };

    let on_content = {
        let id = id.clone();
        let on_update = on_update.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(area) = e.target_dyn_into::<HtmlTextAreaElement>() {
                on_update.emit((id.clone(), LayerUpdate::content(area.value())));
            }
        })
    };

    let on_font_size = {
        let style = style.clone();
        let emit_style = emit_style.clone();
        Callback::from(move |font_size: f32| emit_style(TextStyle { font_size, ..style.clone() }))
    };

    let on_opacity = {
        let style = style.clone();
        let emit_style = emit_style.clone();
        Callback::from(move |background_opacity: f32| emit_style(TextStyle { background_opacity, ..style.clone() }))
    };

    let colors = TEXT_COLORS.iter().filter_map(|hex| Color::from_hex(hex)).map(|color| {
        let active = style.color == color;
        let style = style.clone();
        let emit_style = emit_style.clone();
        let onclick = Callback::from(move |_: MouseEvent| emit_style(TextStyle { color, ..style.clone() }));
        swatch(&color.to_hex(), active, onclick)
    }).collect::<Html>();

    let backgrounds = BACKGROUND_COLORS.iter().map(|hex| {
        let background = hex.and_then(Color::from_hex);
        let style = style.clone();
        let emit_style = emit_style.clone();
        let active = style.background == background;
        let css = background.map(|c| c.to_hex()).unwrap_or_else(|| {
            "repeating-conic-gradient(#d1d5db 0% 25%, #ffffff 0% 50%) 50% / 12px 12px".to_string()
        });
        let onclick = Callback::from(move |_: MouseEvent| emit_style(TextStyle { background, ..style.clone() }));
        swatch(&css, active, onclick)
    }).collect::<Html>();

    html! {
        <div class="space-y-4">
            <div class="space-y-1">
                <label class="block text-xs font-medium text-gray-700">{"Text"}</label>
                <textarea
                    value={text.to_string()}
                    oninput={on_content}
                    rows="3"
                    class="w-full px-2 py-1 border border-gray-300 rounded text-sm bg-white text-gray-900 resize-none"
                />
            </div>
            {slider("Font size", style.font_size, 20.0, 300.0, 1.0, on_font_size)}
            <div class="space-y-1">
                <label class="block text-xs font-medium text-gray-700">{"Color"}</label>
                <div class="flex gap-2 flex-wrap">{colors}</div>
            </div>
            <div class="space-y-1">
                <label class="block text-xs font-medium text-gray-700">{"Background"}</label>
                <div class="flex gap-2 flex-wrap">{backgrounds}</div>
            </div>
            {slider("Background opacity", style.background_opacity, 0.0, 1.0, 0.1, on_opacity)}
        </div>
    }
}

fn blur_controls(id: &LayerId, style: &BlurStyle, on_update: &Callback<(LayerId, LayerUpdate)>) -> Html {
    let on_strength = {
        let id = id.clone();
        let on_update = on_update.clone();
        Callback::from(move |strength: f32| {
            on_update.emit((id.clone(), LayerUpdate::style(LayerStyle::Blur(BlurStyle { strength }))))
        })
    };
    slider("Blur strength", style.strength, 0.0, 50.0, 1.0, on_strength)
}

fn image_controls(id: &LayerId, style: &ImageStyle, on_update: &Callback<(LayerId, LayerUpdate)>) -> Html {
    let buttons = IMAGE_FILTERS.iter().map(|(label, filter)| {
        let active = style.filter.as_deref() == *filter;
        let onclick = {
            let id = id.clone();
            let on_update = on_update.clone();
            let filter = filter.map(str::to_string);
            Callback::from(move |_: MouseEvent| {
                let style = ImageStyle { filter: filter.clone() };
                on_update.emit((id.clone(), LayerUpdate::style(LayerStyle::Image(style))));
            })
        };
        html! {
            <button
                {onclick}
                class={classes!(
                    "px-2",
                    "py-1",
                    "rounded",
                    "text-xs",
                    "border",
                    if active { "bg-blue-500 text-white border-blue-600" } else { "bg-white border-gray-300 hover:bg-gray-50" }
                )}
            >
                {*label}
            </button>
        }
    }).collect::<Html>();

    html! {
        <div class="space-y-1">
            <label class="block text-xs font-medium text-gray-700">{"Filter"}</label>
            <div class="flex gap-2 flex-wrap">{buttons}</div>
        </div>
    }
}

#[function_component(PropertiesPanel)]
pub fn properties_panel(props: &PropertiesPanelProps) -> Html {
    let Some(layer) = props.layer.as_ref() else {
        return html! {
            <div class="bg-white border border-gray-200 rounded-2xl p-4">
                <h2 class="text-sm font-semibold pb-2 mb-3 border-b border-gray-200">{"Properties"}</h2>
                <p class="text-xs text-gray-500">{"Select a layer to edit its properties"}</p>
            </div>
        };
    };

    let on_remove = {
        let on_remove = props.on_remove.clone();
        let id = layer.id.clone();
        Callback::from(move |_: MouseEvent| on_remove.emit(id.clone()))
    };

    let controls = match &layer.kind {
        LayerKind::Text { text, style, .. } => text_controls(&layer.id, text, style, &props.on_update),
        LayerKind::Blur { style, .. } => blur_controls(&layer.id, style, &props.on_update),
        LayerKind::Image { style, .. } | LayerKind::Product { style, .. } => {
            image_controls(&layer.id, style, &props.on_update)
        }
    };

    html! {
        <div class="bg-white border border-gray-200 rounded-2xl p-4">
            <div class="flex items-center justify-between pb-2 mb-3 border-b border-gray-200">
                <h2 class="text-sm font-semibold capitalize">{layer.layer_type().label()}</h2>
                <button
                    title="Delete layer"
                    onclick={on_remove}
                    class="text-red-500 hover:bg-red-50 p-1 rounded text-sm"
                >
                    {"Delete"}
                </button>
            </div>
            {controls}
        </div>
    }
}
