use yew::prelude::*;
use crate::scene::{Layer, LayerId, LayerKind};

#[derive(Properties, PartialEq)]
pub struct LayersPanelProps {
    pub layers: Vec<Layer>,
    pub selected: Option<LayerId>,
    pub on_select: Callback<LayerId>,
    pub on_remove: Callback<LayerId>,
}

fn layer_title(layer: &Layer) -> String {
    if layer.is_background() {
        return "Background".to_string();
    }
    match &layer.kind {
        LayerKind::Text { text, .. } => {
            let preview: String = text.chars().take(24).collect();
            if preview.len() < text.len() {
                format!("{}…", preview)
            } else {
                preview
            }
        }
        LayerKind::Image { .. } => "Image".to_string(),
        LayerKind::Product { .. } => "Product".to_string(),
        LayerKind::Blur { .. } => "Blur".to_string(),
    }
}

fn layer_icon(layer: &Layer) -> &'static str {
    match layer.kind {
        LayerKind::Text { .. } => "T",
        LayerKind::Image { .. } => "▣",
        LayerKind::Product { .. } => "◈",
        LayerKind::Blur { .. } => "◌",
    }
}

#[function_component(LayersPanel)]
pub fn layers_panel(props: &LayersPanelProps) -> Html {
    html! {
        <div class="bg-white border border-gray-200 rounded-2xl p-4">
            <h2 class="text-sm font-semibold pb-2 mb-3 border-b border-gray-200">{"Layers"}</h2>
            if props.layers.is_empty() {
                <p class="text-xs text-gray-500">{"No layers yet"}</p>
            }
            <div class="space-y-2">
                // Topmost first
                {
                    props.layers.iter().rev().map(|layer| {
                        let id = layer.id.clone();
                        let is_background = layer.is_background();
                        let is_selected = props.selected.as_ref() == Some(&id);

                        let onclick = {
                            let on_select = props.on_select.clone();
                            let id = id.clone();
                            Callback::from(move |_: MouseEvent| on_select.emit(id.clone()))
                        };
                        let on_remove = {
                            let on_remove = props.on_remove.clone();
                            let id = id.clone();
                            Callback::from(move |e: MouseEvent| {
                                e.stop_propagation();
                                on_remove.emit(id.clone());
                            })
                        };

                        html! {
                            <div
                                key={id.as_str().to_string()}
                                onclick={(!is_background).then_some(onclick)}
                                class={classes!(
                                    "flex",
                                    "items-center",
                                    "gap-2",
                                    "p-2",
                                    "rounded",
                                    "border",
                                    "border-gray-200",
                                    if is_background { "bg-gray-50 text-gray-400" } else { "cursor-pointer hover:bg-gray-100 hover:border-gray-300" },
                                    is_selected.then_some("bg-blue-100 border-blue-300")
                                )}
                            >
                                <div class="w-6 h-6 rounded border border-gray-300 flex items-center justify-center text-xs font-bold">
                                    {layer_icon(layer)}
                                </div>
                                <span class="text-sm flex-1 truncate">{layer_title(layer)}</span>
                                if !is_background {
                                    <button
                                        title="Delete layer"
                                        onclick={on_remove}
                                        class="text-red-500 hover:bg-red-50 px-2 rounded"
                                    >
                                        {"🗑"}
                                    </button>
                                }
                            </div>
                        }
                    }).collect::<Html>()
                }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::TextStyle;

    #[test]
    fn test_layer_titles() {
        assert_eq!(layer_title(&Layer::background("bg")), "Background");
        assert_eq!(layer_title(&Layer::blur()), "Blur");
        assert_eq!(layer_title(&Layer::text("Sale", TextStyle::default())), "Sale");

        let long = Layer::text("Doctors hate this one simple trick", TextStyle::default());
        assert_eq!(layer_title(&long), "Doctors hate this one si…");
    }
}
