use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::config::ApiKey;

#[derive(Properties, PartialEq)]
pub struct SettingsPanelProps {
    pub api_key: Option<ApiKey>,
    pub on_save: Callback<ApiKey>,
    pub on_remove: Callback<()>,
}

#[function_component(SettingsPanel)]
pub fn settings_panel(props: &SettingsPanelProps) -> Html {
    let input_value = use_state(String::new);

    let on_input = {
        let input_value = input_value.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                input_value.set(input.value());
            }
        })
    };

    let on_submit = {
        let input_value = input_value.clone();
        let on_save = props.on_save.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Some(key) = ApiKey::new(&*input_value) {
                on_save.emit(key);
                input_value.set(String::new());
            }
        })
    };

    let on_remove = {
        let on_remove = props.on_remove.clone();
        Callback::from(move |_: MouseEvent| on_remove.emit(()))
    };

    html! {
        <div class="bg-white border border-gray-200 rounded-2xl p-4 space-y-3">
            <h2 class="text-sm font-semibold pb-2 border-b border-gray-200">{"API key"}</h2>
            {
                match &props.api_key {
                    Some(key) => html! {
                        <div class="flex items-center justify-between text-sm">
                            <span class="font-mono text-green-700">{key.masked()}</span>
                            <button
                                onclick={on_remove}
                                class="text-red-500 hover:bg-red-50 px-2 py-1 rounded text-xs"
                            >
                                {"Remove"}
                            </button>
                        </div>
                    },
                    None => html! {
                        <p class="text-xs text-gray-500">{"No key saved. Generation is disabled until one is added."}</p>
                    },
                }
            }
            <form onsubmit={on_submit} class="flex gap-2">
                <input
                    type="password"
                    value={(*input_value).clone()}
                    oninput={on_input}
                    placeholder="Paste API key"
                    autocomplete="off"
                    class="flex-1 px-3 py-2 border border-gray-300 rounded-lg text-sm focus:outline-none focus:ring-2 focus:ring-blue-500"
                />
                <button
                    type="submit"
                    disabled={input_value.trim().is_empty()}
                    class="px-4 py-2 bg-blue-500 text-white rounded-lg text-sm font-medium hover:bg-blue-600 transition-colors disabled:opacity-50"
                >
                    {"Save"}
                </button>
            </form>
        </div>
    }
}
