use std::rc::Rc;

use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::generation::{
    GenerationRequest, Hook, ImagePayload, Language, Vertical, VisualStyle, MAX_REFERENCE_IMAGES,
};
use crate::utils::read_data_urls;

/// Edits to the generation form
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    Prompt(String),
    OptionalText(String),
    Vertical(Vertical),
    Hook(Hook),
    Style(VisualStyle),
    Language(Language),
    AutoText(bool),
    /// Appended in order; anything past the limit is dropped
    AddReferences(Vec<ImagePayload>),
    RemoveReference(usize),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub request: GenerationRequest,
}

impl Reducible for FormState {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut request = self.request.clone();
        match action {
            FormAction::Prompt(prompt) => request.prompt = prompt,
            FormAction::OptionalText(text) => request.optional_text = text,
            FormAction::Vertical(vertical) => request.vertical = vertical,
            FormAction::Hook(hook) => request.hook = hook,
            FormAction::Style(style) => request.style = style,
            FormAction::Language(language) => request.language = language,
            FormAction::AutoText(enabled) => request.auto_generate_text = enabled,
            FormAction::AddReferences(images) => {
                let room = MAX_REFERENCE_IMAGES.saturating_sub(request.reference_images.len());
                request.reference_images.extend(images.into_iter().take(room));
            }
            FormAction::RemoveReference(index) => {
                if index < request.reference_images.len() {
                    request.reference_images.remove(index);
                }
            }
        }
        Rc::new(Self { request })
    }
}

#[derive(Properties, PartialEq)]
pub struct GeneratePanelProps {
    pub loading: bool,
    /// `(current, total)` of the running batch
    pub progress: Option<(usize, usize)>,
    pub variants: Vec<ImagePayload>,
    pub has_api_key: bool,
    pub on_generate: Callback<GenerationRequest>,
    pub on_select_variant: Callback<(GenerationRequest, ImagePayload)>,
}

fn select_callback<T: Copy + 'static>(
    all: &'static [T],
    form: &UseReducerHandle<FormState>,
    action: fn(T) -> FormAction,
) -> Callback<Event> {
    let form = form.clone();
    Callback::from(move |e: Event| {
        let Some(select) = e.target_dyn_into::<HtmlSelectElement>() else {
            return;
        };
        if let Some(value) = select.value().parse::<usize>().ok().and_then(|i| all.get(i)) {
            form.dispatch(action(*value));
        }
    })
}

#[function_component(GeneratePanel)]
pub fn generate_panel(props: &GeneratePanelProps) -> Html {
    let form = use_reducer(FormState::default);
    let request = &form.request;

    let on_prompt = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(area) = e.target_dyn_into::<HtmlTextAreaElement>() {
                form.dispatch(FormAction::Prompt(area.value()));
            }
        })
    };

    let on_optional_text = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                form.dispatch(FormAction::OptionalText(input.value()));
            }
        })
    };

    let on_auto_text = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                form.dispatch(FormAction::AutoText(input.checked()));
            }
        })
    };

    let on_references = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let Some(input) = e.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let files = input.files();
            let form = form.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let images = read_data_urls(files)
                    .await
                    .iter()
                    .filter_map(|url| ImagePayload::from_data_url(url))
                    .collect::<Vec<_>>();
                form.dispatch(FormAction::AddReferences(images));
            });
        })
    };

    let on_submit = {
        let form = form.clone();
        let on_generate = props.on_generate.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_generate.emit(form.request.clone());
        })
    };

    let recommended = request.vertical.recommended_hooks();
    let can_generate = !props.loading && !request.prompt.trim().is_empty();

    html! {
        <div class="flex flex-col gap-6">
            <form onsubmit={on_submit} class="bg-white border border-gray-200 rounded-2xl p-4 space-y-4">
                if !props.has_api_key {
                    <p class="text-xs text-amber-700 bg-amber-50 border border-amber-200 rounded p-2">
                        {"Add an API key in Settings to generate creatives"}
                    </p>
                }

                <div class="space-y-1">
                    <label class="block text-xs font-bold uppercase tracking-wider text-gray-500">{"Niche"}</label>
                    <select
                        onchange={select_callback(&Vertical::ALL, &form, FormAction::Vertical)}
                        class="w-full px-2 py-1 border border-gray-300 rounded text-sm bg-white"
                    >
                        { for Vertical::ALL.iter().enumerate().map(|(i, v)| html! {
                            <option value={i.to_string()} selected={*v == request.vertical}>{v.name()}</option>
                        }) }
                    </select>
                </div>

                <div class="space-y-1">
                    <label class="block text-xs font-bold uppercase tracking-wider text-gray-500">{"Idea"}</label>
                    <textarea
                        value={request.prompt.clone()}
                        oninput={on_prompt}
                        placeholder="Describe the creative..."
                        rows="3"
                        class="w-full px-3 py-2 border border-gray-300 rounded-lg text-sm resize-none focus:outline-none focus:ring-2 focus:ring-blue-500"
                    />
                </div>

                <div class="space-y-1">
                    <label class="block text-xs font-bold uppercase tracking-wider text-gray-500">{"Text"}</label>
                    <input
                        type="text"
                        value={request.optional_text.clone()}
                        oninput={on_optional_text}
                        placeholder="Optional headline or topic"
                        class="w-full px-3 py-2 border border-gray-300 rounded-lg text-sm"
                    />
                    <label class="flex items-center gap-2 text-xs text-gray-600">
                        <input type="checkbox" checked={request.auto_generate_text} onchange={on_auto_text} />
                        {"Write a headline automatically"}
                    </label>
                </div>

                <div class="space-y-1">
                    <label class="block text-xs font-bold uppercase tracking-wider text-gray-500">{"Language"}</label>
                    <select
                        onchange={select_callback(&Language::ALL, &form, FormAction::Language)}
                        class="w-full px-2 py-1 border border-gray-300 rounded text-sm bg-white"
                    >
                        { for Language::ALL.iter().enumerate().map(|(i, lang)| html! {
                            <option value={i.to_string()} selected={*lang == request.language}>{lang.native_name()}</option>
                        }) }
                    </select>
                </div>

                <div class="space-y-1">
                    <label class="block text-xs font-bold uppercase tracking-wider text-gray-500">
                        {format!("References ({}/{})", request.reference_images.len(), MAX_REFERENCE_IMAGES)}
                    </label>
                    <div class="flex gap-2 flex-wrap">
                        {
                            request.reference_images.iter().enumerate().map(|(index, image)| {
                                let form = form.clone();
                                let onclick = Callback::from(move |_: MouseEvent| form.dispatch(FormAction::RemoveReference(index)));
                                html! {
                                    <div class="w-12 h-12 relative rounded-xl overflow-hidden border border-gray-200">
                                        <img src={image.to_data_url()} class="w-full h-full object-cover" />
                                        <button
                                            type="button"
                                            title="Remove reference"
                                            {onclick}
                                            class="absolute inset-0 flex items-center justify-center bg-black/50 text-white opacity-0 hover:opacity-100"
                                        >
                                            {"✕"}
                                        </button>
                                    </div>
                                }
                            }).collect::<Html>()
                        }
                        if request.reference_images.len() < MAX_REFERENCE_IMAGES {
                            <label class="w-12 h-12 rounded-xl border-2 border-dashed border-gray-300 flex items-center justify-center text-gray-400 cursor-pointer hover:bg-gray-50">
                                {"+"}
                                <input type="file" multiple={true} accept="image/*" class="hidden" onchange={on_references} />
                            </label>
                        }
                    </div>
                </div>

                <button
                    type="submit"
                    disabled={!can_generate}
                    class="w-full px-4 py-3 bg-blue-500 text-white rounded-lg font-bold hover:bg-blue-600 transition-colors disabled:opacity-50 disabled:cursor-not-allowed"
                >
                    {
                        match (props.loading, props.progress) {
                            (true, Some((current, total))) => format!("Generating {}/{}...", current, total),
                            (true, None) => "Working...".to_string(),
                            (false, _) => "Create creative".to_string(),
                        }
                    }
                </button>
            </form>

            if !props.variants.is_empty() {
                <div class="bg-white border border-gray-200 rounded-2xl p-4">
                    <h2 class="text-xs font-bold uppercase tracking-wider text-gray-500 mb-2">{"Result"}</h2>
                    <div class="grid grid-cols-2 gap-2">
                        {
                            props.variants.iter().map(|image| {
                                let onclick = {
                                    let on_select = props.on_select_variant.clone();
                                    let request = request.clone();
                                    let image = image.clone();
                                    Callback::from(move |_: MouseEvent| on_select.emit((request.clone(), image.clone())))
                                };
                                html! {
                                    <button
                                        {onclick}
                                        disabled={props.loading}
                                        class="rounded-xl overflow-hidden border-2 border-transparent hover:border-blue-500 transition-all"
                                    >
                                        <img src={image.to_data_url()} class="w-full aspect-square object-cover" />
                                    </button>
                                }
                            }).collect::<Html>()
                        }
                    </div>
                </div>
            }

            <div class="bg-white border border-gray-200 rounded-2xl p-4 space-y-2">
                <h2 class="text-xs font-bold uppercase tracking-wider text-gray-500">{"Hook"}</h2>
                <div class="grid grid-cols-2 gap-2">
                    {
                        Hook::ALL.iter().map(|hook| {
                            let hook = *hook;
                            let active = hook == request.hook;
                            let is_recommended = recommended.contains(&hook);
                            let form = form.clone();
                            let onclick = Callback::from(move |_: MouseEvent| form.dispatch(FormAction::Hook(hook)));
                            html! {
                                <button
                                    {onclick}
                                    class={classes!(
                                        "relative", "p-3", "rounded-xl", "border", "text-left", "text-sm", "transition-all",
                                        if active { "bg-blue-600 text-white border-blue-600 shadow-lg" } else { "bg-white border-gray-200 hover:bg-gray-50" }
                                    )}
                                >
                                    {hook.name()}
                                    if is_recommended {
                                        <span class="absolute top-1 right-1 px-2 py-0.5 bg-purple-500 rounded-full text-[8px] font-bold text-white">
                                            {"Recommended"}
                                        </span>
                                    }
                                </button>
                            }
                        }).collect::<Html>()
                    }
                </div>
            </div>

            <div class="bg-white border border-gray-200 rounded-2xl p-4 space-y-2">
                <h2 class="text-xs font-bold uppercase tracking-wider text-gray-500">{"Visual style"}</h2>
                <div class="grid grid-cols-3 gap-2">
                    {
                        VisualStyle::ALL.iter().map(|style| {
                            let style = *style;
                            let active = style == request.style;
                            let form = form.clone();
                            let onclick = Callback::from(move |_: MouseEvent| form.dispatch(FormAction::Style(style)));
                            html! {
                                <button
                                    {onclick}
                                    class={classes!(
                                        "p-2", "rounded-xl", "border", "text-xs", "transition-all",
                                        if active { "bg-blue-600 text-white ring-2 ring-blue-300" } else { "bg-white border-gray-200 hover:bg-gray-50" }
                                    )}
                                >
                                    {style.name()}
                                </button>
                            }
                        }).collect::<Html>()
                    }
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(state: FormState, action: FormAction) -> FormState {
        (*Rc::new(state).reduce(action)).clone()
    }

    #[test]
    fn test_form_edits() {
        let state = reduce(FormState::default(), FormAction::Prompt("Knee pain".to_string()));
        let state = reduce(state, FormAction::Vertical(Vertical::Cardio));
        let state = reduce(state, FormAction::AutoText(false));

        assert_eq!(state.request.prompt, "Knee pain");
        assert_eq!(state.request.vertical, Vertical::Cardio);
        assert!(!state.request.auto_generate_text);
        // Changing the niche keeps the chosen hook
        assert_eq!(state.request.hook, Hook::PainBased);
    }

    #[test]
    fn test_references_are_capped() {
        let images: Vec<_> = (0..7).map(|i| ImagePayload::png(format!("img{}", i))).collect();
        let state = reduce(FormState::default(), FormAction::AddReferences(images.clone()));
        let state = reduce(state, FormAction::AddReferences(images));

        assert_eq!(state.request.reference_images.len(), MAX_REFERENCE_IMAGES);
        assert_eq!(state.request.reference_images[7].data, "img0");
        assert_eq!(state.request.reference_images[9].data, "img2");
    }

    #[test]
    fn test_remove_reference() {
        let images = vec![ImagePayload::png("a"), ImagePayload::png("b")];
        let state = reduce(FormState::default(), FormAction::AddReferences(images));
        let state = reduce(state, FormAction::RemoveReference(0));
        let state = reduce(state, FormAction::RemoveReference(5));

        assert_eq!(state.request.reference_images, vec![ImagePayload::png("b")]);
    }
}
