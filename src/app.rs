use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

use crate::config::{ApiKey, Config};
use crate::editor_canvas::{EditorCanvas, EditorHandle};
use crate::export::export_png;
use crate::generate_panel::GeneratePanel;
use crate::generation::{
    generate_batch, generate_marketing_text, CopyKind, GeminiClient, GenerationRequest, GenerationResult,
    ImagePayload, TimerDelay,
};
use crate::interaction::InteractionController;
use crate::layers_panel::LayersPanel;
use crate::notice::{NoticeAction, NoticeList, NoticeStack, NOTICE_LIFETIME_MS};
use crate::properties_panel::PropertiesPanel;
use crate::scene::{Layer, LayerId, LayerStore, LayerUpdate};
use crate::settings::KeyStore;
use crate::settings_panel::SettingsPanel;
use crate::types::{ActiveTab, EditorMode, Notice};
use crate::utils::read_data_urls;

/// Bumped after every store mutation so the editor re-renders
#[derive(Default, PartialEq)]
struct RenderVersion(u32);

impl Reducible for RenderVersion {
    type Action = ();

    fn reduce(self: Rc<Self>, _: ()) -> Rc<Self> {
        Rc::new(Self(self.0.wrapping_add(1)))
    }
}

/// Shows transient notices and schedules their removal
#[derive(Clone)]
struct Notifier {
    list: UseReducerHandle<NoticeList>,
    next_id: Rc<RefCell<u64>>,
}

impl Notifier {
    fn push(&self, make: impl FnOnce(u64) -> Notice) {
        let id = {
            let mut next = self.next_id.borrow_mut();
            *next += 1;
            *next
        };
        self.list.dispatch(NoticeAction::Show(make(id)));

        let list = self.list.clone();
        Timeout::new(NOTICE_LIFETIME_MS, move || list.dispatch(NoticeAction::Dismiss(id))).forget();
    }

    fn success(&self, text: impl Into<String>) {
        let text = text.into();
        self.push(|id| Notice::success(id, text));
    }

    fn error(&self, text: impl Into<String>) {
        let text = text.into();
        self.push(|id| Notice::error(id, text));
    }
}

/// Synchronous in-flight flag for the async flows. `loading` only drives
/// rendering and lags a frame behind.
#[derive(Clone)]
struct InFlight(Rc<RefCell<bool>>);

impl InFlight {
    /// Claim the flag. Returns false when a flow is already running.
    fn try_begin(&self) -> bool {
        !self.0.replace(true)
    }

    fn is_busy(&self) -> bool {
        *self.0.borrow()
    }

    fn finish(&self) {
        *self.0.borrow_mut() = false;
    }
}

async fn run_generation(
    config: &Config,
    request: &GenerationRequest,
    on_progress: impl FnMut(usize, usize),
) -> GenerationResult<Vec<ImagePayload>> {
    let client = GeminiClient::new(config)?;
    generate_batch(&client, &TimerDelay, request, &config.batch, on_progress).await
}

async fn write_headline(config: &Config, request: &GenerationRequest) -> GenerationResult<String> {
    let client = GeminiClient::new(config)?;
    Ok(generate_marketing_text(&client, &request.headline_topic(), request.language, CopyKind::Headline).await)
}

/// Text fields keep the browser's own undo
fn targets_text_field(event: &KeyboardEvent) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA"))
        .unwrap_or(false)
}

const TOOL_BUTTON: &str = "px-3 py-2 bg-white border border-gray-300 rounded text-sm hover:bg-gray-50 disabled:opacity-50 cursor-pointer text-center";

#[function_component(App)]
pub fn app() -> Html {
    let active_tab = use_state(|| ActiveTab::Generate);
    let config = use_state(|| Config::default().with_api_key(KeyStore.load()));
    let editor = EditorHandle {
        store: use_mut_ref(LayerStore::new),
        controller: use_mut_ref(InteractionController::new),
    };
    let render_version = use_reducer(RenderVersion::default);
    let notices = use_reducer(NoticeList::default);
    let notifier = Notifier {
        list: notices.clone(),
        next_id: use_mut_ref(|| 0u64),
    };
    let loading = use_state(|| false);
    let in_flight = InFlight(use_mut_ref(|| false));
    let progress = use_state(|| None::<(usize, usize)>);
    let variants = use_state(Vec::<ImagePayload>::new);

    // Cmd/Ctrl+Z undoes the last editor change
    {
        let editor = editor.clone();
        let render_version = render_version.clone();
        use_effect_with((), move |_| {
            let document = gloo_utils::document();
            let listener = EventListener::new(&document, "keydown", move |event| {
                let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if (keyboard_event.meta_key() || keyboard_event.ctrl_key())
                    && !keyboard_event.shift_key()
                    && keyboard_event.key().eq_ignore_ascii_case("z")
                    && !targets_text_field(keyboard_event)
                {
                    keyboard_event.prevent_default();
                    let undone = editor.store.borrow_mut().undo();
                    if undone {
                        render_version.dispatch(());
                    }
                }
            });

            move || drop(listener)
        });
    }

    let on_change = {
        let render_version = render_version.clone();
        Callback::from(move |_: ()| render_version.dispatch(()))
    };

    let on_magic = {
        let notifier = notifier.clone();
        Callback::from(move |id: LayerId| {
            log::info!("magic target {}", id);
            notifier.error("No magic action is available for this layer");
        })
    };

    let on_dismiss = {
        let notices = notices.clone();
        Callback::from(move |id: u64| notices.dispatch(NoticeAction::Dismiss(id)))
    };

    // Generation

    let on_generate = {
        let config = config.clone();
        let loading = loading.clone();
        let in_flight = in_flight.clone();
        let progress = progress.clone();
        let variants = variants.clone();
        let notifier = notifier.clone();
        Callback::from(move |request: GenerationRequest| {
            if !in_flight.try_begin() {
                return;
            }
            loading.set(true);
            progress.set(None);

            let config = (*config).clone();
            let loading = loading.clone();
            let in_flight = in_flight.clone();
            let progress = progress.clone();
            let variants = variants.clone();
            let notifier = notifier.clone();
            spawn_local(async move {
                let report = progress.clone();
                let result = run_generation(&config, &request, move |current, total| {
                    report.set(Some((current, total)))
                })
                .await;

                match result {
                    Ok(images) => {
                        notifier.success(format!("{} variant(s) ready", images.len()));
                        variants.set(images);
                    }
                    Err(err) => {
                        log::error!("generation failed: {}", err);
                        notifier.error(err.to_string());
                    }
                }
                progress.set(None);
                in_flight.finish();
                loading.set(false);
            });
        })
    };

    let on_select_variant = {
        let config = config.clone();
        let editor = editor.clone();
        let render_version = render_version.clone();
        let active_tab = active_tab.clone();
        let loading = loading.clone();
        let in_flight = in_flight.clone();
        let notifier = notifier.clone();
        Callback::from(move |(request, image): (GenerationRequest, ImagePayload)| {
            if in_flight.is_busy() {
                return;
            }
            editor.store.borrow_mut().start_from_background(image.to_data_url());
            render_version.dispatch(());
            active_tab.set(ActiveTab::Editor);

            if !request.auto_generate_text || !in_flight.try_begin() {
                return;
            }

            loading.set(true);
            let config = (*config).clone();
            let editor = editor.clone();
            let render_version = render_version.clone();
            let loading = loading.clone();
            let in_flight = in_flight.clone();
            let notifier = notifier.clone();
            spawn_local(async move {
                match write_headline(&config, &request).await {
                    Ok(text) => {
                        editor.store.borrow_mut().append_unrecorded(Layer::auto_text(text));
                        render_version.dispatch(());
                    }
                    Err(err) => notifier.error(err.to_string()),
                }
                in_flight.finish();
                loading.set(false);
            });
        })
    };

    // Settings

    let on_save_key = {
        let config = config.clone();
        let notifier = notifier.clone();
        Callback::from(move |key: ApiKey| match KeyStore.save(&key) {
            Ok(()) => {
                config.set((*config).clone().with_api_key(Some(key)));
                notifier.success("API key saved");
            }
            Err(err) => notifier.error(format!("Could not save the key: {}", err)),
        })
    };

    let on_remove_key = {
        let config = config.clone();
        let notifier = notifier.clone();
        Callback::from(move |_: ()| {
            KeyStore.remove();
            config.set((*config).clone().with_api_key(None));
            notifier.success("API key removed");
        })
    };

    // Editor

    let on_select_layer = {
        let editor = editor.clone();
        let render_version = render_version.clone();
        Callback::from(move |id: LayerId| {
            if editor.controller.borrow().mode() == EditorMode::Magic {
                return;
            }
            let selected = editor.store.borrow_mut().select(&id);
            if selected {
                render_version.dispatch(());
            }
        })
    };

    let on_remove_layer = {
        let editor = editor.clone();
        let render_version = render_version.clone();
        Callback::from(move |id: LayerId| {
            let removed = editor.store.borrow_mut().remove_layer(&id);
            if removed.is_some() {
                render_version.dispatch(());
            }
        })
    };

    let on_update_layer = {
        let editor = editor.clone();
        let render_version = render_version.clone();
        Callback::from(move |(id, update): (LayerId, LayerUpdate)| {
            let updated = editor.store.borrow_mut().update_layer(&id, update);
            if updated {
                render_version.dispatch(());
            }
        })
    };

    let add_and_select = |make: fn() -> Layer| {
        let editor = editor.clone();
        let render_version = render_version.clone();
        Callback::from(move |_: MouseEvent| {
            {
                let mut store = editor.store.borrow_mut();
                let id = store.add_layer(make());
                store.select(&id);
            }
            render_version.dispatch(());
        })
    };
    let on_add_text = add_and_select(Layer::text_placeholder);
    let on_add_blur = add_and_select(Layer::blur);

    let on_product_upload = {
        let editor = editor.clone();
        let render_version = render_version.clone();
        Callback::from(move |e: Event| {
            let Some(input) = e.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let files = input.files();
            let editor = editor.clone();
            let render_version = render_version.clone();
            spawn_local(async move {
                let urls = read_data_urls(files).await;
                if urls.is_empty() {
                    return;
                }
                {
                    let mut store = editor.store.borrow_mut();
                    for url in urls {
                        store.add_layer(Layer::product(url));
                    }
                }
                render_version.dispatch(());
            });
        })
    };

    let on_undo = {
        let editor = editor.clone();
        let render_version = render_version.clone();
        Callback::from(move |_: MouseEvent| {
            let undone = editor.store.borrow_mut().undo();
            if undone {
                render_version.dispatch(());
            }
        })
    };

    let on_toggle_mode = {
        let editor = editor.clone();
        let render_version = render_version.clone();
        Callback::from(move |_: MouseEvent| {
            {
                let mut controller = editor.controller.borrow_mut();
                let next = match controller.mode() {
                    EditorMode::Edit => EditorMode::Magic,
                    EditorMode::Magic => EditorMode::Edit,
                };
                controller.set_mode(next);
            }
            render_version.dispatch(());
        })
    };

    let on_download = {
        let editor = editor.clone();
        let notifier = notifier.clone();
        Callback::from(move |_: MouseEvent| {
            let layers = editor.store.borrow().layers().to_vec();
            let notifier = notifier.clone();
            spawn_local(async move {
                match export_png(&layers).await {
                    Ok(filename) => notifier.success(format!("Saved {}", filename)),
                    Err(err) => {
                        log::error!("export failed: {}", err);
                        notifier.error(format!("Export failed: {}", err));
                    }
                }
            });
        })
    };

    let tab_button = |tab: ActiveTab, label: &'static str| {
        let active = *active_tab == tab;
        let handle = active_tab.clone();
        let onclick = Callback::from(move |_: MouseEvent| handle.set(tab));
        html! {
            <button
                {onclick}
                class={classes!(
                    "px-4", "py-1", "rounded-md", "text-sm", "font-medium",
                    if active { "bg-white shadow text-gray-900" } else { "text-gray-500 hover:text-gray-900" }
                )}
            >
                {label}
            </button>
        }
    };

    let (layers, selected_id, selected_layer, can_undo) = {
        let store = editor.store.borrow();
        (
            store.layers().to_vec(),
            store.selected_id().cloned(),
            store.selected().cloned(),
            store.history_len() > 0,
        )
    };
    let mode = editor.controller.borrow().mode();

    html! {
        <div class="min-h-screen bg-gray-100 flex flex-col text-gray-900">
            <NoticeStack notices={notices.notices.clone()} {on_dismiss} />

            <header class="flex items-center justify-between px-4 py-3 bg-white border-b border-gray-300">
                <h1 class="text-lg font-bold">{"Creative Studio"}</h1>
                <div class="flex gap-1 bg-gray-100 rounded-lg p-1">
                    {tab_button(ActiveTab::Generate, "Generate")}
                    {tab_button(ActiveTab::Editor, "Editor")}
                </div>
            </header>

            // Stays mounted so the form survives tab switches
            <div class={classes!("p-4", "grid", "gap-4", "md:grid-cols-[400px_1fr]", (*active_tab != ActiveTab::Generate).then_some("hidden"))}>
                <SettingsPanel
                    api_key={config.api_key.clone()}
                    on_save={on_save_key}
                    on_remove={on_remove_key}
                />
                <GeneratePanel
                    loading={*loading}
                    progress={*progress}
                    variants={(*variants).clone()}
                    has_api_key={config.has_api_key()}
                    {on_generate}
                    {on_select_variant}
                />
            </div>

            if *active_tab == ActiveTab::Editor {
                <div class="flex-1 flex flex-col md:flex-row gap-4 p-4">
                    <div class="md:w-64 flex-shrink-0 space-y-4">
                        <div class="bg-white border border-gray-200 rounded-2xl p-4 grid grid-cols-2 gap-2">
                            <button onclick={on_add_text} class={TOOL_BUTTON}>{"Text"}</button>
                            <button onclick={on_add_blur} class={TOOL_BUTTON}>{"Blur"}</button>
                            <label class={TOOL_BUTTON}>
                                {"Product"}
                                <input type="file" accept="image/*" class="hidden" onchange={on_product_upload} />
                            </label>
                            <button onclick={on_undo} disabled={!can_undo} class={TOOL_BUTTON}>{"Undo"}</button>
                            <button
                                onclick={on_toggle_mode}
                                class={classes!(
                                    TOOL_BUTTON,
                                    (mode == EditorMode::Magic).then_some("bg-purple-500 text-white border-purple-600 hover:bg-purple-600")
                                )}
                            >
                                {if mode == EditorMode::Magic { "Magic" } else { "Edit" }}
                            </button>
                            <button onclick={on_download} disabled={layers.is_empty()} class={TOOL_BUTTON}>{"Download PNG"}</button>
                        </div>
                        <LayersPanel
                            layers={layers.clone()}
                            selected={selected_id}
                            on_select={on_select_layer}
                            on_remove={on_remove_layer.clone()}
                        />
                    </div>

                    <div class="flex-1 flex items-start justify-center">
                        <div class="w-full max-w-[80vh] relative">
                            <EditorCanvas
                                editor={editor.clone()}
                                render_version={render_version.0}
                                {on_change}
                                {on_magic}
                            />
                            if layers.is_empty() {
                                <div class="absolute inset-0 flex items-center justify-center text-gray-400 text-sm pointer-events-none">
                                    {"Pick a variant on the Generate tab to start"}
                                </div>
                            }
                            if *loading {
                                <div class="absolute inset-0 flex items-center justify-center bg-black/40 rounded-2xl text-white font-bold" style="z-index: 60;">
                                    {"Writing headline..."}
                                </div>
                            }
                        </div>
                    </div>

                    <div class="md:w-72 flex-shrink-0">
                        <PropertiesPanel
                            layer={selected_layer}
                            on_update={on_update_layer}
                            on_remove={on_remove_layer}
                        />
                    </div>
                </div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_admits_one_flow() {
        let flag = InFlight(Rc::new(RefCell::new(false)));
        let other = flag.clone();

        assert!(flag.try_begin());
        assert!(!other.try_begin());
        assert!(other.is_busy());

        flag.finish();
        assert!(!other.is_busy());
        assert!(other.try_begin());
    }
}
