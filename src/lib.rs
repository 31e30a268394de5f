mod app;
mod editor_canvas;
mod generate_panel;
mod layers_panel;
mod notice;
mod properties_panel;
mod settings_panel;
mod types;
mod utils;

pub mod config;
pub mod export;
pub mod generation;
pub mod interaction;
pub mod scene;
pub mod settings;

use app::App;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
