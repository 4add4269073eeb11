mod api;
mod theme;
mod view;

use notes_shared::{response_event, AppState, ClientConfig, Effect, Event, ThemeState, ViewState};
use sauron::{html::attributes::*, html::*, prelude::*};

const API_BASE_META: &str = "meta[name=\"notes-api-base\"]";

#[derive(Debug, Clone)]
pub enum Msg {
    App(Event),
    ToggleTheme,
    UseSystemTheme,
    SystemThemeChanged(bool),
}

#[derive(Debug, Clone)]
pub struct Model {
    config: ClientConfig,
    state: AppState,
    theme: ThemeState,
}

impl Model {
    fn new(config: ClientConfig) -> Self {
        let stored = theme::load_stored(&config.theme_storage_key);
        let theme = ThemeState::resolve(stored, theme::system_prefers_dark());
        Self {
            config,
            state: AppState::default(),
            theme,
        }
    }

    /// Feeds `event` to the state machine and turns its effects into commands.
    fn run(&mut self, event: Event) -> Cmd<Msg> {
        let effects = self.state.apply(event);
        Cmd::batch(
            effects
                .into_iter()
                .map(|effect| self.perform(effect))
                .collect::<Vec<_>>(),
        )
    }

    fn perform(&self, effect: Effect) -> Cmd<Msg> {
        match effect {
            Effect::Send(request) => {
                let config = self.config.clone();
                Cmd::new(async move {
                    let outcome = api::send(&config, &request).await;
                    Msg::App(response_event(request, outcome))
                })
            }
            Effect::Alert(message) => {
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(&message);
                }
                Cmd::none()
            }
        }
    }
}

impl Application for Model {
    type MSG = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        theme::apply_to_document(self.theme.active());
        let session_check = self.run(Event::Started);
        Cmd::batch(vec![session_check, watch_system_theme()])
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::App(event) => self.run(event),
            Msg::ToggleTheme => {
                let next = self.theme.toggle();
                theme::save(&self.config.theme_storage_key, next);
                theme::apply_to_document(next);
                Cmd::none()
            }
            Msg::UseSystemTheme => {
                theme::clear(&self.config.theme_storage_key);
                let active = self.theme.clear_preference(theme::system_prefers_dark());
                theme::apply_to_document(active);
                Cmd::none()
            }
            Msg::SystemThemeChanged(dark) => {
                if let Some(next) = self.theme.on_system_change(dark) {
                    tracing::debug!(theme = next.as_str(), "following system theme");
                    theme::apply_to_document(next);
                }
                watch_system_theme()
            }
        }
    }

    fn view(&self) -> Node<Msg> {
        div(
            [class("min-h-screen bg-ctp-base text-ctp-text")],
            [
                self.view_header(),
                div(
                    [class("max-w-4xl mx-auto px-6 py-8")],
                    [match self.state.view_state() {
                        ViewState::Unauthenticated(tab) => self.view_auth(tab),
                        ViewState::Authenticated(username) => self.view_app(&username),
                    }],
                ),
            ],
        )
    }
}

/// One-shot listener, re-armed after every change it reports.
fn watch_system_theme() -> Cmd<Msg> {
    Cmd::new(async { Msg::SystemThemeChanged(theme::next_system_change().await) })
}

fn load_config() -> ClientConfig {
    let api_base = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.query_selector(API_BASE_META).ok().flatten())
        .and_then(|meta| meta.get_attribute("content"));
    ClientConfig::with_api_base(api_base)
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_tracing::set_as_global_default();

    let config = load_config();
    tracing::info!(api_base = %config.api_base, "starting notes frontend");
    Program::mount_to_body(Model::new(config));
}
