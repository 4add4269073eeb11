//! Client logic for the notes and action items app that does not need a
//! browser: wire types, backend calls, the session state machine, row
//! rendering and theme resolution.

pub mod api;
pub mod config;
pub mod models;
pub mod render;
pub mod session;
pub mod theme;

pub use api::{ApiError, ApiRequest, Body, Method, RawResponse};
pub use config::ClientConfig;
pub use models::{ActionItem, CreateActionItemRequest, CreateNoteRequest, Credentials, Note, User};
pub use session::{response_event, AppState, AuthTab, Effect, Event, Field, FormId, ViewState};
pub use theme::{preferred_theme, Theme, ThemeState};
