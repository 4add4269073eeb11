//! Session and view state machine.
//!
//! [`AppState::apply`] is the only place the client state changes. It returns
//! the side effects the UI layer has to perform; every finished backend call
//! comes back in as another [`Event`] built by [`response_event`].

use serde::de::DeserializeOwned;

use crate::api::{parse_response, ApiError, ApiRequest, RawResponse};
use crate::models::{
    ActionItem, CreateActionItemRequest, CreateNoteRequest, Credentials, Note, User,
};
use crate::render::{self, ActionRow};

pub const REGISTERED_MESSAGE: &str = "Registration successful! Please login.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Unauthenticated(AuthTab),
    Authenticated(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormId {
    Login,
    Register,
    Note,
    ActionItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    LoginUsername,
    LoginPassword,
    RegisterUsername,
    RegisterPassword,
    NoteTitle,
    NoteContent,
    ActionDescription,
    NoteSearch,
}

/// Draft values of every form on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forms {
    pub login: Credentials,
    pub register: Credentials,
    pub note: CreateNoteRequest,
    pub action_item: CreateActionItemRequest,
    pub note_search: String,
}

impl Forms {
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::LoginUsername => self.login.username = value,
            Field::LoginPassword => self.login.password = value,
            Field::RegisterUsername => self.register.username = value,
            Field::RegisterPassword => self.register.password = value,
            Field::NoteTitle => self.note.title = value,
            Field::NoteContent => self.note.content = value,
            Field::ActionDescription => self.action_item.description = value,
            Field::NoteSearch => self.note_search = value,
        }
    }

    pub fn reset(&mut self, form: FormId) {
        match form {
            FormId::Login => self.login = Credentials::default(),
            FormId::Register => self.register = Credentials::default(),
            FormId::Note => self.note = CreateNoteRequest::default(),
            FormId::ActionItem => self.action_item = CreateActionItemRequest::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Started,
    SelectTab(AuthTab),
    Input(Field, String),
    ClearForm(FormId),
    SubmitLogin,
    SubmitRegister,
    SubmitNote,
    SubmitActionItem,
    SearchNotes,
    ClearSearch,
    Logout,
    CompleteActionItem(i64),

    SessionChecked(Result<User, ApiError>),
    LoginFinished(Result<User, ApiError>),
    RegisterFinished(Result<User, ApiError>),
    LogoutFinished(Result<(), ApiError>),
    NotesLoaded(Result<Vec<Note>, ApiError>),
    ActionItemsLoaded(Result<Vec<ActionItem>, ApiError>),
    NoteCreated(Result<Note, ApiError>),
    ActionItemCreated(Result<ActionItem, ApiError>),
    ActionItemCompleted(Result<ActionItem, ApiError>),
}

impl Event {
    fn error(&self) -> Option<&ApiError> {
        match self {
            Event::SessionChecked(Err(e))
            | Event::LoginFinished(Err(e))
            | Event::RegisterFinished(Err(e))
            | Event::LogoutFinished(Err(e))
            | Event::NotesLoaded(Err(e))
            | Event::ActionItemsLoaded(Err(e))
            | Event::NoteCreated(Err(e))
            | Event::ActionItemCreated(Err(e))
            | Event::ActionItemCompleted(Err(e)) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Send(ApiRequest),
    /// Blocking user-facing message.
    Alert(String),
}

fn decode<T: DeserializeOwned>(outcome: Result<RawResponse, ApiError>) -> Result<T, ApiError> {
    outcome.and_then(parse_response)
}

/// Login rejects bad credentials with a 401 carrying the reason. That is not a
/// lost session, so the body is kept for the alert.
fn decode_login(outcome: Result<RawResponse, ApiError>) -> Result<User, ApiError> {
    match outcome {
        Ok(response) if response.status == 401 => Err(ApiError::RequestFailed {
            status: response.status,
            body: response.body,
        }),
        other => decode(other),
    }
}

/// Builds the event reporting the outcome of `request`.
pub fn response_event(request: ApiRequest, outcome: Result<RawResponse, ApiError>) -> Event {
    match request {
        ApiRequest::CurrentUser => Event::SessionChecked(decode(outcome)),
        ApiRequest::Login(_) => Event::LoginFinished(decode_login(outcome)),
        ApiRequest::Register(_) => Event::RegisterFinished(decode(outcome)),
        ApiRequest::Logout => {
            Event::LogoutFinished(decode::<serde_json::Value>(outcome).map(|_| ()))
        }
        ApiRequest::ListNotes { .. } => Event::NotesLoaded(decode(outcome)),
        ApiRequest::CreateNote(_) => Event::NoteCreated(decode(outcome)),
        ApiRequest::ListActionItems => Event::ActionItemsLoaded(decode(outcome)),
        ApiRequest::CreateActionItem(_) => Event::ActionItemCreated(decode(outcome)),
        ApiRequest::CompleteActionItem(_) => Event::ActionItemCompleted(decode(outcome)),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    current_user: Option<String>,
    auth_tab: AuthTab,
    notes: Vec<Note>,
    action_items: Vec<ActionItem>,
    notes_query: Option<String>,
    forms: Forms,
}

impl AppState {
    pub fn view_state(&self) -> ViewState {
        match &self.current_user {
            Some(username) => ViewState::Authenticated(username.clone()),
            None => ViewState::Unauthenticated(self.auth_tab),
        }
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn action_items(&self) -> &[ActionItem] {
        &self.action_items
    }

    pub fn note_rows(&self) -> Vec<String> {
        self.notes.iter().map(render::note_row).collect()
    }

    pub fn action_rows(&self) -> Vec<ActionRow> {
        render::action_rows(&self.action_items)
    }

    pub fn notes_query(&self) -> Option<&str> {
        self.notes_query.as_deref()
    }

    pub fn forms(&self) -> &Forms {
        &self.forms
    }

    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        if event.error().is_some_and(ApiError::is_unauthorized) {
            self.force_unauthenticated();
        }

        match event {
            Event::Started => vec![Effect::Send(ApiRequest::CurrentUser)],
            Event::SelectTab(tab) => {
                self.auth_tab = tab;
                vec![]
            }
            Event::Input(field, value) => {
                self.forms.set(field, value);
                vec![]
            }
            Event::ClearForm(form) => {
                self.forms.reset(form);
                vec![]
            }
            Event::SubmitLogin => {
                if !self.forms.login.is_complete() {
                    return vec![];
                }
                vec![Effect::Send(ApiRequest::Login(self.forms.login.clone()))]
            }
            Event::SubmitRegister => {
                if !self.forms.register.is_complete() {
                    return vec![];
                }
                vec![Effect::Send(ApiRequest::Register(self.forms.register.clone()))]
            }
            Event::SubmitNote => {
                let note = &self.forms.note;
                if note.title.trim().is_empty() || note.content.trim().is_empty() {
                    return vec![];
                }
                vec![Effect::Send(ApiRequest::CreateNote(note.clone()))]
            }
            Event::SubmitActionItem => {
                if self.forms.action_item.description.trim().is_empty() {
                    return vec![];
                }
                vec![Effect::Send(ApiRequest::CreateActionItem(
                    self.forms.action_item.clone(),
                ))]
            }
            Event::SearchNotes => {
                let query = self.forms.note_search.trim();
                self.notes_query = (!query.is_empty()).then(|| query.to_string());
                vec![self.begin_load_notes()]
            }
            Event::ClearSearch => {
                self.forms.note_search.clear();
                self.notes_query = None;
                vec![self.begin_load_notes()]
            }
            Event::Logout => vec![Effect::Send(ApiRequest::Logout)],
            Event::CompleteActionItem(id) => {
                vec![Effect::Send(ApiRequest::CompleteActionItem(id))]
            }

            Event::SessionChecked(Ok(user)) => self.enter_authenticated(user.username),
            Event::SessionChecked(Err(err)) => {
                tracing::debug!(error = %err, "no active session");
                self.force_unauthenticated();
                self.auth_tab = AuthTab::Login;
                vec![]
            }
            Event::LoginFinished(Ok(user)) => {
                self.forms.reset(FormId::Login);
                self.enter_authenticated(user.username)
            }
            Event::LoginFinished(Err(err)) => {
                vec![Effect::Alert(format!("Login failed: {}", err.detail()))]
            }
            Event::RegisterFinished(Ok(user)) => {
                tracing::info!(username = %user.username, "registered");
                self.forms.reset(FormId::Register);
                vec![Effect::Alert(REGISTERED_MESSAGE.to_string())]
            }
            Event::RegisterFinished(Err(err)) => {
                vec![Effect::Alert(format!("Registration failed: {}", err.detail()))]
            }
            Event::LogoutFinished(Ok(())) => {
                self.force_unauthenticated();
                vec![]
            }
            Event::LogoutFinished(Err(err)) => {
                tracing::error!(error = %err, "logout failed");
                vec![]
            }
            Event::NotesLoaded(Ok(notes)) => {
                if self.current_user.is_some() {
                    self.notes = notes;
                }
                vec![]
            }
            Event::NotesLoaded(Err(err)) => {
                tracing::error!(error = %err, "error loading notes");
                vec![]
            }
            Event::ActionItemsLoaded(Ok(items)) => {
                if self.current_user.is_some() {
                    self.action_items = items;
                }
                vec![]
            }
            Event::ActionItemsLoaded(Err(err)) => {
                tracing::error!(error = %err, "error loading action items");
                vec![]
            }
            Event::NoteCreated(Ok(_)) => {
                self.forms.reset(FormId::Note);
                vec![self.begin_load_notes()]
            }
            Event::NoteCreated(Err(err)) => {
                tracing::error!(error = %err, "note creation failed");
                vec![]
            }
            Event::ActionItemCreated(Ok(_)) => {
                self.forms.reset(FormId::ActionItem);
                vec![self.begin_load_action_items()]
            }
            Event::ActionItemCreated(Err(err)) => {
                tracing::error!(error = %err, "action item creation failed");
                vec![]
            }
            Event::ActionItemCompleted(Ok(item)) => {
                tracing::debug!(id = item.id, "action item completed");
                vec![self.begin_load_action_items()]
            }
            Event::ActionItemCompleted(Err(err)) => {
                tracing::error!(error = %err, "completing action item failed");
                vec![]
            }
        }
    }

    fn enter_authenticated(&mut self, username: String) -> Vec<Effect> {
        tracing::info!(username = %username, "session active");
        self.current_user = Some(username);
        self.auth_tab = AuthTab::Login;
        vec![self.begin_load_notes(), self.begin_load_action_items()]
    }

    /// Drops the session and every snapshot tied to it.
    fn force_unauthenticated(&mut self) {
        if let Some(username) = self.current_user.take() {
            tracing::info!(username = %username, "session ended");
        }
        self.notes.clear();
        self.action_items.clear();
        self.notes_query = None;
        self.forms.note_search.clear();
    }

    fn begin_load_notes(&mut self) -> Effect {
        self.notes.clear();
        Effect::Send(ApiRequest::ListNotes {
            query: self.notes_query.clone(),
        })
    }

    fn begin_load_action_items(&mut self) -> Effect {
        self.action_items.clear();
        Effect::Send(ApiRequest::ListActionItems)
    }
}
