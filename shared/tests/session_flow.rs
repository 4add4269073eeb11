use std::collections::VecDeque;

use notes_shared::{
    response_event, ActionItem, ApiRequest, AppState, AuthTab, Effect, Event, Field, Note,
    RawResponse, ViewState,
};
use serde_json::json;

/// In-memory stand-in for the notes backend.
#[derive(Default)]
struct FakeBackend {
    users: Vec<(String, String)>,
    session: Option<String>,
    notes: Vec<Note>,
    items: Vec<ActionItem>,
    fail_next: Option<u16>,
    sent: Vec<String>,
}

impl FakeBackend {
    fn with_user(username: &str, password: &str) -> Self {
        Self {
            users: vec![(username.to_string(), password.to_string())],
            ..Self::default()
        }
    }

    fn handle(&mut self, request: &ApiRequest) -> RawResponse {
        self.sent
            .push(format!("{} {}", request.method().as_str(), request.path()));

        if let Some(status) = self.fail_next.take() {
            return RawResponse::new(status, "Internal Server Error");
        }

        let unauthorized = RawResponse::new(401, json!({"detail": "Not authenticated"}).to_string());
        let authed = self.session.is_some();

        match request {
            ApiRequest::CurrentUser => match &self.session {
                Some(username) => ok(json!({"id": 1, "username": username})),
                None => unauthorized,
            },
            ApiRequest::Login(creds) => {
                let known = self
                    .users
                    .iter()
                    .any(|(u, p)| *u == creds.username && *p == creds.password);
                if !known {
                    return RawResponse::new(
                        401,
                        json!({"detail": "Incorrect username or password"}).to_string(),
                    );
                }
                self.session = Some(creds.username.clone());
                ok(json!({"message": "Login successful", "username": creds.username}))
            }
            ApiRequest::Register(creds) => {
                if self.users.iter().any(|(u, _)| *u == creds.username) {
                    return RawResponse::new(
                        400,
                        json!({"detail": "Username already registered"}).to_string(),
                    );
                }
                self.users
                    .push((creds.username.clone(), creds.password.clone()));
                RawResponse::new(
                    201,
                    json!({"id": self.users.len(), "username": creds.username}).to_string(),
                )
            }
            ApiRequest::Logout => {
                self.session = None;
                ok(json!({"message": "Logout successful"}))
            }
            _ if !authed => unauthorized,
            ApiRequest::ListNotes { query } => {
                let notes: Vec<&Note> = self
                    .notes
                    .iter()
                    .filter(|n| match query {
                        Some(q) => n.title.contains(q.as_str()) || n.content.contains(q.as_str()),
                        None => true,
                    })
                    .collect();
                ok(json!(notes))
            }
            ApiRequest::CreateNote(note) => {
                self.notes.push(Note {
                    title: note.title.clone(),
                    content: note.content.clone(),
                });
                RawResponse::new(
                    201,
                    json!({"id": self.notes.len(), "title": note.title, "content": note.content, "user_id": 1})
                        .to_string(),
                )
            }
            ApiRequest::ListActionItems => ok(json!(self.items)),
            ApiRequest::CreateActionItem(item) => {
                let created = ActionItem {
                    id: self.items.len() as i64 + 1,
                    description: item.description.clone(),
                    completed: false,
                };
                self.items.push(created.clone());
                RawResponse::new(201, json!(created).to_string())
            }
            ApiRequest::CompleteActionItem(id) => {
                match self.items.iter_mut().find(|item| item.id == *id) {
                    Some(item) => {
                        item.completed = true;
                        ok(json!(item))
                    }
                    None => RawResponse::new(404, json!({"detail": "Action item not found"}).to_string()),
                }
            }
        }
    }
}

fn ok(value: serde_json::Value) -> RawResponse {
    RawResponse::new(200, value.to_string())
}

/// Applies `event` and every follow-up until the state settles. Returns the
/// alerts shown along the way.
fn drive(state: &mut AppState, backend: &mut FakeBackend, event: Event) -> Vec<String> {
    let mut alerts = Vec::new();
    let mut queue = VecDeque::from([event]);
    while let Some(event) = queue.pop_front() {
        for effect in state.apply(event) {
            match effect {
                Effect::Send(request) => {
                    let response = backend.handle(&request);
                    queue.push_back(response_event(request, Ok(response)));
                }
                Effect::Alert(message) => alerts.push(message),
            }
        }
    }
    alerts
}

fn type_into(state: &mut AppState, backend: &mut FakeBackend, field: Field, value: &str) {
    drive(state, backend, Event::Input(field, value.to_string()));
}

fn login(state: &mut AppState, backend: &mut FakeBackend, username: &str, password: &str) -> Vec<String> {
    type_into(state, backend, Field::LoginUsername, username);
    type_into(state, backend, Field::LoginPassword, password);
    drive(state, backend, Event::SubmitLogin)
}

fn note(title: &str, content: &str) -> Note {
    Note {
        title: title.to_string(),
        content: content.to_string(),
    }
}

#[test]
fn valid_login_shows_user_and_both_lists() {
    let mut backend = FakeBackend::with_user("alice", "pw");
    backend.notes = vec![note("Groceries", "milk")];
    backend.items = vec![ActionItem {
        id: 1,
        description: "call bob".to_string(),
        completed: false,
    }];
    let mut state = AppState::default();

    drive(&mut state, &mut backend, Event::Started);
    assert_eq!(state.view_state(), ViewState::Unauthenticated(AuthTab::Login));

    let alerts = login(&mut state, &mut backend, "alice", "pw");
    assert!(alerts.is_empty());
    assert_eq!(state.view_state(), ViewState::Authenticated("alice".to_string()));
    assert_eq!(state.note_rows(), vec!["Groceries: milk".to_string()]);
    assert_eq!(state.action_rows()[0].label, "call bob [open]");
    assert_eq!(state.forms().login.username, "");
    assert_eq!(
        backend.sent,
        vec![
            "GET /auth/me",
            "POST /auth/login",
            "GET /notes/",
            "GET /action-items/",
        ]
    );
}

#[test]
fn login_then_logout_returns_to_login_view() {
    let mut backend = FakeBackend::with_user("alice", "pw");
    let mut state = AppState::default();

    drive(&mut state, &mut backend, Event::Started);
    login(&mut state, &mut backend, "alice", "pw");
    drive(&mut state, &mut backend, Event::Logout);

    assert_eq!(state.view_state(), ViewState::Unauthenticated(AuthTab::Login));
    assert_eq!(state.current_user(), None);

    login(&mut state, &mut backend, "alice", "pw");
    drive(&mut state, &mut backend, Event::Logout);
    assert_eq!(state.view_state(), ViewState::Unauthenticated(AuthTab::Login));
}

#[test]
fn tab_switch_during_login_still_ends_on_login_tab() {
    let mut backend = FakeBackend::with_user("alice", "pw");
    let mut state = AppState::default();
    type_into(&mut state, &mut backend, Field::LoginUsername, "alice");
    type_into(&mut state, &mut backend, Field::LoginPassword, "pw");

    // Login response arrives after the user already clicked the other tab.
    let mut effects = state.apply(Event::SubmitLogin);
    let Some(Effect::Send(request)) = effects.pop() else {
        panic!("login should send a request");
    };
    drive(&mut state, &mut backend, Event::SelectTab(AuthTab::Register));
    let response = backend.handle(&request);
    drive(&mut state, &mut backend, response_event(request, Ok(response)));
    assert_eq!(state.view_state(), ViewState::Authenticated("alice".to_string()));

    drive(&mut state, &mut backend, Event::Logout);
    assert_eq!(state.view_state(), ViewState::Unauthenticated(AuthTab::Login));
}

#[test]
fn existing_session_skips_the_login_form() {
    let mut backend = FakeBackend::with_user("alice", "pw");
    backend.session = Some("alice".to_string());
    let mut state = AppState::default();

    drive(&mut state, &mut backend, Event::Started);
    assert_eq!(state.view_state(), ViewState::Authenticated("alice".to_string()));
}

#[test]
fn wrong_password_alerts_and_stays_logged_out() {
    let mut backend = FakeBackend::with_user("alice", "pw");
    let mut state = AppState::default();

    let alerts = login(&mut state, &mut backend, "alice", "nope");
    assert_eq!(alerts, vec!["Login failed: Incorrect username or password".to_string()]);
    assert_eq!(state.view_state(), ViewState::Unauthenticated(AuthTab::Login));
    assert_eq!(state.forms().login.password, "nope");
}

#[test]
fn taken_username_alerts_and_keeps_register_form() {
    let mut backend = FakeBackend::with_user("alice", "pw");
    let mut state = AppState::default();

    drive(&mut state, &mut backend, Event::SelectTab(AuthTab::Register));
    type_into(&mut state, &mut backend, Field::RegisterUsername, "alice");
    type_into(&mut state, &mut backend, Field::RegisterPassword, "other");
    let alerts = drive(&mut state, &mut backend, Event::SubmitRegister);

    assert_eq!(alerts, vec!["Registration failed: Username already registered".to_string()]);
    assert_eq!(state.view_state(), ViewState::Unauthenticated(AuthTab::Register));
    assert_eq!(state.forms().register.username, "alice");
    assert_eq!(backend.users.len(), 1);
}

#[test]
fn registration_resets_form_and_asks_to_login() {
    let mut backend = FakeBackend::default();
    let mut state = AppState::default();

    drive(&mut state, &mut backend, Event::SelectTab(AuthTab::Register));
    type_into(&mut state, &mut backend, Field::RegisterUsername, "carol");
    type_into(&mut state, &mut backend, Field::RegisterPassword, "pw");
    let alerts = drive(&mut state, &mut backend, Event::SubmitRegister);

    assert_eq!(alerts, vec!["Registration successful! Please login.".to_string()]);
    assert_eq!(state.view_state(), ViewState::Unauthenticated(AuthTab::Register));
    assert_eq!(state.forms().register.username, "");
}

#[test]
fn completing_an_item_reloads_the_list_from_scratch() {
    let mut backend = FakeBackend::with_user("alice", "pw");
    backend.items = vec![
        ActionItem {
            id: 7,
            description: "file taxes".to_string(),
            completed: false,
        },
        ActionItem {
            id: 8,
            description: "water plants".to_string(),
            completed: false,
        },
    ];
    let mut state = AppState::default();
    login(&mut state, &mut backend, "alice", "pw");
    assert_eq!(state.action_items().len(), 2);

    // Deleted elsewhere; must not survive the reload.
    backend.items.retain(|item| item.id != 8);
    backend.sent.clear();

    drive(&mut state, &mut backend, Event::CompleteActionItem(7));

    assert_eq!(
        backend.sent,
        vec!["PUT /action-items/7/complete", "GET /action-items/"]
    );
    assert_eq!(state.action_items(), backend.items.as_slice());
    let rows = state.action_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].label, "file taxes [done]");
    assert!(!rows[0].completable);
}

#[test]
fn created_note_appears_after_reload() {
    let mut backend = FakeBackend::with_user("alice", "pw");
    let mut state = AppState::default();
    login(&mut state, &mut backend, "alice", "pw");
    backend.sent.clear();

    type_into(&mut state, &mut backend, Field::NoteTitle, "Ideas");
    type_into(&mut state, &mut backend, Field::NoteContent, "rewrite in rust");
    drive(&mut state, &mut backend, Event::SubmitNote);

    assert_eq!(backend.sent, vec!["POST /notes/", "GET /notes/"]);
    assert_eq!(state.note_rows(), vec!["Ideas: rewrite in rust".to_string()]);
    assert_eq!(state.forms().note.title, "");
}

#[test]
fn created_action_item_appears_after_reload() {
    let mut backend = FakeBackend::with_user("alice", "pw");
    let mut state = AppState::default();
    login(&mut state, &mut backend, "alice", "pw");

    type_into(&mut state, &mut backend, Field::ActionDescription, "book flights");
    drive(&mut state, &mut backend, Event::SubmitActionItem);

    assert_eq!(state.action_rows()[0].label, "book flights [open]");
    assert_eq!(state.forms().action_item.description, "");
}

#[test]
fn failed_creation_aborts_quietly() {
    let mut backend = FakeBackend::with_user("alice", "pw");
    let mut state = AppState::default();
    login(&mut state, &mut backend, "alice", "pw");
    backend.sent.clear();

    type_into(&mut state, &mut backend, Field::NoteTitle, "Ideas");
    type_into(&mut state, &mut backend, Field::NoteContent, "draft");
    backend.fail_next = Some(500);
    let alerts = drive(&mut state, &mut backend, Event::SubmitNote);

    assert!(alerts.is_empty());
    assert_eq!(backend.sent, vec!["POST /notes/"]);
    assert_eq!(state.forms().note.title, "Ideas");
    assert_eq!(state.current_user(), Some("alice"));
}

#[test]
fn expired_session_forces_login_view() {
    let mut backend = FakeBackend::with_user("alice", "pw");
    backend.notes = vec![note("Private", "secret")];
    let mut state = AppState::default();
    login(&mut state, &mut backend, "alice", "pw");
    assert_eq!(state.notes().len(), 1);

    backend.session = None;
    drive(&mut state, &mut backend, Event::CompleteActionItem(1));

    assert_eq!(state.view_state(), ViewState::Unauthenticated(AuthTab::Login));
    assert!(state.notes().is_empty());
}

#[test]
fn failed_reload_leaves_list_empty_without_alert() {
    let mut backend = FakeBackend::with_user("alice", "pw");
    backend.notes = vec![note("Groceries", "milk")];
    let mut state = AppState::default();
    login(&mut state, &mut backend, "alice", "pw");
    assert_eq!(state.notes().len(), 1);

    type_into(&mut state, &mut backend, Field::NoteSearch, "milk");
    backend.fail_next = Some(500);
    let alerts = drive(&mut state, &mut backend, Event::SearchNotes);

    assert!(alerts.is_empty());
    assert!(state.notes().is_empty());
    assert_eq!(state.current_user(), Some("alice"));
}

#[test]
fn search_filters_notes_through_backend() {
    let mut backend = FakeBackend::with_user("alice", "pw");
    backend.notes = vec![note("Groceries", "milk"), note("Work", "standup")];
    let mut state = AppState::default();
    login(&mut state, &mut backend, "alice", "pw");
    assert_eq!(state.notes().len(), 2);

    type_into(&mut state, &mut backend, Field::NoteSearch, "milk");
    drive(&mut state, &mut backend, Event::SearchNotes);
    assert_eq!(backend.sent.last().map(String::as_str), Some("GET /notes/search/?q=milk"));
    assert_eq!(state.note_rows(), vec!["Groceries: milk".to_string()]);

    drive(&mut state, &mut backend, Event::ClearSearch);
    assert_eq!(state.notes().len(), 2);
}
