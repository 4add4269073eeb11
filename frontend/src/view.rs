use notes_shared::{AuthTab, Event, Field, FormId};
use sauron::{
    html::{attributes::*, *},
    prelude::*,
};

use crate::{Model, Msg};

const INPUT_CLASS: &str = "w-full px-3 py-2 bg-ctp-surface0 border border-ctp-surface2 rounded-md text-ctp-text placeholder-ctp-subtext0 focus:outline-none focus:ring-2 focus:ring-ctp-blue focus:border-transparent";
const PRIMARY_BUTTON: &str = "bg-ctp-blue hover:bg-ctp-sapphire text-ctp-base font-medium px-6 py-2 rounded-md transition-colors duration-200";
const SECONDARY_BUTTON: &str = "bg-ctp-surface1 hover:bg-ctp-surface2 text-ctp-text font-medium px-4 py-2 rounded-md transition-colors duration-200";
const CARD: &str = "p-6 bg-ctp-surface0 rounded-lg border border-ctp-surface1 shadow-lg";

impl Model {
    pub(crate) fn view_header(&self) -> Node<Msg> {
        header([class("bg-ctp-mantle shadow-lg border-b border-ctp-surface0")], [
            div([class("max-w-4xl mx-auto px-6 py-4 flex items-center justify-between")], [
                h1([class("text-2xl font-bold text-ctp-text")], [text("Notes & Action Items")]),
                div([class("flex items-center space-x-4")], [
                    match self.state.current_user() {
                        Some(username) => div([class("flex items-center space-x-3")], [
                            span([class("text-ctp-subtext1")], [text("Signed in as")]),
                            span([class("font-semibold text-ctp-text")], [text(username)]),
                            button([
                                on_click(|_| Msg::App(Event::Logout)),
                                class(SECONDARY_BUTTON),
                            ], [text("Logout")]),
                        ]),
                        None => span([], []),
                    },
                    self.view_theme_toggle(),
                ]),
            ]),
        ])
    }

    fn view_theme_toggle(&self) -> Node<Msg> {
        let active = self.theme.active();
        let hidden_when = |dark: bool| if active.is_dark() == dark { "hidden" } else { "" };

        div([class("flex items-center space-x-2")], [
            button([
                on_click(|_| Msg::ToggleTheme),
                attr("aria-label", active.toggle_label()),
                class("p-2 rounded-full hover:bg-ctp-surface0 transition-colors duration-200"),
            ], [
                span([class(hidden_when(true))], [text("🌙")]),
                span([class(hidden_when(false))], [text("☀️")]),
            ]),
            if self.theme.is_explicit() {
                button([
                    on_click(|_| Msg::UseSystemTheme),
                    class("text-xs text-ctp-subtext0 hover:text-ctp-text"),
                ], [text("Use system")])
            } else {
                span([], [])
            },
        ])
    }

    pub(crate) fn view_auth(&self, tab: AuthTab) -> Node<Msg> {
        div([class(CARD)], [
            div([class("flex space-x-2 mb-6 border-b border-ctp-surface2")], [
                tab_button("Login", AuthTab::Login, tab),
                tab_button("Register", AuthTab::Register, tab),
            ]),
            match tab {
                AuthTab::Login => self.view_login_form(),
                AuthTab::Register => self.view_register_form(),
            },
        ])
    }

    fn view_login_form(&self) -> Node<Msg> {
        let login = &self.state.forms().login;
        submit_form(Event::SubmitLogin, "space-y-4", [
            text_input("text", "Username", &login.username, Field::LoginUsername),
            text_input("password", "Password", &login.password, Field::LoginPassword),
            submit_button("Login"),
        ])
    }

    fn view_register_form(&self) -> Node<Msg> {
        let register = &self.state.forms().register;
        submit_form(Event::SubmitRegister, "space-y-4", [
            text_input("text", "Username", &register.username, Field::RegisterUsername),
            text_input("password", "Password", &register.password, Field::RegisterPassword),
            submit_button("Register"),
        ])
    }

    pub(crate) fn view_app(&self, username: &str) -> Node<Msg> {
        div([class("space-y-8")], [
            p([class("text-ctp-subtext0")], [text(&format!("Welcome back, {}.", username))]),
            self.view_notes(),
            self.view_action_items(),
        ])
    }

    fn view_notes(&self) -> Node<Msg> {
        let forms = self.state.forms();
        let rows = self.state.note_rows();

        section([class(CARD)], [
            h2([class("text-xl font-semibold text-ctp-text mb-4 pb-2 border-b border-ctp-surface2")], [text("Notes")]),
            submit_form(Event::SearchNotes, "flex gap-2 mb-4", [
                text_input("search", "Search notes", &forms.note_search, Field::NoteSearch),
                submit_button("Search"),
                button([
                    r#type("button"),
                    on_click(|_| Msg::App(Event::ClearSearch)),
                    class(SECONDARY_BUTTON),
                ], [text("Show all")]),
            ]),
            submit_form(Event::SubmitNote, "space-y-3 mb-6", [
                text_input("text", "Title", &forms.note.title, Field::NoteTitle),
                textarea([
                    placeholder("Content"),
                    value(&forms.note.content),
                    on_input(|event| Msg::App(Event::Input(Field::NoteContent, event.value()))),
                    class(&format!("{} h-20 resize-y", INPUT_CLASS)),
                ], []),
                div([class("flex gap-2")], [
                    submit_button("Add Note"),
                    clear_button(FormId::Note),
                ]),
            ]),
            if rows.is_empty() {
                p([class("text-ctp-subtext0")], [text("No notes yet.")])
            } else {
                ul(
                    [class("space-y-2")],
                    rows.iter()
                        .map(|row| li([class("px-3 py-2 bg-ctp-surface1 rounded-md")], [text(row)]))
                        .collect::<Vec<_>>(),
                )
            },
        ])
    }

    fn view_action_items(&self) -> Node<Msg> {
        let forms = self.state.forms();
        let rows = self.state.action_rows();

        section([class(CARD)], [
            h2([class("text-xl font-semibold text-ctp-text mb-4 pb-2 border-b border-ctp-surface2")], [text("Action Items")]),
            submit_form(Event::SubmitActionItem, "space-y-3 mb-6", [
                text_input("text", "Description", &forms.action_item.description, Field::ActionDescription),
                div([class("flex gap-2")], [
                    submit_button("Add Action"),
                    clear_button(FormId::ActionItem),
                ]),
            ]),
            if rows.is_empty() {
                p([class("text-ctp-subtext0")], [text("Nothing to do.")])
            } else {
                ul(
                    [class("space-y-2")],
                    rows.into_iter()
                        .map(|row| {
                            let id = row.id;
                            li([
                                key(id.to_string()),
                                class("flex items-center justify-between px-3 py-2 bg-ctp-surface1 rounded-md"),
                            ], [
                                span([], [text(&row.label)]),
                                if row.completable {
                                    button([
                                        on_click(move |_| Msg::App(Event::CompleteActionItem(id))),
                                        class("bg-ctp-green hover:bg-ctp-teal text-ctp-base text-sm font-medium px-3 py-1 rounded-md"),
                                    ], [text("Complete")])
                                } else {
                                    span([], [])
                                },
                            ])
                        })
                        .collect::<Vec<_>>(),
                )
            },
        ])
    }
}

fn tab_button(label: &str, tab: AuthTab, active: AuthTab) -> Node<Msg> {
    button([
        on_click(move |_| Msg::App(Event::SelectTab(tab))),
        class(&format!(
            "px-4 py-2 text-sm font-medium transition-colors duration-200 {}",
            if tab == active {
                "border-b-2 border-ctp-blue text-ctp-blue"
            } else {
                "text-ctp-subtext0 hover:text-ctp-text"
            }
        )),
    ], [text(label)])
}

fn text_input(kind: &'static str, hint: &'static str, current: &str, field: Field) -> Node<Msg> {
    input([
        r#type(kind),
        placeholder(hint),
        value(current.to_string()),
        on_input(move |event| Msg::App(Event::Input(field, event.value()))),
        class(INPUT_CLASS),
    ], [])
}

/// Enter in any field or the submit button sends `event`, without letting
/// the browser navigate.
fn submit_form(
    event: Event,
    layout: &'static str,
    children: impl IntoIterator<Item = Node<Msg>>,
) -> Node<Msg> {
    form([
        on_submit(move |submit| {
            submit.prevent_default();
            Msg::App(event.clone())
        }),
        class(layout),
    ], children)
}

fn submit_button(label: &str) -> Node<Msg> {
    button([r#type("submit"), class(PRIMARY_BUTTON)], [text(label)])
}

fn clear_button(form: FormId) -> Node<Msg> {
    button([
        r#type("button"),
        on_click(move |_| Msg::App(Event::ClearForm(form))),
        class(SECONDARY_BUTTON),
    ], [text("Clear")])
}
