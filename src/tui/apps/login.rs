use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use super::panel;
use crate::context::PortalContext;
use crate::tui::widgets::TextInputState;
use crate::tui::{App, Command, Subscription, Theme};

pub struct LoginApp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
    Terms,
    Submit,
    Google,
}

impl LoginField {
    const ORDER: [LoginField; 5] = [
        LoginField::Email,
        LoginField::Password,
        LoginField::Terms,
        LoginField::Submit,
        LoginField::Google,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    fn is_text(self) -> bool {
        matches!(self, LoginField::Email | LoginField::Password)
    }
}

#[derive(Default)]
pub struct State {
    pub email: String,
    email_input: TextInputState,
    pub password: String,
    password_input: TextInputState,
    pub terms_accepted: bool,
    pub focus: LoginField,
}

#[derive(Clone, Debug)]
pub enum Msg {
    FocusNext,
    FocusPrev,
    Activate,
    Edit(KeyCode),
}

fn submit(state: &State, ctx: &mut PortalContext) -> Command<Msg> {
    match ctx.login(state.terms_accepted) {
        Ok(outcome) => {
            log::debug!("Login accepted, tutorial pending: {}", outcome.show_tutorial);
            Command::None
        }
        Err(e) => Command::alert("Atenção", e.to_string()),
    }
}

impl App for LoginApp {
    type State = State;
    type Msg = Msg;

    fn update(state: &mut State, msg: Msg, ctx: &mut PortalContext) -> Command<Msg> {
        match msg {
            Msg::FocusNext => {
                state.focus = state.focus.next();
                Command::None
            }
            Msg::FocusPrev => {
                state.focus = state.focus.prev();
                Command::None
            }
            Msg::Activate => match state.focus {
                LoginField::Email => {
                    state.focus = LoginField::Password;
                    Command::None
                }
                LoginField::Terms => {
                    state.terms_accepted = !state.terms_accepted;
                    Command::None
                }
                LoginField::Password | LoginField::Submit | LoginField::Google => {
                    submit(state, ctx)
                }
            },
            Msg::Edit(code) => {
                match state.focus {
                    LoginField::Email => {
                        if let Some(value) = state.email_input.handle_key(code, &state.email, Some(120)) {
                            state.email = value;
                        }
                    }
                    LoginField::Password => {
                        if let Some(value) =
                            state.password_input.handle_key(code, &state.password, Some(120))
                        {
                            state.password = value;
                        }
                    }
                    _ => {}
                }
                Command::None
            }
        }
    }

    fn view(state: &mut State, _ctx: &PortalContext, theme: &Theme, frame: &mut Frame, area: Rect) {
        let [column] = Layout::horizontal([Constraint::Length(56)])
            .flex(Flex::Center)
            .areas(area);
        let [card] = Layout::vertical([Constraint::Length(19)])
            .flex(Flex::Center)
            .areas(column);

        frame.render_widget(Clear, card);
        let block = panel("UNEX Calouros", theme, true);
        let inner = block.inner(card);
        frame.render_widget(block.style(theme.base()), card);

        let focus_marker = |field: LoginField| {
            if state.focus == field {
                Span::styled("▶ ", Style::default().fg(theme.accent_primary))
            } else {
                Span::raw("  ")
            }
        };
        let button = |field: LoginField, label: &str| {
            let style = if state.focus == field {
                theme.selected()
            } else {
                Style::default()
                    .fg(theme.accent_primary)
                    .add_modifier(Modifier::BOLD)
            };
            Line::from(vec![focus_marker(field), Span::styled(format!("[ {} ]", label), style)])
        };

        let checkbox = if state.terms_accepted { "[x]" } else { "[ ]" };
        let lines = vec![
            Line::from(Span::styled("Bem-vindo(a)!", theme.heading())),
            Line::from(Span::styled("Acesse sua conta para continuar.", theme.muted())),
            Line::raw(""),
            Line::from(Span::styled("E-mail", theme.muted())),
            Line::from(
                [focus_marker(LoginField::Email)]
                    .into_iter()
                    .chain(
                        state
                            .email_input
                            .line(&state.email, "seu@email.com", state.focus == LoginField::Email, None, theme)
                            .spans,
                    )
                    .collect::<Vec<_>>(),
            ),
            Line::from(Span::styled("Senha", theme.muted())),
            Line::from(
                [focus_marker(LoginField::Password)]
                    .into_iter()
                    .chain(
                        state
                            .password_input
                            .line(&state.password, "••••••••", state.focus == LoginField::Password, Some('•'), theme)
                            .spans,
                    )
                    .collect::<Vec<_>>(),
            ),
            Line::raw(""),
            Line::from(vec![
                focus_marker(LoginField::Terms),
                Span::styled(format!("{} ", checkbox), Style::default().fg(theme.accent_primary)),
                Span::raw("Li e aceito os Termos de Uso e a Política de Privacidade"),
            ]),
            Line::raw(""),
            button(LoginField::Submit, "Entrar"),
            button(LoginField::Google, "Entrar com Google"),
            Line::raw(""),
            Line::from(Span::styled("Tab alterna campos · Espaço marca · Enter confirma", theme.faint())),
        ];

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn subscriptions(state: &State, _ctx: &PortalContext) -> Vec<Subscription<Msg>> {
        let mut subs = vec![
            Subscription::keyboard(KeyCode::Tab, "Próximo campo", Msg::FocusNext),
            Subscription::keyboard(KeyCode::BackTab, "Campo anterior", Msg::FocusPrev),
            Subscription::keyboard(KeyCode::Down, "Próximo campo", Msg::FocusNext),
            Subscription::keyboard(KeyCode::Up, "Campo anterior", Msg::FocusPrev),
            Subscription::keyboard(KeyCode::Enter, "Confirmar", Msg::Activate),
        ];
        if !state.focus.is_text() {
            subs.push(Subscription::keyboard(KeyCode::Char(' '), "Marcar", Msg::Activate));
        }
        subs
    }

    fn title() -> &'static str {
        "Login"
    }

    fn on_key(state: &State, key: KeyEvent) -> Option<Msg> {
        if !state.focus.is_text() || key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        Some(Msg::Edit(key.code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::PortalConfig;
    use crate::storage::MemoryStorage;
    use std::sync::Arc;

    fn ctx() -> PortalContext {
        PortalContext::new(
            Arc::new(MemoryStorage::new()),
            Arc::new(Catalog::load().unwrap()),
            PortalConfig::default(),
        )
    }

    #[test]
    fn test_focus_cycles() {
        assert_eq!(LoginField::Google.next(), LoginField::Email);
        assert_eq!(LoginField::Email.prev(), LoginField::Google);
    }

    #[test]
    fn test_submit_without_terms_alerts() {
        let mut ctx = ctx();
        let mut state = State {
            focus: LoginField::Submit,
            ..State::default()
        };

        let command = LoginApp::update(&mut state, Msg::Activate, &mut ctx);
        match command {
            Command::Alert { body, .. } => assert!(body.contains("Termos de Uso")),
            _ => panic!("expected an alert"),
        }
        assert!(ctx.current_user().is_none());
    }

    #[test]
    fn test_typing_then_google_login() {
        let mut ctx = ctx();
        let mut state = State::default();
        for c in "ana@x.com".chars() {
            LoginApp::update(&mut state, Msg::Edit(KeyCode::Char(c)), &mut ctx);
        }
        assert_eq!(state.email, "ana@x.com");

        state.focus = LoginField::Terms;
        LoginApp::update(&mut state, Msg::Activate, &mut ctx);
        assert!(state.terms_accepted);

        state.focus = LoginField::Google;
        assert!(matches!(LoginApp::update(&mut state, Msg::Activate, &mut ctx), Command::None));
        assert_eq!(ctx.current_user().map(|u| u.name.as_str()), Some("Ana Bia"));
    }
}
