use crossterm::event::KeyCode;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::panel;
use crate::context::PortalContext;
use crate::models::User;
use crate::theme::ThemeVariant;
use crate::tui::widgets::ListState;
use crate::tui::{App, Command, Subscription, Theme};

pub struct ProfileApp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileAction {
    PushNotices,
    EmailNotices,
    Theme,
    Logout,
}

impl ProfileAction {
    const ALL: [ProfileAction; 4] = [
        ProfileAction::PushNotices,
        ProfileAction::EmailNotices,
        ProfileAction::Theme,
        ProfileAction::Logout,
    ];
}

pub struct State {
    /// Showing the back of the student card
    pub flipped: bool,
    pub push_notices: bool,
    pub email_notices: bool,
    actions: ListState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            flipped: false,
            push_notices: true,
            email_notices: true,
            actions: ListState::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub enum Msg {
    Flip,
    Up,
    Down,
    Activate,
}

impl App for ProfileApp {
    type State = State;
    type Msg = Msg;

    fn update(state: &mut State, msg: Msg, ctx: &mut PortalContext) -> Command<Msg> {
        let count = ProfileAction::ALL.len();
        match msg {
            Msg::Flip => state.flipped = !state.flipped,
            Msg::Up => state.actions.move_up(count),
            Msg::Down => state.actions.move_down(count),
            Msg::Activate => match state.actions.selected(count).map(|i| ProfileAction::ALL[i]) {
                Some(ProfileAction::PushNotices) => state.push_notices = !state.push_notices,
                Some(ProfileAction::EmailNotices) => state.email_notices = !state.email_notices,
                Some(ProfileAction::Theme) => {
                    let variant = ctx.theme.toggle();
                    log::info!("Theme switched to {}", variant);
                }
                Some(ProfileAction::Logout) => ctx.logout(),
                None => {}
            },
        }
        Command::None
    }

    fn view(state: &mut State, ctx: &PortalContext, theme: &Theme, frame: &mut Frame, area: Rect) {
        let Some(user) = ctx.current_user() else {
            return;
        };

        let [card_area, info_area, settings_area] = Layout::vertical([
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Min(6),
        ])
        .areas(area);

        let (card_title, card_lines) = if state.flipped {
            ("Carteirinha · Verso", card_back(user, theme))
        } else {
            ("Carteirinha · Frente", card_front(user, theme))
        };
        frame.render_widget(
            Paragraph::new(card_lines)
                .style(Style::default().bg(theme.bg_surface))
                .block(panel(format!("{} (Espaço vira)", card_title), theme, false)),
            card_area,
        );

        let info: Vec<Line> = [
            ("Nome Completo", user.name.as_str()),
            ("Email", user.email.as_str()),
            ("Curso", user.course.as_str()),
            ("Cargo", user.role.as_str()),
        ]
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{:<15}", label), theme.muted()),
                Span::styled(value.to_string(), Style::default().fg(theme.text_primary)),
            ])
        })
        .collect();
        frame.render_widget(
            Paragraph::new(info).block(panel("Informações Pessoais", theme, false)),
            info_area,
        );

        let switch = |on: bool| if on { "[x]" } else { "[ ]" };
        let selected = state.actions.selected(ProfileAction::ALL.len());
        let lines: Vec<Line> = ProfileAction::ALL
            .iter()
            .enumerate()
            .map(|(i, action)| {
                let label = match action {
                    ProfileAction::PushNotices => {
                        format!("{} Receber notificações por push", switch(state.push_notices))
                    }
                    ProfileAction::EmailNotices => {
                        format!("{} Receber avisos por e-mail", switch(state.email_notices))
                    }
                    ProfileAction::Theme => format!(
                        "{} Tema escuro",
                        switch(ctx.theme.current() == ThemeVariant::Dark)
                    ),
                    ProfileAction::Logout => "Sair da Conta".to_string(),
                };
                let style = if Some(i) == selected {
                    theme.selected()
                } else if *action == ProfileAction::Logout {
                    Style::default().fg(theme.accent_error).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text_primary)
                };
                Line::from(Span::styled(label, style))
            })
            .collect();
        frame.render_widget(
            Paragraph::new(lines).block(panel("Configurações", theme, true)),
            settings_area,
        );
    }

    fn subscriptions(_state: &State, _ctx: &PortalContext) -> Vec<Subscription<Msg>> {
        vec![
            Subscription::keyboard(KeyCode::Char(' '), "Virar cartão", Msg::Flip),
            Subscription::keyboard(KeyCode::Up, "Acima", Msg::Up),
            Subscription::keyboard(KeyCode::Down, "Abaixo", Msg::Down),
            Subscription::keyboard(KeyCode::Enter, "Alternar", Msg::Activate),
        ]
    }

    fn title() -> &'static str {
        "Perfil"
    }
}

fn card_front(user: &User, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled("UNEX · Centro Universitário", theme.muted())),
        Line::from(Span::styled(user.name.clone(), theme.heading())),
        Line::from(Span::styled(user.course.clone(), Style::default().fg(theme.text_primary))),
        Line::from(Span::styled(user.role.to_string(), theme.faint())),
    ]
}

fn card_back(user: &User, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled("Matrícula  ", theme.muted()),
            Span::styled(user.id.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("E-mail     ", theme.muted()),
            Span::raw(user.email.clone()),
        ]),
        Line::from(Span::styled(
            "Documento de uso pessoal e intransferível.",
            theme.faint(),
        )),
    ]
}
