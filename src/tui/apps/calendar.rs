use crossterm::event::KeyCode;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::panel;
use crate::catalog::{AppEvent, EventKind};
use crate::context::PortalContext;
use crate::tui::widgets::ListState;
use crate::tui::{App, Command, Subscription, Theme};

pub struct CalendarApp;

/// Rows each event occupies in the list
const EVENT_HEIGHT: usize = 3;

#[derive(Default)]
pub struct State {
    list: ListState,
}

#[derive(Clone, Debug)]
pub enum Msg {
    Up,
    Down,
}

fn badge_color(kind: EventKind, theme: &Theme) -> Color {
    match kind {
        EventKind::Exam => theme.accent_error,
        EventKind::Event => theme.accent_info,
        EventKind::Deadline => theme.accent_warning,
        EventKind::Registration => theme.accent_success,
    }
}

fn event_lines(event: &AppEvent, selected: bool, theme: &Theme) -> Vec<Line<'static>> {
    let title_style = if selected {
        theme.selected()
    } else {
        Style::default().fg(theme.text_primary).add_modifier(Modifier::BOLD)
    };
    let badge = Style::default()
        .fg(theme.bg_base)
        .bg(badge_color(event.kind, theme))
        .add_modifier(Modifier::BOLD);

    vec![
        Line::from(vec![
            Span::styled(format!(" {} ", event.kind.label()), badge),
            Span::raw(" "),
            Span::styled(event.title.clone(), title_style),
        ]),
        Line::from(Span::styled(
            format!(
                "   {}  {}  ·  {}",
                event.start.format("%d/%m/%Y"),
                event.time_range(),
                event.location
            ),
            theme.muted(),
        )),
        Line::raw(""),
    ]
}

impl App for CalendarApp {
    type State = State;
    type Msg = Msg;

    fn update(state: &mut State, msg: Msg, ctx: &mut PortalContext) -> Command<Msg> {
        let count = ctx.catalog().events.len();
        match msg {
            Msg::Up => state.list.move_up(count),
            Msg::Down => state.list.move_down(count),
        }
        Command::None
    }

    fn view(state: &mut State, ctx: &PortalContext, theme: &Theme, frame: &mut Frame, area: Rect) {
        let events = ctx.catalog().events_by_start();
        let selected = state.list.selected(events.len());

        let block = panel("Calendário Acadêmico", theme, true);
        let visible = (block.inner(area).height as usize / EVENT_HEIGHT).max(1);
        let offset = state.list.scroll_offset(events.len(), visible);

        let lines: Vec<Line> = if events.is_empty() {
            vec![Line::from(Span::styled("Nenhum evento agendado.", theme.faint()))]
        } else {
            events
                .iter()
                .enumerate()
                .skip(offset)
                .flat_map(|(i, event)| event_lines(event, Some(i) == selected, theme))
                .collect()
        };

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn subscriptions(_state: &State, _ctx: &PortalContext) -> Vec<Subscription<Msg>> {
        vec![
            Subscription::keyboard(KeyCode::Up, "Acima", Msg::Up),
            Subscription::keyboard(KeyCode::Down, "Abaixo", Msg::Down),
        ]
    }

    fn title() -> &'static str {
        "Calendário"
    }
}
