use chrono::{Datelike, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::panel;
use crate::catalog::{AnnouncementKind, weekday_name};
use crate::context::PortalContext;
use crate::models::Page;
use crate::tui::widgets::{ListState, TextInputState};
use crate::tui::{App, Command, Subscription, Theme};

pub struct HomeApp;

/// (title, description, target)
const QUICK_LINKS: [(&str, &str, Page); 3] = [
    ("Meu Curso", "Matriz, horários e profs.", Page::Courses),
    ("Calendário", "Provas e eventos.", Page::Calendar),
    ("Comunidade", "Tire suas dúvidas.", Page::Chat),
];

#[derive(Default)]
pub struct State {
    pub banner: usize,
    pub notes: String,
    notes_input: TextInputState,
    pub editing_notes: bool,
    quick_links: ListState,
}

#[derive(Clone, Debug)]
pub enum Msg {
    NextBanner,
    PrevBanner,
    /// Automatic advance from the carousel timer
    Rotate,
    QuickUp,
    QuickDown,
    OpenQuickLink,
    EditNotes,
    StopEditing,
    NotesKey(KeyCode),
}

fn step(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

impl App for HomeApp {
    type State = State;
    type Msg = Msg;

    fn update(state: &mut State, msg: Msg, ctx: &mut PortalContext) -> Command<Msg> {
        let banners = ctx.catalog().banners.len();
        match msg {
            Msg::NextBanner | Msg::Rotate => {
                state.banner = step(state.banner, banners, true);
                Command::None
            }
            Msg::PrevBanner => {
                state.banner = step(state.banner, banners, false);
                Command::None
            }
            Msg::QuickUp => {
                state.quick_links.move_up(QUICK_LINKS.len());
                Command::None
            }
            Msg::QuickDown => {
                state.quick_links.move_down(QUICK_LINKS.len());
                Command::None
            }
            Msg::OpenQuickLink => match state.quick_links.selected(QUICK_LINKS.len()) {
                Some(i) => Command::navigate_to(QUICK_LINKS[i].2),
                None => Command::None,
            },
            Msg::EditNotes => {
                state.editing_notes = true;
                Command::None
            }
            Msg::StopEditing => {
                state.editing_notes = false;
                Command::None
            }
            Msg::NotesKey(code) => {
                if let Some(notes) = state.notes_input.handle_key(code, &state.notes, Some(500)) {
                    state.notes = notes;
                }
                Command::None
            }
        }
    }

    fn view(state: &mut State, ctx: &PortalContext, theme: &Theme, frame: &mut Frame, area: Rect) {
        let catalog = ctx.catalog();
        let today = Local::now();

        let [header, banner_area, body, notices] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Length(8),
        ])
        .areas(area);

        let greeting = match ctx.current_user() {
            Some(user) => format!("Olá, {}!", user.first_name()),
            None => "Olá!".to_string(),
        };
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(greeting, theme.heading())),
                Line::from(Span::styled(
                    format!("{}, {}", weekday_name(today.weekday()), today.format("%d/%m/%Y")),
                    theme.muted(),
                )),
            ]),
            header,
        );

        // Carousel
        let banner_lines = match catalog.banners.get(state.banner) {
            Some(banner) => {
                let dots: String = (0..catalog.banners.len())
                    .map(|i| if i == state.banner { "● " } else { "○ " })
                    .collect();
                vec![
                    Line::from(Span::styled(
                        banner.title.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(banner.description.clone(), theme.muted())),
                    Line::from(Span::styled(dots, Style::default().fg(theme.accent_primary))),
                ]
            }
            None => vec![Line::from(Span::styled("Sem destaques no momento.", theme.faint()))],
        };
        frame.render_widget(
            Paragraph::new(banner_lines)
                .wrap(Wrap { trim: true })
                .block(panel("Destaques ← →", theme, false)),
            banner_area,
        );

        let [left, right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(body);
        let [links_area, classes_area] =
            Layout::vertical([Constraint::Length(5), Constraint::Min(3)]).areas(left);

        let selected = state.quick_links.selected(QUICK_LINKS.len());
        let links: Vec<Line> = QUICK_LINKS
            .iter()
            .enumerate()
            .map(|(i, (title, description, _))| {
                let style = if Some(i) == selected && !state.editing_notes {
                    theme.selected()
                } else {
                    Style::default().fg(theme.text_primary).add_modifier(Modifier::BOLD)
                };
                Line::from(vec![
                    Span::styled(format!(" {} ", title), style),
                    Span::styled(format!("  {}", description), theme.muted()),
                ])
            })
            .collect();
        frame.render_widget(
            Paragraph::new(links).block(panel("Acesso Rápido", theme, !state.editing_notes)),
            links_area,
        );

        let course = ctx.current_user().map(|u| u.course.as_str()).unwrap_or_default();
        let classes = catalog.classes_on(course, today.weekday());
        let class_lines: Vec<Line> = if classes.is_empty() {
            vec![Line::from(Span::styled(
                "Você não tem aulas hoje. Aproveite para estudar!",
                theme.muted(),
            ))]
        } else {
            classes
                .iter()
                .map(|item| {
                    Line::from(vec![
                        Span::styled(
                            format!("{:>5} ", item.starts_at()),
                            Style::default().fg(theme.accent_primary),
                        ),
                        Span::styled(item.subject.clone(), Style::default().add_modifier(Modifier::BOLD)),
                        Span::styled(format!("  {}", item.location), theme.faint()),
                    ])
                })
                .collect()
        };
        frame.render_widget(
            Paragraph::new(class_lines)
                .wrap(Wrap { trim: true })
                .block(panel(format!("Aulas de Hoje ({} aulas)", classes.len()), theme, false)),
            classes_area,
        );

        let notes_line = state.notes_input.line(
            &state.notes,
            "Pressione N para anotar algo...",
            state.editing_notes,
            None,
            theme,
        );
        frame.render_widget(
            Paragraph::new(notes_line)
                .wrap(Wrap { trim: false })
                .block(panel("Notas Rápidas", theme, state.editing_notes)),
            right,
        );

        let mut notice_lines = Vec::new();
        for announcement in &catalog.announcements {
            let icon_color = match announcement.kind {
                AnnouncementKind::Notice => theme.accent_error,
                AnnouncementKind::Material => theme.accent_info,
            };
            notice_lines.push(Line::from(vec![
                Span::styled("● ", Style::default().fg(icon_color)),
                Span::styled(announcement.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(format!("  {}", announcement.posted), theme.faint()),
            ]));
            notice_lines.push(Line::from(Span::styled(format!("  {}", announcement.body), theme.muted())));
        }
        frame.render_widget(
            Paragraph::new(notice_lines)
                .wrap(Wrap { trim: true })
                .block(panel("Últimos Avisos", theme, false)),
            notices,
        );
    }

    fn subscriptions(state: &State, ctx: &PortalContext) -> Vec<Subscription<Msg>> {
        let mut subs = Vec::new();
        if ctx.catalog().banners.len() > 1 {
            subs.push(Subscription::timer(ctx.config().banner_interval(), Msg::Rotate));
        }

        if state.editing_notes {
            subs.push(Subscription::keyboard(KeyCode::Esc, "Concluir nota", Msg::StopEditing));
            return subs;
        }

        subs.extend([
            Subscription::keyboard(KeyCode::Left, "Destaque anterior", Msg::PrevBanner),
            Subscription::keyboard(KeyCode::Right, "Próximo destaque", Msg::NextBanner),
            Subscription::keyboard(KeyCode::Up, "Acima", Msg::QuickUp),
            Subscription::keyboard(KeyCode::Down, "Abaixo", Msg::QuickDown),
            Subscription::keyboard(KeyCode::Enter, "Abrir", Msg::OpenQuickLink),
            Subscription::keyboard(KeyCode::Char('n'), "Notas", Msg::EditNotes),
        ]);
        subs
    }

    fn title() -> &'static str {
        "Início"
    }

    fn on_key(state: &State, key: KeyEvent) -> Option<Msg> {
        if state.editing_notes && !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            Some(Msg::NotesKey(key.code))
        } else {
            None
        }
    }
}
