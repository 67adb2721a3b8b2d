use crossterm::event::KeyCode;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, Tabs, Wrap};

use super::panel;
use crate::catalog::Course;
use crate::context::PortalContext;
use crate::tui::widgets::ListState;
use crate::tui::{App, Command, Subscription, Theme};

pub struct CoursesApp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CourseTab {
    #[default]
    Matrix,
    Professors,
    Schedule,
    Materials,
}

impl CourseTab {
    const ALL: [CourseTab; 4] = [
        CourseTab::Matrix,
        CourseTab::Professors,
        CourseTab::Schedule,
        CourseTab::Materials,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CourseTab::Matrix => "Matriz Curricular",
            CourseTab::Professors => "Professores",
            CourseTab::Schedule => "Horários",
            CourseTab::Materials => "Materiais",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Default)]
pub struct State {
    list: ListState,
    /// Index of the course whose detail is open
    pub open: Option<usize>,
    pub tab: CourseTab,
}

#[derive(Clone, Debug)]
pub enum Msg {
    Up,
    Down,
    Open,
    Back,
    NextTab,
    PrevTab,
}

impl App for CoursesApp {
    type State = State;
    type Msg = Msg;

    fn update(state: &mut State, msg: Msg, ctx: &mut PortalContext) -> Command<Msg> {
        let count = ctx.catalog().courses.len();
        match msg {
            Msg::Up => state.list.move_up(count),
            Msg::Down => state.list.move_down(count),
            Msg::Open => {
                state.open = state.list.selected(count);
                state.tab = CourseTab::default();
            }
            Msg::Back => state.open = None,
            Msg::NextTab => state.tab = state.tab.next(),
            Msg::PrevTab => state.tab = state.tab.prev(),
        }
        Command::None
    }

    fn view(state: &mut State, ctx: &PortalContext, theme: &Theme, frame: &mut Frame, area: Rect) {
        let courses = &ctx.catalog().courses;
        match state.open.and_then(|i| courses.get(i)) {
            Some(course) => render_detail(course, state.tab, theme, frame, area),
            None => render_list(state, courses, theme, frame, area),
        }
    }

    fn subscriptions(state: &State, _ctx: &PortalContext) -> Vec<Subscription<Msg>> {
        if state.open.is_some() {
            vec![
                Subscription::keyboard(KeyCode::Tab, "Próxima aba", Msg::NextTab),
                Subscription::keyboard(KeyCode::BackTab, "Aba anterior", Msg::PrevTab),
                Subscription::keyboard(KeyCode::Right, "Próxima aba", Msg::NextTab),
                Subscription::keyboard(KeyCode::Left, "Aba anterior", Msg::PrevTab),
                Subscription::keyboard(KeyCode::Esc, "Voltar", Msg::Back),
            ]
        } else {
            vec![
                Subscription::keyboard(KeyCode::Up, "Acima", Msg::Up),
                Subscription::keyboard(KeyCode::Down, "Abaixo", Msg::Down),
                Subscription::keyboard(KeyCode::Enter, "Ver detalhes", Msg::Open),
            ]
        }
    }

    fn title() -> &'static str {
        "Cursos"
    }
}

fn render_list(state: &State, courses: &[Course], theme: &Theme, frame: &mut Frame, area: Rect) {
    let selected = state.list.selected(courses.len());
    let mut lines = Vec::new();
    for (i, course) in courses.iter().enumerate() {
        let name_style = if Some(i) == selected {
            theme.selected()
        } else {
            Style::default().fg(theme.text_primary).add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(Span::styled(format!(" {} ", course.name), name_style)));
        lines.push(Line::from(Span::styled(
            format!("   Coordenação: {}", course.coordinator.name),
            theme.muted(),
        )));
        lines.push(Line::raw(""));
    }
    lines.push(Line::from(Span::styled(
        " Mais Cursos: em breve novos cursos estarão disponíveis.",
        theme.faint(),
    )));

    frame.render_widget(
        Paragraph::new(lines).block(panel("Cursos Disponíveis", theme, true)),
        area,
    );
}

fn render_detail(course: &Course, tab: CourseTab, theme: &Theme, frame: &mut Frame, area: Rect) {
    let [header, tabs_area, content] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(3),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(course.name.clone(), theme.heading())),
            Line::from(Span::styled(
                format!("Coordenação: {} <{}>", course.coordinator.name, course.coordinator.email),
                theme.muted(),
            )),
        ]),
        header,
    );

    let titles: Vec<&str> = CourseTab::ALL.iter().map(CourseTab::label).collect();
    frame.render_widget(
        Tabs::new(titles)
            .select(tab.index())
            .style(theme.muted())
            .highlight_style(theme.selected()),
        tabs_area,
    );

    let header_style = Style::default()
        .fg(theme.accent_primary)
        .add_modifier(Modifier::BOLD);

    match tab {
        CourseTab::Matrix => {
            let mut rows = Vec::new();
            for semester in &course.matrix {
                rows.push(
                    Row::new(vec![
                        Cell::from(format!("{}º Semestre", semester.semester)),
                        Cell::from(format!("{}h", semester.total_workload())),
                    ])
                    .style(header_style),
                );
                rows.extend(semester.subjects.iter().map(|subject| {
                    Row::new(vec![
                        Cell::from(format!("  {}", subject.name)),
                        Cell::from(format!("{}h", subject.workload)),
                    ])
                }));
            }
            let table = Table::new(rows, [Constraint::Min(20), Constraint::Length(8)])
                .header(Row::new(vec!["Disciplina", "Carga"]).style(theme.muted()))
                .block(panel(tab.label(), theme, true));
            frame.render_widget(table, content);
        }
        CourseTab::Professors => {
            let rows = course.professors.iter().map(|p| {
                Row::new(vec![p.name.clone(), p.email.clone(), p.subjects.join(", ")])
            });
            let table = Table::new(
                rows,
                [Constraint::Percentage(30), Constraint::Percentage(30), Constraint::Percentage(40)],
            )
            .header(Row::new(vec!["Nome", "E-mail", "Disciplinas"]).style(header_style))
            .block(panel(tab.label(), theme, true));
            frame.render_widget(table, content);
        }
        CourseTab::Schedule => {
            let rows = course.schedule.iter().map(|item| {
                Row::new(vec![
                    item.day.label().to_string(),
                    item.time.clone(),
                    item.subject.clone(),
                    item.professor.clone(),
                    item.location.clone(),
                ])
            });
            let table = Table::new(
                rows,
                [
                    Constraint::Length(8),
                    Constraint::Length(14),
                    Constraint::Percentage(35),
                    Constraint::Percentage(30),
                    Constraint::Percentage(25),
                ],
            )
            .header(Row::new(vec!["Dia", "Horário", "Disciplina", "Professor", "Local"]).style(header_style))
            .block(panel(tab.label(), theme, true));
            frame.render_widget(table, content);
        }
        CourseTab::Materials => {
            let lines: Vec<Line> = course
                .materials
                .iter()
                .map(|m| {
                    Line::from(vec![
                        Span::styled("▸ ", Style::default().fg(theme.accent_primary)),
                        Span::raw(m.title.clone()),
                        Span::styled(format!("  {}", m.url), theme.faint()),
                    ])
                })
                .collect();
            frame.render_widget(
                Paragraph::new(lines)
                    .wrap(Wrap { trim: true })
                    .block(panel(tab.label(), theme, true)),
                content,
            );
        }
    }
}
