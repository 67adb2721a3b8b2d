use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use std::time::Instant;

use crate::context::PortalContext;
use crate::models::Page;
use crate::tui::apps::{
    CalendarApp, ChatApp, CoursesApp, GuideApp, HomeApp, LoginApp, MapApp, ProfileApp, panel,
};
use crate::tui::runtime::{AppRuntime, Effect, Runtime};
use crate::tui::state::ModalState;
use crate::tui::widgets::ListState;
use crate::tui::{KeyBinding, Theme};

const SIDEBAR_WIDTH: u16 = 22;

/// Blocking notice, dismissed with Enter or Esc
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SidebarEntry {
    Page(Page),
    Logout,
}

impl SidebarEntry {
    fn all() -> Vec<SidebarEntry> {
        Page::SIDEBAR
            .iter()
            .copied()
            .chain([Page::Profile])
            .map(SidebarEntry::Page)
            .chain([SidebarEntry::Logout])
            .collect()
    }

    fn label(&self) -> String {
        match self {
            SidebarEntry::Page(page) => format!("{} {}", page.icon(), page.label()),
            SidebarEntry::Logout => "⏻ Sair".to_string(),
        }
    }
}

enum Screen {
    Login(Box<dyn AppRuntime>),
    Page {
        page: Page,
        runtime: Box<dyn AppRuntime>,
    },
}

impl Screen {
    fn runtime(&mut self) -> &mut dyn AppRuntime {
        match self {
            Screen::Login(runtime) | Screen::Page { runtime, .. } => runtime.as_mut(),
        }
    }

    fn runtime_ref(&self) -> &dyn AppRuntime {
        match self {
            Screen::Login(runtime) | Screen::Page { runtime, .. } => runtime.as_ref(),
        }
    }
}

/// Owns the context and the one live page runtime
///
/// The login screen shows while nobody is signed in. Once signed in, the
/// page selected in the navigation state gets a fresh runtime; switching
/// pages drops the previous runtime along with its timers.
pub struct PortalShell {
    ctx: PortalContext,
    screen: Screen,

    tutorial: ModalState<()>,
    alert: ModalState<Alert>,
    help_open: bool,
    help_scroll: u16,
    sidebar: ListState,
    should_quit: bool,
}

fn runtime_for(page: Page, ctx: &mut PortalContext) -> Result<Box<dyn AppRuntime>> {
    Ok(match page {
        Page::Home | Page::Admin => Box::new(Runtime::<HomeApp>::new(ctx)?),
        Page::Courses => Box::new(Runtime::<CoursesApp>::new(ctx)?),
        Page::Calendar => Box::new(Runtime::<CalendarApp>::new(ctx)?),
        Page::Chat => Box::new(Runtime::<ChatApp>::new(ctx)?),
        Page::Guide => Box::new(Runtime::<GuideApp>::new(ctx)?),
        Page::Map => Box::new(Runtime::<MapApp>::new(ctx)?),
        Page::Profile => Box::new(Runtime::<ProfileApp>::new(ctx)?),
    })
}

fn page_screen(page: Page, ctx: &mut PortalContext) -> Result<Screen> {
    log::debug!("Opening page {}", page);
    Ok(Screen::Page {
        page,
        runtime: runtime_for(page, ctx)?,
    })
}

fn login_screen(ctx: &mut PortalContext) -> Result<Screen> {
    Ok(Screen::Login(Box::new(Runtime::<LoginApp>::new(ctx)?)))
}

/// `width` x `height` rect centered in `area`, clamped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = area.width.min(width);
    let height = area.height.min(height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl PortalShell {
    pub fn new(mut ctx: PortalContext) -> Result<Self> {
        let screen = if ctx.current_user().is_some() {
            page_screen(ctx.navigation.current(), &mut ctx)?
        } else {
            login_screen(&mut ctx)?
        };

        Ok(Self {
            ctx,
            screen,
            tutorial: ModalState::default(),
            alert: ModalState::default(),
            help_open: false,
            help_scroll: 0,
            sidebar: ListState::default(),
            should_quit: false,
        })
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Page being shown, `None` on the login screen
    pub fn active_page(&self) -> Option<Page> {
        match &self.screen {
            Screen::Login(_) => None,
            Screen::Page { page, .. } => Some(*page),
        }
    }

    /// Timers held by the live runtime
    pub fn active_timer_count(&self) -> usize {
        self.screen.runtime_ref().timer_count()
    }

    pub fn is_tutorial_open(&self) -> bool {
        self.tutorial.is_open()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.data()
    }

    pub fn context(&self) -> &PortalContext {
        &self.ctx
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if KeyBinding::ctrl(KeyCode::Char('q')).matches(&key) {
            self.should_quit = true;
            return Ok(());
        }

        // Overlays swallow every other key
        if self.alert.is_open() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.alert.close();
            }
            return Ok(());
        }
        if self.tutorial.is_open() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.ctx.tutorial.acknowledge();
                self.tutorial.close();
            }
            return Ok(());
        }
        if self.help_open {
            match key.code {
                KeyCode::F(1) | KeyCode::Esc => self.help_open = false,
                KeyCode::Up => self.help_scroll = self.help_scroll.saturating_sub(1),
                KeyCode::Down => self.help_scroll = self.help_scroll.saturating_add(1),
                _ => {}
            }
            return Ok(());
        }
        if key.code == KeyCode::F(1) {
            self.help_open = true;
            self.help_scroll = 0;
            return Ok(());
        }

        if matches!(self.screen, Screen::Page { .. }) && self.handle_global_key(&key) {
            return self.sync_screen();
        }

        if !self.screen.runtime().handle_key(key, &mut self.ctx)? {
            self.should_quit = true;
        }
        self.process_effects();
        self.sync_screen()
    }

    /// Sidebar and page shortcuts; `true` when the key was consumed
    fn handle_global_key(&mut self, key: &KeyEvent) -> bool {
        if KeyBinding::ctrl(KeyCode::Char('b')).matches(key) {
            self.ctx.navigation.toggle_sidebar();
            return true;
        }

        if self.ctx.navigation.is_sidebar_open() {
            let entries = SidebarEntry::all();
            match key.code {
                KeyCode::Up => self.sidebar.move_up(entries.len()),
                KeyCode::Down => self.sidebar.move_down(entries.len()),
                KeyCode::Esc => self.ctx.navigation.close_sidebar(),
                KeyCode::Enter => match self.sidebar.selected(entries.len()).map(|i| entries[i]) {
                    Some(SidebarEntry::Page(page)) => self.ctx.navigate(page),
                    Some(SidebarEntry::Logout) => self.ctx.logout(),
                    None => {}
                },
                _ => {}
            }
            return true;
        }

        if key.modifiers.contains(KeyModifiers::ALT) {
            if let KeyCode::Char(digit) = key.code {
                if let Some(page) = Page::from_shortcut(digit) {
                    self.ctx.navigate(page);
                    return true;
                }
            }
        }
        false
    }

    /// Fire due timers of the live runtime
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        if !self.screen.runtime().poll_timers(now, &mut self.ctx)? {
            self.should_quit = true;
        }
        self.process_effects();
        self.sync_screen()
    }

    fn process_effects(&mut self) {
        for effect in self.screen.runtime().take_effects() {
            match effect {
                Effect::Navigate(page) => self.ctx.navigate(page),
                Effect::Alert { title, body } => self.alert.open_with(Alert { title, body }),
            }
        }
    }

    /// Make the live runtime match the session and navigation state
    fn sync_screen(&mut self) -> Result<()> {
        let signed_in = self.ctx.current_user().is_some();
        let current = self.ctx.navigation.current();

        match &self.screen {
            Screen::Login(_) if signed_in => {
                log::info!("Signed in, opening {}", current);
                self.screen = page_screen(current, &mut self.ctx)?;
                self.sidebar.select(0);
                if self.ctx.tutorial.should_show() {
                    self.tutorial.open_empty();
                }
            }
            Screen::Page { .. } if !signed_in => {
                log::info!("Signed out, back to login");
                self.tutorial.close();
                self.screen = login_screen(&mut self.ctx)?;
            }
            Screen::Page { page, .. } if *page != current => {
                log::debug!("Leaving page {}", page);
                self.screen = page_screen(current, &mut self.ctx)?;
            }
            _ => {}
        }
        Ok(())
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let theme = Theme::new(self.ctx.theme.current());
        let area = frame.area();
        frame.render_widget(Block::default().style(theme.base()), area);

        let [main, footer] = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

        match &mut self.screen {
            Screen::Login(runtime) => runtime.render(frame, main, &self.ctx, &theme),
            Screen::Page { page, runtime } => {
                let [header, body] =
                    Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(main);
                let [sidebar, content] =
                    Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
                        .areas(body);

                render_header(*page, &self.ctx, &theme, frame, header);
                render_sidebar(*page, &self.sidebar, &self.ctx, &theme, frame, sidebar);
                runtime.render(frame, content, &self.ctx, &theme);
            }
        }

        self.render_footer(&theme, frame, footer);

        if self.help_open {
            self.render_help(&theme, frame, area);
        }
        if self.tutorial.is_open() {
            render_tutorial(&theme, frame, area);
        }
        if let Some(alert) = self.alert.data() {
            render_alert(alert, &theme, frame, area);
        }
    }

    fn global_bindings(&self) -> Vec<(String, &'static str)> {
        let mut bindings = vec![
            ("F1".to_string(), "Ajuda"),
            (KeyBinding::ctrl(KeyCode::Char('q')).to_string(), "Sair do app"),
        ];
        if matches!(self.screen, Screen::Page { .. }) {
            bindings.push((KeyBinding::ctrl(KeyCode::Char('b')).to_string(), "Menu"));
            bindings.push(("Alt+1..7".to_string(), "Ir para página"));
        }
        bindings
    }

    fn render_footer(&self, theme: &Theme, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        let page_bindings = self
            .screen
            .runtime_ref()
            .key_bindings()
            .into_iter()
            .map(|(key, description)| (key.to_string(), description));
        let global = self
            .global_bindings()
            .into_iter()
            .map(|(key, description)| (key, description.to_string()));

        for (key, description) in page_bindings.chain(global) {
            spans.push(Span::styled(format!(" {} ", key), Style::default().fg(theme.accent_primary)));
            spans.push(Span::styled(format!("{} ", description), theme.faint()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_help(&self, theme: &Theme, frame: &mut Frame, area: Rect) {
        let runtime = self.screen.runtime_ref();
        let key_style = Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD);

        let mut lines = vec![Line::from(Span::styled("Atalhos globais", theme.heading()))];
        for (key, description) in self.global_bindings() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<14}", key), key_style),
                Span::raw(description),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(runtime.title(), theme.heading())));
        for (key, description) in runtime.key_bindings() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<14}", key.to_string()), key_style),
                Span::raw(description),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("Esc fecha · ↑↓ rola", theme.faint())));

        let popup = centered(area, 60, 20);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .style(theme.base())
                .scroll((self.help_scroll, 0))
                .block(panel("Ajuda", theme, true)),
            popup,
        );
    }
}

fn render_header(page: Page, ctx: &PortalContext, theme: &Theme, frame: &mut Frame, area: Rect) {
    let user = ctx
        .current_user()
        .map(|u| format!("{} · {}", u.name, u.role))
        .unwrap_or_default();

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.border(false));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [left, right] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(40)]).areas(inner);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" UNEX ", theme.selected()),
            Span::raw(" "),
            Span::styled(page.label(), theme.heading()),
        ])),
        left,
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(user, theme.muted()))).alignment(Alignment::Right),
        right,
    );
}

fn render_sidebar(
    current: Page,
    cursor: &ListState,
    ctx: &PortalContext,
    theme: &Theme,
    frame: &mut Frame,
    area: Rect,
) {
    let open = ctx.navigation.is_sidebar_open();
    let entries = SidebarEntry::all();
    let selected = cursor.selected(entries.len());

    let lines: Vec<Line> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if open && Some(i) == selected {
                theme.selected()
            } else if *entry == SidebarEntry::Page(current) {
                Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
            } else if *entry == SidebarEntry::Logout {
                Style::default().fg(theme.accent_error)
            } else {
                Style::default().fg(theme.text_secondary)
            };
            Line::from(Span::styled(entry.label(), style))
        })
        .collect();

    let title = if open { "Menu" } else { "Menu (Ctrl+B)" };
    frame.render_widget(Paragraph::new(lines).block(panel(title, theme, open)), area);
}

fn render_tutorial(theme: &Theme, frame: &mut Frame, area: Rect) {
    let step = |n: u32, title: &'static str, body: &'static str| {
        Line::from(vec![
            Span::styled(format!(" {} ", n), theme.selected()),
            Span::styled(format!(" {}: ", title), Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD)),
            Span::styled(body, theme.muted()),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("Bem-vindo(a) à UNEX!", theme.heading())).alignment(Alignment::Center),
        Line::from(Span::styled(
            "Preparamos um guia rápido para você navegar pelo app.",
            theme.muted(),
        ))
        .alignment(Alignment::Center),
        Line::raw(""),
        step(1, "Navegação Principal", "use o menu (Ctrl+B) para acessar todas as seções."),
        step(2, "Cabeçalho", "veja seu perfil aqui."),
        step(3, "Conteúdo", "as informações de cada página aparecem aqui."),
        Line::raw(""),
        Line::from(Span::styled("[ Vamos Começar! ]", theme.selected())).alignment(Alignment::Center),
    ];

    let popup = centered(area, 64, 14);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .style(theme.base())
            .block(panel("Guia rápido", theme, true)),
        popup,
    );
}

fn render_alert(alert: &Alert, theme: &Theme, frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(alert.body.clone(), Style::default().fg(theme.text_primary))),
        Line::raw(""),
        Line::from(Span::styled("Enter para fechar", theme.faint())).alignment(Alignment::Center),
    ];

    let popup = centered(area, 56, 7);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .style(theme.base())
            .block(
                panel(alert.title.clone(), theme, true)
                    .border_style(Style::default().fg(theme.accent_warning)),
            ),
        popup,
    );
}
