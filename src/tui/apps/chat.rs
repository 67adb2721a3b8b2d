use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph, Tabs, Wrap};
use std::path::Path;

use super::panel;
use crate::chat::{FileSource, attach};
use crate::context::PortalContext;
use crate::error::PortalError;
use crate::models::{Attachment, ChatMessage, Presence, ThreadKey};
use crate::tui::state::ModalState;
use crate::tui::widgets::{ListState, TextInputState, wrap_text};
use crate::tui::{App, Command, Subscription, Theme};

pub struct ChatApp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatTab {
    #[default]
    Community,
    Support,
    Contacts,
}

impl ChatTab {
    const ALL: [ChatTab; 3] = [ChatTab::Community, ChatTab::Support, ChatTab::Contacts];

    pub fn label(&self) -> &'static str {
        match self {
            ChatTab::Community => "Chat da Turma",
            ChatTab::Support => "Suporte",
            ChatTab::Contacts => "Contatos",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

/// Path being typed into the attach prompt
#[derive(Debug, Clone, Default)]
pub struct AttachPrompt {
    pub path: String,
    input: TextInputState,
    pub error: Option<String>,
}

#[derive(Default)]
pub struct State {
    pub tab: ChatTab,
    pub draft: String,
    draft_input: TextInputState,
    /// Attachment waiting for the next send
    pub pending: Option<Attachment>,
    pub attach_prompt: ModalState<AttachPrompt>,
    roster: ListState,
    /// Contact whose thread is open in the Contatos tab
    pub open_contact: Option<String>,
}

impl State {
    /// Thread the input line writes to, if any
    pub fn active_thread(&self) -> Option<ThreadKey> {
        match self.tab {
            ChatTab::Community => Some(ThreadKey::Community),
            ChatTab::Support => Some(ThreadKey::Support),
            ChatTab::Contacts => self.open_contact.clone().map(ThreadKey::Contact),
        }
    }

    fn composing(&self) -> bool {
        self.active_thread().is_some()
    }
}

#[derive(Clone, Debug)]
pub enum Msg {
    NextTab,
    PrevTab,
    Send,
    DraftKey(KeyCode),
    OpenAttach,
    ClearAttachment,
    PromptKey(KeyCode),
    ConfirmAttach,
    CancelAttach,
    RosterUp,
    RosterDown,
    OpenContact,
    CloseContact,
}

fn select_tab(state: &mut State, tab: ChatTab) {
    state.tab = tab;
    state.open_contact = None;
}

fn send(state: &mut State, ctx: &mut PortalContext) -> Command<Msg> {
    let Some(key) = state.active_thread() else {
        return Command::None;
    };

    match ctx.send_message(key, &state.draft, state.pending.clone()) {
        Ok(message) => {
            log::debug!("Sent {}", message.id);
            state.draft.clear();
            state.draft_input.reset();
            state.pending = None;
            Command::None
        }
        Err(PortalError::EmptySubmission) => Command::None,
        Err(e) => Command::alert("Atenção", e.to_string()),
    }
}

fn confirm_attach(state: &mut State) {
    let Some(prompt) = state.attach_prompt.data_mut() else {
        return;
    };
    match FileSource::from_path(Path::new(prompt.path.trim())) {
        Ok(file) => {
            log::info!("Attached {} ({})", file.name, file.media_type);
            state.pending = Some(attach(&file));
            state.attach_prompt.close();
        }
        Err(e) => {
            log::warn!("{}", e);
            prompt.error = Some(e.to_string());
        }
    }
}

impl App for ChatApp {
    type State = State;
    type Msg = Msg;

    fn update(state: &mut State, msg: Msg, ctx: &mut PortalContext) -> Command<Msg> {
        let roster_len = ctx.catalog().classmates.len();
        match msg {
            Msg::NextTab => {
                let next = ChatTab::ALL[(state.tab.index() + 1) % ChatTab::ALL.len()];
                select_tab(state, next);
            }
            Msg::PrevTab => {
                let prev = ChatTab::ALL[(state.tab.index() + ChatTab::ALL.len() - 1) % ChatTab::ALL.len()];
                select_tab(state, prev);
            }
            Msg::Send => return send(state, ctx),
            Msg::DraftKey(code) => {
                if let Some(draft) = state.draft_input.handle_key(code, &state.draft, Some(1000)) {
                    state.draft = draft;
                }
            }
            Msg::OpenAttach => state.attach_prompt.open_with(AttachPrompt::default()),
            Msg::ClearAttachment => state.pending = None,
            Msg::PromptKey(code) => {
                if let Some(prompt) = state.attach_prompt.data_mut() {
                    if let Some(path) = prompt.input.handle_key(code, &prompt.path, None) {
                        prompt.path = path;
                        prompt.error = None;
                    }
                }
            }
            Msg::ConfirmAttach => confirm_attach(state),
            Msg::CancelAttach => state.attach_prompt.close(),
            Msg::RosterUp => state.roster.move_up(roster_len),
            Msg::RosterDown => state.roster.move_down(roster_len),
            Msg::OpenContact => {
                state.open_contact = state
                    .roster
                    .selected(roster_len)
                    .map(|i| ctx.catalog().classmates[i].id.clone());
            }
            Msg::CloseContact => state.open_contact = None,
        }
        Command::None
    }

    fn view(state: &mut State, ctx: &PortalContext, theme: &Theme, frame: &mut Frame, area: Rect) {
        let pending_height = if state.pending.is_some() { 1 } else { 0 };
        let [tabs_area, body, pending_area, input_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(pending_height),
            Constraint::Length(3),
        ])
        .areas(area);

        let titles: Vec<&str> = ChatTab::ALL.iter().map(ChatTab::label).collect();
        frame.render_widget(
            Tabs::new(titles)
                .select(state.tab.index())
                .style(theme.muted())
                .highlight_style(theme.selected()),
            tabs_area,
        );

        match state.active_thread() {
            Some(key) => render_thread(&key, ctx, theme, frame, body),
            None => render_roster(state, ctx, theme, frame, body.union(input_area)),
        }

        if state.active_thread().is_some() {
            if let Some(attachment) = &state.pending {
                frame.render_widget(
                    Paragraph::new(Line::from(vec![
                        Span::styled(" Anexo: ", theme.muted()),
                        Span::styled(attachment.name().to_string(), Style::default().fg(theme.accent_primary)),
                        Span::styled("  (Ctrl+X remove)", theme.faint()),
                    ])),
                    pending_area,
                );
            }

            let focused = !state.attach_prompt.is_open();
            let input = state
                .draft_input
                .line(&state.draft, "Digite sua mensagem...", focused, None, theme);
            frame.render_widget(
                Paragraph::new(input).block(panel("Mensagem · Enter envia · Ctrl+A anexa", theme, focused)),
                input_area,
            );
        }

        if let Some(prompt) = state.attach_prompt.data() {
            render_attach_prompt(prompt, theme, frame, area);
        }
    }

    fn subscriptions(state: &State, _ctx: &PortalContext) -> Vec<Subscription<Msg>> {
        if state.attach_prompt.is_open() {
            return vec![
                Subscription::keyboard(KeyCode::Enter, "Anexar", Msg::ConfirmAttach),
                Subscription::keyboard(KeyCode::Esc, "Cancelar", Msg::CancelAttach),
            ];
        }

        let mut subs = vec![
            Subscription::keyboard(KeyCode::Tab, "Próxima aba", Msg::NextTab),
            Subscription::keyboard(KeyCode::BackTab, "Aba anterior", Msg::PrevTab),
        ];
        if state.composing() {
            subs.extend([
                Subscription::keyboard(KeyCode::Enter, "Enviar", Msg::Send),
                Subscription::ctrl_key(KeyCode::Char('a'), "Anexar arquivo", Msg::OpenAttach),
            ]);
            if state.pending.is_some() {
                subs.push(Subscription::ctrl_key(KeyCode::Char('x'), "Remover anexo", Msg::ClearAttachment));
            }
            if state.open_contact.is_some() {
                subs.push(Subscription::keyboard(KeyCode::Esc, "Contatos", Msg::CloseContact));
            }
        } else {
            subs.extend([
                Subscription::keyboard(KeyCode::Up, "Acima", Msg::RosterUp),
                Subscription::keyboard(KeyCode::Down, "Abaixo", Msg::RosterDown),
                Subscription::keyboard(KeyCode::Enter, "Conversar", Msg::OpenContact),
            ]);
        }
        subs
    }

    fn title() -> &'static str {
        "Chat"
    }

    fn on_key(state: &State, key: KeyEvent) -> Option<Msg> {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        if state.attach_prompt.is_open() {
            Some(Msg::PromptKey(key.code))
        } else if state.composing() {
            Some(Msg::DraftKey(key.code))
        } else {
            None
        }
    }
}

/// Rows for one message, with its text wrapped to `width` cells
pub(crate) fn message_lines(
    message: &ChatMessage,
    own: bool,
    width: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let alignment = if own { Alignment::Right } else { Alignment::Left };
    let name = if own { "Você".to_string() } else { message.sender.name.clone() };
    let name_color = if own { theme.accent_primary } else { theme.accent_secondary };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("[{}] ", message.timestamp.format("%H:%M")), theme.faint()),
        Span::styled(name, Style::default().fg(name_color).add_modifier(Modifier::BOLD)),
    ])];

    if let Some(text) = &message.text {
        let style = Style::default().fg(theme.text_primary);
        lines.extend(
            wrap_text(text, width)
                .into_iter()
                .map(|row| Line::from(Span::styled(row, style))),
        );
    }

    if let Some(attachment) = &message.attachment {
        let size = attachment
            .size_label()
            .map(|s| format!(" ({})", s))
            .unwrap_or_default();
        let line = match attachment {
            Attachment::Image { name, .. } => Line::from(vec![
                Span::styled("[imagem] ", Style::default().fg(theme.accent_info)),
                Span::raw(name.clone()),
                Span::styled(size, theme.faint()),
            ]),
            Attachment::Document { name, source, .. } => Line::from(vec![
                Span::styled("[arquivo] ", Style::default().fg(theme.accent_warning)),
                Span::styled(name.clone(), Style::default().add_modifier(Modifier::UNDERLINED)),
                Span::styled(size, theme.faint()),
                Span::styled(format!("  {}", source), theme.faint()),
            ]),
        };
        lines.push(line);
    }

    lines.push(Line::raw(""));
    lines.into_iter().map(|l| l.alignment(alignment)).collect()
}

fn thread_title(key: &ThreadKey, ctx: &PortalContext) -> String {
    match key {
        ThreadKey::Community => {
            let course = ctx.current_user().map(|u| u.course.as_str()).unwrap_or("Turma");
            format!("Comunidade - {}", course)
        }
        ThreadKey::Support => "Suporte Acadêmico".to_string(),
        ThreadKey::Contact(id) => match ctx.catalog().classmate(id) {
            Some(contact) => format!("{} ({}) · Esc volta", contact.name, contact.presence.label()),
            None => id.clone(),
        },
    }
}

fn render_thread(key: &ThreadKey, ctx: &PortalContext, theme: &Theme, frame: &mut Frame, area: Rect) {
    let own_id = ctx.current_user().map(|u| u.id.as_str());
    let messages = ctx.chat.history(key);
    let block = panel(thread_title(key, ctx), theme, false);
    let inner = block.inner(area);

    let lines: Vec<Line> = if messages.is_empty() {
        vec![Line::from(Span::styled("Nenhuma mensagem ainda. Diga olá!", theme.faint()))]
    } else {
        messages
            .iter()
            .flat_map(|m| {
                message_lines(m, Some(m.sender.id.as_str()) == own_id, inner.width as usize, theme)
            })
            .collect()
    };

    // Rows are pre-wrapped, so the newest messages stay in view
    let scroll = lines.len().saturating_sub(inner.height as usize) as u16;
    frame.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), area);
}

fn render_roster(state: &State, ctx: &PortalContext, theme: &Theme, frame: &mut Frame, area: Rect) {
    let classmates = &ctx.catalog().classmates;
    let selected = state.roster.selected(classmates.len());

    let lines: Vec<Line> = classmates
        .iter()
        .enumerate()
        .map(|(i, contact)| {
            let dot = match contact.presence {
                Presence::Online => theme.accent_success,
                Presence::Busy => theme.accent_warning,
                Presence::Offline => theme.text_tertiary,
            };
            let name_style = if Some(i) == selected {
                theme.selected()
            } else {
                Style::default().fg(theme.text_primary)
            };
            Line::from(vec![
                Span::styled("● ", Style::default().fg(dot)),
                Span::styled(contact.name.clone(), name_style),
                Span::styled(format!("  {}", contact.presence.label()), theme.faint()),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(panel("Colegas de Turma", theme, true)),
        area,
    );
}

fn render_attach_prompt(prompt: &AttachPrompt, theme: &Theme, frame: &mut Frame, area: Rect) {
    let [column] = Layout::horizontal([Constraint::Percentage(70)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::vertical([Constraint::Length(6)])
        .flex(Flex::Center)
        .areas(column);

    let mut lines = vec![prompt.input.line(&prompt.path, "/caminho/para/arquivo", true, None, theme)];
    match &prompt.error {
        Some(error) => lines.push(Line::from(Span::styled(error.clone(), Style::default().fg(theme.accent_error)))),
        None => lines.push(Line::from(Span::styled("Enter anexa · Esc cancela", theme.faint()))),
    }

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .style(theme.base())
            .block(panel("Anexar arquivo", theme, true)),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::PortalConfig;
    use crate::models::AttachmentKind;
    use crate::storage::MemoryStorage;
    use crate::tui::runtime::{AppRuntime, Runtime};
    use std::sync::Arc;

    fn ctx() -> PortalContext {
        let mut ctx = PortalContext::new(
            Arc::new(MemoryStorage::new()),
            Arc::new(Catalog::load().unwrap()),
            PortalConfig::default(),
        );
        ctx.login(true).unwrap();
        ctx
    }

    fn press(runtime: &mut Runtime<ChatApp>, ctx: &mut PortalContext, code: KeyCode) {
        runtime.handle_key(KeyEvent::new(code, KeyModifiers::NONE), ctx).unwrap();
    }

    fn type_text(runtime: &mut Runtime<ChatApp>, ctx: &mut PortalContext, text: &str) {
        for c in text.chars() {
            press(runtime, ctx, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_enter_sends_and_clears_draft() {
        let mut ctx = ctx();
        let mut runtime = Runtime::<ChatApp>::new(&mut ctx).unwrap();

        type_text(&mut runtime, &mut ctx, "oi");
        press(&mut runtime, &mut ctx, KeyCode::Enter);

        let community = ctx.chat.history(&ThreadKey::Community);
        assert_eq!(community.len(), 4);
        assert_eq!(community[3].text.as_deref(), Some("oi"));
        assert!(runtime.state().draft.is_empty());
    }

    #[test]
    fn test_blank_draft_is_ignored() {
        let mut ctx = ctx();
        let mut runtime = Runtime::<ChatApp>::new(&mut ctx).unwrap();

        type_text(&mut runtime, &mut ctx, "   ");
        press(&mut runtime, &mut ctx, KeyCode::Enter);

        assert_eq!(ctx.chat.history(&ThreadKey::Community).len(), 3);
        assert!(runtime.take_effects().is_empty());
    }

    #[test]
    fn test_attach_prompt_then_send() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foto.png");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();

        let mut ctx = ctx();
        let mut runtime = Runtime::<ChatApp>::new(&mut ctx).unwrap();
        runtime
            .handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL), &mut ctx)
            .unwrap();
        assert!(runtime.state().attach_prompt.is_open());

        type_text(&mut runtime, &mut ctx, &path.display().to_string());
        press(&mut runtime, &mut ctx, KeyCode::Enter);
        assert!(!runtime.state().attach_prompt.is_open());
        assert_eq!(
            runtime.state().pending.as_ref().map(Attachment::kind),
            Some(AttachmentKind::Image)
        );

        press(&mut runtime, &mut ctx, KeyCode::Enter);
        let last = ctx.chat.history(&ThreadKey::Community).last().cloned().unwrap();
        assert!(last.text.is_none());
        assert_eq!(last.attachment.as_ref().map(Attachment::name), Some("foto.png"));
        assert!(runtime.state().pending.is_none());
    }

    #[test]
    fn test_bad_attach_path_keeps_prompt_open() {
        let mut ctx = ctx();
        let mut runtime = Runtime::<ChatApp>::new(&mut ctx).unwrap();
        runtime
            .handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL), &mut ctx)
            .unwrap();

        type_text(&mut runtime, &mut ctx, "/definitely/not/here.pdf");
        press(&mut runtime, &mut ctx, KeyCode::Enter);

        let prompt = runtime.state().attach_prompt.data().unwrap();
        assert!(prompt.error.is_some());
        assert!(runtime.state().pending.is_none());
    }

    #[test]
    fn test_contact_thread_is_created_on_first_send() {
        let mut ctx = ctx();
        let mut runtime = Runtime::<ChatApp>::new(&mut ctx).unwrap();

        press(&mut runtime, &mut ctx, KeyCode::Tab);
        press(&mut runtime, &mut ctx, KeyCode::Tab);
        assert_eq!(runtime.state().tab, ChatTab::Contacts);
        press(&mut runtime, &mut ctx, KeyCode::Down);
        press(&mut runtime, &mut ctx, KeyCode::Enter);
        assert_eq!(runtime.state().open_contact.as_deref(), Some("user-3"));

        type_text(&mut runtime, &mut ctx, "e aí");
        press(&mut runtime, &mut ctx, KeyCode::Enter);

        let key = ThreadKey::Contact("user-3".to_string());
        assert_eq!(ctx.chat.history(&key).len(), 1);

        press(&mut runtime, &mut ctx, KeyCode::Esc);
        assert!(runtime.state().open_contact.is_none());
    }

    #[test]
    fn test_message_lines_mark_attachment_kind() {
        let theme = Theme::new(Default::default());
        let ctx = ctx();
        let user = ctx.current_user().unwrap();
        let message = ChatMessage {
            id: "msg-1-0".to_string(),
            sender: user.as_sender(),
            text: None,
            attachment: Some(Attachment::Document {
                name: "plano.pdf".to_string(),
                source: "file:///tmp/plano.pdf".to_string(),
                size_label: Some("0.50 MB".to_string()),
            }),
            timestamp: chrono::Local::now(),
        };

        let lines = message_lines(&message, true, 60, &theme);
        let attachment: String = lines[1].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(attachment.starts_with("[arquivo] plano.pdf (0.50 MB)"));
        assert_eq!(lines[0].alignment, Some(Alignment::Right));
    }

    #[test]
    fn test_message_lines_wrap_long_text() {
        let theme = Theme::new(Default::default());
        let ctx = ctx();
        let user = ctx.current_user().unwrap();
        let text = format!("{}FIM", "palavra ".repeat(25));
        let message = ChatMessage {
            id: "msg-1-0".to_string(),
            sender: user.as_sender(),
            text: Some(text),
            attachment: None,
            timestamp: chrono::Local::now(),
        };

        let lines = message_lines(&message, false, 40, &theme);
        let rows: Vec<String> = lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        // header, wrapped text rows, blank separator
        assert!(rows.len() > 3);
        assert!(rows.iter().all(|row| row.chars().count() <= 40));
        assert!(rows[rows.len() - 2].ends_with("FIM"));
    }
}
