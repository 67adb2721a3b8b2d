use crossterm::event::KeyCode;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use std::collections::HashSet;

use super::panel;
use crate::context::PortalContext;
use crate::tui::widgets::ListState;
use crate::tui::{App, Command, Subscription, Theme};

pub struct GuideApp;

#[derive(Default)]
pub struct State {
    faq: ListState,
    /// Indices of FAQ entries currently expanded
    pub expanded: HashSet<usize>,
}

#[derive(Clone, Debug)]
pub enum Msg {
    Up,
    Down,
    Toggle,
}

impl App for GuideApp {
    type State = State;
    type Msg = Msg;

    fn update(state: &mut State, msg: Msg, ctx: &mut PortalContext) -> Command<Msg> {
        let count = ctx.catalog().faqs.len();
        match msg {
            Msg::Up => state.faq.move_up(count),
            Msg::Down => state.faq.move_down(count),
            Msg::Toggle => {
                if let Some(i) = state.faq.selected(count) {
                    if !state.expanded.remove(&i) {
                        state.expanded.insert(i);
                    }
                }
            }
        }
        Command::None
    }

    fn view(state: &mut State, ctx: &PortalContext, theme: &Theme, frame: &mut Frame, area: Rect) {
        let catalog = ctx.catalog();
        let video_height = (catalog.videos.len() as u16 * 2).saturating_add(2);
        let [videos_area, faq_area] =
            Layout::vertical([Constraint::Length(video_height), Constraint::Min(4)]).areas(area);

        let videos: Vec<Line> = catalog
            .videos
            .iter()
            .flat_map(|video| {
                [
                    Line::from(vec![
                        Span::styled("▶ ", Style::default().fg(theme.accent_error)),
                        Span::styled(video.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    ]),
                    Line::from(Span::styled(format!("  {}", video.video_url), theme.faint())),
                ]
            })
            .collect();
        frame.render_widget(
            Paragraph::new(videos).block(panel("Vídeos Tutoriais", theme, false)),
            videos_area,
        );

        let selected = state.faq.selected(catalog.faqs.len());
        let mut lines = Vec::new();
        for (i, item) in catalog.faqs.iter().enumerate() {
            let open = state.expanded.contains(&i);
            let marker = if open { "▾ " } else { "▸ " };
            let style = if Some(i) == selected {
                theme.selected()
            } else {
                Style::default().fg(theme.text_primary).add_modifier(Modifier::BOLD)
            };
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.accent_primary)),
                Span::styled(item.question.clone(), style),
            ]));
            if open {
                lines.push(Line::from(Span::styled(format!("  {}", item.answer), theme.muted())));
            }
        }
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(panel("Perguntas Frequentes (FAQ)", theme, true)),
            faq_area,
        );
    }

    fn subscriptions(_state: &State, _ctx: &PortalContext) -> Vec<Subscription<Msg>> {
        vec![
            Subscription::keyboard(KeyCode::Up, "Acima", Msg::Up),
            Subscription::keyboard(KeyCode::Down, "Abaixo", Msg::Down),
            Subscription::keyboard(KeyCode::Enter, "Expandir", Msg::Toggle),
        ]
    }

    fn title() -> &'static str {
        "Tutoriais"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::PortalConfig;
    use crate::storage::MemoryStorage;
    use std::sync::Arc;

    #[test]
    fn test_enter_toggles_selected_item() {
        let mut ctx = PortalContext::new(
            Arc::new(MemoryStorage::new()),
            Arc::new(Catalog::load().unwrap()),
            PortalConfig::default(),
        );
        let mut state = State::default();

        GuideApp::update(&mut state, Msg::Down, &mut ctx);
        GuideApp::update(&mut state, Msg::Toggle, &mut ctx);
        assert!(state.expanded.contains(&1));

        GuideApp::update(&mut state, Msg::Up, &mut ctx);
        GuideApp::update(&mut state, Msg::Toggle, &mut ctx);
        assert_eq!(state.expanded.len(), 2);

        GuideApp::update(&mut state, Msg::Toggle, &mut ctx);
        assert!(!state.expanded.contains(&0));
        assert!(state.expanded.contains(&1));
    }
}
