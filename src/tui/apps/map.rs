use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::panel;
use crate::context::PortalContext;
use crate::tui::{App, Command, Subscription, Theme};

pub struct MapApp;

#[derive(Default)]
pub struct State;

/// The map page is read-only
#[derive(Clone, Debug)]
pub enum Msg {}

impl App for MapApp {
    type State = State;
    type Msg = Msg;

    fn update(_state: &mut State, msg: Msg, _ctx: &mut PortalContext) -> Command<Msg> {
        match msg {}
    }

    fn view(_state: &mut State, ctx: &PortalContext, theme: &Theme, frame: &mut Frame, area: Rect) {
        let campus = &ctx.catalog().campus;
        let [address_area, poi_area] =
            Layout::vertical([Constraint::Length(6), Constraint::Min(4)]).areas(area);

        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(campus.address.clone(), Style::default().add_modifier(Modifier::BOLD))),
                Line::raw(""),
                Line::from(vec![
                    Span::styled("Abrir no Google Maps: ", theme.muted()),
                    Span::styled(
                        campus.map_search_url(),
                        Style::default()
                            .fg(theme.accent_primary)
                            .add_modifier(Modifier::UNDERLINED),
                    ),
                ]),
            ])
            .wrap(Wrap { trim: true })
            .block(panel("Mapa do Campus", theme, false)),
            address_area,
        );

        let lines: Vec<Line> = campus
            .points_of_interest
            .iter()
            .flat_map(|poi| {
                [
                    Line::from(vec![
                        Span::styled("⌖ ", Style::default().fg(theme.accent_secondary)),
                        Span::styled(poi.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    ]),
                    Line::from(Span::styled(format!("  {}", poi.description), theme.muted())),
                ]
            })
            .collect();
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(panel("Pontos de Interesse", theme, false)),
            poi_area,
        );
    }

    fn subscriptions(_state: &State, _ctx: &PortalContext) -> Vec<Subscription<Msg>> {
        Vec::new()
    }

    fn title() -> &'static str {
        "Mapa"
    }
}
