//! One app per page, plus the login screen

use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Padding};

use crate::tui::Theme;

pub mod calendar;
pub mod chat;
pub mod courses;
pub mod guide;
pub mod home;
pub mod login;
pub mod map;
pub mod profile;

pub use calendar::CalendarApp;
pub use chat::ChatApp;
pub use courses::CoursesApp;
pub use guide::GuideApp;
pub use home::HomeApp;
pub use login::LoginApp;
pub use map::MapApp;
pub use profile::ProfileApp;

/// Rounded bordered panel with a bold title
pub(crate) fn panel<'a>(title: impl Into<String>, theme: &Theme, focused: bool) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border(focused))
        .title(Span::styled(format!(" {} ", title.into()), theme.heading()))
        .padding(Padding::horizontal(1))
}
