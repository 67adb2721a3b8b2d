use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::context::PortalContext;
use crate::tui::{Command, Subscription, Theme};

/// A page of the portal, in Elm style
///
/// - State: the page's own transient UI state
/// - Msg: everything that can happen to it
/// - update: applies a message, possibly mutating the shared context
/// - view: draws state and context into `area`
/// - subscriptions: keys and timers the page wants right now
pub trait App: Sized + 'static {
    type State: Default;

    type Msg: Clone + 'static;

    fn update(state: &mut Self::State, msg: Self::Msg, ctx: &mut PortalContext) -> Command<Self::Msg>;

    /// Takes `&mut` so views can clamp selections to the data they draw
    fn view(
        state: &mut Self::State,
        ctx: &PortalContext,
        theme: &Theme,
        frame: &mut Frame,
        area: Rect,
    );

    fn subscriptions(state: &Self::State, ctx: &PortalContext) -> Vec<Subscription<Self::Msg>>;

    fn title() -> &'static str;

    /// Keys no subscription claimed, typically text entry
    fn on_key(_state: &Self::State, _key: KeyEvent) -> Option<Self::Msg> {
        None
    }

    fn init(_ctx: &PortalContext) -> (Self::State, Command<Self::Msg>) {
        (Self::State::default(), Command::None)
    }
}
