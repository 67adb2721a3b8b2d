use anyhow::Result;
use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::Rect;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::context::PortalContext;
use crate::models::Page;
use crate::tui::{App, Command, KeyBinding, Subscription, Theme};

/// Requests a page runtime leaves for the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Navigate(Page),
    Alert { title: String, body: String },
}

/// Object-safe face of [`Runtime`], so the shell can hold any page
pub trait AppRuntime {
    /// Returns `false` when the app asked to quit
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut PortalContext) -> Result<bool>;
    fn poll_timers(&mut self, now: Instant, ctx: &mut PortalContext) -> Result<bool>;
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &PortalContext, theme: &Theme);
    fn title(&self) -> &'static str;
    fn key_bindings(&self) -> Vec<(KeyBinding, String)>;
    fn take_effects(&mut self) -> Vec<Effect>;
    fn timer_count(&self) -> usize;
}

/// Drives one [`App`]: routes keys, fires timers, runs commands
///
/// Dropping the runtime drops its timers with it.
pub struct Runtime<A: App> {
    state: A::State,
    key_subscriptions: HashMap<KeyBinding, A::Msg>,
    key_hints: Vec<(KeyBinding, String)>,
    /// (interval, last_tick, msg)
    timers: Vec<(Duration, Instant, A::Msg)>,
    effects: Vec<Effect>,
}

impl<A: App> Runtime<A> {
    pub fn new(ctx: &mut PortalContext) -> Result<Self> {
        let (state, command) = A::init(ctx);
        let mut runtime = Self {
            state,
            key_subscriptions: HashMap::new(),
            key_hints: Vec::new(),
            timers: Vec::new(),
            effects: Vec::new(),
        };
        runtime.execute_command(command, ctx)?;
        runtime.update_subscriptions(ctx);
        Ok(runtime)
    }

    pub fn state(&self) -> &A::State {
        &self.state
    }

    /// Rebuild key and timer tables from the app's current subscriptions
    ///
    /// A timer whose interval was already registered keeps its last tick, so
    /// key presses do not postpone it.
    fn update_subscriptions(&mut self, ctx: &PortalContext) {
        let previous: Vec<(Duration, Instant)> = self
            .timers
            .drain(..)
            .map(|(interval, last_tick, _)| (interval, last_tick))
            .collect();
        self.key_subscriptions.clear();
        self.key_hints.clear();

        for sub in A::subscriptions(&self.state, ctx) {
            match sub {
                Subscription::Keyboard {
                    key,
                    msg,
                    description,
                } => {
                    self.key_hints.push((key, description));
                    self.key_subscriptions.insert(key, msg);
                }
                Subscription::Timer { interval, msg } => {
                    let last_tick = previous
                        .iter()
                        .find(|(i, _)| *i == interval)
                        .map(|(_, t)| *t)
                        .unwrap_or_else(Instant::now);
                    self.timers.push((interval, last_tick, msg));
                }
            }
        }
        log::trace!(
            "{} subscriptions: {} keys, {} timers",
            A::title(),
            self.key_subscriptions.len(),
            self.timers.len()
        );
    }

    fn dispatch(&mut self, msg: A::Msg, ctx: &mut PortalContext) -> Result<bool> {
        let command = A::update(&mut self.state, msg, ctx);
        let keep_running = self.execute_command(command, ctx)?;
        self.update_subscriptions(ctx);
        Ok(keep_running)
    }

    fn execute_command(&mut self, command: Command<A::Msg>, ctx: &mut PortalContext) -> Result<bool> {
        match command {
            Command::None => Ok(true),
            Command::Batch(commands) => {
                for command in commands {
                    if !self.execute_command(command, ctx)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Command::Message(msg) => {
                let command = A::update(&mut self.state, msg, ctx);
                self.execute_command(command, ctx)
            }
            Command::NavigateTo(page) => {
                self.effects.push(Effect::Navigate(page));
                Ok(true)
            }
            Command::Alert { title, body } => {
                self.effects.push(Effect::Alert { title, body });
                Ok(true)
            }
            Command::Quit => Ok(false),
        }
    }
}

impl<A: App> AppRuntime for Runtime<A> {
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut PortalContext) -> Result<bool> {
        if key.kind != KeyEventKind::Press {
            return Ok(true);
        }

        let binding = KeyBinding::from_event(&key);
        if let Some(msg) = self.key_subscriptions.get(&binding).cloned() {
            return self.dispatch(msg, ctx);
        }

        match A::on_key(&self.state, key) {
            Some(msg) => self.dispatch(msg, ctx),
            None => {
                log::trace!("{}: no handler for {:?}", A::title(), binding);
                Ok(true)
            }
        }
    }

    fn poll_timers(&mut self, now: Instant, ctx: &mut PortalContext) -> Result<bool> {
        let mut messages = Vec::new();
        for (interval, last_tick, msg) in &mut self.timers {
            if now.saturating_duration_since(*last_tick) >= *interval {
                messages.push(msg.clone());
                *last_tick = now;
            }
        }

        for msg in messages {
            if !self.dispatch(msg, ctx)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &PortalContext, theme: &Theme) {
        A::view(&mut self.state, ctx, theme, frame, area);
    }

    fn title(&self) -> &'static str {
        A::title()
    }

    fn key_bindings(&self) -> Vec<(KeyBinding, String)> {
        self.key_hints.clone()
    }

    fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    fn timer_count(&self) -> usize {
        self.timers.len()
    }
}
