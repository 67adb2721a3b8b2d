pub mod state;
pub mod widgets;
pub mod command;
pub mod subscription;
pub mod app;
pub mod runtime;
pub mod shell;
pub mod apps;

pub use state::{ModalState, Theme};
pub use command::Command;
pub use subscription::{KeyBinding, Subscription};
pub use app::App;
pub use runtime::{AppRuntime, Effect, Runtime};
pub use shell::{Alert, PortalShell};
