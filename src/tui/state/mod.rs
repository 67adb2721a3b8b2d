pub mod modal;
pub mod theme;

pub use modal::ModalState;
pub use theme::Theme;
