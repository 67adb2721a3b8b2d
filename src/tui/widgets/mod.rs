pub mod list;
pub mod text_input;
pub mod wrap;

pub use list::ListState;
pub use text_input::TextInputState;
pub use wrap::wrap_text;
