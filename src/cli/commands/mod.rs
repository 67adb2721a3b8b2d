pub mod reset;
pub mod run;
pub mod status;

pub use reset::reset_command;
pub use run::run_command;
pub use status::status_command;
