pub mod action;
pub mod command;
pub mod module;

pub use action::{Action, PromptKind};
pub use command::{parse_command, Command};
pub use module::Module;
