pub mod args;
pub mod commands;
pub mod core;
pub mod help;
pub mod io;
pub mod outbox;
pub mod output;
pub mod registry;
pub mod shell;
pub mod shell_context;
pub mod system_clock;
pub mod table;

pub use shell::{handle_line, run_cli};
pub use shell_context::{CliMode, ShellContext};
