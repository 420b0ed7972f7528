pub mod audit;
pub mod config;
pub mod currency;
pub mod entry;
pub mod export;
pub mod feedback;
pub mod networth;
pub mod report;
pub mod session;
pub mod system;

use crate::cli::registry::{CommandEntry, CommandRegistry};

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(session::definitions());
    commands.extend(entry::definitions());
    commands.extend(report::definitions());
    commands.extend(networth::definitions());
    commands.extend(audit::definitions());
    commands.extend(currency::definitions());
    commands.extend(feedback::definitions());
    commands.extend(export::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in all_definitions() {
        registry.register(entry);
    }
}
