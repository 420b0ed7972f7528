use smartcalc_config::SETTABLE_KEYS;

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

const USAGE: &str = "config [show|set <key> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences and scoring settings",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show_config(context);
        return Ok(());
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    SETTABLE_KEYS.join("|")
                )));
            }
            let key = args[1];
            let value = args[2..].join(" ");
            context.update_setting(key, value.trim())?;
            io::print_success(format!("{key} updated."));
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{other}`; {USAGE}"
        ))),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    output_section("Configuration");
    io::print_info(format!("  File            : {}", context.config_manager.config_path().display()));
    io::print_info(format!("  locale          : {}", config.locale));
    io::print_info(format!("  currency        : {}", config.currency));
    io::print_info(format!("  ui_color_enabled: {}", config.ui_color_enabled));
    io::print_info(format!(
        "  admin_email     : {}",
        config.admin_email.as_deref().unwrap_or("(not set)")
    ));
    io::print_info(format!(
        "  admin password  : {}",
        if config.admin_password.is_some() {
            "configured"
        } else {
            "(not set)"
        }
    ));
    io::print_info(format!("  recent_limit    : {}", config.recent_limit));
    io::print_info(format!(
        "  audit           : moderate > {}, high > {}",
        config.audit.moderate, config.audit.high
    ));
    io::print_info(format!(
        "  net_worth       : {} .. {} (building below {})",
        config.net_worth.lower, config.net_worth.upper, config.net_worth.building_threshold
    ));
    io::print_info(format!(
        "  export_root     : {}",
        config.resolve_export_root().display()
    ));
    if !config.rates.is_empty() {
        let rates: Vec<String> = config
            .rates
            .iter()
            .map(|(code, rate)| format!("{code}={rate}"))
            .collect();
        io::print_info(format!("  rates           : {}", rates.join(", ")));
    }
}
