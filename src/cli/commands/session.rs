use smartcalc_core::{AuthService, ADMIN_USERNAME};

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "login",
            "Sign in and start a new session",
            "login <name> [password]",
            cmd_login,
        )
        .open(),
        CommandEntry::new("guest", "Start a session without signing in", "guest", cmd_guest)
            .open(),
        CommandEntry::new(
            "logout",
            "End the current session and discard its records",
            "logout",
            cmd_logout,
        ),
        CommandEntry::new("whoami", "Show the active session", "whoami", cmd_whoami),
    ]
}

fn cmd_login(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let username = args
        .first()
        .ok_or_else(|| CommandError::usage("login <name> [password]"))?;
    let contact = context.admin_contact();

    let mut password = args.get(1).map(|value| value.to_string());
    if password.is_none()
        && contact.password.is_some()
        && username.trim().eq_ignore_ascii_case(ADMIN_USERNAME)
        && context.can_prompt()
    {
        password = Some(io::prompt_password(&context.theme, "Admin password")?);
    }

    let owner = AuthService::sign_in(
        context.clock.as_ref(),
        &contact,
        context.notifier.as_ref(),
        username,
        password.as_deref(),
    )?;
    let session = context.start_session(owner);
    io::print_success(format!("Signed in as {}.", session.owner()));
    Ok(())
}

fn cmd_guest(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let session = context.start_session(AuthService::guest());
    io::print_success(format!("Continuing as {}.", session.owner()));
    io::print_hint("Records are kept for this session only; use `export json` to keep them.");
    Ok(())
}

fn cmd_logout(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let session = context.session.take().ok_or(CommandError::NotSignedIn)?;
    let entries = session.ledgers().entry_count();
    tracing::info!(owner = %session.owner(), entries, "signed out");
    io::print_success(format!(
        "Signed out {}. {} entr{} discarded.",
        session.owner(),
        entries,
        if entries == 1 { "y" } else { "ies" }
    ));
    Ok(())
}

fn cmd_whoami(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let session = context.session()?;
    output_section("Session");
    io::print_info(format!("  Owner     : {}", session.owner()));
    io::print_info(format!("  Session   : {}", session.id()));
    io::print_info(format!(
        "  Started   : {}",
        session.started_at().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    io::print_info(format!("  Currency  : {}", session.display_currency()));
    io::print_info(format!(
        "  Records   : {} entries, {} audits, {} feedback kept locally",
        session.ledgers().entry_count(),
        session.audits().len(),
        session.feedback().len()
    ));
    Ok(())
}
