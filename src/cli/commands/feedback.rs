use smartcalc_core::{FeedbackOutcome, FeedbackService};

use crate::cli::args::split_pair;
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

const USAGE: &str = "feedback <message...> [name=<name>] [email=<address>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "feedback",
        "Send feedback to the administrator",
        USAGE,
        cmd_feedback,
    )]
}

fn cmd_feedback(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut name = None;
    let mut email = None;
    let mut words = Vec::new();
    for token in args {
        match split_pair(token) {
            Some(("name", value)) => name = Some(value.to_string()),
            Some(("email", value)) => email = Some(value.to_string()),
            _ => words.push(*token),
        }
    }
    let mut message = words.join(" ");

    if message.trim().is_empty() {
        if !context.can_prompt() {
            return Err(CommandError::usage(USAGE));
        }
        if name.is_none() {
            name = Some(io::prompt_text(&context.theme, "Your name (optional)")?);
        }
        if email.is_none() {
            email = Some(io::prompt_text(&context.theme, "Your email (optional)")?);
        }
        message = io::prompt_text(&context.theme, "Message")?;
    }

    let blank_to_none = |value: Option<String>| value.filter(|text| !text.trim().is_empty());
    let name = blank_to_none(name);
    let email = blank_to_none(email);

    let feedback = FeedbackService::compose(
        context.clock.as_ref(),
        name.as_deref(),
        email.as_deref(),
        &message,
    )?;
    let contact = context.admin_contact();
    let outcome = FeedbackService::deliver(&contact, context.notifier.as_ref(), &feedback);

    match outcome {
        FeedbackOutcome::Delivered => io::print_success(format!("Feedback {outcome}.")),
        FeedbackOutcome::SavedLocally => {
            context.session_mut()?.keep_feedback(feedback);
            io::print_warning(format!("Feedback {outcome}."));
            io::print_hint("It is included in `export json` snapshots.");
        }
    }
    Ok(())
}
