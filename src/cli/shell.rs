use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    history::DefaultHistory,
    Cmd, Context as ReadlineContext, Editor, Helper, Highlighter, Hinter, KeyEvent, Validator,
};

use crate::cli::core::{CommandError, LoopControl};
use crate::cli::io::print_warning;
use crate::cli::output::info as output_info;
use crate::cli::shell_context::{CliMode, ShellContext};
use crate::errors::AppError;

/// Environment variable that switches the shell to reading commands from stdin.
pub const SCRIPT_ENV: &str = "SMARTCALC_CLI_SCRIPT";

pub fn run_cli() -> Result<(), AppError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), AppError> {
    let mut editor = Editor::<CommandCompleter, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandCompleter::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    let history_path = context.config_manager.history_path();
    if editor.load_history(&history_path).is_err() {
        tracing::debug!(path = %history_path.display(), "no shell history yet");
    }

    output_info("SmartCalc shell. Type `help` to list commands, `login <name>` or `guest` to begin.");

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line).ok();
                if execute(context, line) == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => match context.confirm_exit() {
                Ok(true) => break,
                Ok(false) => {}
                Err(err) => context.report_error(err),
            },
            Err(ReadlineError::Eof) => {
                output_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    if let Err(err) = editor.save_history(&history_path) {
        tracing::warn!(error = %err, "failed to save shell history");
    }
    Ok(())
}

/// Reads commands from stdin; blank lines and `#` comments are skipped.
fn run_script(context: &mut ShellContext) -> Result<(), AppError> {
    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if execute(context, line) == LoopControl::Exit || !context.running {
            break;
        }
    }
    Ok(())
}

/// Runs one line, reporting failures instead of propagating them.
fn execute(context: &mut ShellContext, line: &str) -> LoopControl {
    match handle_line(context, line) {
        Ok(control) => control,
        Err(err) => {
            context.report_error(err);
            LoopControl::Continue
        }
    }
}

/// Tokenises and dispatches one command line.
pub fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let tokens = match shell_words::split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            print_warning(format!("Could not parse `{}`: {err}", line.trim()));
            return Ok(LoopControl::Continue);
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };

    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.last_command = Some(line.trim().to_string());

    let control = context.dispatch(&raw.to_lowercase(), raw, &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

/// Completes the command word; arguments are left alone.
#[derive(Helper, Hinter, Highlighter, Validator)]
struct CommandCompleter {
    commands: Vec<String>,
}

impl CommandCompleter {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_ascii_lowercase).collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let head = &line[..pos];
        let start = head.len() - head.trim_start().len();
        let word = &head[start..];
        if word.contains(char::is_whitespace) {
            return (pos, Vec::new());
        }
        let needle = word.to_ascii_lowercase();
        let matches = self
            .commands
            .iter()
            .filter(|name| name.starts_with(&needle))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();
        (start, matches)
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(line, pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completer() -> CommandCompleter {
        CommandCompleter::new(vec!["entry", "export", "exit", "report", "Exit"])
    }

    fn names(pairs: &[Pair]) -> Vec<&str> {
        pairs.iter().map(|pair| pair.replacement.as_str()).collect()
    }

    #[test]
    fn completes_only_the_command_word() {
        let completer = completer();
        let (start, pairs) = completer.candidates("  ex", 4);
        assert_eq!(start, 2);
        assert_eq!(names(&pairs), vec!["exit", "export"]);

        let (_, pairs) = completer.candidates("export cs", 9);
        assert!(pairs.is_empty());

        let (start, pairs) = completer.candidates("", 0);
        assert_eq!(start, 0);
        assert_eq!(pairs.len(), 4);
    }

    #[test]
    fn quoted_arguments_stay_together() {
        let tokens = shell_words::split(r#"audit run "Ministry of Works" income=10"#).unwrap();
        assert_eq!(tokens, vec!["audit", "run", "Ministry of Works", "income=10"]);
    }
}
