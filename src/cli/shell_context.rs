//! Shared runtime state for CLI interactions and command execution.

use dialoguer::theme::ColorfulTheme;
use smartcalc_config::{Config, ConfigManager};
use smartcalc_core::{
    currency::default_rates, AdminContact, Clock, CurrencyCode, Notifier, RateTable, Session,
};
use smartcalc_domain::Owner;
use smartcalc_export::FileExporter;
use strsim::levenshtein;

use crate::cli::{
    commands,
    core::{CommandError, CommandResult, LoopControl},
    io as cli_io,
    outbox::OutboxNotifier,
    output::{self, OutputPreferences},
    registry::CommandRegistry,
    system_clock::SystemClock,
};
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub clock: Box<dyn Clock>,
    pub notifier: Box<dyn Notifier>,
    pub rates: RateTable,
    pub session: Option<Session>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, AppError> {
        let config_manager = ConfigManager::from_env()?;
        let notifier = Box::new(OutboxNotifier::new(config_manager.outbox_path()));
        let mut context = Self::with_parts(mode, config_manager, Box::new(SystemClock), notifier)?;
        context.config.apply_env();
        context.apply_output_preferences();
        tracing::info!(mode = ?mode, home = %context.config_manager.base_dir().display(), "shell ready");
        Ok(context)
    }

    /// Builds a context around explicit collaborators. Config is loaded from `config_manager`.
    pub fn with_parts(
        mode: CliMode,
        config_manager: ConfigManager,
        clock: Box<dyn Clock>,
        notifier: Box<dyn Notifier>,
    ) -> Result<Self, AppError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        let config = config_manager.load()?;
        let rates = rate_table(&config);

        Ok(ShellContext {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            clock,
            notifier,
            rates,
            session: None,
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn apply_output_preferences(&self) {
        let color_enabled = self.config.ui_color_enabled
            && self.mode == CliMode::Interactive
            && std::env::var_os("NO_COLOR").is_none();
        output::set_preferences(OutputPreferences { color_enabled });
    }

    pub fn prompt(&self) -> String {
        match &self.session {
            Some(session) => format!("smartcalc[{}]> ", session.owner()),
            None => "smartcalc> ".to_string(),
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some((handler, open)) = self
            .registry
            .get(command)
            .map(|entry| (entry.handler, entry.open))
        else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        if !open && self.session.is_none() {
            return Err(CommandError::NotSignedIn);
        }
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_ascii_lowercase();
        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::NotSignedIn => {
                cli_io::print_error("No active session.");
                cli_io::print_hint("Try `login <name>` or `guest` to get started.");
            }
            other => {
                tracing::debug!(error = %other, command = ?self.last_command, "command failed");
                cli_io::print_error(other);
            }
        }
    }

    /// Interactive prompts are only offered when a person is at the keyboard.
    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub fn session(&self) -> Result<&Session, CommandError> {
        self.session.as_ref().ok_or(CommandError::NotSignedIn)
    }

    pub fn session_mut(&mut self) -> Result<&mut Session, CommandError> {
        self.session.as_mut().ok_or(CommandError::NotSignedIn)
    }

    /// Replaces any active session with a fresh one for `owner`.
    pub(crate) fn start_session(&mut self, owner: Owner) -> &Session {
        if let Some(previous) = self.session.take() {
            tracing::info!(owner = %previous.owner(), "previous session closed");
        }
        let currency = self.display_currency();
        self.session.insert(Session::new(owner, self.clock.as_ref(), currency))
    }

    pub(crate) fn display_currency(&self) -> CurrencyCode {
        CurrencyCode::new(self.config.currency.as_str())
    }

    pub(crate) fn admin_contact(&self) -> AdminContact {
        AdminContact::new(
            self.config.admin_email.clone(),
            self.config.admin_password.clone(),
        )
    }

    pub(crate) fn exporter(&self) -> FileExporter {
        FileExporter::new(self.config.resolve_export_root())
    }

    /// Applies one setting to the live config and to the file on disk.
    ///
    /// The stored file is edited separately so environment overrides never get persisted.
    pub(crate) fn update_setting(&mut self, key: &str, value: &str) -> CommandResult {
        let mut live = self.config.clone();
        live.set_value(key, value)?;
        let mut stored = self.config_manager.load()?;
        stored.set_value(key, value)?;
        self.config_manager.save(&stored)?;

        self.config = live;
        self.rates = rate_table(&self.config);
        self.apply_output_preferences();
        tracing::info!(key, value, "setting updated");
        Ok(())
    }
}

/// Default reference rates overlaid with any configured ones.
fn rate_table(config: &Config) -> RateTable {
    RateTable::new(
        CurrencyCode::default(),
        default_rates().into_iter().chain(config.rates.clone()),
    )
}
