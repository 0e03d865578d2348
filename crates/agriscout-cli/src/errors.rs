use console::style;
use std::fmt;

/// Error with context and suggested fixes
#[derive(Clone)]
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), context: None, suggestions: Vec::new(), help_command: None }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Ring file that could not be read or parsed
pub fn invalid_ring_file(path: &str, reason: &str) -> CliError {
    CliError::new("Cannot read ring file")
        .with_context(format!("Path: {}\nReason: {}", path, reason))
        .with_suggestion("Rings are JSON arrays of [lat, lng] pairs, e.g. [[28.61, 77.20], ...]")
        .with_suggestion("Check the file path and try again")
        .with_help("Run: agriscout check --help")
}

/// Replay script that could not be read or parsed
pub fn invalid_replay_script(path: &str, reason: &str) -> CliError {
    CliError::new("Cannot read replay script")
        .with_context(format!("Path: {}\nReason: {}", path, reason))
        .with_suggestion(
            "Scripts are JSON arrays of events, e.g. [{\"event\": \"start\"}, \
             {\"event\": \"click\", \"lat\": 28.61, \"lng\": 77.2}]",
        )
        .with_help("Run: agriscout replay --help")
}

/// Configuration value that failed validation
pub fn invalid_config(reason: &str) -> CliError {
    CliError::new("Invalid configuration")
        .with_context(format!("Reason: {}", reason))
        .with_suggestion("Check the file passed with --config or $AGRISCOUT_CONFIG")
        .with_suggestion("Check AGRISCOUT_* environment variables")
        .with_help("Run: agriscout config")
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    if let Some(cli_error) = error.downcast_ref::<CliError>() {
        return cli_error.clone();
    }

    let message = format!("{:#}", error);
    if message.contains("configuration") {
        invalid_config(&message)
    } else if message.contains("Connection refused") || message.contains("timed out") {
        CliError::new("Upstream service unreachable")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check your network connection")
            .with_suggestion("Or point to another endpoint with the --*-url flags")
    } else {
        CliError::new(message)
    }
}
