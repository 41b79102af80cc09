//! Local slash-command definitions and classification.
//!
//! Commands are reserved input tokens intercepted before anything is sent
//! to the remote channel. Recognition is case-insensitive and only applies
//! to the entire trimmed input line; everything else falls through.

/// Definition of a local command.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Primary token, with the leading slash.
    pub token: &'static str,
    /// Alias tokens, with leading slashes.
    pub aliases: &'static [&'static str],
    /// Short description shown by `/help`.
    pub description: &'static str,
}

impl CommandSpec {
    /// Display form with aliases, e.g. `/signal (/contact)`.
    pub fn display_token(&self) -> String {
        if self.aliases.is_empty() {
            self.token.to_string()
        } else {
            format!("{} ({})", self.token, self.aliases.join(", "))
        }
    }
}

/// The closed command set.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        token: "/help",
        aliases: &[],
        description: "List available commands",
    },
    CommandSpec {
        token: "/status",
        aliases: &[],
        description: "Report mainframe status",
    },
    CommandSpec {
        token: "/signal",
        aliases: &["/contact"],
        description: "Open a secure contact channel",
    },
    CommandSpec {
        token: "/clear",
        aliases: &[],
        description: "Purge the transcript",
    },
];

/// A recognized local command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalCommand {
    Help,
    Clear,
    Signal,
    Status,
}

impl LocalCommand {
    /// Classifies a submitted line.
    ///
    /// Returns `None` for anything that is not exactly a command token
    /// (case-insensitive, after trim) — such input falls through to the
    /// remote channel. Classification itself never fails.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "/help" => Some(Self::Help),
            "/clear" => Some(Self::Clear),
            "/signal" | "/contact" => Some(Self::Signal),
            "/status" => Some(Self::Status),
            _ => None,
        }
    }
}

/// Renders the `/help` listing.
pub fn help_text() -> String {
    let mut out = String::from("AVAILABLE DIRECTIVES:\n");
    for spec in COMMANDS {
        out.push_str(&format!(
            "  {:<22} {}\n",
            spec.display_token(),
            spec.description
        ));
    }
    out.push_str("Any other input is routed to CHAIN_CORE.");
    out
}

/// Renders the `/status` report.
pub fn status_text() -> String {
    format!(
        "CHAIN_CORE v{} :: STATUS REPORT\n\
         UPLINK ............ STABLE\n\
         ENCRYPTION ........ AES-256 ACTIVE\n\
         NEURAL ENGINE ..... ONLINE",
        env!("CARGO_PKG_VERSION")
    )
}
