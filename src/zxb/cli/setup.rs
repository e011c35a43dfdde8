use super::commands::{self as handlers, Session};
use clap::{CommandFactory, Parser};
use unicode_width::UnicodeWidthStr;
use zxb::commands::{add_source, create, edit, install, remove};
use zxb::error::Result;

#[derive(Parser, Debug)]
#[command(name = "zxb", bin_name = "zxb", version, disable_help_flag = true)]
#[command(about = "Create, edit, link and install zx scripts", long_about = None)]
pub struct Cli {
    /// Command to run, or the name of a script to create or edit
    pub command: Option<String>,

    /// Script name, directory or URL, depending on the command
    pub argument: Option<String>,

    /// Echo subprocess output and log debug details
    #[arg(short, long)]
    pub verbose: bool,

    /// Recreate bin entries that already exist
    #[arg(short, long)]
    pub force: bool,

    /// Print help
    #[arg(short, long)]
    pub help: bool,
}

pub type Handler = fn(&mut Session, Option<&str>) -> Result<()>;

/// Every command zxb understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Link,
    Clean,
    Create,
    Edit,
    Remove,
    List,
    Update,
    AddSource,
    Install,
    Help,
}

impl CommandKind {
    /// Display order for help
    pub const ALL: [CommandKind; 10] = [
        CommandKind::Link,
        CommandKind::Clean,
        CommandKind::Create,
        CommandKind::Edit,
        CommandKind::Remove,
        CommandKind::List,
        CommandKind::Update,
        CommandKind::AddSource,
        CommandKind::Install,
        CommandKind::Help,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Link => "link",
            CommandKind::Clean => "clean",
            CommandKind::Create => "create",
            CommandKind::Edit => "edit",
            CommandKind::Remove => "remove",
            CommandKind::List => "list",
            CommandKind::Update => "update",
            CommandKind::AddSource => "add_source",
            CommandKind::Install => "install",
            CommandKind::Help => "help",
        }
    }

    pub fn alias(self) -> Option<&'static str> {
        match self {
            CommandKind::List => Some("ls"),
            CommandKind::Remove => Some("rm"),
            CommandKind::Create => Some("new"),
            _ => None,
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            CommandKind::Link => "link [--force]",
            CommandKind::Create => create::USAGE,
            CommandKind::Edit => edit::USAGE,
            CommandKind::Remove => remove::USAGE,
            CommandKind::AddSource => add_source::USAGE,
            CommandKind::Install => install::USAGE,
            other => other.name(),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CommandKind::Link => "Link every script to an executable in the bins directory",
            CommandKind::Clean => "Remove executables whose script no longer exists",
            CommandKind::Create => "Create a new script and open it in your editor",
            CommandKind::Edit => "Edit a script, or browse all sources when no name is given",
            CommandKind::Remove => "Delete a script and its executable",
            CommandKind::List => "List scripts and whether their executables exist",
            CommandKind::Update => "Update zxb to the latest release",
            CommandKind::AddSource => "Register another directory of scripts",
            CommandKind::Install => "Download a zx script from a URL and create it",
            CommandKind::Help => "Show this help",
        }
    }

    pub fn handler(self) -> Handler {
        match self {
            CommandKind::Link => handlers::handle_link,
            CommandKind::Clean => handlers::handle_clean,
            CommandKind::Create => handlers::handle_create,
            CommandKind::Edit => handlers::handle_edit,
            CommandKind::Remove => handlers::handle_remove,
            CommandKind::List => handlers::handle_list,
            CommandKind::Update => handlers::handle_update,
            CommandKind::AddSource => handlers::handle_add_source,
            CommandKind::Install => handlers::handle_install,
            CommandKind::Help => handlers::handle_help,
        }
    }

    /// Finds a command by name or alias.
    pub fn lookup(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == word || kind.alias() == Some(word))
    }
}

/// Resolves the first positional word to a command and its argument. Words
/// that name no command are script names for `create`.
pub fn resolve_invocation(
    command: &str,
    argument: Option<String>,
) -> (CommandKind, Option<String>) {
    match CommandKind::lookup(command) {
        Some(kind) => (kind, argument),
        None => (CommandKind::Create, Some(command.to_string())),
    }
}

pub fn get_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");
    let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();

    let width = CommandKind::ALL
        .iter()
        .map(|kind| kind.usage().width())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    output.push_str(&format!("zxb {version}\n"));
    output.push_str(&format!("{about}\n"));
    output.push('\n');
    output.push_str("Usage: zxb [OPTIONS] <COMMAND> [ARGUMENT]\n");
    output.push_str("       zxb <name>    Create or edit the script <name>\n");
    output.push('\n');
    output.push_str("Commands:\n");

    for kind in CommandKind::ALL {
        let usage = kind.usage();
        let padding = " ".repeat(width - usage.width());
        let alias = kind
            .alias()
            .map(|alias| format!(" (alias: {alias})"))
            .unwrap_or_default();
        output.push_str(&format!(
            "  {usage}{padding}  {}{alias}\n",
            kind.description()
        ));
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("  -f, --force      Recreate bin entries that already exist\n");
    output.push_str("  -v, --verbose    Echo subprocess output and log debug details\n");
    output.push_str("  -h, --help       Print help\n");
    output.push_str("  -V, --version    Print version\n");

    output
}

pub fn print_help() {
    print!("{}", get_help());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_commands() {
        assert_eq!(CommandKind::lookup("ls"), Some(CommandKind::List));
        assert_eq!(CommandKind::lookup("rm"), Some(CommandKind::Remove));
        assert_eq!(CommandKind::lookup("new"), Some(CommandKind::Create));
        assert_eq!(CommandKind::lookup("add_source"), Some(CommandKind::AddSource));
        assert_eq!(CommandKind::lookup("deploy"), None);
    }

    #[test]
    fn unknown_word_is_an_implicit_create() {
        let (kind, arg) = resolve_invocation("deploy", None);
        assert_eq!(kind, CommandKind::Create);
        assert_eq!(arg.as_deref(), Some("deploy"));

        let (kind, arg) = resolve_invocation("rm", Some("deploy".into()));
        assert_eq!(kind, CommandKind::Remove);
        assert_eq!(arg.as_deref(), Some("deploy"));
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<&str> = CommandKind::ALL.iter().map(|k| k.name()).collect();
        names.extend(CommandKind::ALL.iter().filter_map(|k| k.alias()));
        let count = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), count);
    }

    #[test]
    fn parses_command_argument_and_flags() {
        let cli = Cli::try_parse_from(["zxb", "link", "--force", "-v"]).unwrap();
        assert_eq!(cli.command.as_deref(), Some("link"));
        assert!(cli.force);
        assert!(cli.verbose);
        assert!(!cli.help);

        let cli = Cli::try_parse_from(["zxb", "install", "https://x.dev/a.mjs"]).unwrap();
        assert_eq!(cli.argument.as_deref(), Some("https://x.dev/a.mjs"));
    }

    #[test]
    fn help_flag_is_ours() {
        let cli = Cli::try_parse_from(["zxb", "-h"]).unwrap();
        assert!(cli.help);
        assert!(cli.command.is_none());
    }

    #[test]
    fn help_lists_every_command_with_usage() {
        let help = get_help();
        for kind in CommandKind::ALL {
            assert!(help.contains(kind.usage()), "missing {}", kind.name());
            assert!(help.contains(kind.description()));
        }
        assert!(help.contains("(alias: ls)"));
    }

    #[test]
    fn clean_and_install_are_described_differently() {
        assert_ne!(CommandKind::Clean.description(), CommandKind::Install.description());
    }
}
