use super::render::{print_error, print_listings, print_messages, print_notice};
use super::setup::{print_help, resolve_invocation, Cli};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use zxb::error::Result;
use zxb::init::{initialize, resolve_home, SystemApi, ZxbContext};

const LOG_ENV: &str = "ZXB_LOG";

/// State shared by the handlers of one invocation. The tool home is only
/// set up once a handler asks for the API, so `help` never touches disk.
pub struct Session {
    verbose: bool,
    force: bool,
    cwd: PathBuf,
    context: Option<ZxbContext>,
}

impl Session {
    pub fn new(verbose: bool, force: bool) -> Self {
        Self {
            verbose,
            force,
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            context: None,
        }
    }

    fn api(&mut self) -> Result<&mut SystemApi> {
        let context = match self.context.take() {
            Some(context) => context,
            None => self.start()?,
        };
        Ok(&mut self.context.insert(context).api)
    }

    fn start(&self) -> Result<ZxbContext> {
        let context = initialize(resolve_home()?, self.verbose)?;
        let bin = context.api.paths().bin.display().to_string();

        if context.first_run {
            print_notice(&format!(
                "Created zxb home at {}",
                context.api.paths().home.display()
            ));
            if !context.bin_on_path {
                print_notice(&format!("Add {} to your PATH to run your scripts.", bin));
            }
        } else if !context.bin_on_path {
            debug!(bin = %bin, "bin directory is not on PATH");
        }
        Ok(context)
    }
}

/// Parses arguments, runs one command and returns the process exit code.
pub fn run() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command.as_deref().filter(|_| !cli.help) else {
        print_help();
        return 0;
    };

    let (kind, argument) = resolve_invocation(command, cli.argument.clone());
    debug!(command = kind.name(), argument = ?argument, "dispatching");

    let mut session = Session::new(cli.verbose, cli.force);
    match (kind.handler())(&mut session, argument.as_deref()) {
        Ok(()) => 0,
        Err(e) => {
            print_error(&e);
            e.exit_code().unwrap_or(0)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

pub fn handle_link(session: &mut Session, _arg: Option<&str>) -> Result<()> {
    let force = session.force;
    let result = session.api()?.link(force)?;
    print_messages(&result.messages);
    Ok(())
}

pub fn handle_clean(session: &mut Session, _arg: Option<&str>) -> Result<()> {
    let result = session.api()?.clean()?;
    print_messages(&result.messages);
    Ok(())
}

pub fn handle_create(session: &mut Session, arg: Option<&str>) -> Result<()> {
    let result = session.api()?.create(arg)?;
    print_messages(&result.messages);
    Ok(())
}

pub fn handle_edit(session: &mut Session, arg: Option<&str>) -> Result<()> {
    let result = session.api()?.edit(arg)?;
    print_messages(&result.messages);
    Ok(())
}

pub fn handle_remove(session: &mut Session, arg: Option<&str>) -> Result<()> {
    let result = session.api()?.remove(arg)?;
    print_messages(&result.messages);
    Ok(())
}

pub fn handle_list(session: &mut Session, _arg: Option<&str>) -> Result<()> {
    let result = session.api()?.list()?;
    print_listings(&result.listings);
    print_messages(&result.messages);
    Ok(())
}

pub fn handle_update(session: &mut Session, _arg: Option<&str>) -> Result<()> {
    let result = session.api()?.update()?;
    print_messages(&result.messages);
    Ok(())
}

pub fn handle_add_source(session: &mut Session, arg: Option<&str>) -> Result<()> {
    let cwd = session.cwd.clone();
    let result = session.api()?.add_source(arg, &cwd)?;
    print_messages(&result.messages);
    Ok(())
}

pub fn handle_install(session: &mut Session, arg: Option<&str>) -> Result<()> {
    let result = session.api()?.install(arg)?;
    print_messages(&result.messages);
    Ok(())
}

pub fn handle_help(_session: &mut Session, _arg: Option<&str>) -> Result<()> {
    print_help();
    Ok(())
}
