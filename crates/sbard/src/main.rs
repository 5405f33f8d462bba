//! sbard - status line daemon.
//!
//! Runs every configured collector on its own thread and publishes the
//! combined line once per second to the X root window title or stdout.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

use sbar_core::collector::{Clock, RealFs, SystemClock};
use sbar_core::{
    Aggregator, Config, RootWindowTitle, RoutineList, Scheduler, ShutdownToken, StdoutLine,
    SystemFactory,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    /// X root window name (dwm and similar bars).
    X11,
    /// One line per tick on stdout.
    Stdout,
}

/// Status line daemon.
#[derive(Parser, Debug)]
#[command(name = "sbard", about = "Status line daemon", version)]
struct Args {
    /// Config file. Defaults to $XDG_CONFIG_HOME/sbar/config.toml or
    /// ~/.config/sbar/config.toml, then built-in defaults.
    #[arg(short, long, value_name = "PATH", env = "SBAR_CONFIG")]
    config: Option<PathBuf>,

    /// Where the status line goes.
    #[arg(short, long, value_enum, default_value = "x11")]
    output: Output,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, default_value = "/proc")]
    proc_path: PathBuf,

    /// Path to /sys filesystem (for testing/mocking).
    #[arg(long, default_value = "/sys")]
    sys_path: PathBuf,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

fn log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Logs go to stderr; stdout may be carrying the status line.
fn init_logging(verbose: u8, quiet: bool) {
    let level = log_level(verbose, quiet);

    let mut filter = EnvFilter::from_default_env();
    for target in ["sbard", "sbar_core"] {
        match format!("{}={}", target, level).parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("Invalid log directive for {}: {}", target, e),
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let (config, source) = Config::discover(args.config.as_deref())?;

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    info!("sbard {} starting", env!("CARGO_PKG_VERSION"));
    match &source {
        Some(path) => info!("Config: {}", path.display()),
        None => info!("Config: built-in defaults"),
    }
    info!(
        "Config: {} entries, delimiter={:?}, color_text={}, max_length={}, output={:?}",
        config.routines.len(),
        config.delimiter,
        config.color_text,
        config.max_length,
        args.output
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let factory = SystemFactory::new(RealFs::new(), &args.proc_path, &args.sys_path, clock);
    let (list, routines) = RoutineList::build(&config, &factory)?;

    let shutdown = ShutdownToken::new();
    let token = shutdown.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        token.trigger();
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    let scheduler = Scheduler::spawn(routines, &shutdown);
    info!("Started {} routines", scheduler.len());

    let result = match args.output {
        Output::X11 => Aggregator::new(list, RootWindowTitle, &config).run(&shutdown),
        Output::Stdout => Aggregator::new(list, StdoutLine::new(), &config).run(&shutdown),
    };

    // Collectors also stop when the display died.
    info!("Shutting down...");
    shutdown.trigger();
    scheduler.join();

    result?;
    info!("Shutdown complete");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
