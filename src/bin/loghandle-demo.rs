//! `loghandle-demo`: a guided tour of the handle API over the configured backend,
//! plus a one-shot `log` subcommand for trying channels and levels from a shell.
//!
//! Usage:
//!   loghandle-demo                                 Run the tour
//!   loghandle-demo log <sink> <channel> <msg>...   Log one message
//!   loghandle-demo --config <file> --level debug   Override config and level

use clap::{Parser, Subcommand, ValueEnum};
use loghandle::config::Config;
use loghandle::{ColorChoice, Console, Dispatcher, Level, Log, Logs, Sink, internal, observer};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SinkArg {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Cout,
    Cwarn,
    Cerr,
}

impl From<SinkArg> for Sink {
    fn from(sink: SinkArg) -> Self {
        match sink {
            SinkArg::Trace => Self::Trace,
            SinkArg::Debug => Self::Debug,
            SinkArg::Info => Self::Info,
            SinkArg::Warn => Self::Warn,
            SinkArg::Error => Self::Error,
            SinkArg::Cout => Self::Cout,
            SinkArg::Cwarn => Self::Cwarn,
            SinkArg::Cerr => Self::Cerr,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "loghandle-demo",
    version,
    about = "Walk through named handles, observers, console channels and stopwatches"
)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Minimum level, overriding `[general] level`
    #[arg(short, long, value_parser = parse_level)]
    level: Option<Level>,
    /// Console colors: auto, always or never
    #[arg(long, value_parser = parse_colors)]
    colors: Option<ColorChoice>,
    /// Application name for file and JSON outputs
    #[arg(long, default_value = "loghandle-demo")]
    app: String,
    /// How long the slow stopwatch sleeps
    #[arg(long, value_name = "MS", default_value_t = 600)]
    slow_ms: u64,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the walkthrough (default).
    Tour,
    /// Log one message to a channel.
    Log {
        #[arg(value_enum)]
        sink: SinkArg,
        channel: String,
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
}

fn parse_level(s: &str) -> Result<Level, String> {
    s.parse().map_err(|e: loghandle::Error| e.to_string())
}

fn parse_colors(s: &str) -> Result<ColorChoice, String> {
    s.parse().map_err(|e: loghandle::Error| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut config = match loaded {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(level) = cli.level {
        config.general.level = level.as_str().to_string();
    }

    internal::init_with_config(&config);

    let colors = cli.colors.unwrap_or_else(|| config.color_choice());
    let console = Console::stdio_with(colors).palette(config.palette());
    let logs = Logs::new(Dispatcher::from_config(&config, &cli.app)).with_console(console);

    match cli.command.unwrap_or(Command::Tour) {
        Command::Tour => tour(&logs, Duration::from_millis(cli.slow_ms)),
        Command::Log {
            sink,
            channel,
            message,
        } => {
            logs.named(&channel).at(sink.into()).print(&message.join(" "));
        }
    }

    if let Err(e) = logs.flush() {
        eprintln!("Flush failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

struct Worker;

fn tour(logs: &Logs, slow: Duration) {
    let log = logs.me();
    let typed = logs.for_type::<Worker>();
    let named = logs.named("mylog");

    log.info().format(format_args!(
        "It is now {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    typed.debug().print("handles can be named after a type");
    named.debug().print("or after anything at all");

    log.add_observer(&observer(|e| eprintln!("Handled an error: {e}")));
    logs.add_observer(&observer(|e| eprintln!("GLOBALLY handled an error: {e}")));

    log.info()
        .format(format_args!("This is a simple message going to the {} level.", "info"));
    log.cwarn()
        .print("This warning goes to the log and to the console with coloring");

    {
        let sw = log.info().stopwatch("simpleStopwatch");
        for i in 0..5 {
            sw.log().warn().format(format_args!("log message {i}"));
        }
    }

    slow_stopwatch(&log, slow);

    log.cout().print("<blue>This message is blue.</blue> <bold>This one is bold.</bold>");

    let err = std::io::Error::other("testing the error observers");
    log.warn().throwable_fmt(&err, format_args!("uh-oh!"));

    let prefixed = log.with_prefix("my prefix: ");
    prefixed.info().print("and don't forget about prefixes.");
}

fn slow_stopwatch(log: &Log, slow: Duration) {
    let sw = log
        .debug()
        .stopwatch("stopwatchdemo")
        .warn_over(Duration::from_millis(250))
        .error_over(Duration::from_millis(500));
    sw.log().info().print("Going to sleep");
    std::thread::sleep(slow);
    sw.log().info().print("Woke up!");
    let elapsed = sw.finish();
    internal::debug("DEMO", &format!("stopwatch took {elapsed:?}"));
}
