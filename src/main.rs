use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use gnuggplot::engine::Engine;
use gnuggplot::parser::{self, LayerSpec};
use gnuggplot::{assemble, EngineOptions, LayerStack, PlotError};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gnuggplot")]
#[command(about = "Compose gnuplot plots from ggplot-style layers", long_about = None)]
#[command(after_help = parser::USAGE)]
struct Args {
    /// JSON file with engine options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON file with the layer list, used instead of layer arguments
    #[arg(long = "layers", value_name = "FILE")]
    layers_file: Option<PathBuf>,

    /// Plotting engine to run
    #[arg(long, value_name = "PROGRAM")]
    engine: Option<String>,

    /// Keep plot windows open after exit
    #[arg(long)]
    persist: bool,

    /// Exit as soon as the script is sent
    #[arg(long)]
    no_wait: bool,

    /// Do not echo the script
    #[arg(short, long)]
    quiet: bool,

    /// Print the script instead of running the engine
    #[arg(long)]
    dry_run: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Layer arguments, e.g. `--point data.csv -x 1 -y 2 --color red`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "LAYER ARGS")]
    layer_args: Vec<String>,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(io::stderr)
        .without_time()
        .init();
}

fn load_options(args: &Args) -> Result<EngineOptions> {
    let mut options = match &args.config {
        Some(path) => EngineOptions::from_path(path).context("Failed to load engine options")?,
        None => EngineOptions::default(),
    };
    if let Some(program) = &args.engine {
        options.program = program.clone();
    }
    options.persist |= args.persist;
    options.wait &= !args.no_wait;
    options.echo &= !args.quiet;
    Ok(options)
}

fn read_layer_specs(args: &Args) -> Result<Vec<LayerSpec>, PlotError> {
    match &args.layers_file {
        Some(path) => {
            if !args.layer_args.is_empty() {
                return Err(PlotError::usage("--layers cannot be combined with layer arguments"));
            }
            let text = std::fs::read_to_string(path)
                .map_err(|e| PlotError::config(format!("cannot read '{}': {e}", path.display())))?;
            LayerSpec::list_from_json(&text)
        }
        None => parser::parse_layer_args(&args.layer_args),
    }
}

/// What ended the wait for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Release {
    Enter,
    Interrupt,
}

/// Block until the user presses Enter or sends an interrupt.
///
/// Both arrive on one channel so the caller closes the engine the same way either way.
fn wait_for_release() -> Result<Release> {
    let (tx, rx) = mpsc::channel();

    let interrupt = tx.clone();
    ctrlc::set_handler(move || {
        let _ = interrupt.send(Release::Interrupt);
    })
    .context("Failed to install interrupt handler")?;

    thread::spawn(move || {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => debug!("stdin closed"),
            Ok(_) => {}
            Err(e) => debug!("failed to read stdin, releasing engine: {e}"),
        }
        let _ = tx.send(Release::Enter);
    });

    println!("Press enter to exit");
    rx.recv().context("Lost both stdin and the interrupt handler")
}

/// Usage and ordering problems print the usage text and exit non-zero.
fn exit_with_usage(err: &PlotError) -> ! {
    eprintln!("Error: {err}");
    eprintln!();
    eprintln!("{}", parser::USAGE);
    std::process::exit(1);
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let options = load_options(&args)?;

    let specs = match read_layer_specs(&args) {
        Ok(specs) => specs,
        Err(e @ (PlotError::Usage(_) | PlotError::GlobalNotFirst)) => exit_with_usage(&e),
        Err(e) => return Err(e).context("Failed to read layers"),
    };

    let stack = match LayerStack::from_specs(specs) {
        Ok(stack) => stack,
        Err(e @ (PlotError::UnknownLayer(_) | PlotError::GlobalNotFirst)) => exit_with_usage(&e),
        Err(e) => return Err(e).context("Failed to compose layers"),
    };
    info!(layers = stack.len(), "composed layers");
    for (key, value) in stack.global().iter() {
        info!(key = %key, value = %value, "global setting");
    }

    let script = assemble(stack.layers());

    let stdout = io::stdout();
    if args.dry_run {
        let mut handle = stdout.lock();
        script.write_to(&mut handle).context("Failed to write script to stdout")?;
        return Ok(());
    }
    if options.echo {
        let mut handle = stdout.lock();
        write!(handle, "{script}").context("Failed to echo script")?;
        handle.flush().context("Failed to flush stdout")?;
    }

    let mut engine = Engine::spawn(&options).context("Failed to start plotting engine")?;
    engine.send(&script).context("Failed to send script")?;

    if options.wait {
        let release = wait_for_release()?;
        debug!(?release, "closing engine");
    }

    engine.close().context("Plotting engine failed")?;
    Ok(())
}
