// refcore: run an operation script against the execution-state core

use std::fs;
use std::path::PathBuf;
use std::process;
use std::thread;

use clap::Parser as ClapParser;
use tracing::info;

use refcore::interpreter::config::ExecConfig;
use refcore::interpreter::constants::{
    DEFAULT_MAX_CALL_DEPTH, MIN_INTERPRETER_STACK, STACK_BYTES_PER_CALL,
};
use refcore::interpreter::engine::ExecState;
use refcore::interpreter::statements::Interpreter;
use refcore::parser::data::DataScanner;
use refcore::parser::parse::Parser;

#[derive(ClapParser, Debug)]
#[command(name = "refcore", version, about = "Run an operation script against the ref-variable execution core")]
struct Args {
    /// Operation script to execute
    script: PathBuf,

    /// Data file supplying literals to `input`
    #[arg(long)]
    data: Option<PathBuf>,

    /// Do not print `gc:` lines when the reachable count changes
    #[arg(long)]
    quiet_gc: bool,

    /// Maximum number of active call frames
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(message) = run(&args) {
        eprintln!("ERROR: {}", message);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), String> {
    let source = fs::read_to_string(&args.script)
        .map_err(|e| format!("cannot read '{}': {}", args.script.display(), e))?;

    let script = Parser::new(&source)
        .and_then(|mut parser| parser.parse_script())
        .map_err(|e| e.to_string())?;
    info!(commands = script.commands.len(), "parsed {}", args.script.display());

    let data = match &args.data {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
            DataScanner::new(&text).map_err(|e| e.to_string())?
        }
        None => DataScanner::empty(),
    };

    let mut config = ExecConfig::default().with_max_call_depth(args.max_call_depth);
    if args.quiet_gc {
        config = config.quiet();
    }

    // Script calls recurse on the host stack; size it to the depth limit
    let stack_size = args
        .max_call_depth
        .saturating_mul(STACK_BYTES_PER_CALL)
        .max(MIN_INTERPRETER_STACK);

    let worker = thread::Builder::new()
        .name("interpreter".to_string())
        .stack_size(stack_size)
        .spawn(move || -> Result<(), String> {
            let state = ExecState::new(config).with_data(data);
            let mut interpreter = Interpreter::new(state).with_echo(true);
            interpreter.run(&script).map_err(|e| e.to_string())?;

            info!(
                heap = interpreter.state().heap().len(),
                reachable = interpreter.state().reachable_count(),
                "execution completed"
            );
            Ok(())
        })
        .map_err(|e| format!("cannot start interpreter thread: {}", e))?;

    worker
        .join()
        .map_err(|_| "interpreter thread panicked".to_string())?
}
