use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bfc::bytecode::artifact::{self, Artifact};
use bfc::bytecode::disasm::print_graph;
use bfc::bytecode::loops::DEFAULT_MAX_LOOP_DEPTH;
use bfc::lang::DEFAULT_TAPE_CELLS;
use bfc::runtime::{StdIo, Vm, VmConfig};
use bfc::{Compiler, CompilerConfig, FunctionGraph};

/// bfc - compiler for the eight-symbol byte-tape language
#[derive(Parser, Debug)]
#[command(name = "bfc", version)]
#[command(about = "Compile tape programs to artifacts or run them immediately", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a source file and write the artifact
    Build {
        input: PathBuf,

        /// Output path (defaults to the input with a .bfo extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        compile: CompileArgs,
    },

    /// Compile a source file and execute it immediately
    Run {
        input: PathBuf,

        #[command(flatten)]
        compile: CompileArgs,

        #[command(flatten)]
        exec: ExecArgs,
    },

    /// Execute a previously built artifact
    Exec {
        artifact: PathBuf,

        #[command(flatten)]
        exec: ExecArgs,
    },

    /// Print the control-flow graph of a source file
    Dump {
        input: PathBuf,

        #[command(flatten)]
        compile: CompileArgs,
    },
}

#[derive(Args, Debug)]
struct CompileArgs {
    /// Deepest allowed loop nesting
    #[arg(long, default_value_t = DEFAULT_MAX_LOOP_DEPTH)]
    max_loop_depth: usize,

    /// Number of tape cells the program allocates
    #[arg(long, default_value_t = DEFAULT_TAPE_CELLS)]
    tape_cells: u32,
}

impl From<&CompileArgs> for CompilerConfig {
    fn from(args: &CompileArgs) -> Self {
        CompilerConfig {
            max_loop_depth: args.max_loop_depth,
            tape_cells: args.tape_cells,
        }
    }
}

#[derive(Args, Debug)]
struct ExecArgs {
    /// Abort the program after this many instructions
    #[arg(long)]
    max_steps: Option<u64>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("bfc=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bfc=warn"))
    };

    // Logs go to stderr; stdout belongs to the running program.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Build {
            input,
            output,
            compile,
        } => {
            let graph = compile_file(&input, &compile)?;
            let output = output.unwrap_or_else(|| input.with_extension(artifact::EXTENSION));
            Artifact::new(graph)
                .write_to(&output)
                .context("could not write artifact")?;
            info!(output = %output.display(), "artifact written");
        }
        Command::Run {
            input,
            compile,
            exec,
        } => {
            let graph = compile_file(&input, &compile)?;
            execute(&graph, &exec)?;
        }
        Command::Exec { artifact, exec } => {
            let graph = Artifact::read_from(&artifact)
                .context("could not load artifact")?
                .into_graph();
            execute(&graph, &exec)?;
        }
        Command::Dump { input, compile } => {
            let graph = compile_file(&input, &compile)?;
            print_graph(&graph);
        }
    }
    Ok(())
}

fn compile_file(path: &Path, args: &CompileArgs) -> Result<FunctionGraph> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("could not read input file '{}'", path.display()))?;

    let graph = Compiler::with_config(args.into())
        .compile(&source)
        .with_context(|| format!("could not compile '{}'", path.display()))?;

    info!(
        file = %path.display(),
        blocks = graph.len(),
        "compiled"
    );
    Ok(graph)
}

fn execute(graph: &FunctionGraph, args: &ExecArgs) -> Result<()> {
    let config = VmConfig {
        max_steps: args.max_steps,
    };
    let mut vm = Vm::with_config(StdIo::new(), config);
    vm.run(graph)?;
    info!(steps = vm.steps(), "program finished");
    Ok(())
}
