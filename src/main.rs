use clap::{Parser as ClapParser, Subcommand};
use slotpath::cli::{self, CliError, MutateOptions, ResolveOptions, Verb};
use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::PathBuf,
};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "slotpath")]
#[command(about = "slotpath - address and mutate locations inside JSON documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse path expressions, one per line, and print their segments
    Parse {
        /// File with one path per line (reads from stdin if not provided)
        file: Option<PathBuf>,
    },

    /// Resolve a path against a JSON document
    Resolve {
        /// The path expression
        path: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Variable binding as name=JSON (repeatable)
        #[arg(short, long = "bind")]
        bind: Vec<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Apply add, append, set-field or remove and print the document
    Mutate {
        verb: Verb,

        /// The path expression
        path: String,

        /// JSON value to write (not used by remove)
        value: Option<String>,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Variable binding as name=JSON (repeatable)
        #[arg(short, long = "bind")]
        bind: Vec<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("slotpath=warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse { file } => run_parse(file),
        Commands::Resolve {
            path,
            input,
            bind,
            pretty,
        } => run_resolve(path, input, bind, pretty),
        Commands::Mutate {
            verb,
            path,
            value,
            input,
            bind,
            pretty,
        } => run_mutate(verb, path, value, input, bind, pretty),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_stdin_input(input: Option<String>) -> Result<Option<String>, CliError> {
    match input {
        Some(s) => Ok(Some(s)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

fn print_json(value: &serde_json::Value, pretty: bool) -> Result<(), CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

fn run_parse(file: Option<PathBuf>) -> Result<(), CliError> {
    let lines = match file {
        Some(path) => {
            tracing::info!(file = %path.display(), "reading paths");
            cli::parse_lines(BufReader::new(File::open(path)?))?
        }
        None => cli::parse_lines(io::stdin().lock())?,
    };

    for line in lines {
        println!("\nin: {}", line.text);
        match line.result {
            Ok(out) => println!("out: {}", out),
            Err(e) => eprintln!("{}", e),
        }
    }
    Ok(())
}

fn run_resolve(
    path: String,
    input: Option<String>,
    bindings: Vec<String>,
    pretty: bool,
) -> Result<(), CliError> {
    let options = ResolveOptions {
        path,
        input: read_stdin_input(input)?,
        bindings,
    };
    print_json(&cli::execute_resolve(&options)?, pretty)
}

fn run_mutate(
    verb: Verb,
    path: String,
    value: Option<String>,
    input: Option<String>,
    bindings: Vec<String>,
    pretty: bool,
) -> Result<(), CliError> {
    let options = MutateOptions {
        verb,
        path,
        value,
        input: read_stdin_input(input)?,
        bindings,
    };

    let result = cli::execute_mutate(&options)?;
    print_json(&result.document, pretty)?;
    match result.outcome {
        slotpath::Outcome::Rejected(err) => Err(CliError::Rejected(err)),
        _ => Ok(()),
    }
}
