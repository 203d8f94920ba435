// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! CLI tool for comparing hash functions on chained hash tables

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use hash_collisions::{
    fnv1a_hash, hash::DEFAULT_SEED, murmur_hash, report, ChainedTable, Config, Corpus, Hash32,
    HashKind,
};
use humansize::{format_size, BINARY};
use rand::distr::{Alphanumeric, Distribution};
use rustyline::DefaultEditor;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    prelude::*,
    registry::Registry,
};

macro_rules! die {
    ($fmt:literal, $($arg:tt)*) => {{
        eprintln!($fmt, $($arg)*);
        std::process::exit(1);
    }};

    ($msg:literal) => {{
        eprintln!($msg);
        std::process::exit(1);
    }};

    () => {{
        eprintln!("Program terminated unexpectedly");
        std::process::exit(1);
    }};
}

#[allow(unused_imports)]
use tracing::{debug, error, info, trace, warn};

/// Buckets of the tables used for timing, so chains stay short
const TIMING_BUCKETS: usize = 10;

pub fn init_tracing(quiet: bool, verbose: u8) -> (bool, LevelFilter) {
    let is_verbose = !quiet && verbose > 0;

    let level_filter = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    // Bridge log crate macros to tracing (for library code that uses log::*)
    tracing_log::LogTracer::init().expect("Failed to set log tracer");

    let registry = Registry::default();

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("HASHCOL_LOG")
        .from_env_lossy()
        .add_directive(
            "rustyline=warn"
                .parse()
                .expect("Failed to parse rustyline directive"),
        );

    let subscriber = registry.with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .compact(),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        die!("INTERNAL ERROR: setting default tracing::subscriber failed");
    }

    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing_panic::panic_hook(info);
        prev_hook(info); // daisy-chain to old panic hook
    }));

    (is_verbose, level_filter)
}

fn parse_size_as_usize(s: &str) -> Result<usize, String> {
    let cfg = parse_size::Config::new().with_binary();
    cfg.parse_size(s)
        .map_err(|e| e.to_string())
        .and_then(|size| usize::try_from(size).map_err(|e| e.to_string()))
}

/// CLI tool for comparing hash functions on chained hash tables
#[derive(Parser, Debug)]
#[command(name = "hashcol")]
#[command(about = "CLI tool for comparing hash functions on chained hash tables")]
struct ToolArgs {
    /// Suppress all output except for errors. This overrides the -v flag.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Turn on verbose output. Supply -v multiple times to increase verbosity.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: ToolCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ToolCommand {
    /// Print the FNV-1a and MurmurHash3 digests of keys
    Hash {
        /// Keys to hash
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Compare collisions of both hash functions on a corpus (one key per line)
    Collide {
        /// Corpus file, duplicate lines are skipped
        corpus: PathBuf,

        /// Number of buckets (defaults to the number of unique keys)
        #[arg(short, long)]
        buckets: Option<usize>,

        /// Write distribution files into this folder
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Dataset name used in distribution file names (defaults to the corpus file stem)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Print the bucket occupancy histogram of distribution files
    Histogram {
        /// Distribution files, one bucket size per line
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Time hashing and table operations on random keys
    Time {
        /// Key lengths (e.g. "1KiB,64KiB")
        #[arg(
            short, long,
            value_delimiter = ',',
            value_parser = parse_size_as_usize,
            default_values = ["1KiB", "64KiB", "1MiB", "16MiB"],
        )]
        lengths: Vec<usize>,

        /// Number of rounds over all lengths
        #[arg(short, long, default_value_t = 6)]
        rounds: usize,

        /// Write results into this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Start a table shell
    Shell {
        /// Number of buckets
        #[arg(short, long, default_value_t = 16)]
        buckets: usize,

        /// Hash function ("fnv1a" or "murmur3")
        #[arg(short = 'H', long = "hash", default_value_t = HashKind::Fnv1a)]
        hash: HashKind,

        /// MurmurHash3 seed
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u32,
    },
}

// Internal shell commands
#[derive(Parser, Debug)]
#[command(name = "")]
#[command(no_binary_name = true)]
#[command(disable_version_flag = true)]
#[command(help_template = "
{version}

Available Commands:

{subcommands}

Use `help COMMAND` or `COMMAND --help` for more details.

")]
struct ShellArgs {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ShellCommand {
    /// Add keys (duplicates are kept)
    Add {
        /// Keys to add
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Check whether a key is in the table
    Contains {
        /// The key to look up
        key: String,
    },
    /// Remove the first entry equal to a key
    #[command(visible_alias = "rm", visible_alias = "del")]
    Remove {
        /// The key to remove
        key: String,
    },
    /// Add every line of a corpus file (duplicate lines are skipped)
    Load {
        /// Corpus file
        path: PathBuf,
    },
    /// Show the number of entries in each bucket
    #[command(visible_alias = "distribution")]
    Dist,
    /// Show the number of collisions
    Collisions,
    /// Show the number of entries
    #[command(visible_alias = "count")]
    Size,
    /// Show the bucket of a key and its chain
    Bucket {
        /// The key to locate
        key: String,
    },
    /// Show table statistics
    Info,
    /// Exit the current shell
    #[command(visible_alias = "quit")]
    Exit,
}

struct Session {
    table: ChainedTable<Vec<u8>>,
    config: Config,
}

impl Session {
    fn open(config: Config) -> hash_collisions::Result<Self> {
        Ok(Self {
            table: config.build()?,
            config,
        })
    }
}

fn print_info(session: &Session) {
    let report = report::CollisionReport::from_table(&session.table);

    println!("Hash function: {}", session.config.hash_kind);
    if session.config.hash_kind == HashKind::Murmur3 {
        println!("Seed: {}", session.config.murmur_seed);
    }
    println!("{report}");
    println!("Load factor: {:.4}", session.table.load_factor());
}

fn handle_add(session: &mut Session, keys: Vec<String>) {
    for key in keys {
        session.table.add(key.into_bytes());
    }
    println!("OK ({} entries)", session.table.len());
}

fn handle_contains(session: &Session, key: &str) {
    println!("{}", session.table.contains(key.as_bytes()));
}

fn handle_remove(session: &mut Session, key: &str) {
    match session.table.remove(key.as_bytes()) {
        Ok(_) => println!("OK (removed)"),
        Err(e) => eprintln!("Error: {e}"),
    }
}

fn handle_load(session: &mut Session, path: &Path) {
    let corpus = match Corpus::open(path) {
        Ok(corpus) => corpus,
        Err(e) => {
            eprintln!("Error loading {}: {e}", path.display());
            return;
        }
    };

    let (loaded, duplicates) = (corpus.len(), corpus.duplicates());

    for key in corpus.into_keys() {
        session.table.add(key);
    }

    println!("OK ({loaded} keys loaded, {duplicates} duplicates skipped)");
}

fn handle_dist(session: &Session) {
    if let Err(e) = report::write_distribution(io::stdout().lock(), &session.table.distribution())
    {
        eprintln!("Error: {e}");
    }
}

fn handle_bucket(session: &Session, key: &str) {
    let idx = session.table.bucket_of(key.as_bytes());
    let chain = session.table.chain(idx);

    println!("bucket {idx} ({} entries)", chain.len());
    for entry in chain {
        println!("  {}", String::from_utf8_lossy(entry));
    }
}

/// Result of executing a command
enum CommandResult {
    Continue,
    Exit,
}

/// Execute a parsed shell command
fn execute_shell_command(session: &mut Session, cmd: ShellCommand) -> CommandResult {
    match cmd {
        ShellCommand::Add { keys } => handle_add(session, keys),
        ShellCommand::Contains { key } => handle_contains(session, &key),
        ShellCommand::Remove { key } => handle_remove(session, &key),
        ShellCommand::Load { path } => handle_load(session, &path),
        ShellCommand::Dist => handle_dist(session),
        ShellCommand::Collisions => println!("{}", session.table.collisions()),
        ShellCommand::Size => println!("{}", session.table.len()),
        ShellCommand::Bucket { key } => handle_bucket(session, &key),
        ShellCommand::Info => print_info(session),
        ShellCommand::Exit => return CommandResult::Exit,
    }
    CommandResult::Continue
}

/// Parse and run a shell command line
fn run_shell_command(session: &mut Session, line: &str) -> CommandResult {
    let line = line.trim();
    if line.is_empty() {
        return CommandResult::Continue;
    }

    let tokens = match shlex::split(line) {
        Some(t) if !t.is_empty() => t,
        Some(_) => return CommandResult::Continue,
        None => {
            eprintln!("error: unclosed quote");
            return CommandResult::Continue;
        }
    };

    match ShellArgs::try_parse_from(&tokens) {
        Ok(args) => execute_shell_command(session, args.command),
        Err(e) => {
            // Print clap's error message
            eprintln!("{e}");
            CommandResult::Continue
        }
    }
}

fn run_shell(session: &mut Session) {
    if io::stdin().is_terminal() {
        run_shell_interactive(session);
    } else {
        run_shell_non_interactive(session);
    }
}

fn run_shell_interactive(session: &mut Session) {
    println!(
        "Welcome to the hash table shell ({} buckets, {})",
        session.table.bucket_count(),
        session.table.hasher().name(),
    );
    println!("Type 'help' for available commands, 'exit' to quit.\n");

    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error initializing line editor: {e}");
            return;
        }
    };

    loop {
        match rl.readline("hashcol> ") {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                if let CommandResult::Exit = run_shell_command(session, &line) {
                    break;
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                // Ignore Ctrl+C, just show a new prompt
                continue;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        }
    }
}

fn run_shell_non_interactive(session: &mut Session) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        if stdout.flush().is_err() {
            die!("can't flush stdout");
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => {
                // EOF
                break;
            }
            Ok(_) => {
                if let CommandResult::Exit = run_shell_command(session, &line) {
                    break;
                }
            }
            Err(e) => {
                die!("Error reading input: {}", e);
            }
        }
    }
}

fn handle_hash(keys: &[String]) {
    for key in keys {
        let fnv = fnv1a_hash(key);
        let murmur = murmur_hash(key);

        println!("{key}");
        println!("  {:<12} {fnv:08x} ({fnv})", "FNV-1a");
        println!("  {:<12} {murmur:08x} ({murmur})", "MurmurHash3");
    }
}

fn handle_collide(
    corpus_path: &Path,
    buckets: Option<usize>,
    out: Option<&Path>,
    name: Option<&str>,
) -> hash_collisions::Result<()> {
    let corpus = Corpus::open(corpus_path)?;
    let bucket_count = buckets.unwrap_or(corpus.len());

    println!(
        "Corpus: {} unique keys, {} duplicates skipped, {}",
        corpus.len(),
        corpus.duplicates(),
        format_size(corpus.total_bytes(), BINARY),
    );
    println!("Buckets: {bucket_count}\n");

    let dataset = name.map(String::from).unwrap_or_else(|| {
        corpus_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Corpus".into())
    });

    if let Some(dir) = out {
        std::fs::create_dir_all(dir)?;
    }

    for kind in HashKind::ALL {
        let config = Config::new(bucket_count).hash_kind(kind);
        let run = report::run_collision_test(corpus.keys().iter().map(Vec::as_slice), &config)?;

        println!("{}\n", run.report);

        if let Some(dir) = out {
            let path = dir.join(report::distribution_file_name(&dataset, kind));
            report::save_distribution(&path, &run.distribution)?;
            info!("Wrote distribution to {}", path.display());
        }
    }

    Ok(())
}

fn handle_histogram(files: &[PathBuf]) -> hash_collisions::Result<()> {
    for path in files {
        let distribution = report::load_distribution(path)?;
        let histogram = report::occupancy_histogram(&distribution);

        println!("{}:", path.display());
        for (occupancy, buckets) in histogram {
            println!("  {occupancy} entries: {buckets} buckets");
        }
    }

    Ok(())
}

fn random_key(rng: &mut impl rand::Rng, len: usize) -> String {
    Alphanumeric
        .sample_iter(rng)
        .take(len)
        .map(char::from)
        .collect()
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, u128) {
    let start = Instant::now();
    let result = std::hint::black_box(f());
    (result, start.elapsed().as_nanos())
}

fn handle_time(lengths: &[usize], rounds: usize, out: Option<&Path>) -> hash_collisions::Result<()> {
    let mut writer: Box<dyn Write> = match out {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    let mut rng = rand::rng();

    for round in 0..rounds {
        for &byte_len in lengths {
            let key = random_key(&mut rng, byte_len);
            eprintln!(
                "round {}/{rounds}: {} key",
                round + 1,
                format_size(byte_len, BINARY)
            );

            for kind in HashKind::ALL {
                let hasher = kind.hasher(DEFAULT_SEED);
                let mut table = ChainedTable::new(TIMING_BUCKETS, hasher)?;

                let (_, hash_ns) = timed(|| hasher.digest(key.as_bytes()));

                let owned = key.clone();
                let ((), add_ns) = timed(|| table.add(owned));
                let (found, contains_ns) = timed(|| table.contains(key.as_str()));
                let (removed, remove_ns) = timed(|| table.remove(key.as_str()));

                debug_assert!(found);
                removed?;

                for (op, ns) in [
                    ("hash", hash_ns),
                    ("add", add_ns),
                    ("contains", contains_ns),
                    ("remove", remove_ns),
                ] {
                    writeln!(
                        writer,
                        r#"{{"round":{round},"byte_len":{byte_len},"op":"{op}","hash":"{}","ns":{ns}}}"#,
                        hasher.name(),
                    )?;
                }
            }
        }
    }

    writer.flush()?;

    Ok(())
}

fn main() {
    let args = ToolArgs::parse();
    let (verbose, level_filter) = init_tracing(args.quiet, args.verbose);

    let cmd = ToolArgs::command();

    info!(
        "starting {} ({} {}), log level: {level_filter}",
        cmd.get_name(),
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let note = if verbose {
        ""
    } else {
        ". Note: Use -v (one or multiple times) for more information"
    };

    let result = match args.command {
        ToolCommand::Hash { keys } => {
            handle_hash(&keys);
            Ok(())
        }
        ToolCommand::Collide {
            corpus,
            buckets,
            out,
            name,
        } => handle_collide(&corpus, buckets, out.as_deref(), name.as_deref()),
        ToolCommand::Histogram { files } => handle_histogram(&files),
        ToolCommand::Time {
            lengths,
            rounds,
            out,
        } => handle_time(&lengths, rounds, out.as_deref()),
        ToolCommand::Shell {
            buckets,
            hash,
            seed,
        } => {
            let config = Config::new(buckets).hash_kind(hash).murmur_seed(seed);

            match Session::open(config) {
                Ok(mut session) => {
                    run_shell(&mut session);
                    Ok(())
                }
                Err(e) => die!("Error creating table: {}{}", e, note),
            }
        }
    };

    if let Err(e) = result {
        die!("Error: {}{}", e, note);
    }
}
