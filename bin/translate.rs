use std::io::Read;

use clap::{App, Arg, ArgMatches};
use slog::{debug, o, Drain, Level, Logger};
use slog_term::{FullFormat, TermDecorator};

use cmipsy::{canned, translator};

enum Error {
    IO(std::io::Error),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::IO(e)
    }
}

fn parse_arguments() -> ArgMatches<'static> {
    App::new("cmipsy")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translates a small subset of C into illustrative MIPS assembly")
        .arg(Arg::with_name("source")
             .help("File containing C source. Reads the standard input if omitted or '-'")
             .value_name("SOURCE")
             .index(1))
        .arg(Arg::with_name("explain")
             .long("explain")
             .short("e")
             .help("Print an explanation before the output of every translated line"))
        .arg(Arg::with_name("canned")
             .long("canned")
             .help("Use the fixed canned snippets instead of the translation rules"))
        .arg(Arg::with_name("example")
             .long("example")
             .conflicts_with("source")
             .help("Translate the built-in example program"))
        .arg(Arg::with_name("verbose")
             .long("verbose")
             .short("v")
             .multiple(true)
             .help("Log more details to the standard error, repeat for more"))
        .get_matches()
}

fn build_logger(verbosity: u64) -> Logger {
    let level = match verbosity {
        0 => Level::Warning,
        1 => Level::Debug,
        _ => Level::Trace,
    };

    let decorator = TermDecorator::new().stderr().build();
    let drain = FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    Logger::root(drain.filter_level(level).fuse(), o!())
}

fn main() {
    let args = parse_arguments();
    let logger = build_logger(args.occurrences_of("verbose"));

    let code = match run(&args, &logger) {
        Ok(()) => 0,
        Err(Error::IO(io)) => {
            eprintln!("IO error: {}", io);
            1
        }
    };

    // The async drain only flushes once every logger handle is gone.
    drop(logger);
    std::process::exit(code);
}

fn read_source(args: &ArgMatches) -> Result<String, Error> {
    let canned = args.is_present("canned");

    if args.is_present("example") {
        let example = if canned { canned::EXAMPLE } else { translator::EXAMPLE };
        return Ok(example.to_string());
    }

    match args.value_of("source") {
        None | Some("-") => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn run(args: &ArgMatches, logger: &Logger) -> Result<(), Error> {
    let source = read_source(args)?;

    let translation = if args.is_present("canned") {
        canned::translate(&source)
    } else {
        translator::translate_with_logger(&source, logger.clone())
    };

    if args.is_present("explain") {
        print!("{}", translation.annotated());
    } else {
        println!("{}", translation);
    }

    debug!(logger, "{}", translation.summary;
        "steps" => translation.summary.steps,
        "instructions" => translation.summary.instructions,
        "slots" => translation.slots.len(),
        "frame_size" => translation.slots.frame_size());

    Ok(())
}
