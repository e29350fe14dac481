use std::{fs,
          io::{self, Write},
          process::ExitCode};

use clap::Parser;
use pencil::{interpreter::{lexer::tokenize, parser::parse},
             run,
             util::source_map::SourceMap};

/// pencil runs scripts written in Pencil, a small imperative scripting
/// language with `@` variables and block scoping.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells pencil to read the script from the file named by `contents`.
    #[arg(short, long)]
    file: bool,

    /// Prints the token stream instead of running the script.
    #[arg(short, long)]
    tokens: bool,

    /// Prints the parsed statements instead of running the script.
    #[arg(short, long, conflicts_with = "tokens")]
    ast: bool,

    contents: String,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let script = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Failed to read the input file '{}': {e}", &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents
    };

    let result = if args.tokens || args.ast {
        dump(&script, args.tokens)
    } else {
        run(&script, &mut io::stdout().lock(), &mut io::stderr().lock()).map(|o| o.is_success())
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

/// Prints the tokens, or the statements, of `script` along with any errors
/// found on the way.
fn dump(script: &str, tokens_only: bool) -> io::Result<bool> {
    let map = SourceMap::new(script);
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    let lexed = tokenize(&map);
    for error in &lexed.errors {
        writeln!(stderr, "Lexical Error: {error}")?;
    }
    if tokens_only {
        for token in &lexed.tokens {
            let lexeme = script.get(token.span.start..token.span.end).unwrap_or_default();
            writeln!(stdout, "{} {:?} {lexeme:?}", map.locate(token.span.start), token.kind)?;
        }
        return Ok(lexed.errors.is_empty());
    }

    let parsed = parse(&lexed.tokens, &map);
    for error in &parsed.errors {
        writeln!(stderr, "Syntactical Error: {error}")?;
    }
    for statement in &parsed.statements {
        writeln!(stdout, "{statement:#?}")?;
    }
    Ok(lexed.errors.is_empty() && parsed.errors.is_empty())
}
