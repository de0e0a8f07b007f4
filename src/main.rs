use std::fs;

use clap::Parser;

/// pascaline interprets a small Pascal subset and prints the program's
/// final variable state as JSON.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells pascaline to look at a file instead of inline source text.
    #[arg(short, long)]
    file: bool,

    /// Pretty-prints the final variable state.
    #[arg(short, long)]
    pretty: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let source = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    match pascaline::run_program(&source) {
        Ok(bindings) => {
            let rendered = if args.pretty {
                serde_json::to_string_pretty(&bindings)
            } else {
                serde_json::to_string(&bindings)
            };
            match rendered {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Failed to render the final variable state: {e}");
                    std::process::exit(1);
                },
            }
        },
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}
