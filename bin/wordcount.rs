extern crate word_variants;

use std::env;
use std::io::{self, Write};
use std::process;

use word_variants::tokenizer;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() != 1 {
        eprintln!(
            "Error: invalid number of command line arguments. Please specify one filename."
        );
        process::exit(1);
    }

    let table = match tokenizer::count_file(&args[0]) {
        Ok(table) => table,
        Err(ref err) if err.kind() == io::ErrorKind::NotFound => {
            eprintln!("Error: file not found");
            process::exit(1);
        }
        Err(err) => {
            eprintln!("Error: could not read {}: {}", args[0], err);
            process::exit(1);
        }
    };

    let report = table.render();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = out.write_all(report.as_bytes()) {
        eprintln!("Error: could not write report: {}", err);
        process::exit(1);
    }
}
