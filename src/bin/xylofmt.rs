//! XML reformatting CLI.
//!
//! Parses XML files and re-serializes them with the crate's save options:
//! pretty-printed, minified, or with duplicate namespace declarations
//! removed. Output goes to stdout or, with `--output`, to a file written
//! with an XML declaration.

use std::io::{self, Read};
use std::process::ExitCode;

use clap::Parser;

use xylo::parser::ParseOptions;
use xylo::serial::{serialize_document_with_options, SaveOptions};
use xylo::Document;

/// xylofmt -- reformat XML files.
///
/// Parses each input and re-serializes it with the requested options.
#[derive(Parser, Debug)]
#[command(name = "xylofmt", version, about, long_about = None)]
struct Cli {
    /// XML files to process (use `-` for stdin).
    #[arg(required = true)]
    files: Vec<String>,

    /// Keep whitespace-only text nodes from the input.
    #[arg(long)]
    preserve_whitespace: bool,

    /// Minify: suppress all injected line breaks and indentation.
    #[arg(long, conflicts_with = "format")]
    minify: bool,

    /// Pretty-print (indent) the output. This is the default.
    #[arg(long)]
    format: bool,

    /// Remove namespace declarations duplicating an ancestor's.
    #[arg(long = "omit-dup-ns")]
    omit_dup_ns: bool,

    /// Save output to a file (with an XML declaration) instead of stdout.
    #[arg(long, value_name = "FILE")]
    output: Option<String>,
}

const EXIT_SUCCESS: u8 = 0;
const EXIT_PARSE_ERROR: u8 = 1;
const EXIT_WRITE_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut worst_exit = EXIT_SUCCESS;

    for file in &cli.files {
        let exit = process_file(&cli, file);
        if exit > worst_exit {
            worst_exit = exit;
        }
    }

    ExitCode::from(worst_exit)
}

/// Processes a single input file and returns an exit code.
fn process_file(cli: &Cli, filename: &str) -> u8 {
    let input = match read_input(filename) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("{filename}: failed to read: {e}");
            return EXIT_PARSE_ERROR;
        }
    };

    let parse_opts = ParseOptions::default().preserve_whitespace(cli.preserve_whitespace);
    let doc = match Document::parse_str_with_options(&input, &parse_opts) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{filename}: {e}");
            return EXIT_PARSE_ERROR;
        }
    };

    let save_opts = SaveOptions::default()
        .disable_formatting(cli.minify)
        .omit_duplicate_namespaces(cli.omit_dup_ns);

    match &cli.output {
        Some(path) => {
            let root = doc.root();
            if let Err(e) = xylo::serial::save_to_file_with_options(&doc, root, path, save_opts) {
                eprintln!("{path}: {e}");
                return EXIT_WRITE_ERROR;
            }
        }
        None => {
            println!("{}", serialize_document_with_options(&doc, save_opts));
        }
    }

    EXIT_SUCCESS
}

/// Reads a file, or stdin when the name is `-`.
fn read_input(filename: &str) -> io::Result<String> {
    if filename == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        let bytes = std::fs::read(filename)?;
        xylo::encoding::decode_to_utf8(&bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.message))
    }
}
