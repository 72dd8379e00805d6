use std::env;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};

use crate::{
    Error, Options, RepairLogEntry, RepairOutcome, RepairPass, Repairer, compress,
    compress_escaped, format_embedded, url_params_to_json,
};

fn print_help(program: &str) {
    eprintln!(
        "Usage: {prog} [OPTIONS] [INPUT]\n\
         \n\
         INPUT: optional input file. When omitted, reads from stdin.\n\
         \n\
         Repairs almost-JSON into valid, pretty-printed JSON. Exit code 1\n\
         when the input cannot be repaired (except with --report).\n\
         \n\
         Options:\n\
           -o, --output FILE      Write output to FILE (default stdout)\n\
               --in-place         Overwrite INPUT file with the result\n\
               --report           Emit the full JSON report instead of the\n\
                                  document; exits 0 even on failure\n\
               --log              Print applied fixes to stderr\n\
               --compress         Minify the result onto one line\n\
               --escape-quotes    Minify and escape double quotes\n\
               --extract          Format JSON fragments embedded in text,\n\
                                  leaving the rest untouched (no repair)\n\
               --from-url-params  Convert an URL query string to JSON\n\
               --no-fallback      Skip the lenient fallback library\n\
               --no-hash-comments Do not treat # as a line comment\n\
               --no-fullwidth     Keep full-width punctuation as-is\n\
           -h, --help             Show this help\n",
        prog = program
    );
}

struct CliMode {
    input: Option<String>,
    output: Option<String>,
    in_place: bool,
    report: bool,
    log: bool,
    compress: bool,
    escape_quotes: bool,
    extract: bool,
    from_url_params: bool,
}

fn parse_args() -> (Options, CliMode) {
    let mut args: Vec<String> = env::args().collect();
    let program = args
        .first()
        .cloned()
        .unwrap_or_else(|| "jsonmend".to_string());
    args.remove(0);

    let mut opts = Options::default();
    let mut mode = CliMode {
        input: None,
        output: None,
        in_place: false,
        report: false,
        log: false,
        compress: false,
        escape_quotes: false,
        extract: false,
        from_url_params: false,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help(&program);
                std::process::exit(0);
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Missing FILE for --output");
                    std::process::exit(2);
                }
                mode.output = Some(args[i].clone());
            }
            "--in-place" => {
                mode.in_place = true;
            }
            "--report" => {
                mode.report = true;
            }
            "--log" => {
                mode.log = true;
            }
            "--compress" => {
                mode.compress = true;
            }
            "--escape-quotes" => {
                mode.compress = true;
                mode.escape_quotes = true;
            }
            "--extract" => {
                mode.extract = true;
            }
            "--from-url-params" => {
                mode.from_url_params = true;
            }
            "--no-fallback" => {
                opts.use_fallback = false;
            }
            "--no-hash-comments" => {
                opts.tolerate_hash_comments = false;
            }
            "--no-fullwidth" => {
                opts.normalize_fullwidth = false;
            }
            s if s.starts_with('-') => {
                eprintln!("Unknown option: {}", s);
                std::process::exit(2);
            }
            path => {
                mode.input = Some(path.to_string());
            }
        }
        i += 1;
    }

    if mode.in_place && mode.input.is_none() {
        eprintln!("--in-place requires an INPUT file");
        std::process::exit(2);
    }

    (opts, mode)
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (opts, mode) = parse_args();

    let content = match &mode.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let output = if mode.from_url_params {
        url_params_to_json(content.trim())
    } else if mode.extract {
        format_embedded(&content)
    } else {
        repair_output(&content, opts, &mode)?
    };

    if mode.in_place {
        // parse_args guarantees input is set here
        if let Some(path) = &mode.input {
            fs::write(path, with_newline(output))?;
        }
        return Ok(());
    }
    let mut writer: Box<dyn Write> = match &mode.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };
    writer.write_all(with_newline(output).as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn repair_output(content: &str, opts: Options, mode: &CliMode) -> Result<String, Box<dyn std::error::Error>> {
    let repairer = Repairer::new(opts);
    let outcome = if mode.log {
        let (outcome, entries) = repairer.repair_with_log(content);
        print_log(&entries);
        outcome
    } else {
        repairer.repair(content)
    };

    if mode.report {
        return Ok(serde_json::to_string_pretty(&outcome.report())?);
    }

    let text = match outcome {
        RepairOutcome::Unchanged { formatted } => formatted,
        RepairOutcome::Repaired { repaired, .. } => repaired,
        RepairOutcome::Failed { diagnostic, .. } => {
            return Err(Error::Unrepairable(diagnostic).into());
        }
    };

    if mode.escape_quotes {
        Ok(compress_escaped(&text)?)
    } else if mode.compress {
        Ok(compress(&text)?)
    } else {
        Ok(text)
    }
}

fn print_log(entries: &[RepairLogEntry]) {
    for entry in entries {
        let pass = match entry.pass {
            RepairPass::Normalize => "normalize",
            RepairPass::Structural => "structural",
            RepairPass::Fallback => "fallback",
        };
        if entry.detail.is_empty() {
            eprintln!("[{pass}] {}", entry.message);
        } else {
            eprintln!("[{pass}] {}: {}", entry.message, entry.detail);
        }
    }
}

fn with_newline(mut s: String) -> String {
    if !s.ends_with('\n') {
        s.push('\n');
    }
    s
}
