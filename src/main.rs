use chordsheet::{transpose, FormatMode, RenderConfig};
use std::env;
use std::fs;
use std::process;

const USAGE: &str = "Usage: chordsheet [options] <input.cho> [output.txt]

Options:
  --transpose N     Shift chords by N semitones
  --to-key KEY      Shift chords to KEY (from the song's own key)
  --mode MODE       markup | above | inline | hidden (default: above)
  --no-blank-lines  Drop blank lines from display output
  --config FILE     Read render settings from a YAML file
  --json            Print the (transposed) song as JSON";

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

fn next_value<'a>(args: &mut impl Iterator<Item = &'a String>, flag: &str) -> &'a String {
    args.next()
        .unwrap_or_else(|| fail(&format!("Missing value for {}\n\n{}", flag, USAGE)))
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        fail(USAGE);
    }

    // Config file first, so flags can override it
    let mut config = match args.iter().position(|a| a == "--config") {
        Some(i) => {
            let path = args
                .get(i + 1)
                .unwrap_or_else(|| fail(&format!("Missing value for --config\n\n{}", USAGE)));
            RenderConfig::load(path).unwrap_or_else(|e| fail(&format!("{}", e)))
        }
        None => RenderConfig::default(),
    };

    let mut json = false;
    let mut paths: Vec<&String> = Vec::new();
    let mut iter = args.iter();

    // Parse flags
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--transpose" => {
                let value = next_value(&mut iter, arg);
                config.transpose = value
                    .parse()
                    .unwrap_or_else(|_| fail(&format!("Invalid transpose amount: {}", value)));
                config.to_key = None;
            }
            "--to-key" => {
                config.to_key = Some(next_value(&mut iter, arg).clone());
            }
            "--mode" => {
                let value = next_value(&mut iter, arg);
                config.format.mode = FormatMode::from_str(value)
                    .unwrap_or_else(|| fail(&format!("Unknown display mode: {}", value)));
            }
            "--no-blank-lines" => config.format.render_blank_lines = false,
            "--config" => {
                next_value(&mut iter, arg);
            }
            "--json" => json = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return;
            }
            flag if flag.starts_with("--") => fail(&format!("Unknown option: {}\n\n{}", flag, USAGE)),
            _ => paths.push(arg),
        }
    }

    let (input_path, output_path) = match paths.as_slice() {
        [input] => (*input, None),
        [input, output] => (*input, Some(*output)),
        _ => fail(USAGE),
    };

    if let Some(key) = &config.to_key {
        if chordsheet::Key::from_str(key).is_none() {
            fail(&format!("Invalid key: {}", key));
        }
    }

    // Read input file
    let source = match fs::read_to_string(input_path) {
        Ok(content) => content,
        Err(e) => fail(&format!("Error reading file '{}': {}", input_path, e)),
    };

    let doc = match chordsheet::parse(&source) {
        Ok(doc) => doc,
        Err(e) => fail(&format!("Preview unavailable: {}", e)),
    };

    let output = if json {
        let shifted = transpose(&doc, config.semitones_for(&doc));
        match serde_json::to_string_pretty(&shifted) {
            Ok(text) => text,
            Err(e) => fail(&format!("Error serializing song: {}", e)),
        }
    } else {
        config.render(&doc)
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &output) {
                fail(&format!("Error writing to '{}': {}", path, e));
            }
            eprintln!("Wrote {} to {}", input_path, path);
        }
        None => {
            println!("{}", output);
        }
    }
}
