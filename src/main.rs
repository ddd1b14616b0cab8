use std::io::{self, BufRead};
use std::path::Path;
use std::process;
use tally::config::Config;
use tally::export::{ProgramSnapshot, read_snapshot_from_json, write_snapshot_to_json};
use tally::{Engine, Keypad};

/// Maps ASCII spellings onto the labels printed on the keypad.
fn keypad_label(token: &str) -> &str {
    match token {
        "-" => "−",
        "*" | "x" => "×",
        "/" => "÷",
        "sqrt" => "√",
        "pi" => "π",
        other => other,
    }
}

fn is_digit_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Applies one whitespace-separated token of input to the keypad.
fn handle_token(keypad: &mut Keypad, token: &str, config: &Config) {
    if is_digit_token(token) {
        for c in token.chars() {
            keypad.touch_digit(c.encode_utf8(&mut [0; 4]));
        }
        return;
    }

    match token {
        "C" | "clear" => keypad.clear(),
        "program" => println!("{}", keypad.engine().program()),
        "help" => {
            let mut symbols: Vec<&str> = Engine::symbols().collect();
            symbols.sort_unstable();
            println!("operators: {}", symbols.join(" "));
            println!("commands: C clear program save load help");
            println!("save records operator presses only; a number still being typed is left out");
        }
        "save" => {
            if keypad.is_typing() {
                log::debug!(
                    "Saving without uncommitted display text '{}'",
                    keypad.display()
                );
            }
            let snapshot = ProgramSnapshot::capture(keypad.engine());
            if let Err(e) = write_snapshot_to_json(&snapshot, Path::new(&config.program_file)) {
                log::error!("Failed to save program: {}", e);
            }
        }
        "load" => match read_snapshot_from_json(Path::new(&config.program_file)) {
            Ok(snapshot) => {
                let result = snapshot.restore(keypad.engine_mut());
                keypad.set_display_value(result);
            }
            Err(e) => log::error!("Failed to load program: {}", e),
        },
        symbol => {
            if let Err(e) = keypad.touch_operation(keypad_label(symbol)) {
                eprintln!("error: {}", e);
            }
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Booting tally...");

    let config = match Config::load_or_default(Path::new("config.toml")) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        log::error!("Invalid configuration: {}", e);
        process::exit(1);
    }

    let mut keypad = Keypad::new();
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                process::exit(1);
            }
        };

        for token in line.split_whitespace() {
            handle_token(&mut keypad, token, &config);
        }
        println!("{}", keypad.display());
        if config.echo_program {
            println!("  [{}]", keypad.engine().program());
        }
    }
}
