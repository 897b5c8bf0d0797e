//! Build script for detent-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates encoder.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Number of user GPIO pins on the RP2040
const GPIO_COUNT: i64 = 30;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate encoder.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=encoder.toml");

    let config_path = Path::new("encoder.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: encoder.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires an encoder.toml configuration file.       ║\n\
            ║  Please create one in the detent-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read encoder.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in encoder.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let errors = validate_encoder(&config);
    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid encoder configuration                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=encoder.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            // Cut on a char boundary; toml errors quote the offending text
            let truncated = match line.char_indices().nth(61) {
                Some((end, _)) if line.chars().count() > 64 => format!("{}...", &line[..end]),
                _ => line.to_string(),
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check the `[encoder]` table; returns one message per problem
fn validate_encoder(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let table = match config.as_table() {
        Some(t) => t,
        None => return vec!["Config must be a table".to_string()],
    };

    for key in table.keys() {
        if key != "encoder" {
            errors.push(format!("Unexpected section [{}]", key));
        }
    }

    let encoder = match table.get("encoder") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[encoder] must be a table".to_string());
            return errors;
        }
        None => {
            errors.push("Missing [encoder] section".to_string());
            return errors;
        }
    };

    for key in encoder.keys() {
        if !matches!(key.as_str(), "pin_a" | "pin_b" | "min" | "max" | "start") {
            errors.push(format!("[encoder] unknown key '{}'", key));
        }
    }

    let pin_a = check_pin(encoder, "pin_a", &mut errors);
    let pin_b = check_pin(encoder, "pin_b", &mut errors);
    if let (Some(a), Some(b)) = (pin_a, pin_b) {
        if a == b {
            errors.push(format!("[encoder] pin_a and pin_b both use gpio{}", a));
        }
    }

    let min = check_int(encoder, "min", &mut errors).unwrap_or(i32::MIN as i64);
    let max = check_int(encoder, "max", &mut errors).unwrap_or(i32::MAX as i64);
    let start = check_int(encoder, "start", &mut errors).unwrap_or(0);

    if min > max {
        errors.push(format!("[encoder] min ({}) exceeds max ({})", min, max));
    } else if start < min || start > max {
        errors.push(format!("[encoder] start ({}) outside {}..={}", start, min, max));
    }

    errors
}

/// Validate a pin string, returning its GPIO number
fn check_pin(table: &toml::value::Table, key: &str, errors: &mut Vec<String>) -> Option<i64> {
    let value = match table.get(key) {
        Some(toml::Value::String(s)) => s,
        Some(_) => {
            errors.push(format!("[encoder] {} must be a string", key));
            return None;
        }
        None => {
            errors.push(format!("[encoder] missing '{}'", key));
            return None;
        }
    };

    let number = value
        .trim_start_matches(['!', '^'])
        .strip_prefix("gpio")
        .and_then(|n| n.parse::<i64>().ok());

    match number {
        Some(n) if (0..GPIO_COUNT).contains(&n) => Some(n),
        _ => {
            errors.push(format!("[encoder] {} '{}' is not gpio0-gpio29", key, value));
            None
        }
    }
}

/// Validate an optional 32-bit integer
fn check_int(table: &toml::value::Table, key: &str, errors: &mut Vec<String>) -> Option<i64> {
    match table.get(key) {
        Some(toml::Value::Integer(n)) if i32::try_from(*n).is_ok() => Some(*n),
        Some(_) => {
            errors.push(format!("[encoder] {} must be a 32-bit integer", key));
            None
        }
        None => None,
    }
}
