//! Build script for mycontroller-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates controller.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const COLORS: [&str; 5] = ["black", "green", "blue", "yellow", "red"];
const MAX_BUTTONS: usize = 16;
const MAX_CODE_LEN: usize = 32;
const MAX_LABEL_LEN: usize = 16;

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

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}

/// Validate controller.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=controller.toml");

    let config_path = Path::new("controller.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: controller.toml not found!                               ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds controller.toml as its button layout.       ║\n\
            ║  Please create one in the mycontroller-firmware directory.       ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read controller.toml                           ║\n\
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
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in controller.toml                   ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_router(&config, &mut errors);
    validate_setup(&config, &mut errors);
    validate_buttons(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid controller.toml                                  ║\n\
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

    println!("cargo:warning=controller.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only the sections the firmware parser understands
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };
    for key in table.keys() {
        if !["router", "setup", "button"].contains(&key.as_str()) {
            errors.push(format!("unknown section [{}]", key));
        }
    }
}

fn validate_router(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(router) = config.get("router") else {
        return;
    };
    for (key, value) in router.as_table().into_iter().flatten() {
        match (key.as_str(), value) {
            ("tick_ms", toml::Value::Integer(ms)) if (1..=1000).contains(ms) => {}
            ("tick_ms", _) => errors.push("[router] tick_ms must be 1-1000".into()),
            _ => errors.push(format!("[router] unknown key '{}'", key)),
        }
    }
}

fn validate_setup(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(setup) = config.get("setup") else {
        return;
    };
    for (key, value) in setup.as_table().into_iter().flatten() {
        match (key.as_str(), value) {
            ("confirmation", toml::Value::String(mode))
                if mode == "required" || mode == "none" => {}
            ("confirmation", _) => {
                errors.push("[setup] confirmation must be 'required' or 'none'".into())
            }
            ("enabled", toml::Value::Boolean(_)) => {}
            ("enabled", _) => errors.push("[setup] enabled must be a boolean".into()),
            _ => errors.push(format!("[setup] unknown key '{}'", key)),
        }
    }
}

fn validate_buttons(config: &toml::Value, errors: &mut Vec<String>) {
    let buttons = match config.get("button") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[button.*] must be tables".into());
            return;
        }
        None => return,
    };

    if buttons.len() > MAX_BUTTONS {
        errors.push(format!("at most {} buttons are supported", MAX_BUTTONS));
    }

    for (code, button) in buttons {
        if code.len() > MAX_CODE_LEN {
            errors.push(format!("[button.{}] code longer than {}", code, MAX_CODE_LEN));
        }
        if code.contains(';') || code.contains('=') {
            errors.push(format!("[button.{}] code must not contain ';' or '='", code));
        }

        let Some(button) = button.as_table() else {
            errors.push(format!("[button.{}] must be a table", code));
            continue;
        };

        for (key, value) in button {
            match (key.as_str(), value) {
                ("visible", toml::Value::Boolean(_)) => {}
                ("color", toml::Value::String(color)) if COLORS.contains(&color.as_str()) => {}
                ("color", _) => errors.push(format!(
                    "[button.{}] color must be one of {}",
                    code,
                    COLORS.join(", ")
                )),
                ("label", toml::Value::String(label)) if label.len() <= MAX_LABEL_LEN => {}
                // Formatted into the same fixed-size label at boot
                ("label", toml::Value::Integer(number))
                    if number.to_string().len() <= MAX_LABEL_LEN => {}
                ("label", _) => errors.push(format!(
                    "[button.{}] label must be text of at most {} bytes",
                    code, MAX_LABEL_LEN
                )),
                (_, value) if key == "visible" => errors.push(format!(
                    "[button.{}] visible must be a boolean, got {}",
                    code,
                    value.type_str()
                )),
                _ => errors.push(format!("[button.{}] unknown key '{}'", code, key)),
            }
        }
    }
}
