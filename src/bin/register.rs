//! Provides the `quire-register` tool for managing shell handler registration.
//!
//! Usage: `quire-register <command> [options]`
//!
//! Run by the Quire installer, but usable by hand for repair and diagnosis.
//!
//! # Examples
//! ```text
//! quire-register install "C:\Program Files\Quire\QuirePreview.dll" --all-users
//! quire-register install QuirePreview.dll exts:pdf,djvu
//! quire-register uninstall
//! quire-register status
//! ```

use std::process;

use log::LevelFilter;
use simple_logger::SimpleLogger;

use quire_shellext::register::{self, ExtFilter};

fn main() {
    let _ = SimpleLogger::new().with_level(LevelFilter::Info).init();

    let args: Vec<String> = std::env::args().collect();

    let command = match args.get(1) {
        Some(command) => command.as_str(),
        None => usage(&args[0]),
    };

    match command {
        "install" => {
            let mut dll_path = None;
            let mut all_users = false;
            let mut filter = None;

            for arg in &args[2..] {
                if arg == "--all-users" {
                    all_users = true;
                } else if let Some(parsed) = ExtFilter::parse(arg) {
                    filter = Some(parsed);
                } else if dll_path.is_none() {
                    dll_path = Some(arg.as_str());
                } else {
                    eprintln!("Error: unexpected argument: {arg}");
                    usage(&args[0]);
                }
            }

            let Some(dll_path) = dll_path else {
                eprintln!("Error: missing <dll_path>");
                usage(&args[0]);
            };

            if let Err(e) = register::install(dll_path, all_users, filter.as_ref()) {
                eprintln!("Error: install failed: {e}");
                process::exit(1);
            }
            eprintln!(
                "Registered Quire preview handlers{}",
                if all_users { " for all users" } else { "" }
            );
        }
        "uninstall" => {
            if let Err(e) = register::uninstall() {
                eprintln!("Error: uninstall failed: {e}");
                process::exit(1);
            }
            eprintln!("Unregistered Quire preview handlers");
        }
        "status" => {
            if register::is_installed() {
                println!("installed");
            } else {
                println!("not installed");
                process::exit(1);
            }
        }
        _ => {
            eprintln!("Error: unknown command: {command}");
            usage(&args[0]);
        }
    }
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  install <dll_path> [--all-users] [exts:<list>]");
    eprintln!("      Register the preview/thumbnail handlers exported by <dll_path>.");
    eprintln!("      exts:pdf,djvu restricts registration to the named extensions.");
    eprintln!("  uninstall");
    eprintln!("      Remove all handler registrations, per-user and machine-wide.");
    eprintln!("  status");
    eprintln!("      Report whether the preview handler is registered (exit 1 if not).");
    process::exit(1);
}
