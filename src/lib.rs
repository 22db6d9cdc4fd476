//! Provides installer-side Windows Shell registration for the Quire document
//! viewer.
//!
//! Quire ships its preview and thumbnail handlers in a separate COM DLL; this
//! crate wires that DLL into the shell by mapping each supported document
//! extension to its handler CLSID in the registry, and unwires it again on
//! uninstall. It also answers whether the preview handler is currently
//! registered, which the installer uses to preselect options on upgrades.
//!
//! The handler implementations themselves live in the DLL, not here.
//!
//! # Install
//! ```text
//! quire-register install "C:\Program Files\Quire\QuirePreview.dll" --all-users
//! ```
//!
//! # Examples
//! ```
//! use quire_shellext::keys::{display_name, PREVIEWERS};
//!
//! assert!(PREVIEWERS.iter().any(|p| p.ext == ".epub"));
//! assert_eq!(display_name(".djvu"), "Quire Preview (*.djvu)");
//! ```

pub mod keys;
pub mod register;
pub mod registry;
pub mod shell;

pub use register::{install, is_installed, uninstall, ExtFilter};
