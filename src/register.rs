//! Implements installation, removal, and detection of Quire's shell handlers.
//!
//! Registration walks the previewer table in [`crate::keys`] and wires each
//! CLSID into the registry: the class key itself, its `InProcServer32`, the
//! shellex bindings under every supported extension, and the system-wide
//! `PreviewHandlers` list. Removal sweeps the same locations in both hives.
//!
//! None of this touches `OpenWith` lists or user file-type choices; only
//! Quire's own CLSIDs and handler bindings are written or removed.
//!
//! # Examples
//! ```
//! use quire_shellext::register::ExtFilter;
//!
//! let filter = ExtFilter::parse("exts:pdf,djvu").unwrap();
//! assert!(ExtFilter::parse("--all-users").is_none());
//! # let _ = filter;
//! ```

use std::io;

use log::{debug, info};
use winreg::enums::{HKEY_CLASSES_ROOT, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE};

use crate::keys::{self, Previewer};
use crate::{registry, shell};

/// Extension whose binding is probed to decide whether Quire is registered.
const REFERENCE_EXT: &str = ".pdf";

// ---------------------------------------------------------------------------
// Extension filter (installer command line)
// ---------------------------------------------------------------------------

/// Restricts which previewers [`install`] registers.
///
/// Parsed from an installer argument of the form `exts:<list>`, where the
/// list names extensions without their leading dot. Anything not listed is
/// skipped during installation; removal always sweeps the full table.
///
/// # Examples
/// ```
/// use quire_shellext::keys::PREVIEWERS;
/// use quire_shellext::register::ExtFilter;
///
/// let filter = ExtFilter::parse("exts:pdf;epub").unwrap();
/// let pdf = PREVIEWERS.iter().find(|p| p.ext == ".pdf").unwrap();
/// let tga = PREVIEWERS.iter().find(|p| p.ext == ".tga").unwrap();
/// assert!(filter.allows(pdf));
/// assert!(!filter.allows(tga));
/// ```
pub struct ExtFilter {
    exts: Vec<String>,
}

impl ExtFilter {
    /// Parses an `exts:` installer argument; returns `None` for anything else.
    ///
    /// The prefix is matched case-insensitively. The list is lowercased,
    /// truncated at the first `:`, and split on commas, semicolons, dots,
    /// and spaces, so `exts:.pdf;.djvu` and `exts:pdf,djvu` are equivalent.
    pub fn parse(arg: &str) -> Option<Self> {
        let prefix = arg.get(..5)?;
        if !prefix.eq_ignore_ascii_case("exts:") {
            return None;
        }
        let mut list = arg[5..].to_ascii_lowercase();
        if let Some(pos) = list.find(':') {
            list.truncate(pos);
        }
        let exts = list
            .split(&[',', ';', '.', ' '][..])
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();
        Some(Self { exts })
    }

    /// Reports whether the previewer's primary extension is selected.
    ///
    /// Secondary extensions are not consulted: selecting `xps` installs the
    /// `.oxps` binding too, while selecting `oxps` alone installs nothing.
    pub fn allows(&self, previewer: &Previewer) -> bool {
        let primary = previewer.ext.trim_start_matches('.');
        self.exts.iter().any(|ext| ext == primary)
    }
}

// ---------------------------------------------------------------------------
// Install / uninstall
// ---------------------------------------------------------------------------

/// Registers every previewer from the table, binding it to `dll_path`.
///
/// Writes to HKLM when `all_users` is set, HKCU otherwise. A filter limits
/// registration to the selected extensions. The first failed write aborts
/// and propagates; on success the shell is nudged about the changes.
///
/// # Errors
/// Returns the first registry error encountered. HKLM writes fail with
/// permission errors when the process is not elevated.
///
/// # Examples
/// ```no_run
/// use quire_shellext::register;
///
/// register::install(r"C:\Program Files\Quire\QuirePreview.dll", false, None)?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn install(dll_path: &str, all_users: bool, filter: Option<&ExtFilter>) -> io::Result<()> {
    let hive = if all_users {
        HKEY_LOCAL_MACHINE
    } else {
        HKEY_CURRENT_USER
    };
    let app_id = if shell::running_in_wow64() {
        keys::APPID_PREVHOST_WOW64
    } else {
        keys::APPID_PREVHOST
    };

    for previewer in keys::PREVIEWERS {
        if let Some(filter) = filter {
            if !filter.allows(previewer) {
                debug!("skipping {} (not selected)", previewer.ext);
                continue;
            }
        }

        let clsid = keys::braced(&previewer.clsid);
        let name = keys::display_name(previewer.ext);
        info!("registering {clsid} for {}", previewer.ext);

        let class_key = keys::clsid_key(&previewer.clsid);
        registry::set_str(hive, &class_key, "", &name)?;
        registry::set_str(hive, &class_key, "AppId", app_id)?;
        registry::set_str(hive, &class_key, "DisplayName", &name)?;

        let inproc_key = keys::inproc_server_key(&previewer.clsid);
        registry::set_str(hive, &inproc_key, "", dll_path)?;
        registry::set_str(hive, &inproc_key, "ThreadingModel", "Apartment")?;

        for ext in previewer.extensions() {
            let thumb = keys::shellex_key(ext, keys::SHELLEX_THUMBNAIL_HANDLER);
            registry::set_str(hive, &thumb, "", &clsid)?;
            let preview = keys::shellex_key(ext, keys::SHELLEX_PREVIEW_HANDLER);
            registry::set_str(hive, &preview, "", &clsid)?;
        }

        registry::set_str(hive, keys::PREVIEW_HANDLERS_KEY, &clsid, &name)?;
    }

    shell::notify_assoc_changed();
    Ok(())
}

/// Removes every previewer registration from both hives.
///
/// Older releases registered under HKLM, so both hives are swept regardless
/// of how the current install was made. HKLM removals are best-effort (they
/// need elevation); a failed HKCU removal marks the result as failed, but
/// the sweep continues so everything removable is removed.
///
/// # Errors
/// Returns an error when at least one per-user registration could not be
/// removed. Missing keys are not errors.
pub fn uninstall() -> io::Result<()> {
    let mut clean = true;

    for previewer in keys::PREVIEWERS {
        let clsid = keys::braced(&previewer.clsid);
        info!("unregistering {clsid} for {}", previewer.ext);

        let _ = registry::delete_value(HKEY_LOCAL_MACHINE, keys::PREVIEW_HANDLERS_KEY, &clsid);
        let _ = registry::delete_value(HKEY_CURRENT_USER, keys::PREVIEW_HANDLERS_KEY, &clsid);

        delete_from_both_hives(&keys::clsid_key(&previewer.clsid), &mut clean);

        for ext in previewer.extensions() {
            delete_from_both_hives(
                &keys::shellex_key(ext, keys::SHELLEX_THUMBNAIL_HANDLER),
                &mut clean,
            );
            delete_from_both_hives(
                &keys::shellex_key(ext, keys::SHELLEX_EXTRACT_IMAGE),
                &mut clean,
            );
            delete_from_both_hives(
                &keys::shellex_key(ext, keys::SHELLEX_PREVIEW_HANDLER),
                &mut clean,
            );
        }
    }

    shell::notify_assoc_changed();

    if clean {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::Other,
            "some per-user registrations could not be removed",
        ))
    }
}

fn delete_from_both_hives(path: &str, clean: &mut bool) {
    let _ = registry::delete_tree(HKEY_LOCAL_MACHINE, path);
    if registry::delete_tree(HKEY_CURRENT_USER, path).is_err() {
        *clean = false;
    }
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Reports whether the preview handler is registered for the reference
/// extension (`.pdf`).
///
/// Reads the merged HKCR view, so registrations in either hive are seen.
/// The value is compared case-insensitively against Quire's PDF CLSID;
/// another application's handler on `.pdf` reads as not installed.
pub fn is_installed() -> bool {
    let key = format!(
        r"{}\shellex\{}",
        REFERENCE_EXT,
        keys::SHELLEX_PREVIEW_HANDLER
    );
    let installed = match registry::read_str(HKEY_CLASSES_ROOT, &key, "") {
        Ok(value) => value
            .trim_matches(char::from(0))
            .eq_ignore_ascii_case(&keys::braced(&keys::CLSID_PDF_PREVIEW)),
        Err(_) => false,
    };
    info!("preview handler installed: {installed}");
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn previewer(ext: &'static str, ext2: Option<&'static str>) -> Previewer {
        Previewer {
            clsid: keys::CLSID_PDF_PREVIEW,
            ext,
            ext2,
        }
    }

    #[test]
    fn test_filter_requires_prefix() {
        assert!(ExtFilter::parse("pdf,djvu").is_none());
        assert!(ExtFilter::parse("--all-users").is_none());
        assert!(ExtFilter::parse("ext").is_none());
    }

    #[test]
    fn test_filter_prefix_case_insensitive() {
        let filter = ExtFilter::parse("EXTS:PDF").unwrap();
        assert!(filter.allows(&previewer(".pdf", None)));
    }

    #[test]
    fn test_filter_separators() {
        // Commas, semicolons, dots, and spaces all separate entries.
        let filter = ExtFilter::parse("exts:.pdf;djvu epub,tga").unwrap();
        assert!(filter.allows(&previewer(".pdf", None)));
        assert!(filter.allows(&previewer(".djvu", None)));
        assert!(filter.allows(&previewer(".epub", None)));
        assert!(filter.allows(&previewer(".tga", None)));
        assert!(!filter.allows(&previewer(".mobi", None)));
    }

    #[test]
    fn test_filter_stops_at_colon() {
        let filter = ExtFilter::parse("exts:pdf,djvu:epub").unwrap();
        assert!(filter.allows(&previewer(".pdf", None)));
        assert!(filter.allows(&previewer(".djvu", None)));
        assert!(!filter.allows(&previewer(".epub", None)));
    }

    #[test]
    fn test_filter_empty_list_excludes_everything() {
        let filter = ExtFilter::parse("exts:").unwrap();
        for p in keys::PREVIEWERS {
            assert!(!filter.allows(p), "{} should be excluded", p.ext);
        }
    }

    #[test]
    fn test_filter_matches_primary_extension_only() {
        let xps = previewer(".xps", Some(".oxps"));
        assert!(ExtFilter::parse("exts:xps").unwrap().allows(&xps));
        assert!(!ExtFilter::parse("exts:oxps").unwrap().allows(&xps));
    }
}
