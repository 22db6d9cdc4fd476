//! Provides logged read/write/delete primitives over the Windows registry.
//!
//! All paths are relative to an explicit hive so the same routines serve
//! per-user (HKCU) and all-users (HKLM) installs. Deletions treat missing
//! keys and values as already clean.

use std::io;

use log::{debug, warn};
use winreg::enums::{
    HKEY_CLASSES_ROOT, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ, KEY_SET_VALUE,
};
use winreg::{RegKey, HKEY};

fn hive_name(hive: HKEY) -> &'static str {
    if hive == HKEY_LOCAL_MACHINE {
        "HKLM"
    } else if hive == HKEY_CURRENT_USER {
        "HKCU"
    } else if hive == HKEY_CLASSES_ROOT {
        "HKCR"
    } else {
        "HKEY"
    }
}

fn value_display(name: &str) -> &str {
    if name.is_empty() {
        "(Default)"
    } else {
        name
    }
}

/// Creates (or opens) `path` under `hive` and writes a string value.
///
/// An empty `name` writes the key's default value.
pub fn set_str(hive: HKEY, path: &str, name: &str, data: &str) -> io::Result<()> {
    debug!(
        r"write {}\{} \ {} = {}",
        hive_name(hive),
        path,
        value_display(name),
        data
    );
    let (key, _) = RegKey::predef(hive).create_subkey(path).map_err(|e| {
        warn!(r"failed to open {}\{}: {}", hive_name(hive), path, e);
        e
    })?;
    key.set_value(name, &data).map_err(|e| {
        warn!(
            r"failed to write {}\{} \ {}: {}",
            hive_name(hive),
            path,
            value_display(name),
            e
        );
        e
    })
}

/// Reads a string value from `path` under `hive`.
///
/// An empty `name` reads the key's default value.
pub fn read_str(hive: HKEY, path: &str, name: &str) -> io::Result<String> {
    RegKey::predef(hive).open_subkey(path)?.get_value(name)
}

/// Deletes `path` and everything beneath it. A missing key is success.
pub fn delete_tree(hive: HKEY, path: &str) -> io::Result<()> {
    match RegKey::predef(hive).delete_subkey_all(path) {
        Ok(()) => {
            debug!(r"removed key tree {}\{}", hive_name(hive), path);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            warn!(r"failed to remove {}\{}: {}", hive_name(hive), path, e);
            Err(e)
        }
    }
}

/// Deletes a single value from `path`. A missing key or value is success.
pub fn delete_value(hive: HKEY, path: &str, name: &str) -> io::Result<()> {
    let key = match RegKey::predef(hive).open_subkey_with_flags(path, KEY_READ | KEY_SET_VALUE) {
        Ok(key) => key,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };
    match key.delete_value(name) {
        Ok(()) => {
            debug!(r"removed value {}\{} \ {}", hive_name(hive), path, name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            warn!(
                r"failed to remove value {}\{} \ {}: {}",
                hive_name(hive),
                path,
                name,
                e
            );
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hive_names() {
        assert_eq!(hive_name(HKEY_LOCAL_MACHINE), "HKLM");
        assert_eq!(hive_name(HKEY_CURRENT_USER), "HKCU");
        assert_eq!(hive_name(HKEY_CLASSES_ROOT), "HKCR");
    }

    #[test]
    fn test_value_display_default() {
        assert_eq!(value_display(""), "(Default)");
        assert_eq!(value_display("ThreadingModel"), "ThreadingModel");
    }
}
