//! Integration tests for the registration tables and key formatting.
//!
//! These exercise the pure parts of registration: the previewer table, the
//! registry path builders, and the extension filter. Nothing here touches
//! the registry, so the tests run anywhere, including CI.

use std::collections::HashSet;

use quire_shellext::keys::{
    self, braced, clsid_key, display_name, inproc_server_key, shellex_key, PREVIEWERS,
};
use quire_shellext::register::ExtFilter;

// ===========================================================================
// Previewer table invariants
// ===========================================================================

#[test]
fn test_table_extensions_are_dotted_and_lowercase() {
    for previewer in PREVIEWERS {
        for ext in previewer.extensions() {
            assert!(ext.starts_with('.'), "{ext} must start with a dot");
            assert_eq!(ext, ext.to_lowercase(), "{ext} must be lowercase");
            assert!(ext.len() > 1, "{ext} must name an extension");
        }
    }
}

#[test]
fn test_table_has_no_duplicate_extensions() {
    let mut seen = HashSet::new();
    for previewer in PREVIEWERS {
        for ext in previewer.extensions() {
            assert!(seen.insert(ext), "{ext} is bound twice");
        }
    }
}

#[test]
fn test_table_contains_reference_extension() {
    // .pdf is the extension probed by register::is_installed.
    let pdf = PREVIEWERS.iter().find(|p| p.ext == ".pdf").unwrap();
    assert_eq!(braced(&pdf.clsid), braced(&keys::CLSID_PDF_PREVIEW));
    assert_eq!(pdf.ext2, None);
}

#[test]
fn test_comic_formats_share_one_clsid() {
    let comic_exts = [".cbz", ".cbr", ".cb7", ".cbt"];
    for ext in comic_exts {
        let previewer = PREVIEWERS.iter().find(|p| p.ext == ext).unwrap();
        assert_eq!(braced(&previewer.clsid), braced(&keys::CLSID_CBX_PREVIEW));
    }
}

#[test]
fn test_product_clsids_are_distinct() {
    let clsids: HashSet<String> = PREVIEWERS.iter().map(|p| braced(&p.clsid)).collect();
    // 11 table rows collapse to 8 handlers: the four comic formats share one.
    assert_eq!(clsids.len(), 8);
}

#[test]
fn test_product_clsids_avoid_fixed_shell_guids() {
    let fixed = [
        keys::SHELLEX_THUMBNAIL_HANDLER,
        keys::SHELLEX_EXTRACT_IMAGE,
        keys::SHELLEX_PREVIEW_HANDLER,
        keys::APPID_PREVHOST,
        keys::APPID_PREVHOST_WOW64,
    ];
    for previewer in PREVIEWERS {
        let clsid = braced(&previewer.clsid);
        for guid in fixed {
            assert!(!clsid.eq_ignore_ascii_case(guid));
        }
    }
}

// ===========================================================================
// Key path and name formatting
// ===========================================================================

#[test]
fn test_display_name_format() {
    assert_eq!(display_name(".pdf"), "Quire Preview (*.pdf)");
    assert_eq!(display_name(".fb2z"), "Quire Preview (*.fb2z)");
}

#[test]
fn test_shellex_paths_for_full_table() {
    for previewer in PREVIEWERS {
        for ext in previewer.extensions() {
            let path = shellex_key(ext, keys::SHELLEX_PREVIEW_HANDLER);
            assert_eq!(
                path,
                format!(
                    r"Software\Classes\{ext}\shellex\{}",
                    keys::SHELLEX_PREVIEW_HANDLER
                )
            );
        }
    }
}

#[test]
fn test_clsid_paths_nest() {
    for previewer in PREVIEWERS {
        let class = clsid_key(&previewer.clsid);
        let inproc = inproc_server_key(&previewer.clsid);
        assert!(inproc.starts_with(&class));
        assert!(inproc.ends_with(r"\InProcServer32"));
    }
}

#[test]
fn test_braced_guid_shape() {
    let written = braced(&keys::CLSID_PDF_PREVIEW);
    assert_eq!(written.len(), 38);
    assert!(written.starts_with('{') && written.ends_with('}'));
    for pos in [9, 14, 19, 24] {
        assert_eq!(written.as_bytes()[pos], b'-');
    }
}

// ===========================================================================
// Extension filter against the real table
// ===========================================================================

#[test]
fn test_filter_selects_subset_of_table() {
    let filter = ExtFilter::parse("exts:pdf,cbz,cbr").unwrap();
    let selected: Vec<&str> = PREVIEWERS
        .iter()
        .filter(|p| filter.allows(p))
        .map(|p| p.ext)
        .collect();
    assert_eq!(selected, vec![".pdf", ".cbz", ".cbr"]);
}

#[test]
fn test_filter_with_dotted_names_matches_table() {
    let filter = ExtFilter::parse("exts:.epub;.mobi").unwrap();
    let selected: Vec<&str> = PREVIEWERS
        .iter()
        .filter(|p| filter.allows(p))
        .map(|p| p.ext)
        .collect();
    assert_eq!(selected, vec![".epub", ".mobi"]);
}

#[test]
fn test_filter_unknown_extensions_select_nothing() {
    let filter = ExtFilter::parse("exts:doc,docx").unwrap();
    assert!(PREVIEWERS.iter().all(|p| !filter.allows(p)));
}
