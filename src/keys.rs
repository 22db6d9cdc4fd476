//! Defines the registry constants shared by the installer and the preview DLL.
//!
//! Everything the registration code writes is derived from the tables in this
//! module: the OS-defined shell extension category GUIDs, the prevhost
//! AppIDs, Quire's own handler CLSIDs, and the previewer table mapping file
//! extensions to CLSIDs.
//!
//! # Examples
//! ```
//! use quire_shellext::keys;
//!
//! assert!(keys::PREVIEWERS.iter().any(|p| p.ext == ".pdf"));
//! ```

use windows::core::GUID;

// ---------------------------------------------------------------------------
// Shell extension categories and host AppIDs (fixed OS values)
// ---------------------------------------------------------------------------

/// Shellex category under which the shell looks up `IThumbnailProvider`.
pub const SHELLEX_THUMBNAIL_HANDLER: &str = "{e357fccd-a995-4576-b01f-234630154e96}";

/// Shellex category for the pre-Vista `IExtractImage` API. Never written by
/// current installs; removed on uninstall because old releases wrote it.
pub const SHELLEX_EXTRACT_IMAGE: &str = "{bb2e617c-0920-11d1-9a0b-00c04fc2d6c1}";

/// Shellex category under which the shell looks up `IPreviewHandler`.
pub const SHELLEX_PREVIEW_HANDLER: &str = "{8895b1c6-b41f-4c1c-a562-0d564250836f}";

/// AppID of prevhost.exe, the surrogate that hosts preview handlers.
pub const APPID_PREVHOST: &str = "{6d2b5079-2f0b-48dd-ab7f-97cec514d30b}";

/// AppID of the 32-bit prevhost.exe used when running under WOW64.
pub const APPID_PREVHOST_WOW64: &str = "{534a1e02-d58f-44f0-b58b-36cbed287c7c}";

/// Registry key listing all installed preview handlers, relative to a hive.
pub const PREVIEW_HANDLERS_KEY: &str =
    r"Software\Microsoft\Windows\CurrentVersion\PreviewHandlers";

// ---------------------------------------------------------------------------
// Quire handler CLSIDs
// ---------------------------------------------------------------------------

/// CLSID of the PDF preview/thumbnail handler.
// {4A7E3E24-91D6-4C2E-9D5A-B7C30F1A6D42}
pub const CLSID_PDF_PREVIEW: GUID = GUID::from_u128(0x4a7e3e24_91d6_4c2e_9d5a_b7c30f1a6d42);

/// CLSID of the comic archive handler, shared by all comic extensions.
// {D2F5A1C8-0B3E-47A9-8E61-3C9D54B72F10}
pub const CLSID_CBX_PREVIEW: GUID = GUID::from_u128(0xd2f5a1c8_0b3e_47a9_8e61_3c9d54b72f10);

// {7B1C9E02-6F4D-4B8A-A3D7-52E80C964AEB}
pub const CLSID_TGA_PREVIEW: GUID = GUID::from_u128(0x7b1c9e02_6f4d_4b8a_a3d7_52e80c964aeb);

// {91D4B7F3-2A6C-45E1-B09E-6F7A18C5D234}
pub const CLSID_DJVU_PREVIEW: GUID = GUID::from_u128(0x91d4b7f3_2a6c_45e1_b09e_6f7a18c5d234);

// {3F8A20D1-7E5B-4C96-9A42-D01B6E9F7C85}
pub const CLSID_XPS_PREVIEW: GUID = GUID::from_u128(0x3f8a20d1_7e5b_4c96_9a42_d01b6e9f7c85);

// {C6E94B57-1D2F-4A83-BC70-48F3A9D1E562}
pub const CLSID_EPUB_PREVIEW: GUID = GUID::from_u128(0xc6e94b57_1d2f_4a83_bc70_48f3a9d1e562);

// {58D1F0A9-3C7E-4E25-8B9F-A46D20C7E391}
pub const CLSID_FB2_PREVIEW: GUID = GUID::from_u128(0x58d1f0a9_3c7e_4e25_8b9f_a46d20c7e391);

// {AF32C8E6-95B1-4D70-86C4-1E5F9D03B7A8}
pub const CLSID_MOBI_PREVIEW: GUID = GUID::from_u128(0xaf32c8e6_95b1_4d70_86c4_1e5f9d03b7a8);

// ---------------------------------------------------------------------------
// Previewer table
// ---------------------------------------------------------------------------

/// One registered handler: a CLSID bound to one or two file extensions.
///
/// # Examples
/// ```
/// use quire_shellext::keys::PREVIEWERS;
///
/// let xps = PREVIEWERS.iter().find(|p| p.ext == ".xps").unwrap();
/// assert_eq!(xps.ext2, Some(".oxps"));
/// ```
pub struct Previewer {
    /// CLSID the extensions are bound to.
    pub clsid: GUID,
    /// Primary extension, with leading dot.
    pub ext: &'static str,
    /// Optional secondary extension sharing the same CLSID.
    pub ext2: Option<&'static str>,
}

impl Previewer {
    /// Iterates the primary and (when present) secondary extension.
    ///
    /// # Examples
    /// ```
    /// use quire_shellext::keys::PREVIEWERS;
    ///
    /// let fb2 = PREVIEWERS.iter().find(|p| p.ext == ".fb2").unwrap();
    /// let exts: Vec<_> = fb2.extensions().collect();
    /// assert_eq!(exts, vec![".fb2", ".fb2z"]);
    /// ```
    pub fn extensions(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.ext).chain(self.ext2)
    }
}

/// Every handler Quire can register. The comic formats share one CLSID.
pub const PREVIEWERS: &[Previewer] = &[
    Previewer { clsid: CLSID_PDF_PREVIEW, ext: ".pdf", ext2: None },
    Previewer { clsid: CLSID_CBX_PREVIEW, ext: ".cbz", ext2: None },
    Previewer { clsid: CLSID_CBX_PREVIEW, ext: ".cbr", ext2: None },
    Previewer { clsid: CLSID_CBX_PREVIEW, ext: ".cb7", ext2: None },
    Previewer { clsid: CLSID_CBX_PREVIEW, ext: ".cbt", ext2: None },
    Previewer { clsid: CLSID_TGA_PREVIEW, ext: ".tga", ext2: None },
    Previewer { clsid: CLSID_DJVU_PREVIEW, ext: ".djvu", ext2: None },
    Previewer { clsid: CLSID_XPS_PREVIEW, ext: ".xps", ext2: Some(".oxps") },
    Previewer { clsid: CLSID_EPUB_PREVIEW, ext: ".epub", ext2: None },
    Previewer { clsid: CLSID_FB2_PREVIEW, ext: ".fb2", ext2: Some(".fb2z") },
    Previewer { clsid: CLSID_MOBI_PREVIEW, ext: ".mobi", ext2: None },
];

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Formats a GUID the way the registry expects it: braced, hyphenated.
///
/// Registry reads are compared case-insensitively, so the uppercase output
/// is safe to match against keys written by older installs.
///
/// # Examples
/// ```
/// use quire_shellext::keys::{braced, CLSID_PDF_PREVIEW};
///
/// assert_eq!(braced(&CLSID_PDF_PREVIEW), "{4A7E3E24-91D6-4C2E-9D5A-B7C30F1A6D42}");
/// ```
pub fn braced(clsid: &GUID) -> String {
    format!("{{{clsid:?}}}")
}

/// Builds the display name written next to a CLSID registration.
///
/// # Examples
/// ```
/// use quire_shellext::keys::display_name;
///
/// assert_eq!(display_name(".pdf"), "Quire Preview (*.pdf)");
/// ```
pub fn display_name(ext: &str) -> String {
    format!("Quire Preview (*{ext})")
}

/// Path of a CLSID class key, relative to a hive.
pub fn clsid_key(clsid: &GUID) -> String {
    format!(r"Software\Classes\CLSID\{}", braced(clsid))
}

/// Path of the InProcServer32 subkey of a CLSID class key.
pub fn inproc_server_key(clsid: &GUID) -> String {
    format!(r"Software\Classes\CLSID\{}\InProcServer32", braced(clsid))
}

/// Path of a shellex category binding under a file extension.
///
/// # Examples
/// ```
/// use quire_shellext::keys::{shellex_key, SHELLEX_PREVIEW_HANDLER};
///
/// assert_eq!(
///     shellex_key(".pdf", SHELLEX_PREVIEW_HANDLER),
///     r"Software\Classes\.pdf\shellex\{8895b1c6-b41f-4c1c-a562-0d564250836f}",
/// );
/// ```
pub fn shellex_key(ext: &str, catid: &str) -> String {
    format!(r"Software\Classes\{ext}\shellex\{catid}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_braced_format() {
        // Debug format uses uppercase for GUIDs
        assert_eq!(
            braced(&CLSID_CBX_PREVIEW),
            "{D2F5A1C8-0B3E-47A9-8E61-3C9D54B72F10}"
        );
    }

    #[test]
    fn test_clsid_key_paths() {
        let key = clsid_key(&CLSID_PDF_PREVIEW);
        assert_eq!(
            key,
            r"Software\Classes\CLSID\{4A7E3E24-91D6-4C2E-9D5A-B7C30F1A6D42}"
        );
        assert_eq!(inproc_server_key(&CLSID_PDF_PREVIEW), format!(r"{key}\InProcServer32"));
    }

    #[test]
    fn test_extensions_iterator() {
        let single = Previewer { clsid: CLSID_PDF_PREVIEW, ext: ".pdf", ext2: None };
        assert_eq!(single.extensions().collect::<Vec<_>>(), vec![".pdf"]);

        let double = Previewer { clsid: CLSID_XPS_PREVIEW, ext: ".xps", ext2: Some(".oxps") };
        assert_eq!(double.extensions().collect::<Vec<_>>(), vec![".xps", ".oxps"]);
    }
}
