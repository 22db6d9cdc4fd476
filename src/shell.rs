//! Shell-facing helpers used around registration.

use log::debug;
use windows::Win32::Foundation::BOOL;
use windows::Win32::System::Threading::{GetCurrentProcess, IsWow64Process};
use windows::Win32::UI::Shell::{SHChangeNotify, SHCNE_ASSOCCHANGED, SHCNF_IDLIST};

/// Tells Explorer that file associations changed so it drops cached handler
/// lookups and stale thumbnails.
pub fn notify_assoc_changed() {
    debug!("SHChangeNotify(SHCNE_ASSOCCHANGED)");
    unsafe { SHChangeNotify(SHCNE_ASSOCCHANGED, SHCNF_IDLIST, None, None) };
}

/// Reports whether the current process runs under WOW64.
///
/// Preview handlers registered from a 32-bit process on 64-bit Windows must
/// name the 32-bit prevhost AppID. A failed probe counts as not WOW64.
pub fn running_in_wow64() -> bool {
    let mut wow64 = BOOL::default();
    match unsafe { IsWow64Process(GetCurrentProcess(), &mut wow64) } {
        Ok(()) => wow64.as_bool(),
        Err(_) => false,
    }
}
