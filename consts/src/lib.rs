// SPDX-FileCopyrightText: 2024 Foundation Devices, Inc. <hello@foundation.xyz>
// SPDX-License-Identifier: GPL-3.0-or-later

#![cfg_attr(not(test), no_std)]

/// ESP-IDF commit the patch set is written against.
/// The IDF checkout is hard reset to this revision before the patch is applied.
pub const IDF_COMMIT: &str = "35b20cadce65ce79c14cf2018efc87c44d71ab21";

/// Remote fetched before checking out [`IDF_COMMIT`].
pub const IDF_REMOTE: &str = "origin";

/// Patch file applied with `git apply`, relative to the patch directory.
pub const IDF_PATCH_FILE: &str = "idf_patch.patch";

/// IDF install script, relative to the IDF checkout.
pub const IDF_INSTALL_SCRIPT: &str = "./install.sh";

/// Prebuilt files copied over the patched IDF tree once the install script has run.
/// Each entry is relative to both the patch directory (source) and the IDF checkout (destination).
/// `git apply` cannot carry these, the PHY libraries are binary archives.
pub const BINARY_PATCH_LIST: [&str; 3] = [
    "components/esp_phy/Kconfig",
    "components/esp_phy/lib/esp32s3/libbtbb.a",
    "components/esp_phy/lib/esp32s3/libphy.a",
];

/// Host operating systems the patch applier refuses to run on, as reported by
/// `std::env::consts::OS`. Compared case-insensitively.
pub const UNSUPPORTED_PLATFORMS: [&str; 1] = ["windows"];

/// Returns `false` when `os` is listed in [`UNSUPPORTED_PLATFORMS`].
pub fn is_supported_platform(os: &str) -> bool {
    !UNSUPPORTED_PLATFORMS
        .iter()
        .any(|unsupported| unsupported.eq_ignore_ascii_case(os))
}
