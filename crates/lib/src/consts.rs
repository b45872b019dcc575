pub const APP_NAME: &str = "nativedist";

/// GN output directory, relative to each project's source tree
pub const GN_OUT_DIR: &str = "gn_out";

/// Pinned source revisions, relative to the workspace root
pub const VERSIONS_FILE: &str = "build-versions.json";

/// Distribution root, relative to the workspace root
pub const DIST_DIR: &str = "dist";

pub const DEPOT_TOOLS_DIR: &str = "depot_tools";
pub const DEPOT_TOOLS_URL: &str = "https://chromium.googlesource.com/chromium/tools/depot_tools.git";

pub const CHROMIUM_URI: &str = "https://chromium.googlesource.com";

pub const ENV_TARGET_OS: &str = "TARGET_OS";
pub const ENV_TARGET_ARCH: &str = "TARGET_ARCH";
pub const ENV_CLANG_BASE_PATH: &str = "CLANG_BASE_PATH";
pub const ENV_V8_POINTER_COMPRESSION: &str = "V8_ENABLE_POINTER_COMPRESSION";
