//! V8 as a single monolithic static library.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::config::BuildConfig;
use crate::consts::{CHROMIUM_URI, GN_OUT_DIR};
use crate::copy::{copy_file_to_dir, copy_glob};
use crate::execute::{Context, Runner};
use crate::platform::{TargetArch, TargetOs};
use crate::sources::maybe_clone_repo;
use crate::toolchain::python;

use super::gn::{GnArgs, gn_gen, gn_list, ninja_build};
use super::{DistLayout, RecipeError};

const NDK_VERSION: &str = "r26c";
const NDK_CLANG: &str = "third_party/android_ndk/toolchains/llvm/prebuilt/linux-x86_64/bin/aarch64-linux-android24-clang++";

pub fn gn_args(config: &BuildConfig, asan: bool) -> Result<GnArgs, RecipeError> {
  let pointer_compression = config.require_v8_pointer_compression()?;

  let mut args = GnArgs::new();
  args
    .set("is_debug", false)
    .set("is_clang", true)
    .set("v8_monolithic", true)
    .set("v8_enable_pointer_compression", pointer_compression)
    .set("treat_warnings_as_errors", false)
    .set("clang_use_chrome_plugins", false)
    .set("is_component_build", false)
    // Keep debuginfo in the distributed static library small.
    .set("symbol_level", 1)
    .set("use_debug_fission", false)
    .set("v8_enable_sandbox", false)
    .set("v8_enable_javascript_promise_hooks", false)
    .set("v8_promise_internal_field_count", 1)
    .set("v8_use_external_startup_data", false)
    // Snapshot compression is left to the embedder.
    .set("v8_use_zlib", false)
    .set("v8_enable_snapshot_compression", false)
    .set("v8_enable_handle_zapping", false)
    // Typed arrays and ArrayBuffers always go through the embedder's
    // allocator so their backing stores keep fixed addresses.
    .set("v8_typed_array_max_size_in_heap", 0)
    .set("v8_array_buffer_internal_field_count", 2)
    .set("v8_array_buffer_view_internal_field_count", 2)
    // mksnapshot assumes a shared read-only heap otherwise.
    .set("v8_enable_verify_heap", false)
    .set("v8_enable_fuzztest", false)
    .set("v8_depend_on_icu_data_file", false)
    .set("icu_copy_icudata_to_root_build_dir", false);

  if config.target_os != TargetOs::Windows {
    args.set("simple_template_names", true);
  }

  if asan {
    args.set("is_asan", true);
  }

  // GN misdetects host_cpu when x86_64 binaries run on Apple Silicon.
  if config.target_os == TargetOs::MacOs && config.target_arch == TargetArch::Aarch64 {
    args.set("host_cpu", "arm64");
  }

  match config.target_arch {
    TargetArch::Aarch64 => {
      args.set("target_cpu", "arm64");
    }
    TargetArch::Arm => {
      args.set("target_cpu", "arm").set("v8_target_cpu", "arm");
    }
    TargetArch::I686 => {
      args.set("target_cpu", "x86");
    }
    TargetArch::X86_64 => {}
  }

  if !sysroots(config).is_empty() {
    args.set("use_sysroot", true);
  }

  if config.target_os == TargetOs::Android {
    let cpu = match config.target_arch {
      TargetArch::X86_64 | TargetArch::Aarch64 => config.target_arch.gn_cpu(),
      other => {
        return Err(RecipeError::Unsupported {
          project: "v8",
          reason: format!("Android builds are only supported for x86_64 and aarch64, not {}", other),
        });
      }
    };
    args
      .set("v8_target_cpu", cpu)
      .set("target_cpu", cpu)
      .set("target_os", "android");
  }

  Ok(args)
}

/// Debian sysroots needed to cross compile for the configured target.
///
/// Sysroots only exist for Linux-flavoured targets, so Apple and Windows
/// targets never need one.
pub fn sysroots(config: &BuildConfig) -> Vec<&'static str> {
  // Unlike the upstream build scripts, aarch64 macOS and Windows skip the arm64/amd64 sysroots.
  if !matches!(config.target_os, TargetOs::Linux | TargetOs::Android) {
    return Vec::new();
  }

  let mut wanted = match config.target_arch {
    TargetArch::Aarch64 => vec!["arm64", "amd64"],
    TargetArch::Arm => vec!["i386", "arm"],
    _ => Vec::new(),
  };

  if config.target_os == TargetOs::Android && config.target_arch == TargetArch::X86_64 {
    wanted.push("amd64");
  }
  wanted
}

/// Fetch everything the configured target needs on top of `gclient sync`.
pub fn prepare(src: &Context, runner: &mut dyn Runner, config: &BuildConfig) -> Result<(), RecipeError> {
  for arch in sysroots(config) {
    maybe_install_sysroot(src, runner, arch)?;
  }

  if config.target_os == TargetOs::Android {
    maybe_install_ndk(src, runner)?;
    maybe_clone_repo(
      src,
      runner,
      "./third_party/android_platform",
      &format!("{}/chromium/src/third_party/android_platform.git", CHROMIUM_URI),
    )?;
    maybe_clone_repo(
      src,
      runner,
      "./third_party/catapult",
      &format!("{}/catapult.git", CHROMIUM_URI),
    )?;
  }

  Ok(())
}

pub fn build(src: &Context, runner: &mut dyn Runner, args: &GnArgs) -> Result<(), RecipeError> {
  gn_gen(src, runner, args)?;
  gn_list(src, runner)?;
  ninja_build(src, runner, &["v8_monolith"])?;
  Ok(())
}

/// The monolith library plus public headers and their markdown docs.
pub fn install(src: &Context, layout: &DistLayout) -> Result<Vec<PathBuf>, RecipeError> {
  let obj = src.path(GN_OUT_DIR).join("obj");
  let lib = layout.lib_dir();
  let include = layout.include_dir();

  let mut installed = Vec::new();
  installed.extend(copy_file_to_dir(&obj.join("v8_monolith.lib"), &lib)?);
  installed.extend(copy_file_to_dir(&obj.join("libv8_monolith.a"), &lib)?);
  installed.extend(copy_glob(src.cwd(), "./include/**/*.h", &include)?);
  installed.extend(copy_glob(src.cwd(), "./include/**/*.md", &include)?);
  Ok(installed)
}

fn maybe_install_sysroot(src: &Context, runner: &mut dyn Runner, arch: &str) -> Result<(), RecipeError> {
  let sysroot = src.path(format!("build/linux/debian_sid_{}-sysroot", arch));
  if sysroot.is_dir() {
    return Ok(());
  }

  src.run(
    runner,
    python(),
    [
      "./build/linux/sysroot_scripts/install-sysroot.py".to_string(),
      format!("--arch={}", arch),
    ],
  )?;
  Ok(())
}

// NDK 23 and above no longer ship libgcc, so a matching NDK is installed
// into third_party/android_ndk when it is not already there.
fn maybe_install_ndk(src: &Context, runner: &mut dyn Runner) -> Result<(), RecipeError> {
  if src.path(NDK_CLANG).exists() {
    return Ok(());
  }

  let archive = format!("./third_party/android-ndk-{}-linux.zip", NDK_VERSION);
  let url = format!(
    "https://dl.google.com/android/repository/android-ndk-{}-linux.zip",
    NDK_VERSION
  );

  src.run(runner, "curl", ["-L", "-o", archive.as_str(), url.as_str()])?;
  src.run(runner, "unzip", ["-d", "./third_party/", "-o", "-q", archive.as_str()])?;

  let extracted = src.path(format!("third_party/android-ndk-{}", NDK_VERSION));
  let installed = src.path("third_party/android_ndk");
  if runner.is_dry_run() {
    info!(from = %extracted.display(), to = %installed.display(), "would move android ndk");
    return Ok(());
  }

  fs::rename(&extracted, &installed).map_err(|e| RecipeError::Io {
    path: extracted.clone(),
    source: e,
  })?;
  let archive_path = src.path(&archive);
  fs::remove_file(&archive_path).map_err(|e| RecipeError::Io {
    path: archive_path.clone(),
    source: e,
  })?;
  Ok(())
}
