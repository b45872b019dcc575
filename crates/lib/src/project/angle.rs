//! ANGLE: OpenGL ES on top of the platform's native graphics API.

use std::path::{Path, PathBuf};

use crate::config::BuildConfig;
use crate::consts::GN_OUT_DIR;
use crate::copy::{copy_file_to_dir, copy_tree};
use crate::execute::{Context, Runner};
use crate::platform::TargetOs;

use super::gn::{GnArgs, gn_gen, ninja_build};
use super::{DistLayout, RecipeError};

const TARGETS: &[&str] = &["libEGL", "libGLESv2"];

pub fn gn_args(config: &BuildConfig, asan: bool) -> Result<GnArgs, RecipeError> {
  let mut args = GnArgs::new();
  args
    .set("is_debug", false)
    .set("is_clang", true)
    // Static linking for distribution
    .set("is_component_build", false)
    .set("treat_warnings_as_errors", false)
    .set("clang_use_chrome_plugins", false)
    .set("symbol_level", 1)
    .set("use_debug_fission", false)
    .set("angle_enable_d3d9", false)
    .set("angle_enable_d3d11", false)
    .set("angle_enable_vulkan", false)
    .set("angle_enable_gl", false)
    .set("angle_enable_metal", false)
    .set("angle_enable_null", false)
    .set("angle_enable_swiftshader", false);

  if asan {
    args.set("is_asan", true);
  }

  match config.target_os {
    TargetOs::Windows => {
      args.set("target_os", "win").set("angle_enable_d3d11", true);
    }
    TargetOs::MacOs => {
      args.set("target_os", "mac").set("angle_enable_metal", true);
    }
    TargetOs::Ios => {
      args.set("target_os", "ios").set("angle_enable_metal", true);
    }
    TargetOs::Linux => {
      args
        .set("target_os", "linux")
        .set("angle_enable_vulkan", true)
        .set("angle_enable_gl", true);
    }
    TargetOs::Android => {
      return Err(RecipeError::Unsupported {
        project: "angle",
        reason: "Android builds are not supported (Android supports OpenGL ES natively)".to_string(),
      });
    }
  }

  args.set("target_cpu", config.target_arch.gn_cpu());
  Ok(args)
}

pub fn build(src: &Context, runner: &mut dyn Runner, args: &GnArgs) -> Result<(), RecipeError> {
  gn_gen(src, runner, args)?;
  ninja_build(src, runner, TARGETS)?;
  Ok(())
}

/// Shared libraries, import/static libraries and the Khronos headers.
pub fn install(src: &Context, config: &BuildConfig, layout: &DistLayout) -> Result<Vec<PathBuf>, RecipeError> {
  let out = src.path(GN_OUT_DIR);
  let obj = out.join("obj");
  let lib_dir = layout.lib_dir();
  let bin_dir = layout.bin_dir();
  let (lib, bin) = (lib_dir.as_path(), bin_dir.as_path());

  let files: Vec<(PathBuf, &Path)> = match config.target_os {
    TargetOs::Windows => vec![
      (out.join("libEGL.dll"), bin),
      (out.join("libGLESv2.dll"), bin),
      (out.join("libEGL.dll.lib"), lib),
      (out.join("libGLESv2.dll.lib"), lib),
      (obj.join("libEGL.lib"), lib),
      (obj.join("libGLESv2.lib"), lib),
    ],
    os if os.is_apple() => vec![
      (out.join("libEGL.dylib"), lib),
      (out.join("libGLESv2.dylib"), lib),
      (obj.join("libEGL.a"), lib),
      (obj.join("libGLESv2.a"), lib),
    ],
    _ => vec![
      (out.join("libEGL.so"), lib),
      (out.join("libGLESv2.so"), lib),
      (obj.join("libEGL.a"), lib),
      (obj.join("libGLESv2.a"), lib),
    ],
  };

  let mut installed = Vec::new();
  for (file, dir) in files {
    installed.extend(copy_file_to_dir(&file, dir)?);
  }
  installed.extend(copy_tree(&src.path("include"), &layout.include_dir(), &[".h"])?);
  Ok(installed)
}
