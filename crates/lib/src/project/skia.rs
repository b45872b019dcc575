use std::path::{Path, PathBuf};

use crate::config::BuildConfig;
use crate::consts::GN_OUT_DIR;
use crate::copy::{copy_file_to_dir, copy_tree};
use crate::execute::{Context, Runner};
use crate::platform::TargetOs;
use crate::toolchain::find_system_clang;

use super::gn::{GnArgs, gn_gen, gn_list, ninja_build};
use super::{DistLayout, RecipeError};

pub fn gn_args(config: &BuildConfig, root: &Path) -> Result<GnArgs, RecipeError> {
  let mut args = GnArgs::new();
  args
    .set("is_debug", false)
    .set("is_clang", true)
    .set("is_official_build", true);

  if config.target_os == TargetOs::Windows {
    let clang = find_system_clang(config, root)?;
    args.set("clang_win", clang.to_string_lossy().into_owned());
  }

  Ok(args)
}

pub fn build(src: &Context, runner: &mut dyn Runner, args: &GnArgs) -> Result<(), RecipeError> {
  gn_gen(src, runner, args)?;
  gn_list(src, runner)?;
  ninja_build(src, runner, &[])?;
  Ok(())
}

pub fn install(src: &Context, layout: &DistLayout) -> Result<Vec<PathBuf>, RecipeError> {
  let out = src.path(GN_OUT_DIR);
  let lib = layout.lib_dir();

  let mut installed = Vec::new();
  installed.extend(copy_file_to_dir(&out.join("skia.lib"), &lib)?);
  installed.extend(copy_file_to_dir(&out.join("libskia.a"), &lib)?);
  installed.extend(copy_tree(&src.path("include"), &layout.include_dir(), &[".h", ".md"])?);
  Ok(installed)
}
