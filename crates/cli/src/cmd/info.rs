//! Info command implementation.
//!
//! Shows the host platform, the target read from the environment and the
//! resolved workspace paths. A missing or invalid target is reported but does
//! not fail the command.

use anyhow::Result;

use nativedist_lib::config::BuildConfig;
use nativedist_lib::consts::APP_NAME;
use nativedist_lib::platform::Platform;

use super::Workspace;
use crate::output::{print_json, print_stat, print_success, print_warning};

pub fn cmd_info(ws: &Workspace, json: bool) -> Result<()> {
  let host = Platform::host();
  let config = BuildConfig::from_env();

  if json {
    let output = serde_json::json!({
      "version": env!("CARGO_PKG_VERSION"),
      "host": host.map(|p| p.triple()),
      "target": config.as_ref().ok(),
      "target_triple": config.as_ref().ok().map(|c| c.platform().triple()),
      "root": ws.root,
      "dist": ws.dist,
      "versions": ws.versions,
    });
    return print_json(&output);
  }

  print_success(&format!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION")));
  match host {
    Some(host) => print_stat("Host", &host.triple()),
    None => print_stat("Host", "unsupported"),
  }

  match &config {
    Ok(config) => {
      print_stat("Target", &config.platform().triple());
      if let Some(clang) = &config.clang_base_path {
        print_stat("Clang", &clang.display().to_string());
      }
      if let Some(compression) = config.v8_pointer_compression {
        print_stat("V8 pointer compression", &compression.to_string());
      }
    }
    Err(e) => print_warning(&format!("Target not configured: {}", e)),
  }

  println!();
  print_stat("Root", &ws.root.display().to_string());
  print_stat("Dist", &ws.dist.display().to_string());
  print_stat("Versions", &ws.versions.display().to_string());
  Ok(())
}
