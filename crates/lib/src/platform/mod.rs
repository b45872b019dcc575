pub mod arch;
pub mod os;

pub use arch::TargetArch;
pub use os::TargetOs;

use std::fmt;

/// Target identifier combining architecture and OS (e.g., "aarch64-macos")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
  pub arch: TargetArch,
  pub os: TargetOs,
}

impl Platform {
  /// Create a new platform identifier
  pub fn new(arch: TargetArch, os: TargetOs) -> Self {
    Self { arch, os }
  }

  /// Detect the host platform at runtime
  ///
  /// Returns `None` if the OS or architecture is not one we can target
  pub fn host() -> Option<Self> {
    Some(Self {
      arch: TargetArch::current()?,
      os: TargetOs::current()?,
    })
  }

  /// Returns the platform triple string (e.g., "x86_64-linux"), used as the
  /// directory name under `lib/` and `bin/` in the distribution layout
  pub fn triple(&self) -> String {
    format!("{}-{}", self.arch, self.os)
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.triple())
  }
}
