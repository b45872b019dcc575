use std::fmt;
use std::str::FromStr;

/// Target operating systems the native projects can be built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetOs {
  Windows,
  MacOs,
  Ios,
  Linux,
  Android,
}

impl TargetOs {
  /// Detect the host operating system at runtime
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "windows" => Some(Self::Windows),
      "macos" => Some(Self::MacOs),
      "ios" => Some(Self::Ios),
      "linux" => Some(Self::Linux),
      "android" => Some(Self::Android),
      _ => None,
    }
  }

  /// Returns the identifier used in `TARGET_OS` and in distribution directories
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Windows => "windows",
      Self::MacOs => "macos",
      Self::Ios => "ios",
      Self::Linux => "linux",
      Self::Android => "android",
    }
  }

  /// Apple platforms ship `.dylib` and share the Metal backend
  pub fn is_apple(&self) -> bool {
    matches!(self, Self::MacOs | Self::Ios)
  }
}

impl FromStr for TargetOs {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "windows" => Ok(Self::Windows),
      "macos" => Ok(Self::MacOs),
      "ios" => Ok(Self::Ios),
      "linux" => Ok(Self::Linux),
      "android" => Ok(Self::Android),
      other => Err(other.to_string()),
    }
  }
}

impl fmt::Display for TargetOs {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
