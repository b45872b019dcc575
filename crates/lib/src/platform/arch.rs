use std::fmt;
use std::str::FromStr;

/// Target CPU architectures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetArch {
  X86_64,
  Aarch64,
  Arm,
  I686,
}

impl TargetArch {
  /// Detect the host CPU architecture at runtime
  pub fn current() -> Option<Self> {
    match std::env::consts::ARCH {
      "x86_64" => Some(Self::X86_64),
      "aarch64" => Some(Self::Aarch64),
      "arm" => Some(Self::Arm),
      "x86" => Some(Self::I686),
      _ => None,
    }
  }

  /// Returns the identifier used in `TARGET_ARCH` and in distribution directories
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::Aarch64 => "aarch64",
      Self::Arm => "arm",
      Self::I686 => "i686",
    }
  }

  /// The CPU name GN expects for `target_cpu`
  pub fn gn_cpu(&self) -> &'static str {
    match self {
      Self::X86_64 => "x64",
      Self::Aarch64 => "arm64",
      Self::Arm => "arm",
      Self::I686 => "x86",
    }
  }
}

impl FromStr for TargetArch {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "x86_64" => Ok(Self::X86_64),
      "aarch64" => Ok(Self::Aarch64),
      "arm" => Ok(Self::Arm),
      "i686" => Ok(Self::I686),
      other => Err(other.to_string()),
    }
  }
}

impl fmt::Display for TargetArch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn gn_cpu_names() {
    assert_eq!(TargetArch::X86_64.gn_cpu(), "x64");
    assert_eq!(TargetArch::Aarch64.gn_cpu(), "arm64");
    assert_eq!(TargetArch::Arm.gn_cpu(), "arm");
    assert_eq!(TargetArch::I686.gn_cpu(), "x86");
  }

  #[test]
  fn rejects_gn_style_names() {
    // TARGET_ARCH uses rust-style names, not GN ones
    assert!("arm64".parse::<TargetArch>().is_err());
    assert!("x64".parse::<TargetArch>().is_err());
  }
}
