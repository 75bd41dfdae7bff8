//! Force-build policy.
//!
//! `force_build` only ever relaxes availability failures. Integrity and
//! destination failures abort under every policy; there is no way to
//! construct a policy that tolerates them.

use super::types::FailureClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
  /// Log the failure and carry on without the affected item.
  Tolerate,
  Abort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForcePolicy {
  availability: Disposition,
}

impl ForcePolicy {
  pub fn new(force_build: bool) -> Self {
    Self {
      availability: if force_build {
        Disposition::Tolerate
      } else {
        Disposition::Abort
      },
    }
  }

  pub fn disposition(&self, class: FailureClass) -> Disposition {
    match class {
      FailureClass::Availability => self.availability,
      FailureClass::Integrity => Disposition::Abort,
      FailureClass::Destination => Disposition::Abort,
    }
  }

  pub fn tolerates(&self, class: FailureClass) -> bool {
    self.disposition(class) == Disposition::Tolerate
  }
}
