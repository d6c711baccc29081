//! Architectural register identifiers.
//!
//! Trace records name registers by small integer ids; a missing register is
//! `None` at every use site rather than a `-1` sentinel. The only place the
//! sentinel survives is the text boundary (trace parsing and timeline output),
//! handled by [`ArchReg::from_trace_field`] and [`ArchReg::display_opt`].

use serde::Serialize;
use std::fmt;
use std::num::TryFromIntError;

/// An architectural register id as it appears in the trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ArchReg(pub usize);

impl ArchReg {
    /// Returns the register id as an index into a register-sized table.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0
    }

    /// Converts a signed trace field into an optional register.
    ///
    /// `-1` means "no register"; any other negative value is rejected.
    pub fn from_trace_field(field: i64) -> Result<Option<Self>, TryFromIntError> {
        if field == -1 {
            return Ok(None);
        }
        usize::try_from(field).map(|id| Some(Self(id)))
    }

    /// Formats an optional register the way timeline lines expect (`-1` for none).
    pub fn display_opt(reg: Option<Self>) -> DisplayOpt {
        DisplayOpt(reg)
    }
}

impl fmt::Display for ArchReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display adapter for `Option<ArchReg>` that prints `-1` for `None`.
#[derive(Clone, Copy, Debug)]
pub struct DisplayOpt(Option<ArchReg>);

impl fmt::Display for DisplayOpt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(reg) => write!(f, "{reg}"),
            None => f.write_str("-1"),
        }
    }
}
