//! Trace record format.
//!
//! Each trace line carries five whitespace-separated fields:
//!
//! ```text
//! <pc (hex)> <op class> <dst> <src1> <src2>
//! ```
//!
//! Register fields use `-1` for "no register". Parsing converts that sentinel
//! to `None` immediately.

use crate::common::reg::ArchReg;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Opcode class of a trace instruction; selects a fixed execution latency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum OpClass {
    /// Class 0: single-cycle operations.
    Short,
    /// Class 1: two-cycle operations.
    Medium,
    /// Class 2: five-cycle operations.
    Long,
}

impl OpClass {
    /// Execution latency in cycles.
    pub const fn latency(self) -> u32 {
        match self {
            Self::Short => 1,
            Self::Medium => 2,
            Self::Long => 5,
        }
    }

    /// Numeric class code as written in the trace.
    pub const fn code(self) -> u8 {
        match self {
            Self::Short => 0,
            Self::Medium => 1,
            Self::Long => 2,
        }
    }

    /// Decodes a numeric class code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Short),
            1 => Some(Self::Medium),
            2 => Some(Self::Long),
            _ => None,
        }
    }
}

impl From<OpClass> for u8 {
    fn from(op: OpClass) -> Self {
        op.code()
    }
}

impl fmt::Display for OpClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One pre-decoded instruction from the trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Program counter.
    pub pc: u64,
    /// Opcode class.
    pub op: OpClass,
    /// Destination register, if any.
    pub dst: Option<ArchReg>,
    /// Source registers, each optional.
    pub src: [Option<ArchReg>; 2],
}

impl TraceRecord {
    /// Creates a record with no registers.
    pub const fn new(pc: u64, op: OpClass) -> Self {
        Self {
            pc,
            op,
            dst: None,
            src: [None, None],
        }
    }

    /// Sets the destination register.
    #[must_use]
    pub const fn with_dst(mut self, reg: usize) -> Self {
        self.dst = Some(ArchReg(reg));
        self
    }

    /// Sets the first source register.
    #[must_use]
    pub const fn with_src1(mut self, reg: usize) -> Self {
        self.src[0] = Some(ArchReg(reg));
        self
    }

    /// Sets the second source register.
    #[must_use]
    pub const fn with_src2(mut self, reg: usize) -> Self {
        self.src[1] = Some(ArchReg(reg));
        self
    }

    /// Iterates over every register the record names.
    pub fn registers(&self) -> impl Iterator<Item = ArchReg> + '_ {
        self.dst.iter().chain(self.src.iter().flatten()).copied()
    }
}

/// Reasons a trace line fails to parse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseRecordError {
    /// The line did not contain exactly five fields.
    #[error("expected 5 fields, found {found}")]
    FieldCount {
        /// Number of fields present.
        found: usize,
    },

    /// The program counter was not a hexadecimal number.
    #[error("invalid program counter {0:?}")]
    Pc(String),

    /// The opcode class was not 0, 1 or 2.
    #[error("invalid opcode class {0:?}")]
    OpClass(String),

    /// A register field was not a non-negative integer or `-1`.
    #[error("invalid {field} register {value:?}")]
    Register {
        /// Which field was malformed.
        field: &'static str,
        /// The offending text.
        value: String,
    },
}

impl FromStr for TraceRecord {
    type Err = ParseRecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [pc, op, dst, src1, src2] = fields[..] else {
            return Err(ParseRecordError::FieldCount {
                found: fields.len(),
            });
        };

        let digits = pc
            .strip_prefix("0x")
            .or_else(|| pc.strip_prefix("0X"))
            .unwrap_or(pc);
        let pc = u64::from_str_radix(digits, 16).map_err(|_| ParseRecordError::Pc(pc.into()))?;

        let op = op
            .parse::<u8>()
            .ok()
            .and_then(OpClass::from_code)
            .ok_or_else(|| ParseRecordError::OpClass(op.into()))?;

        let reg = |field: &'static str, value: &str| {
            value
                .parse::<i64>()
                .ok()
                .and_then(|n| ArchReg::from_trace_field(n).ok())
                .ok_or_else(|| ParseRecordError::Register {
                    field,
                    value: value.into(),
                })
        };

        Ok(Self {
            pc,
            op,
            dst: reg("destination", dst)?,
            src: [reg("source-1", src1)?, reg("source-2", src2)?],
        })
    }
}
