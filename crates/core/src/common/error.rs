//! Error definitions for the simulation core.
//!
//! This contract favors capability negotiation over runtime errors: optional
//! operations on a processor that does not advertise them are silent no-ops.
//! The errors defined here cover the two failure categories that remain:
//! 1. **Controller/processor mismatch:** Out-of-range register access or an
//!    ISA the processor does not implement, detected at construction time.
//! 2. **Program loading:** Malformed or unusable program images.

use thiserror::Error;

use crate::interface::isa::RegisterFileType;

/// Errors reported by a processor to the controlling environment.
///
/// Register access errors indicate a controller/processor mismatch and fail
/// loudly rather than silently returning a default; they never corrupt
/// unrelated state. ISA mismatch is raised at construction time only and is
/// prevented from reaching simulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The requested ISA is not implemented by the selected processor.
    #[error("processor implements {implemented}, cannot instantiate as {requested}")]
    IsaMismatch {
        /// Name of the ISA the controller requested.
        requested: String,
        /// Name of the ISA the processor implements.
        implemented: String,
    },

    /// A register index beyond the size of the addressed register file.
    #[error("register index {index} out of range for {file:?} file of {count} registers")]
    RegisterIndexOutOfRange {
        /// The addressed register file.
        file: RegisterFileType,
        /// The out-of-range index.
        index: usize,
        /// Number of registers in the file.
        count: usize,
    },

    /// The addressed register file is not exposed by this processor.
    #[error("processor does not expose a {0:?} register file")]
    UnknownRegisterFile(RegisterFileType),
}

/// Errors produced while loading a program image into an address space.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The object file could not be parsed.
    #[error("failed to parse program image: {0}")]
    Parse(#[from] object::Error),

    /// The image parsed but contained no executable text section.
    #[error("program image contains no executable text section")]
    NoText,
}
