//! ISA descriptors and register file identification.
//!
//! A processor implementation distinguishes between the ISA it *supports*
//! (the base plus every extension it could be instantiated with) and the ISA
//! the running instance *implements*. The registry compares the two at
//! construction time so that a mismatch never reaches simulation.

use std::fmt;

/// Base integer instruction set of a processor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IsaBase {
    /// 32-bit base integer ISA.
    Rv32I,
    /// 64-bit base integer ISA.
    Rv64I,
}

impl IsaBase {
    /// Canonical name of the base ISA.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rv32I => "RV32I",
            Self::Rv64I => "RV64I",
        }
    }
}

/// Standard ISA extension identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum IsaExtension {
    /// Integer multiplication and division.
    M,
    /// Compressed instructions.
    C,
    /// Single-precision floating point.
    F,
    /// Double-precision floating point.
    D,
}

impl IsaExtension {
    /// Single-letter extension name.
    pub const fn letter(self) -> char {
        match self {
            Self::M => 'M',
            Self::C => 'C',
            Self::F => 'F',
            Self::D => 'D',
        }
    }
}

/// Identifies a base ISA together with a set of extensions.
///
/// Used both for the static capability of a processor design
/// ([`crate::Processor::supports_isa`]) and for the configuration of a
/// running instance ([`crate::Processor::implements_isa`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IsaDescriptor {
    base: IsaBase,
    extensions: Vec<IsaExtension>,
}

impl IsaDescriptor {
    /// Creates a descriptor for `base` with the given extensions.
    ///
    /// Extensions are stored sorted and deduplicated so that descriptors
    /// compare structurally.
    pub fn new(base: IsaBase, extensions: &[IsaExtension]) -> Self {
        let mut extensions = extensions.to_vec();
        extensions.sort_unstable();
        extensions.dedup();
        Self { base, extensions }
    }

    /// The base integer ISA.
    pub const fn base(&self) -> IsaBase {
        self.base
    }

    /// The extension set, sorted.
    pub fn extensions(&self) -> &[IsaExtension] {
        &self.extensions
    }

    /// Returns `true` if this descriptor covers `other`: same base, and every
    /// extension of `other` is present here.
    pub fn is_superset_of(&self, other: &Self) -> bool {
        self.base == other.base && other.extensions.iter().all(|e| self.extensions.contains(e))
    }
}

impl fmt::Display for IsaDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base.name())?;
        for ext in &self.extensions {
            write!(f, "{}", ext.letter())?;
        }
        Ok(())
    }
}

/// Identifies a distinct architectural register file.
///
/// A processor may expose more than one file; the set exposed by an instance
/// is reported by [`crate::Processor::register_files`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegisterFileType {
    /// General-purpose integer registers.
    Gpr,
    /// Floating-point registers.
    Fpr,
    /// Control and status registers.
    Csr,
}
