//! Program image loading.
//!
//! This module places program images into a processor's address space and
//! reports the bounds the hosting environment needs for its
//! executable-region callback. It provides:
//! 1. **ELF loading:** Allocated text/data sections copied to their virtual
//!    addresses; entry point and text bounds extracted.
//! 2. **Flat loading:** Raw images placed at a caller-chosen base.

use std::ops::Range;

use object::{Object, ObjectSection, SectionKind};

use crate::common::LoadError;
use crate::memory::AddressSpace;

/// A loaded program image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramImage {
    /// Entry point; the address to configure as the initial program counter.
    pub entry: u64,
    /// Bounds of the executable text region. The hosting environment's
    /// `is_executable_address` callback typically answers from this range.
    pub text: Range<u64>,
}

/// Parses an ELF image and copies its allocated sections into `mem`.
///
/// Uninitialized (BSS) sections are skipped; unmapped reads are zero-filled
/// by the address space already.
///
/// # Errors
///
/// Fails when the image cannot be parsed or contains no executable text
/// section.
pub fn load_elf(data: &[u8], mem: &mut AddressSpace) -> Result<ProgramImage, LoadError> {
    let file = object::File::parse(data)?;

    let mut text_start = u64::MAX;
    let mut text_end = 0u64;

    for section in file.sections() {
        match section.kind() {
            SectionKind::Text | SectionKind::Data | SectionKind::ReadOnlyData => {
                let addr = section.address();
                let bytes = section.data()?;
                mem.write_slice(addr, bytes);
                if section.kind() == SectionKind::Text {
                    text_start = text_start.min(addr);
                    text_end = text_end.max(addr + section.size());
                }
            }
            _ => {}
        }
    }

    if text_start == u64::MAX {
        return Err(LoadError::NoText);
    }

    tracing::debug!(
        entry = format_args!("{:#x}", file.entry()),
        text_start = format_args!("{text_start:#x}"),
        text_end = format_args!("{text_end:#x}"),
        "loaded ELF image"
    );

    Ok(ProgramImage {
        entry: file.entry(),
        text: text_start..text_end,
    })
}

/// Places a raw flat image at `base` and treats the whole image as text.
pub fn load_flat(data: &[u8], base: u64, mem: &mut AddressSpace) -> ProgramImage {
    mem.write_slice(base, data);
    ProgramImage {
        entry: base,
        text: base..base + data.len() as u64,
    }
}
