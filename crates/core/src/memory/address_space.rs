//! Sparse byte-addressable storage.
//!
//! [`AddressSpace`] backs the combined data/instruction memory of the
//! reference processors as well as the architectural-register space. Storage
//! is allocated in fixed-size pages on first write; reads of unmapped
//! addresses return zero. Multi-byte accesses are little-endian and may
//! straddle page boundaries.

use std::collections::HashMap;

/// Bytes per storage page.
const PAGE_SIZE: u64 = 4096;

/// A sparse, paged, byte-addressable address space.
///
/// Owned exclusively by a processor implementation; the controller reaches
/// it only through the narrow accessor operations of the processor contract.
/// Cloning copies only the mapped pages, which keeps per-cycle snapshots for
/// reverse history cheap.
#[derive(Clone, Debug, Default)]
pub struct AddressSpace {
    pages: HashMap<u64, Box<[u8]>>,
}

impl AddressSpace {
    /// Creates an empty address space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages currently mapped.
    pub fn mapped_pages(&self) -> usize {
        self.pages.len()
    }

    /// Reads one byte; unmapped addresses read as zero.
    pub fn read_u8(&self, addr: u64) -> u8 {
        self.pages
            .get(&(addr / PAGE_SIZE))
            .map_or(0, |page| page[(addr % PAGE_SIZE) as usize])
    }

    /// Writes one byte, mapping the containing page if needed.
    pub fn write_u8(&mut self, addr: u64, value: u8) {
        let page = self
            .pages
            .entry(addr / PAGE_SIZE)
            .or_insert_with(|| vec![0; PAGE_SIZE as usize].into_boxed_slice());
        page[(addr % PAGE_SIZE) as usize] = value;
    }

    /// Reads two bytes, little-endian.
    pub fn read_u16(&self, addr: u64) -> u16 {
        u16::from_le_bytes([self.read_u8(addr), self.read_u8(addr.wrapping_add(1))])
    }

    /// Reads four bytes, little-endian.
    pub fn read_u32(&self, addr: u64) -> u32 {
        let mut bytes = [0u8; 4];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = self.read_u8(addr.wrapping_add(i as u64));
        }
        u32::from_le_bytes(bytes)
    }

    /// Reads eight bytes, little-endian.
    pub fn read_u64(&self, addr: u64) -> u64 {
        let mut bytes = [0u8; 8];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = self.read_u8(addr.wrapping_add(i as u64));
        }
        u64::from_le_bytes(bytes)
    }

    /// Writes two bytes, little-endian.
    pub fn write_u16(&mut self, addr: u64, value: u16) {
        self.write_slice(addr, &value.to_le_bytes());
    }

    /// Writes four bytes, little-endian.
    pub fn write_u32(&mut self, addr: u64, value: u32) {
        self.write_slice(addr, &value.to_le_bytes());
    }

    /// Writes eight bytes, little-endian.
    pub fn write_u64(&mut self, addr: u64, value: u64) {
        self.write_slice(addr, &value.to_le_bytes());
    }

    /// Reads `len` bytes starting at `addr`.
    pub fn read_slice(&self, addr: u64, len: usize) -> Vec<u8> {
        (0..len)
            .map(|i| self.read_u8(addr.wrapping_add(i as u64)))
            .collect()
    }

    /// Writes a contiguous byte slice starting at `addr`.
    pub fn write_slice(&mut self, addr: u64, data: &[u8]) {
        for (i, byte) in data.iter().enumerate() {
            self.write_u8(addr.wrapping_add(i as u64), *byte);
        }
    }

    /// Unmaps every page, returning the space to its empty state.
    pub fn clear(&mut self) {
        self.pages.clear();
    }
}
