// SPDX-License-Identifier: Unlicense

//! The translation engine.
//!
//! Walks the table tree for a virtual address, installing missing
//! tables and pages on the way down. Eviction and unlinking complete
//! before a reclaimed frame is linked into its new parent, and a frame
//! destined for table duty is zero-filled before the link is written,
//! so every intermediate state of the tree is well formed.

use super::alloc::{reclaim_frame, Reclaim};
use super::{Frame, PhysAddr, VirtAddr, Word, PAGE_SIZE, TABLES_DEPTH};
use crate::device::Backend;
use crate::{Error, Result};

use enum_map::EnumMap;

use core::fmt::{Debug, Formatter};

/// A hierarchical virtual memory over a physical backend.
///
/// Frame 0 permanently holds the root table; every other frame moves
/// between table duty and page duty as translation demands.
pub struct VirtualMemory<B: Backend> {
    backend: B,
    reclaims: EnumMap<Reclaim, u64>,
}

impl<B: Backend> VirtualMemory<B> {
    /// Take ownership of a backend and establish the root table.
    pub fn new(backend: B) -> Self {
        let mut vmem = Self {
            backend,
            reclaims: EnumMap::default(),
        };
        vmem.zero_frame(Frame::ROOT);
        vmem
    }

    /// Read the word at a virtual address.
    pub fn read(&mut self, addr: VirtAddr) -> Result<Word> {
        let resolved = self.resolve(addr)?;
        Ok(self.backend.read(resolved))
    }

    /// Write a word at a virtual address.
    pub fn write(&mut self, addr: VirtAddr, word: Word) -> Result<()> {
        let resolved = self.resolve(addr)?;
        self.backend.write(resolved, word);
        Ok(())
    }

    /// Diagnostic view of the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Number of reclaims performed of the given kind.
    pub fn reclaims(&self, kind: Reclaim) -> u64 {
        self.reclaims[kind]
    }

    fn resolve(&mut self, addr: VirtAddr) -> Result<PhysAddr> {
        if !addr.is_valid() {
            return Err(Error::AddressOutOfBounds);
        }
        trace!("resolve {:?}", addr);
        let frame = self.translate(addr)?;
        Ok(frame.slot(addr.page_offset()))
    }

    /// Descend from the root to the leaf frame for `addr`, installing
    /// any missing links on the way down.
    fn translate(&mut self, addr: VirtAddr) -> Result<Frame> {
        let slots = addr.slot_indexes();
        let mut current = Frame::ROOT;
        for level in (1..=TABLES_DEPTH).rev() {
            let link = current.slot(slots[level]);
            let word = self.backend.read(link);
            if word != 0 {
                current = Frame::from_word(word);
                continue;
            }
            // `current` is about to receive the new link, so reclaim
            // must leave it in place.
            let (frame, kind) = reclaim_frame(&mut self.backend, addr.page(), current)?;
            self.reclaims[kind] += 1;
            if level > 1 {
                self.zero_frame(frame);
            }
            self.backend.write(link, frame.to_word());
            if level == 1 {
                self.backend.restore(frame, addr.page());
            }
            current = frame;
        }
        Ok(current)
    }

    fn zero_frame(&mut self, frame: Frame) {
        for slot in 0..PAGE_SIZE {
            self.backend.write(frame.slot(slot), 0);
        }
    }
}

impl<B: Backend> Debug for VirtualMemory<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "VirtualMemory {{ ")?;
        for (kind, count) in self.reclaims.iter() {
            write!(f, "{:?}: {}, ", kind, count)?;
        }
        write!(f, "}}")
    }
}
