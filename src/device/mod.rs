// SPDX-License-Identifier: Unlicense

//! Physical memory and swap devices backing the translation engine.

mod memory;

pub use memory::MainMemory;

use crate::pager::{Frame, PageNumber, PhysAddr, Word};

/// Word-granular physical memory with page-granular swap transfers.
///
/// The device is infallible: addresses are trusted to be in range and
/// transfers always complete.
pub trait Backend {
    /// Load the word at a physical address.
    fn read(&self, addr: PhysAddr) -> Word;

    /// Store a word at a physical address.
    fn write(&mut self, addr: PhysAddr, word: Word);

    /// Copy a frame's contents into the swap store under a page number.
    ///
    /// The frame itself is left unchanged.
    fn evict(&mut self, frame: Frame, page: PageNumber);

    /// Fill a frame from the swap store for a page number.
    ///
    /// A page that was never evicted reads back as all zeros.
    fn restore(&mut self, frame: Frame, page: PageNumber);
}
