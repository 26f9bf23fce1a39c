// SPDX-License-Identifier: Unlicense

//! System-wide virtual memory surface.
//!
//! One translation engine over the simulated device, behind a lock. The
//! slot starts empty and reports `UnInitialised` until `init` fills it;
//! each `init` builds a fresh engine over zeroed memory and swap.

use crate::device::MainMemory;
use crate::pager::{VirtAddr, VirtualMemory, Word};
use crate::util::locked::Locked;
use crate::{Error, Result};

static VMEM: Locked<Vmem> = Locked::new(Vmem(None));

struct Vmem(Option<VirtualMemory<MainMemory>>);

impl Vmem {
    fn inner(&mut self) -> Result<&mut VirtualMemory<MainMemory>> {
        self.0.as_mut().ok_or(Error::UnInitialised)
    }
}

/// Establish a fresh engine over zeroed memory and swap.
pub fn init() {
    info!("init");
    VMEM.lock().0 = Some(VirtualMemory::new(MainMemory::new()));
}

/// Read the word at a virtual address.
pub fn read(addr: VirtAddr) -> Result<Word> {
    VMEM.lock().inner()?.read(addr)
}

/// Write a word at a virtual address.
pub fn write(addr: VirtAddr, word: Word) -> Result<()> {
    VMEM.lock().inner()?.write(addr, word)
}

/// Log the engine's reclaim counts.
pub fn dump() -> Result<()> {
    debug!("{:?}", VMEM.lock().inner()?);
    Ok(())
}
