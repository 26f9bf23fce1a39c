// SPDX-License-Identifier: Unlicense

//! Simulated hierarchical virtual memory.
//!
//! Resolves virtual addresses onto a small pool of physical frames,
//! installing page tables on demand and evicting resident pages to a
//! swap device, chosen by cyclic distance, when the pool is exhausted.

#![warn(missing_docs)]

#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate claim;

pub mod debug;
pub mod device;
pub mod pager;
pub mod util;
pub mod vm;

pub use device::{Backend, MainMemory};
pub use pager::{Frame, PageNumber, PhysAddr, Reclaim, VirtAddr, VirtualMemory, Word};
pub use util::result::{Error, Result};
