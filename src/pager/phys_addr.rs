// SPDX-License-Identifier: Unlicense

use core::fmt::{Debug, Error, Formatter};

/// An index into the flat physical word store.
#[derive(Copy, Clone, PartialOrd, PartialEq)]
pub struct PhysAddr(usize);

impl Debug for PhysAddr {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::result::Result<(), Error> {
        write!(f, "PhysAddr(0x{:04x})", self.0)
    }
}

impl PhysAddr {
    /// Lowest physical address.
    pub const fn null() -> Self {
        Self(0)
    }

    /// At literal address.
    pub const fn at(addr: usize) -> Self {
        Self(addr)
    }

    /// Get the address as an integer.
    pub const fn get(&self) -> usize {
        self.0
    }

    /// An address that is higher than this by a given number of words.
    pub const fn increment(&self, offset: usize) -> Self {
        Self(self.0 + offset)
    }
}
