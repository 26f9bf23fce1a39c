// SPDX-License-Identifier: Unlicense

//! Demand-paging demonstration workload.

#[macro_use]
extern crate log;

use libvmem::pager::{VirtAddr, Word, PAGE_SIZE, VIRTUAL_MEMORY_SIZE};
use libvmem::{debug, vm};

// An odd stride keeps every touch on a distinct address while jumping
// across pages, so the five-frame pool churns constantly.
const STRIDE: usize = 7 * PAGE_SIZE + 3;
const TOUCHES: usize = 1000;

fn main() {
    debug::init().expect("debug::init");

    info!("starting");
    vm::init();

    for i in 0..TOUCHES {
        let addr = VirtAddr::at((i * STRIDE) % VIRTUAL_MEMORY_SIZE);
        vm::write(addr, i as Word).expect("write");
    }
    info!("{} words written", TOUCHES);

    let mut verified = 0;
    for i in 0..TOUCHES {
        let addr = VirtAddr::at((i * STRIDE) % VIRTUAL_MEMORY_SIZE);
        if vm::read(addr).expect("read") == i as Word {
            verified += 1;
        }
    }
    info!("{} of {} words verified", verified, TOUCHES);

    vm::dump().expect("dump");
    info!("done");
}
