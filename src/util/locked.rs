// SPDX-License-Identifier: Unlicense

//! Lock wrapper for statics shared with the demand-paging engine.

use spin::Mutex;

/// Sync access to a static variable.
pub type Locked<A> = Mutex<A>;
