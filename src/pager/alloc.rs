// SPDX-License-Identifier: Unlicense

//! Frame reclaim for missing mappings.

use super::walk::Survey;
use super::{Frame, PageNumber};
use crate::device::Backend;
use crate::{Error, Result};

use enum_map::Enum;

/// How a frame was obtained for a missing mapping.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Enum)]
pub enum Reclaim {
    /// A wholly-vacant table frame was unlinked and reused.
    VacantTable,
    /// An untouched frame above the high-water mark was claimed.
    HighWater,
    /// A resident page was evicted to swap and its frame taken.
    Eviction,
}

/// Obtain a frame for a mapping of `page_in`, never taking `pinned`.
///
/// The returned frame is unlinked and owned by the caller: table reuse
/// and eviction write the unlink into the old parent slot before
/// returning. A high-water frame holds junk and must be overwritten
/// before it is linked anywhere.
pub(crate) fn reclaim_frame<B: Backend>(
    backend: &mut B,
    page_in: PageNumber,
    pinned: Frame,
) -> Result<(Frame, Reclaim)> {
    let survey = Survey::new(backend, page_in, pinned);

    if let Some(vacant) = survey.vacant {
        trace!(
            "reusing vacant table {:?} under {:?}",
            vacant.frame,
            vacant.parent
        );
        backend.write(vacant.parent.slot(vacant.slot), 0);
        return Ok((vacant.frame, Reclaim::VacantTable));
    }

    if let Some(untouched) = survey.max_frame.successor() {
        trace!("claiming untouched {:?}", untouched);
        return Ok((untouched, Reclaim::HighWater));
    }

    if let Some(victim) = survey.victim {
        trace!(
            "evicting {:?} from {:?} at distance {}",
            victim.page,
            victim.frame,
            victim.distance
        );
        backend.evict(victim.frame, victim.page);
        backend.write(victim.parent.slot(victim.page.leaf_slot()), 0);
        return Ok((victim.frame, Reclaim::Eviction));
    }

    Err(Error::OutOfFrames)
}
