// SPDX-License-Identifier: Unlicense

//! Single-pass survey of the page-table tree.
//!
//! One descent from the root jointly discovers everything frame reclaim
//! needs: the first wholly-vacant table frame, the highest frame index
//! in use, and the resident page furthest from the page being brought
//! in.

use super::{Frame, PageNumber, OFFSET_WIDTH, PAGE_SIZE, TABLES_DEPTH};
use crate::device::Backend;

/// A vacant table frame and the parent slot linking to it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct VacantTable {
    pub frame: Frame,
    pub parent: Frame,
    pub slot: usize,
}

/// The resident leaf page preferred for eviction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Victim {
    pub frame: Frame,
    pub parent: Frame,
    pub page: PageNumber,
    pub distance: usize,
}

/// Everything a single descent of the tree discovers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Survey {
    pub max_frame: Frame,
    pub vacant: Option<VacantTable>,
    pub victim: Option<Victim>,
}

impl Survey {
    /// Walk the tree below the root table on behalf of `page_in`.
    ///
    /// `pinned` is the frame most recently committed to the current
    /// translation path. It is about to receive a child link, so it must
    /// not be reported vacant; on the first descent of a translation it
    /// is the root, which doubles as a root shield. The walk stops early
    /// once a vacant table is recorded, leaving `max_frame` and `victim`
    /// partial; reclaim consults them only when `vacant` is `None`.
    pub fn new<B: Backend>(backend: &B, page_in: PageNumber, pinned: Frame) -> Survey {
        let mut walker = Walker {
            backend,
            page_in,
            pinned,
            survey: Survey {
                max_frame: Frame::ROOT,
                vacant: None,
                victim: None,
            },
        };
        walker.visit(Frame::ROOT, Frame::ROOT, 0, 0, 0);
        walker.survey
    }
}

struct Walker<'a, B: Backend> {
    backend: &'a B,
    page_in: PageNumber,
    pinned: Frame,
    survey: Survey,
}

impl<B: Backend> Walker<'_, B> {
    /// Visit `frame`, reached from `parent` through `entry_slot`, with
    /// `path` accumulating the slot indices taken so far in page-number
    /// bit positions.
    fn visit(&mut self, frame: Frame, parent: Frame, entry_slot: usize, depth: usize, path: usize) {
        if self.survey.vacant.is_some() {
            return;
        }
        self.survey.max_frame = self.survey.max_frame.max(frame);

        if depth == TABLES_DEPTH {
            let page = PageNumber::at(path);
            let distance = self.page_in.cyclic_distance(page);
            // Strictly greater only: ties keep the earliest leaf in walk
            // order.
            if self.survey.victim.map_or(true, |v| distance > v.distance) {
                self.survey.victim = Some(Victim {
                    frame,
                    parent,
                    page,
                    distance,
                });
            }
            return;
        }

        let mut vacant_slots = 0;
        for slot in 0..PAGE_SIZE {
            let word = self.backend.read(frame.slot(slot));
            if word == 0 {
                vacant_slots += 1;
                continue;
            }
            let child_path = path | (slot << ((TABLES_DEPTH - depth - 1) * OFFSET_WIDTH));
            self.visit(Frame::from_word(word), frame, slot, depth + 1, child_path);
            if self.survey.vacant.is_some() {
                return;
            }
        }

        // The root has no parent slot to unlink from, and the pinned
        // frame is about to receive a child link.
        if vacant_slots == PAGE_SIZE && !frame.is_root() && frame != self.pinned {
            self.survey.vacant = Some(VacantTable {
                frame,
                parent,
                slot: entry_slot,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::MainMemory;

    fn link(memory: &mut MainMemory, parent: Frame, slot: usize, child: Frame) {
        memory.write(parent.slot(slot), child.to_word());
    }

    #[test]
    fn bare_root() {
        let memory = MainMemory::new();
        let survey = Survey::new(&memory, PageNumber::at(0), Frame::ROOT);

        assert_eq!(Frame::ROOT, survey.max_frame);
        assert_none!(survey.vacant);
        assert_none!(survey.victim);
    }

    #[test]
    fn finds_a_vacant_table() {
        let mut memory = MainMemory::new();
        link(&mut memory, Frame::ROOT, 3, Frame::at(1));

        let survey = Survey::new(&memory, PageNumber::at(0), Frame::ROOT);
        assert_some_eq!(
            survey.vacant,
            VacantTable {
                frame: Frame::at(1),
                parent: Frame::ROOT,
                slot: 3,
            }
        );
    }

    #[test]
    fn never_reports_the_pinned_frame_vacant() {
        let mut memory = MainMemory::new();
        link(&mut memory, Frame::ROOT, 3, Frame::at(1));

        let survey = Survey::new(&memory, PageNumber::at(0), Frame::at(1));
        assert_none!(survey.vacant);
        assert_eq!(Frame::at(1), survey.max_frame);
    }

    #[test]
    fn tracks_the_highest_frame_on_a_full_path() {
        let mut memory = MainMemory::new();
        link(&mut memory, Frame::ROOT, 0, Frame::at(1));
        link(&mut memory, Frame::at(1), 0, Frame::at(2));
        link(&mut memory, Frame::at(2), 5, Frame::at(3));

        let survey = Survey::new(&memory, PageNumber::at(100), Frame::at(2));
        assert_eq!(Frame::at(3), survey.max_frame);
        assert_none!(survey.vacant);

        let victim = survey.victim.unwrap();
        assert_eq!(Frame::at(3), victim.frame);
        assert_eq!(Frame::at(2), victim.parent);
        assert_eq!(PageNumber::at(5), victim.page);
        assert_eq!(95, victim.distance);
    }

    #[test]
    fn victim_page_number_reassembles_the_path() {
        let mut memory = MainMemory::new();
        link(&mut memory, Frame::ROOT, 0xF, Frame::at(1));
        link(&mut memory, Frame::at(1), 0xF, Frame::at(2));
        link(&mut memory, Frame::at(2), 0x0, Frame::at(3));

        let survey = Survey::new(&memory, PageNumber::at(0), Frame::at(2));
        // Slots F, F, 0 from the root spell page 0xFF0.
        assert_some_eq!(survey.victim.map(|v| v.page), PageNumber::at(0xFF0));
    }

    #[test]
    fn furthest_page_wins_across_the_ring() {
        let mut memory = MainMemory::new();
        link(&mut memory, Frame::ROOT, 0xF, Frame::at(1));
        link(&mut memory, Frame::at(1), 0xF, Frame::at(2));
        link(&mut memory, Frame::at(2), 0x0, Frame::at(3)); // page 0xFF0
        link(&mut memory, Frame::at(2), 0xF, Frame::at(4)); // page 0xFFF

        // From page 0, page 0xFF0 is 16 slots away around the ring while
        // page 0xFFF is adjacent.
        let survey = Survey::new(&memory, PageNumber::at(0), Frame::at(2));
        let victim = survey.victim.unwrap();
        assert_eq!(PageNumber::at(0xFF0), victim.page);
        assert_eq!(16, victim.distance);
    }

    #[test]
    fn equal_distances_keep_the_first_leaf_visited() {
        let mut memory = MainMemory::new();
        link(&mut memory, Frame::ROOT, 0, Frame::at(1));
        link(&mut memory, Frame::at(1), 0, Frame::at(2));
        link(&mut memory, Frame::at(2), 1, Frame::at(3)); // page 1
        link(&mut memory, Frame::at(2), 3, Frame::at(4)); // page 3

        // Both candidates are one page away from page 2.
        let survey = Survey::new(&memory, PageNumber::at(2), Frame::at(2));
        assert_some_eq!(survey.victim.map(|v| v.page), PageNumber::at(1));
    }
}
