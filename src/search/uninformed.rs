//! Breadth-first and depth-first search
//!
//! Both expand cells in the order their frontier hands them out; only the
//! frontier differs. A cell may sit in the frontier several times, the
//! first copy taken out wins and fixes its predecessor.

use std::collections::VecDeque;

use super::{open_neighbors, Explorer, SearchResult};

/// Cell waiting for expansion, with the cell it was discovered from
#[derive(Debug, Clone, Copy)]
pub(super) struct Entry {
    idx: usize,
    parent: Option<usize>,
}

pub(super) trait Frontier: Default {
    fn push(&mut self, entry: Entry);
    fn pop(&mut self) -> Option<Entry>;
}

/// First in, first out: expands cells by increasing distance
#[derive(Default)]
pub(super) struct Queue(VecDeque<Entry>);

impl Frontier for Queue {
    fn push(&mut self, entry: Entry) {
        self.0.push_back(entry)
    }

    fn pop(&mut self) -> Option<Entry> {
        self.0.pop_front()
    }
}

/// Last in, first out: follows the most recently discovered cell
#[derive(Default)]
pub(super) struct Stack(Vec<Entry>);

impl Frontier for Stack {
    fn push(&mut self, entry: Entry) {
        self.0.push(entry)
    }

    fn pop(&mut self) -> Option<Entry> {
        self.0.pop()
    }
}

pub(super) fn search<F: Frontier>(mut explorer: Explorer<'_>) -> SearchResult {
    let mut frontier = F::default();
    frontier.push(Entry {
        idx: explorer.start,
        parent: None,
    });

    while let Some(Entry { idx, parent }) = frontier.pop() {
        if !explorer.settle(idx) {
            continue;
        }
        explorer.came_from[idx] = parent;

        if idx == explorer.end {
            return explorer.into_result(true);
        }
        for next in open_neighbors(explorer.grid, &explorer.settled, idx) {
            frontier.push(Entry {
                idx: next,
                parent: Some(idx),
            });
        }
    }
    explorer.into_result(false)
}
