//! Recency List Module
//!
//! Doubly-linked recency ordering for LRU eviction.
//!
//! Nodes live in a slab-style backing vector and link to each other through
//! slot indices (handles) instead of references, so relinking never fights
//! the borrow checker and freed slots are recycled for later inserts.
//!
//! Front = most recently touched, back = least recently touched.

// == Slot ==
/// One slab slot. `data` is None while the slot sits on the free list.
#[derive(Debug)]
struct Slot<T> {
    data: Option<T>,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Handle-linked doubly-linked list over a backing vector.
#[derive(Debug)]
pub struct RecencyList<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecencyList<T> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts `data` at the front (most recently touched) and returns its
    /// handle. Freed slots are reused before the backing vector grows.
    pub fn push_front(&mut self, data: T) -> usize {
        let handle = match self.free.pop() {
            Some(handle) => {
                let slot = &mut self.slots[handle];
                debug_assert!(slot.data.is_none());
                slot.data = Some(data);
                slot.prev = None;
                slot.next = self.head;
                handle
            }
            None => {
                self.slots.push(Slot {
                    data: Some(data),
                    prev: None,
                    next: self.head,
                });
                self.slots.len() - 1
            }
        };

        if let Some(old_head) = self.head {
            self.slots[old_head].prev = Some(handle);
        }
        self.head = Some(handle);
        if self.tail.is_none() {
            self.tail = Some(handle);
        }
        self.len += 1;
        handle
    }

    // == Unlink ==
    /// Removes the node at `handle` from anywhere in the list and returns its
    /// data. Handles the sole-node, head, tail and interior cases.
    pub fn unlink(&mut self, handle: usize) -> Option<T> {
        let slot = self.slots.get_mut(handle)?;
        let data = slot.data.take()?;
        let prev = slot.prev.take();
        let next = slot.next.take();

        match prev {
            Some(prev) => self.slots[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.slots[next].prev = prev,
            None => self.tail = prev,
        }

        self.free.push(handle);
        self.len -= 1;
        Some(data)
    }

    // == Move To Front ==
    /// Promotes the node at `handle` to the front, relinking its neighbors.
    /// A stale or vacant handle is ignored.
    pub fn move_to_front(&mut self, handle: usize) {
        if self.head == Some(handle) {
            return;
        }
        let Some(slot) = self.slots.get_mut(handle) else {
            return;
        };
        if slot.data.is_none() {
            return;
        }

        // detach: the node is linked and not the head, so it has a predecessor
        let prev = slot.prev.take();
        let next = slot.next.take();
        debug_assert!(prev.is_some());
        if let Some(prev) = prev {
            self.slots[prev].next = next;
        }
        match next {
            Some(next) => self.slots[next].prev = prev,
            None => self.tail = prev,
        }

        // splice at the front
        let old_head = self.head;
        let slot = &mut self.slots[handle];
        slot.prev = None;
        slot.next = old_head;
        if let Some(old_head) = old_head {
            self.slots[old_head].prev = Some(handle);
        }
        self.head = Some(handle);
    }

    // == Accessors ==
    /// Handle of the most recently touched node.
    pub fn front(&self) -> Option<usize> {
        self.head
    }

    /// Handle of the least recently touched node.
    pub fn back(&self) -> Option<usize> {
        self.tail
    }

    /// Borrows the data at `handle`, if the slot is occupied.
    pub fn get(&self, handle: usize) -> Option<&T> {
        self.slots.get(handle)?.data.as_ref()
    }

    /// Mutably borrows the data at `handle`, if the slot is occupied.
    pub fn get_mut(&mut self, handle: usize) -> Option<&mut T> {
        self.slots.get_mut(handle)?.data.as_mut()
    }

    /// Returns the number of linked nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no nodes are linked.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iteration ==
    /// Walks the list front to back, yielding `(handle, &data)` pairs.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }
}

/// Front-to-back iterator over a [`RecencyList`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.cursor?;
        let slot: &'a Slot<T> = &self.list.slots[handle];
        debug_assert!(slot.data.is_some());
        self.cursor = slot.next;
        slot.data.as_ref().map(|data| (handle, data))
    }
}
