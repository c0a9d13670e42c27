//! Recency List Module
//!
//! Doubly linked list of keys ordered from most- to least-recently-used.
//!
//! Nodes live in an arena and link to each other by index. Two sentinel
//! nodes bound the list:
//!
//! ```text
//!   [HEAD] <-> [most recent] <-> ... <-> [least recent] <-> [TAIL]
//! ```
//!
//! Freed slots are recycled through a free list, so a `NodeId` is only
//! meaningful until its node is removed.

// == Constants ==
const HEAD: usize = 0;
const TAIL: usize = 1;

// == Node Id ==
/// Stable handle to a node inside a `RecencyList`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node<K> {
    /// `None` for sentinels and free slots
    key: Option<K>,
    prev: usize,
    next: usize,
}

// == Recency List ==
#[derive(Debug)]
pub struct RecencyList<K> {
    nodes: Vec<Node<K>>,
    free: Vec<usize>,
    len: usize,
}

impl<K> RecencyList<K> {
    // == Constructor ==
    /// Creates a list holding only the head and tail sentinels.
    pub fn new() -> Self {
        Self {
            nodes: vec![
                Node {
                    key: None,
                    prev: HEAD,
                    next: TAIL,
                },
                Node {
                    key: None,
                    prev: HEAD,
                    next: TAIL,
                },
            ],
            free: Vec::new(),
            len: 0,
        }
    }

    // == Add To Front ==
    /// Inserts `key` right after the head sentinel.
    pub fn add_to_front(&mut self, key: K) -> NodeId {
        let node = Node {
            key: Some(key),
            prev: HEAD,
            next: HEAD,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.link_front(idx);
        self.len += 1;
        NodeId(idx)
    }

    // == Move To Front ==
    /// Relinks a live node right after the head sentinel.
    pub fn move_to_front(&mut self, id: NodeId) {
        if !self.is_live(id) || self.nodes[HEAD].next == id.0 {
            return;
        }
        self.unlink(id.0);
        self.link_front(id.0);
    }

    // == Remove Node ==
    /// Unlinks a node and frees its slot, returning its key.
    ///
    /// No-op on an empty list or a stale id.
    pub fn remove_node(&mut self, id: NodeId) -> Option<K> {
        if self.len == 0 || !self.is_live(id) {
            return None;
        }
        self.unlink(id.0);
        self.free.push(id.0);
        self.len -= 1;
        self.nodes[id.0].key.take()
    }

    // == Remove Last ==
    /// Removes and returns the key nearest the tail sentinel.
    pub fn remove_last(&mut self) -> Option<K> {
        let last = self.nodes[TAIL].prev;
        if last == HEAD {
            return None;
        }
        self.remove_node(NodeId(last))
    }

    // == Peek Last ==
    pub fn peek_last(&self) -> Option<&K> {
        self.nodes[self.nodes[TAIL].prev].key.as_ref()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every real node; sentinels stay linked to each other.
    pub fn clear(&mut self) {
        self.nodes.truncate(2);
        self.nodes[HEAD].next = TAIL;
        self.nodes[TAIL].prev = HEAD;
        self.free.clear();
        self.len = 0;
    }

    /// Iterates keys from most- to least-recently-used.
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        let mut cursor = self.nodes[HEAD].next;
        std::iter::from_fn(move || {
            if cursor == TAIL {
                return None;
            }
            let node = &self.nodes[cursor];
            cursor = node.next;
            node.key.as_ref()
        })
    }

    fn is_live(&self, id: NodeId) -> bool {
        id.0 != HEAD
            && id.0 != TAIL
            && self
                .nodes
                .get(id.0)
                .map(|node| node.key.is_some())
                .unwrap_or(false)
    }

    fn link_front(&mut self, idx: usize) {
        let first = self.nodes[HEAD].next;
        self.nodes[idx].prev = HEAD;
        self.nodes[idx].next = first;
        self.nodes[first].prev = idx;
        self.nodes[HEAD].next = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }
}

impl<K> Default for RecencyList<K> {
    fn default() -> Self {
        Self::new()
    }
}
