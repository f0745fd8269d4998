use std::fmt;

use entry::Entry;

pub(crate) struct Node {
    entry: Entry,
    next: Option<Box<Node>>,
}

impl Node {
    #[inline]
    pub(crate) fn entry(&self) -> &Entry {
        &self.entry
    }
}

/// Singly linked collision list. New entries go to the front.
pub struct Chain {
    head: Option<Box<Node>>,
    len: usize,
}

impl Default for Chain {
    fn default() -> Chain {
        Chain::new()
    }
}

impl Chain {
    pub fn new() -> Chain {
        Chain { head: None, len: 0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn head(&self) -> Option<&Entry> {
        self.head.as_ref().map(|node| &node.entry)
    }

    /// Places `entry` at the head of the chain.
    pub fn push_front(&mut self, entry: Entry) {
        self.push_node(Box::new(Node { entry, next: None }));
    }

    /// Links an already boxed node in as the new head. Used when moving
    /// entries between bucket arrays so they are never copied.
    pub(crate) fn push_node(&mut self, mut node: Box<Node>) {
        node.next = self.head.take();
        self.head = Some(node);
        self.len += 1;
    }

    /// Unlinks the head node and hands it back with its `next` cleared.
    pub(crate) fn pop_node(&mut self) -> Option<Box<Node>> {
        self.head.take().map(|mut node| {
            self.head = node.next.take();
            self.len -= 1;
            node
        })
    }

    pub fn find(&self, key: &str) -> Option<&Entry> {
        self.iter().find(|entry| entry.key() == key)
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut Entry> {
        let mut current = self.head.as_mut();
        while let Some(node) = current {
            if node.entry.key() == key {
                return Some(&mut node.entry);
            }
            current = node.next.as_mut();
        }
        None
    }

    /// Head to tail, i.e. most recently added key first.
    pub fn iter(&self) -> Iter {
        Iter {
            next: self.head.as_ref().map(|node| &**node),
        }
    }
}

impl Drop for Chain {
    // Unlink iteratively; the default drop would recurse once per node.
    fn drop(&mut self) {
        let mut current = self.head.take();
        while let Some(mut node) = current {
            current = node.next.take();
        }
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, entry) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

pub struct Iter<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    #[inline]
    fn next(&mut self) -> Option<&'a Entry> {
        self.next.map(|node| {
            self.next = node.next.as_ref().map(|next| &**next);
            node.entry()
        })
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Entry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
