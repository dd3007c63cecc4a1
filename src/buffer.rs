//! FIFO buffers backing window state.
//!
//! A [`RingBuffer`] is an ordered sequence of values with an optional fixed
//! capacity. Bounded buffers evict their oldest element when appended beyond
//! capacity, so `len() <= capacity` holds at all times. Unbounded buffers
//! never evict; the size-free window strategies (monotonic, timed) use them
//! and rely on emission to clear accumulated values.
//!
//! Aggregate functions read buffer contents through [`RingBuffer::iter`],
//! which yields elements in insertion order (oldest first).

use std::collections::VecDeque;

/// An ordered FIFO buffer with an optional fixed capacity.
///
/// Each buffer is owned exclusively by one window instance; the buffer itself
/// provides no synchronization.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
  items: VecDeque<T>,
  capacity: Option<usize>,
}

impl<T> RingBuffer<T> {
  /// Creates a buffer that holds at most `capacity` elements.
  ///
  /// Appending to a full buffer evicts the oldest element first. The capacity
  /// is fixed for the buffer's lifetime.
  ///
  /// # Panics
  ///
  /// Panics if `capacity` is zero. Window constructors validate their size
  /// before building a buffer, so this is a programming error, not a
  /// configuration error.
  pub fn bounded(capacity: usize) -> Self {
    assert!(capacity > 0, "buffer capacity must be greater than zero");
    Self {
      items: VecDeque::with_capacity(capacity),
      capacity: Some(capacity),
    }
  }

  /// Creates a buffer without a capacity bound. Nothing is ever evicted.
  pub fn unbounded() -> Self {
    Self {
      items: VecDeque::new(),
      capacity: None,
    }
  }

  /// Appends a value at the tail.
  ///
  /// If the buffer is bounded and already full, the head element is evicted
  /// first, preserving `len() <= capacity`.
  pub fn append(&mut self, value: T) {
    if let Some(capacity) = self.capacity {
      if self.items.len() == capacity {
        self.items.pop_front();
      }
    }
    self.items.push_back(value);
  }

  /// Returns true if the buffer is bounded and holds `capacity` elements.
  ///
  /// Unbounded buffers are never full.
  pub fn is_full(&self) -> bool {
    match self.capacity {
      Some(capacity) => self.items.len() == capacity,
      None => false,
    }
  }

  /// Returns the number of buffered elements.
  pub fn len(&self) -> usize {
    self.items.len()
  }

  /// Returns true if the buffer holds no elements.
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Returns the capacity bound, or `None` for unbounded buffers.
  pub fn capacity(&self) -> Option<usize> {
    self.capacity
  }

  /// Removes all elements. The capacity bound is unchanged.
  pub fn clear(&mut self) {
    self.items.clear();
  }

  /// Iterates over the buffered elements in insertion order (oldest first).
  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.items.iter()
  }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
  type Item = &'a T;
  type IntoIter = std::collections::vec_deque::Iter<'a, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.items.iter()
  }
}
