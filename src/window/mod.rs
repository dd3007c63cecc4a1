//! Window handlers for streaming event processing.
//!
//! A window handler consumes one value at a time and, as a side effect,
//! invokes an emit function with an aggregate whenever its policy decides a
//! window is complete. Four strategies are provided, each encoding a
//! distinct policy for *when* to emit and *what* survives into the next
//! window:
//!
//! - [`SlidingWindow`]: fixed-size, overlapping; emits on every value once
//!   the buffer is full.
//! - [`TumblingWindow`]: fixed-size, non-overlapping; emits and clears when
//!   the buffer fills.
//! - [`MonotonicWindow`]: size-free; a logical clock ticked per value
//!   decides the emission boundary.
//! - [`TimedWindow`]: size-free; an independent wall-clock schedule decides
//!   the emission boundary, decoupling emission cadence from arrival rate.
//!
//! The four strategies are sibling implementations of the single-method
//! [`Window`] trait, not a hierarchy. Each closes over a
//! [`RingBuffer`](crate::buffer::RingBuffer), an aggregate function reading
//! it, and an emit function receiving the aggregate result.
//!
//! # Example
//!
//! ```rust
//! use streamwindow::buffer::RingBuffer;
//! use streamwindow::window::{SlidingWindow, Window};
//!
//! let mut sums = Vec::new();
//! {
//!   let mut window = SlidingWindow::new(
//!     2,
//!     |buffer: &RingBuffer<i64>| buffer.iter().sum::<i64>(),
//!     |sum| sums.push(sum),
//!   )
//!   .unwrap();
//!   for value in [1, 2, 3, 4] {
//!     window.consume(value);
//!   }
//! }
//! assert_eq!(sums, vec![3, 5, 7]);
//! ```

mod monotonic;
mod sliding;
mod timed;
mod tumbling;

pub use monotonic::MonotonicWindow;
pub use sliding::SlidingWindow;
pub use timed::TimedWindow;
pub use tumbling::TumblingWindow;

use futures::{Stream, StreamExt, pin_mut};

/// A stateful handler consuming one value at a time.
///
/// Sliding, tumbling, and monotonic windows carry a single-threaded
/// contract: one logical caller at a time (or external serialization).
/// [`TimedWindow`] is additionally mutated by its scheduler task; see its
/// documentation for the two-actor contract.
pub trait Window<T> {
  /// Feeds one value into the window.
  ///
  /// May invoke the window's emit function before returning. Panics from
  /// the aggregate or emit function propagate to the caller.
  fn consume(&mut self, value: T);
}

/// Drives a stream to completion through a window handler.
///
/// Consumes every item of `stream` in order via [`Window::consume`] and
/// returns the handler once the stream ends, so callers can inspect or keep
/// feeding it.
///
/// # Example
///
/// ```rust
/// use streamwindow::buffer::RingBuffer;
/// use streamwindow::window::{TumblingWindow, drive};
///
/// # tokio_test::block_on(async {
/// let mut totals = Vec::new();
/// let window = TumblingWindow::new(
///   2,
///   |buffer: &RingBuffer<i64>| buffer.iter().sum::<i64>(),
///   |sum| totals.push(sum),
/// )
/// .unwrap();
/// drive(futures::stream::iter([1, 2, 3, 4]), window).await;
/// assert_eq!(totals, vec![3, 7]);
/// # });
/// ```
pub async fn drive<S, W>(stream: S, mut window: W) -> W
where
  S: Stream,
  W: Window<S::Item>,
{
  pin_mut!(stream);
  while let Some(value) = stream.next().await {
    window.consume(value);
  }
  window
}
