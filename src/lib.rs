//! # StreamWindow
//!
//! Windowing primitives for streaming event processing.
//!
//! StreamWindow provides stateful window handlers that consume a sequence of
//! values one at a time and periodically emit an aggregate over a bounded
//! recent subset of that sequence. It is a building block for larger
//! event-processing pipelines, not a pipeline itself.
//!
//! ## Window Strategies
//!
//! - **Sliding**: fixed-size, overlapping; emits on every value once full
//! - **Tumbling**: fixed-size, non-overlapping; emits and clears when full
//! - **Monotonic**: size-free; a logical clock ticked per value decides when
//!   to emit
//! - **Timed**: size-free; an independent wall-clock schedule decides when
//!   to emit, decoupling emission cadence from arrival rate
//!
//! All four are sibling implementations of the single-method
//! [`Window`](window::Window) trait and share two leaf abstractions: a FIFO
//! [`RingBuffer`](buffer::RingBuffer) and a threshold-crossing
//! [`Clock`](clock::Clock). The timed strategy additionally owns a task on a
//! [`Scheduler`](scheduler::Scheduler) and must be cancelled explicitly.
//!
//! ## Quick Start
//!
//! ```rust
//! use streamwindow::buffer::RingBuffer;
//! use streamwindow::window::{TumblingWindow, Window};
//!
//! let mut totals = Vec::new();
//! {
//!   let mut window = TumblingWindow::new(
//!     2,
//!     |buffer: &RingBuffer<i64>| buffer.iter().sum::<i64>(),
//!     |total| totals.push(total),
//!   )
//!   .unwrap();
//!   for value in [1, 2, 3, 4] {
//!     window.consume(value);
//!   }
//! }
//! assert_eq!(totals, vec![3, 7]);
//! ```

// Documentation enforcement - treat missing docs as errors
#![deny(missing_docs)]

/// FIFO buffers backing window state.
pub mod buffer;
/// Threshold-crossing clocks driving window emission.
pub mod clock;
/// Error types for window construction.
pub mod error;
/// Periodic task scheduling for wall-clock-driven windows.
pub mod scheduler;
/// Window handlers: sliding, tumbling, monotonic, and timed strategies.
pub mod window;
