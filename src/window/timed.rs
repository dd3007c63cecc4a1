//! Size-free windows driven by a wall-clock schedule.

use super::Window;
use crate::buffer::RingBuffer;
use crate::clock::Clock;
use crate::error::{WindowError, WindowResult};
use crate::scheduler::{ScheduleHandle, Scheduler, TokioScheduler};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{error, trace};

/// Window whose emission boundary is an independent wall-clock schedule.
///
/// Two actors operate on the same window state:
///
/// - **Caller thread(s)**: [`consume`](Window::consume) appends the value to
///   the buffer — no clock interaction, no emission.
/// - **Scheduler task**: registered at construction, fires every
///   `tick_period` starting immediately; each firing ticks the clock and,
///   when it reports elapsed, aggregates, emits, clears the buffer, and
///   resets the clock.
///
/// Emission cadence is therefore decoupled from arrival rate: a quiet period
/// still emits aggregates of an empty buffer on schedule, and a burst of
/// values between two firings becomes one window regardless of count. The
/// buffer is unbounded; only the schedule clears it.
///
/// Buffer and clock live behind a single lock, so a caller's append and the
/// schedule's aggregate-and-clear are mutually exclusive: every emitted
/// window covers exactly the values appended since the previous firing, and
/// no value can be lost between the aggregate read and the clear. The emit
/// function runs under that lock on the scheduler's task; a slow emit
/// therefore also delays concurrent appends, intentionally absorbing
/// backpressure onto the emission path.
///
/// A panic in the aggregate or emit function is caught on the scheduler
/// task, logged, and the schedule keeps firing; the uncleared values remain
/// buffered and are covered by the next successful emission.
///
/// The window is valid while its scheduled task is active. Cancelling via
/// [`cancel`](TimedWindow::cancel) (or the [`handle`](TimedWindow::handle))
/// permanently stops emissions; values consumed afterwards accumulate
/// without bound. Teardown is never left to drop glue — cancel explicitly.
pub struct TimedWindow<T> {
  state: Arc<Mutex<TimedState<T>>>,
  handle: ScheduleHandle,
}

struct TimedState<T> {
  buffer: RingBuffer<T>,
  clock: Box<dyn Clock + Send>,
  name: String,
}

// A panicking firing poisons the lock with the state still consistent (an
// uncleared buffer is simply covered by the next firing), so recover the
// guard instead of propagating the poison.
fn lock_state<T>(state: &Mutex<TimedState<T>>) -> MutexGuard<'_, TimedState<T>> {
  state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(message) = payload.downcast_ref::<&str>() {
    (*message).to_string()
  } else if let Some(message) = payload.downcast_ref::<String>() {
    message.clone()
  } else {
    "non-string panic payload".to_string()
  }
}

impl<T: Send + 'static> TimedWindow<T> {
  /// Creates a timed window firing every `tick_period` on the default
  /// [`TokioScheduler`].
  ///
  /// Requires a running Tokio runtime. Returns
  /// [`WindowError::ZeroPeriod`] if `tick_period` is zero, before any task
  /// is scheduled.
  pub fn new<C, R, A, E>(
    clock: C,
    tick_period: Duration,
    aggregate: A,
    emit: E,
  ) -> WindowResult<Self>
  where
    C: Clock + Send + 'static,
    A: Fn(&RingBuffer<T>) -> R + Send + 'static,
    E: FnMut(R) + Send + 'static,
  {
    Self::with_scheduler(clock, tick_period, aggregate, emit, &TokioScheduler::new())
  }

  /// Creates a timed window on an injected scheduler.
  ///
  /// Tests substitute a [`ManualScheduler`](crate::scheduler::ManualScheduler)
  /// here to drive firings deterministically instead of waiting on real
  /// wall-clock time.
  pub fn with_scheduler<C, R, A, E>(
    clock: C,
    tick_period: Duration,
    aggregate: A,
    mut emit: E,
    scheduler: &dyn Scheduler,
  ) -> WindowResult<Self>
  where
    C: Clock + Send + 'static,
    A: Fn(&RingBuffer<T>) -> R + Send + 'static,
    E: FnMut(R) + Send + 'static,
  {
    if tick_period.is_zero() {
      return Err(WindowError::ZeroPeriod);
    }

    let state = Arc::new(Mutex::new(TimedState {
      buffer: RingBuffer::unbounded(),
      clock: Box::new(clock),
      name: "timed_window".to_string(),
    }));

    let task_state = Arc::clone(&state);
    let task = move || {
      let firing = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut state = lock_state(&task_state);
        state.clock.tick();
        if state.clock.is_elapsed() {
          let result = aggregate(&state.buffer);
          trace!(
            window = %state.name,
            buffered = state.buffer.len(),
            "Emitting window aggregate"
          );
          emit(result);
          state.buffer.clear();
          state.clock.reset();
        }
      }));
      if let Err(payload) = firing {
        // Keep the schedule alive: a failed emission must neither end
        // future firings silently nor take down the runtime.
        error!(
          panic = %panic_message(payload.as_ref()),
          "Scheduled window firing panicked"
        );
      }
    };

    let handle = scheduler.schedule(Duration::ZERO, tick_period, Box::new(task));
    Ok(Self { state, handle })
  }

  /// Sets the component name used in trace events.
  pub fn with_name(self, name: impl Into<String>) -> Self {
    lock_state(&self.state).name = name.into();
    self
  }

  /// Returns the handle to the scheduled firing task.
  pub fn handle(&self) -> &ScheduleHandle {
    &self.handle
  }

  /// Permanently stops future firings. Idempotent; an in-flight firing
  /// completes. The window keeps accepting values afterwards.
  pub fn cancel(&self) {
    self.handle.cancel();
  }

  /// Returns true once the firing schedule has been cancelled.
  pub fn is_cancelled(&self) -> bool {
    self.handle.is_cancelled()
  }

  /// Returns the number of values accumulated toward the current window.
  pub fn buffered_len(&self) -> usize {
    lock_state(&self.state).buffer.len()
  }
}

impl<T: Send + 'static> Window<T> for TimedWindow<T> {
  fn consume(&mut self, value: T) {
    lock_state(&self.state).buffer.append(value);
  }
}
