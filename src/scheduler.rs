//! Periodic task scheduling for wall-clock-driven windows.
//!
//! A [`Scheduler`] re-invokes a task every `period`, starting after
//! `initial_delay`, on an execution context independent of the caller. The
//! returned [`ScheduleHandle`] is the only teardown surface: cancelling it
//! stops future invocations, while an in-flight invocation completes.
//!
//! Two implementations are provided:
//!
//! - [`TokioScheduler`]: the default, backed by a spawned Tokio task driving
//!   a [`tokio::time::interval`]. Requires a running Tokio runtime.
//! - [`ManualScheduler`]: a deterministic test double that runs registered
//!   tasks on the calling thread when [`fire`](ManualScheduler::fire) is
//!   invoked, with no real time involved.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// A periodic task. Invoked once per schedule firing.
pub type ScheduledTask = Box<dyn FnMut() + Send>;

/// Schedules tasks for repeated execution at a fixed period.
pub trait Scheduler {
  /// Registers `task` to be re-invoked every `period`, starting after
  /// `initial_delay` (a zero delay means the first invocation is immediate).
  ///
  /// `period` must be greater than zero; callers validate before scheduling.
  /// The task runs off the caller's thread for real schedulers; test
  /// schedulers may run it wherever their firing is driven from.
  fn schedule(
    &self,
    initial_delay: Duration,
    period: Duration,
    task: ScheduledTask,
  ) -> ScheduleHandle;
}

/// Handle to a scheduled task.
///
/// Dropping the handle does not stop the schedule; cancellation is always
/// explicit.
#[derive(Debug, Clone)]
pub struct ScheduleHandle {
  token: CancellationToken,
}

impl ScheduleHandle {
  fn new(token: CancellationToken) -> Self {
    Self { token }
  }

  /// Stops future invocations. An in-flight invocation completes.
  ///
  /// Idempotent: cancelling an already-cancelled handle has no effect.
  pub fn cancel(&self) {
    self.token.cancel();
  }

  /// Returns true once the schedule has been cancelled.
  pub fn is_cancelled(&self) -> bool {
    self.token.is_cancelled()
  }
}

/// Scheduler backed by a spawned Tokio task.
///
/// Each scheduled task runs on the Tokio runtime active when
/// [`schedule`](Scheduler::schedule) is called. Missed ticks (when a task
/// invocation outlasts the period) are skipped rather than bursted, keeping
/// the firing cadence aligned to the period.
#[derive(Debug, Clone, Default)]
pub struct TokioScheduler;

impl TokioScheduler {
  /// Creates a new Tokio-backed scheduler.
  pub fn new() -> Self {
    Self
  }
}

impl Scheduler for TokioScheduler {
  fn schedule(
    &self,
    initial_delay: Duration,
    period: Duration,
    mut task: ScheduledTask,
  ) -> ScheduleHandle {
    let token = CancellationToken::new();
    let guard = token.clone();

    tokio::spawn(async move {
      if !initial_delay.is_zero() {
        tokio::select! {
          biased;
          _ = guard.cancelled() => return,
          _ = tokio::time::sleep(initial_delay) => {}
        }
      }

      let mut interval = tokio::time::interval(period);
      interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

      loop {
        // Checked first so a cancel that races a due tick always wins and
        // no firing happens after cancellation is observed.
        tokio::select! {
          biased;
          _ = guard.cancelled() => break,
          _ = interval.tick() => task(),
        }
      }
    });

    ScheduleHandle::new(token)
  }
}

/// Deterministic scheduler for tests and simulations.
///
/// Registered tasks run synchronously on the thread that calls
/// [`fire`](ManualScheduler::fire); `initial_delay` and `period` are
/// accepted and ignored. Clones share the same task list, so a test can
/// keep one clone to drive firings after handing the scheduler to a window.
#[derive(Clone, Default)]
pub struct ManualScheduler {
  tasks: Arc<Mutex<Vec<ManualTask>>>,
}

struct ManualTask {
  run: ScheduledTask,
  token: CancellationToken,
}

impl ManualScheduler {
  /// Creates a scheduler with no registered tasks.
  pub fn new() -> Self {
    Self::default()
  }

  /// Runs every non-cancelled registered task once, in registration order.
  pub fn fire(&self) {
    let mut tasks = self.tasks.lock().expect("lock");
    tasks.retain(|task| !task.token.is_cancelled());
    for task in tasks.iter_mut() {
      (task.run)();
    }
  }

  /// Runs [`fire`](Self::fire) `n` times.
  pub fn fire_n(&self, n: usize) {
    for _ in 0..n {
      self.fire();
    }
  }

  /// Returns the number of registered, non-cancelled tasks.
  pub fn task_count(&self) -> usize {
    let mut tasks = self.tasks.lock().expect("lock");
    tasks.retain(|task| !task.token.is_cancelled());
    tasks.len()
  }
}

impl Scheduler for ManualScheduler {
  fn schedule(
    &self,
    _initial_delay: Duration,
    _period: Duration,
    task: ScheduledTask,
  ) -> ScheduleHandle {
    let token = CancellationToken::new();
    self.tasks.lock().expect("lock").push(ManualTask {
      run: task,
      token: token.clone(),
    });
    ScheduleHandle::new(token)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicUsize, Ordering};

  fn counting_task(count: &Arc<AtomicUsize>) -> ScheduledTask {
    let count = Arc::clone(count);
    Box::new(move || {
      count.fetch_add(1, Ordering::SeqCst);
    })
  }

  #[test]
  fn test_manual_scheduler_fires_on_demand() {
    let scheduler = ManualScheduler::new();
    let count = Arc::new(AtomicUsize::new(0));
    let _handle = scheduler.schedule(
      Duration::ZERO,
      Duration::from_millis(10),
      counting_task(&count),
    );

    assert_eq!(count.load(Ordering::SeqCst), 0);
    scheduler.fire();
    assert_eq!(count.load(Ordering::SeqCst), 1);
    scheduler.fire_n(3);
    assert_eq!(count.load(Ordering::SeqCst), 4);
  }

  #[test]
  fn test_manual_scheduler_cancel_removes_task() {
    let scheduler = ManualScheduler::new();
    let count = Arc::new(AtomicUsize::new(0));
    let handle = scheduler.schedule(
      Duration::ZERO,
      Duration::from_millis(10),
      counting_task(&count),
    );

    scheduler.fire();
    handle.cancel();
    assert!(handle.is_cancelled());
    scheduler.fire_n(5);
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(scheduler.task_count(), 0);
  }

  #[test]
  fn test_manual_scheduler_cancel_is_idempotent() {
    let scheduler = ManualScheduler::new();
    let count = Arc::new(AtomicUsize::new(0));
    let handle = scheduler.schedule(
      Duration::ZERO,
      Duration::from_millis(10),
      counting_task(&count),
    );

    handle.cancel();
    handle.cancel();
    scheduler.fire();
    assert_eq!(count.load(Ordering::SeqCst), 0);
  }

  #[tokio::test(start_paused = true)]
  async fn test_tokio_scheduler_fires_at_period() {
    let scheduler = TokioScheduler::new();
    let count = Arc::new(AtomicUsize::new(0));
    let handle = scheduler.schedule(
      Duration::ZERO,
      Duration::from_millis(100),
      counting_task(&count),
    );

    // First invocation is immediate.
    tokio::task::yield_now().await;
    assert_eq!(count.load(Ordering::SeqCst), 1);

    tokio::time::advance(Duration::from_millis(100)).await;
    tokio::task::yield_now().await;
    assert_eq!(count.load(Ordering::SeqCst), 2);

    tokio::time::advance(Duration::from_millis(300)).await;
    tokio::task::yield_now().await;
    assert!(count.load(Ordering::SeqCst) >= 3);

    handle.cancel();
  }

  #[tokio::test(start_paused = true)]
  async fn test_tokio_scheduler_honors_initial_delay() {
    let scheduler = TokioScheduler::new();
    let count = Arc::new(AtomicUsize::new(0));
    let handle = scheduler.schedule(
      Duration::from_millis(50),
      Duration::from_millis(100),
      counting_task(&count),
    );

    tokio::task::yield_now().await;
    assert_eq!(count.load(Ordering::SeqCst), 0);

    tokio::time::advance(Duration::from_millis(50)).await;
    tokio::task::yield_now().await;
    assert_eq!(count.load(Ordering::SeqCst), 1);

    handle.cancel();
  }

  #[tokio::test(start_paused = true)]
  async fn test_tokio_scheduler_cancel_stops_firing() {
    let scheduler = TokioScheduler::new();
    let count = Arc::new(AtomicUsize::new(0));
    let handle = scheduler.schedule(
      Duration::ZERO,
      Duration::from_millis(100),
      counting_task(&count),
    );

    tokio::task::yield_now().await;
    assert_eq!(count.load(Ordering::SeqCst), 1);

    handle.cancel();
    tokio::time::advance(Duration::from_millis(500)).await;
    tokio::task::yield_now().await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
  }
}
