//! Thread-local cooperative event loop
//!
//! Every continuation in the crate reaches the loop through [`schedule`]. The loop
//! owns three queues:
//!
//! - a fast FIFO queue fed by [`defer`],
//! - a low-priority FIFO queue fed by [`yield_later`],
//! - a timer heap fed by [`after`].
//!
//! [`schedule`] counts consecutive fast defers. When the count exceeds
//! [`SchedulerConfig::max_loops`] one task is sent to the low-priority queue instead
//! and the count restarts, which lets due timers and other pending work interleave
//! with long continuation chains.
//!
//! Nothing runs until the loop is turned, either by [`block_on`], [`run_until_idle`]
//! or [`turn`].

use crate::config::SchedulerConfig;
use crate::future::Future;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::trace;

/// A unit of work queued on the event loop
pub type Task = Box<dyn FnOnce()>;

struct Timer {
    deadline: Instant,
    seq: u64,
    task: Task,
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl Eq for Timer {}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Reversed so the BinaryHeap pops the earliest deadline first, ties in arming order
impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Snapshot of the loop's queues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopStats {
    pub fast_pending: usize,
    pub slow_pending: usize,
    pub timers_pending: usize,
    /// Fast defers issued since the last low-priority yield
    pub loops: usize,
}

/// Outcome of a single [`turn`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// A task ran
    Ran,
    /// Only timers are pending; the thread slept until the earliest one was due
    Slept,
    /// Nothing is queued
    Idle,
}

enum Next {
    Run(Task),
    Sleep(Duration),
    Idle,
}

struct EventLoop {
    fast: VecDeque<Task>,
    slow: VecDeque<Task>,
    timers: BinaryHeap<Timer>,
    loops: usize,
    timer_seq: u64,
    config: SchedulerConfig,
}

impl EventLoop {
    fn new(config: SchedulerConfig) -> Self {
        EventLoop {
            fast: VecDeque::new(),
            slow: VecDeque::new(),
            timers: BinaryHeap::new(),
            loops: 0,
            timer_seq: 0,
            config,
        }
    }

    fn schedule(&mut self, task: Task) {
        if self.loops > self.config.max_loops {
            trace!(loops = self.loops, "yielding to the low-priority queue");
            self.loops = 0;
            self.slow.push_back(task);
        } else {
            self.loops += 1;
            self.fast.push_back(task);
        }
    }

    fn arm(&mut self, duration: Duration, task: Task) {
        let seq = self.timer_seq;
        self.timer_seq += 1;
        trace!(?duration, seq, "timer armed");
        self.timers.push(Timer {
            deadline: Instant::now() + duration,
            seq,
            task,
        });
    }

    fn fire_due_timers(&mut self) {
        let now = Instant::now();
        while self.timers.peek().is_some_and(|timer| timer.deadline <= now) {
            if let Some(timer) = self.timers.pop() {
                trace!(seq = timer.seq, "timer fired");
                self.fast.push_back(timer.task);
            }
        }
    }

    fn next(&mut self) -> Next {
        if let Some(task) = self.fast.pop_front() {
            return Next::Run(task);
        }
        self.fire_due_timers();
        if let Some(task) = self.fast.pop_front() {
            return Next::Run(task);
        }
        if let Some(task) = self.slow.pop_front() {
            return Next::Run(task);
        }
        match self.timers.peek() {
            Some(timer) => Next::Sleep(timer.deadline.saturating_duration_since(Instant::now())),
            None => Next::Idle,
        }
    }

    fn stats(&self) -> LoopStats {
        LoopStats {
            fast_pending: self.fast.len(),
            slow_pending: self.slow.len(),
            timers_pending: self.timers.len(),
            loops: self.loops,
        }
    }
}

// Each thread's loop starts from `SchedulerConfig::from_env`
thread_local! {
    static EVENT_LOOP: RefCell<EventLoop> = RefCell::new(EventLoop::new(SchedulerConfig::from_env()));
}

fn with_loop<R>(f: impl FnOnce(&mut EventLoop) -> R) -> R {
    EVENT_LOOP.with(|event_loop| f(&mut event_loop.borrow_mut()))
}

/// Replace the configuration of this thread's event loop
pub fn configure(config: SchedulerConfig) {
    with_loop(|event_loop| event_loop.config = config);
}

/// Configuration currently used by this thread's event loop
pub fn config() -> SchedulerConfig {
    with_loop(|event_loop| event_loop.config)
}

/// Run `task` on a later turn, applying the periodic low-priority yield
pub fn schedule(task: impl FnOnce() + 'static) {
    with_loop(|event_loop| event_loop.schedule(Box::new(task)));
}

/// Queue `task` on the fast queue
pub fn defer(task: impl FnOnce() + 'static) {
    with_loop(|event_loop| event_loop.fast.push_back(Box::new(task)));
}

/// Queue `task` behind all fast work and due timers
pub fn yield_later(task: impl FnOnce() + 'static) {
    with_loop(|event_loop| event_loop.slow.push_back(Box::new(task)));
}

/// Run `task` once, no earlier than `duration` from now
pub fn after(duration: Duration, task: impl FnOnce() + 'static) {
    with_loop(|event_loop| event_loop.arm(duration, Box::new(task)));
}

pub fn stats() -> LoopStats {
    with_loop(|event_loop| event_loop.stats())
}

/// Run a single step of the loop
///
/// The loop is not borrowed while the task runs, so tasks may schedule more work.
pub fn turn() -> Turn {
    let next = with_loop(|event_loop| event_loop.next());
    match next {
        Next::Run(task) => {
            task();
            Turn::Ran
        }
        Next::Sleep(duration) => {
            std::thread::sleep(duration);
            Turn::Slept
        }
        Next::Idle => Turn::Idle,
    }
}

/// Turn the loop until nothing is queued, returning the number of tasks that ran
pub fn run_until_idle() -> usize {
    let mut ran = 0;
    loop {
        match turn() {
            Turn::Ran => ran += 1,
            Turn::Slept => {}
            Turn::Idle => return ran,
        }
    }
}

/// Drive the loop until `future` settles
///
/// Returns `None` when the loop runs out of work before the future settled, which
/// only happens for futures built with [`Future::new`] that drop their continuation.
/// Work queued by other computations is left on the loop once the future settled.
pub fn block_on<T: 'static, E: 'static>(future: Future<T, E>) -> Option<Result<T, E>> {
    let slot: Rc<RefCell<Option<Result<T, E>>>> = Rc::new(RefCell::new(None));
    let writer = Rc::clone(&slot);
    future.run(move |outcome| {
        *writer.borrow_mut() = Some(outcome);
    });

    loop {
        let settled = slot.borrow_mut().take();
        if settled.is_some() {
            return settled;
        }
        if turn() == Turn::Idle {
            return slot.borrow_mut().take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_schedule_is_deferred() {
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        schedule(move || flag.set(true));

        assert!(!ran.get());
        assert_eq!(run_until_idle(), 1);
        assert!(ran.get());
    }

    #[test]
    fn test_defer_is_fifo() {
        let order = Rc::new(RefCell::new(Vec::new()));
        for i in 0..5 {
            let order = Rc::clone(&order);
            defer(move || order.borrow_mut().push(i));
        }
        run_until_idle();
        assert_eq!(*order.borrow(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_yield_later_runs_after_fast_work() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let slow = Rc::clone(&order);
        yield_later(move || slow.borrow_mut().push("slow"));
        let fast = Rc::clone(&order);
        defer(move || fast.borrow_mut().push("fast"));

        run_until_idle();
        assert_eq!(*order.borrow(), vec!["fast", "slow"]);
    }

    #[test]
    fn test_tasks_can_schedule_more_work() {
        let count = Rc::new(Cell::new(0));
        fn step(count: Rc<Cell<usize>>) {
            count.set(count.get() + 1);
            if count.get() < 10 {
                schedule(move || step(count));
            }
        }
        let counter = Rc::clone(&count);
        schedule(move || step(counter));

        run_until_idle();
        assert_eq!(count.get(), 10);
    }

    #[test]
    fn test_fresh_loop_reads_environment_config() {
        let fresh = std::thread::spawn(config).join().ok();
        assert_eq!(fresh, Some(SchedulerConfig::from_env()));
    }

    #[test]
    fn test_periodic_low_priority_yield() {
        configure(SchedulerConfig::default().with_max_loops(3));
        for _ in 0..4 {
            schedule(|| {});
        }
        let before = stats();
        assert_eq!(before.fast_pending, 4);
        assert_eq!(before.slow_pending, 0);

        // The counter exceeded max_loops: this one yields and resets the counter
        schedule(|| {});
        let after_yield = stats();
        assert_eq!(after_yield.fast_pending, 4);
        assert_eq!(after_yield.slow_pending, 1);
        assert_eq!(after_yield.loops, 0);

        run_until_idle();
        configure(SchedulerConfig::default());
    }

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let late = Rc::clone(&order);
        after(Duration::from_millis(20), move || late.borrow_mut().push(20));
        let early = Rc::clone(&order);
        after(Duration::from_millis(5), move || early.borrow_mut().push(5));

        let started = Instant::now();
        run_until_idle();
        assert_eq!(*order.borrow(), vec![5, 20]);
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_timer_interleaves_with_yielding_chain() {
        configure(SchedulerConfig::default().with_max_loops(8));
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        after(Duration::ZERO, move || flag.set(true));

        // An unbounded chain that stops once the timer has fired
        fn spin(fired: Rc<Cell<bool>>, steps: Rc<Cell<usize>>) {
            steps.set(steps.get() + 1);
            if !fired.get() {
                schedule(move || spin(fired, steps));
            }
        }
        let steps = Rc::new(Cell::new(0));
        let chain_flag = Rc::clone(&fired);
        let chain_steps = Rc::clone(&steps);
        schedule(move || spin(chain_flag, chain_steps));

        run_until_idle();
        assert!(fired.get());
        assert!(steps.get() > 0);
        configure(SchedulerConfig::default());
    }

    #[test]
    fn test_block_on_unit() {
        assert_eq!(block_on(Future::<_, ()>::unit(7)), Some(Ok(7)));
    }

    #[test]
    fn test_block_on_dropped_continuation() {
        let stalled: Future<i32, ()> = Future::new(|_continuation| {});
        assert_eq!(block_on(stalled), None);
    }

    #[test]
    fn test_idle_loop() {
        assert_eq!(turn(), Turn::Idle);
        assert_eq!(run_until_idle(), 0);
    }
}
