//! Cooperative tick scheduler.
//!
//! [`TaskScheduler`] holds one-shot ("timeout") and repeating ("interval")
//! countdowns measured in simulation ticks. The
//! [`tick_scheduler`](crate::systems::scheduler::tick_scheduler) system calls
//! [`TaskScheduler::tick`] exactly once per step, before any actor queries
//! readiness for that step, so pausing the driver pauses every countdown.
//!
//! Operations on unknown ids never fail: they answer `false` (or "done"),
//! which makes cancel and reset idempotent. [`TaskScheduler::is_task_done`]
//! accepts `None` as "never scheduled", which reads as ready.
//!
//! # Example
//!
//! ```
//! use actorcore::resources::scheduler::TaskScheduler;
//!
//! let mut scheduler = TaskScheduler::default();
//! let cooldown = scheduler.set_timeout(2);
//! scheduler.tick();
//! assert!(!scheduler.is_task_done(cooldown));
//! scheduler.tick();
//! assert!(scheduler.is_task_done(cooldown));
//! assert!(!scheduler.cancel(cooldown));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use bevy_ecs::prelude::Resource;
use smallvec::SmallVec;

/// Handle of a scheduled task. Ids are never reused within one scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl TaskId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

pub type TaskCallback = Box<dyn FnMut() + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Fires once after its delay, then disappears.
    Timeout,
    /// Fires every `interval + 1` ticks until cancelled.
    Interval,
}

struct Task {
    kind: TaskKind,
    length: u32,
    // Timeout: ticks left. Interval: ticks since the last firing.
    counter: u32,
    callback: Option<TaskCallback>,
}

impl Task {
    /// Step once; returns true when the task has finished for good.
    fn step(&mut self) -> bool {
        match self.kind {
            TaskKind::Timeout => {
                self.counter = self.counter.saturating_sub(1);
                if self.counter == 0 {
                    self.fire();
                    return true;
                }
                false
            }
            TaskKind::Interval => {
                if self.counter >= self.length {
                    self.counter = 0;
                    self.fire();
                } else {
                    self.counter += 1;
                }
                false
            }
        }
    }

    fn fire(&mut self) {
        if let Some(callback) = self.callback.as_mut() {
            callback();
        }
    }

    fn restart(&mut self) {
        self.counter = match self.kind {
            TaskKind::Timeout => self.length,
            TaskKind::Interval => 0,
        };
    }

    fn remaining(&self) -> u64 {
        match self.kind {
            TaskKind::Timeout => u64::from(self.counter),
            TaskKind::Interval => u64::from(self.length) + 1 - u64::from(self.counter),
        }
    }
}

/// Live task set advanced once per tick.
#[derive(Resource, Default)]
pub struct TaskScheduler {
    tasks: BTreeMap<TaskId, Task>,
    last_id: u64,
    ticks: u64,
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, kind: TaskKind, length: u32, callback: Option<TaskCallback>) -> TaskId {
        self.last_id += 1;
        let id = TaskId(self.last_id);
        let mut task = Task {
            kind,
            length,
            counter: 0,
            callback,
        };
        task.restart();
        self.tasks.insert(id, task);
        id
    }

    /// One-shot task that is done after exactly `delay` ticks.
    pub fn set_timeout(&mut self, delay: u32) -> TaskId {
        self.insert(TaskKind::Timeout, delay, None)
    }

    /// One-shot task that runs `callback` when its `delay` runs out.
    pub fn set_timeout_with<F>(&mut self, callback: F, delay: u32) -> TaskId
    where
        F: FnMut() + Send + Sync + 'static,
    {
        self.insert(TaskKind::Timeout, delay, Some(Box::new(callback)))
    }

    /// Repeating task running `callback` every `interval + 1` ticks.
    pub fn set_interval<F>(&mut self, callback: F, interval: u32) -> TaskId
    where
        F: FnMut() + Send + Sync + 'static,
    {
        self.insert(TaskKind::Interval, interval, Some(Box::new(callback)))
    }

    /// True unless `id` names a live task. `None` and never-issued ids are done.
    pub fn is_task_done(&self, id: impl Into<Option<TaskId>>) -> bool {
        match id.into() {
            Some(id) => !self.tasks.contains_key(&id),
            None => true,
        }
    }

    /// Restart a task's countdown from its original length.
    pub fn reset(&mut self, id: TaskId) -> bool {
        match self.tasks.get_mut(&id) {
            Some(task) => {
                task.restart();
                true
            }
            None => false,
        }
    }

    /// Drop a task without running its callback.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.tasks.remove(&id).is_some()
    }

    /// Cancel everything; ids keep counting up.
    pub fn clear_all(&mut self) {
        self.tasks.clear();
    }

    /// Advance every live task by one tick, in creation order.
    ///
    /// Returns the ids of one-shot tasks that completed (and were removed).
    pub fn tick(&mut self) -> SmallVec<[TaskId; 8]> {
        self.ticks += 1;
        let mut finished = SmallVec::new();
        for (id, task) in self.tasks.iter_mut() {
            if task.step() {
                finished.push(*id);
            }
        }
        for id in &finished {
            self.tasks.remove(id);
        }
        finished
    }

    /// Ticks until the task next completes or fires.
    pub fn remaining(&self, id: TaskId) -> Option<u64> {
        self.tasks.get(&id).map(Task::remaining)
    }

    pub fn kind(&self, id: TaskId) -> Option<TaskKind> {
        self.tasks.get(&id).map(|task| task.kind)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of times [`TaskScheduler::tick`] has run.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl fmt::Debug for TaskScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskScheduler")
            .field("ticks", &self.ticks)
            .field("last_id", &self.last_id)
            .field(
                "tasks",
                &self
                    .tasks
                    .iter()
                    .map(|(id, task)| (id.get(), task.kind, task.remaining()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
