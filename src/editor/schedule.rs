//! Work deferred until after the next render.
//!
//! Handlers run in the middle of a frame, before their effect is visible.
//! Anything that needs the new state on screen (moving focus into a field
//! that was just shown, for instance) is queued here and run once the next
//! full frame has been drawn.

use log::debug;

/// Handle for cancelling a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// Widgets that can receive deferred focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Surface,
    Title,
    UrlInput,
    LinkDialog,
}

/// Work the panel defers to after a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredTask {
    Focus(FocusTarget),
}

#[derive(Debug)]
struct Scheduled<T> {
    id: TaskId,
    task: T,
    /// Set once a frame has started after the task was queued
    armed: bool,
}

/// Queue of tasks waiting for a completed render.
#[derive(Debug)]
pub struct AfterRender<T> {
    next_id: u64,
    queue: Vec<Scheduled<T>>,
    shut_down: bool,
}

impl<T> Default for AfterRender<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            queue: Vec::new(),
            shut_down: false,
        }
    }
}

impl<T> AfterRender<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task. Returns `None` once the scheduler has shut down.
    pub fn schedule(&mut self, task: T) -> Option<TaskId> {
        if self.shut_down {
            return None;
        }
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.queue.push(Scheduled {
            id,
            task,
            armed: false,
        });
        Some(id)
    }

    /// Drop a task that has not run yet. Returns whether it was pending.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|scheduled| scheduled.id != id);
        self.queue.len() != before
    }

    pub fn cancel_all(&mut self) {
        if !self.queue.is_empty() {
            debug!("Cancelling {} deferred task(s)", self.queue.len());
        }
        self.queue.clear();
    }

    /// Cancel everything and refuse further work.
    pub fn shutdown(&mut self) {
        self.cancel_all();
        self.shut_down = true;
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Mark the start of a frame. Tasks queued before this point become due
    /// when the frame finishes.
    pub fn begin_frame(&mut self) {
        for scheduled in &mut self.queue {
            scheduled.armed = true;
        }
    }

    /// Remove and return, in queue order, the tasks whose render has completed.
    pub fn take_due(&mut self) -> Vec<T> {
        let (due, waiting): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.queue).into_iter().partition(|s| s.armed);
        self.queue = waiting;
        due.into_iter().map(|scheduled| scheduled.task).collect()
    }
}
