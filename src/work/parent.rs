//! Parent side of the work registry

use std::collections::BTreeMap;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use super::runner::{RetryPolicy, run_child};
use super::types::{Work, WorkEvent, WorkId, WorkState, WorkUpdate};

struct Child<W: Work> {
    name: String,
    state: WorkState,
    /// Present until the child is advanced
    work: Option<W>,
    /// Present after success until taken
    output: Option<W::Output>,
    handle: Option<JoinHandle<()>>,
}

/// Registry of child work owned by a single parent
pub struct WorkParent<W: Work> {
    name: String,
    children: BTreeMap<WorkId, Child<W>>,
    next_id: u64,
    policy: RetryPolicy,
    /// Children only ever see a weak handle to this sender
    events: UnboundedSender<WorkEvent<W::Output>>,
}

impl<W: Work> WorkParent<W> {
    /// Create a parent whose children report to `events`
    pub fn new(
        name: impl Into<String>,
        policy: RetryPolicy,
        events: UnboundedSender<WorkEvent<W::Output>>,
    ) -> Self {
        Self {
            name: name.into(),
            children: BTreeMap::new(),
            next_id: 0,
            policy,
            events,
        }
    }

    /// Register a child in the `Pending` state
    pub fn add_work(&mut self, work: W) -> WorkId {
        let id = WorkId(self.next_id);
        self.next_id += 1;

        debug!(parent = %self.name, work = %work.name(), %id, "Adding work");
        self.children.insert(
            id,
            Child {
                name: work.name().to_string(),
                state: WorkState::Pending,
                work: Some(work),
                output: None,
                handle: None,
            },
        );
        id
    }

    /// Spawn every pending child
    pub fn advance_children(&mut self) {
        for (id, child) in self.children.iter_mut() {
            if child.state != WorkState::Pending {
                continue;
            }
            let Some(work) = child.work.take() else {
                continue;
            };

            trace!(parent = %self.name, work = %child.name, %id, "Advancing work");
            child.state = WorkState::Running { attempt: 0 };
            child.handle = Some(tokio::spawn(run_child(
                *id,
                work,
                self.policy.clone(),
                self.events.downgrade(),
            )));
        }
    }

    /// Record a state change reported by a child.
    ///
    /// Returns the child's id when the change was applied, or `None` for
    /// events about children that were cleared or already finished.
    pub fn apply(&mut self, event: WorkEvent<W::Output>) -> Option<WorkId> {
        let Some(child) = self.children.get_mut(&event.id) else {
            trace!(parent = %self.name, id = %event.id, "Ignoring event for unknown work");
            return None;
        };
        if child.state.is_terminal() {
            trace!(parent = %self.name, id = %event.id, "Ignoring event for finished work");
            return None;
        }

        child.state = match event.update {
            WorkUpdate::Running { attempt } => WorkState::Running { attempt },
            WorkUpdate::Retrying { attempt, error } => WorkState::Retrying { attempt, error },
            WorkUpdate::Succeeded(output) => {
                child.output = Some(output);
                WorkState::Success
            }
            WorkUpdate::Failed { error } => WorkState::Failure { error },
        };

        debug!(
            parent = %self.name,
            work = %child.name,
            id = %event.id,
            state = child.state.as_str(),
            "Work state changed"
        );
        Some(event.id)
    }

    /// True iff there is at least one child and every child succeeded
    pub fn all_children_successful(&self) -> bool {
        !self.children.is_empty() && self.children.values().all(|c| c.state.is_success())
    }

    /// True if any child exhausted its retries
    pub fn any_child_failed(&self) -> bool {
        self.children.values().any(|c| c.state.is_failure())
    }

    /// Take the output of a successful child
    pub fn take_output(&mut self, id: WorkId) -> Option<W::Output> {
        self.children.get_mut(&id).and_then(|c| c.output.take())
    }

    pub fn child_state(&self, id: WorkId) -> Option<&WorkState> {
        self.children.get(&id).map(|c| &c.state)
    }

    /// Drop every child, aborting the ones still running
    pub fn clear_children(&mut self) {
        for (id, child) in std::mem::take(&mut self.children) {
            if !child.state.is_terminal() {
                debug!(parent = %self.name, work = %child.name, %id, "Aborting work");
            }
            if let Some(handle) = child.handle {
                handle.abort();
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<W: Work> Drop for WorkParent<W> {
    fn drop(&mut self) {
        self.clear_children();
    }
}
