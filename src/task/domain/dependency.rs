//! Prerequisite graph used to keep a project's task dependencies acyclic.
//!
//! Each task names at most one prerequisite, so the graph is a set of
//! chains. A snapshot of the edges is held in an arena keyed by task ID and
//! walked in memory; no store access happens during validation.

use super::{Task, TaskDomainError, TaskId};
use std::collections::{HashMap, HashSet};

/// Snapshot of the prerequisite edges of one project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrerequisiteGraph {
    edges: HashMap<TaskId, Option<TaskId>>,
}

impl PrerequisiteGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from task records.
    #[must_use]
    pub fn from_tasks<'a, I>(tasks: I) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        Self::from_edges(
            tasks
                .into_iter()
                .map(|task| (task.id(), task.prereq_task_id())),
        )
    }

    /// Builds a graph from `(task, prerequisite)` pairs.
    #[must_use]
    pub fn from_edges(edges: impl IntoIterator<Item = (TaskId, Option<TaskId>)>) -> Self {
        Self {
            edges: edges.into_iter().collect(),
        }
    }

    /// Adds or replaces the prerequisite edge of `task`.
    pub fn insert(&mut self, task: TaskId, prerequisite: Option<TaskId>) {
        self.edges.insert(task, prerequisite);
    }

    /// Returns the prerequisite of `task` in this snapshot.
    #[must_use]
    pub fn prerequisite_of(&self, task: TaskId) -> Option<TaskId> {
        self.edges.get(&task).copied().flatten()
    }

    /// Returns the number of tasks in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` when the snapshot holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns `true` when making `task` depend on `candidate` would close a
    /// cycle.
    ///
    /// Walks the chain starting at `candidate`. Reaching `task` means a
    /// cycle; revisiting a node or leaving the snapshot ends the walk. A
    /// task that is not yet persisted can only form a cycle with itself.
    #[must_use]
    pub fn would_create_cycle(&self, task: TaskId, candidate: Option<TaskId>) -> bool {
        let mut visited = HashSet::new();
        let mut current = candidate;

        while let Some(node) = current {
            if node == task {
                return true;
            }
            if !visited.insert(node) {
                return false;
            }
            current = self.prerequisite_of(node);
        }

        false
    }

    /// Validates a proposed prerequisite edge.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CircularDependency`] naming both tasks
    /// when [`Self::would_create_cycle`] reports a cycle.
    pub fn validate(&self, task: TaskId, candidate: Option<TaskId>) -> Result<(), TaskDomainError> {
        match candidate {
            Some(prerequisite_id) if self.would_create_cycle(task, candidate) => {
                Err(TaskDomainError::CircularDependency {
                    task_id: task,
                    prerequisite_id,
                })
            }
            _ => Ok(()),
        }
    }

    /// Lists the transitive prerequisites of `task`, nearest first.
    ///
    /// The walk stops at the first repeated node, so it terminates within
    /// [`Self::len`] steps even on a corrupt snapshot.
    #[must_use]
    pub fn prerequisite_chain(&self, task: TaskId) -> Vec<TaskId> {
        let mut visited = HashSet::from([task]);
        let mut chain = Vec::new();
        let mut current = self.prerequisite_of(task);

        while let Some(node) = current {
            if !visited.insert(node) {
                break;
            }
            chain.push(node);
            current = self.prerequisite_of(node);
        }

        chain
    }
}
