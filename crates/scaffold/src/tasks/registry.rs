//! Task Registry - Maps task names to lazily resolved implementations.
//!
//! Commands never construct tasks directly. They look a task up by its
//! symbolic name, which keeps unused task code paths untouched until a
//! command actually needs them.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing::debug;

use super::{CreateApiClient, Task, UpdateDashboardUrls};
use crate::error::{ScaffoldError, ScaffoldResult};

/// Zero-argument factory producing a task implementation.
type Resolver = Box<dyn Fn() -> Arc<dyn Task> + Send + Sync>;

enum TaskEntry {
    Ready(Arc<dyn Task>),
    Deferred {
        resolve: Resolver,
        resolved: OnceLock<Arc<dyn Task>>,
    },
}

impl TaskEntry {
    fn resolve(&self, name: &str) -> Arc<dyn Task> {
        match self {
            Self::Ready(task) => Arc::clone(task),
            Self::Deferred { resolve, resolved } => Arc::clone(resolved.get_or_init(|| {
                debug!(task = name, "Resolving task");
                resolve()
            })),
        }
    }
}

/// Registry of named tasks.
pub struct TaskRegistry {
    tasks: RwLock<HashMap<String, Arc<TaskEntry>>>,
}

impl TaskRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry with the built-in tasks registered.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(CreateApiClient::NAME, create_api_client);
        registry.register(UpdateDashboardUrls::NAME, update_dashboard_urls);
        registry
    }

    /// Bind `name` to a resolver, replacing any previous binding.
    ///
    /// The resolver runs on the first lookup; its result is reused after that.
    pub fn register<F>(&self, name: &str, resolver: F)
    where
        F: Fn() -> Arc<dyn Task> + Send + Sync + 'static,
    {
        self.insert(
            name,
            TaskEntry::Deferred {
                resolve: Box::new(resolver),
                resolved: OnceLock::new(),
            },
        );
    }

    /// Bind `name` to an already constructed task.
    pub fn register_ready(&self, name: &str, task: Arc<dyn Task>) {
        self.insert(name, TaskEntry::Ready(task));
    }

    fn insert(&self, name: &str, entry: TaskEntry) {
        let mut tasks = self.tasks.write().unwrap_or_else(PoisonError::into_inner);
        if tasks.insert(name.to_string(), Arc::new(entry)).is_some() {
            debug!(task = name, "Replaced task binding");
        }
    }

    /// Get a task by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Task>> {
        // Resolve outside the lock so resolvers may consult the registry
        let entry = self
            .tasks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()?;
        Some(entry.resolve(name))
    }

    /// Get a task, returning an error if nothing is registered under `name`.
    pub fn require(&self, name: &str) -> ScaffoldResult<Arc<dyn Task>> {
        self.get(name)
            .ok_or_else(|| ScaffoldError::UnregisteredTask(name.to_string()))
    }

    /// Check if a task is registered.
    pub fn has_task(&self, name: &str) -> bool {
        let tasks = self.tasks.read().unwrap_or_else(PoisonError::into_inner);
        tasks.contains_key(name)
    }

    /// Get all registered task names, sorted.
    pub fn names(&self) -> Vec<String> {
        let tasks = self.tasks.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = tasks.keys().cloned().collect();
        names.sort();
        names
    }

    /// Remove a task binding.
    pub fn unregister(&self, name: &str) -> bool {
        let mut tasks = self.tasks.write().unwrap_or_else(PoisonError::into_inner);
        tasks.remove(name).is_some()
    }
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn create_api_client() -> Arc<dyn Task> {
    Arc::new(CreateApiClient)
}

fn update_dashboard_urls() -> Arc<dyn Task> {
    Arc::new(UpdateDashboardUrls)
}

/// Global task registry instance.
static GLOBAL_REGISTRY: OnceLock<TaskRegistry> = OnceLock::new();

/// Get the global task registry.
pub fn global_registry() -> &'static TaskRegistry {
    GLOBAL_REGISTRY.get_or_init(TaskRegistry::with_defaults)
}
