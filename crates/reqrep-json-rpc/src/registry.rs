use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::handler::MethodHandler;

/// Method name to handler table.
///
/// Populated during setup and read-only while serving. Each server owns its
/// own registry, so several servers can live in one process.
#[derive(Default, Clone)]
pub struct MethodRegistry {
    methods: HashMap<String, Arc<dyn MethodHandler>>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` to `name`. A later registration for the same name
    /// replaces the earlier one.
    pub fn register<H>(&mut self, name: impl Into<String>, handler: H)
    where
        H: MethodHandler + 'static,
    {
        self.register_arc(name, Arc::new(handler));
    }

    /// Bind an already shared handler, e.g. one handler under several names
    pub fn register_arc(&mut self, name: impl Into<String>, handler: Arc<dyn MethodHandler>) {
        let name = name.into();
        if self.methods.insert(name.clone(), handler).is_some() {
            debug!(method = %name, "Replaced method handler");
        } else {
            debug!(method = %name, "Registered method handler");
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn MethodHandler>> {
        self.methods.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Registered method names, sorted
    pub fn method_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.methods.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodRegistry")
            .field("methods", &self.method_names())
            .finish()
    }
}
