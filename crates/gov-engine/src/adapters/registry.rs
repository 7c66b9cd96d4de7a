//! In-memory module registry.

use crate::domain::value_objects::Address;
use crate::ports::outbound::ModuleRegistry;
use std::collections::HashMap;
use std::sync::RwLock;

/// Mutable name-to-module registry.
///
/// Registrations can change after construction; the engine resolves
/// through the port on every call, so a replacement takes effect for all
/// in-flight proposals of the domain immediately.
pub struct InMemoryModuleRegistry {
    modules: RwLock<HashMap<String, Address>>,
}

impl InMemoryModuleRegistry {
    pub fn new() -> Self {
        Self {
            modules: RwLock::new(HashMap::new()),
        }
    }

    /// Registers (or replaces) the module for a domain.
    pub fn register(&self, domain: impl Into<String>, module: Address) {
        if let Ok(mut modules) = self.modules.write() {
            modules.insert(domain.into(), module);
        }
    }

    /// Removes a domain's registration.
    pub fn deregister(&self, domain: &str) {
        if let Ok(mut modules) = self.modules.write() {
            modules.remove(domain);
        }
    }
}

impl Default for InMemoryModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleRegistry for InMemoryModuleRegistry {
    fn resolve(&self, domain: &str) -> Option<Address> {
        self.modules.read().ok()?.get(domain).copied()
    }
}
