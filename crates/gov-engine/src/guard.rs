//! # Access Guard
//!
//! Binds every mutating operation to the module currently registered for
//! a governance domain. Resolution happens through the registry port at
//! call time, so a registry change takes effect immediately for every
//! in-flight proposal of that domain.

use crate::domain::value_objects::{Address, DomainName};
use crate::errors::GovernanceError;
use crate::ports::outbound::ModuleRegistry;
use tracing::warn;

/// Authorization check over a live module registry.
pub struct AccessGuard<'a, R: ModuleRegistry> {
    registry: &'a R,
}

impl<'a, R: ModuleRegistry> AccessGuard<'a, R> {
    pub fn new(registry: &'a R) -> Self {
        Self { registry }
    }

    /// Fails with `AccessDenied` unless `caller` is the module currently
    /// registered for `domain`. An unregistered domain denies everyone.
    pub fn authorize(&self, domain: &DomainName, caller: Address) -> Result<(), GovernanceError> {
        match self.registry.resolve(domain.as_str()) {
            Some(module) if module == caller => Ok(()),
            Some(module) => {
                warn!(%domain, %caller, registered = %module, "caller is not the registered module");
                Err(GovernanceError::AccessDenied {
                    domain: domain.as_str().to_string(),
                    reason: format!("caller {caller} is not the registered module {module}"),
                })
            }
            None => {
                warn!(%domain, %caller, "domain has no registered module");
                Err(GovernanceError::AccessDenied {
                    domain: domain.as_str().to_string(),
                    reason: "domain has no registered module".to_string(),
                })
            }
        }
    }
}
