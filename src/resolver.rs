use async_trait::async_trait;

#[allow(unused_imports)]
use mockall::automock;

use crate::error::IdentityError;
use crate::types::{CallerIdentity, Check};

/// Resolves the identity behind whatever credentials a client was built with.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn caller_identity(&self) -> Result<CallerIdentity, IdentityError>;
}

/// Builds the resolver backing a [`Check`].
///
/// Construction is deferred to the moment the check runs, so a broken chain
/// for one check never prevents the others from starting.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResolverFactory: Send + Sync {
    async fn resolver(&self, check: Check) -> Result<Box<dyn IdentityResolver>, IdentityError>;
}
