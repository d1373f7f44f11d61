//! Ambient tenant context, scoped to the current task.
//!
//! The routing layer reads tenant identity from an ambient slot so that
//! request handlers do not thread a [`TenantContext`] through every call.
//! The slot is a tokio task-local: it is established with [`scope`], carried
//! across every await point inside that scope, and torn down when the scope
//! ends, so reused worker threads never leak context between units of work.
//!
//! Crossing a task boundary is the one place the context does not follow by
//! itself. Wrap the child future in [`propagate`], or use [`spawn`] directly:
//!
//! ```
//! use switchyard_tenancy::tenant::{current, TenantContext};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! current::scope(TenantContext::for_organization(42), async {
//!     let handle = current::spawn(async {
//!         // The child task sees organization 42 as well.
//!         current::get().organization_id()
//!     });
//!     assert_eq!(handle.await.unwrap(), Some(42));
//! })
//! .await;
//! # }
//! ```

use std::cell::RefCell;
use std::future::Future;

use tokio::task::JoinHandle;

use super::context::TenantContext;

tokio::task_local! {
    /// Ambient tenant context for the current task scope.
    static CURRENT_TENANT: RefCell<TenantContext>;
}

/// Runs a future with the given context as the ambient tenant context.
///
/// Scopes nest: an inner scope shadows the outer one until it completes.
pub async fn scope<F>(ctx: TenantContext, fut: F) -> F::Output
where
    F: Future,
{
    CURRENT_TENANT.scope(RefCell::new(ctx), fut).await
}

/// Returns a copy of the ambient tenant context.
///
/// Outside any scope, or after [`clear`], this returns the no-tenant
/// sentinel. It never fails and never returns an absent value.
pub fn get() -> TenantContext {
    CURRENT_TENANT
        .try_with(|slot| slot.borrow().clone())
        .unwrap_or_else(|_| TenantContext::none())
}

/// Replaces the ambient tenant context within the current scope.
///
/// Returns `true` when the context was applied. Returns `false` when the
/// current task has no ambient slot, in which case the caller should have
/// established one with [`scope`].
pub fn set(ctx: TenantContext) -> bool {
    let applied = CURRENT_TENANT.try_with(|slot| *slot.borrow_mut() = ctx).is_ok();
    if !applied {
        tracing::debug!("tenant context not applied: no ambient scope on this task");
    }
    applied
}

/// Resets the ambient tenant context to the no-tenant sentinel.
///
/// Returns `false` when the current task has no ambient slot.
pub fn clear() -> bool {
    let cleared = CURRENT_TENANT
        .try_with(|slot| *slot.borrow_mut() = TenantContext::none())
        .is_ok();
    if !cleared {
        tracing::debug!("tenant context not cleared: no ambient scope on this task");
    }
    cleared
}

/// Wraps a future so it runs under the caller's current tenant context.
///
/// This is the hand-off primitive for task boundaries: the context is
/// captured eagerly, then re-established around the future wherever it ends
/// up being polled.
pub fn propagate<F>(fut: F) -> impl Future<Output = F::Output>
where
    F: Future,
{
    CURRENT_TENANT.scope(RefCell::new(get()), fut)
}

/// Spawns a task that inherits the caller's current tenant context.
pub fn spawn<F>(fut: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(propagate(fut))
}
