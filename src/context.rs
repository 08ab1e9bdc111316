//! Ambient per-request context
//!
//! Each inbound HTTP invocation carries an acting-user identity and a
//! trace id in headers. Handlers and nested remote calls read them
//! without explicit parameter threading via a task-local cell, so two
//! concurrently running invocations never observe each other's context.
//! Outside an active [`scope`] there is no context at all, never a stale
//! one from a prior call.

use std::future::Future;

/// Per-call identity and trace metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    /// Username the call is acting on behalf of (`X-Acting-User`)
    pub acting_user: Option<String>,
    /// Numeric uid of the acting user (`X-Acting-User-Uid`)
    pub acting_user_uid: Option<u64>,
    /// Trace id of the inbound request (`X-Request-ID`)
    pub request_id: Option<String>,
}

impl RequestContext {
    /// True when no field is populated
    pub fn is_empty(&self) -> bool {
        self.acting_user.is_none() && self.acting_user_uid.is_none() && self.request_id.is_none()
    }
}

tokio::task_local! {
    static CURRENT: RequestContext;
}

/// Run `fut` with `ctx` as the ambient request context.
///
/// The context is visible to [`current`] for the whole async call graph
/// of `fut`, including spawned-inline awaits, and is dropped when `fut`
/// completes.
pub async fn scope<F>(ctx: RequestContext, fut: F) -> F::Output
where
    F: Future,
{
    CURRENT.scope(ctx, fut).await
}

/// The ambient request context, if any invocation is active
pub fn current() -> Option<RequestContext> {
    CURRENT.try_with(|ctx| ctx.clone()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn absent_outside_scope() {
        assert_eq!(current(), None);

        let ctx = RequestContext {
            acting_user: Some("mholmes".to_string()),
            ..Default::default()
        };
        scope(ctx, async {
            assert_eq!(current().unwrap().acting_user.as_deref(), Some("mholmes"));
        })
        .await;

        // No leakage after the scope ends
        assert_eq!(current(), None);
    }

    #[tokio::test]
    async fn concurrent_scopes_are_isolated() {
        let call = |user: &str| {
            let ctx = RequestContext {
                acting_user: Some(user.to_string()),
                ..Default::default()
            };
            let user = user.to_string();
            scope(ctx, async move {
                // Interleave with the other task a few times
                for _ in 0..5 {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    assert_eq!(current().unwrap().acting_user.as_deref(), Some(user.as_str()));
                }
            })
        };

        let (a, b) = tokio::join!(
            tokio::spawn(call("alice")),
            tokio::spawn(call("bob"))
        );
        a.unwrap();
        b.unwrap();
    }
}
