use quire_types::Metadata;
use tracing::warn;

use crate::auth::{AuthProvider, RequestContext};

/// Derive the server-trusted metadata of a request.
///
/// `user` comes from the authentication hook and is only recorded when the
/// hook succeeds with a non-empty name; `peer` is the originating address.
/// Missing information yields missing fields, never an error.
pub async fn collect(auth: &dyn AuthProvider, ctx: &RequestContext) -> Metadata {
    let user = match auth.current_user(ctx).await {
        Ok(user) => user.filter(|name| !name.is_empty()),
        Err(err) => {
            warn!(error = %err, "authentication hook failed; recording no user");
            None
        }
    };
    Metadata {
        user,
        peer: ctx.peer.map(|addr| addr.to_string()),
        ..Metadata::default()
    }
}

/// Final metadata of a write: the authenticity record with the filtered
/// client fields laid over it.
pub fn merge(authenticity: Metadata, client: Metadata) -> Metadata {
    authenticity.overlay(client)
}
