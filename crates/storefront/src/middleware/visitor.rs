//! Visitor extractor.
//!
//! Resolves the session cookie to the visitor's store, creating both on the
//! first request.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use crate::store::StoreHandle;

/// Session key holding the visitor id.
pub const VISITOR_ID_KEY: &str = "visitor_id";

/// The current visitor and a handle to their store.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(visitor: Visitor) -> Result<impl IntoResponse> {
///     let snapshot = visitor.store.snapshot().await?;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Visitor {
    pub id: Uuid,
    pub store: StoreHandle,
}

impl FromRequestParts<AppState> for Visitor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Session("session layer missing".to_string()))?;

        let existing: Option<Uuid> = session
            .get(VISITOR_ID_KEY)
            .await
            .map_err(|e| AppError::Session(e.to_string()))?;

        let id = match existing {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4();
                session
                    .insert(VISITOR_ID_KEY, id)
                    .await
                    .map_err(|e| AppError::Session(e.to_string()))?;
                tracing::debug!(visitor = %id, "new visitor");
                id
            }
        };

        tracing::Span::current().record("visitor", tracing::field::display(id));
        let store = state.visitors().get_or_spawn(id).await;

        Ok(Self { id, store })
    }
}
