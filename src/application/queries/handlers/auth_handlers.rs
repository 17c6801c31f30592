//! Auth Query Handlers

use chrono::Utc;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    SessionRecord, SessionRepositoryPort, UserRecord, UserRepositoryPort,
};
use crate::application::queries::GetSession;

/// 当前会话及其用户
#[derive(Debug, Clone)]
pub struct SessionResponse {
    pub session: SessionRecord,
    pub user: UserRecord,
}

/// GetSession Handler
pub struct GetSessionHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    session_repo: Arc<dyn SessionRepositoryPort>,
}

impl GetSessionHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepositoryPort>,
        session_repo: Arc<dyn SessionRepositoryPort>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
        }
    }

    /// 无会话返回 None；过期会话顺便删除
    pub async fn handle(
        &self,
        query: GetSession,
    ) -> Result<Option<SessionResponse>, ApplicationError> {
        let Some(session) = self.session_repo.find_by_token(&query.token).await? else {
            return Ok(None);
        };

        if session.is_expired(Utc::now()) {
            self.session_repo.delete_by_token(&session.token).await?;
            tracing::debug!(session_id = %session.id, "Expired session removed");
            return Ok(None);
        }

        let Some(user) = self.user_repo.find_by_id(session.user_id).await? else {
            tracing::warn!(session_id = %session.id, user_id = %session.user_id, "Session without user");
            return Ok(None);
        };

        Ok(Some(SessionResponse { session, user }))
    }
}
