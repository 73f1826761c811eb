//! Sessions for members signed in through the external membership provider.
//! Credentials are checked by that provider; this module only hands out and
//! reads bearer tokens carrying the member's identity.

pub mod jwt;

use crate::core::errors::RoomshareError;
use jwt::JwtService;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Member {
    pub id: String,
    pub email: String,
}

pub struct Membership {
    jwt: JwtService,
    revoked: Arc<RwLock<HashSet<String>>>,
}

impl Membership {
    pub fn new(secret: String) -> Self {
        Membership {
            jwt: JwtService::new(secret),
            revoked: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    pub fn login(&self, member_id: &str, email: &str) -> Result<String, RoomshareError> {
        if member_id.trim().is_empty() {
            return Err(RoomshareError::Unauthenticated("Member id is required".to_string()));
        }
        info!("Member {} signed in", member_id);
        self.jwt.generate_token(member_id, email)
    }

    pub async fn current_member(&self, token: &str) -> Result<Member, RoomshareError> {
        if self.revoked.read().await.contains(token) {
            return Err(RoomshareError::Unauthenticated("Session has ended".to_string()));
        }
        let claims = self.jwt.validate_token(token)?;
        Ok(Member {
            id: claims.sub,
            email: claims.email,
        })
    }

    pub async fn is_authenticated(&self, token: &str) -> bool {
        self.current_member(token).await.is_ok()
    }

    pub async fn logout(&self, token: &str) -> Result<(), RoomshareError> {
        let member = self.current_member(token).await?;
        self.revoked.write().await.insert(token.to_string());
        info!("Member {} signed out", member.id);
        Ok(())
    }
}
