//! User lookup and administration.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use eventhub_core::error::AppError;
use eventhub_database::UserStore;
use eventhub_entity::user::{UpdateUser, User};

use super::validation::{normalize_department, normalize_email, normalize_name};
use crate::context::RequestContext;

/// Shortest accepted email search query.
const MIN_SEARCH_LENGTH: usize = 2;
/// Most results an email search returns.
const MAX_SEARCH_RESULTS: u64 = 10;

/// Handles user listing, lookup, profile edits, and deletion.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Every user, optionally limited to one department.
    pub async fn list(&self, department: Option<&str>) -> Result<Vec<User>, AppError> {
        let department = department.map(str::trim).filter(|d| !d.is_empty());
        self.users.list(department).await
    }

    /// One user by id.
    pub async fn get(&self, id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// One user by email.
    pub async fn get_by_email(&self, email: &str) -> Result<User, AppError> {
        let email = email.trim().to_lowercase();
        self.users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Edit name, department, or email of `id`. Only the user themself or an
    /// admin may do this.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        patch: UpdateUser,
    ) -> Result<User, AppError> {
        ctx.require_self_or_admin(id)?;
        if patch.is_empty() {
            return Err(AppError::validation(
                "At least one of name, department or email is required",
            ));
        }

        let patch = UpdateUser {
            name: patch.name.as_deref().map(normalize_name).transpose()?,
            department: patch
                .department
                .as_deref()
                .map(normalize_department)
                .transpose()?,
            email: patch.email.as_deref().map(normalize_email).transpose()?,
        };

        let user = self
            .users
            .update_profile(id, &patch)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %id, actor = %ctx.user_id, "Profile updated");
        Ok(user)
    }

    /// Remove an account (admin).
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;
        if !self.users.delete(id).await? {
            return Err(AppError::not_found("User not found"));
        }
        info!(user_id = %id, actor = %ctx.user_id, "User deleted");
        Ok(())
    }

    /// Users whose email starts with `query` (admin).
    pub async fn search_emails(
        &self,
        ctx: &RequestContext,
        query: &str,
    ) -> Result<Vec<User>, AppError> {
        ctx.require_admin()?;
        let query = query.trim();
        if query.chars().count() < MIN_SEARCH_LENGTH {
            return Err(AppError::validation(format!(
                "Search query must be at least {MIN_SEARCH_LENGTH} characters"
            )));
        }
        self.users
            .search_by_email_prefix(query, MAX_SEARCH_RESULTS)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ctx, ctx_for, memory_stores};
    use eventhub_core::error::ErrorKind;
    use eventhub_entity::user::{CreateUser, UserRole};

    async fn seeded() -> (UserService, User) {
        let users = memory_stores().users;
        let user = users
            .create(&CreateUser {
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                password_hash: "hash".to_string(),
                department: "HR".to_string(),
                role: UserRole::User,
            })
            .await
            .unwrap();
        (UserService::new(users), user)
    }

    #[tokio::test]
    async fn test_update_profile_self_or_admin() {
        let (service, user) = seeded().await;
        let patch = UpdateUser {
            department: Some(" Finance ".to_string()),
            ..UpdateUser::default()
        };

        let err = service
            .update_profile(&ctx(UserRole::User), user.id, patch.clone())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        let own = ctx_for(user.id, "HR", UserRole::User);
        let updated = service.update_profile(&own, user.id, patch).await.unwrap();
        assert_eq!(updated.department, "Finance");

        let err = service
            .update_profile(&own, user.id, UpdateUser::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_delete_requires_admin() {
        let (service, user) = seeded().await;
        let err = service.delete(&ctx(UserRole::User), user.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        service.delete(&ctx(UserRole::Admin), user.id).await.unwrap();
        assert_eq!(service.get(user.id).await.unwrap_err().kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_search_needs_two_characters() {
        let (service, _) = seeded().await;
        let admin = ctx(UserRole::Admin);
        assert_eq!(
            service.search_emails(&admin, "a").await.unwrap_err().kind,
            ErrorKind::Validation
        );
        assert_eq!(service.search_emails(&admin, "AS").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_by_email_is_case_insensitive() {
        let (service, user) = seeded().await;
        assert_eq!(service.get_by_email("ASHA@example.com").await.unwrap().id, user.id);
    }
}
