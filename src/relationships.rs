//! Relationship endpoints: follower lists and follow/block actions.

use crate::envelope::Pagination;
use crate::params::{form_body, Parameters};
use crate::types::{Relationship, User};
use crate::{Client, Result};

/// A change to the relationship with another user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipAction {
    Follow,
    Unfollow,
    Block,
    Unblock,
    Approve,
    Deny,
}

impl RelationshipAction {
    /// The value sent as `action=` in the form body.
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipAction::Follow => "follow",
            RelationshipAction::Unfollow => "unfollow",
            RelationshipAction::Block => "block",
            RelationshipAction::Unblock => "unblock",
            RelationshipAction::Approve => "approve",
            RelationshipAction::Deny => "deny",
        }
    }
}

/// Relationship endpoints, borrowed from a [`Client`] with
/// [`Client::relationships`].
#[derive(Clone, Copy)]
pub struct Relationships<'a> {
    client: &'a Client,
}

impl Client {
    /// Relationship related endpoints.
    pub fn relationships(&self) -> Relationships<'_> {
        Relationships { client: self }
    }
}

impl Relationships<'_> {
    /// Lists the users `user_id` follows. `None` means the authenticated user.
    pub async fn follows(
        &self,
        user_id: Option<&str>,
        params: Option<&Parameters>,
    ) -> Result<(Vec<User>, Pagination)> {
        self.list(&user_path(user_id, "follows"), params).await
    }

    /// Lists the users following `user_id`. `None` means the authenticated
    /// user.
    pub async fn followed_by(
        &self,
        user_id: Option<&str>,
        params: Option<&Parameters>,
    ) -> Result<(Vec<User>, Pagination)> {
        self.list(&user_path(user_id, "followed-by"), params).await
    }

    /// Lists the users who asked to follow the authenticated user.
    pub async fn requested_by(&self) -> Result<(Vec<User>, Pagination)> {
        self.list("users/self/requested-by", None).await
    }

    /// Gets the authenticated user's relationship with `user_id`.
    pub async fn relationship(&self, user_id: &str) -> Result<Relationship> {
        let response = self
            .client
            .get::<Relationship>(&format!("users/{}/relationship", user_id))
            .await?;
        Ok(response.into_data().unwrap_or_default())
    }

    /// Follows, unfollows, blocks, unblocks, approves or denies `user_id`.
    ///
    /// ```no_run
    /// use instagram_client::relationships::RelationshipAction;
    /// use instagram_client::Client;
    ///
    /// # async fn example() -> Result<(), instagram_client::Error> {
    /// let client = Client::builder().access_token("token").build()?;
    /// let relationship = client
    ///     .relationships()
    ///     .act("3", RelationshipAction::Follow)
    ///     .await?;
    /// println!("now {}", relationship.outgoing_status);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn act(&self, user_id: &str, action: RelationshipAction) -> Result<Relationship> {
        let path = format!("users/{}/relationship", user_id);
        let body = form_body([("action", action.as_str())]);
        let response = self.client.post_form::<Relationship>(&path, body).await?;
        Ok(response.into_data().unwrap_or_default())
    }

    pub async fn follow(&self, user_id: &str) -> Result<Relationship> {
        self.act(user_id, RelationshipAction::Follow).await
    }

    pub async fn unfollow(&self, user_id: &str) -> Result<Relationship> {
        self.act(user_id, RelationshipAction::Unfollow).await
    }

    pub async fn block(&self, user_id: &str) -> Result<Relationship> {
        self.act(user_id, RelationshipAction::Block).await
    }

    pub async fn unblock(&self, user_id: &str) -> Result<Relationship> {
        self.act(user_id, RelationshipAction::Unblock).await
    }

    pub async fn approve(&self, user_id: &str) -> Result<Relationship> {
        self.act(user_id, RelationshipAction::Approve).await
    }

    pub async fn deny(&self, user_id: &str) -> Result<Relationship> {
        self.act(user_id, RelationshipAction::Deny).await
    }

    async fn list(&self, path: &str, params: Option<&Parameters>) -> Result<(Vec<User>, Pagination)> {
        let mut path = path.to_string();
        if let Some(query) = params.map(Parameters::to_query).filter(|q| !q.is_empty()) {
            path.push('?');
            path.push_str(&query);
        }

        let response = self.client.get::<Vec<User>>(&path).await?;
        let pagination = response.pagination().cloned().unwrap_or_default();
        Ok((response.into_data().unwrap_or_default(), pagination))
    }
}

fn user_path(user_id: Option<&str>, list: &str) -> String {
    match user_id.filter(|id| !id.is_empty()) {
        Some(id) => format!("users/{}/{}", id, list),
        None => format!("users/self/{}", list),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_path_defaults_to_self() {
        assert_eq!(user_path(None, "follows"), "users/self/follows");
        assert_eq!(user_path(Some(""), "followed-by"), "users/self/followed-by");
        assert_eq!(user_path(Some("3"), "follows"), "users/3/follows");
    }

    #[test]
    fn test_action_form_values() {
        let body = form_body([("action", RelationshipAction::Unblock.as_str())]);
        assert_eq!(body, "action=unblock");
    }
}
