//! Like endpoints.

use http::Method;

use crate::types::User;
use crate::{Client, Result};

/// Like related endpoints, borrowed from a [`Client`] with [`Client::likes`].
#[derive(Clone, Copy)]
pub struct Likes<'a> {
    client: &'a Client,
}

impl Client {
    /// Like related endpoints.
    pub fn likes(&self) -> Likes<'_> {
        Likes { client: self }
    }
}

impl Likes<'_> {
    /// Gets the users who have liked a media.
    pub async fn media_likes(&self, media_id: &str) -> Result<Vec<User>> {
        let response = self
            .client
            .get::<Vec<User>>(&format!("media/{}/likes", media_id))
            .await?;
        Ok(response.into_data().unwrap_or_default())
    }

    /// Likes a media as the authenticated user.
    pub async fn like(&self, media_id: &str) -> Result<()> {
        self.action(Method::POST, media_id).await
    }

    /// Removes the authenticated user's like.
    pub async fn unlike(&self, media_id: &str) -> Result<()> {
        self.action(Method::DELETE, media_id).await
    }

    async fn action(&self, method: Method, media_id: &str) -> Result<()> {
        let path = format!("media/{}/likes", media_id);
        self.client.call_unit(method, &path, None).await?;
        Ok(())
    }
}
