//! Tag endpoints.

use http::Method;

use crate::auth::redacted;
use crate::envelope::Pagination;
use crate::params::{form_body, Parameters};
use crate::types::{Media, Tag};
use crate::{Client, Result};

/// Tag related endpoints, borrowed from a [`Client`] with [`Client::tags`].
#[derive(Clone, Copy)]
pub struct Tags<'a> {
    client: &'a Client,
}

impl Client {
    /// Tag related endpoints.
    pub fn tags(&self) -> Tags<'_> {
        Tags { client: self }
    }
}

impl Tags<'_> {
    /// Gets information about a tag.
    ///
    /// The name becomes a path segment, so names failing
    /// [`is_valid_tag_name`] are not sent and yield an empty [`Tag`].
    pub async fn get(&self, tag_name: &str) -> Result<Tag> {
        if !is_valid_tag_name(tag_name) {
            tracing::debug!(tag = %tag_name, "Skipping request for invalid tag name");
            return Ok(Tag::default());
        }

        let response = self.client.get::<Tag>(&format!("tags/{}", tag_name)).await?;
        Ok(response.into_data().unwrap_or_default())
    }

    /// Gets a list of recently tagged media.
    ///
    /// Names Instagram would reject (see [`is_valid_tag_name`]) are not sent
    /// at all: the call returns an empty page instead of an error. Failures
    /// carry the method and URL of the request.
    pub async fn recent_media(
        &self,
        tag_name: &str,
        params: Option<&Parameters>,
    ) -> Result<(Vec<Media>, Pagination)> {
        if !is_valid_tag_name(tag_name) {
            tracing::debug!(tag = %tag_name, "Skipping request for invalid tag name");
            return Ok((Vec::new(), Pagination::default()));
        }

        let mut path = format!("tags/{}/media/recent", tag_name);
        if let Some(query) = params.map(Parameters::to_query).filter(|q| !q.is_empty()) {
            path.push('?');
            path.push_str(&query);
        }

        let request = self.client.new_request(Method::GET, &path, None)?;
        let method = request.method().clone();
        let url = redacted(request.url());

        let response = self
            .client
            .execute::<Vec<Media>>(request)
            .await
            .map_err(|e| e.with_request(method, url))?;

        let pagination = response.pagination().cloned().unwrap_or_default();
        Ok((response.into_data().unwrap_or_default(), pagination))
    }

    /// Searches for tags by name.
    pub async fn search(&self, query: &str) -> Result<(Vec<Tag>, Pagination)> {
        let path = format!("tags/search?{}", form_body([("q", query)]));
        let response = self.client.get::<Vec<Tag>>(&path).await?;

        let pagination = response.pagination().cloned().unwrap_or_default();
        Ok((response.into_data().unwrap_or_default(), pagination))
    }
}

/// Returns `true` if Instagram can accept `tag_name`.
///
/// Tags consist of ASCII letters, digits and underscores only. Anything
/// else, such as a hyphen, a space or a leading `#`, never matches a tag.
///
/// ```
/// use instagram_client::tags::is_valid_tag_name;
///
/// assert!(is_valid_tag_name("travel2024"));
/// assert!(!is_valid_tag_name("#tag"));
/// ```
pub fn is_valid_tag_name(tag_name: &str) -> bool {
    !tag_name.is_empty()
        && tag_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_word_characters() {
        for name in ["nature", "travel2024", "NYC", "throwback_thursday"] {
            assert!(is_valid_tag_name(name), "{} should be valid", name);
        }
    }

    #[test]
    fn test_rejects_other_characters() {
        for name in ["na-ture", "travel 2024", "#tag", "café", "a/b", ""] {
            assert!(!is_valid_tag_name(name), "{:?} should be invalid", name);
        }
    }
}
