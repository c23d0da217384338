//! Optional query parameters shared by the listing endpoints.

/// Optional parameters for the various list methods.
///
/// Unset fields (zero or empty) are left out of the query string.
///
/// # Examples
///
/// ```
/// use instagram_client::Parameters;
///
/// let params = Parameters::new().count(3).max_id("1234");
/// assert_eq!(params.to_query(), "count=3&max_id=1234");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    /// Maximum number of results to return.
    pub count: u64,
    /// Return results after this id.
    pub min_id: String,
    /// Return results before this id.
    pub max_id: String,
    /// Return results created after this Unix timestamp.
    pub min_timestamp: i64,
    /// Return results created before this Unix timestamp.
    pub max_timestamp: i64,
    /// Latitude of the search center.
    pub lat: f64,
    /// Longitude of the search center.
    pub lng: f64,
    /// Search radius in meters.
    pub distance: f64,
    /// Opaque page cursor used by the follower lists.
    pub cursor: String,
}

impl Parameters {
    /// Parameters with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of results.
    pub fn count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    /// Sets the lower id bound.
    pub fn min_id(mut self, min_id: impl Into<String>) -> Self {
        self.min_id = min_id.into();
        self
    }

    /// Sets the upper id bound, typically a previous page's `next_max_id`.
    pub fn max_id(mut self, max_id: impl Into<String>) -> Self {
        self.max_id = max_id.into();
        self
    }

    /// Sets both creation time bounds.
    pub fn timestamps(mut self, min: i64, max: i64) -> Self {
        self.min_timestamp = min;
        self.max_timestamp = max;
        self
    }

    /// Sets the search center and radius in meters.
    pub fn location(mut self, lat: f64, lng: f64, distance: f64) -> Self {
        self.lat = lat;
        self.lng = lng;
        self.distance = distance;
        self
    }

    /// Sets the page cursor.
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = cursor.into();
        self
    }

    /// Serializes the set fields as an `application/x-www-form-urlencoded`
    /// query string, without a leading `?`.
    pub fn to_query(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if self.count != 0 {
            query.append_pair("count", &self.count.to_string());
        }
        if !self.min_id.is_empty() {
            query.append_pair("min_id", &self.min_id);
        }
        if !self.max_id.is_empty() {
            query.append_pair("max_id", &self.max_id);
        }
        if self.min_timestamp != 0 {
            query.append_pair("min_timestamp", &self.min_timestamp.to_string());
        }
        if self.max_timestamp != 0 {
            query.append_pair("max_timestamp", &self.max_timestamp.to_string());
        }
        if self.lat != 0.0 {
            query.append_pair("lat", &self.lat.to_string());
        }
        if self.lng != 0.0 {
            query.append_pair("lng", &self.lng.to_string());
        }
        if self.distance != 0.0 {
            query.append_pair("distance", &self.distance.to_string());
        }
        if !self.cursor.is_empty() {
            query.append_pair("cursor", &self.cursor);
        }
        query.finish()
    }
}

/// Encodes key/value pairs as a form body for submission verbs.
///
/// ```
/// assert_eq!(instagram_client::form_body([("action", "follow")]), "action=follow");
/// ```
pub fn form_body<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_parameters() {
        assert_eq!(Parameters::new().to_query(), "");
    }

    #[test]
    fn test_all_parameters() {
        let params = Parameters::new()
            .count(10)
            .min_id("a")
            .max_id("b")
            .timestamps(100, 200)
            .location(48.8, 2.35, 1000.0)
            .cursor("c");
        assert_eq!(
            params.to_query(),
            "count=10&min_id=a&max_id=b&min_timestamp=100&max_timestamp=200&lat=48.8&lng=2.35&distance=1000&cursor=c"
        );
    }

    #[test]
    fn test_values_are_escaped() {
        let params = Parameters::new().max_id("a b&c");
        assert_eq!(params.to_query(), "max_id=a+b%26c");
    }
}
