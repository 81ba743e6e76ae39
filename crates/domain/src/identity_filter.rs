//! Filter expressions for identity API user queries.

use url::form_urlencoded;

use crate::UserId;

/// Attributes requested from the identity API for user lookups.
pub const IDENTITY_USER_ATTRIBUTES: &str = "id,userName";

/// Filter expression for the identity API `Users` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityFilter {
    expression: String,
}

impl IdentityFilter {
    /// Matches a single username: `userName Eq "<username>"`.
    #[must_use]
    pub fn username_equals(username: &str) -> Self {
        Self {
            expression: format!("userName Eq \"{}\"", quote_value(username)),
        }
    }

    /// Creates an empty disjunction to accumulate identifier clauses into.
    #[must_use]
    pub fn any_of_ids() -> Self {
        Self::default()
    }

    /// Appends an `Id eq "<id>"` clause joined with `or`.
    pub fn push_id(&mut self, user_id: &UserId) {
        if !self.expression.is_empty() {
            self.expression.push_str(" or ");
        }
        self.expression
            .push_str(&format!("Id eq \"{}\"", quote_value(user_id.as_str())));
    }

    /// Returns whether no clause has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expression.is_empty()
    }

    /// Returns the raw filter expression.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.expression.as_str()
    }

    /// Returns the expression escaped for use as a query parameter value.
    #[must_use]
    pub fn url_escaped(&self) -> String {
        form_urlencoded::byte_serialize(self.expression.as_bytes()).collect()
    }

    /// Builds the `Users` query URL under the given identity endpoint.
    #[must_use]
    pub fn users_query_url(&self, identity_endpoint: &str) -> String {
        format!(
            "{identity_endpoint}/Users?attributes={IDENTITY_USER_ATTRIBUTES}&filter={}",
            self.url_escaped()
        )
    }
}

fn quote_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_id(value: &str) -> UserId {
        match UserId::new(value) {
            Ok(user_id) => user_id,
            Err(error) => panic!("invalid fixture id: {error}"),
        }
    }

    #[test]
    fn username_filter_is_escaped() {
        let filter = IdentityFilter::username_equals("jo@example.com");
        assert_eq!(filter.as_str(), r#"userName Eq "jo@example.com""#);
        assert_eq!(
            filter.url_escaped(),
            "userName+Eq+%22jo%40example.com%22"
        );
    }

    #[test]
    fn id_clauses_join_in_insertion_order() {
        let mut filter = IdentityFilter::any_of_ids();
        assert!(filter.is_empty());

        filter.push_id(&user_id("g1"));
        filter.push_id(&user_id("g2"));

        assert_eq!(filter.as_str(), r#"Id eq "g1" or Id eq "g2""#);
        assert_eq!(
            filter.url_escaped(),
            "Id+eq+%22g1%22+or+Id+eq+%22g2%22"
        );
    }

    #[test]
    fn quotes_inside_values_are_escaped() {
        let filter = IdentityFilter::username_equals(r#"a"b"#);
        assert_eq!(filter.as_str(), r#"userName Eq "a\"b""#);
    }

    #[test]
    fn users_query_url_requests_id_and_username() {
        let filter = IdentityFilter::username_equals("jo");
        assert_eq!(
            filter.users_query_url("https://uaa.example.com"),
            "https://uaa.example.com/Users?attributes=id,userName&filter=userName+Eq+%22jo%22"
        );
    }
}
