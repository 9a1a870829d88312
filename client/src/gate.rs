use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use vetted_common::StatusRejection;

use crate::response::CompletedResponse;

pub const VALID_STATUS_CODES: RangeInclusive<u16> = 100..=599;
pub const SUCCESS_STATUS_CODES: RangeInclusive<u16> = 200..=299;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidStatusSet {
    #[error("status code {0} is outside 100..=599")]
    OutOfRange(u16),
    #[error("accepted status set must not be empty")]
    Empty,
}

/// Status codes whose responses are eligible for body validation.
///
/// Defaults to the 2xx range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u16>", into = "Vec<u16>")]
pub struct AcceptedStatuses(BTreeSet<u16>);

impl AcceptedStatuses {
    #[must_use]
    pub fn success() -> Self {
        Self(SUCCESS_STATUS_CODES.collect())
    }

    pub fn from_codes(codes: impl IntoIterator<Item = u16>) -> Result<Self, InvalidStatusSet> {
        let set = codes
            .into_iter()
            .map(check_code)
            .collect::<Result<BTreeSet<_>, _>>()?;
        if set.is_empty() {
            return Err(InvalidStatusSet::Empty);
        }
        Ok(Self(set))
    }

    pub fn range(low: u16, high: u16) -> Result<Self, InvalidStatusSet> {
        Self::from_codes(low..=high)
    }

    pub fn with(mut self, code: u16) -> Result<Self, InvalidStatusSet> {
        self.0.insert(check_code(code)?);
        Ok(self)
    }

    #[must_use]
    pub fn accepts(&self, status: u16) -> bool {
        self.0.contains(&status)
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.0.iter().copied()
    }

    /// Lets an accepted response through untouched. Anything else becomes a
    /// [`StatusRejection`] carrying the body text, read best-effort.
    pub fn check<R: CompletedResponse>(&self, response: R) -> Result<R, StatusRejection> {
        let status = response.status();
        if self.accepts(status) {
            return Ok(response);
        }

        let url = response.url();
        let rejection = match response.text() {
            Ok(body) => StatusRejection::new(status, url, body),
            Err(e) => StatusRejection::with_unreadable_body(status, url, &e),
        };
        Err(rejection)
    }
}

fn check_code(code: u16) -> Result<u16, InvalidStatusSet> {
    if VALID_STATUS_CODES.contains(&code) {
        Ok(code)
    } else {
        Err(InvalidStatusSet::OutOfRange(code))
    }
}

impl Default for AcceptedStatuses {
    fn default() -> Self {
        Self::success()
    }
}

impl TryFrom<Vec<u16>> for AcceptedStatuses {
    type Error = InvalidStatusSet;

    fn try_from(codes: Vec<u16>) -> Result<Self, Self::Error> {
        Self::from_codes(codes)
    }
}

impl From<AcceptedStatuses> for Vec<u16> {
    fn from(statuses: AcceptedStatuses) -> Self {
        statuses.0.into_iter().collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::response::BufferedResponse;

    const USERS_7: &str = "https://api.example/users/7";

    #[test]
    fn test_default_accepts_2xx_only() {
        let accepted = AcceptedStatuses::default();
        assert!(accepted.accepts(200));
        assert!(accepted.accepts(204));
        assert!(accepted.accepts(299));
        assert!(!accepted.accepts(199));
        assert!(!accepted.accepts(302));
        assert!(!accepted.accepts(404));
    }

    #[test]
    fn test_from_codes() {
        let accepted = AcceptedStatuses::from_codes([200, 304]).unwrap();
        assert!(accepted.accepts(304));
        assert!(!accepted.accepts(201));
        assert_eq!(accepted.iter().collect::<Vec<_>>(), vec![200, 304]);
    }

    #[test]
    fn test_rejects_invalid_sets() {
        assert_eq!(
            AcceptedStatuses::from_codes([]),
            Err(InvalidStatusSet::Empty)
        );
        assert_eq!(
            AcceptedStatuses::from_codes([200, 700]),
            Err(InvalidStatusSet::OutOfRange(700))
        );
        assert_eq!(
            AcceptedStatuses::success().with(42),
            Err(InvalidStatusSet::OutOfRange(42))
        );
        assert_eq!(
            AcceptedStatuses::range(300, 200),
            Err(InvalidStatusSet::Empty)
        );
    }

    #[test]
    fn test_with_extends_set() {
        let accepted = AcceptedStatuses::success().with(404).unwrap();
        assert!(accepted.accepts(404));
        assert!(accepted.accepts(200));
    }

    #[test]
    fn test_check_passes_accepted_response() {
        let response = BufferedResponse::new(201, "{}");
        let passed = AcceptedStatuses::default().check(response).unwrap();
        assert_eq!(passed.status(), 201);
    }

    #[test]
    fn test_check_rejects_with_body() {
        let response = BufferedResponse::new(404, "no such user").with_url(USERS_7);
        let accepted = AcceptedStatuses::from_codes([200]).unwrap();
        let rejection = accepted.check(response).unwrap_err();

        assert_eq!(rejection.status_code, 404);
        assert_eq!(rejection.url.as_deref(), Some(USERS_7));
        assert_eq!(rejection.body, "no such user");
        assert!(rejection.is_client_error());
    }

    #[test]
    fn test_check_tolerates_unreadable_body() {
        let response = BufferedResponse::without_body(503);
        let rejection = AcceptedStatuses::default().check(response).unwrap_err();

        assert_eq!(rejection.status_code, 503);
        assert!(rejection.body.starts_with(vetted_common::BODY_UNAVAILABLE));
        assert!(rejection.is_server_error());
    }

    #[test]
    fn test_serde_as_list() {
        let accepted: AcceptedStatuses = serde_json::from_str("[201, 200]").unwrap();
        assert_eq!(serde_json::to_string(&accepted).unwrap(), "[200,201]");
        assert!(serde_json::from_str::<AcceptedStatuses>("[]").is_err());
    }
}
