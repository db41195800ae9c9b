//! One-shot messages carried across a redirect.
//!
//! The message travels as a token in a short-lived cookie and is removed by
//! the first page that displays it.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use core_types::Severity;

use crate::views::Message;

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    Registered,
    Updated,
    Deleted,
    DeleteFailed,
}

impl Flash {
    pub fn token(&self) -> &'static str {
        match self {
            Flash::Registered => "registered",
            Flash::Updated => "updated",
            Flash::Deleted => "deleted",
            Flash::DeleteFailed => "delete-failed",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "registered" => Some(Flash::Registered),
            "updated" => Some(Flash::Updated),
            "deleted" => Some(Flash::Deleted),
            "delete-failed" => Some(Flash::DeleteFailed),
            _ => None,
        }
    }

    pub fn message(&self) -> Message {
        match self {
            Flash::Registered => Message::new("Student registered successfully!", Severity::Success),
            Flash::Updated => Message::new("Student updated successfully!", Severity::Success),
            Flash::Deleted => Message::new("Student deleted successfully.", Severity::Success),
            Flash::DeleteFailed => Message::new(
                "The student could not be deleted. Please try again.",
                Severity::Danger,
            ),
        }
    }
}

/// Queues `flash` for the next rendered page.
pub fn push(jar: CookieJar, flash: Flash) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.token()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Drains the pending message, if any.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Message>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let message = Flash::from_token(cookie.value()).map(|flash| flash.message());
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip() {
        for flash in [Flash::Registered, Flash::Updated, Flash::Deleted, Flash::DeleteFailed] {
            assert_eq!(Flash::from_token(flash.token()), Some(flash));
        }
        assert_eq!(Flash::from_token("<forged>"), None);
    }

    #[test]
    fn take_drains_the_cookie() {
        let jar = push(CookieJar::new(), Flash::Deleted);
        let (jar, message) = take(jar);
        assert_eq!(message.map(|m| m.severity), Some(Severity::Success));
        assert!(jar.get(FLASH_COOKIE).is_none());
    }

    #[test]
    fn take_without_cookie_is_empty() {
        let (_, message) = take(CookieJar::new());
        assert!(message.is_none());
    }
}
