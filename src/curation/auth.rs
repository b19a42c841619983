//! Process-wide credential installation
//!
//! Password-protected curation services need credentials in place before the
//! first request is attempted. Installation is a one-time, idempotent step:
//! providers call [`install`] during construction and the first caller wins.

use std::sync::OnceLock;

use tracing::debug;

use crate::config::Credentials;

static CREDENTIALS: OnceLock<Credentials> = OnceLock::new();

/// Installs credentials for all subsequent requests. Installing a second
/// time is a no-op and returns `false`.
pub fn install(credentials: Credentials) -> bool {
    let installed = CREDENTIALS.set(credentials).is_ok();

    if installed {
        debug!("installed request credentials");
    }

    installed
}

/// The installed credentials, if any.
pub fn installed() -> Option<&'static Credentials> {
    CREDENTIALS.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_a_no_op() {
        let first = Credentials {
            username: "first".to_string(),
            password: "one".to_string(),
        };
        let second = Credentials {
            username: "second".to_string(),
            password: "two".to_string(),
        };

        install(first.clone());
        let accepted = install(second);

        assert!(!accepted);
        assert_eq!(installed(), Some(&first));
    }
}
