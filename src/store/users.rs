//! In-memory user directory.
//!
//! Passwords are stored in plaintext; this mirrors the mock trust model of
//! the API this server stands in for and must not survive into a real
//! deployment.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Public projection of a user, as it appears in auth responses and the
/// session token. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
}

#[derive(Debug, Clone)]
struct StoredUser {
    id: i64,
    email: String,
    password: String,
}

impl StoredUser {
    fn public(&self) -> AuthUser {
        AuthUser { id: self.id, email: self.email.clone() }
    }
}

struct Directory {
    users: Vec<StoredUser>,
    next_id: i64,
}

pub struct UserStore {
    inner: RwLock<Directory>,
}

impl UserStore {
    /// The standard directory: a single demo account.
    pub fn standard() -> Self {
        UserStore { inner: RwLock::new(Self::seeded()) }
    }

    fn seeded() -> Directory {
        let users = vec![StoredUser {
            id: 1,
            email: "demo@voblako.ru".to_string(),
            password: "password123".to_string(),
        }];
        let next_id = users.len() as i64 + 1;
        Directory { users, next_id }
    }

    /// Restore the initial directory. Used for test isolation.
    pub fn reset(&self) {
        *self.inner.write() = Self::seeded();
    }

    /// Exact match against the normalized email.
    pub fn resolve_by_email(&self, email: &str) -> Option<AuthUser> {
        let normalized = normalize_email(email);
        self.inner
            .read()
            .users
            .iter()
            .find(|user| user.email == normalized)
            .map(StoredUser::public)
    }

    /// Exact plaintext password match for the given email.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<AuthUser> {
        let normalized = normalize_email(email);
        self.inner
            .read()
            .users
            .iter()
            .find(|user| user.email == normalized && user.password == password)
            .map(StoredUser::public)
    }

    /// Store a new user under the next sequential id. Ids are never reused.
    /// The endpoint layer rejects duplicate emails before calling.
    pub fn create_user(&self, email: &str, password: &str) -> AuthUser {
        let mut directory = self.inner.write();
        let user = StoredUser {
            id: directory.next_id,
            email: normalize_email(email),
            password: password.to_string(),
        };
        directory.next_id += 1;
        let public = user.public();
        directory.users.push(user);
        public
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
