use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use log::info;

use crate::error::StoreError;
use crate::user::{DEMO_USERS_JSON, User};

/// In-memory user data source handed to request handlers
///
/// The data set is fixed after startup. Readers get an `Arc` snapshot, so a
/// `reload` never changes what an in-flight request already holds.
#[derive(Clone, Debug)]
pub struct UserStore {
    users: Arc<RwLock<Arc<[User]>>>,
}

impl UserStore {
    /// Create a store from a list of users
    ///
    /// # Arguments
    /// * `users` - Users in display order
    ///
    /// # Returns
    /// * `Result<UserStore, StoreError>` - The store, or `DuplicateId` if two users share an id
    pub fn new(users: Vec<User>) -> Result<Self, StoreError> {
        check_unique_ids(&users)?;
        Ok(UserStore {
            users: Arc::new(RwLock::new(users.into())),
        })
    }

    /// The four built-in demo users
    pub fn demo() -> Result<Self, StoreError> {
        Self::new(parse_users(DEMO_USERS_JSON)?)
    }

    /// Load users from a JSON array on disk
    ///
    /// # Examples
    /// ```no_run
    /// use user_report::repository::UserStore;
    ///
    /// match UserStore::from_json_file("users.json") {
    ///     Ok(store) => println!("Loaded {} users", store.len()),
    ///     Err(e) => eprintln!("Error loading users: {}", e),
    /// }
    /// ```
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::new(read_users_file(path.as_ref())?)
    }

    /// Current snapshot, in insertion order
    pub fn all(&self) -> Arc<[User]> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn get(&self, id: i64) -> Option<User> {
        self.all().iter().find(|u| u.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.all().is_empty()
    }

    /// Replace the whole data set
    ///
    /// Validation happens before the swap; on error the old data stays.
    pub fn reload(&self, users: Vec<User>) -> Result<(), StoreError> {
        check_unique_ids(&users)?;
        let mut current = self.users.write().unwrap_or_else(PoisonError::into_inner);
        *current = users.into();
        Ok(())
    }

    /// Replace the data set with the contents of a JSON file
    ///
    /// # Returns
    /// * `Result<usize, StoreError>` - Number of users now loaded
    pub fn reload_from_file(&self, path: impl AsRef<Path>) -> Result<usize, StoreError> {
        let path = path.as_ref();
        let users = read_users_file(path)?;
        let count = users.len();
        self.reload(users)?;
        info!("Reloaded {} users from {}", count, path.display());
        Ok(count)
    }
}

/// Parse a JSON array of users
pub fn parse_users(json: &str) -> Result<Vec<User>, StoreError> {
    Ok(serde_json::from_str(json)?)
}

fn read_users_file(path: &Path) -> Result<Vec<User>, StoreError> {
    let data = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_users(&data)
}

fn check_unique_ids(users: &[User]) -> Result<(), StoreError> {
    let mut seen = HashSet::new();
    for user in users {
        if !seen.insert(user.id) {
            return Err(StoreError::DuplicateId(user.id));
        }
    }
    Ok(())
}
