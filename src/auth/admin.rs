use thiserror::Error;
use tracing::debug;

use super::password::{verify_password, PasswordError};
use crate::database::models::Admin;
use crate::database::{ContentStore, DatabaseError};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// Resolve an admin by email and check the password.
///
/// Returns `Ok(None)` for an unknown email or a wrong password; the caller
/// cannot tell the two apart.
pub async fn authenticate_admin(
    store: &dyn ContentStore,
    email: &str,
    password: &str,
) -> Result<Option<Admin>, AuthError> {
    let Some(admin) = store.find_admin_by_email(email).await? else {
        debug!("Admin login rejected: no account for {}", email);
        return Ok(None);
    };

    if !verify_password(password, &admin.password)? {
        debug!("Admin login rejected: password mismatch for {}", email);
        return Ok(None);
    }

    Ok(Some(admin))
}
