//! Local credential check and profile storage. Credentials are plaintext
//! JSON in the store, demo behaviour only, never real authentication.

use crate::domain::profile::{Credentials, UserProfile};
use crate::errors::TrackerError;
use crate::storage::{read_json_or, write_json, KeyValueStore, CREDENTIALS_KEY, PROFILE_KEY};

pub struct ProfileService<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ProfileService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Registers the local account, overwriting any existing one.
    pub fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, TrackerError> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(TrackerError::Validation(
                "please fill in name, email, and password".into(),
            ));
        }
        let profile = UserProfile::new(name.trim(), email.trim());
        let credentials = Credentials {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        write_json(&self.store, CREDENTIALS_KEY, &credentials);
        write_json(&self.store, PROFILE_KEY, &profile);
        Ok(profile)
    }

    /// Checks the stored credentials and returns the profile on a match.
    pub fn login(&self, email: &str, password: &str) -> Result<UserProfile, TrackerError> {
        let credentials: Option<Credentials> = read_json_or(&self.store, CREDENTIALS_KEY, || None);
        let credentials = credentials
            .ok_or_else(|| TrackerError::Auth("no account found, please sign up".into()))?;
        if credentials.email != email.trim() || credentials.password != password {
            return Err(TrackerError::Auth("invalid email or password".into()));
        }
        let fallback_email = credentials.email.clone();
        Ok(read_json_or(&self.store, PROFILE_KEY, || {
            UserProfile::new("Unknown", fallback_email)
        }))
    }

    pub fn profile(&self) -> Option<UserProfile> {
        read_json_or(&self.store, PROFILE_KEY, || None)
    }

    pub fn update_profile(&self, profile: &UserProfile) {
        write_json(&self.store, PROFILE_KEY, profile);
    }
}
