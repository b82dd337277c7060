//! Sign-in, sign-up, sign-out and session restore.

use tracing::{info, warn};

use super::Board;
use crate::api::{Credentials, ProfileFields, ProfileResponse, Registration};
use crate::constants::PROFILE_SAVED_MESSAGE;
use crate::error::{ClientError, Operation};
use crate::session::{AuthState, Profile};
use crate::view::PanelKind;

impl Board {
    /// Sign in with email and password.
    ///
    /// A rejected login shows the inline indicator in the sign-in panel
    /// instead of an alert. A session that was already signed in stays
    /// signed in.
    ///
    /// # Errors
    ///
    /// Returns the error of the failed step.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ClientError> {
        let previous = self.begin_authentication().await;

        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let issued = match self.api.login(&credentials).await {
            Ok(issued) => issued,
            Err(error) => {
                info!(error = %error, "Login rejected");
                let mut state = self.state.lock().await;
                state.ui.sign_in_error = true;
                state.auth = self.fallback_state(previous);
                self.render(&mut state).await;
                return Err(error);
            }
        };

        {
            let mut state = self.state.lock().await;
            state.ui.sign_in_error = false;
            state.ui.close_if(PanelKind::SignIn);
        }
        self.establish(&issued.token, previous).await
    }

    /// Register an account, create its empty profile, then sign in with the
    /// issued token.
    ///
    /// # Errors
    ///
    /// Returns the error of the failed step; each step alerts with its own
    /// message.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        let previous = self.begin_authentication().await;

        let registration = Registration {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let issued = match self.api.signup(&registration).await {
            Ok(issued) => issued,
            Err(error) => return Err(self.fail_authentication(error, previous).await),
        };

        if let Err(error) = self
            .api
            .save_profile(Operation::CreateProfile, &issued.token, &ProfileFields::default())
            .await
        {
            warn!(username = %username, "Account created but profile creation failed");
            return Err(self.fail_authentication(error, previous).await);
        }

        self.state.lock().await.ui.close_if(PanelKind::SignUp);
        self.establish(&issued.token, previous).await
    }

    /// Forget the stored session and show the anonymous page.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored session cannot be removed.
    pub async fn logout(&self) -> Result<(), ClientError> {
        if let Err(error) = self.session.clear() {
            return Err(self.report(error.into()));
        }

        {
            let mut state = self.state.lock().await;
            state.ui.reset_for_sign_out();
            state.auth = AuthState::Anonymous;
            self.render(&mut state).await;
        }
        info!("Signed out");
        self.sync_all().await;
        Ok(())
    }

    /// Re-validate a stored token at start-up, then load content.
    ///
    /// Content is loaded whether or not the token is still accepted.
    ///
    /// # Errors
    ///
    /// Returns the error of the failed profile fetch.
    pub async fn restore_session(&self) -> Result<(), ClientError> {
        let Some(token) = self.session.token() else {
            {
                let mut state = self.state.lock().await;
                state.auth = AuthState::Anonymous;
                self.render(&mut state).await;
            }
            self.sync_all().await;
            return Ok(());
        };

        info!("Restoring stored session");
        self.begin_authentication().await;
        if let Err(error) = self.establish_restored(&token).await {
            self.sync_all().await;
            return Err(error);
        }
        Ok(())
    }

    /// Update the signed-in user's profile fields.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no session or the update is rejected.
    pub async fn save_profile(
        &self,
        additional_email: &str,
        address: &str,
        mobile: &str,
    ) -> Result<(), ClientError> {
        let token = self.token_for(Operation::SaveProfile)?;
        let fields = ProfileFields {
            additional_email: Some(additional_email.to_string()),
            address: Some(address.to_string()),
            mobile: Some(mobile.to_string()),
        };

        if let Err(error) = self
            .api
            .save_profile(Operation::SaveProfile, &token, &fields)
            .await
        {
            return Err(self.report(error));
        }

        self.alert(PROFILE_SAVED_MESSAGE);
        let mut state = self.state.lock().await;
        let profile = state.ui.profile.get_or_insert_with(|| Profile {
            username: self.session.username().unwrap_or_default(),
            ..Profile::default()
        });
        profile.additional_email = additional_email.to_string();
        profile.address = address.to_string();
        profile.mobile = mobile.to_string();
        self.render(&mut state).await;
        Ok(())
    }

    /// Mark the flow as in progress and return the state it replaced.
    async fn begin_authentication(&self) -> AuthState {
        std::mem::replace(&mut self.state.lock().await.auth, AuthState::Authenticating)
    }

    /// State to return to when an authentication attempt fails. A validated
    /// session whose token is still stored stays authenticated.
    fn fallback_state(&self, previous: AuthState) -> AuthState {
        if previous == AuthState::Authenticated && self.session.token().is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        }
    }

    /// Alert, fall back to the previous state and hand the error back.
    async fn fail_authentication(&self, error: ClientError, previous: AuthState) -> ClientError {
        let error = self.report(error);
        let mut state = self.state.lock().await;
        state.auth = self.fallback_state(previous);
        self.render(&mut state).await;
        error
    }

    /// Validate the stored token at start-up. A rejected token is forgotten
    /// when `clear_stale_token` is set.
    async fn establish_restored(&self, token: &str) -> Result<(), ClientError> {
        match self.api.fetch_profile(token).await {
            Ok(profile) => self.complete(token, profile, AuthState::Anonymous).await,
            Err(error) => {
                if self.clear_stale_token && error.is_auth_rejection() {
                    warn!(status = ?error.status(), "Stored token rejected, clearing session");
                    if let Err(e) = self.session.clear() {
                        warn!(error = %e, "Failed to clear stale session");
                    }
                }
                Err(self.fail_authentication(error, AuthState::Anonymous).await)
            }
        }
    }

    /// Resolve the username behind a freshly issued `token`, then sign in.
    async fn establish(&self, token: &str, previous: AuthState) -> Result<(), ClientError> {
        match self.api.fetch_profile(token).await {
            Ok(profile) => self.complete(token, profile, previous).await,
            Err(error) => Err(self.fail_authentication(error, previous).await),
        }
    }

    /// Persist the token and username and switch to the authenticated view.
    async fn complete(
        &self,
        token: &str,
        profile: ProfileResponse,
        previous: AuthState,
    ) -> Result<(), ClientError> {
        let username = profile.user.username;
        if let Err(error) = self.session.set(token, &username) {
            return Err(self.fail_authentication(error.into(), previous).await);
        }

        {
            let mut state = self.state.lock().await;
            state.ui.profile = Some(Profile {
                username: username.clone(),
                additional_email: profile.additional_email.unwrap_or_default(),
                address: profile.address.unwrap_or_default(),
                mobile: profile.mobile.unwrap_or_default(),
            });
            state.auth = AuthState::Authenticated;
            self.render(&mut state).await;
        }
        info!(username = %username, "Signed in");

        self.sync_all().await;
        Ok(())
    }
}
