use roster_core::{NonEmptyString, PLATFORM_USER_NOT_FOUND_CODE};
use tracing::{info, warn};

use super::wire::{CreateIdentityUserRequest, CreatePlatformUserRequest, CreatedIdentityUser};
use super::*;
use crate::gateway_ports::HttpMethod;

impl UserService {
    /// Creates an identity account and links a platform user to it.
    ///
    /// The identity account is created first. If linking the platform user
    /// fails afterwards, the identity account is left in place.
    pub async fn create(&self, username: &str, password: &str) -> AppResult<UserId> {
        let username = NonEmptyString::new(username)?;
        if password.is_empty() {
            return Err(AppError::Validation("password must not be empty".to_owned()));
        }

        let identity_endpoint = self.identity_endpoints.identity_endpoint().await?;
        let body = encode(
            &CreateIdentityUserRequest::for_username(username.as_str(), password),
            "identity user creation request",
        )?;
        let request = self.identity_gateway.new_request(
            HttpMethod::Post,
            format!("{identity_endpoint}/Users").as_str(),
            self.access_token(),
            Some(body),
        )?;
        let response = self
            .identity_gateway
            .perform_request_for_json(request)
            .await?;
        let user_id = decode::<CreatedIdentityUser>(response, "identity user creation response")
            .and_then(|created| {
                UserId::new(created.id).map_err(|error| {
                    AppError::Internal(format!(
                        "identity API returned an invalid id for '{username}': {error}"
                    ))
                })
            })
            .inspect_err(|error| {
                warn!(
                    username = %username,
                    error = %error,
                    "identity account may exist but its id could not be read"
                );
            })?;

        let body = encode(
            &CreatePlatformUserRequest {
                guid: user_id.as_str(),
            },
            "platform user creation request",
        )?;
        if let Err(error) = self
            .platform_gateway
            .create_resource(
                self.platform_url("/v2/users").as_str(),
                self.access_token(),
                Some(body),
            )
            .await
        {
            warn!(
                user_id = %user_id,
                username = %username,
                error = %error,
                "platform user creation failed; identity account was left in place"
            );
            return Err(error);
        }

        info!(user_id = %user_id, username = %username, "user created");
        Ok(user_id)
    }

    /// Deletes the platform user, then the identity account.
    ///
    /// A platform user that no longer exists does not stop the identity
    /// account from being deleted.
    pub async fn delete(&self, user_id: &UserId) -> AppResult<()> {
        let platform_url = self.platform_url(format!("/v2/users/{user_id}").as_str());

        match self
            .platform_gateway
            .delete_resource(platform_url.as_str(), self.access_token())
            .await
        {
            Ok(()) => {}
            Err(error) if error.is_remote_code(PLATFORM_USER_NOT_FOUND_CODE) => {
                warn!(
                    user_id = %user_id,
                    "platform user already absent; deleting identity account"
                );
            }
            Err(error) => return Err(error),
        }

        let identity_endpoint = self
            .identity_endpoints
            .identity_endpoint()
            .await
            .inspect_err(|error| {
                warn!(
                    user_id = %user_id,
                    error = %error,
                    "identity endpoint unavailable after platform user was removed"
                );
            })?;
        if let Err(error) = self
            .identity_gateway
            .delete_resource(
                format!("{identity_endpoint}/Users/{user_id}").as_str(),
                self.access_token(),
            )
            .await
        {
            warn!(
                user_id = %user_id,
                error = %error,
                "identity account deletion failed after platform user was removed"
            );
            return Err(error);
        }

        info!(user_id = %user_id, "user deleted");
        Ok(())
    }
}
