use auth::AccessToken;
use auth::TokenIssuer;

use crate::credential::errors::AuthError;
use crate::credential::models::CredentialId;
use crate::credential::models::Identity;
use crate::credential::ports::TokenIssuing;

impl TokenIssuing for TokenIssuer {
    fn issue(&self, subject: CredentialId, identity: &Identity) -> Result<AccessToken, AuthError> {
        TokenIssuer::issue(self, subject, identity.as_str()).map_err(AuthError::from)
    }
}
