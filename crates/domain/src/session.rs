use crate::{Auth, CreateError, Credentials, DeleteError, ReadError, Token, User};

#[allow(async_fn_in_trait)]
pub trait SessionService {
    async fn register(&self, credentials: Credentials) -> Result<User, CreateError>;
    /// Requests a token, persists it and fetches the profile of the user.
    async fn login(&self, credentials: Credentials) -> Result<Auth, ReadError>;
    /// Restores the persisted token and validates it against the API.
    ///
    /// Without a persisted token the authentication state is empty. A token the API rejects is
    /// removed and the error is returned.
    async fn initialize_session(&self) -> Result<Auth, ReadError>;
    async fn logout(&self) -> Result<(), DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait SessionRepository {
    async fn register(&self, credentials: Credentials) -> Result<User, CreateError>;
    async fn request_token(&self, credentials: Credentials) -> Result<Token, ReadError>;
    async fn read_current_user(&self, token: &Token) -> Result<User, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait TokenRepository {
    async fn read_token(&self) -> Result<Option<Token>, String>;
    async fn write_token(&self, token: &Token) -> Result<(), String>;
    async fn delete_token(&self) -> Result<(), String>;
}
