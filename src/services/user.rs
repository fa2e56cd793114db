//! User service

use crate::api::RequestClient;
use crate::error::Result;
use crate::models::{ProfileUpdate, User};

/// Path of the signed-in user.
pub const ME_PATH: &str = "/user/me";

/// Path for profile updates.
pub const PROFILE_PATH: &str = "/user/profile";

/// Typed façade for the user endpoints.
#[derive(Debug, Clone)]
pub struct UserService {
    client: RequestClient,
}

impl UserService {
    /// Create a service on top of `client`
    pub fn new(client: RequestClient) -> Self {
        Self { client }
    }

    /// `GET /user/me`: the signed-in user
    pub async fn me(&self) -> Result<User> {
        self.client.get(ME_PATH).await
    }

    /// `PUT /user/profile`: submit a partial update, returning the updated user
    ///
    /// The update is sent as-is; an empty update is not rejected here.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        self.client.put(PROFILE_PATH, update).await
    }
}
