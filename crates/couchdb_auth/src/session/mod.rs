pub mod client;
pub mod models;

pub use client::RemoteSessionClient;
pub use models::{
    ResetPasswordOptions, ResetPasswordRequest, SessionCreationResponse, SessionInfo, UserContext,
};
