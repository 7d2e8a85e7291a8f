pub mod claims;
pub mod errors;
pub mod issuer;
pub mod validator;

pub use claims::Claims;
pub use errors::AuthError;
pub use issuer::TokenIssuer;
pub use validator::TokenValidator;
