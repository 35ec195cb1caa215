// Authentication: local email/password accounts and Google federated
// sign-in, both converging on the same HS256 bearer token.

pub mod extract;
pub mod google;
pub mod handlers;
pub mod password;
pub mod token;
