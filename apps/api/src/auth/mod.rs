// Authentication: Argon2id password hashing, HS256 bearer tokens, and the
// middleware that resolves them to a CurrentUser extension.

pub mod handlers;
pub mod middleware;
pub mod password;
pub mod token;
