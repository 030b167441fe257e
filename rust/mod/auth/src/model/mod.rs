mod credentials;
mod session;

pub use credentials::*;
pub use session::*;
