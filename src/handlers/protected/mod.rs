// handlers/protected/mod.rs - Protected handlers (valid actor required)
//
// The actor only has to exist with matching credentials; admin status is
// not required here.

pub mod logged; // GET /logged
pub mod session; // POST /login, POST /logout

pub use logged::user_list_logged;
pub use session::{session_login, session_logout};
