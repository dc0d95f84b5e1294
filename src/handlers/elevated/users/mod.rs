// handlers/elevated/users/mod.rs - Admin-only user management

pub mod add; // POST /add
pub mod getall; // GET /getall
pub mod getid; // GET /getid/:username
pub mod update; // PUT /update

pub use add::user_add;
pub use getall::user_list_all;
pub use getid::user_get_by_username;
pub use update::user_update;
