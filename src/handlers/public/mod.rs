// handlers/public/mod.rs - Public handlers (no actor in the body)

pub mod time; // GET /time
pub mod username; // GET /username/:id

pub use time::current_time;
pub use username::user_get_by_id;

/*
The numeric id lookup is public on purpose. Existing clients call it with
an empty body, and gating it would break them. /getid/:username, which
exposes the same record, stays admin-only.
*/
