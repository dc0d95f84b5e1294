// handlers/elevated/mod.rs - Elevated handlers (admin actor required)
//
// Every handler here parses an actor out of the body and runs it through
// the IsAdmin gate before the store is touched.

pub mod users;

pub use users::*;

/*
ELEVATED REQUEST FLOW:

1. Read body; empty → 400 EMPTY_BODY
2. Decode as a single actor or as [actor, target]; bad JSON → 400
   MALFORMED_JSON, fewer than two users → 400 ENVELOPE_TOO_SHORT
3. auth::authorize(actor, IsAdmin); refused → 400 UNAUTHORIZED
4. Store call; failure → 400 STORE_OPERATION_FAILED
5. 200 with or without a JSON body

Step 3 always precedes step 4. A refused actor never reaches the store.
*/
