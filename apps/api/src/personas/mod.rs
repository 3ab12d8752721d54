// Persona persistence and the session-scoped CRUD API.
// Every query filters on session_id; a persona owned by another session is
// indistinguishable from one that does not exist.

pub mod handlers;
pub mod store;
