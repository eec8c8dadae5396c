use crate::macros::id;

// Accounts live in an external user system; this core only ever compares
// their ids for ownership checks.
id!(UserId);
