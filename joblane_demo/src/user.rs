use std::sync::LazyLock;

use joblane_models::user::UserId;

// Account ids of the demo users. The accounts themselves live in the
// external user system.
pub static FOO: LazyLock<UserId> =
    LazyLock::new(|| "a8d95e0f-71ae-4c49-995e-695b7c93848c".try_into().unwrap());

pub static BAR: LazyLock<UserId> =
    LazyLock::new(|| "94d0e3ca-bf16-486b-a172-b87f4bcbd039".try_into().unwrap());

pub static ADMIN: LazyLock<UserId> =
    LazyLock::new(|| "e3f8a50a-a5a3-444a-9026-77336f716d03".try_into().unwrap());
