//! Wire types shared by the frontend and backend.

pub mod domain;
pub mod shared;
