//! Infrastructure 層
//!
//! ワイヤーコーデック、DTO、ドメイン層の trait の具体的な実装を提供します。

pub mod codec;
pub mod dto;
pub mod registry;
pub mod session;
