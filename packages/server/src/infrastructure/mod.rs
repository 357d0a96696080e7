//! Infrastructure 層
//!
//! ドメイン層が定義するインターフェース（registry / broadcaster / responder）の
//! 具体的な実装と、プロトコルごとの DTO を提供します。

pub mod broadcaster;
pub mod dto;
pub mod registry;
pub mod responder;
