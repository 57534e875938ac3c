pub mod extract;
pub mod resolve;
