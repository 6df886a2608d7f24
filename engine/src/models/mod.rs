// Engine-internal row representations; cleaned rows live in `shared::models`.
pub mod raw_row;

pub use raw_row::RawTransaction;
