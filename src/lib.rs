pub mod config;
pub mod contact;
pub mod coordinator;
pub mod counter;
pub mod effects;
pub mod error;
pub mod filter;
pub mod layout;
pub mod log;
pub mod nav;
pub mod page;
pub mod reveal;

#[cfg(target_arch = "wasm32")]
pub mod dom;

#[cfg(test)]
mod fake_page;
