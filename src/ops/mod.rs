pub mod builder;
pub mod history;
pub mod manager;
