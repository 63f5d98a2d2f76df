pub mod ai;
pub mod settings;
pub mod store;
pub mod survey;
pub mod util;
