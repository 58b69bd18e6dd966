pub mod template;
pub mod utils;
