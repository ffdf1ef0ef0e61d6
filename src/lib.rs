pub mod core;
pub mod perception;
pub mod synthesis;
pub mod reasoning;
pub mod pipeline;
pub mod bench;
