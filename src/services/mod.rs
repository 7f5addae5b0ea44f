pub mod provisioning;
pub mod scheduler;
pub mod security;
pub mod seed;

pub use provisioning::connection_string;
pub use security::*;
pub use seed::seed_demo_data;
