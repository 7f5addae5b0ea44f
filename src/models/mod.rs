pub mod activity;
pub mod database;
pub mod domain;
pub mod project;
pub mod system_metric;
pub mod user;

#[allow(unused_imports)]
pub mod prelude {
    pub use super::activity::{self, Entity as Activity};
    pub use super::database::{self, Entity as ManagedDatabase};
    pub use super::domain::{self, Entity as Domain};
    pub use super::project::{self, Entity as Project};
    pub use super::system_metric::{self, Entity as SystemMetric};
    pub use super::user::{self, Entity as User};
}
