pub mod health;
pub use self::health::health;

pub mod search;
pub use self::search::find_users;
