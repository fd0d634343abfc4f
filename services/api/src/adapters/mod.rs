pub mod db;

pub use db::SqliteActivityStore;
