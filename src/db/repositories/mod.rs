pub mod anime;
pub mod cache;
pub mod catalog;
pub mod manga;
pub mod named;
pub mod news;
pub mod people;
pub mod playlist;
pub mod ranking;
pub mod review;
pub mod target;
pub mod user;
