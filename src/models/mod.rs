//! Write-side payloads accepted by the services.

pub mod anime;
pub mod manga;
pub mod news;
pub mod people;
pub mod playlist;
pub mod review;
pub mod taxonomy;
