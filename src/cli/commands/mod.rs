pub mod auth;
pub mod campaigns;
pub mod connections;
pub mod contacts;
pub mod dashboard;
pub mod lists;
pub mod tags;
