mod auth;
mod campaigns;
mod catalog;
mod client;
mod connections;
mod contacts;
mod dashboard;

pub use client::{ApiClient, Auth};
