pub mod admin;
pub mod auth;
pub mod family;
pub mod member;
pub mod photo;
pub mod relationship;
pub mod story;
