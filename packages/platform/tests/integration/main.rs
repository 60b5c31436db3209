mod common;

mod auth;
mod classroom;
mod material;
mod submission;
