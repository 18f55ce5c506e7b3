mod auth;
mod blog;
mod docs;
mod posts;
mod upload;
