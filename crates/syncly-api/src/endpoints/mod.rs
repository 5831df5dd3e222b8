// REST endpoint catalog, one `impl Client` block per resource family.

mod cluster;
mod config;
mod db;
mod debug;
mod events;
mod folder;
mod noauth;
mod stats;
mod svc;
mod system;
