// src/store/mod.rs
//
// In-memory stand-ins for the services the host application supplies:
// the data layer (directory), the per-browser session store, and the
// plugin settings store. Handlers receive them as shared `web::Data`.

pub mod directory;
pub mod session;
pub mod settings;
