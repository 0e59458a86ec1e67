// handlers/mod.rs - Handler tiers
//
// Public (no auth) → Protected (admin bearer token)
pub mod public;    // Token acquisition, logout, site content, health
pub mod protected; // Admin session endpoints behind admin_auth_middleware
