// handlers/protected/mod.rs - Protected handlers (admin token required)
//
// Security Level: Admin bearer token
// Middleware: admin_auth_middleware injects AuthAdmin into request extensions

pub mod auth; // GET /api/auth/admin/me
