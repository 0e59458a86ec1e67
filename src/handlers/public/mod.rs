// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Security Level: None
// Middleware: CORS + request tracing only

pub mod auth;    // POST /api/auth/admin/login, POST /api/auth/logout
pub mod blog;    // GET /api/blog/posts/:slug
pub mod careers; // GET /api/career-postings/:id
pub mod health;  // GET /api/health
