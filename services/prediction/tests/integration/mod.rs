//! End-to-end tests against a running HTTP server
