pub mod crypto_backend;
