//! Business logic services for admin.
//!
//! # Services
//!
//! - `imgbb` - Image upload to ImgBB
//! - `password` - Argon2 password hashing for admin accounts

pub mod imgbb;
pub mod password;

pub use imgbb::{ImgbbClient, UploadError, UploadedImage};
pub use password::{PasswordError, hash_password, verify_password};
