//! Mathematical primitives for the Ring-LWE key exchange.
//!
//! - **Number-Theoretic Transform (NTT)** with Montgomery arithmetic
//! - **Polynomial operations** over R_q = Z_q[X]/(X^1024 + 1), q = 12289
//! - **Seeded sampling** of the public polynomial and of binomial noise
//!
//! # Example
//!
//! ```
//! use nobus_rlwe::math::{sampling, NttContext};
//!
//! let ctx = NttContext::newhope();
//! let mut e = sampling::noise(&[0u8; 32], 1);
//! e.to_ntt(&ctx);
//! assert!(e.is_ntt());
//! ```

pub mod ntt;
pub mod poly;
pub mod sampling;

pub use ntt::NttContext;
pub use poly::Poly;
