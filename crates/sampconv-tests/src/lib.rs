//! sampconv end-to-end test infrastructure
//!
//! - [`fixtures`]: IT modules written to a temporary directory, PCM generators
//! - [`reference`]: a pure-Rust BRR encoder (filter 0 only) implementing
//!   [`sampconv_brr::Encoder`], plus the matching decoder
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sampconv-tests
//! ```

pub mod fixtures;
pub mod reference;

pub use fixtures::{ramp, sine, ModuleFixture};
pub use reference::{decode_blocks, encode_blocks, EncodeCall, ReferenceEncoder};
