//! mlu-core: shared error type and small sequence helpers
//!
//! Everything here is a stateless leaf function. The random and config
//! utilities live in `mlu-rng` and `mlu-config` and build on these types.

pub mod error;
pub mod html;
pub mod kwargs;
pub mod seq;
pub mod validate;

pub use error::{Error, Result};
pub use html::html_blocks_to_grid;
pub use kwargs::{Kwargs, Signature, adapt_argument_as_kwarg, remove_unused_kwargs};
pub use seq::{Sequence, clip_max, find_value_ids, one_hot, pad_array_right};
pub use validate::{PositiveInts, check_if_nonempty_positive_integers};
