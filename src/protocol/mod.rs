//! ISM8 object-server protocol layer.
//!
//! Frame structure, service identifiers and the stream splitter that cuts
//! one TCP read into validated object-server frames.

pub mod constants;
pub mod frame;

#[doc(inline)]
pub use constants::ServiceCode;
#[doc(inline)]
pub use frame::{FrameSplitter, ObjectServerFrame};
