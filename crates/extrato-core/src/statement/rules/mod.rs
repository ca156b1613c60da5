//! Rule-based field extraction for bank statements.

pub mod amounts;
pub mod locator;
pub mod patterns;

pub use amounts::{format_brl, parse_amount, parse_brazilian_amount, AmountFormat};
pub use locator::{Field, FieldPattern};
pub use patterns::NO_MOVEMENT_MARKER;
