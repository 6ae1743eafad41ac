//! # Custom Attributes
//!
//! Addresses carry schema-defined extras ("custom attributes") whose stored values are
//! often option ids rather than text. Rendering them needs two things:
//!
//! - **Option tables** ([`OptionTable`]): per attribute code, the `{value, label}` pairs
//!   defined by the store. Supplied by the page, read-only while rendering.
//! - **Label resolution** ([`resolve_label`]): picks the best display text for a value.
//!
//! ## Resolution Order
//!
//! | Shape | Result |
//! |-------|--------|
//! | plain string | the string itself |
//! | descriptor with non-empty `label` | the label |
//! | list of option values | each value's option label (or the value), joined with `", "` |
//! | object, no option table for the code, has `file` | the `file` member |
//! | object | the object's values joined with `", "` |
//! | scalar | the matching option label |
//! | nothing matched | the raw value |

mod label;
mod options;

pub use label::{resolve_label, LABEL_DELIMITER};
pub use options::{AttributeOption, OptionTable};
