//! Runtime structural type checking for dynamic value graphs.
//!
//! Build a type tree once with the constructors in [`t`] and the `or`/`and`
//! combinators, then check any number of [`Value`]s against it:
//!
//! ```ignore
//! use structural::{t, Value};
//!
//! let user = t::exact([
//!     ("name", t::str().into()),
//!     ("email", t::optional(t::str())),
//! ]);
//! let v = Value::object([("name", "ada")]);
//! assert!(user.check(&v).is_ok());
//! ```
//!
//! Mismatches come back as [`Failure`]s that carry the access path to the
//! offending value; `assert`/`slice` turn them into a [`StructuralError`].
pub mod batch;
pub mod checks;
pub mod decode;
pub mod error;
pub mod failure;
pub mod keys;
pub mod kind;
pub mod merge;
pub mod t;
pub mod value;

pub use checks::annotate::{Comment, IntoVerdict, Validation};
pub use checks::dict::Dict;
pub use checks::map::MapType;
pub use checks::primitives::{Is, Literal};
pub use checks::record::{Field, Modality, Struct, StructBuilder};
pub use error::{CauseReport, Error, Result, StructuralError};
pub use failure::{Failure, Outcome, PathSegment};
pub use keys::KeyTrack;
pub use kind::{Kind, Type};
pub use merge::MergeIntersect;
pub use value::{Class, Record, Tag, Value};
