//! Dynamic comment form models
//!
//! A [`FormSchema`](crate::schema::FormSchema) is turned into a
//! [`FormModelDescriptor`] once and cached by [`ModelFactory`]. Submissions
//! are then cast, validated and serialized through [`FormInstance`].

mod attribute;
mod descriptor;
mod factory;
mod hints;
mod instance;
mod value;

pub use attribute::{slugify, AttributeDescriptor, ValidationRule, ValueType};
pub use descriptor::FormModelDescriptor;
pub use factory::ModelFactory;
pub use hints::{Choice, InputHints, InputKind};
pub use instance::{
    FailureKey, FailureKind, FormInstance, StructuredComment, ValidationFailure,
};
pub use value::{FieldValue, RawValue, Submission, MULTI_SEPARATOR};
