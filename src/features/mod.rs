pub mod encoder;
pub mod input;
pub mod schema;

pub use encoder::{encode_features, FeatureEncoder};
pub use input::{RawSessionInput, SessionForm, TimeOfDay};
pub use schema::{AlignedFeatureRow, EncodedFeature, FeatureMap, FeatureSchema, SchemaColumn};
