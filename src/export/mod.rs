//! Model export and serialization module

mod serializer;

pub use serializer::{
    load_model, save_model, ModelMetadata, SerializationFormat, SerializedModel,
};
