pub mod additional;
pub mod record;

pub use additional::AdditionalProperties;
pub use record::Record;
