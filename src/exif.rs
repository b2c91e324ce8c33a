pub use extractor::MetadataExtractor;
pub use lookups::Lookup;
pub use normalize::{NormalizeOptions, RationalText, Rule};
pub use table::{ExifTables, FieldEntry, StandardFieldTable, UserDefinedFieldTable};
pub use tags::{field_name_for, ExifTag};

pub mod lookups;

mod datetime;
mod extractor;
mod normalize;
mod table;
mod tags;
