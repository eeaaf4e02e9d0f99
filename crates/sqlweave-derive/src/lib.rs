//! Derive macros for sqlweave
//!
//! Provides `#[derive(Record)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod record;

/// Derive the `Record` trait for a struct with named fields.
///
/// # Example
///
/// ```ignore
/// use sqlweave::Record;
///
/// #[derive(Record)]
/// #[record(rename_all = "snake_case")]
/// struct User {
///     #[record(db = ",skipinsert")]
///     id: i64,
///     #[record(db = "full_name")]
///     name: String,
///     #[record(flatten)]
///     audit: Audit,
///     #[record(skip)]
///     cache: Option<String>,
/// }
/// ```
///
/// # Attributes
///
/// Struct level:
/// - `#[record(rename_all = "...")]` - Default column naming: `lowercase` (default),
///   `snake_case`, `camelCase`, `PascalCase`, `SCREAMING_SNAKE_CASE`, `kebab-case`
///
/// Field level:
/// - `#[record(<tag> = "name,options")]` - Annotation for the `<tag>` namespace
/// - `#[record(flatten)]` - Merge an embedded record's columns unqualified
/// - `#[record(nested)]` - Prefix an embedded record's columns with `<column>.`
/// - `#[record(skip)]` - Leave the field out entirely
///
/// Plain fields must implement `Clone` and `Into<sqlweave::Value>`; flatten and
/// nested fields must implement `Record`.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
