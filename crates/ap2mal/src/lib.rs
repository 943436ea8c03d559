//! ap2mal library for converting exported anime lists into MyAnimeList
//! import documents.
//!
//! This library provides the conversion pipeline: title normalization,
//! catalog resolution via the Jikan API v4, record building, and XML
//! serialization.

pub mod api;
pub mod converter;
pub mod normalize;
pub mod record;
pub mod resolver;
pub mod xml;

pub use api::{AnimeCandidate, JikanClient};
pub use converter::{ConversionOutcome, ConvertError, ConverterStats, ListConverter};
pub use normalize::normalize_title;
pub use record::{build_record, convert_score, convert_status};
pub use resolver::{Resolver, SearchProvider};
pub use xml::render_document;
