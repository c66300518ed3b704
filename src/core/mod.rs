//! Core business logic abstractions

pub mod config;
pub mod conversion;
pub mod currency;
pub mod error;
pub mod format;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use conversion::{
    ConversionProvider, ConversionRequest, ConversionResult, Converter, FormattedAmount,
};
pub use currency::{CurrencyCode, list_currencies};
pub use error::{FetchError, FetchResult};
pub use rates::{RateHistoryProvider, RateOutcome, RatePoint, RateSeries};
