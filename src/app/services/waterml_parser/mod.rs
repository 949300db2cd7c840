//! WaterML 2.0 parser for monthly discharge documents
//!
//! Each document holds one gauge's series in a fixed nesting:
//!
//! ```text
//! wml2:observationMember
//!   om:OM_Observation
//!     om:featureOfInterest   (xlink:href = gauge reference, xlink:title = name)
//!     om:result
//!       wml2:MeasurementTimeseries
//!         wml2:point
//!           wml2:MeasurementTVP
//!             wml2:time      (only the leading YYYY-MM-DD is read)
//!             wml2:value     (empty or absent = missing)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use grdc_converter::app::services::waterml_parser::WatermlParser;
//!
//! # fn example() -> grdc_converter::Result<()> {
//! let parser = WatermlParser::default();
//! let document = parser.parse_file(std::path::Path::new("2316200_Q_Month.wml"))?;
//! println!("{}: {} records", document.reference, document.record_count());
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod parser;

#[cfg(test)]
pub mod tests;

pub use document::ParsedDocument;
pub use parser::WatermlParser;
