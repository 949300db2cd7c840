//! Application constants for the GRDC converter
//!
//! This module contains namespace URIs, element and attribute names, table
//! column names, file conventions and snapshot framing constants.

// =============================================================================
// XML Namespaces
// =============================================================================

/// WaterML 2.0 namespace
pub const WML2_NAMESPACE: &str = "http://www.opengis.net/waterml/2.0";

/// OGC Observations & Measurements 2.0 namespace
pub const OM_NAMESPACE: &str = "http://www.opengis.net/om/2.0";

/// XLink namespace carrying the gauge reference and title
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

// =============================================================================
// WaterML Element Names
// =============================================================================

/// Element names used when walking a WaterML time-series document
pub mod elements {
    /// `wml2:observationMember`
    pub const OBSERVATION_MEMBER: &str = "observationMember";

    /// `om:OM_Observation`
    pub const OBSERVATION: &str = "OM_Observation";

    /// `om:featureOfInterest`
    pub const FEATURE_OF_INTEREST: &str = "featureOfInterest";

    /// `om:result`
    pub const RESULT: &str = "result";

    /// `wml2:MeasurementTimeseries`
    pub const MEASUREMENT_TIMESERIES: &str = "MeasurementTimeseries";

    /// `wml2:point`
    pub const POINT: &str = "point";

    /// `wml2:MeasurementTVP`
    pub const MEASUREMENT_TVP: &str = "MeasurementTVP";

    /// `wml2:time`
    pub const TIME: &str = "time";

    /// `wml2:value`
    pub const VALUE: &str = "value";

    /// `xlink:href`
    pub const HREF: &str = "href";

    /// `xlink:title`
    pub const TITLE: &str = "title";
}

// =============================================================================
// Feature Collection Attributes
// =============================================================================

/// Attribute keys read from each catalog feature
pub mod attributes {
    pub const GRID_NUMBER: &str = "grdc_no";
    pub const RIVER: &str = "river";
    pub const STATION: &str = "station";
}

// =============================================================================
// Table Columns
// =============================================================================

/// Column names of the gauge catalog table
pub mod gauge_columns {
    pub const GRID_NUMBER: &str = "GridNo";
    pub const RIVER: &str = "River";
    pub const STATION: &str = "Station";
}

/// Column names of a discharge series table
pub mod series_columns {
    pub const YEAR: &str = "Year";
    pub const MONTH: &str = "Month";
    pub const DISCHARGE: &str = "Discharge";
}

/// Header of the leading row-index column in CSV exports (left blank)
pub const INDEX_COLUMN: &str = "";

// =============================================================================
// Files and Formats
// =============================================================================

/// Extension of WaterML time-series documents
pub const DEFAULT_SERIES_EXTENSION: &str = "wml";

/// Default CSV field separator
pub const DEFAULT_CSV_SEPARATOR: u8 = b',';

/// Number of leading characters of a point time that form the calendar date
pub const DATE_PREFIX_LEN: usize = 10;

/// Calendar date format of the point time prefix
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Magic bytes opening every snapshot file
pub const SNAPSHOT_MAGIC: &[u8; 8] = b"GRDCSNAP";

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u16 = 1;

/// Application name used for the default configuration directory
pub const APP_NAME: &str = "grdc-converter";

/// Configuration file name within the application config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";
