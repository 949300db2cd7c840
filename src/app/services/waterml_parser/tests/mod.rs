//! Shared test utilities and fixtures for WaterML parser tests

use std::fs;
use std::path::{Path, PathBuf};


/// Render one `wml2:point`; `None` value omits the `wml2:value` element
pub fn point(time: &str, value: Option<&str>) -> String {
    let value_element = match value {
        Some("") => "<wml2:value/>".to_string(),
        Some(v) => format!("<wml2:value>{}</wml2:value>", v),
        None => String::new(),
    };
    format!(
        "<wml2:point><wml2:MeasurementTVP><wml2:time>{}</wml2:time>{}</wml2:MeasurementTVP></wml2:point>",
        time, value_element
    )
}

/// Render a full WaterML collection for a gauge with the given points
pub fn waterml_document(reference: &str, title: &str, points: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<wml2:Collection xmlns:wml2="http://www.opengis.net/waterml/2.0"
                 xmlns:om="http://www.opengis.net/om/2.0"
                 xmlns:xlink="http://www.w3.org/1999/xlink"
                 xmlns:gml="http://www.opengis.net/gml/3.2">
  <gml:description>GRDC monthly discharge</gml:description>
  <wml2:observationMember>
    <om:OM_Observation gml:id="obs.1">
      <om:phenomenonTime/>
      <om:featureOfInterest xlink:href="{}" xlink:title="{}"/>
      <om:result>
        <wml2:MeasurementTimeseries gml:id="ts.1">
          {}
        </wml2:MeasurementTimeseries>
      </om:result>
    </om:OM_Observation>
  </wml2:observationMember>
</wml2:Collection>
"#,
        reference,
        title,
        points.join("\n          ")
    )
}

/// The two-point Kerki document: one value, one empty value
pub fn kerki_document() -> String {
    waterml_document(
        "2316200",
        "KERKI",
        &[
            point("1995-03-15T00:00:00", Some("120.5")),
            point("1995-04-01", Some("")),
        ],
    )
}

/// Write a document file and return its path
pub fn write_document(dir: &Path, filename: &str, content: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(filename);
    fs::write(&path, content)?;
    Ok(path)
}
