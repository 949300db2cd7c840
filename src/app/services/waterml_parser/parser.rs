//! Core WaterML parser implementation
//!
//! This module walks the fixed element nesting of a WaterML 2.0 time-series
//! document and turns each measurement point into a discharge record.

use roxmltree::{Document, Node};
use std::path::Path;
use tracing::{debug, info};

use super::document::ParsedDocument;
use crate::app::models::{DischargeRecord, DischargeSeries};
use crate::app::services::field_parsers::{parse_discharge, parse_year_month, title_case};
use crate::config::Namespaces;
use crate::constants::elements;
use crate::{Error, Result};

/// WaterML parser for per-gauge monthly discharge documents
///
/// Every failure is fatal for the document: missing structural nodes,
/// malformed points and unparseable dates or values all abort parsing, so a
/// caller never sees a partial series.
#[derive(Debug, Clone, Default)]
pub struct WatermlParser {
    namespaces: Namespaces,
}

impl WatermlParser {
    /// Create a new parser resolving names against `namespaces`
    pub fn new(namespaces: Namespaces) -> Self {
        Self { namespaces }
    }

    /// Namespaces this parser resolves element names against
    pub fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }

    /// Parse a WaterML document file
    pub fn parse_file(&self, file_path: &Path) -> Result<ParsedDocument> {
        debug!("Parsing WaterML file: {}", file_path.display());

        let content = std::fs::read_to_string(file_path)
            .map_err(|e| Error::io(format!("Failed to read file {}", file_path.display()), e))?;

        self.parse_str(&content).map_err(|e| e.with_path(file_path))
    }

    /// Parse WaterML document text
    pub fn parse_str(&self, xml: &str) -> Result<ParsedDocument> {
        let document = Document::parse(xml)?;
        let root = document.root_element();

        let wml2 = self.namespaces.wml2.as_str();
        let om = self.namespaces.om.as_str();
        let xlink = self.namespaces.xlink.as_str();

        let member = required_child(root, wml2, "wml2", elements::OBSERVATION_MEMBER)?;
        let observation = required_child(member, om, "om", elements::OBSERVATION)?;
        let feature = required_child(observation, om, "om", elements::FEATURE_OF_INTEREST)?;

        let reference = feature
            .attribute((xlink, elements::HREF))
            .ok_or_else(|| Error::document_structure(format!("xlink:{}", elements::HREF)))?
            .to_string();
        let title = title_case(feature.attribute((xlink, elements::TITLE)).unwrap_or_default());

        let result = required_child(observation, om, "om", elements::RESULT)?;
        let timeseries = required_child(result, wml2, "wml2", elements::MEASUREMENT_TIMESERIES)?;

        let series = timeseries
            .children()
            .filter(|n| n.has_tag_name((wml2, elements::POINT)))
            .enumerate()
            .map(|(index, point)| self.parse_point(index, point))
            .collect::<Result<DischargeSeries>>()?;

        info!(
            "Parsed gauge {} ({}): {} records, {} missing",
            reference,
            title,
            series.len(),
            series.missing_count()
        );

        Ok(ParsedDocument {
            reference,
            title,
            series,
        })
    }

    /// Parse one `wml2:point` holding exactly one time/value pair
    fn parse_point(&self, index: usize, point: Node<'_, '_>) -> Result<DischargeRecord> {
        let wml2 = self.namespaces.wml2.as_str();

        let mut pairs = point
            .children()
            .filter(|n| n.has_tag_name((wml2, elements::MEASUREMENT_TVP)));
        let measurement = match (pairs.next(), pairs.next()) {
            (Some(measurement), None) => measurement,
            (None, _) => {
                return Err(Error::malformed_point(
                    index,
                    format!("no wml2:{} element", elements::MEASUREMENT_TVP),
                ));
            }
            (Some(_), Some(_)) => {
                return Err(Error::malformed_point(
                    index,
                    format!("more than one wml2:{} element", elements::MEASUREMENT_TVP),
                ));
            }
        };

        let time = child(measurement, wml2, elements::TIME)
            .and_then(element_text)
            .ok_or_else(|| {
                Error::malformed_point(index, format!("no wml2:{} text", elements::TIME))
            })?;
        let (year, month) = parse_year_month(&time)?;

        let value = child(measurement, wml2, elements::VALUE).and_then(element_text);
        let discharge = parse_discharge(value.as_deref())?;

        Ok(DischargeRecord::new(year, month, discharge))
    }
}

/// First direct child element named `name` in `namespace`
fn child<'a, 'input>(
    node: Node<'a, 'input>,
    namespace: &str,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name((namespace, name)))
}

/// All text inside `node`, skipping comments and processing instructions
///
/// `None` when the element holds no text at all.
fn element_text(node: Node<'_, '_>) -> Option<String> {
    let mut texts = node
        .descendants()
        .filter(|d| d.is_text())
        .filter_map(|d| d.text())
        .peekable();
    texts.peek()?;
    Some(texts.collect())
}

/// Like [`child`], but a missing element is a structural error
fn required_child<'a, 'input>(
    node: Node<'a, 'input>,
    namespace: &str,
    prefix: &str,
    name: &str,
) -> Result<Node<'a, 'input>> {
    child(node, namespace, name)
        .ok_or_else(|| Error::document_structure(format!("{}:{}", prefix, name)))
}
