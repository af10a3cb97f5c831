//! Overlay export: KMZ archives and GPX waypoint files
//!
//! Exporters serialize into memory first and write the destination with a
//! single call, so a serialization failure never leaves a file behind.

use crate::data::Waypoint;
use kml::types::{Geometry, Placemark, Point as KmlPoint};
use kml::{Kml, KmlDocument, KmlWriter};
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Name of the KML document inside a KMZ archive
pub const KMZ_DOCUMENT_NAME: &str = "doc.kml";

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// Errors from the underlying file format libraries
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("KML writing error: {0}")]
    Kml(#[from] kml::Error),

    #[error("ZIP archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("GPX writing error: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
}

/// Overlay file formats the application can write
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Kmz,
    Gpx,
}

impl ExportFormat {
    /// Pick the format from a path's extension, defaulting to KMZ
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("gpx") => Self::Gpx,
            _ => Self::Kmz,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Kmz => "kmz",
            Self::Gpx => "gpx",
        }
    }

    /// Label used for the save dialog filter and status messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::Kmz => "KMZ",
            Self::Gpx => "GPX",
        }
    }

    pub fn exporter(&self) -> Box<dyn OverlayExporter> {
        match self {
            Self::Kmz => Box::new(KmzExporter),
            Self::Gpx => Box::new(GpxExporter),
        }
    }
}

/// Writes a set of waypoints as a geographic overlay file
pub trait OverlayExporter {
    fn format(&self) -> ExportFormat;

    fn export(&self, waypoints: &[Waypoint], path: &Path) -> Result<(), ExportError>;
}

/// KMZ writer: a deflated ZIP holding one KML document with a point per waypoint
#[derive(Clone, Copy, Debug, Default)]
pub struct KmzExporter;

impl KmzExporter {
    /// Build the KML document, coordinates ordered (longitude, latitude)
    pub fn kml_document(waypoints: &[Waypoint]) -> Kml {
        let placemarks = waypoints
            .iter()
            .map(|waypoint| {
                Kml::Placemark(Placemark {
                    name: Some(waypoint.name().to_string()),
                    geometry: Some(Geometry::Point(KmlPoint::new(
                        waypoint.longitude(),
                        waypoint.latitude(),
                        None,
                    ))),
                    ..Default::default()
                })
            })
            .collect();

        Kml::KmlDocument(KmlDocument {
            attrs: HashMap::from([("xmlns".to_string(), KML_NAMESPACE.to_string())]),
            elements: vec![Kml::Document {
                attrs: HashMap::new(),
                elements: placemarks,
            }],
            ..Default::default()
        })
    }

    /// Serialize the waypoints into KMZ bytes
    pub fn to_bytes(waypoints: &[Waypoint]) -> Result<Vec<u8>, ExportError> {
        profiling::scope!("KmzExporter::to_bytes");

        let mut kml_bytes = Vec::new();
        KmlWriter::from_writer(&mut kml_bytes).write(&Self::kml_document(waypoints))?;

        let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        archive.start_file(KMZ_DOCUMENT_NAME, options)?;
        archive.write_all(&kml_bytes)?;
        Ok(archive.finish()?.into_inner())
    }
}

impl OverlayExporter for KmzExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Kmz
    }

    fn export(&self, waypoints: &[Waypoint], path: &Path) -> Result<(), ExportError> {
        let bytes = Self::to_bytes(waypoints)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// GPX 1.1 writer with one `<wpt>` per waypoint
#[derive(Clone, Copy, Debug, Default)]
pub struct GpxExporter;

impl GpxExporter {
    pub fn gpx_document(waypoints: &[Waypoint]) -> gpx::Gpx {
        let waypoints = waypoints
            .iter()
            .map(|waypoint| {
                let mut wpt = gpx::Waypoint::new(waypoint.position());
                wpt.name = Some(waypoint.name().to_string());
                wpt.comment = Some(waypoint.grid_reference().to_string());
                wpt
            })
            .collect();

        gpx::Gpx {
            version: gpx::GpxVersion::Gpx11,
            creator: Some(env!("CARGO_PKG_NAME").to_string()),
            waypoints,
            ..Default::default()
        }
    }
}

impl OverlayExporter for GpxExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Gpx
    }

    fn export(&self, waypoints: &[Waypoint], path: &Path) -> Result<(), ExportError> {
        profiling::scope!("GpxExporter::export");

        let mut bytes = Vec::new();
        gpx::write(&Self::gpx_document(waypoints), &mut bytes)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
