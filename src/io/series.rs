//! Time-series driver: output layout, case dictionary and per-step conversion.
//!
//! Every selected time step becomes one file under
//! `<case>/<conversion directory>/`, named after the time value:
//! `<time>.cgns` for volume exports, `<time>_boundaries.cgns` for boundary
//! exports and `<time>_boundaries_simple.cgns` for boundary geometry checks.

use std::fs;
use std::path::{Path, PathBuf};

use crate::algs::interpolate::PointInterpolator;
use crate::data::field::FieldSet;
use crate::data::quantity::init_quantity_table;
use crate::io::cgns::{ExportMode, ExportOptions, ZoneAssembler};
use crate::io::tree::CgnsTree;
use crate::io::CgnsWriter;
use crate::mesh_error::FoamCgnsError;
use crate::topology::mesh::FoamMesh;

/// Output subdirectory used when the case dictionary does not name one.
pub const DEFAULT_CONVERSION_DIRECTORY: &str = "ConversionCGNS";
/// Case dictionary location, relative to the case directory.
pub const DICTIONARY_PATH: &str = "constant/foamToCGNSDict";

const KW_CONVERSION_DIRECTORY: &str = "ConversionDirectory";
const KW_ALLOW_USER_DEFINED_FIELDS: &str = "AllowUserDefinedFields";

/// Settings read from the case dictionary.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ConversionDictionary {
    pub conversion_directory: Option<String>,
    pub allow_user_defined_fields: bool,
}

impl ConversionDictionary {
    /// Parse `keyword value;` entries.
    ///
    /// `//` and `/* */` comments and brace-delimited sub-dictionaries (such as
    /// the `FoamFile` header) are ignored, as are unknown keywords.
    pub fn parse(text: &str) -> Result<Self, FoamCgnsError> {
        let mut dict = Self::default();
        for (keyword, value) in top_level_entries(&strip_comments(text)) {
            match keyword.as_str() {
                KW_CONVERSION_DIRECTORY => {
                    dict.conversion_directory = Some(value.trim_matches('"').to_string());
                }
                KW_ALLOW_USER_DEFINED_FIELDS => {
                    dict.allow_user_defined_fields = parse_switch(&value).ok_or_else(|| {
                        FoamCgnsError::InvalidOption(format!(
                            "{KW_ALLOW_USER_DEFINED_FIELDS}: `{value}` is not a switch"
                        ))
                    })?;
                }
                other => log::debug!("Ignoring dictionary entry {other}"),
            }
        }
        Ok(dict)
    }

    pub fn read(path: &Path) -> Result<Self, FoamCgnsError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Read `<case>/constant/foamToCGNSDict` if it exists.
    pub fn read_case(case_dir: &Path) -> Result<Option<Self>, FoamCgnsError> {
        let path = case_dir.join(DICTIONARY_PATH);
        if !path.is_file() {
            return Ok(None);
        }
        let dict = Self::read(&path)?;
        log::info!(
            "Options from {}: conversion directory {:?}, user-defined fields {}",
            path.display(),
            dict.conversion_directory,
            dict.allow_user_defined_fields
        );
        Ok(Some(dict))
    }
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("//") {
            rest = after.find('\n').map_or("", |i| &after[i..]);
        } else if let Some(after) = rest.strip_prefix("/*") {
            rest = after.find("*/").map_or("", |i| &after[i + 2..]);
            out.push(' ');
        } else {
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                out.push(c);
            }
            rest = chars.as_str();
        }
    }
    out
}

fn top_level_entries(text: &str) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in text.chars() {
        match c {
            '{' => {
                depth += 1;
                current.clear();
            }
            '}' => {
                depth = depth.saturating_sub(1);
                current.clear();
            }
            ';' if depth == 0 => {
                let mut parts = current.split_whitespace();
                if let Some(keyword) = parts.next() {
                    let value = parts.collect::<Vec<_>>().join(" ");
                    entries.push((keyword.to_string(), value));
                }
                current.clear();
            }
            _ if depth == 0 => current.push(c),
            _ => {}
        }
    }
    entries
}

fn parse_switch(value: &str) -> Option<bool> {
    match value {
        "on" | "yes" | "true" | "1" | "y" => Some(true),
        "off" | "no" | "false" | "0" | "n" | "none" => Some(false),
        _ => None,
    }
}

/// One time step of a case.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeStep {
    /// Time directory name, used verbatim in the output file name.
    pub time_name: String,
    pub mesh: FoamMesh,
    pub fields: FieldSet,
}

impl TimeStep {
    pub fn new(time_name: impl Into<String>, mesh: FoamMesh, fields: FieldSet) -> Self {
        Self {
            time_name: time_name.into(),
            mesh,
            fields,
        }
    }
}

/// Converts the time steps of one case.
#[derive(Clone, Debug)]
pub struct ConversionDriver {
    case_dir: PathBuf,
    conversion_directory: String,
    assembler: ZoneAssembler,
}

impl ConversionDriver {
    /// Build a driver for `case_dir`. The quantity table is initialised here,
    /// before any step is converted.
    pub fn new(
        case_dir: impl Into<PathBuf>,
        options: ExportOptions,
    ) -> Result<Self, FoamCgnsError> {
        init_quantity_table();
        Ok(Self {
            case_dir: case_dir.into(),
            conversion_directory: DEFAULT_CONVERSION_DIRECTORY.to_string(),
            assembler: ZoneAssembler::new(options)?,
        })
    }

    /// Apply a case dictionary. Its user-defined field switch is OR-ed with
    /// the option already set; its conversion directory replaces the default.
    pub fn with_dictionary(self, dict: &ConversionDictionary) -> Result<Self, FoamCgnsError> {
        let options = self.assembler.options().clone();
        let allow = options.allow_user_defined_fields || dict.allow_user_defined_fields;
        let conversion_directory = dict
            .conversion_directory
            .clone()
            .unwrap_or(self.conversion_directory);
        Ok(Self {
            case_dir: self.case_dir,
            conversion_directory,
            assembler: ZoneAssembler::new(options.with_user_defined_fields(allow))?,
        })
    }

    pub fn options(&self) -> &ExportOptions {
        self.assembler.options()
    }

    pub fn output_dir(&self) -> PathBuf {
        self.case_dir.join(&self.conversion_directory)
    }

    /// Create the output directory if needed.
    ///
    /// Failure is only logged; the subsequent file write reports the error.
    pub fn prepare_output_dir(&self) -> PathBuf {
        let dir = self.output_dir();
        if let Err(err) = fs::create_dir_all(&dir) {
            log::warn!("Could not create {}: {err}", dir.display());
        } else if !dir.is_dir() {
            log::warn!("{} is not a directory", dir.display());
        }
        dir
    }

    /// File that receives time step `time_name`.
    pub fn output_path(&self, time_name: &str) -> PathBuf {
        let suffix = match self.options().mode {
            ExportMode::Volume => "",
            ExportMode::BoundaryOnly => "_boundaries",
            ExportMode::BoundaryTest => "_boundaries_simple",
        };
        self.output_dir().join(format!("{time_name}{suffix}.cgns"))
    }

    pub fn assemble_step<I: PointInterpolator + ?Sized>(
        &self,
        step: &TimeStep,
        interpolator: &I,
    ) -> Result<CgnsTree, FoamCgnsError> {
        log::info!("Time = {}", step.time_name);
        self.assembler.assemble(&step.mesh, &step.fields, interpolator)
    }

    /// Convert one step and replay it into `writer`.
    pub fn convert_step<I, W>(
        &self,
        step: &TimeStep,
        interpolator: &I,
        writer: &mut W,
    ) -> Result<(), FoamCgnsError>
    where
        I: PointInterpolator + ?Sized,
        W: CgnsWriter + ?Sized,
    {
        let tree = self.assemble_step(step, interpolator)?;
        tree.write_to(writer)
    }

    /// Convert every step in order, opening one writer per output file.
    ///
    /// A fatal error in any step stops the run; files of earlier steps stay
    /// written. Returns the paths handed to `open`.
    pub fn convert_series<I, W, F>(
        &self,
        steps: &[TimeStep],
        interpolator: &I,
        mut open: F,
    ) -> Result<Vec<PathBuf>, FoamCgnsError>
    where
        I: PointInterpolator + ?Sized,
        W: CgnsWriter,
        F: FnMut(&Path) -> Result<W, FoamCgnsError>,
    {
        self.prepare_output_dir();
        let mut written = Vec::with_capacity(steps.len());
        for step in steps {
            let tree = self.assemble_step(step, interpolator)?;
            let path = self.output_path(&step.time_name);
            log::info!("Writing {}", path.display());
            let mut writer = open(&path)?;
            tree.write_to(&mut writer)?;
            written.push(path);
        }
        Ok(written)
    }

    /// Assemble all steps concurrently; trees come back in input order.
    #[cfg(feature = "rayon")]
    pub fn assemble_parallel<I>(
        &self,
        steps: &[TimeStep],
        interpolator: &I,
    ) -> Result<Vec<CgnsTree>, FoamCgnsError>
    where
        I: PointInterpolator + Sync + ?Sized,
    {
        use rayon::prelude::*;
        steps
            .par_iter()
            .map(|step| self.assemble_step(step, interpolator))
            .collect()
    }
}
