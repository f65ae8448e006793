//! Download and preprocess an OSRM dataset for the container-backed tests.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use route_planner::traits::TravelMode;
use thiserror::Error;

const OSRM_IMAGE: &str = "osrm/osrm-backend";

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset io failed: {0}")]
    Io(#[from] io::Error),
    #[error("extract download failed: {0}")]
    Download(#[from] reqwest::Error),
    #[error("{tool} failed with {status}")]
    Preprocess { tool: String, status: String },
}

/// A Geofabrik extract such as `north-america/us/nevada`.
#[derive(Debug, Clone)]
pub struct Region {
    path: String,
}

impl Region {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or("region")
    }

    fn url(&self) -> String {
        format!("https://download.geofabrik.de/{}-latest.osm.pbf", self.path)
    }
}

/// A preprocessed MLD dataset on disk, mountable at `/data`.
#[derive(Debug, Clone)]
pub struct OsrmDataset {
    pub data_dir: PathBuf,
    pub osrm_file: String,
}

impl OsrmDataset {
    /// Reuse whatever is already under `data_root`; download and preprocess
    /// only the missing pieces.
    pub fn ensure(region: &Region, mode: TravelMode, data_root: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let data_root = data_root.as_ref();
        let data_root = if data_root.is_absolute() {
            data_root.to_path_buf()
        } else {
            std::env::current_dir()?.join(data_root)
        };
        let data_dir = data_root.join(format!("{}-{}", region.name(), mode.osrm_profile()));
        fs::create_dir_all(&data_dir)?;

        let pbf_file = format!("{}-latest.osm.pbf", region.name());
        let osrm_file = format!("{}-latest.osrm", region.name());

        let pbf_path = data_dir.join(&pbf_file);
        if !pbf_path.exists() {
            eprintln!("downloading {}", region.url());
            download(&region.url(), &pbf_path)?;
        }

        let osrm_base = data_dir.join(&osrm_file);
        if !osrm_base.exists() {
            let profile = format!("/opt/{}.lua", mode.osrm_profile());
            preprocess(&data_dir, &["osrm-extract", "-p", &profile, &format!("/data/{pbf_file}")])?;
        }
        if !partitioned(&osrm_base) {
            preprocess(&data_dir, &["osrm-partition", &format!("/data/{osrm_file}")])?;
            preprocess(&data_dir, &["osrm-customize", &format!("/data/{osrm_file}")])?;
        }

        Ok(Self { data_dir, osrm_file })
    }

    /// Seconds since the epoch of the last preprocessing run; 0 if unknown.
    pub fn revision(&self) -> u64 {
        fs::metadata(self.data_dir.join(format!("{}.partition", self.osrm_file)))
            .and_then(|meta| meta.modified())
            .ok()
            .and_then(|time| time.duration_since(std::time::UNIX_EPOCH).ok())
            .map_or(0, |elapsed| elapsed.as_secs())
    }
}

fn download(url: &str, dest: &Path) -> Result<(), DatasetError> {
    let bytes = reqwest::blocking::get(url)?.error_for_status()?.bytes()?;
    let partial = dest.with_extension("part");
    let mut writer = BufWriter::new(File::create(&partial)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    fs::rename(partial, dest)?;
    Ok(())
}

fn partitioned(osrm_base: &Path) -> bool {
    ["osrm.partition", "osrm.mldgr", "osrm.cells"]
        .iter()
        .all(|ext| osrm_base.with_extension(ext).exists())
}

fn preprocess(data_dir: &Path, args: &[&str]) -> Result<(), DatasetError> {
    let status = Command::new("docker")
        .args(["run", "--rm", "-t", "-v"])
        .arg(format!("{}:/data", data_dir.display()))
        .arg(OSRM_IMAGE)
        .args(args)
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(DatasetError::Preprocess {
            tool: args[0].to_string(),
            status: status.to_string(),
        })
    }
}
