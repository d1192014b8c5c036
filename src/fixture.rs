//! Binary dataset fixtures.
//!
//! Data files hold contiguous `(y, x)` u32 records — y precedes x, matching
//! the storage convention of the upstream capture pipeline. Truth files
//! hold contiguous i32 labels in the same point order. No header; native
//! byte order.

use std::fs;
use std::io;
use std::mem;
use std::path::Path;

use bytemuck::{Pod, Zeroable};

use crate::GridPoint;

/// On-disk record layout: y first.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct RawRecord {
    y: u32,
    x: u32,
}

/// Read a data file of `(y, x)` pairs.
pub fn read_points(path: &Path) -> io::Result<Vec<GridPoint>> {
    let bytes = fs::read(path)?;
    if bytes.len() % mem::size_of::<RawRecord>() != 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "data file {} is not a whole number of (y, x) u32 pairs",
                path.display()
            ),
        ));
    }
    let records: Vec<RawRecord> = bytemuck::pod_collect_to_vec(&bytes);
    Ok(records
        .into_iter()
        .map(|record| GridPoint::new(record.x, record.y))
        .collect())
}

/// Write a data file of `(y, x)` pairs.
pub fn write_points(path: &Path, points: &[GridPoint]) -> io::Result<()> {
    let records: Vec<RawRecord> = points
        .iter()
        .map(|point| RawRecord {
            y: point.y,
            x: point.x,
        })
        .collect();
    fs::write(path, bytemuck::cast_slice(&records))
}

/// Read a truth file of i32 labels.
pub fn read_labels(path: &Path) -> io::Result<Vec<i32>> {
    let bytes = fs::read(path)?;
    if bytes.len() % mem::size_of::<i32>() != 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "truth file {} is not a whole number of i32 labels",
                path.display()
            ),
        ));
    }
    Ok(bytemuck::pod_collect_to_vec(&bytes))
}

/// Write a truth file of i32 labels.
pub fn write_labels(path: &Path, labels: &[i32]) -> io::Result<()> {
    fs::write(path, bytemuck::cast_slice(labels))
}
