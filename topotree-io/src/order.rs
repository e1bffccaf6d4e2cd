//! Removal order files
//!
//! An order is stored under a path prefix as two files:
//! - `<prefix>.order.dat`: text, a single line with the number of entries `N`
//! - `<prefix>.order.bin`: `N` little-endian `u32` branch ids followed by
//!   `N` little-endian `f32` normalized weights

use crate::error::{open, IoError};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use topotree_core::{Error, Result, SimplificationOrder};
use tracing::debug;

/// Paths of the count sidecar and the binary payload for `prefix`
pub fn order_paths<P: AsRef<Path>>(prefix: P) -> (PathBuf, PathBuf) {
    let with_suffix = |suffix: &str| {
        let mut s = prefix.as_ref().as_os_str().to_owned();
        s.push(suffix);
        PathBuf::from(s)
    };
    (with_suffix(".order.dat"), with_suffix(".order.bin"))
}

/// Write `order` under `prefix`.
///
/// Weights must be non-decreasing along the order.
pub fn write_order<P: AsRef<Path>>(prefix: P, order: &SimplificationOrder) -> Result<()> {
    if order.order.len() != order.weights.len() {
        return Err(Error::InvalidData(format!(
            "order has {} entries but {} weights",
            order.order.len(),
            order.weights.len()
        )));
    }
    if !order.is_monotonic() {
        return Err(Error::Consistency(
            "order weights are not non-decreasing".to_string(),
        ));
    }

    let (dat_path, bin_path) = order_paths(prefix);

    debug!("writing meta data to {}", dat_path.display());
    let mut dat = BufWriter::new(create(&dat_path)?);
    writeln!(dat, "{}", order.len())?;
    dat.flush()?;

    debug!("writing order to {}", bin_path.display());
    let ids: Vec<u32> = order.order.iter().map(|id| id.to_le()).collect();
    let wts: Vec<u32> = order.weights.iter().map(|w| w.to_bits().to_le()).collect();
    let mut bin = BufWriter::new(create(&bin_path)?);
    bin.write_all(bytemuck::cast_slice(&ids[..]))?;
    bin.write_all(bytemuck::cast_slice(&wts[..]))?;
    bin.flush()?;
    Ok(())
}

fn create(path: &Path) -> std::result::Result<File, IoError> {
    File::create(path).map_err(|e| IoError::WriteError {
        message: format!("cannot create {}: {}", path.display(), e),
    })
}

/// Read an order previously written under `prefix`
pub fn read_order<P: AsRef<Path>>(prefix: P) -> Result<SimplificationOrder> {
    let (dat_path, bin_path) = order_paths(prefix);

    let mut text = String::new();
    open(&dat_path)?.read_to_string(&mut text)?;
    let count: usize = text.trim().parse().map_err(|_| IoError::ParseError {
        message: format!(
            "expected an entry count in {}, found {:?}",
            dat_path.display(),
            text.trim()
        ),
    })?;

    let mut bytes = Vec::new();
    BufReader::new(open(&bin_path)?).read_to_end(&mut bytes)?;
    let expected = count
        .checked_mul(2 * std::mem::size_of::<u32>())
        .ok_or_else(|| IoError::InvalidFormat {
            format: format!("entry count {} in {} is too large", count, dat_path.display()),
        })?;
    if bytes.len() != expected {
        return Err(IoError::InvalidFormat {
            format: format!(
                "{} holds {} bytes, expected {} for {} entries",
                bin_path.display(),
                bytes.len(),
                expected,
                count
            ),
        }
        .into());
    }

    let words: Vec<u32> = bytes
        .chunks_exact(4)
        .map(|c| u32::from_le(bytemuck::pod_read_unaligned(c)))
        .collect();
    let (ids, wts) = words.split_at(count);
    debug!("read order of {} entries", count);
    SimplificationOrder::new(ids.to_vec(), wts.iter().map(|&w| f32::from_bits(w)).collect())
}
