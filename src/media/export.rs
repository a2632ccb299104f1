// SPDX-License-Identifier: MPL-2.0
//! Writing composited PNGs to disk.

use crate::error::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Upper bound on `-N` suffixes tried when names collide.
const MAX_NAME_SUFFIX: u32 = 999;

/// Builds the download file name for a given instant.
///
/// The ISO-8601 timestamp has `:` and `.` replaced so the name is valid on
/// every filesystem, e.g. `pfp-2025-01-31T09-15-00-123Z.png`.
#[must_use]
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("pfp-{}.png", sanitized_stamp(now))
}

fn sanitized_stamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}

/// Writes `png` into `directory` under a timestamped name.
///
/// The directory is created if missing. An existing file is never
/// overwritten: a name taken within the same millisecond gets a `-N`
/// suffix. Returns the written path.
pub fn write_export(directory: &Path, png: &[u8], now: DateTime<Utc>) -> Result<PathBuf> {
    fs::create_dir_all(directory)?;
    let stamp = sanitized_stamp(now);

    for suffix in 0..=MAX_NAME_SUFFIX {
        let name = if suffix == 0 {
            format!("pfp-{stamp}.png")
        } else {
            format!("pfp-{stamp}-{suffix}.png")
        };
        let path = directory.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(png)?;
                return Ok(path);
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(err) => return Err(err.into()),
        }
    }
    Err(Error::Io(format!(
        "no free export name for {stamp} in {}",
        directory.display()
    )))
}
