//! Zip archive decoding.
//!
//! Parses an in-memory Zip32 container through its central directory and
//! produces decompressed entries. Directory markers, macOS metadata
//! entries, encrypted entries, and entries using unsupported compression
//! methods are skipped; structural damage fails the whole archive.
//!
//! Supported: Zip32 with methods Store (0) and Deflate (8). Zip64 and
//! multi-disk containers are parse failures. Sizes and offsets come from
//! the central directory, which stays valid even for entries written with
//! streaming data descriptors.

use std::io::Read;

use flate2::read::DeflateDecoder;
use tracing::debug;

use crate::bundle::BundleFile;
use crate::error::ArchiveError;
use crate::paths::is_metadata_path;

const SIG_EOCD: u32 = 0x0605_4b50;
const SIG_CDFH: u32 = 0x0201_4b50;
const SIG_LFH: u32 = 0x0403_4b50;

/// End-of-central-directory fixed record length.
const EOCD_MIN_LEN: usize = 22;
/// EOCD search window: maximum comment (64 KiB) plus header margin.
const EOCD_SEARCH_MAX: usize = 66 * 1024;
/// Central directory fixed header length.
const CDFH_LEN: usize = 46;
/// Local file header fixed length.
const LFH_LEN: usize = 30;

/// Compression method recorded for a central-directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    Store,
    Deflate,
    Unsupported(u16),
}

impl CompressionMethod {
    fn from_code(code: u16) -> Self {
        match code {
            0 => CompressionMethod::Store,
            8 => CompressionMethod::Deflate,
            other => CompressionMethod::Unsupported(other),
        }
    }
}

/// Decodes a zip byte stream into its non-directory file entries.
///
/// Paths come out exactly as stored in the central directory (lossy
/// UTF-8); callers normalize them afterwards. Fails with
/// [`ArchiveError::Empty`] when the central directory lists nothing but
/// directory markers.
pub fn decode_archive(data: &[u8]) -> Result<Vec<BundleFile>, ArchiveError> {
    let eocd = locate_eocd(data)?;

    let mut files = Vec::new();
    let mut non_directory = 0usize;
    let mut pos = eocd.cd_off;

    for _ in 0..eocd.entries_total {
        let hdr = data
            .get(pos..pos + CDFH_LEN)
            .ok_or_else(|| parse_err("truncated central directory"))?;
        if le_u32(&hdr[0..4]) != SIG_CDFH {
            return Err(parse_err("bad central-directory signature"));
        }

        let flags = le_u16(&hdr[8..10]);
        let method_code = le_u16(&hdr[10..12]);
        let comp_size = le_u32(&hdr[20..24]);
        let uncomp_size = le_u32(&hdr[24..28]);
        let name_len = le_u16(&hdr[28..30]) as usize;
        let extra_len = le_u16(&hdr[30..32]) as usize;
        let comment_len = le_u16(&hdr[32..34]) as usize;
        let external_attrs = le_u32(&hdr[38..42]);
        let lfh_off = le_u32(&hdr[42..46]);

        if comp_size == 0xFFFF_FFFF || uncomp_size == 0xFFFF_FFFF || lfh_off == 0xFFFF_FFFF {
            return Err(parse_err("zip64 archives are not supported"));
        }

        let name_bytes = data
            .get(pos + CDFH_LEN..pos + CDFH_LEN + name_len)
            .ok_or_else(|| parse_err("truncated central directory"))?;
        let name = String::from_utf8_lossy(name_bytes).into_owned();

        pos += CDFH_LEN + name_len + extra_len + comment_len;
        if pos > eocd.cd_end {
            return Err(parse_err("truncated central directory"));
        }

        // MS-DOS directory bit in the external attributes; some archivers
        // set it without the trailing slash.
        if name.ends_with('/') || external_attrs & 0x10 != 0 {
            continue; // directory marker
        }
        non_directory += 1;

        if is_metadata_path(&name) {
            debug!(entry = %name, "skipping metadata entry");
            continue;
        }
        if flags & 0x0001 != 0 {
            debug!(entry = %name, "skipping encrypted entry");
            continue;
        }

        let bytes = match CompressionMethod::from_code(method_code) {
            CompressionMethod::Store => {
                entry_data(data, &name, lfh_off as usize, comp_size as usize)?.to_vec()
            }
            CompressionMethod::Deflate => {
                let compressed = entry_data(data, &name, lfh_off as usize, comp_size as usize)?;
                inflate_entry(compressed, &name, uncomp_size as usize)?
            }
            CompressionMethod::Unsupported(code) => {
                debug!(entry = %name, method = code, "skipping unsupported compression method");
                continue;
            }
        };

        if bytes.len() != uncomp_size as usize {
            return Err(parse_err(format!("size mismatch for {name}")));
        }

        files.push(BundleFile { path: name, bytes });
    }

    if non_directory == 0 {
        return Err(ArchiveError::Empty);
    }

    Ok(files)
}

struct Eocd {
    entries_total: u16,
    cd_off: usize,
    cd_end: usize,
}

/// Finds the end-of-central-directory record by scanning backward over the
/// trailing window. A candidate signature only counts when its comment
/// field fits within the file.
fn locate_eocd(data: &[u8]) -> Result<Eocd, ArchiveError> {
    if data.len() < EOCD_MIN_LEN {
        return Err(parse_err("too short for an end-of-central-directory record"));
    }

    let win_start = data.len().saturating_sub(EOCD_SEARCH_MAX);
    let win = &data[win_start..];

    let mut pos = win.len() - EOCD_MIN_LEN;
    loop {
        if le_u32(&win[pos..pos + 4]) == SIG_EOCD {
            let comment_len = le_u16(&win[pos + 20..pos + 22]) as usize;
            if pos + EOCD_MIN_LEN + comment_len <= win.len() {
                return parse_eocd(data, &win[pos..pos + EOCD_MIN_LEN]);
            }
        }
        if pos == 0 {
            return Err(parse_err("no end-of-central-directory record found"));
        }
        pos -= 1;
    }
}

fn parse_eocd(data: &[u8], eocd: &[u8]) -> Result<Eocd, ArchiveError> {
    let disk_no = le_u16(&eocd[4..6]);
    let cd_disk = le_u16(&eocd[6..8]);
    let entries_disk = le_u16(&eocd[8..10]);
    let entries_total = le_u16(&eocd[10..12]);
    let cd_size = le_u32(&eocd[12..16]);
    let cd_off = le_u32(&eocd[16..20]);

    if disk_no != 0 || cd_disk != 0 || entries_disk != entries_total {
        return Err(parse_err("multi-disk archives are not supported"));
    }
    if entries_total == 0xFFFF || cd_size == 0xFFFF_FFFF || cd_off == 0xFFFF_FFFF {
        return Err(parse_err("zip64 archives are not supported"));
    }

    let cd_off = cd_off as usize;
    let cd_end = cd_off.saturating_add(cd_size as usize);
    if cd_end > data.len() {
        return Err(parse_err("central directory out of bounds"));
    }

    Ok(Eocd {
        entries_total,
        cd_off,
        cd_end,
    })
}

/// Resolves an entry's compressed byte range via its local file header.
fn entry_data<'a>(
    data: &'a [u8],
    name: &str,
    lfh_off: usize,
    comp_size: usize,
) -> Result<&'a [u8], ArchiveError> {
    let lfh = data
        .get(lfh_off..lfh_off + LFH_LEN)
        .ok_or_else(|| parse_err(format!("local header out of bounds for {name}")))?;
    if le_u32(&lfh[0..4]) != SIG_LFH {
        return Err(parse_err(format!("bad local-header signature for {name}")));
    }

    let name_len = le_u16(&lfh[26..28]) as usize;
    let extra_len = le_u16(&lfh[28..30]) as usize;

    let start = lfh_off + LFH_LEN + name_len + extra_len;
    let end = start.saturating_add(comp_size);
    data.get(start..end)
        .ok_or_else(|| parse_err(format!("entry data out of bounds for {name}")))
}

fn inflate_entry(compressed: &[u8], name: &str, size_hint: usize) -> Result<Vec<u8>, ArchiveError> {
    let mut out = Vec::with_capacity(size_hint);
    DeflateDecoder::new(compressed)
        .read_to_end(&mut out)
        .map_err(|e| parse_err(format!("corrupt deflate stream in {name}: {e}")))?;
    Ok(out)
}

fn parse_err(detail: impl Into<String>) -> ArchiveError {
    ArchiveError::Parse(detail.into())
}

fn le_u16(b: &[u8]) -> u16 {
    u16::from_le_bytes([b[0], b[1]])
}

fn le_u32(b: &[u8]) -> u32 {
    u32::from_le_bytes([b[0], b[1], b[2], b[3]])
}
