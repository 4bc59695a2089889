//! glTF model decoding (binary GLB container or plain JSON)

use bytemuck::{Pod, Zeroable};
use thiserror::Error;

/// "glTF", little-endian
pub const GLB_MAGIC: u32 = 0x4654_6C67;

/// Only GLB container version 2 is supported
pub const GLB_VERSION: u32 = 2;

const CHUNK_JSON: u32 = 0x4E4F_534A;
const CHUNK_BIN: u32 = 0x004E_4942;

const HEADER_LEN: usize = std::mem::size_of::<GlbHeader>();
const CHUNK_HEADER_LEN: usize = std::mem::size_of::<ChunkHeader>();

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct GlbHeader {
    magic: u32,
    version: u32,
    length: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct ChunkHeader {
    length: u32,
    kind: u32,
}

#[derive(Debug, Error)]
pub enum GlbError {
    #[error("file too short for a GLB header ({0} bytes)")]
    TooShort(usize),

    #[error("unsupported GLB version {0}")]
    UnsupportedVersion(u32),

    #[error("declared length {declared} exceeds file size {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("chunk at offset {0} runs past the end of the file")]
    TruncatedChunk(usize),

    #[error("first chunk is not JSON")]
    MissingJson,

    #[error("invalid glTF JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decoded glTF scene description plus its binary buffer, if embedded
#[derive(Clone, Debug, PartialEq)]
pub struct GltfModel {
    /// GLB container version, or 0 for a plain JSON document
    pub container_version: u32,
    pub document: serde_json::Value,
    pub binary: Option<Vec<u8>>,
}

impl GltfModel {
    /// Decode either a GLB container or a plain `.gltf` JSON document
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GlbError> {
        if bytes.len() >= 4 && read_u32(bytes) == GLB_MAGIC {
            Self::from_glb(bytes)
        } else {
            Ok(Self {
                container_version: 0,
                document: serde_json::from_slice(bytes)?,
                binary: None,
            })
        }
    }

    /// Decode a GLB container
    pub fn from_glb(bytes: &[u8]) -> Result<Self, GlbError> {
        if bytes.len() < HEADER_LEN {
            return Err(GlbError::TooShort(bytes.len()));
        }
        let header: GlbHeader = bytemuck::pod_read_unaligned(&bytes[..HEADER_LEN]);
        let version = u32::from_le(header.version);
        if version != GLB_VERSION {
            return Err(GlbError::UnsupportedVersion(version));
        }
        let declared = u32::from_le(header.length) as usize;
        if declared > bytes.len() {
            return Err(GlbError::LengthMismatch {
                declared,
                actual: bytes.len(),
            });
        }
        let body = &bytes[..declared];

        let mut offset = HEADER_LEN;
        let (kind, json) = read_chunk(body, offset)?.ok_or(GlbError::MissingJson)?;
        if kind != CHUNK_JSON {
            return Err(GlbError::MissingJson);
        }
        offset += CHUNK_HEADER_LEN + json.len();
        let document = serde_json::from_slice(json)?;

        let mut binary = None;
        while let Some((kind, data)) = read_chunk(body, offset)? {
            // Unknown chunk types are skipped
            if kind == CHUNK_BIN && binary.is_none() {
                binary = Some(data.to_vec());
            }
            offset += CHUNK_HEADER_LEN + data.len();
        }

        Ok(Self {
            container_version: version,
            document,
            binary,
        })
    }

    /// `asset.version` from the document (e.g. "2.0")
    pub fn asset_version(&self) -> Option<&str> {
        self.document.get("asset")?.get("version")?.as_str()
    }

    pub fn mesh_count(&self) -> usize {
        self.array_len("meshes")
    }

    pub fn node_count(&self) -> usize {
        self.array_len("nodes")
    }

    fn array_len(&self, key: &str) -> usize {
        self.document
            .get(key)
            .and_then(|v| v.as_array())
            .map_or(0, |a| a.len())
    }
}

fn read_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Chunk starting at `offset`, or `None` at the end of the body
fn read_chunk(body: &[u8], offset: usize) -> Result<Option<(u32, &[u8])>, GlbError> {
    if offset == body.len() {
        return Ok(None);
    }
    let data_start = offset + CHUNK_HEADER_LEN;
    if data_start > body.len() {
        return Err(GlbError::TruncatedChunk(offset));
    }
    let header: ChunkHeader = bytemuck::pod_read_unaligned(&body[offset..data_start]);
    let data_end = data_start + u32::from_le(header.length) as usize;
    if data_end > body.len() {
        return Err(GlbError::TruncatedChunk(offset));
    }
    Ok(Some((u32::from_le(header.kind), &body[data_start..data_end])))
}

/// Build a GLB container from a JSON document and optional binary buffer
pub fn encode_glb(document: &serde_json::Value, binary: Option<&[u8]>) -> Result<Vec<u8>, GlbError> {
    let mut json = serde_json::to_vec(document)?;
    while json.len() % 4 != 0 {
        json.push(b' ');
    }
    let bin = binary.map(|b| {
        let mut b = b.to_vec();
        while b.len() % 4 != 0 {
            b.push(0);
        }
        b
    });

    let total = HEADER_LEN
        + CHUNK_HEADER_LEN
        + json.len()
        + bin.as_ref().map_or(0, |b| CHUNK_HEADER_LEN + b.len());

    let mut out = Vec::with_capacity(total);
    for word in [GLB_MAGIC, GLB_VERSION, total as u32] {
        out.extend_from_slice(&word.to_le_bytes());
    }
    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    out.extend_from_slice(&json);
    if let Some(bin) = bin {
        out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
        out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
        out.extend_from_slice(&bin);
    }
    Ok(out)
}
