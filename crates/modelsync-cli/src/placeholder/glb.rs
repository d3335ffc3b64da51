//! Binary glTF 2.0 (GLB) encoding for placeholder meshes
//!
//! Layout: 12-byte header, a JSON chunk padded with spaces and a BIN chunk
//! padded with zeros, both to 4-byte boundaries. The BIN chunk holds f32
//! positions followed by u32 indices.

use super::shapes::Mesh;
use serde_json::json;

const GLB_MAGIC: &[u8; 4] = b"glTF";
const GLB_VERSION: u32 = 2;
const CHUNK_JSON: &[u8; 4] = b"JSON";
const CHUNK_BIN: &[u8; 4] = b"BIN\0";

const COMPONENT_FLOAT: u32 = 5126;
const COMPONENT_UNSIGNED_INT: u32 = 5125;
const TARGET_ARRAY_BUFFER: u32 = 34962;
const TARGET_ELEMENT_ARRAY_BUFFER: u32 = 34963;

/// Encode a single-mesh scene with one flat-colored material
pub fn encode_glb(mesh: &Mesh, color: [f32; 4], name: &str) -> Result<Vec<u8>, serde_json::Error> {
    let mut bin = Vec::with_capacity(mesh.positions.len() * 12 + mesh.indices.len() * 4);
    for position in &mesh.positions {
        for component in position {
            bin.extend_from_slice(&component.to_le_bytes());
        }
    }
    let positions_len = bin.len();
    for index in &mesh.indices {
        bin.extend_from_slice(&index.to_le_bytes());
    }
    let indices_len = bin.len() - positions_len;

    let (min, max) = mesh.bounds();
    let document = json!({
        "asset": { "version": "2.0", "generator": concat!("modelsync ", env!("CARGO_PKG_VERSION")) },
        "scene": 0,
        "scenes": [{ "name": name, "nodes": [0] }],
        "nodes": [{ "name": name, "mesh": 0 }],
        "meshes": [{
            "name": name,
            "primitives": [{
                "attributes": { "POSITION": 0 },
                "indices": 1,
                "material": 0
            }]
        }],
        "materials": [{
            "name": format!("{name} placeholder"),
            "pbrMetallicRoughness": {
                "baseColorFactor": color,
                "metallicFactor": 0.0,
                "roughnessFactor": 0.8
            }
        }],
        "accessors": [
            {
                "bufferView": 0,
                "componentType": COMPONENT_FLOAT,
                "count": mesh.positions.len(),
                "type": "VEC3",
                "min": min,
                "max": max
            },
            {
                "bufferView": 1,
                "componentType": COMPONENT_UNSIGNED_INT,
                "count": mesh.indices.len(),
                "type": "SCALAR"
            }
        ],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": positions_len, "target": TARGET_ARRAY_BUFFER },
            { "buffer": 0, "byteOffset": positions_len, "byteLength": indices_len, "target": TARGET_ELEMENT_ARRAY_BUFFER }
        ],
        "buffers": [{ "byteLength": bin.len() }]
    });

    let mut json_chunk = serde_json::to_vec(&document)?;
    pad_to_four(&mut json_chunk, b' ');
    pad_to_four(&mut bin, 0);

    let total_len = 12 + 8 + json_chunk.len() + 8 + bin.len();
    let mut glb = Vec::with_capacity(total_len);

    glb.extend_from_slice(GLB_MAGIC);
    glb.extend_from_slice(&GLB_VERSION.to_le_bytes());
    glb.extend_from_slice(&(total_len as u32).to_le_bytes());

    glb.extend_from_slice(&(json_chunk.len() as u32).to_le_bytes());
    glb.extend_from_slice(CHUNK_JSON);
    glb.extend_from_slice(&json_chunk);

    glb.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    glb.extend_from_slice(CHUNK_BIN);
    glb.extend_from_slice(&bin);

    Ok(glb)
}

fn pad_to_four(bytes: &mut Vec<u8>, fill: u8) {
    let padding = (4 - bytes.len() % 4) % 4;
    bytes.resize(bytes.len() + padding, fill);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::placeholder::shapes::ShapeKind;

    fn read_u32(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn test_glb_container_layout() {
        let mesh = ShapeKind::Box.build(1.0);
        let glb = encode_glb(&mesh, [0.83, 0.69, 0.22, 1.0], "hampi").unwrap();

        assert_eq!(&glb[0..4], b"glTF");
        assert_eq!(read_u32(&glb, 4), 2);
        assert_eq!(read_u32(&glb, 8) as usize, glb.len());
        assert_eq!(glb.len() % 4, 0);

        let json_len = read_u32(&glb, 12) as usize;
        assert_eq!(json_len % 4, 0);
        assert_eq!(&glb[16..20], b"JSON");

        let bin_header = 20 + json_len;
        let bin_len = read_u32(&glb, bin_header) as usize;
        assert_eq!(&glb[bin_header + 4..bin_header + 8], b"BIN\0");
        assert_eq!(bin_len, 8 * 12 + 36 * 4);
        assert_eq!(bin_header + 8 + bin_len, glb.len());
    }

    #[test]
    fn test_glb_json_describes_mesh() {
        let mesh = ShapeKind::Temple.build(1.0);
        let glb = encode_glb(&mesh, [0.55, 0.27, 0.07, 1.0], "khajuraho").unwrap();

        let json_len = read_u32(&glb, 12) as usize;
        let document: serde_json::Value = serde_json::from_slice(&glb[20..20 + json_len]).unwrap();

        assert_eq!(document["asset"]["version"], "2.0");
        assert_eq!(document["nodes"][0]["name"], "khajuraho");
        assert_eq!(document["accessors"][0]["count"], mesh.positions.len());
        assert_eq!(document["accessors"][1]["count"], mesh.indices.len());
        assert_eq!(document["accessors"][1]["componentType"], 5125);
        assert_eq!(document["bufferViews"][1]["byteOffset"], mesh.positions.len() * 12);
        let base_color = &document["materials"][0]["pbrMetallicRoughness"]["baseColorFactor"];
        assert_eq!(base_color.as_array().unwrap().len(), 4);
    }
}
